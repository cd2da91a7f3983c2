// Copyright 2026 Octave Online LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::cgroup::parse_cgroups;
use crate::fs::read_file_no_stat;
use crate::Cgroup;
use crate::Mounts;
use crate::Result;
use std::path::PathBuf;
use std::process;

/// A process, identified by its PID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proc {
	pid: u32,
}

impl Proc {
	pub fn new(pid: u32) -> Self {
		Self { pid }
	}

	pub fn current() -> Self {
		Self::new(process::id())
	}

	pub fn pid(&self) -> u32 {
		self.pid
	}

	/// Memory hierarchy placement of this process, read from `/proc/<pid>/cgroup`.
	///
	/// Only records whose first controller is `memory` are returned, so on a
	/// pure cgroups v2 host the result is empty. Each record carries the memory
	/// limit of its cgroup when `memory.limit_in_bytes` is readable.
	///
	/// Fails if the file cannot be read (for example because the process has
	/// exited) or if any line in it is malformed.
	pub fn cgroups(&self) -> Result<Vec<Cgroup>> {
		self.cgroups_in(&Mounts::default())
	}

	/// Like [`Proc::cgroups`], with procfs and the memory hierarchy at `mounts`.
	///
	/// # Examples
	///
	/// ```no_run
	/// use cgproc::{Mounts, Proc};
	///
	/// let mounts = Mounts::default().with_proc_root("/host/proc");
	/// for cgroup in Proc::new(1).cgroups_in(&mounts)? {
	///     println!("{} {}", cgroup.path, cgroup.memory_limit);
	/// }
	/// # Ok::<(), cgproc::Error>(())
	/// ```
	pub fn cgroups_in(&self, mounts: &Mounts) -> Result<Vec<Cgroup>> {
		let data = read_file_no_stat(self.cgroup_path(mounts))?;
		let cgroups = parse_cgroups(&data, mounts)?;
		tracing::trace!(pid = self.pid, count = cgroups.len(), "read memory cgroups");
		Ok(cgroups)
	}

	fn cgroup_path(&self, mounts: &Mounts) -> PathBuf {
		let mut path = mounts.proc_root().to_path_buf();
		path.push(self.pid.to_string());
		path.push("cgroup");
		path
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;
	use std::fs;
	use std::io;

	fn fake_proc(pid: u32, contents: &str) -> (tempfile::TempDir, Mounts) {
		let root = tempfile::tempdir().unwrap();
		let proc_dir = root.path().join("proc").join(pid.to_string());
		fs::create_dir_all(&proc_dir).unwrap();
		fs::write(proc_dir.join("cgroup"), contents).unwrap();
		let mounts = Mounts::default()
			.with_proc_root(root.path().join("proc"))
			.with_memory_root(root.path().join("memory"));
		(root, mounts)
	}

	#[test]
	fn test_cgroup_path() {
		assert_eq!(
			Proc::new(42).cgroup_path(&Mounts::default()),
			PathBuf::from("/proc/42/cgroup")
		);
	}

	#[test]
	fn test_cgroups_with_limit() {
		let (root, mounts) = fake_proc(1234, "5:cpu:/docker/abc\n4:memory:/docker/abc\n");
		let limit_dir = root.path().join("memory/docker/abc");
		fs::create_dir_all(&limit_dir).unwrap();
		fs::write(limit_dir.join("memory.limit_in_bytes"), "9223372036854771712\n").unwrap();

		let cgroups = Proc::new(1234).cgroups_in(&mounts).unwrap();
		insta::assert_debug_snapshot!(cgroups, @r###"
		[
		    Cgroup {
		        hierarchy_id: 4,
		        controllers: [
		            "memory",
		        ],
		        path: "/docker/abc",
		        memory_limit: 9223372036854771712,
		    },
		]
		"###);
	}

	#[test]
	fn test_cgroups_without_limit_file() {
		let (_root, mounts) = fake_proc(1234, "4:memory:/docker/abc\n");
		let cgroups = Proc::new(1234).cgroups_in(&mounts).unwrap();
		assert_eq!(cgroups.len(), 1);
		assert_eq!(cgroups[0].memory_limit, 0);
	}

	#[test]
	fn test_cgroups_unified_only() {
		let (_root, mounts) = fake_proc(1234, "0::/user.slice/user-1000.slice/session-2.scope\n");
		assert!(Proc::new(1234).cgroups_in(&mounts).unwrap().is_empty());
	}

	#[test]
	fn test_cgroups_process_not_found() {
		let (_root, mounts) = fake_proc(1234, "4:memory:/\n");
		let err = Proc::new(4321).cgroups_in(&mounts).unwrap_err();
		match err {
			Error::Io(err) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
			err => panic!("unexpected error: {err:?}"),
		}
	}

	#[test]
	fn test_cgroups_malformed() {
		let (_root, mounts) = fake_proc(1234, "4:memory:/\nnonsense\n");
		let err = Proc::new(1234).cgroups_in(&mounts).unwrap_err();
		assert!(matches!(err, Error::MalformedLine { .. }), "{err:?}");
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn test_current() {
		let proc = Proc::current();
		assert_eq!(proc.pid(), process::id());
		assert!(proc.cgroups().is_ok());
	}
}
