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

use std::env;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_PROC_ROOT: &str = "/proc";
pub const DEFAULT_MEMORY_ROOT: &str = "/sys/fs/cgroup/memory";

/// Locations of the kernel filesystems that are read.
///
/// `memory_root` is the mount point of the cgroups v1 memory hierarchy. Cgroup
/// paths from `/proc/<pid>/cgroup` are appended to it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounts {
	proc_root: PathBuf,
	memory_root: PathBuf,
}

impl Default for Mounts {
	fn default() -> Self {
		Self {
			proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
			memory_root: PathBuf::from(DEFAULT_MEMORY_ROOT),
		}
	}
}

impl Mounts {
	/// Default mounts, relocated by `HOST_PROC` and `HOST_SYS` when set.
	///
	/// This is useful when running in a container with the host's `/proc` and
	/// `/sys` bind-mounted elsewhere.
	pub fn from_env() -> Self {
		let mut mounts = Self::default();
		if let Some(proc_root) = env::var_os("HOST_PROC") {
			mounts.proc_root = proc_root.into();
		}
		if let Some(sys_root) = env::var_os("HOST_SYS") {
			let mut memory_root = PathBuf::from(sys_root);
			memory_root.push("fs/cgroup/memory");
			mounts.memory_root = memory_root;
		}
		mounts
	}

	pub fn with_proc_root(mut self, path: impl AsRef<Path>) -> Self {
		self.proc_root = path.as_ref().to_path_buf();
		self
	}

	pub fn with_memory_root(mut self, path: impl AsRef<Path>) -> Self {
		self.memory_root = path.as_ref().to_path_buf();
		self
	}

	pub fn proc_root(&self) -> &Path {
		&self.proc_root
	}

	pub fn memory_root(&self) -> &Path {
		&self.memory_root
	}
}
