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

use crate::fs::read_file_no_stat;
use crate::Mounts;
use std::ffi::OsString;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub(crate) const LIMIT_FILE: &str = "/memory.limit_in_bytes";

#[derive(Error, Debug)]
pub(crate) enum MemoryLimitError {
	#[error("failed to read {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid memory limit {value:?} in {}", path.display())]
	Parse {
		path: PathBuf,
		value: String,
		#[source]
		source: ParseIntError,
	},
}

/// Path of the v1 memory limit file for a cgroup path.
///
/// The cgroup path is appended as a string, so an absolute cgroup path does not
/// replace the mount point the way [`PathBuf::push`] would.
pub(crate) fn limit_path(mounts: &Mounts, cgroup_path: &str) -> PathBuf {
	let mut path = OsString::from(mounts.memory_root());
	path.push(cgroup_path);
	path.push(LIMIT_FILE);
	PathBuf::from(path)
}

/// Reads `memory.limit_in_bytes` for the cgroup at `cgroup_path`.
///
/// Returns `Ok(None)` when the file does not exist, such as on hosts without a
/// v1 memory hierarchy.
pub(crate) fn memory_limit(mounts: &Mounts, cgroup_path: &str) -> Result<Option<i64>, MemoryLimitError> {
	let path = limit_path(mounts, cgroup_path);
	if path.metadata().is_err() {
		return Ok(None);
	}
	let data = match read_file_no_stat(&path) {
		Ok(data) => data,
		Err(source) => return Err(MemoryLimitError::Read { path, source }),
	};
	let value = String::from_utf8_lossy(&data).trim().to_string();
	match value.parse::<i64>() {
		Ok(limit) => Ok(Some(limit)),
		Err(source) => Err(MemoryLimitError::Parse { path, value, source }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use std::path::Path;

	fn write_limit(root: &Path, cgroup_path: &str, contents: &str) {
		let dir = root.join(cgroup_path.trim_start_matches('/'));
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("memory.limit_in_bytes"), contents).unwrap();
	}

	#[test]
	fn test_limit_path() {
		let mounts = Mounts::default();
		assert_eq!(
			limit_path(&mounts, "/docker/abc"),
			Path::new("/sys/fs/cgroup/memory/docker/abc/memory.limit_in_bytes")
		);
		assert_eq!(limit_path(&mounts, "/"), Path::new("/sys/fs/cgroup/memory//memory.limit_in_bytes"));
	}

	#[test]
	fn test_unlimited() {
		let root = tempfile::tempdir().unwrap();
		write_limit(root.path(), "/b", "9223372036854771712\n");
		let mounts = Mounts::default().with_memory_root(root.path());
		assert_eq!(memory_limit(&mounts, "/b").unwrap(), Some(9223372036854771712));
	}

	#[test]
	fn test_surrounding_whitespace() {
		let root = tempfile::tempdir().unwrap();
		write_limit(root.path(), "/a/b", "  536870912 \n");
		let mounts = Mounts::default().with_memory_root(root.path());
		assert_eq!(memory_limit(&mounts, "/a/b").unwrap(), Some(536870912));
	}

	#[test]
	fn test_missing_file() {
		let root = tempfile::tempdir().unwrap();
		let mounts = Mounts::default().with_memory_root(root.path());
		assert_eq!(memory_limit(&mounts, "/nothing/here").unwrap(), None);
	}

	#[test]
	fn test_garbage() {
		let root = tempfile::tempdir().unwrap();
		write_limit(root.path(), "/b", "max\n");
		let mounts = Mounts::default().with_memory_root(root.path());
		let err = memory_limit(&mounts, "/b").unwrap_err();
		assert!(matches!(err, MemoryLimitError::Parse { ref value, .. } if value == "max"), "{err:?}");
	}

	#[test]
	fn test_unreadable() {
		let root = tempfile::tempdir().unwrap();
		// A directory in place of the file passes the existence check but cannot be read.
		fs::create_dir_all(root.path().join("b/memory.limit_in_bytes")).unwrap();
		let mounts = Mounts::default().with_memory_root(root.path());
		let err = memory_limit(&mounts, "/b").unwrap_err();
		assert!(matches!(err, MemoryLimitError::Read { .. }), "{err:?}");
	}
}
