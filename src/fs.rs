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

use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

/// Upper bound on the number of bytes read from a single pseudo-file.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Reads a whole file into memory without consulting its metadata.
///
/// Files under procfs and cgroupfs report a size of zero, so the buffer is
/// grown while reading instead of being sized up front. At most
/// [`MAX_FILE_SIZE`] bytes are returned.
pub fn read_file_no_stat(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
	let file = File::open(path)?;
	let mut data = Vec::new();
	file.take(MAX_FILE_SIZE).read_to_end(&mut data)?;
	Ok(data)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_read_whole_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("cgroup");
		fs::write(&path, "0::/user.slice\n").unwrap();
		assert_eq!(read_file_no_stat(&path).unwrap(), b"0::/user.slice\n");
	}

	#[test]
	fn test_read_is_bounded() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("big");
		fs::write(&path, vec![b'x'; MAX_FILE_SIZE as usize + 10]).unwrap();
		assert_eq!(read_file_no_stat(&path).unwrap().len(), MAX_FILE_SIZE as usize);
	}

	#[test]
	fn test_read_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = read_file_no_stat(dir.path().join("missing")).unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn test_read_zero_size_pseudo_file() {
		let path = format!("/proc/{}/cgroup", std::process::id());
		assert!(read_file_no_stat(path).is_ok());
	}
}
