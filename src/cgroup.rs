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

use crate::memory;
use crate::Error;
use crate::Mounts;
use crate::Result;
use serde::Serialize;

const MEMORY_CONTROLLER: &str = "memory";

/// One line of `/proc/<pid>/cgroup`: where a process sits in one hierarchy.
///
/// Under cgroups v1 every controller (or group of co-mounted controllers) has
/// its own hierarchy with a distinct ID, which can be matched against
/// `/proc/cgroups`. Under cgroups v2 there is a single hierarchy with ID 0 and
/// an empty controller list.
///
/// `path` is relative to the mount point of the hierarchy. Prefixing it with
/// that mount point locates the control files for this process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Cgroup {
	pub hierarchy_id: u32,
	/// Controllers (also called subsystems) attached to the hierarchy.
	pub controllers: Vec<String>,
	pub path: String,
	/// Contents of `memory.limit_in_bytes` for this cgroup, or 0 if the line is
	/// not for the memory hierarchy or the file could not be read.
	pub memory_limit: i64,
}

impl Cgroup {
	/// Parses one line of the form `hierarchy-ID:controller1,controller2:path`.
	///
	/// When the controller field is exactly `memory`, the memory limit is read
	/// from below [`Mounts::memory_root`]. Failing to read it is not an error.
	///
	/// The line is split on every `:`, so a path that itself contains `:` is
	/// truncated at its first colon.
	///
	/// # Examples
	///
	/// ```
	/// use cgproc::{Cgroup, Mounts};
	///
	/// let cgroup = Cgroup::parse_line("4:cpu,cpuacct:/user.slice", &Mounts::default()).unwrap();
	/// assert_eq!(cgroup.hierarchy_id, 4);
	/// assert_eq!(cgroup.controllers, ["cpu", "cpuacct"]);
	/// assert_eq!(cgroup.path, "/user.slice");
	/// assert_eq!(cgroup.memory_limit, 0);
	/// ```
	pub fn parse_line(line: &str, mounts: &Mounts) -> Result<Self> {
		let fields: Vec<&str> = line.split(':').collect();
		let [id, controllers, path, ..] = fields[..] else {
			return Err(Error::MalformedLine {
				fields: fields.len(),
				line: line.to_string(),
			});
		};

		let mut cgroup = Cgroup {
			path: path.to_string(),
			..Default::default()
		};
		if controllers == MEMORY_CONTROLLER {
			match memory::memory_limit(mounts, path) {
				Ok(Some(limit)) => cgroup.memory_limit = limit,
				Ok(None) => {}
				Err(err) => tracing::debug!(error = %err, "ignoring memory limit"),
			}
		}
		cgroup.hierarchy_id = id.parse().map_err(|source| Error::HierarchyId {
			field: id.to_string(),
			line: line.to_string(),
			source,
		})?;
		if !controllers.is_empty() {
			cgroup.controllers = controllers.split(',').map(String::from).collect();
		}
		Ok(cgroup)
	}

	pub fn is_memory(&self) -> bool {
		self.controllers.first().is_some_and(|c| c == MEMORY_CONTROLLER)
	}
}

/// Decodes the contents of a `/proc/<pid>/cgroup` file.
///
/// Only records whose first controller is `memory` are returned. Any line that
/// fails to parse fails the whole call.
pub fn parse_cgroups(data: &[u8], mounts: &Mounts) -> Result<Vec<Cgroup>> {
	let text = String::from_utf8_lossy(data);
	let mut cgroups = Vec::new();
	for line in text.lines() {
		let cgroup = Cgroup::parse_line(line, mounts)?;
		if !cgroup.is_memory() {
			tracing::trace!(line, "skipping non-memory cgroup");
			continue;
		}
		cgroups.push(cgroup);
	}
	Ok(cgroups)
}
