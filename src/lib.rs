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

//! This package reads the control group (cgroup) membership of Linux processes from `/proc/<pid>/cgroup`, together with the memory limit configured for the process's cgroup in the cgroups v1 memory hierarchy.
//!
//! It is intended for monitoring and accounting tools that need to attribute a process to its memory cgroup without shelling out to external utilities.
//!
//! ```no_run
//! use cgproc::Proc;
//!
//! for cgroup in Proc::current().cgroups()? {
//!     println!("{}: {} bytes", cgroup.path, cgroup.memory_limit);
//! }
//! # Ok::<(), cgproc::Error>(())
//! ```
//!
//! There is also a small CLI, `cgproc`, which prints the same information for any PID.

mod cgroup;
mod error;
pub mod fs;
mod memory;
mod mounts;
mod proc;

pub use cgroup::parse_cgroups;
pub use cgroup::Cgroup;
pub use error::Error;
pub use error::Result;
pub use mounts::Mounts;
pub use proc::Proc;
