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

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("at least 3 fields required, found {fields} fields in cgroup string: {line}")]
	MalformedLine { fields: usize, line: String },

	#[error("failed to parse hierarchy ID {field:?} in cgroup string: {line}")]
	HierarchyId {
		field: String,
		line: String,
		#[source]
		source: ParseIntError,
	},

	#[error(transparent)]
	Io(#[from] io::Error),
}
