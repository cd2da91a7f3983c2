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

use cgproc::Cgroup;
use cgproc::Mounts;
use cgproc::Proc;
use clap::ArgAction;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Prints the memory control group and memory limit of processes")]
struct Cli {
	/// Process IDs to inspect. Defaults to the current process.
	#[arg(value_delimiter = ',')]
	pids: Vec<u32>,

	/// Mount point of procfs. Defaults to $HOST_PROC, or /proc.
	#[arg(long, value_name = "DIR")]
	proc_root: Option<PathBuf>,

	/// Mount point of the cgroups v1 memory hierarchy. Defaults to $HOST_SYS/fs/cgroup/memory, or /sys/fs/cgroup/memory.
	#[arg(long, value_name = "DIR")]
	memory_root: Option<PathBuf>,

	/// Print a JSON array instead of tab-separated lines.
	#[arg(long)]
	json: bool,

	/// Log more details to stderr. May be repeated.
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	fn mounts(&self) -> Mounts {
		let mut mounts = Mounts::from_env();
		if let Some(proc_root) = &self.proc_root {
			mounts = mounts.with_proc_root(proc_root);
		}
		if let Some(memory_root) = &self.memory_root {
			mounts = mounts.with_memory_root(memory_root);
		}
		mounts
	}

	fn procs(&self) -> Vec<Proc> {
		if self.pids.is_empty() {
			vec![Proc::current()]
		} else {
			self.pids.iter().copied().map(Proc::new).collect()
		}
	}
}

#[derive(Serialize, Debug)]
struct Report {
	pid: u32,
	cgroups: Vec<Cgroup>,
}

fn init_tracing(verbose: u8) {
	let filter = match verbose {
		0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		1 => EnvFilter::new("info"),
		2 => EnvFilter::new("debug"),
		_ => EnvFilter::new("trace"),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn format_line(pid: u32, cgroup: &Cgroup) -> String {
	format!(
		"{}\t{}\t{}\t{}\t{}",
		pid,
		cgroup.hierarchy_id,
		cgroup.controllers.join(","),
		cgroup.path,
		cgroup.memory_limit
	)
}

fn main() -> ExitCode {
	let args = Cli::parse();
	init_tracing(args.verbose);
	let mounts = args.mounts();
	tracing::debug!(?mounts, "using mounts");

	let mut failed = false;
	let mut reports = Vec::new();
	for proc in args.procs() {
		match proc.cgroups_in(&mounts) {
			Ok(cgroups) => reports.push(Report {
				pid: proc.pid(),
				cgroups,
			}),
			Err(err) => {
				eprintln!("cgproc: {}: {err}", proc.pid());
				failed = true;
			}
		}
	}

	if args.json {
		match serde_json::to_string_pretty(&reports) {
			Ok(json) => println!("{json}"),
			Err(err) => {
				eprintln!("cgproc: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		for report in &reports {
			for cgroup in &report.cgroups {
				println!("{}", format_line(report.pid, cgroup));
			}
		}
	}

	if failed {
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}

#[test]
fn test_cli() {
	fn cli(input: &str) -> Result<Cli, String> {
		Cli::try_parse_from(shlex::split(input).unwrap()).map_err(|e| format!("{e}"))
	}
	insta::assert_debug_snapshot!(cli("cgproc 1,2 3 --json"), @r###"
	Ok(
	    Cli {
	        pids: [
	            1,
	            2,
	            3,
	        ],
	        proc_root: None,
	        memory_root: None,
	        json: true,
	        verbose: 0,
	    },
	)
	"###);

	let args = cli("cgproc").unwrap();
	assert!(args.pids.is_empty());
	assert!(!args.json);
	assert_eq!(args.procs(), [Proc::current()]);

	let args = cli("cgproc -vv --proc-root /host/proc --memory-root=/mnt/memory 42").unwrap();
	assert_eq!(args.verbose, 2);
	assert_eq!(args.procs(), [Proc::new(42)]);
	let mounts = args.mounts();
	assert_eq!(mounts.proc_root(), std::path::Path::new("/host/proc"));
	assert_eq!(mounts.memory_root(), std::path::Path::new("/mnt/memory"));

	assert!(cli("cgproc pid").is_err());
	assert!(cli("cgproc -1").is_err());
	assert!(cli("cgproc --proc-root").is_err());
	assert!(cli("cgproc --bogus").is_err());
}

#[test]
fn test_format_line() {
	let cgroup = Cgroup {
		hierarchy_id: 4,
		controllers: vec!["memory".to_string()],
		path: "/docker/abc".to_string(),
		memory_limit: 536870912,
	};
	assert_eq!(format_line(42, &cgroup), "42\t4\tmemory\t/docker/abc\t536870912");
}

#[test]
fn test_json_report() {
	let report = Report {
		pid: 42,
		cgroups: vec![Cgroup {
			hierarchy_id: 4,
			controllers: vec!["memory".to_string()],
			path: "/".to_string(),
			memory_limit: 0,
		}],
	};
	assert_eq!(
		serde_json::to_string(&report).unwrap(),
		r#"{"pid":42,"cgroups":[{"hierarchy_id":4,"controllers":["memory"],"path":"/","memory_limit":0}]}"#
	);
}
