//! Command-line interface.

use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::batch::convert_tree;
use crate::converter::convert;
use crate::model::options::{Format, Options, DEFAULT_OUT_DIR, DEFAULT_VARIABLE};

#[derive(Parser, Debug)]
#[command(name = "cloud-js-converter")]
#[command(about = "Convert .npy point clouds into a data file for the browser viewer", version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
	/// Glob of point cloud files, e.g. 'raw/drive/0000/*.npy'
	#[arg(required = true)]
	input_path: Option<String>,

	/// Label array with one 19-value record per matched file
	label_path: Option<PathBuf>,

	/// Require a label file and fail without one
	#[arg(long)]
	transform: bool,

	/// Directory for output
	#[arg(long, default_value = DEFAULT_OUT_DIR, global = true)]
	out: PathBuf,

	/// Name of the variable all data is assigned to
	#[arg(long, default_value = DEFAULT_VARIABLE, global = true)]
	variable: String,

	/// Output format
	#[arg(long, value_enum, default_value_t = Format::Js, global = true)]
	format: Format,

	/// Increase verbosity
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Convert every raw_dir/<drive>/<cloud>/ that has a label_dir/<drive>/<cloud>/labels.npy
	Dir {
		raw_dir: PathBuf,
		label_dir: PathBuf,
	},
}

#[derive(Debug, PartialEq)]
pub enum Invocation {
	Single {
		input_path: String,
		label_path: Option<PathBuf>,
	},
	Tree {
		raw_dir: PathBuf,
		label_dir: PathBuf,
	},
}

impl Cli {
	pub fn options(&self) -> Options {
		Options {
			out_dir: self.out.clone(),
			variable: self.variable.clone(),
			format: self.format,
			require_labels: self.transform,
		}
	}

	pub fn invocation(&self) -> Invocation {
		match &self.command {
			Some(Commands::Dir { raw_dir, label_dir }) => Invocation::Tree {
				raw_dir: raw_dir.clone(),
				label_dir: label_dir.clone(),
			},
			None => Invocation::Single {
				// clap enforces presence when there is no subcommand
				input_path: self.input_path.clone().unwrap_or_default(),
				label_path: self.label_path.clone(),
			},
		}
	}

	pub fn log_level(&self) -> log::LevelFilter {
		match self.verbose {
			0 => log::LevelFilter::Info,
			1 => log::LevelFilter::Debug,
			_ => log::LevelFilter::Trace,
		}
	}
}

pub fn run() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// notices are part of the tool's normal output, so they go to stdout
	env_logger::Builder::new()
		.filter_level(cli.log_level())
		.parse_default_env()
		.target(env_logger::Target::Stdout)
		.format_timestamp(None)
		.init();

	execute(&cli)
}

pub fn execute(cli: &Cli) -> anyhow::Result<()> {
	let options = cli.options();
	match cli.invocation() {
		Invocation::Single {
			input_path,
			label_path,
		} => {
			let out_path = options.out_dir.join(options.output_file_name());
			let output = convert(&input_path, label_path.as_deref(), &out_path, &options)?;
			info!("Wrote {} objects", output.len());
		}
		Invocation::Tree { raw_dir, label_dir } => {
			convert_tree(&raw_dir, &label_dir, &options)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::cli::{execute, Cli, Invocation};
	use crate::model::options::Format;
	use crate::testing::write_npy;
	use clap::{CommandFactory, Parser};
	use std::fs;
	use std::path::PathBuf;
	use tempfile::TempDir;

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn single_glob_without_labels() -> Result<(), clap::Error> {
		let cli = Cli::try_parse_from(["cloud-js-converter", "raw/*.npy"])?;

		assert_eq!(
			cli.invocation(),
			Invocation::Single {
				input_path: "raw/*.npy".to_string(),
				label_path: None
			}
		);
		let options = cli.options();
		assert_eq!(options.out_dir, PathBuf::from("./data/js"));
		assert_eq!(options.variable, "data");
		assert_eq!(options.format, Format::Js);
		assert!(!options.require_labels);
		Ok(())
	}

	#[test]
	fn single_glob_with_labels_and_options() -> Result<(), clap::Error> {
		let cli = Cli::try_parse_from([
			"cloud-js-converter",
			"raw/*.npy",
			"labels.npy",
			"--out=site/js",
			"--variable",
			"clusters",
			"--transform",
		])?;

		assert_eq!(
			cli.invocation(),
			Invocation::Single {
				input_path: "raw/*.npy".to_string(),
				label_path: Some(PathBuf::from("labels.npy"))
			}
		);
		let options = cli.options();
		assert_eq!(options.out_dir, PathBuf::from("site/js"));
		assert_eq!(options.variable, "clusters");
		assert!(options.require_labels);
		Ok(())
	}

	#[test]
	fn dir_form() -> Result<(), clap::Error> {
		let cli = Cli::try_parse_from([
			"cloud-js-converter",
			"dir",
			"raw",
			"labels",
			"--format",
			"json",
		])?;

		assert_eq!(
			cli.invocation(),
			Invocation::Tree {
				raw_dir: PathBuf::from("raw"),
				label_dir: PathBuf::from("labels")
			}
		);
		assert_eq!(cli.options().format, Format::Json);
		Ok(())
	}

	#[test]
	fn input_is_required() {
		assert!(Cli::try_parse_from(["cloud-js-converter"]).is_err());
		assert!(Cli::try_parse_from(["cloud-js-converter", "dir", "raw"]).is_err());
	}

	#[test]
	fn verbosity_raises_log_level() -> Result<(), clap::Error> {
		let cli = Cli::try_parse_from(["cloud-js-converter", "a.npy", "-vv"])?;
		assert_eq!(cli.log_level(), log::LevelFilter::Trace);
		Ok(())
	}

	#[test]
	fn execute_writes_output_js() -> Result<(), Box<dyn std::error::Error>> {
		let dir = TempDir::new()?;
		write_npy(&dir.path().join("raw").join("cloud1.npy"), &[1, 3], &[1.0, 2.0, 3.0])?;
		let pattern = dir.path().join("raw").join("*.npy");
		let out = dir.path().join("js");
		let cli = Cli::try_parse_from([
			"cloud-js-converter".to_string(),
			pattern.to_string_lossy().into_owned(),
			format!("--out={}", out.display()),
		])?;

		execute(&cli)?;

		assert_eq!(
			fs::read_to_string(out.join("output.js"))?,
			"var data = {\"cloud1\":{\"vertices\":[{\"x\":1.0,\"y\":2.0,\"z\":3.0}]}};\n"
		);
		Ok(())
	}
}
