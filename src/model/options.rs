use std::path::PathBuf;

pub const DEFAULT_OUT_DIR: &str = "./data/js";
pub const DEFAULT_VARIABLE: &str = "data";

#[derive(Debug, Clone)]
pub struct Options {
	pub out_dir: PathBuf,
	pub variable: String,
	pub format: Format,
	/// Fail instead of emitting untransformed points when no label file is given.
	pub require_labels: bool,
}

impl Default for Options {
	fn default() -> Options {
		Options {
			out_dir: PathBuf::from(DEFAULT_OUT_DIR),
			variable: DEFAULT_VARIABLE.to_string(),
			format: Format::default(),
			require_labels: false,
		}
	}
}

impl Options {
	/// Name of the artifact written for one group of clouds.
	pub fn output_file_name(&self) -> String {
		format!("output.{}", self.format.extension())
	}
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
	/// `var <name> = {...};`, loadable through a `<script>` tag
	#[default]
	Js,
	/// Plain JSON document
	Json,
}

impl Format {
	pub fn extension(&self) -> &'static str {
		match self {
			Format::Js => "js",
			Format::Json => "json",
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::model::options::{Format, Options};
	use std::path::Path;

	#[test]
	fn defaults_match_cli_defaults() {
		let options = Options::default();
		assert_eq!(options.out_dir, Path::new("./data/js"));
		assert_eq!(options.variable, "data");
		assert_eq!(options.format, Format::Js);
		assert!(!options.require_labels);
		assert_eq!(options.output_file_name(), "output.js");
	}

	#[test]
	fn json_format_changes_file_name() {
		let options = Options {
			format: Format::Json,
			..Options::default()
		};
		assert_eq!(options.output_file_name(), "output.json");
	}
}
