use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
	#[error("I/O error on '{path}': {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid glob pattern '{pattern}': {source}")]
	Pattern {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error("failed to expand glob: {0}")]
	Glob(#[from] glob::GlobError),

	#[error("invalid NPY file '{path}': {msg}")]
	Npy { path: PathBuf, msg: String },

	#[error("invalid CSV file '{path}': {source}")]
	Csv {
		path: PathBuf,
		#[source]
		source: csv::Error,
	},

	#[error("invalid PCD file '{path}': {msg}")]
	Pcd { path: PathBuf, msg: String },

	#[error("unexpected array shape in '{path}': expected {expected}, found {found:?}")]
	Shape {
		path: PathBuf,
		expected: String,
		found: Vec<usize>,
	},

	#[error("label file '{path}' has {records} records but {clouds} point clouds matched")]
	LabelCountMismatch {
		path: PathBuf,
		records: usize,
		clouds: usize,
	},

	#[error("object name '{name}' is produced by more than one file (second: '{path}')")]
	DuplicateObject { name: String, path: PathBuf },

	#[error("transform requested for '{pattern}' but no label file was given")]
	MissingLabels { pattern: String },

	#[error("'{0}' is not a valid JavaScript identifier")]
	InvalidVariable(String),

	#[error("JSON serialization failed: {0}")]
	Json(#[from] serde_json::Error),

	#[error("failed to move output into place at '{path}': {source}")]
	Persist {
		path: PathBuf,
		#[source]
		source: tempfile::PersistError,
	},
}

impl ConvertError {
	pub fn io(path: &Path, source: std::io::Error) -> ConvertError {
		ConvertError::Io {
			path: path.to_path_buf(),
			source,
		}
	}

	pub fn npy(path: &Path, msg: impl Into<String>) -> ConvertError {
		ConvertError::Npy {
			path: path.to_path_buf(),
			msg: msg.into(),
		}
	}
}

pub type Result<T> = std::result::Result<T, ConvertError>;
