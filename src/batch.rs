use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::converter::convert;
use crate::error::{ConvertError, Result};
use crate::model::options::Options;

pub const LABEL_FILE_NAME: &str = "labels.npy";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
	pub converted: usize,
	pub skipped: usize,
}

/// Converts a whole tree laid out as `raw_dir/<drive>/<cloud>/*.npy` with
/// labels at `label_dir/<drive>/<cloud>/labels.npy`. Drives and clouds are
/// matched by directory name and visited in sorted order. Clouds without a
/// label file are skipped. The first failing conversion stops the batch.
pub fn convert_tree(raw_dir: &Path, label_dir: &Path, options: &Options) -> Result<BatchSummary> {
	let mut summary = BatchSummary::default();

	for drive in sorted_subdirectories(raw_dir)? {
		let drive_dir = raw_dir.join(&drive);
		for cloud in sorted_subdirectories(&drive_dir)? {
			let label_path = label_dir.join(&drive).join(&cloud).join(LABEL_FILE_NAME);
			if !label_path.is_file() {
				debug!("Skipping {}: no {}", drive_dir.join(&cloud).display(), label_path.display());
				summary.skipped += 1;
				continue;
			}

			let raw_glob = glob_for(&drive_dir.join(&cloud));
			let out_path = options
				.out_dir
				.join(&drive)
				.join(&cloud)
				.join(options.output_file_name());
			convert(&raw_glob, Some(&label_path), &out_path, options)?;
			summary.converted += 1;
		}
	}

	info!(
		"Converted {} cloud groups, skipped {} without labels",
		summary.converted, summary.skipped
	);
	Ok(summary)
}

/// `<dir>/*.npy`, with glob metacharacters in `dir` escaped.
fn glob_for(dir: &Path) -> String {
	let escaped = glob::Pattern::escape(&dir.to_string_lossy());
	format!("{}/*.npy", escaped)
}

fn sorted_subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))?;

	let mut names = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
		if entry.path().is_dir() {
			names.push(PathBuf::from(entry.file_name()));
		}
	}
	names.sort();

	Ok(names)
}
