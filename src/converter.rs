use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::model::options::Options;
use crate::model::output::{ConversionOutput, ObjectRecord};
use crate::npy_reader;
use crate::reader::{object_name, read_cloud};
use crate::transform::apply_label;
use crate::writer::write_output;

/// Converts every cloud matched by `raw_glob` into one artifact at `out_path`.
///
/// With a label file, record `i` of the labels belongs to the `i`-th matched
/// file in sorted path order: its transform and scale are applied to the
/// points and its class id becomes the object's `label`. Without one, points
/// are written as loaded.
///
/// An empty match is not an error; an artifact with no objects is written.
pub fn convert(
	raw_glob: &str,
	label_path: Option<&Path>,
	out_path: &Path,
	options: &Options,
) -> Result<ConversionOutput> {
	if label_path.is_none() && options.require_labels {
		return Err(ConvertError::MissingLabels {
			pattern: raw_glob.to_string(),
		});
	}

	let paths = matching_files(raw_glob)?;
	if paths.is_empty() {
		info!("No files found at {}", raw_glob);
	}

	let labels = match label_path {
		Some(label_path) => {
			let labels = npy_reader::read_labels(label_path)?;
			// an empty match writes an empty artifact whatever the label count
			if !paths.is_empty() && labels.len() != paths.len() {
				return Err(ConvertError::LabelCountMismatch {
					path: label_path.to_path_buf(),
					records: labels.len(),
					clouds: paths.len(),
				});
			}
			Some(labels)
		}
		None => None,
	};

	let mut output = ConversionOutput::new();
	for (i, path) in paths.iter().enumerate() {
		let points = read_cloud(path)?;
		debug!("Loaded {} points from {}", points.len(), path.display());

		let record = match &labels {
			Some(labels) => ObjectRecord {
				vertices: apply_label(&points, &labels[i]),
				label: Some(labels[i].label()),
			},
			None => ObjectRecord {
				vertices: points,
				label: None,
			},
		};

		let name = object_name(path);
		if !output.insert(name.clone(), record) {
			return Err(ConvertError::DuplicateObject {
				name,
				path: path.clone(),
			});
		}
	}

	write_output(&output, out_path, options)?;
	info!(
		"Finished processing timestep (saved to {})",
		out_path.display()
	);

	Ok(output)
}

/// Files matched by `pattern`, sorted by path. Directories are skipped.
pub fn matching_files(pattern: &str) -> Result<Vec<PathBuf>> {
	let entries = glob::glob(pattern).map_err(|source| ConvertError::Pattern {
		pattern: pattern.to_string(),
		source,
	})?;

	let mut paths = Vec::new();
	for entry in entries {
		let path = entry?;
		if path.is_file() {
			paths.push(path);
		}
	}
	paths.sort();

	Ok(paths)
}
