use std::fs;
use std::path::Path;

use crate::csv_reader;
use crate::error::{ConvertError, Result};
use crate::model::vector3::Vector3;
use crate::npy_reader;
use crate::pcd_reader;

/// Suffixes removed from a file name to get the object name.
const KNOWN_SUFFIXES: [&str; 4] = [".npy", ".csv", ".pcd", ".stl"];

/// Loads one point cloud, picking the format from the file extension.
/// Unknown extensions are read as NPY.
pub fn read_cloud(path: &Path) -> Result<Vec<Vector3>> {
	let extension = path
		.extension()
		.and_then(|ext| ext.to_str())
		.map(|ext| ext.to_ascii_lowercase());
	match extension.as_deref() {
		Some("csv") => {
			let buffer = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
			csv_reader::from_csv(&buffer).map_err(|source| ConvertError::Csv {
				path: path.to_path_buf(),
				source,
			})
		}
		Some("pcd") => {
			let buffer = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
			pcd_reader::from_pcd(&buffer).map_err(|e| ConvertError::Pcd {
				path: path.to_path_buf(),
				msg: e.to_string(),
			})
		}
		_ => npy_reader::read_points(path),
	}
}

/// `drive/car.stl.npy` -> `car`
pub fn object_name(path: &Path) -> String {
	let mut name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_default();
	while let Some(stripped) = KNOWN_SUFFIXES
		.iter()
		.find_map(|suffix| name.strip_suffix(suffix))
	{
		if stripped.is_empty() {
			break;
		}
		name = stripped.to_string();
	}
	name
}
