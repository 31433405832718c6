//! Fixture helpers shared by the unit tests.

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::Path;

use crate::model::label::LABEL_WIDTH;

/// Builds an NPY buffer around an already encoded payload.
pub fn encode_npy(major: u8, descr: &str, fortran_order: bool, shape: &[usize], payload: &[u8]) -> Vec<u8> {
	let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
	let shape = match dims.len() {
		1 => format!("({},)", dims[0]),
		_ => format!("({})", dims.join(", ")),
	};
	let order = if fortran_order { "True" } else { "False" };
	let mut header = format!(
		"{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
		descr, order, shape
	);
	let prefix = if major == 1 { 10 } else { 12 };
	while (prefix + header.len() + 1) % 64 != 0 {
		header.push(' ');
	}
	header.push('\n');

	let mut buf = b"\x93NUMPY".to_vec();
	buf.push(major);
	buf.push(0);
	if major == 1 {
		buf.write_u16::<LittleEndian>(header.len() as u16).unwrap();
	} else {
		buf.write_u32::<LittleEndian>(header.len() as u32).unwrap();
	}
	buf.extend_from_slice(header.as_bytes());
	buf.extend_from_slice(payload);
	buf
}

/// Writes a little-endian float64 array the way `np.save` does.
pub fn write_npy(path: &Path, shape: &[usize], data: &[f64]) -> std::io::Result<()> {
	let mut payload = Vec::with_capacity(data.len() * 8);
	for value in data {
		payload.write_f64::<LittleEndian>(*value)?;
	}
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, encode_npy(1, "<f8", false, shape, &payload))
}

/// One label row: class id, row-major transform, scale.
pub fn label_row(class_id: f64, transform: [f64; 16], scale: f64) -> Vec<f64> {
	let mut row = vec![0.0; LABEL_WIDTH];
	row[0] = class_id;
	row[2..18].copy_from_slice(&transform);
	row[18] = scale;
	row
}

pub const IDENTITY: [f64; 16] = [
	1.0, 0.0, 0.0, 0.0, //
	0.0, 1.0, 0.0, 0.0, //
	0.0, 0.0, 1.0, 0.0, //
	0.0, 0.0, 0.0, 1.0,
];

pub fn write_labels(path: &Path, rows: &[Vec<f64>]) -> std::io::Result<()> {
	let data: Vec<f64> = rows.iter().flatten().copied().collect();
	write_npy(path, &[rows.len(), LABEL_WIDTH], &data)
}
