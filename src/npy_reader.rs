//! Reader for NumPy `.npy` arrays.
//!
//! Only what point clouds and label sets need: numeric dtypes, any number of
//! dimensions, C or Fortran order. Everything is widened to `f64`.

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::model::label::{LabelRecord, LABEL_WIDTH};
use crate::model::vector3::Vector3;

const MAGIC: &[u8] = b"\x93NUMPY";

#[derive(Debug, Clone, PartialEq)]
pub struct NpyArray {
	pub shape: Vec<usize>,
	/// Row-major values.
	pub data: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DType {
	F32,
	F64,
	I32,
	I64,
}

impl DType {
	fn size(&self) -> usize {
		match self {
			DType::F32 | DType::I32 => 4,
			DType::F64 | DType::I64 => 8,
		}
	}
}

#[derive(Debug)]
struct Header {
	dtype: DType,
	big_endian: bool,
	fortran_order: bool,
	shape: Vec<usize>,
}

pub fn read_array(path: &Path) -> Result<NpyArray> {
	let buffer = fs::read(path).map_err(|e| ConvertError::io(path, e))?;
	from_npy(&buffer).map_err(|msg| ConvertError::npy(path, msg))
}

/// Loads an `(N, 3)` array as a point cloud. An empty 1-D array is an empty cloud.
pub fn read_points(path: &Path) -> Result<Vec<Vector3>> {
	let array = read_array(path)?;
	match array.shape.as_slice() {
		[_, 3] => Ok(array.data.chunks(3).map(Vector3::from_row).collect()),
		[0] => Ok(Vec::new()),
		_ => Err(ConvertError::Shape {
			path: path.to_path_buf(),
			expected: "(N, 3)".to_string(),
			found: array.shape,
		}),
	}
}

/// Loads an `(M, 19)` label array, one record per row.
pub fn read_labels(path: &Path) -> Result<Vec<LabelRecord>> {
	let array = read_array(path)?;
	let width = match array.shape.as_slice() {
		[0] | [0, _] => return Ok(Vec::new()),
		[_, width] if *width >= LABEL_WIDTH => *width,
		[width] if *width >= LABEL_WIDTH => *width,
		_ => {
			return Err(ConvertError::Shape {
				path: path.to_path_buf(),
				expected: format!("(M, {})", LABEL_WIDTH),
				found: array.shape,
			})
		}
	};
	Ok(array.data.chunks(width).map(LabelRecord::from_row).collect())
}

pub fn from_npy(buf: &[u8]) -> std::result::Result<NpyArray, String> {
	if buf.len() < 10 || &buf[..6] != MAGIC {
		return Err("missing NPY magic string".to_string());
	}
	let major = buf[6];
	let mut cursor = Cursor::new(&buf[8..]);
	let header_len = match major {
		1 => cursor.read_u16::<LittleEndian>().map_err(|e| e.to_string())? as usize,
		2 | 3 => cursor.read_u32::<LittleEndian>().map_err(|e| e.to_string())? as usize,
		_ => return Err(format!("unsupported NPY version {}.{}", major, buf[7])),
	};
	let header_start = 8 + cursor.position() as usize;
	let data_start = header_start + header_len;
	if buf.len() < data_start {
		return Err("truncated header".to_string());
	}
	let text = std::str::from_utf8(&buf[header_start..data_start])
		.map_err(|_| "header is not valid text".to_string())?;
	let header = parse_header(text)?;

	let count = header
		.shape
		.iter()
		.try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
		.ok_or_else(|| format!("shape {:?} too large", header.shape))?;
	let byte_len = count
		.checked_mul(header.dtype.size())
		.ok_or_else(|| format!("shape {:?} too large", header.shape))?;
	let payload = &buf[data_start..];
	if payload.len() < byte_len {
		return Err(format!(
			"expected {} values for shape {:?}, found {} bytes",
			count,
			header.shape,
			payload.len()
		));
	}

	let values = if header.big_endian {
		read_values::<BigEndian>(payload, header.dtype, count)
	} else {
		read_values::<LittleEndian>(payload, header.dtype, count)
	}
	.map_err(|e| e.to_string())?;

	let data = if header.fortran_order && header.shape.len() > 1 {
		to_row_major(&values, &header.shape)
	} else {
		values
	};

	Ok(NpyArray {
		shape: header.shape,
		data,
	})
}

fn read_values<B: ByteOrder>(payload: &[u8], dtype: DType, count: usize) -> std::io::Result<Vec<f64>> {
	let mut rdr = Cursor::new(payload);
	let mut values = Vec::with_capacity(count);
	for _ in 0..count {
		let value = match dtype {
			DType::F32 => rdr.read_f32::<B>()? as f64,
			DType::F64 => rdr.read_f64::<B>()?,
			DType::I32 => rdr.read_i32::<B>()? as f64,
			DType::I64 => rdr.read_i64::<B>()? as f64,
		};
		values.push(value);
	}
	Ok(values)
}

fn to_row_major(values: &[f64], shape: &[usize]) -> Vec<f64> {
	let mut data = Vec::with_capacity(values.len());
	let mut index = vec![0; shape.len()];
	for _ in 0..values.len() {
		// column-major offset of the current row-major index
		let mut offset = 0;
		let mut stride = 1;
		for (i, dim) in index.iter().zip(shape) {
			offset += i * stride;
			stride *= dim;
		}
		data.push(values[offset]);

		for axis in (0..shape.len()).rev() {
			index[axis] += 1;
			if index[axis] < shape[axis] {
				break;
			}
			index[axis] = 0;
		}
	}
	data
}

fn parse_header(text: &str) -> std::result::Result<Header, String> {
	let descr = header_value(text, "descr")?;
	let descr = descr
		.strip_prefix(|c: char| c == '\'' || c == '"')
		.and_then(|rest| rest.split(|c: char| c == '\'' || c == '"').next())
		.ok_or_else(|| "malformed descr".to_string())?;
	let (big_endian, code) = match descr.chars().next() {
		Some('>') => (true, &descr[1..]),
		Some('<' | '=' | '|') => (false, &descr[1..]),
		_ => (false, descr),
	};
	let dtype = match code {
		"f4" => DType::F32,
		"f8" => DType::F64,
		"i4" => DType::I32,
		"i8" => DType::I64,
		other => return Err(format!("unsupported dtype '{}'", other)),
	};

	let fortran_order = header_value(text, "fortran_order")?.starts_with("True");

	let shape = header_value(text, "shape")?;
	let shape = shape
		.strip_prefix('(')
		.and_then(|rest| rest.split(')').next())
		.ok_or_else(|| "malformed shape".to_string())?;
	let shape = shape
		.split(',')
		.map(str::trim)
		.filter(|dim| !dim.is_empty())
		.map(|dim| dim.trim_end_matches('L').parse::<usize>())
		.collect::<std::result::Result<Vec<usize>, _>>()
		.map_err(|e| format!("malformed shape: {}", e))?;

	Ok(Header {
		dtype,
		big_endian,
		fortran_order,
		shape,
	})
}

/// Text following `'key':` in the header dict, leading whitespace removed.
fn header_value<'a>(text: &'a str, key: &str) -> std::result::Result<&'a str, String> {
	for quote in ['\'', '"'] {
		let needle = format!("{q}{key}{q}", q = quote, key = key);
		if let Some(start) = text.find(&needle) {
			let rest = text[start + needle.len()..].trim_start();
			if let Some(value) = rest.strip_prefix(':') {
				return Ok(value.trim_start());
			}
		}
	}
	Err(format!("header has no '{}' entry", key))
}
