use nalgebra::Matrix4;

/// Number of values in one label row: class id, an unused slot, a row-major
/// 4x4 transform and a uniform scale.
pub const LABEL_WIDTH: usize = 19;

const CLASS_INDEX: usize = 0;
const TRANSFORM_START: usize = 2;
const TRANSFORM_END: usize = 18;
const SCALE_INDEX: usize = 18;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelRecord {
	pub class_id: f64,
	pub transform: Matrix4<f64>,
	pub scale: f64,
}

impl LabelRecord {
	/// Builds a record from one label row. Rows wider than [`LABEL_WIDTH`]
	/// keep only their leading values; the caller checks the width.
	pub fn from_row(row: &[f64]) -> LabelRecord {
		LabelRecord {
			class_id: row[CLASS_INDEX],
			transform: Matrix4::from_row_slice(&row[TRANSFORM_START..TRANSFORM_END]),
			scale: row[SCALE_INDEX],
		}
	}

	/// Integer label as the viewer sees it. Truncates toward zero.
	pub fn label(&self) -> i64 {
		self.class_id as i64
	}
}
