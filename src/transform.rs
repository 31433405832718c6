use nalgebra::Matrix4xX;

use crate::model::label::LabelRecord;
use crate::model::vector3::Vector3;

/// Moves a cloud into the pose stored in its label: each point is taken as
/// the homogeneous column `(x, y, z, 1)`, multiplied by the label transform,
/// cut back to `(x, y, z)` and scaled. The `w` row is dropped, not divided by.
pub fn apply_label(points: &[Vector3], record: &LabelRecord) -> Vec<Vector3> {
	let homogeneous = Matrix4xX::from_fn(points.len(), |row, col| match row {
		0 => points[col].x,
		1 => points[col].y,
		2 => points[col].z,
		_ => 1.0,
	});

	let moved = record.transform * homogeneous;

	moved
		.column_iter()
		.map(|column| Vector3::new(column[0], column[1], column[2]) * record.scale)
		.collect()
}
