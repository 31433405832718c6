use csv::Reader;
use serde::Deserialize;

use crate::model::vector3::Vector3;

#[derive(Debug, Deserialize)]
struct Point {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

/// Reads a headered CSV with `x`, `y` and `z` columns. Other columns
/// (intensity, color) are ignored.
pub fn from_csv(buf: &[u8]) -> Result<Vec<Vector3>, csv::Error> {
	let mut rdr = Reader::from_reader(buf);
	let mut points: Vec<Vector3> = Vec::new();
	for result in rdr.deserialize() {
		let record: Point = result?;

		let Point { x, y, z } = record;
		points.push(Vector3 { x, y, z });
	}

	Ok(points)
}

#[cfg(test)]
mod tests {

	use crate::csv_reader;
	use std::fs;

	#[test]
	fn test_read_csv() -> Result<(), Box<dyn std::error::Error>> {
		let buffer = fs::read("resources/points_integer_intensity.csv")?;
		let points = csv_reader::from_csv(&buffer)?;

		assert_eq!(points.len(), 10);
		assert_eq!(points[0].to_array(), [1.0, 2.0, 3.0]);

		Ok(())
	}

	#[test]
	fn test_read_csv_intensity() -> Result<(), Box<dyn std::error::Error>> {
		let buffer = fs::read("resources/points_intensity.csv")?;
		let points = csv_reader::from_csv(&buffer)?;

		assert_eq!(points.len(), 10);

		Ok(())
	}

	#[test]
	fn test_read_csv_missing_column() {
		let buffer = b"x,y\n1,2\n";
		assert!(csv_reader::from_csv(buffer).is_err());
	}
}
