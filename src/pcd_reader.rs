use pcd_rs::{anyhow, DynReader, DynRecord};

use crate::model::vector3::Vector3;

pub fn from_pcd(buf: &[u8]) -> anyhow::Result<Vec<Vector3>> {
	let reader = DynReader::from_bytes(buf)?;
	let pcd: Result<Vec<DynRecord>, anyhow::Error> = reader.collect();

	let mut points: Vec<Vector3> = Vec::new();
	for point in pcd?.into_iter() {
		let [x, y, z] = point
			.xyz::<f64>()
			.ok_or_else(|| anyhow::anyhow!("record has no x, y, z fields"))?;
		points.push(Vector3 { x, y, z });
	}

	Ok(points)
}
