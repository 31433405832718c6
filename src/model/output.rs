use crate::model::vector3::Vector3;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct ObjectRecord {
	pub vertices: Vec<Vector3>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<i64>,
}

/// Object name to record, in the order the objects were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOutput {
	objects: Vec<(String, ObjectRecord)>,
}

impl ConversionOutput {
	pub fn new() -> ConversionOutput {
		ConversionOutput {
			objects: Vec::new(),
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.objects.iter().any(|(key, _)| key == name)
	}

	pub fn get(&self, name: &str) -> Option<&ObjectRecord> {
		self.objects
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, record)| record)
	}

	/// Returns false without inserting if `name` is already present.
	pub fn insert(&mut self, name: String, record: ObjectRecord) -> bool {
		if self.contains(&name) {
			return false;
		}
		self.objects.push((name, record));
		true
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectRecord)> {
		self.objects.iter().map(|(name, record)| (name.as_str(), record))
	}
}

impl Serialize for ConversionOutput {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.objects.len()))?;
		for (name, record) in &self.objects {
			map.serialize_entry(name, record)?;
		}
		map.end()
	}
}
