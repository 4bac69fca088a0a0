use std::collections::BTreeMap;

use crate::policy::{PolEntry, PolicyError, Result, TypedValue, ValueKind, bytes_to_typed, typed_to_bytes};

const KEY_SEPARATOR: char = '\\';
const MAX_KEY_SEGMENT_CHARS: usize = 255;
const MAX_VALUE_NAME_CHARS: usize = 16_383;

/// Encoded value as the store holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
	/// Raw registry kind code.
	pub kind_code: u32,
	/// Encoded value bytes.
	pub data: Vec<u8>,
}

impl StoredValue {
	/// Encode a typed value.
	pub fn from_typed(value: &TypedValue) -> Self {
		Self {
			kind_code: value.kind().code(),
			data: typed_to_bytes(value),
		}
	}

	/// Kind for a known code.
	pub fn kind(&self) -> Option<ValueKind> {
		ValueKind::from_code(self.kind_code)
	}

	/// Decode back into a typed value.
	pub fn decode(&self) -> Result<TypedValue> {
		bytes_to_typed(&self.data, ValueKind::try_from(self.kind_code)?)
	}
}

/// Borrowed view of one stored value.
#[derive(Debug, Clone, Copy)]
pub struct StoredEntry<'a> {
	/// Key path as first spelled.
	pub key: &'a str,
	/// Value name as first spelled.
	pub value_name: &'a str,
	/// Stored value.
	pub value: &'a StoredValue,
}

#[derive(Debug, Clone)]
struct KeyNode {
	path: String,
	values: Vec<(String, StoredValue)>,
}

impl KeyNode {
	fn position(&self, value_name: &str) -> Option<usize> {
		let folded = fold(value_name);
		self.values.iter().position(|(name, _)| fold(name) == folded)
	}
}

/// Case-insensitive key/value tree shared by the store implementations.
///
/// Keys enumerate in case-folded path order; values keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct RegistryTree {
	keys: BTreeMap<String, KeyNode>,
}

impl RegistryTree {
	/// Create an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a tree from decoded `Registry.pol` entries; later duplicates win.
	pub fn from_pol_entries(entries: Vec<PolEntry>) -> Result<Self> {
		let mut tree = Self::new();
		for entry in entries {
			tree.set(
				&entry.key,
				&entry.value_name,
				StoredValue {
					kind_code: entry.kind_code,
					data: entry.data,
				},
			)?;
		}
		Ok(tree)
	}

	/// Flatten into `Registry.pol` entries in enumeration order.
	pub fn to_pol_entries(&self) -> Vec<PolEntry> {
		self.entries()
			.map(|entry| PolEntry {
				key: entry.key.to_owned(),
				value_name: entry.value_name.to_owned(),
				kind_code: entry.value.kind_code,
				data: entry.value.data.clone(),
			})
			.collect()
	}

	/// Create or overwrite a value, creating its key if needed.
	pub fn set(&mut self, key: &str, value_name: &str, value: StoredValue) -> Result<()> {
		let path = normalize_key(key)?;
		check_value_name(value_name)?;

		let node = self.keys.entry(fold(path)).or_insert_with(|| KeyNode {
			path: path.to_owned(),
			values: Vec::new(),
		});
		match node.position(value_name) {
			Some(idx) => node.values[idx].1 = value,
			None => node.values.push((value_name.to_owned(), value)),
		}
		Ok(())
	}

	/// Remove a value; returns whether anything was removed.
	///
	/// A key left without values is dropped.
	pub fn delete(&mut self, key: &str, value_name: &str) -> Result<bool> {
		let path = normalize_key(key)?;
		check_value_name(value_name)?;

		let folded = fold(path);
		let Some(node) = self.keys.get_mut(&folded) else {
			return Ok(false);
		};
		let Some(idx) = node.position(value_name) else {
			return Ok(false);
		};

		node.values.remove(idx);
		if node.values.is_empty() {
			self.keys.remove(&folded);
		}
		Ok(true)
	}

	/// Look up a value.
	pub fn get(&self, key: &str, value_name: &str) -> Option<&StoredValue> {
		let path = normalize_key(key).ok()?;
		let node = self.keys.get(&fold(path))?;
		node.position(value_name).map(|idx| &node.values[idx].1)
	}

	/// Iterate every stored value.
	pub fn entries(&self) -> impl Iterator<Item = StoredEntry<'_>> {
		self.keys.values().flat_map(|node| {
			node.values.iter().map(move |(name, value)| StoredEntry {
				key: &node.path,
				value_name: name,
				value,
			})
		})
	}

	/// Number of stored values.
	pub fn len(&self) -> usize {
		self.keys.values().map(|node| node.values.len()).sum()
	}

	/// Whether no values are stored.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}
}

fn fold(text: &str) -> String {
	text.to_lowercase()
}

fn normalize_key(path: &str) -> Result<&str> {
	let trimmed = path.trim_matches(KEY_SEPARATOR);
	if trimmed.is_empty() || trimmed.contains('\0') {
		return Err(PolicyError::InvalidKeyPath { path: path.to_owned() });
	}

	for segment in trimmed.split(KEY_SEPARATOR) {
		if segment.is_empty() {
			return Err(PolicyError::InvalidKeyPath { path: path.to_owned() });
		}
		if segment.chars().count() > MAX_KEY_SEGMENT_CHARS {
			return Err(PolicyError::NameTooLong {
				what: "key segment",
				name: segment.to_owned(),
				max: MAX_KEY_SEGMENT_CHARS,
			});
		}
	}
	Ok(trimmed)
}

fn check_value_name(name: &str) -> Result<()> {
	if name.contains('\0') {
		return Err(PolicyError::InvalidValueName { name: name.to_owned() });
	}
	if name.chars().count() > MAX_VALUE_NAME_CHARS {
		return Err(PolicyError::NameTooLong {
			what: "value name",
			name: name.to_owned(),
			max: MAX_VALUE_NAME_CHARS,
		});
	}
	Ok(())
}
