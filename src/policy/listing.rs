use crate::policy::{RegistryTree, StoredEntry, ValueKind, bytes_to_hex};

/// One listed value in structured form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListingRecord {
	/// Key path.
	pub key: String,
	/// Value name.
	pub name: String,
	/// Raw kind code.
	pub kind: u32,
	/// Registry constant name, when the kind is known.
	pub kind_name: Option<&'static str>,
	/// Encoded byte length.
	pub length: usize,
	/// Encoded bytes as dash-separated hex.
	pub data: String,
}

/// Render one value as `[Key;Name;Kind;Length;HEX]`.
pub fn render_listing_line(entry: &StoredEntry<'_>) -> String {
	format!(
		"[{};{};{};{};{}]",
		entry.key,
		entry.value_name,
		entry.value.kind_code,
		entry.value.data.len(),
		bytes_to_hex(&entry.value.data)
	)
}

/// Render every stored value, one line each.
pub fn render_listing(tree: &RegistryTree) -> Vec<String> {
	tree.entries().map(|entry| render_listing_line(&entry)).collect()
}

/// Structured form of [`render_listing`].
pub fn listing_records(tree: &RegistryTree) -> Vec<ListingRecord> {
	tree.entries()
		.map(|entry| ListingRecord {
			key: entry.key.to_owned(),
			name: entry.value_name.to_owned(),
			kind: entry.value.kind_code,
			kind_name: ValueKind::from_code(entry.value.kind_code).map(ValueKind::reg_name),
			length: entry.value.data.len(),
			data: bytes_to_hex(&entry.value.data),
		})
		.collect()
}

#[cfg(test)]
mod tests;
