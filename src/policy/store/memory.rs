use crate::policy::{PolicyStore, RegistryTree, Result, StoredValue, TypedValue};

/// In-memory policy store.
///
/// Used for dry runs over a loaded policy file and in tests; `save` only
/// counts commits.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tree: RegistryTree,
	saves: usize,
}

impl MemoryStore {
	/// Create an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wrap an existing tree.
	pub fn from_tree(tree: RegistryTree) -> Self {
		Self { tree, saves: 0 }
	}

	/// Current contents.
	pub fn tree(&self) -> &RegistryTree {
		&self.tree
	}

	/// Number of successful `save` calls.
	pub fn save_count(&self) -> usize {
		self.saves
	}
}

impl PolicyStore for MemoryStore {
	fn set_value(&mut self, key: &str, value_name: &str, value: &TypedValue) -> Result<()> {
		self.tree.set(key, value_name, StoredValue::from_typed(value))
	}

	fn delete_value(&mut self, key: &str, value_name: &str) -> Result<bool> {
		self.tree.delete(key, value_name)
	}

	fn save(&mut self) -> Result<()> {
		self.saves += 1;
		Ok(())
	}
}
