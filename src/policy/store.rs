use crate::policy::{Result, TypedValue};

mod file;
mod memory;
mod tree;

pub use file::{Access, POL_FILE_NAME, PolFileStore, Section};
pub use memory::MemoryStore;
pub use tree::{RegistryTree, StoredEntry, StoredValue};

/// Write capability a batch needs from a policy store.
///
/// Calls are synchronous and may block on IO. Implementations decide what
/// `save` persists; nothing written before a failed batch is rolled back.
pub trait PolicyStore {
	/// Create or overwrite `value_name` under `key`, creating the key if needed.
	fn set_value(&mut self, key: &str, value_name: &str, value: &TypedValue) -> Result<()>;

	/// Remove `value_name` under `key`.
	///
	/// Returns `false` when the key or value was already absent; that is not
	/// an error.
	fn delete_value(&mut self, key: &str, value_name: &str) -> Result<bool>;

	/// Commit pending changes.
	fn save(&mut self) -> Result<()>;
}
