use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::policy::{PolicyError, PolicyStore, RegistryTree, Result, StoredValue, TypedValue, decode_pol, encode_pol};

/// File name of the registry policy file inside a section directory.
pub const POL_FILE_NAME: &str = "Registry.pol";

/// Group policy section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
	/// Computer configuration.
	Machine,
	/// User configuration.
	#[default]
	User,
}

impl Section {
	/// Directory name under the group policy root.
	pub fn dir_name(self) -> &'static str {
		match self {
			Self::Machine => "Machine",
			Self::User => "User",
		}
	}

	/// Render section as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Machine => "machine",
			Self::User => "user",
		}
	}
}

/// Whether a store accepts mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
	/// Listing only; mutations and saves fail.
	ReadOnly,
	/// Mutations allowed; `save` rewrites the file.
	ReadWrite,
}

/// Policy store backed by one section's `Registry.pol` file.
///
/// The whole file is loaded on open. Mutations stay in memory until `save`,
/// which replaces the file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct PolFileStore {
	path: PathBuf,
	access: Access,
	tree: RegistryTree,
	dirty: bool,
}

impl PolFileStore {
	/// Open `<gpo_root>/<Section>/Registry.pol`.
	pub fn open(gpo_root: &Path, section: Section, access: Access) -> Result<Self> {
		Self::open_path(gpo_root.join(section.dir_name()).join(POL_FILE_NAME), access)
	}

	/// Open a policy file at an explicit path. A missing file is an empty store.
	pub fn open_path(path: impl Into<PathBuf>, access: Access) -> Result<Self> {
		let path = path.into();
		let tree = match fs::read(&path) {
			Ok(bytes) => RegistryTree::from_pol_entries(decode_pol(&bytes)?)?,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				debug!(path = %path.display(), "policy file missing, starting empty");
				RegistryTree::new()
			}
			Err(err) => return Err(err.into()),
		};

		info!(path = %path.display(), values = tree.len(), "opened policy file");
		Ok(Self {
			path,
			access,
			tree,
			dirty: false,
		})
	}

	/// Backing file path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Current contents, including unsaved changes.
	pub fn tree(&self) -> &RegistryTree {
		&self.tree
	}

	/// Detach the loaded contents.
	pub fn into_tree(self) -> RegistryTree {
		self.tree
	}

	/// Whether unsaved changes exist.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	fn ensure_writable(&self, op: &'static str) -> Result<()> {
		match self.access {
			Access::ReadWrite => Ok(()),
			Access::ReadOnly => Err(PolicyError::ReadOnlyStore { op }),
		}
	}
}

impl PolicyStore for PolFileStore {
	fn set_value(&mut self, key: &str, value_name: &str, value: &TypedValue) -> Result<()> {
		self.ensure_writable("set value")?;
		self.tree.set(key, value_name, StoredValue::from_typed(value))?;
		self.dirty = true;
		Ok(())
	}

	fn delete_value(&mut self, key: &str, value_name: &str) -> Result<bool> {
		self.ensure_writable("delete value")?;
		let removed = self.tree.delete(key, value_name)?;
		self.dirty |= removed;
		Ok(removed)
	}

	fn save(&mut self) -> Result<()> {
		self.ensure_writable("save")?;
		if !self.dirty {
			debug!(path = %self.path.display(), "no pending changes, skipping write");
			return Ok(());
		}

		let bytes = encode_pol(&self.tree.to_pol_entries())?;
		write_replacing(&self.path, &bytes)?;
		self.dirty = false;
		info!(path = %self.path.display(), values = self.tree.len(), bytes = bytes.len(), "saved policy file");
		Ok(())
	}
}

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	let tmp = path.with_extension("pol.tmp");
	fs::write(&tmp, bytes)?;
	fs::rename(&tmp, path)?;
	Ok(())
}
