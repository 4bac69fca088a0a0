//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Create a fresh, empty directory under `<target>/test-scratch` for one test.
///
/// Each call yields a distinct directory, so tests running in parallel never
/// share a group policy root.
pub fn scratch_dir(label: &str) -> PathBuf {
	let seq = SCRATCH_SEQ.fetch_add(1, Ordering::Relaxed);
	let dir = target_dir()
		.join("test-scratch")
		.join(format!("{label}-{}-{seq}", std::process::id()));
	if dir.exists() {
		fs::remove_dir_all(&dir).expect("stale scratch dir is removable");
	}
	fs::create_dir_all(&dir).expect("scratch dir is creatable");
	dir
}
