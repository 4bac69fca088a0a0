use std::fs;
use std::path::{Path, PathBuf};

use lgpoedit_testkit::scratch_dir;

use crate::config::{Config, default_gpo_root};
use crate::policy::{ApplyMode, ErrorCategory, PolicyError, Section};

#[test]
fn empty_file_yields_defaults() {
	let config = Config::from_toml("").expect("empty config parses");
	assert_eq!(config, Config::default());
	assert_eq!(config.gpo_root, default_gpo_root());
	assert_eq!(config.default_section, Section::User);
	assert_eq!(config.apply_mode, ApplyMode::Sequential);
}

#[test]
fn parses_every_field() {
	let config = Config::from_toml(
		r#"
gpo_root = "/srv/gpo"
default_section = "machine"
apply_mode = "prevalidate"
"#,
	)
	.expect("config parses");

	assert_eq!(config.gpo_root, PathBuf::from("/srv/gpo"));
	assert_eq!(config.default_section, Section::Machine);
	assert_eq!(config.apply_mode, ApplyMode::Prevalidate);
}

#[test]
fn rejects_unknown_enum_values() {
	let message = Config::from_toml("default_section = \"both\"").expect_err("unknown section fails");
	assert!(message.contains("both") || message.contains("variant"), "unexpected message: {message}");
}

#[test]
fn load_reports_path_on_failure() {
	let dir = scratch_dir("config-bad");
	let path = dir.join("lgpoedit.toml");
	fs::write(&path, "apply_mode = 3").expect("config writable");

	let err = Config::load(&path).expect_err("bad type fails");
	assert_eq!(err.category(), ErrorCategory::Config);
	let PolicyError::Config { path: reported, .. } = &err else {
		panic!("expected config error, got {err}");
	};
	assert_eq!(reported, &path.display().to_string());
}

#[test]
fn explicit_missing_path_is_an_error() {
	let err = Config::discover(Some(Path::new("/nonexistent/lgpoedit.toml"))).expect_err("missing explicit config fails");
	assert!(matches!(err, PolicyError::Config { .. }));
}

#[test]
fn config_round_trips_through_toml() {
	let config = Config {
		gpo_root: PathBuf::from("/tmp/gpo"),
		default_section: Section::Machine,
		apply_mode: ApplyMode::Prevalidate,
	};
	let text = toml::to_string_pretty(&config).expect("config serializes");
	assert_eq!(Config::from_toml(&text).expect("serialized config parses"), config);
}
