use crate::policy::{ListingRecord, RegistryTree, StoredValue, TypedValue, listing_records, render_listing};

const AU_KEY: &str = "SOFTWARE\\Policies\\Microsoft\\Windows\\WindowsUpdate\\AU";

fn sample_tree() -> RegistryTree {
	let mut tree = RegistryTree::new();
	tree.set(AU_KEY, "AlwaysAutoRebootAtScheduledTime", StoredValue::from_typed(&TypedValue::DWord(1)))
		.expect("set succeeds");
	tree.set(AU_KEY, "Note", StoredValue::from_typed(&TypedValue::String("Hi".to_owned())))
		.expect("set succeeds");
	tree.set("Software\\Legacy", "Link", StoredValue { kind_code: 6, data: Vec::new() })
		.expect("set succeeds");
	tree
}

#[test]
fn lines_follow_bracketed_format() {
	assert_eq!(
		render_listing(&sample_tree()),
		vec![
			"[Software\\Legacy;Link;6;0;]".to_owned(),
			format!("[{AU_KEY};AlwaysAutoRebootAtScheduledTime;4;4;01-00-00-00]"),
			format!("[{AU_KEY};Note;1;4;48-00-69-00]"),
		]
	);
}

#[test]
fn records_name_known_kinds_only() {
	let records = listing_records(&sample_tree());
	assert_eq!(records.len(), 3);
	assert_eq!(records[0].kind_name, None);
	assert_eq!(
		records[1],
		ListingRecord {
			key: AU_KEY.to_owned(),
			name: "AlwaysAutoRebootAtScheduledTime".to_owned(),
			kind: 4,
			kind_name: Some("REG_DWORD"),
			length: 4,
			data: "01-00-00-00".to_owned(),
		}
	);
}

#[test]
fn empty_tree_lists_nothing() {
	assert!(render_listing(&RegistryTree::new()).is_empty());
}
