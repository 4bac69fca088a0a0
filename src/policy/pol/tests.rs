use super::{POL_SIGNATURE, POL_VERSION, data_size};
use crate::policy::{ErrorCategory, PolEntry, PolicyError, decode_pol, encode_pol};

fn utf16(text: &str) -> Vec<u8> {
	text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn header() -> Vec<u8> {
	let mut bytes = POL_SIGNATURE.to_vec();
	bytes.extend_from_slice(&POL_VERSION.to_le_bytes());
	bytes
}

fn dword_entry_bytes() -> Vec<u8> {
	let mut bytes = header();
	bytes.extend(utf16("["));
	bytes.extend(utf16("Software\\Policies\\Test\0"));
	bytes.extend(utf16(";"));
	bytes.extend(utf16("Enabled\0"));
	bytes.extend(utf16(";"));
	bytes.extend_from_slice(&4_u32.to_le_bytes());
	bytes.extend(utf16(";"));
	bytes.extend_from_slice(&4_u32.to_le_bytes());
	bytes.extend(utf16(";"));
	bytes.extend_from_slice(&1_i32.to_le_bytes());
	bytes.extend(utf16("]"));
	bytes
}

#[test]
fn decodes_hand_built_entry() {
	let entries = decode_pol(&dword_entry_bytes()).expect("pol decodes");
	assert_eq!(
		entries,
		vec![PolEntry {
			key: "Software\\Policies\\Test".to_owned(),
			value_name: "Enabled".to_owned(),
			kind_code: 4,
			data: vec![1, 0, 0, 0],
		}]
	);
}

#[test]
fn encoder_matches_reference_layout() {
	let entry = PolEntry {
		key: "Software\\Policies\\Test".to_owned(),
		value_name: "Enabled".to_owned(),
		kind_code: 4,
		data: vec![1, 0, 0, 0],
	};
	assert_eq!(encode_pol([&entry]).expect("entry encodes"), dword_entry_bytes());
}

#[test]
fn empty_input_and_header_only_have_no_entries() {
	assert!(decode_pol(&[]).expect("empty file decodes").is_empty());
	assert!(decode_pol(&header()).expect("header-only file decodes").is_empty());
	assert_eq!(encode_pol([]).expect("empty file encodes"), header());
}

#[test]
fn preserves_unknown_kinds_and_data_containing_delimiters() {
	let entries = vec![
		PolEntry {
			key: "Software\\A".to_owned(),
			value_name: String::new(),
			kind_code: 5,
			data: utf16("];[;"),
		},
		PolEntry {
			key: "Software\\B".to_owned(),
			value_name: "**del.Old".to_owned(),
			kind_code: 1,
			data: utf16(" \0"),
		},
	];
	let bytes = encode_pol(&entries).expect("entries encode");
	assert_eq!(decode_pol(&bytes).expect("encoded file decodes"), entries);
}

#[test]
fn rejects_bad_signature() {
	let err = decode_pol(b"REGEDIT4").expect_err("wrong signature should fail");
	assert!(matches!(err, PolicyError::PolBadSignature { signature } if signature == *b"REGE"));
	assert_eq!(err.category(), ErrorCategory::Store);

	let err = decode_pol(b"PR").expect_err("short file should fail");
	assert!(matches!(err, PolicyError::PolBadSignature { .. }));
}

#[test]
fn rejects_unsupported_version() {
	let mut bytes = POL_SIGNATURE.to_vec();
	bytes.extend_from_slice(&2_u32.to_le_bytes());
	let err = decode_pol(&bytes).expect_err("version 2 should fail");
	assert!(matches!(err, PolicyError::PolUnsupportedVersion { version: 2 }));
}

#[test]
fn rejects_truncated_entry() {
	let bytes = dword_entry_bytes();
	let err = decode_pol(&bytes[..bytes.len() - 3]).expect_err("truncated file should fail");
	assert!(matches!(err, PolicyError::PolUnexpectedEof { .. }));
}

#[test]
fn rejects_missing_delimiter() {
	let mut bytes = dword_entry_bytes();
	let last = bytes.len() - 2;
	bytes[last] = b')';
	let err = decode_pol(&bytes).expect_err("bad close delimiter should fail");
	assert!(matches!(err, PolicyError::PolMalformed { reason: "expected ']'", .. }));

	let mut bytes = header();
	bytes.extend(utf16("{"));
	let err = decode_pol(&bytes).expect_err("bad open delimiter should fail");
	assert!(matches!(err, PolicyError::PolMalformed { at: 8, .. }));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn data_larger_than_size_field_is_rejected() {
	let entry = PolEntry {
		key: "Software\\Policies\\Test".to_owned(),
		value_name: "Blob".to_owned(),
		kind_code: 3,
		data: Vec::new(),
	};
	assert_eq!(data_size(&entry, u32::MAX as usize).expect("u32 max fits"), u32::MAX);

	let len = u32::MAX as usize + 1;
	let err = data_size(&entry, len).expect_err("oversized data should fail");
	assert_eq!(err.category(), ErrorCategory::Store);
	assert!(matches!(&err, PolicyError::PolValueTooLarge { value_name, len: reported, .. } if value_name == "Blob" && *reported == len));
}
