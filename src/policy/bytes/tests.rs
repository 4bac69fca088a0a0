use crate::policy::PolicyError;
use crate::policy::bytes::PolReader;

#[test]
fn reads_units_and_cstrings() {
	let bytes = [b'A', 0, b'B', 0, 0, 0, 0x01, 0x02, 0x03, 0x04];
	let mut reader = PolReader::new(&bytes);

	assert_eq!(reader.utf16_cstring().expect("cstring reads"), vec![0x41, 0x42]);
	assert_eq!(reader.offset(), 6);
	assert_eq!(reader.u32_le().expect("u32 reads"), 0x0403_0201);
	assert!(reader.is_exhausted());
}

#[test]
fn short_read_reports_offset_and_remaining() {
	let mut reader = PolReader::new(&[1, 2, 3]);
	reader.unit().expect("first unit reads");

	let err = reader.u32_le().expect_err("only one byte left");
	assert!(matches!(err, PolicyError::PolUnexpectedEof { at: 2, need: 4, rem: 1 }), "got {err}");
}

#[test]
fn unterminated_cstring_is_eof() {
	let mut reader = PolReader::new(&[b'x', 0, b'y']);
	assert!(matches!(reader.utf16_cstring(), Err(PolicyError::PolUnexpectedEof { .. })));
}
