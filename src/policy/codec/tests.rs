use crate::policy::{
	ErrorCategory, InputEncoding, PolicyError, TypedValue, ValueKind, bytes_to_hex, bytes_to_typed, hex_to_bytes, hex_to_typed, resolve,
	text_to_typed, typed_to_bytes,
};

#[test]
fn hex_round_trips_arbitrary_bytes() {
	let samples: [&[u8]; 4] = [&[], &[0x00], &[0x01, 0xAB, 0xFF, 0x10], &[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x7F]];
	for bytes in samples {
		let hex = bytes_to_hex(bytes);
		assert_eq!(hex_to_bytes(&hex).expect("rendered hex decodes"), bytes, "round trip of {hex:?}");
	}
}

#[test]
fn hex_renders_uppercase_dash_separated() {
	assert_eq!(bytes_to_hex(&[0x01, 0x00, 0xab]), "01-00-AB");
	assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn hex_accepts_separators_whitespace_and_lowercase() {
	assert_eq!(hex_to_bytes("  01-00-ab-FF \n").expect("hex decodes"), vec![0x01, 0x00, 0xAB, 0xFF]);
	assert_eq!(hex_to_bytes("0100abff").expect("hex decodes"), vec![0x01, 0x00, 0xAB, 0xFF]);
	assert_eq!(hex_to_bytes("").expect("empty hex decodes"), Vec::<u8>::new());
}

#[test]
fn hex_rejects_odd_length() {
	let err = hex_to_bytes("01-0").expect_err("odd length should fail");
	assert!(matches!(err, PolicyError::OddHexLength { len: 3 }));
	assert_eq!(err.category(), ErrorCategory::Codec);
}

#[test]
fn hex_rejects_non_hex_characters() {
	let err = hex_to_bytes("01-ZZ").expect_err("invalid digit should fail");
	assert!(matches!(err, PolicyError::InvalidHexDigit { ch: 'Z', at: 2 }));

	let err = hex_to_bytes("01 02").expect_err("inner whitespace should fail");
	assert!(matches!(err, PolicyError::InvalidHexDigit { ch: ' ', .. }));
}

#[test]
fn text_strings_are_taken_verbatim() {
	assert_eq!(
		text_to_typed("C:\\Temp;x", ValueKind::String).expect("string parses"),
		TypedValue::String("C:\\Temp;x".to_owned())
	);
	assert_eq!(
		text_to_typed("%SystemRoot%", ValueKind::ExpandString).expect("expand string parses"),
		TypedValue::ExpandString("%SystemRoot%".to_owned())
	);
	assert_eq!(
		text_to_typed("", ValueKind::String).expect("empty string parses"),
		TypedValue::String(String::new())
	);
}

#[test]
fn text_multi_string_splits_on_semicolon() {
	assert_eq!(
		text_to_typed("a;b;c", ValueKind::MultiString).expect("multi string parses"),
		TypedValue::MultiString(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
	);
}

#[test]
fn text_dword_negative_keeps_unsigned_bit_pattern() {
	let value = text_to_typed("-1", ValueKind::DWord).expect("negative dword parses");
	assert_eq!(value, TypedValue::DWord(-1));
	let TypedValue::DWord(number) = value else {
		panic!("expected dword");
	};
	assert_eq!(number as u32, 4_294_967_295);
}

#[test]
fn text_dword_parses_signed_only() {
	assert_eq!(text_to_typed(" 15 ", ValueKind::DWord).expect("padded dword parses"), TypedValue::DWord(15));
	assert_eq!(
		text_to_typed("2147483647", ValueKind::DWord).expect("i32 max parses"),
		TypedValue::DWord(i32::MAX)
	);
	for text in ["4294967295", "2147483648"] {
		let err = text_to_typed(text, ValueKind::DWord).expect_err("unsigned-only dword should fail");
		assert!(matches!(err, PolicyError::InvalidInteger { kind: ValueKind::DWord, .. }), "text {text:?} gave {err}");
	}
}

#[test]
fn text_dword_rejects_out_of_range_and_garbage() {
	for text in ["4294967296", "-2147483649", "abc", "1.5", ""] {
		let err = text_to_typed(text, ValueKind::DWord).expect_err("bad dword should fail");
		assert!(matches!(err, PolicyError::InvalidInteger { kind: ValueKind::DWord, .. }), "text {text:?} gave {err}");
	}
}

#[test]
fn text_qword_negative_keeps_unsigned_bit_pattern() {
	let value = text_to_typed("-1", ValueKind::QWord).expect("negative qword parses");
	let TypedValue::QWord(number) = value else {
		panic!("expected qword");
	};
	assert_eq!(number as u64, u64::MAX);
	let err = text_to_typed("18446744073709551615", ValueKind::QWord).expect_err("u64 max is out of signed range");
	assert!(matches!(err, PolicyError::InvalidInteger { kind: ValueKind::QWord, .. }));
	assert_eq!(
		text_to_typed("5000000000", ValueKind::QWord).expect("wide qword parses"),
		TypedValue::QWord(5_000_000_000)
	);
}

#[test]
fn text_binary_is_always_hex() {
	assert_eq!(
		text_to_typed("01-02-0A", ValueKind::Binary).expect("binary parses"),
		TypedValue::Binary(vec![1, 2, 10])
	);
	let err = text_to_typed("hello", ValueKind::Binary).expect_err("non-hex binary should fail");
	assert_eq!(err.category(), ErrorCategory::Codec);
}

#[test]
fn none_kind_never_reaches_codec() {
	let err = text_to_typed("", ValueKind::None).expect_err("none is unsupported");
	assert!(matches!(err, PolicyError::UnsupportedKind { code: 0 }));
	let err = bytes_to_typed(&[], ValueKind::None).expect_err("none is unsupported");
	assert_eq!(err.category(), ErrorCategory::UnsupportedKind);
}

#[test]
fn fixed_width_layouts_are_little_endian() {
	assert_eq!(typed_to_bytes(&TypedValue::DWord(1)), vec![1, 0, 0, 0]);
	assert_eq!(typed_to_bytes(&TypedValue::DWord(-1)), vec![0xFF; 4]);
	assert_eq!(typed_to_bytes(&TypedValue::QWord(0x0102)), vec![0x02, 0x01, 0, 0, 0, 0, 0, 0]);
	assert_eq!(hex_to_typed("01-00-00-00", ValueKind::DWord).expect("dword hex decodes"), TypedValue::DWord(1));
}

#[test]
fn fixed_width_decode_rejects_wrong_length() {
	let err = bytes_to_typed(&[1, 0, 0], ValueKind::DWord).expect_err("short dword should fail");
	assert!(matches!(
		err,
		PolicyError::InvalidValueLength {
			kind: ValueKind::DWord,
			expected: 4,
			actual: 3
		}
	));

	let err = bytes_to_typed(&[0; 9], ValueKind::QWord).expect_err("long qword should fail");
	assert!(matches!(err, PolicyError::InvalidValueLength { expected: 8, actual: 9, .. }));
}

#[test]
fn strings_encode_as_utf16le_without_terminator() {
	assert_eq!(typed_to_bytes(&TypedValue::String("Hi".to_owned())), vec![b'H', 0, b'i', 0]);
	assert_eq!(
		bytes_to_typed(&[b'H', 0, b'i', 0], ValueKind::String).expect("utf16 decodes"),
		TypedValue::String("Hi".to_owned())
	);
}

#[test]
fn string_decode_rejects_bad_utf16() {
	let err = bytes_to_typed(&[b'H', 0, b'i'], ValueKind::String).expect_err("odd utf16 should fail");
	assert!(matches!(err, PolicyError::OddUtf16Length { len: 3, .. }));

	let err = bytes_to_typed(&[0x00, 0xD8], ValueKind::ExpandString).expect_err("lone surrogate should fail");
	assert!(matches!(
		err,
		PolicyError::InvalidUtf16 {
			kind: ValueKind::ExpandString
		}
	));
}

#[test]
fn multi_string_terminates_each_item() {
	let value = TypedValue::MultiString(vec!["a".to_owned(), "b".to_owned()]);
	assert_eq!(typed_to_bytes(&value), vec![b'a', 0, 0, 0, b'b', 0, 0, 0]);
}

#[test]
fn multi_string_text_round_trips_through_bytes() {
	let value = text_to_typed("a;b;c", ValueKind::MultiString).expect("multi string parses");
	let bytes = typed_to_bytes(&value);
	let decoded = bytes_to_typed(&bytes, ValueKind::MultiString).expect("multi string decodes");
	assert_eq!(decoded, TypedValue::MultiString(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]));
}

#[test]
fn multi_string_decode_handles_missing_terminator_and_empty_payload() {
	assert_eq!(
		bytes_to_typed(&[b'a', 0, 0, 0, b'b', 0], ValueKind::MultiString).expect("unterminated tail decodes"),
		TypedValue::MultiString(vec!["a".to_owned(), "b".to_owned()])
	);
	assert_eq!(
		bytes_to_typed(&[], ValueKind::MultiString).expect("empty payload decodes"),
		TypedValue::MultiString(Vec::new())
	);
}

#[test]
fn typed_values_round_trip_for_every_kind() {
	let values = [
		TypedValue::String("Windows Update".to_owned()),
		TypedValue::String(String::new()),
		TypedValue::ExpandString("%ProgramFiles%\\App".to_owned()),
		TypedValue::Binary(vec![0, 1, 2, 0xFF]),
		TypedValue::Binary(Vec::new()),
		TypedValue::DWord(i32::MIN),
		TypedValue::DWord(15),
		TypedValue::MultiString(vec!["x".to_owned(), String::new(), "ünïcode".to_owned()]),
		TypedValue::MultiString(vec![String::new()]),
		TypedValue::MultiString(Vec::new()),
		TypedValue::QWord(i64::MAX),
	];

	for value in values {
		let bytes = typed_to_bytes(&value);
		let decoded = bytes_to_typed(&bytes, value.kind()).expect("encoded value decodes");
		assert_eq!(decoded, value);
	}
}

#[test]
fn resolve_follows_input_encoding() {
	assert_eq!(
		resolve(ValueKind::DWord, InputEncoding::Text, "1").expect("text dword resolves"),
		TypedValue::DWord(1)
	);
	assert_eq!(
		resolve(ValueKind::DWord, InputEncoding::Hex, "0F-00-00-00").expect("hex dword resolves"),
		TypedValue::DWord(15)
	);
	assert_eq!(
		resolve(ValueKind::String, InputEncoding::Hex, "41-00").expect("hex string resolves"),
		TypedValue::String("A".to_owned())
	);
	let err = resolve(ValueKind::DWord, InputEncoding::Hex, "1").expect_err("odd hex fails");
	assert_eq!(err.category(), ErrorCategory::Codec);
}
