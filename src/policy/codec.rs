//! Conversions between hex text, command text, typed values, and the
//! registry's binary value layouts.

use crate::policy::{InputEncoding, PolicyError, Result, TypedValue, ValueKind};

const HEX_SEPARATOR: char = '-';
const MULTI_STRING_SEPARATOR: char = ';';
const UTF16_NUL: u16 = 0;

/// Decode hex pairs, ignoring `-` separators and surrounding whitespace.
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>> {
	let stripped = text.replace(HEX_SEPARATOR, "");
	let cleaned = stripped.trim();

	if let Some((at, ch)) = cleaned.char_indices().find(|(_, ch)| !ch.is_ascii_hexdigit()) {
		return Err(PolicyError::InvalidHexDigit { ch, at });
	}
	if cleaned.len() % 2 != 0 {
		return Err(PolicyError::OddHexLength { len: cleaned.len() });
	}

	Ok(cleaned
		.as_bytes()
		.chunks_exact(2)
		.map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
		.collect())
}

/// Render bytes as uppercase hex pairs joined by `-`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 3);
	for (idx, byte) in bytes.iter().enumerate() {
		if idx > 0 {
			out.push(HEX_SEPARATOR);
		}
		out.push_str(&format!("{byte:02X}"));
	}
	out
}

/// Interpret command text as a value of `kind`.
pub fn text_to_typed(text: &str, kind: ValueKind) -> Result<TypedValue> {
	match kind {
		ValueKind::String => Ok(TypedValue::String(text.to_owned())),
		ValueKind::ExpandString => Ok(TypedValue::ExpandString(text.to_owned())),
		ValueKind::MultiString => Ok(TypedValue::MultiString(
			text.split(MULTI_STRING_SEPARATOR).map(str::to_owned).collect(),
		)),
		ValueKind::DWord => parse_dword(text).map(TypedValue::DWord),
		ValueKind::QWord => parse_qword(text).map(TypedValue::QWord),
		ValueKind::Binary => hex_to_bytes(text).map(TypedValue::Binary),
		ValueKind::None => Err(PolicyError::UnsupportedKind { code: kind.code() }),
	}
}

/// Decode hex text, then interpret the bytes as a value of `kind`.
pub fn hex_to_typed(text: &str, kind: ValueKind) -> Result<TypedValue> {
	bytes_to_typed(&hex_to_bytes(text)?, kind)
}

/// Materialize command data according to its input encoding.
pub fn resolve(kind: ValueKind, encoding: InputEncoding, data: &str) -> Result<TypedValue> {
	match encoding {
		InputEncoding::Text => text_to_typed(data, kind),
		InputEncoding::Hex => hex_to_typed(data, kind),
	}
}

/// Encode a value into its registry byte layout.
pub fn typed_to_bytes(value: &TypedValue) -> Vec<u8> {
	match value {
		TypedValue::DWord(number) => number.to_le_bytes().to_vec(),
		TypedValue::QWord(number) => number.to_le_bytes().to_vec(),
		TypedValue::String(text) | TypedValue::ExpandString(text) => encode_utf16le(text),
		TypedValue::MultiString(items) => {
			let mut out = Vec::new();
			for item in items {
				out.extend(encode_utf16le(item));
				out.extend_from_slice(&UTF16_NUL.to_le_bytes());
			}
			out
		}
		TypedValue::Binary(bytes) => bytes.clone(),
	}
}

/// Decode registry value bytes of `kind`.
pub fn bytes_to_typed(bytes: &[u8], kind: ValueKind) -> Result<TypedValue> {
	match kind {
		ValueKind::DWord => Ok(TypedValue::DWord(i32::from_le_bytes(fixed_width(bytes, kind)?))),
		ValueKind::QWord => Ok(TypedValue::QWord(i64::from_le_bytes(fixed_width(bytes, kind)?))),
		ValueKind::String => decode_utf16le(bytes, kind).map(TypedValue::String),
		ValueKind::ExpandString => decode_utf16le(bytes, kind).map(TypedValue::ExpandString),
		ValueKind::MultiString => decode_multi_string(bytes).map(TypedValue::MultiString),
		ValueKind::Binary => Ok(TypedValue::Binary(bytes.to_vec())),
		ValueKind::None => Err(PolicyError::UnsupportedKind { code: kind.code() }),
	}
}

fn nibble(digit: u8) -> u8 {
	match digit {
		b'0'..=b'9' => digit - b'0',
		b'a'..=b'f' => digit - b'a' + 10,
		b'A'..=b'F' => digit - b'A' + 10,
		_ => 0,
	}
}

// Signed range only; `-1` keeps the all-ones bit pattern.
fn parse_dword(text: &str) -> Result<i32> {
	text.trim().parse::<i32>().map_err(|_| PolicyError::InvalidInteger {
		kind: ValueKind::DWord,
		text: text.to_owned(),
	})
}

fn parse_qword(text: &str) -> Result<i64> {
	text.trim().parse::<i64>().map_err(|_| PolicyError::InvalidInteger {
		kind: ValueKind::QWord,
		text: text.to_owned(),
	})
}

fn fixed_width<const N: usize>(bytes: &[u8], kind: ValueKind) -> Result<[u8; N]> {
	<[u8; N]>::try_from(bytes).map_err(|_| PolicyError::InvalidValueLength {
		kind,
		expected: N,
		actual: bytes.len(),
	})
}

fn encode_utf16le(text: &str) -> Vec<u8> {
	text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn utf16_units(bytes: &[u8], kind: ValueKind) -> Result<Vec<u16>> {
	if bytes.len() % 2 != 0 {
		return Err(PolicyError::OddUtf16Length { kind, len: bytes.len() });
	}
	Ok(bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect())
}

fn decode_utf16le(bytes: &[u8], kind: ValueKind) -> Result<String> {
	let units = utf16_units(bytes, kind)?;
	String::from_utf16(&units).map_err(|_| PolicyError::InvalidUtf16 { kind })
}

fn decode_multi_string(bytes: &[u8]) -> Result<Vec<String>> {
	let kind = ValueKind::MultiString;
	let mut units = utf16_units(bytes, kind)?;
	if units.is_empty() {
		return Ok(Vec::new());
	}
	if units.last() == Some(&UTF16_NUL) {
		units.pop();
	}

	units
		.split(|unit| *unit == UTF16_NUL)
		.map(|item| String::from_utf16(item).map_err(|_| PolicyError::InvalidUtf16 { kind }))
		.collect()
}

#[cfg(test)]
mod tests;
