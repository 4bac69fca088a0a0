//! `Registry.pol` (PReg) reader and writer.
//!
//! Layout: `PReg` signature, `u32` version `1`, then entries of the form
//! `[key;name;kind;size;data]`. Brackets and semicolons are UTF-16LE code
//! units; key and name are NUL-terminated UTF-16LE; kind and size are
//! little-endian `u32`.

use crate::policy::bytes::PolReader;
use crate::policy::{PolicyError, Result};

/// File signature.
pub const POL_SIGNATURE: [u8; 4] = *b"PReg";
/// Supported file version.
pub const POL_VERSION: u32 = 1;

const OPEN: u16 = b'[' as u16;
const CLOSE: u16 = b']' as u16;
const SEP: u16 = b';' as u16;

/// One raw `[key;name;kind;size;data]` entry.
///
/// The kind code is kept verbatim so entries of kinds this crate cannot
/// decode still survive a read/write cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolEntry {
	/// Backslash-separated key path.
	pub key: String,
	/// Value name.
	pub value_name: String,
	/// Raw registry kind code.
	pub kind_code: u32,
	/// Encoded value bytes.
	pub data: Vec<u8>,
}

/// Decode a whole `Registry.pol` file.
///
/// A zero-length input is treated as a file without entries.
pub fn decode_pol(bytes: &[u8]) -> Result<Vec<PolEntry>> {
	if bytes.is_empty() {
		return Ok(Vec::new());
	}

	if !bytes.starts_with(&POL_SIGNATURE) {
		return Err(PolicyError::PolBadSignature { signature: first4(bytes) });
	}
	let mut reader = PolReader::new(bytes);
	reader.take(POL_SIGNATURE.len())?;

	let version = reader.u32_le()?;
	if version != POL_VERSION {
		return Err(PolicyError::PolUnsupportedVersion { version });
	}

	let mut entries = Vec::new();
	while !reader.is_exhausted() {
		entries.push(read_entry(&mut reader)?);
	}
	Ok(entries)
}

/// Encode entries into a `Registry.pol` file image.
///
/// Fails when a value's data does not fit the format's 32-bit size field.
pub fn encode_pol<'a>(entries: impl IntoIterator<Item = &'a PolEntry>) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	out.extend_from_slice(&POL_SIGNATURE);
	out.extend_from_slice(&POL_VERSION.to_le_bytes());

	for entry in entries {
		push_unit(&mut out, OPEN);
		push_cstring(&mut out, &entry.key);
		push_unit(&mut out, SEP);
		push_cstring(&mut out, &entry.value_name);
		push_unit(&mut out, SEP);
		out.extend_from_slice(&entry.kind_code.to_le_bytes());
		push_unit(&mut out, SEP);
		out.extend_from_slice(&data_size(entry, entry.data.len())?.to_le_bytes());
		push_unit(&mut out, SEP);
		out.extend_from_slice(&entry.data);
		push_unit(&mut out, CLOSE);
	}
	Ok(out)
}

fn data_size(entry: &PolEntry, len: usize) -> Result<u32> {
	u32::try_from(len).map_err(|_| PolicyError::PolValueTooLarge {
		key: entry.key.clone(),
		value_name: entry.value_name.clone(),
		len,
	})
}

fn read_entry(reader: &mut PolReader<'_>) -> Result<PolEntry> {
	expect_unit(reader, OPEN, "expected '['")?;
	let key = read_string(reader, "key is not valid UTF-16")?;
	expect_unit(reader, SEP, "expected ';' after key")?;
	let value_name = read_string(reader, "value name is not valid UTF-16")?;
	expect_unit(reader, SEP, "expected ';' after value name")?;
	let kind_code = reader.u32_le()?;
	expect_unit(reader, SEP, "expected ';' after kind")?;
	let size = reader.u32_le()? as usize;
	expect_unit(reader, SEP, "expected ';' after size")?;
	let data = reader.take(size)?.to_vec();
	expect_unit(reader, CLOSE, "expected ']'")?;

	Ok(PolEntry {
		key,
		value_name,
		kind_code,
		data,
	})
}

fn expect_unit(reader: &mut PolReader<'_>, expected: u16, reason: &'static str) -> Result<()> {
	let at = reader.offset();
	if reader.unit()? != expected {
		return Err(PolicyError::PolMalformed { at, reason });
	}
	Ok(())
}

fn read_string(reader: &mut PolReader<'_>, reason: &'static str) -> Result<String> {
	let at = reader.offset();
	let units = reader.utf16_cstring()?;
	String::from_utf16(&units).map_err(|_| PolicyError::PolMalformed { at, reason })
}

fn push_unit(out: &mut Vec<u8>, unit: u16) {
	out.extend_from_slice(&unit.to_le_bytes());
}

fn push_cstring(out: &mut Vec<u8>, text: &str) {
	for unit in text.encode_utf16() {
		push_unit(out, unit);
	}
	push_unit(out, 0);
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut signature = [0_u8; 4];
	let take = bytes.len().min(4);
	signature[..take].copy_from_slice(&bytes[..take]);
	signature
}

#[cfg(test)]
mod tests;
