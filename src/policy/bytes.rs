use crate::policy::{PolicyError, Result};

/// Forward-only reader over a `Registry.pol` image.
///
/// Every read is bounds checked and reports the offset it failed at.
pub struct PolReader<'a> {
	bytes: &'a [u8],
	offset: usize,
}

impl<'a> PolReader<'a> {
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, offset: 0 }
	}

	/// Byte offset of the next read.
	pub fn offset(&self) -> usize {
		self.offset
	}

	pub fn is_exhausted(&self) -> bool {
		self.offset >= self.bytes.len()
	}

	/// Borrow the next `len` bytes.
	pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
		let rest = &self.bytes[self.offset.min(self.bytes.len())..];
		let Some(chunk) = rest.get(..len) else {
			return Err(PolicyError::PolUnexpectedEof {
				at: self.offset,
				need: len,
				rem: rest.len(),
			});
		};
		self.offset += len;
		Ok(chunk)
	}

	fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0_u8; N];
		out.copy_from_slice(self.take(N)?);
		Ok(out)
	}

	/// One UTF-16LE code unit.
	pub fn unit(&mut self) -> Result<u16> {
		self.take_array().map(u16::from_le_bytes)
	}

	pub fn u32_le(&mut self) -> Result<u32> {
		self.take_array().map(u32::from_le_bytes)
	}

	/// Code units up to a NUL unit; the NUL is consumed but not returned.
	pub fn utf16_cstring(&mut self) -> Result<Vec<u16>> {
		let mut units = Vec::new();
		loop {
			match self.unit()? {
				0 => return Ok(units),
				unit => units.push(unit),
			}
		}
	}
}

#[cfg(test)]
mod tests;
