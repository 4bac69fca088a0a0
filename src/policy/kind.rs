use std::fmt;

use crate::policy::{PolicyError, Result};

/// Registry value kind.
///
/// The integer codes follow the standard registry numbering and appear in
/// command text, listing output, and `Registry.pol` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
	/// No value; code `0`.
	None,
	/// UTF-16 text; code `1`.
	String,
	/// UTF-16 text with unexpanded environment references; code `2`.
	ExpandString,
	/// Raw bytes; code `3`.
	Binary,
	/// Little-endian 32-bit integer; code `4`.
	DWord,
	/// Sequence of NUL-terminated UTF-16 strings; code `7`.
	MultiString,
	/// Little-endian 64-bit integer; code `11`.
	QWord,
}

impl ValueKind {
	/// Every supported kind in code order.
	pub const ALL: [Self; 7] = [
		Self::None,
		Self::String,
		Self::ExpandString,
		Self::Binary,
		Self::DWord,
		Self::MultiString,
		Self::QWord,
	];

	/// Stable integer code.
	pub fn code(self) -> u32 {
		match self {
			Self::None => 0,
			Self::String => 1,
			Self::ExpandString => 2,
			Self::Binary => 3,
			Self::DWord => 4,
			Self::MultiString => 7,
			Self::QWord => 11,
		}
	}

	/// Map an integer code back to a kind.
	pub fn from_code(code: u32) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.code() == code)
	}

	/// Short display name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "None",
			Self::String => "String",
			Self::ExpandString => "ExpandString",
			Self::Binary => "Binary",
			Self::DWord => "DWord",
			Self::MultiString => "MultiString",
			Self::QWord => "QWord",
		}
	}

	/// Registry API constant name, e.g. `REG_DWORD`.
	pub fn reg_name(self) -> &'static str {
		match self {
			Self::None => "REG_NONE",
			Self::String => "REG_SZ",
			Self::ExpandString => "REG_EXPAND_SZ",
			Self::Binary => "REG_BINARY",
			Self::DWord => "REG_DWORD",
			Self::MultiString => "REG_MULTI_SZ",
			Self::QWord => "REG_QWORD",
		}
	}
}

impl TryFrom<u32> for ValueKind {
	type Error = PolicyError;

	fn try_from(code: u32) -> Result<Self> {
		Self::from_code(code).ok_or(PolicyError::UnsupportedKind { code })
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
