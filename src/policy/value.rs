use std::fmt;

use crate::policy::{ValueKind, bytes_to_hex};

/// Native value carried by a set command, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
	/// `REG_SZ` text.
	String(String),
	/// `REG_EXPAND_SZ` text, stored unexpanded.
	ExpandString(String),
	/// `REG_BINARY` bytes.
	Binary(Vec<u8>),
	/// `REG_DWORD` value.
	DWord(i32),
	/// `REG_MULTI_SZ` items in order.
	MultiString(Vec<String>),
	/// `REG_QWORD` value.
	QWord(i64),
}

impl TypedValue {
	/// Kind tag matching this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::String(_) => ValueKind::String,
			Self::ExpandString(_) => ValueKind::ExpandString,
			Self::Binary(_) => ValueKind::Binary,
			Self::DWord(_) => ValueKind::DWord,
			Self::MultiString(_) => ValueKind::MultiString,
			Self::QWord(_) => ValueKind::QWord,
		}
	}
}

/// Human-readable rendering; multi-strings join with `;`, binary renders as hex.
impl fmt::Display for TypedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String(text) | Self::ExpandString(text) => f.write_str(text),
			Self::Binary(bytes) => f.write_str(&bytes_to_hex(bytes)),
			Self::DWord(value) => write!(f, "{value}"),
			Self::MultiString(items) => f.write_str(&items.join(";")),
			Self::QWord(value) => write!(f, "{value}"),
		}
	}
}
