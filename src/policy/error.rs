use thiserror::Error;

use crate::policy::ValueKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Coarse grouping of [`PolicyError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	/// Malformed command line.
	Parse,
	/// Malformed hex, integer text, or encoded value bytes.
	Codec,
	/// Kind code outside the supported table.
	UnsupportedKind,
	/// Policy store open/read/write/save failure.
	Store,
	/// Configuration file failure.
	Config,
}

impl ErrorCategory {
	/// Render category as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Parse => "parse",
			Self::Codec => "codec",
			Self::UnsupportedKind => "unsupported_kind",
			Self::Store => "store",
			Self::Config => "config",
		}
	}
}

/// Errors produced while parsing, converting, and applying policy commands.
#[derive(Debug, Error)]
pub enum PolicyError {
	/// Command line lacks the key or value name field.
	#[error("command needs at least key and value name, found {found} field(s): {line:?}")]
	MissingFields {
		/// Offending command line.
		line: String,
		/// Number of `;`-separated fields present.
		found: usize,
	},
	/// Command line has an empty key field.
	#[error("command key is empty: {line:?}")]
	EmptyKey {
		/// Offending command line.
		line: String,
	},
	/// Kind segment is not a base-10 integer.
	#[error("invalid kind {kind:?} (expected a base-10 integer)")]
	InvalidKindCode {
		/// Raw kind segment.
		kind: String,
	},
	/// A failure tied to one line of a command script.
	#[error("line {line}: {source}")]
	ScriptLine {
		/// One-based script line number.
		line: usize,
		/// Underlying failure.
		source: Box<PolicyError>,
	},
	/// Hex text has an odd number of digits after cleanup.
	#[error("hex text has odd length {len}")]
	OddHexLength {
		/// Cleaned digit count.
		len: usize,
	},
	/// Hex text contains a non-hex character.
	#[error("invalid hex digit {ch:?} at offset {at}")]
	InvalidHexDigit {
		/// Offending character.
		ch: char,
		/// Byte offset in the cleaned text.
		at: usize,
	},
	/// Integer text could not be parsed for the kind's width.
	#[error("invalid {kind} integer text {text:?}")]
	InvalidInteger {
		/// Target kind.
		kind: ValueKind,
		/// Raw text.
		text: String,
	},
	/// Fixed-width value bytes have the wrong length.
	#[error("{kind} value needs {expected} bytes, got {actual}")]
	InvalidValueLength {
		/// Target kind.
		kind: ValueKind,
		/// Required byte count.
		expected: usize,
		/// Provided byte count.
		actual: usize,
	},
	/// UTF-16LE payload has an odd byte count.
	#[error("{kind} value has odd UTF-16 byte length {len}")]
	OddUtf16Length {
		/// Target kind.
		kind: ValueKind,
		/// Provided byte count.
		len: usize,
	},
	/// UTF-16LE payload contains an unpaired surrogate.
	#[error("{kind} value is not valid UTF-16")]
	InvalidUtf16 {
		/// Target kind.
		kind: ValueKind,
	},
	/// Kind code has no supported representation.
	#[error("unsupported value kind {code}")]
	UnsupportedKind {
		/// Raw kind code.
		code: u32,
	},
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Store rejected a key path.
	#[error("invalid key path {path:?}")]
	InvalidKeyPath {
		/// Offending path.
		path: String,
	},
	/// Store rejected a value name.
	#[error("invalid value name {name:?}")]
	InvalidValueName {
		/// Offending value name.
		name: String,
	},
	/// Key segment or value name exceeds the registry length limit.
	#[error("{what} exceeds {max} characters: {name:?}")]
	NameTooLong {
		/// Which name was checked.
		what: &'static str,
		/// Offending name.
		name: String,
		/// Maximum character count.
		max: usize,
	},
	/// Mutation attempted on a store opened read-only.
	#[error("store opened read-only, cannot {op}")]
	ReadOnlyStore {
		/// Rejected operation.
		op: &'static str,
	},
	/// Policy file does not start with the `PReg` signature.
	#[error("not a Registry.pol file (signature={signature:?})")]
	PolBadSignature {
		/// First up-to-4 bytes.
		signature: [u8; 4],
	},
	/// Policy file version is not supported.
	#[error("unsupported Registry.pol version {version} (expected 1)")]
	PolUnsupportedVersion {
		/// Parsed version.
		version: u32,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	PolUnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Policy entry delimiters or strings are malformed.
	#[error("malformed Registry.pol entry at offset {at}: {reason}")]
	PolMalformed {
		/// Byte offset of the failure.
		at: usize,
		/// Short description.
		reason: &'static str,
	},
	/// Value data exceeds the 32-bit size field of a policy entry.
	#[error("value {key}\\{value_name} is {len} bytes, too large for Registry.pol")]
	PolValueTooLarge {
		/// Key path of the entry.
		key: String,
		/// Value name of the entry.
		value_name: String,
		/// Data length in bytes.
		len: usize,
	},
	/// Backend-specific failure reported by a [`PolicyStore`](crate::policy::PolicyStore) implementation.
	#[error("store failure: {message}")]
	StoreFailure {
		/// Backend message.
		message: String,
	},
	/// Configuration file could not be read or parsed.
	#[error("config {path}: {message}")]
	Config {
		/// Configuration file path.
		path: String,
		/// Underlying failure message.
		message: String,
	},
}

impl PolicyError {
	/// Classify this error into the parse/codec/kind/store taxonomy.
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::MissingFields { .. } | Self::EmptyKey { .. } | Self::InvalidKindCode { .. } => ErrorCategory::Parse,
			Self::ScriptLine { source, .. } => source.category(),
			Self::OddHexLength { .. }
			| Self::InvalidHexDigit { .. }
			| Self::InvalidInteger { .. }
			| Self::InvalidValueLength { .. }
			| Self::OddUtf16Length { .. }
			| Self::InvalidUtf16 { .. } => ErrorCategory::Codec,
			Self::UnsupportedKind { .. } => ErrorCategory::UnsupportedKind,
			Self::Io(_)
			| Self::InvalidKeyPath { .. }
			| Self::InvalidValueName { .. }
			| Self::NameTooLong { .. }
			| Self::ReadOnlyStore { .. }
			| Self::PolBadSignature { .. }
			| Self::PolUnsupportedVersion { .. }
			| Self::PolUnexpectedEof { .. }
			| Self::PolMalformed { .. }
			| Self::PolValueTooLarge { .. }
			| Self::StoreFailure { .. } => ErrorCategory::Store,
			Self::Config { .. } => ErrorCategory::Config,
		}
	}
}
