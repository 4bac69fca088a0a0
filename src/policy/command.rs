use std::fmt;

use crate::policy::{PolicyError, Result, ValueKind};

/// Filter tag selecting textual interpretation of the data field.
pub const TEXT_FILTER: &str = "text";

const FIELD_SEPARATOR: char = ';';
const FILTER_SEPARATOR: char = ':';
const MAX_FIELDS: usize = 5;
const COMMENT_PREFIX: char = '#';

/// How the data field of a set command is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
	/// Kind-specific text (`:text` filter present).
	Text,
	/// Hex pairs of the value's binary layout.
	#[default]
	Hex,
}

impl InputEncoding {
	/// Render encoding as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Hex => "hex",
		}
	}
}

/// One parsed command line.
///
/// Grammar: `Key;ValueName;Kind[:filter...];<reserved>;Data`. An empty kind
/// field selects [`Command::Delete`]; anything else is a [`Command::Set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Create or overwrite a value.
	Set {
		/// Backslash-separated key path.
		key: String,
		/// Value name under the key; empty names the default value.
		value_name: String,
		/// Declared kind.
		kind: ValueKind,
		/// How `data` is interpreted.
		encoding: InputEncoding,
		/// Raw data field, verbatim.
		data: String,
	},
	/// Remove a value if present.
	Delete {
		/// Backslash-separated key path.
		key: String,
		/// Value name under the key.
		value_name: String,
	},
}

impl Command {
	/// Parse one command line.
	pub fn parse(line: &str) -> Result<Self> {
		let fields: Vec<&str> = line.splitn(MAX_FIELDS, FIELD_SEPARATOR).collect();
		if fields.len() < 2 {
			return Err(PolicyError::MissingFields {
				line: line.to_owned(),
				found: fields.len(),
			});
		}

		let key = fields[0];
		let value_name = fields[1];
		if key.is_empty() {
			return Err(PolicyError::EmptyKey { line: line.to_owned() });
		}

		let kind_field = fields.get(2).copied().unwrap_or_default();
		let mut segments = kind_field.split(FILTER_SEPARATOR);
		let code = segments.next().unwrap_or_default().trim();
		if code.is_empty() {
			return Ok(Self::Delete {
				key: key.to_owned(),
				value_name: value_name.to_owned(),
			});
		}

		let code = code.parse::<u32>().map_err(|_| PolicyError::InvalidKindCode { kind: code.to_owned() })?;
		let kind = ValueKind::try_from(code)?;

		let mut encoding = InputEncoding::Hex;
		for tag in segments {
			if tag == TEXT_FILTER {
				encoding = InputEncoding::Text;
			} else if !tag.is_empty() {
				tracing::warn!(tag, "ignoring unknown kind filter");
			}
		}

		Ok(Self::Set {
			key: key.to_owned(),
			value_name: value_name.to_owned(),
			kind,
			encoding,
			data: fields.get(4).copied().unwrap_or_default().to_owned(),
		})
	}

	/// Key path targeted by the command.
	pub fn key(&self) -> &str {
		match self {
			Self::Set { key, .. } | Self::Delete { key, .. } => key,
		}
	}

	/// Value name targeted by the command.
	pub fn value_name(&self) -> &str {
		match self {
			Self::Set { value_name, .. } | Self::Delete { value_name, .. } => value_name,
		}
	}
}

/// Canonical command line; parses back to an equal command.
impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Set {
				key,
				value_name,
				kind,
				encoding,
				data,
			} => {
				write!(f, "{key};{value_name};{}", kind.code())?;
				if *encoding == InputEncoding::Text {
					write!(f, ":{TEXT_FILTER}")?;
				}
				write!(f, ";;{data}")
			}
			Self::Delete { key, value_name } => write!(f, "{key};{value_name};;;"),
		}
	}
}

/// Parse a multi-line command script.
///
/// Blank lines and lines starting with `#` are skipped. Errors carry the
/// one-based line number.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
	let mut commands = Vec::new();
	for (idx, line) in text.lines().enumerate() {
		if line.trim().is_empty() || line.trim_start().starts_with(COMMENT_PREFIX) {
			continue;
		}

		let command = Command::parse(line).map_err(|source| PolicyError::ScriptLine {
			line: idx + 1,
			source: Box::new(source),
		})?;
		commands.push(command);
	}
	Ok(commands)
}
