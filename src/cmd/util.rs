use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use lgpoedit::policy::{Command, Result, Section, parse_script};

const STDIN_PATH: &str = "-";

/// Section selection flags shared by store-backed commands.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct SectionArgs {
	/// Target the computer section.
	#[arg(short, long, conflicts_with = "user")]
	pub machine: bool,
	/// Target the user section.
	#[arg(short, long)]
	pub user: bool,
}

impl SectionArgs {
	/// Resolve flags against the configured default.
	pub(crate) fn resolve(self, fallback: Section) -> Section {
		match (self.machine, self.user) {
			(true, _) => Section::Machine,
			(_, true) => Section::User,
			_ => fallback,
		}
	}
}

/// Where command lines come from.
#[derive(clap::Args, Debug, Clone)]
pub struct CommandSource {
	/// Command `Key;ValueName;Kind[:text];;Data` (set) or `Key;ValueName;;;` (delete).
	#[arg(short = 'a', long = "apply", value_name = "COMMAND", num_args = 1..)]
	pub apply: Vec<String>,
	/// Script with one command per line; `-` reads stdin.
	#[arg(short, long, value_name = "PATH")]
	pub file: Option<PathBuf>,
}

impl CommandSource {
	/// Parse `--apply` lines first, then the script, preserving order.
	pub(crate) fn commands(&self) -> Result<Vec<Command>> {
		let mut commands = self.apply.iter().map(String::as_str).map(Command::parse).collect::<Result<Vec<_>>>()?;
		if let Some(path) = &self.file {
			commands.extend(parse_script(&read_script(path)?)?);
		}
		Ok(commands)
	}
}

fn read_script(path: &Path) -> Result<String> {
	if path == Path::new(STDIN_PATH) {
		let mut text = String::new();
		io::stdin().read_to_string(&mut text)?;
		return Ok(text);
	}
	Ok(fs::read_to_string(path)?)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
	println!("{text}");
	Ok(())
}
