use lgpoedit::policy::{Command, Result, ValueKind, bytes_to_hex, resolve, typed_to_bytes};

use crate::cmd::util::{CommandSource, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub source: CommandSource,
	#[arg(long)]
	pub json: bool,
}

/// Parse and resolve commands without opening a store.
///
/// Fails on the first command whose value does not resolve.
pub fn run(args: Args) -> Result<()> {
	let Args { source, json } = args;

	let rows = source.commands()?.into_iter().map(resolve_row).collect::<Result<Vec<_>>>()?;

	if json {
		return emit_json(&rows);
	}

	for row in &rows {
		match row.action {
			"delete" => println!("delete {};{}", row.key, row.name),
			_ => println!(
				"set {};{} {} ({}) = {} [{}]",
				row.key,
				row.name,
				row.kind.unwrap_or_default(),
				row.encoding.unwrap_or_default(),
				row.value.as_deref().unwrap_or_default(),
				row.hex.as_deref().unwrap_or_default(),
			),
		}
	}
	Ok(())
}

fn resolve_row(command: Command) -> Result<ParsedJson> {
	match command {
		Command::Set {
			key,
			value_name,
			kind,
			encoding,
			data,
		} if kind != ValueKind::None => {
			let value = resolve(kind, encoding, &data)?;
			Ok(ParsedJson {
				action: "set",
				key,
				name: value_name,
				kind: Some(kind.reg_name()),
				encoding: Some(encoding.as_str()),
				value: Some(value.to_string()),
				hex: Some(bytes_to_hex(&typed_to_bytes(&value))),
			})
		}
		command => Ok(ParsedJson {
			action: "delete",
			key: command.key().to_owned(),
			name: command.value_name().to_owned(),
			kind: None,
			encoding: None,
			value: None,
			hex: None,
		}),
	}
}

#[derive(serde::Serialize)]
struct ParsedJson {
	action: &'static str,
	key: String,
	name: String,
	kind: Option<&'static str>,
	encoding: Option<&'static str>,
	value: Option<String>,
	hex: Option<String>,
}
