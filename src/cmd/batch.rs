use lgpoedit::config::Config;
use lgpoedit::policy::{Access, ApplyMode, ApplyReport, BatchApplier, MemoryStore, PolFileStore, Result, Section};
use tracing::info;

use crate::cmd::util::{CommandSource, SectionArgs, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub section: SectionArgs,
	#[command(flatten)]
	pub source: CommandSource,
	/// Apply to an in-memory copy and leave the policy file untouched.
	#[arg(long)]
	pub dry_run: bool,
	/// Resolve every value before the first write.
	#[arg(long)]
	pub prevalidate: bool,
	#[arg(long)]
	pub json: bool,
}

/// Apply a command batch to one policy section.
pub fn run(args: Args, config: &Config) -> Result<()> {
	let Args {
		section,
		source,
		dry_run,
		prevalidate,
		json,
	} = args;

	let section = section.resolve(config.default_section);
	let mode = if prevalidate { ApplyMode::Prevalidate } else { config.apply_mode };
	let commands = source.commands()?;
	if commands.is_empty() {
		info!("no commands given, saving unchanged store");
	}

	let applier = BatchApplier::new(mode);
	let report = if dry_run {
		let file = PolFileStore::open(&config.gpo_root, section, Access::ReadOnly)?;
		let mut store = MemoryStore::from_tree(file.into_tree());
		applier.apply(&mut store, commands)?
	} else {
		let mut store = PolFileStore::open(&config.gpo_root, section, Access::ReadWrite)?;
		applier.apply(&mut store, commands)?
	};

	print_summary(section, mode, dry_run, report, json)
}

fn print_summary(section: Section, mode: ApplyMode, dry_run: bool, report: ApplyReport, json: bool) -> Result<()> {
	if json {
		return emit_json(&BatchJson {
			section: section.as_str(),
			mode: mode.as_str(),
			dry_run,
			report,
		});
	}

	println!("section: {}", section.as_str());
	println!("mode: {}", mode.as_str());
	println!("dry_run: {dry_run}");
	println!("set: {}", report.set);
	println!("deleted: {}", report.deleted);
	println!("absent: {}", report.absent);
	Ok(())
}

#[derive(serde::Serialize)]
struct BatchJson {
	section: &'static str,
	mode: &'static str,
	dry_run: bool,
	#[serde(flatten)]
	report: ApplyReport,
}
