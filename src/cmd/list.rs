use lgpoedit::config::Config;
use lgpoedit::policy::{Access, PolFileStore, Result, listing_records, render_listing};

use crate::cmd::util::{SectionArgs, emit_json};

#[derive(clap::Args)]
pub struct Args {
	#[command(flatten)]
	pub section: SectionArgs,
	#[arg(long)]
	pub json: bool,
}

/// Print every value stored in one policy section.
pub fn run(args: Args, config: &Config) -> Result<()> {
	let Args { section, json } = args;

	let section = section.resolve(config.default_section);
	let store = PolFileStore::open(&config.gpo_root, section, Access::ReadOnly)?;

	if json {
		return emit_json(&listing_records(store.tree()));
	}

	for line in render_listing(store.tree()) {
		println!("{line}");
	}
	Ok(())
}
