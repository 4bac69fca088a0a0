#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lgpoedit::config::Config;

mod cmd;

#[derive(Parser)]
#[command(name = "lgpoedit", version, about = "Batch editing of local group policy registry settings")]
struct Cli {
	/// Path to a TOML config file.
	#[arg(long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,
	/// Group policy root holding `Machine/` and `User/`; overrides the config file.
	#[arg(long, global = true, value_name = "PATH")]
	gpo_root: Option<PathBuf>,
	/// Enable debug logging on stderr.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Apply set/delete commands to one section, then save once.
	Batch(cmd::batch::Args),
	/// List configured values as `[Key;Name;Kind;Length;HEX]`.
	List(cmd::list::Args),
	/// Parse and resolve commands without touching a store.
	Parse(cmd::parse::Args),
}

fn main() {
	let cli = match Cli::try_parse() {
		Ok(cli) => cli,
		Err(err) => {
			let code = if err.use_stderr() { 1 } else { 0 };
			let _ = err.print();
			std::process::exit(code);
		}
	};

	init_tracing(cli.verbose);

	if let Err(err) = run(cli) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = if verbose {
		EnvFilter::new("lgpoedit=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lgpoedit=warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn run(cli: Cli) -> lgpoedit::policy::Result<()> {
	let mut config = Config::discover(cli.config.as_deref())?;
	if let Some(gpo_root) = cli.gpo_root {
		config.gpo_root = gpo_root;
	}

	match cli.command {
		Commands::Batch(args) => cmd::batch::run(args, &config),
		Commands::List(args) => cmd::list::run(args, &config),
		Commands::Parse(args) => cmd::parse::run(args),
	}
}
