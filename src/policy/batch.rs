use tracing::{debug, info};

use crate::policy::{Command, PolicyStore, Result, TypedValue, ValueKind, resolve};

/// When set-command values are materialized relative to store writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
	/// Resolve and apply one command at a time; a codec failure leaves
	/// earlier writes in the store.
	#[default]
	Sequential,
	/// Resolve every value first; a codec failure aborts before any write.
	Prevalidate,
}

impl ApplyMode {
	/// Render mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Sequential => "sequential",
			Self::Prevalidate => "prevalidate",
		}
	}
}

/// Outcome counts of a batch that completed and saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ApplyReport {
	/// Values written.
	pub set: usize,
	/// Values removed.
	pub deleted: usize,
	/// Deletes whose target was already absent.
	pub absent: usize,
}

/// Applies an ordered command batch to a store and commits once.
///
/// The first failure stops the batch: later commands are not attempted and
/// `save` is not called. Nothing already written is rolled back.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchApplier {
	mode: ApplyMode,
}

enum Step {
	Write {
		key: String,
		value_name: String,
		value: TypedValue,
	},
	Remove {
		key: String,
		value_name: String,
	},
}

impl BatchApplier {
	/// Create an applier using `mode`.
	pub fn new(mode: ApplyMode) -> Self {
		Self { mode }
	}

	/// Configured mode.
	pub fn mode(&self) -> ApplyMode {
		self.mode
	}

	/// Apply `commands` in order, then `save` once.
	pub fn apply<S>(&self, store: &mut S, commands: impl IntoIterator<Item = Command>) -> Result<ApplyReport>
	where
		S: PolicyStore + ?Sized,
	{
		let mut report = ApplyReport::default();

		match self.mode {
			ApplyMode::Sequential => {
				for (idx, command) in commands.into_iter().enumerate() {
					let step = plan(command)?;
					execute(store, idx, step, &mut report)?;
				}
			}
			ApplyMode::Prevalidate => {
				let steps = commands.into_iter().map(plan).collect::<Result<Vec<_>>>()?;
				debug!(commands = steps.len(), "all values resolved");
				for (idx, step) in steps.into_iter().enumerate() {
					execute(store, idx, step, &mut report)?;
				}
			}
		}

		store.save()?;
		info!(set = report.set, deleted = report.deleted, absent = report.absent, "batch saved");
		Ok(report)
	}
}

fn plan(command: Command) -> Result<Step> {
	match command {
		Command::Set {
			key,
			value_name,
			kind: ValueKind::None,
			..
		}
		| Command::Delete { key, value_name } => Ok(Step::Remove { key, value_name }),
		Command::Set {
			key,
			value_name,
			kind,
			encoding,
			data,
		} => Ok(Step::Write {
			value: resolve(kind, encoding, &data)?,
			key,
			value_name,
		}),
	}
}

fn execute<S>(store: &mut S, idx: usize, step: Step, report: &mut ApplyReport) -> Result<()>
where
	S: PolicyStore + ?Sized,
{
	match step {
		Step::Write { key, value_name, value } => {
			debug!(idx, key = %key, value_name = %value_name, kind = %value.kind(), "set value");
			store.set_value(&key, &value_name, &value)?;
			report.set += 1;
		}
		Step::Remove { key, value_name } => {
			if store.delete_value(&key, &value_name)? {
				debug!(idx, key = %key, value_name = %value_name, "deleted value");
				report.deleted += 1;
			} else {
				debug!(idx, key = %key, value_name = %value_name, "value already absent");
				report.absent += 1;
			}
		}
	}
	Ok(())
}
