/// Batch apply command.
pub mod batch;
/// Policy listing command.
pub mod list;
/// Offline parse and resolve command.
pub mod parse;
pub(crate) mod util;
