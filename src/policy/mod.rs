mod batch;
mod bytes;
mod codec;
mod command;
mod error;
mod kind;
mod listing;
mod pol;
mod store;
mod value;

/// Ordered batch application against a store.
pub use batch::{ApplyMode, ApplyReport, BatchApplier};
/// Hex, text, and binary conversions for typed values.
pub use codec::{bytes_to_hex, bytes_to_typed, hex_to_bytes, hex_to_typed, resolve, text_to_typed, typed_to_bytes};
/// Parsed command lines.
pub use command::{Command, InputEncoding, TEXT_FILTER, parse_script};
/// Error and result aliases.
pub use error::{ErrorCategory, PolicyError, Result};
/// Registry value kind codes.
pub use kind::ValueKind;
/// Listing renderers for stored values.
pub use listing::{ListingRecord, listing_records, render_listing, render_listing_line};
/// `Registry.pol` (PReg) file codec.
pub use pol::{PolEntry, decode_pol, encode_pol};
/// Policy store capability and implementations.
pub use store::{Access, MemoryStore, POL_FILE_NAME, PolFileStore, PolicyStore, RegistryTree, Section, StoredEntry, StoredValue};
/// Decoded typed values.
pub use value::TypedValue;
