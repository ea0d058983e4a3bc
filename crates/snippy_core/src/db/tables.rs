//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Paste documents keyed by short code (`PasteRecord`, JSON-encoded).
///
/// The key is the short code itself, so the table doubles as the unique
/// index on that field.
pub const PASTES: TableDefinition<&str, &str> = TableDefinition::new("pastes");
