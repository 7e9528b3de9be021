//! The fix log.
//!
//! Every automatic repair the engine applies - a null replaced with a type
//! default, a numeric identifier coerced to a string, a synthesized GIS
//! identifier - is appended to an ordered log instead of being silently
//! applied. Log order is deterministic so runs can be compared against
//! golden output.

use serde::Serialize;
use std::fmt;

/// One applied repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Source table (or canonical collection) the record came from.
    pub table: String,

    /// Canonical field the repair applies to. Empty for record-level
    /// repairs (e.g. a synthesized top-level array).
    pub field: String,

    /// What was done, in plain language.
    pub action: String,
}

impl Fix {
    pub fn new(
        table: impl Into<String>,
        field: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "[{}] {}", self.table, self.action)
        } else {
            write!(f, "[{}] {}: {}", self.table, self.field, self.action)
        }
    }
}
