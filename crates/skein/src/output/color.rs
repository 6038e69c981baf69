//! Color and styling helpers for terminal output.

use crate::domain::RelationshipType;
use colored::{ColoredString, Colorize};
use std::env;

/// Apply the `NO_COLOR` convention (<https://no-color.org/>) and the
/// `SKEIN_COLOR=0` escape hatch before any output is produced.
pub fn init_from_env() {
    let no_color = env::var_os("NO_COLOR").is_some();
    let skein_color_off = matches!(
        env::var("SKEIN_COLOR").as_deref(),
        Ok("0") | Ok("false") | Ok("FALSE")
    );
    if no_color || skein_color_off {
        colored::control::set_override(false);
    }
}

/// Success messages.
#[must_use]
pub fn success(text: &str) -> ColoredString {
    text.green()
}

/// Warnings.
#[must_use]
pub fn warning(text: &str) -> ColoredString {
    text.yellow()
}

/// Errors.
#[must_use]
pub fn error(text: &str) -> ColoredString {
    text.red().bold()
}

/// Informational highlights.
#[must_use]
pub fn info(text: &str) -> ColoredString {
    text.cyan()
}

/// Work item identifiers.
#[must_use]
pub fn item_id(text: &str) -> ColoredString {
    text.cyan().bold()
}

/// Relationship type labels.
#[must_use]
pub fn relationship(ty: RelationshipType) -> ColoredString {
    ty.as_str().dimmed()
}
