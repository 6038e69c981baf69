//! Input validation for CLI arguments.
//!
//! Used as clap `value_parser` functions so bad input fails at parse time
//! with a clear message instead of deep inside a command.

/// Maximum accepted item identifier length.
pub const MAX_ITEM_ID_LENGTH: usize = 64;

/// Maximum accepted title length.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate a work item identifier.
///
/// Identifiers are trimmed, must be non-empty, at most
/// [`MAX_ITEM_ID_LENGTH`] characters, and free of whitespace.
///
/// # Errors
///
/// Returns a human-readable message describing the violated rule.
pub fn validate_item_id(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("item id must not be empty".to_string());
    }
    if trimmed.len() > MAX_ITEM_ID_LENGTH {
        return Err(format!(
            "item id must be at most {MAX_ITEM_ID_LENGTH} characters"
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err("item id must not contain whitespace".to_string());
    }
    Ok(trimmed.to_string())
}

/// Validate an item title.
///
/// # Errors
///
/// Returns a message if the title is empty after trimming or too long.
pub fn validate_title(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("title must not be empty".to_string());
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(format!("title must be at most {MAX_TITLE_LENGTH} characters"));
    }
    Ok(trimmed.to_string())
}
