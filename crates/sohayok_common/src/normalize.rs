//! Text normalization shared by triggers and user input.
//!
//! Lower-casing is Unicode-aware: Latin text folds to lower case while
//! caseless scripts (Bengali among them) pass through untouched.

/// Lower-case then trim. Idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}
