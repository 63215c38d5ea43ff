//! Password strength meter for staff accounts.

use aurum_core::password::password_strength;

use crate::error::AppResult;
use crate::output::emit;

/// Needs no database; runs before the store is opened.
pub fn execute(json: bool, password: &str) -> AppResult<()> {
    let strength = password_strength(password);
    emit(json, &strength, |s| format!("{} ({}/100)", s.label, s.score))
}
