#![forbid(unsafe_code)]

//! Button enablement driven by a prompt's text field.
//!
//! Buttons listed in a prompt's watched set are enabled exactly when the field
//! holds at least one character. Buttons outside the set are never touched.

use std::collections::BTreeSet;

/// Enabled state for every watched button given the current field text.
///
/// Yields `(index, enabled)` in ascending index order.
pub fn watched_enablement<'a>(
    text: &str,
    watched: &'a BTreeSet<usize>,
) -> impl Iterator<Item = (usize, bool)> + use<'a> {
    let enabled = !text.is_empty();
    watched.iter().map(move |index| (*index, enabled))
}
