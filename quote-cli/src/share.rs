//! Mail-compose links for sharing a scenario summary.
//!
//! Opening the link (or writing the summary to the clipboard) is left to the
//! environment; this module only builds the URL.

use quote_core::SelectionState;

/// Subject line used when sharing `selection`.
pub fn subject_for(selection: &SelectionState) -> String {
    format!("MLM software estimate: {}", selection.scenario_name)
}

/// Builds a `mailto:` URL with a percent-encoded subject and body.
///
/// `recipient` is inserted verbatim; leave it empty to let the mail client
/// ask for one.
pub fn mailto_link(
    recipient: Option<&str>,
    subject: &str,
    body: &str,
) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient.map(str::trim).unwrap_or_default(),
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
