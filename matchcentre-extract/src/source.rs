//! Locating the embedded match-data literal inside a rendered page.
//!
//! Match centre pages ship their data as a JavaScript object literal passed
//! to `require.config.params["args"]` in inline script text. The literal is
//! the page's source of truth — far more reliable than scraping the
//! rendered DOM, which changes with every layout tweak.

use std::sync::OnceLock;

use matchcentre_common::{Error, Result};
use regex::Regex;

use crate::MATCH_CENTRE_KEY;

static ARGS_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Non-greedy so the capture stops at the first plausible `});`.
fn args_pattern() -> &'static Regex {
    ARGS_PATTERN.get_or_init(|| {
        Regex::new(r#"(?s)require\.config\.params\["args"\] = (\{.*?\});"#)
            .expect("args assignment pattern is valid")
    })
}

/// Find the embedded object literal carrying match data.
///
/// Candidates are scanned in document order; the first whose body contains
/// the `matchCentreData` marker wins. A page with no qualifying candidate
/// fails with [`Error::SourceUnavailable`] — typically a non-match page, or
/// one captured before its scripts ran.
pub fn locate_embedded_literal(document: &str) -> Result<&str> {
    for caps in args_pattern().captures_iter(document) {
        let Some(literal) = caps.get(1) else { continue };
        if literal.as_str().contains(MATCH_CENTRE_KEY) {
            return Ok(literal.as_str());
        }
    }
    Err(Error::SourceUnavailable(
        "page has no embedded match data literal".into(),
    ))
}
