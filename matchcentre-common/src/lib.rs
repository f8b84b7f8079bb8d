//! Common types and utilities shared across matchcentre crates.
//!
//! This crate defines the error taxonomy, the tracing/logging initializer,
//! and the runtime configuration loader used throughout the workspace. It is
//! intentionally lightweight so that every crate can depend on it without
//! pulling in the browser or tabular stacks.
//!
//! - [`Error`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`config`]: layered runtime configuration

pub mod config;
pub mod observability;

/// Error taxonomy for a match extraction call.
///
/// Every failure is terminal for the call it occurred in; only [`Session`]
/// is worth retrying, since it covers transport conditions (window closed,
/// crashed driver) rather than permanent structural ones.
///
/// [`Session`]: Error::Session
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The caller supplied neither a well-formed match address nor a
    /// qualifying pre-parsed document. Reported before any fetch happens.
    #[error("invalid match input: {0}")]
    InputInvalid(String),

    /// The rendered page carried no embedded literal with the match-data
    /// marker.
    #[error("match data not found: {0}")]
    SourceUnavailable(String),

    /// The repaired literal still failed to decode as JSON.
    #[error("embedded match data did not decode as JSON")]
    RepairFailed(#[source] serde_json::Error),

    /// The decoded document was missing a required part of the expected
    /// shape (`matchCentreData` key, score format, player-name mapping).
    #[error("match document shape mismatch: {0}")]
    SchemaMismatch(String),

    /// The browser session failed underneath us.
    #[error("browser session failure: {0}")]
    Session(#[from] anyhow::Error),

    /// Assembling the output table failed.
    #[error("tabular output error: {0}")]
    Tabular(String),
}

/// Convenient alias for results that use [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_adapt_from_anyhow() {
        let err: Error = anyhow::anyhow!("window was closed").into();
        assert!(matches!(err, Error::Session(_)));
        assert!(err.to_string().contains("window was closed"));
    }

    #[test]
    fn repair_failures_keep_their_source() {
        let decode = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = Error::RepairFailed(decode);
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
    }
}
