//! Error types for content loading and validation.
//!
//! Resolution itself never fails; these errors only surface when content
//! assets are parsed or checked before a game starts.

/// Errors raised while loading or validating content assets.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The asset is not valid JSON or does not match the expected shape.
    #[error("malformed content: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A response-type key in a content table is not recognised.
    #[error("unknown response type: {0}")]
    UnknownResponseType(String),

    /// A bucket key in a narrative table is not recognised.
    #[error("unknown outcome bucket '{bucket}' under {response_type}")]
    UnknownBucket {
        /// The response type the bucket was listed under.
        response_type: String,
        /// The offending key.
        bucket: String,
    },

    /// A synergy text is missing from the `COMBINED` section.
    #[error("missing synergy text: {0}")]
    MissingSynergyText(String),

    /// A scenario failed validation.
    #[error("invalid scenario '{scenario}': {reason}")]
    InvalidScenario {
        /// Identifier of the scenario (may be empty if the id itself is missing).
        scenario: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Two language packs differ in structure or balance.
    #[error("language packs differ: {0} issue(s)")]
    ParityMismatch(usize),
}

/// Convenience result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
