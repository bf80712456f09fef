use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `tasksense`.
///
/// Library callers can match on these to decide recovery strategy; the
/// suggestion operations themselves never surface errors; they degrade to
/// their documented fallback values and report through the diagnostics sink.
#[derive(Debug, Error)]
pub enum EngineError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Model provider ──────────────────────────────────────────────────
    #[error("provider: {0}")]
    Provider(#[from] ProviderError),

    // ── Generic fallthrough (wraps anyhow for collaborator interop) ─────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("endpoint URL {value:?} is not a valid URL: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

// ─── Provider errors ────────────────────────────────────────────────────────

/// Failure modes of a single chat-completion round trip.
///
/// `Transport` and `Status` are connectivity problems; `Decode` and
/// `EmptyReply` mean the endpoint answered with something other than the
/// documented `choices[0].message.content` shape. All four collapse to the
/// same absence signal inside the engine; the distinction only feeds
/// diagnostics.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider reply was not the expected JSON shape: {message}")]
    Decode { message: String },

    #[error("provider reply contained no usable content")]
    EmptyReply,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
