use thiserror::Error;

/// Failure to turn a token back into a configuration.
///
/// Never escapes [`crate::codec::decode`]; callers that need the reason use
/// [`crate::codec::try_decode`].
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("token is not valid percent-encoded UTF-8: {0}")]
    Percent(#[from] std::str::Utf8Error),

    #[error("token is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("widget is still loading")]
    NotReady,
}

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {0:?} must use http or https")]
    UnsupportedScheme(String),
}
