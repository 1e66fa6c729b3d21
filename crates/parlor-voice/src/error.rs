use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("LiveKit API error: {0}")]
    LiveKit(#[from] livekit_api::access_token::AccessTokenError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Connection details request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection details endpoint returned {status}: {message}")]
    Upstream { status: u16, message: String },
}
