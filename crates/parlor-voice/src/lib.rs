//! Voice session credentials for the Parlor widget.
//!
//! The widget's session panel needs LiveKit connection details before it can
//! join a room. They come from one of two places: tokens minted locally with
//! the deployment's LiveKit API key ([`VoiceService`]), or an external issuer
//! fetched over HTTP ([`RemoteConnectionDetails`]). Either way a failure is an
//! ordinary [`VoiceError`] the caller reports and may retry.

pub mod config;
pub mod details;
pub mod error;
pub mod remote;
pub mod service;

pub use config::LiveKitConfig;
pub use details::ConnectionDetails;
pub use error::VoiceError;
pub use remote::RemoteConnectionDetails;
pub use service::VoiceService;

/// Where connection details come from.
#[derive(Debug)]
pub enum ConnectionSource {
    Local(VoiceService),
    Remote(RemoteConnectionDetails),
}

impl ConnectionSource {
    pub async fn connection_details(&self) -> Result<ConnectionDetails, VoiceError> {
        match self {
            Self::Local(service) => service.issue_connection_details(),
            Self::Remote(remote) => remote.fetch().await,
        }
    }
}
