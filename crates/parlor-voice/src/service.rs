use crate::config::LiveKitConfig;
use crate::details::ConnectionDetails;
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use rand::Rng;
use std::time::Duration;

/// Display name given to every issued participant.
const PARTICIPANT_NAME: &str = "user";

/// Issues LiveKit join credentials locally.
#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        !self.config.url.is_empty()
    }

    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
        participant_name: &str,
    ) -> Result<String, VoiceError> {
        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_name(participant_name)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(VoiceError::LiveKit)
    }

    /// Mints credentials for a fresh room with a random participant identity.
    pub fn issue_connection_details(&self) -> Result<ConnectionDetails, VoiceError> {
        if let Some(name) = self.config.missing_setting() {
            return Err(VoiceError::Config(format!("{} is not defined", name)));
        }

        let mut rng = rand::thread_rng();
        let room_name = format!("voice_assistant_room_{}", rng.gen_range(0..10_000));
        let identity = format!("voice_assistant_user_{}", rng.gen_range(0..10_000));
        let participant_token =
            self.generate_join_token(&room_name, &identity, PARTICIPANT_NAME)?;

        tracing::debug!(room = %room_name, identity = %identity, "issued connection details");

        Ok(ConnectionDetails {
            server_url: self.config.url.clone(),
            room_name,
            participant_name: PARTICIPANT_NAME.to_string(),
            participant_token,
        })
    }
}
