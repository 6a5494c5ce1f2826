//! Reward content providers.

use super::session::SessionId;
use crate::core::{QuestConfig, DEFAULT_REWARD_MESSAGE};

/// Supplies the reward message at a session's first successful claim.
///
/// Called at most once per successful claim; the controller stores the
/// result so later claims return the same text without asking again.
pub trait RewardContentProvider: Send + Sync {
    fn message(&self, session_id: &SessionId) -> String;
}

/// Hands every session the same configured message.
#[derive(Clone, Debug)]
pub struct StaticReward {
    message: String,
}

impl StaticReward {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &QuestConfig) -> Self {
        Self::new(config.reward_message.clone())
    }
}

impl Default for StaticReward {
    fn default() -> Self {
        Self::new(DEFAULT_REWARD_MESSAGE)
    }
}

impl RewardContentProvider for StaticReward {
    fn message(&self, _session_id: &SessionId) -> String {
        self.message.clone()
    }
}

impl<F> RewardContentProvider for F
where
    F: Fn(&SessionId) -> String + Send + Sync,
{
    fn message(&self, session_id: &SessionId) -> String {
        self(session_id)
    }
}
