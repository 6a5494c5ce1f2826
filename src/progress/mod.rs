//! Session progression: the progress record, its store, and the state
//! machine that gates the reward behind all three games.

pub mod controller;
pub mod locks;
pub mod reward;
pub mod session;
pub mod store;

pub use controller::{ProgressionController, RewardClaim};
pub use locks::SessionLocks;
pub use reward::{RewardContentProvider, StaticReward};
pub use session::{ProgressionState, SessionId, SessionProgress};
pub use store::{InMemorySessionStore, SessionStore};
