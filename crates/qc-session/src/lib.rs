//! Interactive game session for Quest Chronicles.
//!
//! [`GameSession`] owns everything one play session needs: the character,
//! the quest and item datasets, a seeded RNG, and any battle in progress.
//! It interprets one line of player input per call and returns the text to
//! show, so any front end (terminal, tests) can drive it.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::GameSession;
