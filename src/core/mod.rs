//! Core engine types: cards, configuration, RNG, session state, errors.
//!
//! Nothing in here touches a display or a sound device.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;
pub mod session;

pub use card::{Card, CardId, CardStatus, Deck, FaceValue};
pub use config::{AudioConfig, GameConfig, TrackPaths};
pub use error::{GameError, Result};
pub use rng::GameRng;
pub use session::{Phase, Session};
