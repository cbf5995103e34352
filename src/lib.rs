//! # memory-match
//!
//! A memory/matching card game engine: flip two cards, keep matching pairs
//! face-up, clear the board before the countdown runs out.
//!
//! ## Design Principles
//!
//! 1. **Headless core**: The controller never touches a screen or a speaker.
//!    Display and audio are injected as [`ports::Presentation`] and
//!    [`ports::AudioSink`].
//!
//! 2. **Virtual time**: Delays and the countdown live on a
//!    [`timer::TimerQueue`]. Hosts advance it with wall-clock time, tests
//!    advance it deterministically.
//!
//! 3. **Identity over position**: Shuffling changes where a card is drawn,
//!    never which card a click refers to.
//!
//! ## Modules
//!
//! - `core`: Cards, configuration, RNG, session state, errors
//! - `ports`: Presentation and audio traits, recording implementations
//! - `sound`: Sound cues over an audio sink
//! - `timer`: One-shot and repeating tasks with cancellation
//! - `game`: The flip/match/countdown controller

pub mod core;
pub mod game;
pub mod ports;
pub mod sound;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardStatus, Deck, FaceValue,
    GameConfig, AudioConfig,
    GameError, Result,
    GameRng, Phase, Session,
};

pub use crate::game::{FlipOutcome, FlipRejection, MatchGame};

pub use crate::ports::{
    AudioSink, Overlay, Presentation, Track, TrackSettings,
    RecordingAudio, RecordingPresentation,
};

pub use crate::sound::SoundPlayer;
pub use crate::timer::{TimerId, TimerQueue};
