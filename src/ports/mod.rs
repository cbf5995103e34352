//! Capability ports between the controller and its host.
//!
//! The controller only ever talks to a display and a sound device through
//! these traits. A browser host would forward them to the DOM and to audio
//! elements; the terminal host prints; tests record.
//!
//! ## Implementation Notes
//!
//! - Port methods cannot fail. A host that loses its display or audio device
//!   should log and carry on; gameplay does not depend on side effects landing.
//! - Calls arrive strictly in sequence from one thread.

pub mod recording;

pub use recording::{AudioEvent, PresentationEvent, RecordingAudio, RecordingPresentation};

use serde::{Deserialize, Serialize};

use crate::core::{CardId, CardStatus};

/// Full-screen overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overlay {
    /// "Click to start", shown before the first game.
    Start,
    Victory,
    GameOver,
}

/// Display side of the game.
pub trait Presentation {
    /// Update the countdown readout.
    fn show_time_remaining(&mut self, secs: u32);

    /// Update the flip counter readout.
    fn show_flip_count(&mut self, flips: u32);

    /// Show a card hidden, face-up, or matched.
    fn set_card_status(&mut self, card: CardId, status: CardStatus);

    /// Move a card to a visual slot. Identity is unaffected.
    fn set_card_order(&mut self, card: CardId, order: usize);

    fn show_overlay(&mut self, overlay: Overlay);

    fn hide_overlays(&mut self);
}

/// The fixed audio resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    BackgroundMusic,
    Flip,
    Match,
    Victory,
    GameOver,
}

impl Track {
    pub const ALL: [Track; 5] = [
        Track::BackgroundMusic,
        Track::Flip,
        Track::Match,
        Track::Victory,
        Track::GameOver,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Track::BackgroundMusic => "music",
            Track::Flip => "flip",
            Track::Match => "match",
            Track::Victory => "victory",
            Track::GameOver => "game-over",
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-track playback settings, applied once when the sound player is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackSettings {
    pub source: String,
    pub volume: f32,
    pub looping: bool,
}

/// Sound device side of the game.
///
/// Mirrors what an HTML audio element offers: play, pause, seek to start.
pub trait AudioSink {
    fn configure(&mut self, track: Track, settings: TrackSettings);

    /// Start playback from the current position.
    fn play(&mut self, track: Track);

    fn pause(&mut self, track: Track);

    /// Seek back to the beginning.
    fn rewind(&mut self, track: Track);
}
