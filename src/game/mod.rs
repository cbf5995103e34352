//! The game controller.
//!
//! [`MatchGame`] owns the cards and the session, and drives the two ports.
//! Hosts call `start_game` when an overlay is dismissed, `flip_card` on
//! every click, and `advance` as wall-clock time passes.

mod controller;

pub use controller::MatchGame;

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// What a click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Click ignored; nothing was shown or played.
    Rejected(FlipRejection),
    /// Card turned face-up and is waiting for a partner.
    Pending(CardId),
    /// The pair matched. `[pending, flipped]`.
    Matched([CardId; 2]),
    /// The pair did not match and will be hidden after the mismatch delay.
    Mismatched([CardId; 2]),
    /// The pair matched and cleared the board.
    Victory([CardId; 2]),
}

impl FlipOutcome {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        !matches!(self, FlipOutcome::Rejected(_))
    }
}

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipRejection {
    /// No card with that ID on the board.
    UnknownCard,
    /// A shuffle or mismatch transition is in progress.
    Busy,
    /// No session is running (never started, or already won or lost).
    NotActive,
    AlreadyMatched,
    /// The card is the one already waiting for a partner.
    AlreadyPending,
    /// The card is still face-up from an unresolved flip.
    FaceUp,
}

/// Deferred work scheduled on the controller's timer queue.
///
/// Each event carries the session generation it was scheduled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    StartDelay { generation: u64 },
    CountdownTick { generation: u64 },
    HideMismatch { generation: u64, cards: [CardId; 2] },
}
