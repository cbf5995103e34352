//! In-memory port implementations.
//!
//! `RecordingPresentation` keeps a model of what a screen would show plus a
//! log of every call; `RecordingAudio` does the same for the sound device.
//! Headless hosts render from the model, and tests assert against both.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{AudioSink, Overlay, Presentation, Track, TrackSettings};
use crate::core::{CardId, CardStatus};

/// One call made on a [`RecordingPresentation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationEvent {
    TimeRemaining(u32),
    FlipCount(u32),
    CardStatus(CardId, CardStatus),
    CardOrder(CardId, usize),
    ShowOverlay(Overlay),
    HideOverlays,
}

#[derive(Clone, Debug, Default)]
pub struct RecordingPresentation {
    time_remaining: Option<u32>,
    flip_count: Option<u32>,
    statuses: FxHashMap<CardId, CardStatus>,
    orders: FxHashMap<CardId, usize>,
    overlays: FxHashSet<Overlay>,
    events: Vec<PresentationEvent>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last countdown value shown.
    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    /// Last flip count shown.
    #[must_use]
    pub fn flip_count(&self) -> Option<u32> {
        self.flip_count
    }

    /// Status shown for a card. Cards never touched read as hidden.
    #[must_use]
    pub fn card_status(&self, card: CardId) -> CardStatus {
        self.statuses.get(&card).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn card_order(&self, card: CardId) -> Option<usize> {
        self.orders.get(&card).copied()
    }

    #[must_use]
    pub fn is_overlay_visible(&self, overlay: Overlay) -> bool {
        self.overlays.contains(&overlay)
    }

    #[must_use]
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// How many times an overlay was revealed.
    #[must_use]
    pub fn overlay_count(&self, overlay: Overlay) -> usize {
        self.events
            .iter()
            .filter(|e| **e == PresentationEvent::ShowOverlay(overlay))
            .count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Presentation for RecordingPresentation {
    fn show_time_remaining(&mut self, secs: u32) {
        self.time_remaining = Some(secs);
        self.events.push(PresentationEvent::TimeRemaining(secs));
    }

    fn show_flip_count(&mut self, flips: u32) {
        self.flip_count = Some(flips);
        self.events.push(PresentationEvent::FlipCount(flips));
    }

    fn set_card_status(&mut self, card: CardId, status: CardStatus) {
        self.statuses.insert(card, status);
        self.events.push(PresentationEvent::CardStatus(card, status));
    }

    fn set_card_order(&mut self, card: CardId, order: usize) {
        self.orders.insert(card, order);
        self.events.push(PresentationEvent::CardOrder(card, order));
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        self.overlays.insert(overlay);
        self.events.push(PresentationEvent::ShowOverlay(overlay));
    }

    fn hide_overlays(&mut self) {
        self.overlays.clear();
        self.events.push(PresentationEvent::HideOverlays);
    }
}

/// One call made on a [`RecordingAudio`].
#[derive(Clone, Debug, PartialEq)]
pub enum AudioEvent {
    Configure(Track, TrackSettings),
    Play(Track),
    Pause(Track),
    Rewind(Track),
}

#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    settings: FxHashMap<Track, TrackSettings>,
    playing: FxHashSet<Track>,
    events: Vec<AudioEvent>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn settings(&self, track: Track) -> Option<&TrackSettings> {
        self.settings.get(&track)
    }

    /// Whether a track was played and not paused since.
    ///
    /// One-shot cues stay "playing" here; only the music is ever paused.
    #[must_use]
    pub fn is_playing(&self, track: Track) -> bool {
        self.playing.contains(&track)
    }

    /// How many times a track was started.
    #[must_use]
    pub fn play_count(&self, track: Track) -> usize {
        self.events
            .iter()
            .filter(|e| **e == AudioEvent::Play(track))
            .count()
    }

    #[must_use]
    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl AudioSink for RecordingAudio {
    fn configure(&mut self, track: Track, settings: TrackSettings) {
        self.settings.insert(track, settings.clone());
        self.events.push(AudioEvent::Configure(track, settings));
    }

    fn play(&mut self, track: Track) {
        self.playing.insert(track);
        self.events.push(AudioEvent::Play(track));
    }

    fn pause(&mut self, track: Track) {
        self.playing.remove(&track);
        self.events.push(AudioEvent::Pause(track));
    }

    fn rewind(&mut self, track: Track) {
        self.events.push(AudioEvent::Rewind(track));
    }
}
