//! Flip, match and countdown logic.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::{FlipOutcome, FlipRejection, TimerEvent};
use crate::core::{Card, CardId, CardStatus, Deck, GameConfig, GameError, GameRng, Phase, Result, Session};
use crate::ports::{AudioSink, Overlay, Presentation};
use crate::sound::SoundPlayer;
use crate::timer::{TimerId, TimerQueue};

/// Memory game controller.
///
/// ## Lifecycle
///
/// ```text
/// Idle --start_game--> Shuffling --start delay--> Active --+--> Victory
///                          ^                               |
///                          |                               +--> TimeExpired
///                          +---------- start_game ---------+
/// ```
///
/// ## Usage
///
/// ```
/// use std::time::Duration;
/// use memory_match::core::{CardId, Deck, GameConfig};
/// use memory_match::game::{FlipOutcome, MatchGame};
/// use memory_match::ports::{RecordingAudio, RecordingPresentation};
///
/// let config = GameConfig::new(10).with_seed(1);
/// let deck = Deck::pairs(["A"]).unwrap();
/// let mut game = MatchGame::new(config, deck, RecordingPresentation::new(), RecordingAudio::new()).unwrap();
///
/// game.start_game().unwrap();
/// game.advance(Duration::from_millis(500));
///
/// assert_eq!(game.flip_card(CardId::new(0)), FlipOutcome::Pending(CardId::new(0)));
/// assert!(matches!(game.flip_card(CardId::new(1)), FlipOutcome::Victory(_)));
/// ```
pub struct MatchGame<P, A> {
    config: GameConfig,
    cards: Vec<Card>,
    /// Card ID to slot in `cards`.
    index: FxHashMap<CardId, usize>,
    session: Session,
    rng: GameRng,
    timers: TimerQueue<TimerEvent>,
    start_handle: Option<TimerId>,
    countdown_handle: Option<TimerId>,
    mismatch_handle: Option<TimerId>,
    presentation: P,
    sound: SoundPlayer<A>,
}

impl<P: Presentation, A: AudioSink> MatchGame<P, A> {
    /// Build a controller over a fixed card collection.
    ///
    /// The session stays `Idle` until `start_game`.
    pub fn new(config: GameConfig, deck: Deck, presentation: P, audio: A) -> Result<Self> {
        config.validate()?;
        if deck.is_empty() {
            return Err(GameError::EmptyDeck);
        }

        let cards = deck.into_cards();
        let index = cards.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        let rng = GameRng::from_seed_or_entropy(config.seed);
        let sound = SoundPlayer::new(audio, &config.audio);
        info!(
            cards = cards.len(),
            total_time = config.total_time_secs,
            seed = rng.seed(),
            "game created"
        );

        Ok(Self {
            session: Session::new(config.total_time_secs),
            config,
            cards,
            index,
            rng,
            timers: TimerQueue::new(),
            start_handle: None,
            countdown_handle: None,
            mismatch_handle: None,
            presentation,
            sound,
        })
    }

    // === Session control ===

    /// Start (or restart) a session.
    ///
    /// Resets the counters, hides every card and, after the start delay,
    /// starts the music, shuffles, and starts the countdown. Rejected while a
    /// previous start is still waiting on its delay.
    pub fn start_game(&mut self) -> Result<()> {
        if self.session.phase == Phase::Shuffling {
            warn!(generation = self.session.generation, "start ignored, already shuffling");
            return Err(GameError::AlreadyStarting);
        }

        if self.session.phase == Phase::Active {
            self.sound.stop_music();
        }
        self.cancel_all_timers();
        self.session.reset();
        self.session.phase = Phase::Shuffling;

        self.presentation.hide_overlays();
        self.hide_cards();
        self.presentation.show_time_remaining(self.session.time_remaining);
        self.presentation.show_flip_count(self.session.total_clicks);

        let generation = self.session.generation;
        self.start_handle = Some(
            self.timers
                .schedule_once(self.config.start_delay(), TimerEvent::StartDelay { generation }),
        );
        info!(generation, total_time = self.session.total_time, "game starting");
        Ok(())
    }

    /// Move time forward, firing due timers in deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some((id, event)) = self.timers.pop_due(until) {
            self.handle_timer(id, event);
        }
    }

    fn handle_timer(&mut self, id: TimerId, event: TimerEvent) {
        match event {
            TimerEvent::StartDelay { generation } => {
                if self.start_handle == Some(id) {
                    self.start_handle = None;
                }
                if generation == self.session.generation && self.session.phase == Phase::Shuffling {
                    self.begin_play();
                }
            }
            TimerEvent::CountdownTick { generation } => {
                if generation == self.session.generation && self.session.phase == Phase::Active {
                    self.tick();
                }
            }
            TimerEvent::HideMismatch { generation, cards } => {
                if self.mismatch_handle == Some(id) {
                    self.mismatch_handle = None;
                }
                if generation == self.session.generation && self.session.phase == Phase::Active {
                    self.hide_mismatch(cards);
                }
            }
        }
    }

    fn begin_play(&mut self) {
        self.sound.start_music();
        self.shuffle_cards();
        self.start_countdown();
        self.session.busy = false;
        self.session.phase = Phase::Active;
        debug!(generation = self.session.generation, "board ready");
    }

    fn hide_cards(&mut self) {
        for card in &mut self.cards {
            card.status = CardStatus::Hidden;
            self.presentation.set_card_status(card.id, CardStatus::Hidden);
        }
    }

    /// Fisher–Yates over the cards' visual order.
    ///
    /// Cards keep their identity and their slot in the collection; only the
    /// `order` values move, so the grid looks reshuffled while every click
    /// binding still refers to the same card.
    pub fn shuffle_cards(&mut self) {
        for i in (1..self.cards.len()).rev() {
            let r = self.rng.gen_index_inclusive(i);
            let (order_i, order_r) = (self.cards[i].order, self.cards[r].order);
            self.cards[i].order = order_r;
            self.cards[r].order = order_i;
        }
        for card in &self.cards {
            self.presentation.set_card_order(card.id, card.order);
        }
        debug!(cards = self.cards.len(), "shuffled");
    }

    /// Start the repeating countdown, replacing any running one.
    pub fn start_countdown(&mut self) {
        self.stop_countdown();
        let generation = self.session.generation;
        self.countdown_handle = Some(
            self.timers
                .schedule_repeating(self.config.tick_interval(), TimerEvent::CountdownTick { generation }),
        );
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown_handle.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_mismatch(&mut self) {
        if let Some(handle) = self.mismatch_handle.take() {
            self.timers.cancel(handle);
        }
    }

    fn cancel_all_timers(&mut self) {
        if let Some(handle) = self.start_handle.take() {
            self.timers.cancel(handle);
        }
        self.stop_countdown();
        self.cancel_mismatch();
    }

    fn tick(&mut self) {
        let remaining = self.session.tick();
        self.presentation.show_time_remaining(remaining);
        debug!(remaining, "tick");
        if remaining == 0 {
            self.game_over();
        }
    }

    /// End the session as lost. Does nothing if it already ended.
    pub fn game_over(&mut self) {
        if self.session.phase.is_terminal() {
            return;
        }
        self.stop_countdown();
        self.cancel_mismatch();
        self.session.phase = Phase::TimeExpired;
        self.sound.game_over();
        self.presentation.show_overlay(Overlay::GameOver);
        info!(
            clicks = self.session.total_clicks,
            matched = self.session.matched_count(),
            "game over"
        );
    }

    /// End the session as won. Does nothing if it already ended.
    pub fn victory(&mut self) {
        if self.session.phase.is_terminal() {
            return;
        }
        self.stop_countdown();
        self.cancel_mismatch();
        self.session.phase = Phase::Victory;
        self.sound.victory();
        self.presentation.show_overlay(Overlay::Victory);
        info!(
            clicks = self.session.total_clicks,
            time_remaining = self.session.time_remaining,
            "victory"
        );
    }

    // === Flipping ===

    fn check_flip(&self, card: CardId) -> std::result::Result<usize, FlipRejection> {
        let idx = *self.index.get(&card).ok_or(FlipRejection::UnknownCard)?;
        if self.session.busy {
            return Err(FlipRejection::Busy);
        }
        if self.session.phase != Phase::Active {
            return Err(FlipRejection::NotActive);
        }
        if self.session.is_matched(card) {
            return Err(FlipRejection::AlreadyMatched);
        }
        if self.session.card_to_check == Some(card) {
            return Err(FlipRejection::AlreadyPending);
        }
        if self.cards[idx].status == CardStatus::FaceUp {
            return Err(FlipRejection::FaceUp);
        }
        Ok(idx)
    }

    /// Whether a click on `card` would be accepted right now.
    #[must_use]
    pub fn can_flip_card(&self, card: CardId) -> bool {
        self.check_flip(card).is_ok()
    }

    /// Handle a click on `card`.
    ///
    /// Rejected clicks have no visible or audible effect.
    pub fn flip_card(&mut self, card: CardId) -> FlipOutcome {
        let idx = match self.check_flip(card) {
            Ok(idx) => idx,
            Err(reason) => {
                debug!(%card, ?reason, "flip rejected");
                return FlipOutcome::Rejected(reason);
            }
        };

        self.sound.flip();
        self.session.total_clicks += 1;
        self.presentation.show_flip_count(self.session.total_clicks);
        self.set_status(idx, CardStatus::FaceUp);
        debug!(%card, clicks = self.session.total_clicks, "flipped");

        match self.session.card_to_check {
            None => {
                self.session.card_to_check = Some(card);
                FlipOutcome::Pending(card)
            }
            Some(pending) => self.check_for_card_match(self.index[&pending], idx),
        }
    }

    fn check_for_card_match(&mut self, pending_idx: usize, idx: usize) -> FlipOutcome {
        let pair = [self.cards[pending_idx].id, self.cards[idx].id];
        self.session.card_to_check = None;

        if self.cards[idx].matches(&self.cards[pending_idx]) {
            self.card_match(pending_idx, idx, pair)
        } else {
            self.card_mismatch(pair)
        }
    }

    fn card_match(&mut self, pending_idx: usize, idx: usize, pair: [CardId; 2]) -> FlipOutcome {
        self.set_status(pending_idx, CardStatus::Matched);
        self.set_status(idx, CardStatus::Matched);
        self.session.matched.extend(pair);
        self.sound.match_cue();
        debug!(face = %self.cards[idx].face, matched = self.session.matched_count(), "match");

        if self.session.matched_count() == self.cards.len() {
            self.victory();
            FlipOutcome::Victory(pair)
        } else {
            FlipOutcome::Matched(pair)
        }
    }

    fn card_mismatch(&mut self, pair: [CardId; 2]) -> FlipOutcome {
        self.session.busy = true;
        let generation = self.session.generation;
        self.mismatch_handle = Some(self.timers.schedule_once(
            self.config.mismatch_delay(),
            TimerEvent::HideMismatch { generation, cards: pair },
        ));
        debug!(first = %pair[0], second = %pair[1], "mismatch");
        FlipOutcome::Mismatched(pair)
    }

    fn hide_mismatch(&mut self, pair: [CardId; 2]) {
        for card in pair {
            if let Some(&idx) = self.index.get(&card) {
                if self.cards[idx].status == CardStatus::FaceUp {
                    self.set_status(idx, CardStatus::Hidden);
                }
            }
        }
        self.session.busy = false;
    }

    fn set_status(&mut self, idx: usize, status: CardStatus) {
        let card = &mut self.cards[idx];
        card.status = status;
        self.presentation.set_card_status(card.id, status);
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.session.time_remaining
    }

    #[must_use]
    pub fn total_clicks(&self) -> u32 {
        self.session.total_clicks
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.session.matched_count()
    }

    #[must_use]
    pub fn pending_card(&self) -> Option<CardId> {
        self.session.card_to_check
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.session.busy
    }

    /// Seed of the shuffle RNG, for reproducing a game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    /// Cards in collection order (never changes).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards in the order they appear on screen.
    #[must_use]
    pub fn cards_in_visual_order(&self) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().collect();
        cards.sort_by_key(|c| c.order);
        cards
    }

    /// The card shown in visual slot `order`, if any.
    #[must_use]
    pub fn card_at_slot(&self, order: usize) -> Option<CardId> {
        self.cards.iter().find(|c| c.order == order).map(|c| c.id)
    }

    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        self.sound.sink()
    }

    pub fn audio_mut(&mut self) -> &mut A {
        self.sound.sink_mut()
    }
}
