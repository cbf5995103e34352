//! Controller integration tests.
//!
//! These drive full sessions through the public API with recording ports
//! and virtual time.

use std::time::Duration;

use memory_match::core::{CardId, CardStatus, Deck, GameConfig, GameError, Phase};
use memory_match::game::{FlipOutcome, FlipRejection, MatchGame};
use memory_match::ports::{
    AudioEvent, Overlay, PresentationEvent, RecordingAudio, RecordingPresentation, Track,
};

type TestGame = MatchGame<RecordingPresentation, RecordingAudio>;

const SECOND: Duration = Duration::from_secs(1);

fn new_game(total_time: u32, faces: &[&str]) -> TestGame {
    let config = GameConfig::new(total_time).with_seed(7);
    let deck = Deck::pairs(faces.iter().copied()).unwrap();
    MatchGame::new(config, deck, RecordingPresentation::new(), RecordingAudio::new()).unwrap()
}

fn start(game: &mut TestGame) {
    game.start_game().unwrap();
    let delay = game.config().start_delay();
    game.advance(delay);
    assert_eq!(game.phase(), Phase::Active);
}

fn id(n: u32) -> CardId {
    CardId::new(n)
}

// =============================================================================
// Session Start
// =============================================================================

/// After start, the clock is full and no clicks are counted.
#[test]
fn test_start_resets_counters() {
    let mut game = new_game(10, &["A", "B"]);
    start(&mut game);
    game.flip_card(id(0));
    game.advance(SECOND * 3);

    game.start_game().unwrap();
    assert_eq!(game.time_remaining(), 10);
    assert_eq!(game.total_clicks(), 0);
    assert_eq!(game.pending_card(), None);
    assert_eq!(game.matched_count(), 0);
    assert_eq!(game.presentation().time_remaining(), Some(10));
    assert_eq!(game.presentation().flip_count(), Some(0));
}

/// Start hides every card, then music, shuffle, and countdown follow the delay.
#[test]
fn test_start_sequence() {
    let mut game = new_game(10, &["A", "B"]);
    game.start_game().unwrap();

    let hidden = game
        .presentation()
        .events()
        .iter()
        .filter(|e| matches!(e, PresentationEvent::CardStatus(_, CardStatus::Hidden)))
        .count();
    assert_eq!(hidden, 4);
    assert_eq!(game.audio().play_count(Track::BackgroundMusic), 0);
    assert!(!game
        .presentation()
        .events()
        .iter()
        .any(|e| matches!(e, PresentationEvent::CardOrder(..))));

    game.advance(game.config().start_delay());

    assert_eq!(game.audio().play_count(Track::BackgroundMusic), 1);
    let orders = game
        .presentation()
        .events()
        .iter()
        .filter(|e| matches!(e, PresentationEvent::CardOrder(..)))
        .count();
    assert_eq!(orders, 4);

    game.advance(SECOND);
    assert_eq!(game.time_remaining(), 9);
}

/// A second start during the shuffle delay is rejected and changes nothing.
#[test]
fn test_double_start_is_rejected() {
    let mut game = new_game(10, &["A"]);
    game.start_game().unwrap();
    let events_before = game.presentation().events().len();

    assert!(matches!(game.start_game(), Err(GameError::AlreadyStarting)));
    assert_eq!(game.presentation().events().len(), events_before);

    game.advance(game.config().start_delay());
    assert_eq!(game.audio().play_count(Track::BackgroundMusic), 1);
}

/// Clicks before the first start do nothing.
#[test]
fn test_flip_before_start_is_ignored() {
    let mut game = new_game(10, &["A"]);
    assert_eq!(game.flip_card(id(0)), FlipOutcome::Rejected(FlipRejection::NotActive));
    assert!(game.presentation().events().is_empty());
    assert_eq!(game.audio().play_count(Track::Flip), 0);
}

// =============================================================================
// Matching
// =============================================================================

/// Equal faces flipped in a row are both matched; the matched count grows by two.
#[test]
fn test_equal_faces_match() {
    let mut game = new_game(10, &["A", "B", "C"]);
    start(&mut game);

    game.flip_card(id(2));
    let before = game.matched_count();
    assert_eq!(game.flip_card(id(3)), FlipOutcome::Matched([id(2), id(3)]));

    assert_eq!(game.matched_count(), before + 2);
    assert_eq!(game.pending_card(), None);
    assert_eq!(game.card(id(2)).unwrap().status, CardStatus::Matched);
    assert_eq!(game.presentation().card_status(id(3)), CardStatus::Matched);
    assert_eq!(game.audio().play_count(Track::Match), 1);
}

/// Unequal faces are never added to the matched set.
#[test]
fn test_unequal_faces_never_match() {
    let mut game = new_game(10, &["A", "B"]);
    start(&mut game);

    assert_eq!(game.flip_card(id(1)), FlipOutcome::Pending(id(1)));
    assert_eq!(game.flip_card(id(3)), FlipOutcome::Mismatched([id(1), id(3)]));

    assert_eq!(game.matched_count(), 0);
    assert!(!game.session().is_matched(id(1)));
    assert!(!game.session().is_matched(id(3)));
    assert_eq!(game.audio().play_count(Track::Match), 0);
}

/// After a mismatch both cards flip back and the pair can be retried.
#[test]
fn test_mismatch_then_continue() {
    let mut game = new_game(10, &["A", "B"]);
    start(&mut game);

    game.flip_card(id(0));
    game.flip_card(id(2));
    game.advance(game.config().mismatch_delay());

    assert!(game.cards().iter().all(|c| c.status == CardStatus::Hidden));
    assert_eq!(game.flip_card(id(0)), FlipOutcome::Pending(id(0)));
    assert_eq!(game.flip_card(id(1)), FlipOutcome::Matched([id(0), id(1)]));
    assert_eq!(game.total_clicks(), 4);
}

/// A matched card stays matched and is never flippable again.
#[test]
fn test_matched_card_not_flippable() {
    let mut game = new_game(10, &["A", "B"]);
    start(&mut game);
    game.flip_card(id(0));
    game.flip_card(id(1));

    assert!(!game.can_flip_card(id(0)));
    assert!(!game.can_flip_card(id(1)));
    assert_eq!(game.flip_card(id(0)), FlipOutcome::Rejected(FlipRejection::AlreadyMatched));
    assert_eq!(game.total_clicks(), 2);
}

// =============================================================================
// Scenarios
// =============================================================================

/// Time 10, cards A,A,B,B: two matches clear the board and stop the clock.
#[test]
fn test_scenario_victory() {
    let mut game = new_game(10, &["A", "B"]);
    start(&mut game);

    assert_eq!(game.flip_card(id(0)), FlipOutcome::Pending(id(0)));
    assert_eq!(game.pending_card(), Some(id(0)));

    assert_eq!(game.flip_card(id(1)), FlipOutcome::Matched([id(0), id(1)]));
    assert_eq!(game.matched_count(), 2);
    assert_eq!(game.pending_card(), None);

    assert_eq!(game.flip_card(id(2)), FlipOutcome::Pending(id(2)));
    assert_eq!(game.flip_card(id(3)), FlipOutcome::Victory([id(2), id(3)]));

    assert_eq!(game.phase(), Phase::Victory);
    assert_eq!(game.matched_count(), 4);
    assert!(game.presentation().is_overlay_visible(Overlay::Victory));
    assert_eq!(game.audio().play_count(Track::Victory), 1);
    assert!(!game.audio().is_playing(Track::BackgroundMusic));

    let time_left = game.time_remaining();
    game.advance(SECOND * 30);
    assert_eq!(game.time_remaining(), time_left);
    assert_eq!(game.phase(), Phase::Victory);
    assert_eq!(game.presentation().overlay_count(Overlay::GameOver), 0);
    assert_eq!(game.presentation().overlay_count(Overlay::Victory), 1);
}

/// Time 1, no flips: one tick ends the game.
#[test]
fn test_scenario_time_expires() {
    let mut game = new_game(1, &["A", "B"]);
    start(&mut game);

    game.advance(SECOND);

    assert_eq!(game.time_remaining(), 0);
    assert_eq!(game.phase(), Phase::TimeExpired);
    assert!(game.presentation().is_overlay_visible(Overlay::GameOver));
    assert_eq!(game.audio().play_count(Track::GameOver), 1);

    game.advance(SECOND * 5);
    assert_eq!(game.presentation().overlay_count(Overlay::GameOver), 1);
    assert_eq!(game.audio().play_count(Track::GameOver), 1);
}

/// Game over stops the music before its cue.
#[test]
fn test_game_over_audio_order() {
    let mut game = new_game(1, &["A"]);
    start(&mut game);
    game.audio_mut().clear_events();

    game.advance(SECOND);

    assert_eq!(
        game.audio().events(),
        &[
            AudioEvent::Pause(Track::BackgroundMusic),
            AudioEvent::Rewind(Track::BackgroundMusic),
            AudioEvent::Play(Track::GameOver),
        ]
    );
}

/// The countdown shows every second and never goes negative.
#[test]
fn test_countdown_display_sequence() {
    let mut game = new_game(3, &["A"]);
    start(&mut game);
    game.presentation_mut().clear_events();

    game.advance(SECOND * 10);

    let shown: Vec<u32> = game
        .presentation()
        .events()
        .iter()
        .filter_map(|e| match e {
            PresentationEvent::TimeRemaining(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(shown, vec![2, 1, 0]);
}

/// Playing again after a loss gives a full clock and a fresh board.
#[test]
fn test_restart_after_game_over() {
    let mut game = new_game(1, &["A", "B"]);
    start(&mut game);
    game.flip_card(id(0));
    game.advance(SECOND);
    assert_eq!(game.phase(), Phase::TimeExpired);

    start(&mut game);
    assert_eq!(game.time_remaining(), 1);
    assert!(game.cards().iter().all(|c| c.is_hidden()));
    assert!(!game.presentation().is_overlay_visible(Overlay::GameOver));
    assert_eq!(game.flip_card(id(0)), FlipOutcome::Pending(id(0)));
}

// =============================================================================
// Decks and Config
// =============================================================================

/// Faces taken from image paths match by file name.
#[test]
fn test_image_path_deck() {
    let deck = Deck::from_image_paths([
        "Assets/Images/Bat.png",
        "Assets/Images/Ghost.png",
        "img/Bat.png",
        "Assets/Images/Ghost.png",
    ])
    .unwrap();
    let config = GameConfig::new(10).with_seed(1);
    let mut game =
        MatchGame::new(config, deck, RecordingPresentation::new(), RecordingAudio::new()).unwrap();
    start(&mut game);

    game.flip_card(id(0));
    assert_eq!(game.flip_card(id(2)), FlipOutcome::Matched([id(0), id(2)]));
}

/// A JSON config drives timing.
#[test]
fn test_json_config_timing() {
    let config = GameConfig::from_json(
        r#"{ "total_time_secs": 5, "start_delay_ms": 0, "mismatch_delay_ms": 200, "seed": 3 }"#,
    )
    .unwrap();
    let deck = Deck::pairs(["A", "B"]).unwrap();
    let mut game =
        MatchGame::new(config, deck, RecordingPresentation::new(), RecordingAudio::new()).unwrap();

    game.start_game().unwrap();
    game.advance(Duration::ZERO);
    assert_eq!(game.phase(), Phase::Active);

    game.flip_card(id(0));
    game.flip_card(id(2));
    game.advance(Duration::from_millis(200));
    assert!(!game.is_busy());
    assert_eq!(game.time_remaining(), 5);
}
