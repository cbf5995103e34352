//! Terminal host for the memory game.
//!
//! Reads commands from stdin: a slot number flips the card shown there,
//! `s` starts (or restarts) a game, `q` quits. A ticker thread and the input
//! thread feed one channel, so the controller only ever sees one event at a
//! time.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use memory_match::core::{CardId, CardStatus, Deck, GameConfig};
use memory_match::game::{FlipOutcome, MatchGame};
use memory_match::ports::{AudioSink, Overlay, Presentation, Track, TrackSettings};
use memory_match::Phase;

const GRID_COLUMNS: usize = 4;
const HOST_TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "memory-match", about = "Flip cards, find pairs, beat the clock")]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds on the countdown
    #[arg(long)]
    time: Option<u32>,

    /// Shuffle seed, for replaying a board
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Screen state mirrored from presentation calls; drawn by `render`.
#[derive(Default)]
struct TerminalScreen {
    time_remaining: u32,
    flips: u32,
    overlay: Option<Overlay>,
    dirty: bool,
}

impl Presentation for TerminalScreen {
    fn show_time_remaining(&mut self, secs: u32) {
        self.time_remaining = secs;
        self.dirty = true;
    }

    fn show_flip_count(&mut self, flips: u32) {
        self.flips = flips;
        self.dirty = true;
    }

    fn set_card_status(&mut self, _card: CardId, _status: CardStatus) {
        self.dirty = true;
    }

    fn set_card_order(&mut self, _card: CardId, _order: usize) {
        self.dirty = true;
    }

    fn show_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
        self.dirty = true;
    }

    fn hide_overlays(&mut self) {
        self.overlay = None;
        self.dirty = true;
    }
}

/// No sound device in a terminal: cues go to the log.
struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn configure(&mut self, track: Track, settings: TrackSettings) {
        tracing::debug!(%track, source = %settings.source, volume = settings.volume, looping = settings.looping, "configure");
    }

    fn play(&mut self, track: Track) {
        tracing::info!(%track, "play");
    }

    fn pause(&mut self, track: Track) {
        tracing::info!(%track, "pause");
    }

    fn rewind(&mut self, track: Track) {
        tracing::debug!(%track, "rewind");
    }
}

type TerminalGame = MatchGame<TerminalScreen, LoggedAudio>;

enum HostEvent {
    Line(String),
    Tick,
    InputClosed,
}

enum Command {
    Start,
    Flip(usize),
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(match line {
        "s" | "start" => Command::Start,
        "q" | "quit" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(slot) if slot > 0 => Command::Flip(slot - 1),
            _ => Command::Unknown,
        },
    })
}

fn render(game: &mut TerminalGame, out: &mut impl Write) -> io::Result<()> {
    let screen = game.presentation();
    if !screen.dirty {
        return Ok(());
    }

    match screen.overlay {
        Some(Overlay::Start) => writeln!(out, "\n  Click to Start  (type `s`)")?,
        Some(Overlay::Victory) => writeln!(out, "\n  VICTORY!  (type `s` to play again)")?,
        Some(Overlay::GameOver) => writeln!(out, "\n  GAME OVER  (type `s` to try again)")?,
        None => {}
    }

    if game.phase() != Phase::Idle {
        writeln!(out, "\n  Time {:>3}   Flips {:>3}", screen.time_remaining, screen.flips)?;
        for (slot, card) in game.cards_in_visual_order().into_iter().enumerate() {
            let label = match card.status {
                CardStatus::Hidden => format!("{:>2}", slot + 1),
                CardStatus::FaceUp | CardStatus::Matched => {
                    let face = card.face.as_str();
                    face.split('.').next().unwrap_or(face).to_string()
                }
            };
            let cell = match card.status {
                CardStatus::Matched => format!("*{label:^8}*"),
                _ => format!("[{label:^8}]"),
            };
            write!(out, " {cell}")?;
            if (slot + 1) % GRID_COLUMNS == 0 {
                writeln!(out)?;
            }
        }
    }
    out.flush()?;

    game.presentation_mut().dirty = false;
    Ok(())
}

fn spawn_input(tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(HostEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(HostEvent::InputClosed);
    });
}

fn spawn_ticker(tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || loop {
        thread::sleep(HOST_TICK);
        if tx.send(HostEvent::Tick).is_err() {
            return;
        }
    });
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(time) = cli.time {
        config.total_time_secs = time;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    // Each face image appears twice on the board.
    let deck = Deck::from_image_paths(config.faces.iter().flat_map(|f| [f, f]))
        .context("failed to build deck")?;
    let mut game = MatchGame::new(config, deck, TerminalScreen::default(), LoggedAudio)
        .context("failed to create game")?;
    tracing::info!(seed = game.seed(), "ready");

    game.presentation_mut().show_overlay(Overlay::Start);

    let (tx, rx) = mpsc::channel();
    spawn_input(tx.clone());
    spawn_ticker(tx);

    let mut stdout = io::stdout();
    render(&mut game, &mut stdout)?;

    let mut last = Instant::now();
    for event in rx {
        let now = Instant::now();
        game.advance(now - last);
        last = now;

        match event {
            HostEvent::Tick => {}
            HostEvent::InputClosed => break,
            HostEvent::Line(line) => match parse_command(&line) {
                None => {}
                Some(Command::Quit) => break,
                Some(Command::Start) => {
                    if let Err(e) = game.start_game() {
                        tracing::warn!("{e}");
                    }
                }
                Some(Command::Flip(slot)) => match game.card_at_slot(slot) {
                    Some(card) => {
                        if let FlipOutcome::Rejected(reason) = game.flip_card(card) {
                            tracing::debug!(?reason, slot, "click ignored");
                        }
                    }
                    None => writeln!(stdout, "  no card in slot {}", slot + 1)?,
                },
                Some(Command::Unknown) => {
                    writeln!(stdout, "  commands: <slot number>, s (start), q (quit)")?
                }
            },
        }

        render(&mut game, &mut stdout)?;
    }

    Ok(())
}
