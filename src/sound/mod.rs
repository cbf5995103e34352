//! Sound cues.
//!
//! `SoundPlayer` owns an [`AudioSink`] and knows which track goes with which
//! game event. Victory and game-over cut the background music first, so the
//! closing cue always plays over silence.

use tracing::debug;

pub use crate::ports::{AudioSink, Track, TrackSettings};
use crate::core::AudioConfig;

pub struct SoundPlayer<A> {
    sink: A,
}

impl<A: AudioSink> SoundPlayer<A> {
    /// Configure every track on the sink and wrap it.
    ///
    /// The background music gets the configured volume and loop flag; cues
    /// play once at full volume.
    pub fn new(mut sink: A, config: &AudioConfig) -> Self {
        for track in Track::ALL {
            let settings = match track {
                Track::BackgroundMusic => TrackSettings {
                    source: config.tracks.get(track).to_string(),
                    volume: config.music_volume,
                    looping: config.music_loop,
                },
                _ => TrackSettings {
                    source: config.tracks.get(track).to_string(),
                    volume: 1.0,
                    looping: false,
                },
            };
            sink.configure(track, settings);
        }
        Self { sink }
    }

    pub fn start_music(&mut self) {
        self.sink.play(Track::BackgroundMusic);
    }

    /// Pause the music and rewind it, so the next start plays from the top.
    pub fn stop_music(&mut self) {
        self.sink.pause(Track::BackgroundMusic);
        self.sink.rewind(Track::BackgroundMusic);
    }

    pub fn flip(&mut self) {
        self.cue(Track::Flip);
    }

    pub fn match_cue(&mut self) {
        self.cue(Track::Match);
    }

    pub fn victory(&mut self) {
        self.stop_music();
        self.cue(Track::Victory);
    }

    pub fn game_over(&mut self) {
        self.stop_music();
        self.cue(Track::GameOver);
    }

    fn cue(&mut self, track: Track) {
        debug!(%track, "cue");
        self.sink.play(track);
    }

    #[must_use]
    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }
}
