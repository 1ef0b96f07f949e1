//! Sound effects for the game.
//!
//! There are no sound files: every effect is a short square-wave melody rendered to signed 16-bit
//! mono samples by [`synthesize`]. With the `gui` feature enabled, [`Audio`] feeds those samples
//! to SDL2_mixer.

use strum_macros::EnumIter;

/// Sample rate used both for synthesis and for opening the audio device.
pub const AUDIO_FREQUENCY: i32 = 16_000;

/// Peak amplitude of the square wave, kept well under `i16::MAX` to leave mixing headroom.
const AMPLITUDE: i16 = i16::MAX / 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Sound {
    Waka,
    PowerPellet,
    EatGhost,
    Death,
    GameOver,
    GameWin,
}

/// A single tone: frequency in Hz (0 for a rest) and duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub frequency: u32,
    pub duration_ms: u32,
}

const fn note(frequency: u32, duration_ms: u32) -> Note {
    Note { frequency, duration_ms }
}

const WAKA: &[Note] = &[note(440, 40), note(330, 40)];
const POWER_PELLET: &[Note] = &[note(262, 60), note(330, 60), note(392, 60), note(523, 90)];
const EAT_GHOST: &[Note] = &[note(880, 50), note(1175, 50), note(1568, 80)];
const DEATH: &[Note] = &[
    note(494, 90),
    note(440, 90),
    note(392, 90),
    note(349, 90),
    note(330, 90),
    note(294, 90),
    note(262, 160),
];
// Zero-frequency notes are rests
const GAME_OVER: &[Note] = &[note(392, 180), note(0, 60), note(330, 180), note(0, 60), note(262, 360)];
const GAME_WIN: &[Note] = &[note(523, 120), note(659, 120), note(784, 120), note(1047, 300)];

impl Sound {
    /// The melody played for this effect.
    pub fn notes(self) -> &'static [Note] {
        match self {
            Sound::Waka => WAKA,
            Sound::PowerPellet => POWER_PELLET,
            Sound::EatGhost => EAT_GHOST,
            Sound::Death => DEATH,
            Sound::GameOver => GAME_OVER,
            Sound::GameWin => GAME_WIN,
        }
    }
}

/// Number of samples a note occupies at [`AUDIO_FREQUENCY`].
pub fn sample_count(note: Note) -> usize {
    (AUDIO_FREQUENCY as u64 * note.duration_ms as u64 / 1000) as usize
}

/// Renders a sound effect to mono 16-bit samples.
pub fn synthesize(sound: Sound) -> Vec<i16> {
    let total = sound.notes().iter().copied().map(sample_count).sum();
    let mut samples = Vec::with_capacity(total);

    for &note in sound.notes() {
        let count = sample_count(note);
        if note.frequency == 0 {
            samples.extend(std::iter::repeat_n(0, count));
            continue;
        }

        let period = (AUDIO_FREQUENCY as u32 / note.frequency).max(2) as usize;
        samples.extend((0..count).map(|i| if i % period < period / 2 { AMPLITUDE } else { -AMPLITUDE }));
    }

    samples
}

#[cfg(feature = "gui")]
pub use mixer_backend::Audio;

#[cfg(feature = "gui")]
mod mixer_backend {
    use std::collections::HashMap;

    use anyhow::{anyhow, Result};
    use sdl2::mixer::{self, Chunk, AUDIO_S16LSB};
    use strum::IntoEnumIterator;

    use super::{synthesize, Sound, AUDIO_FREQUENCY};

    /// Mono output; effects are synthesized as a single channel.
    const OUTPUT_CHANNELS: i32 = 1;
    const MIXING_CHANNELS: i32 = 4;
    const DEFAULT_VOLUME: u8 = 32;

    /// The audio system for the game.
    ///
    /// If audio fails to initialize, it will be disabled and all functions will silently do nothing.
    pub struct Audio {
        sounds: HashMap<Sound, Chunk>,
        state: AudioState,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum AudioState {
        Enabled { volume: u8 },
        Muted { previous_volume: u8 },
        Disabled,
    }

    impl Default for Audio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Audio {
        /// Creates a new `Audio` instance, falling back to a disabled one on failure.
        pub fn new() -> Self {
            match Self::try_new() {
                Ok(audio) => audio,
                Err(e) => {
                    tracing::warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                    Self {
                        sounds: HashMap::new(),
                        state: AudioState::Disabled,
                    }
                }
            }
        }

        fn try_new() -> Result<Self> {
            let chunk_size = {
                // 256 is the minimum for Emscripten, but in practice 1024 is much more reliable
                #[cfg(target_os = "emscripten")]
                {
                    1024
                }

                #[cfg(not(target_os = "emscripten"))]
                {
                    256
                }
            };

            mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, OUTPUT_CHANNELS, chunk_size)
                .map_err(|e| anyhow!("Failed to open audio: {}", e))?;
            mixer::allocate_channels(MIXING_CHANNELS);
            for i in 0..MIXING_CHANNELS {
                mixer::Channel(i).set_volume(DEFAULT_VOLUME as i32);
            }

            let sounds: HashMap<Sound, Chunk> = Sound::iter()
                .filter_map(|sound| match Chunk::from_raw_buffer(synthesize(sound).into_boxed_slice()) {
                    Ok(chunk) => Some((sound, chunk)),
                    Err(e) => {
                        tracing::warn!("Failed to build sound {:?}: {}", sound, e);
                        None
                    }
                })
                .collect();

            if sounds.is_empty() {
                return Err(anyhow!("No sounds could be built"));
            }

            Ok(Audio {
                sounds,
                state: AudioState::Enabled { volume: DEFAULT_VOLUME },
            })
        }

        /// Plays the provided sound effect once.
        pub fn play(&mut self, sound: Sound) {
            if !matches!(self.state, AudioState::Enabled { .. }) {
                return;
            }

            if let Some(chunk) = self.sounds.get(&sound) {
                if let Err(e) = mixer::Channel::all().play(chunk, 0) {
                    tracing::warn!("Could not play sound {:?}: {}", sound, e);
                }
            }
        }

        pub fn stop_all(&mut self) {
            if self.state != AudioState::Disabled {
                mixer::Channel::all().halt();
            }
        }

        pub fn pause_all(&mut self) {
            if self.state != AudioState::Disabled {
                mixer::Channel::all().pause();
            }
        }

        pub fn resume_all(&mut self) {
            if self.state != AudioState::Disabled {
                mixer::Channel::all().resume();
            }
        }

        /// Mutes or unmutes every mixing channel by adjusting its volume.
        pub fn set_mute(&mut self, mute: bool) {
            match (mute, self.state) {
                (true, AudioState::Enabled { volume }) => {
                    self.state = AudioState::Muted { previous_volume: volume };
                    for i in 0..MIXING_CHANNELS {
                        mixer::Channel(i).set_volume(0);
                    }
                }
                (false, AudioState::Muted { previous_volume }) => {
                    self.state = AudioState::Enabled { volume: previous_volume };
                    for i in 0..MIXING_CHANNELS {
                        mixer::Channel(i).set_volume(previous_volume as i32);
                    }
                }
                _ => {}
            }
        }

        pub fn is_muted(&self) -> bool {
            matches!(self.state, AudioState::Muted { .. })
        }

        /// Whether the mixer failed to initialize.
        pub fn is_disabled(&self) -> bool {
            matches!(self.state, AudioState::Disabled)
        }
    }
}
