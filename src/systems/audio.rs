//! Audio events and the system that turns them into sound.
//!
//! Gameplay systems only ever write [`AudioEvent`]s; with the `gui` feature enabled the
//! [`audio_system`] drains them into SDL2_mixer. SDL2 audio handles are not `Send`, so the
//! mixer lives in a NonSend resource.

use bevy_ecs::{event::Event, resource::Resource};

use crate::audio::Sound;

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a specific sound effect
    PlaySound(Sound),
    /// Stop all currently playing sounds
    StopAll,
    /// Pause all sounds
    Pause,
    /// Resume all sounds
    Resume,
}

#[cfg(feature = "gui")]
pub use frontend::{audio_system, AudioResource};

#[cfg(feature = "gui")]
mod frontend {
    use bevy_ecs::{
        event::EventReader,
        system::{NonSendMut, Res},
    };
    use tracing::{debug, trace};

    use super::{AudioEvent, AudioState};
    use crate::audio::Audio;

    /// Non-send resource wrapper for the SDL2 mixer.
    pub struct AudioResource(pub Audio);

    /// System that processes audio events and plays sounds
    pub fn audio_system(mut audio: NonSendMut<AudioResource>, state: Res<AudioState>, mut events: EventReader<AudioEvent>) {
        if !audio.0.is_disabled() && audio.0.is_muted() != state.muted {
            debug!(muted = state.muted, "Audio mute state changed");
            audio.0.set_mute(state.muted);
        }

        for event in events.read() {
            if audio.0.is_disabled() {
                trace!(?event, "Audio disabled, dropping event");
                continue;
            }

            match event {
                AudioEvent::PlaySound(sound) => {
                    if state.muted {
                        continue;
                    }
                    trace!(?sound, "Playing sound");
                    audio.0.play(*sound);
                }
                AudioEvent::StopAll => audio.0.stop_all(),
                AudioEvent::Pause => audio.0.pause_all(),
                AudioEvent::Resume => audio.0.resume_all(),
            }
        }
    }
}
