use pacman_arcade::audio::{sample_count, synthesize, Note, Sound, AUDIO_FREQUENCY};
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_sample_count() {
    let note = Note {
        frequency: 440,
        duration_ms: 40,
    };

    assert_that(&sample_count(note)).is_equal_to(640);
    assert_that(&sample_count(Note {
        frequency: 0,
        duration_ms: 1000,
    }))
    .is_equal_to(AUDIO_FREQUENCY as usize);
}

#[test]
fn test_every_sound_has_samples() {
    for sound in Sound::iter() {
        let expected: usize = sound.notes().iter().copied().map(sample_count).sum();
        let samples = synthesize(sound);

        assert_that(&samples.len()).is_equal_to(expected);
        assert_that(&samples.len()).is_greater_than(0);
    }
}

#[test]
fn test_tones_are_square_waves() {
    let samples = synthesize(Sound::Waka);
    let peak = samples[0];

    assert_that(&peak).is_greater_than(0);
    assert_that(&samples.iter().all(|&s| s == peak || s == -peak)).is_true();
    assert_that(&samples.iter().any(|&s| s == -peak)).is_true();
}

#[test]
fn test_rests_are_silent() {
    let notes = Sound::GameOver.notes();
    let samples = synthesize(Sound::GameOver);

    let mut offset = 0;
    for &note in notes {
        let count = sample_count(note);
        let slice = &samples[offset..offset + count];
        if note.frequency == 0 {
            assert_that(&slice.iter().all(|&s| s == 0)).is_true();
        } else {
            assert_that(&slice.iter().all(|&s| s != 0)).is_true();
        }
        offset += count;
    }

    assert_that(&notes.iter().any(|note| note.frequency == 0)).is_true();
}
