#![no_main]

use libfuzzer_sys::fuzz_target;
use mbrola_core::{
    validate_durations, validate_outer_silences, validate_phon, validate_pitch, validate_word, Value,
};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    phon: Value,
    durations: Value,
    pitch: Value,
    outer_silences: Value,
}

fuzz_target!(|input: Input| {
    let _ = validate_word(&input.phon);
    let _ = validate_outer_silences(&input.outer_silences);

    if let Ok(phon) = validate_phon(&input.phon) {
        assert!(!phon.is_empty());
        if let Ok(durations) = validate_durations(&phon, &input.durations) {
            assert_eq!(durations.len(), phon.len());
        }
        if let Ok(pitch) = validate_pitch(&phon, &input.pitch) {
            assert_eq!(pitch.len(), phon.len());
            assert!(pitch.iter().all(|contour| !contour.is_empty()));
        }
    }
});
