#![no_main]

use libfuzzer_sys::fuzz_target;
use mbrola_core::{validate_mbrola_args, Utterance, Validator, Value};
use mbrola_wire::PhoWriter;

fuzz_target!(|fields: (Value, Value, Value, Value)| {
    let (phon, durations, pitch, outer_silences) = fields;
    let utterance = Utterance {
        phon,
        durations,
        pitch,
        outer_silences,
    };

    let gate = validate_mbrola_args(&utterance);
    if let Ok(canonical) = utterance.normalize(&Validator::default()) {
        assert!(gate.is_ok());
        let safe = canonical
            .phon
            .iter()
            .all(|ph| !ph.is_empty() && !ph.chars().any(char::is_whitespace));
        let comment = usize::from(canonical.word.is_some());
        match PhoWriter::default().render(&canonical) {
            Ok(pho) => {
                assert!(safe);
                assert_eq!(pho.lines().count(), canonical.phon.len() + 2 + comment);
            }
            Err(_) => assert!(!safe),
        }
    }
});
