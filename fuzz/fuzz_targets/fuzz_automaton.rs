#![no_main]
use libfuzzer_sys::fuzz_target;
use sqlifsm::{Automaton, State};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let mut automaton = Automaton::new();
    let mut accepted_at = None;
    for (offset, c) in text.chars().enumerate() {
        automaton.step(c);
        // Start is never lost, so matching stays unanchored.
        assert!(automaton.frontier().contains(State::Start));
        if accepted_at.is_none() && automaton.is_accepting() {
            accepted_at = Some(offset);
        }
    }

    // find() stops at the same first acceptance.
    let hit = automaton.find(&text, sqlifsm::SignatureSet::all());
    assert_eq!(hit.map(|hit| hit.offset), accepted_at);
});
