#![no_main]
use libfuzzer_sys::fuzz_target;
use sqlifsm::Scanner;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    // A reused scanner must agree with a fresh one.
    let mut scanner = Scanner::new();
    let first = scanner.scan(raw);
    let second = scanner.scan(raw);
    assert_eq!(first, second);
    assert_eq!(first, sqlifsm::scan_request(raw));

    if let Some(detection) = &first.detection {
        assert!(detection.signatures.contains(detection.signature.as_set()));
        assert!(first.fields_scanned >= 1);
    }
});
