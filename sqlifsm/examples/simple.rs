use sqlifsm::{scan_request, scan_text};

fn main() {
    println!("Testing sqlifsm functionality...");

    let text_tests = [
        ("SELECT * FROM users WHERE id = 1", "Plain SQL"),
        ("1' OR '1'='1", "Tautology"),
        ("' UNION SELECT * FROM passwords --", "UNION attack"),
        ("x'; DROP TABLE users", "Stacked query"),
        ("Hello world", "Regular text"),
    ];

    println!("\n=== Field Scanning ===");
    for (input, description) in &text_tests {
        let families = scan_text(input)
            .map(|set| set.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!("{}: {} -> {}", description, input, families);
    }

    let requests = [
        (
            "GET /search?id=1'-- HTTP/1.1\nHost: example.com",
            "Comment in query",
        ),
        (
            "GET /profile HTTP/1.1\nHost: example.com\nCookie: session=abc' OR '1'='1",
            "Tautology in cookie",
        ),
        (
            "POST /submit HTTP/1.1\nContent-Type: application/x-www-form-urlencoded\n\n\
             description=Please select an option",
            "Benign form",
        ),
    ];

    println!("\n=== Request Scanning ===");
    for (raw, description) in &requests {
        let verdict = scan_request(raw);
        match &verdict.detection {
            Some(detection) => println!(
                "{}: malicious ({} in {})",
                description, detection.signature, detection.field.source
            ),
            None => println!(
                "{}: benign ({} fields scanned)",
                description, verdict.fields_scanned
            ),
        }
    }
}
