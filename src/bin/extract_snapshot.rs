//! Extract records from a saved comparison page.
//!
//! Usage: `extract_snapshot [FILE]`. Reads HTML from FILE, or from stdin when
//! no file is given, and prints the `ExtractionResult` as JSON to stdout.
//! Tables spanning several pages cannot be walked on a saved copy.

use std::io::{self, Read};

use perflab_scrape::{extract_bytes, ExtractionResult, Options};

fn read_input() -> io::Result<Vec<u8>> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read(path),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn main() {
    // Logs go to stderr (RUST_LOG overrides the level)
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let html = match read_input() {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            std::process::exit(1);
        }
    };

    let result = extract_bytes(&html, &Options::immediate())
        .unwrap_or_else(|e| ExtractionResult::failure(e.to_string(), Vec::new()));

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize result: {e}");
            std::process::exit(1);
        }
    }
    if !result.success {
        std::process::exit(2);
    }
}
