//! Parse example: parse captured task text read from stdin
//!
//! Usage: `cargo run --example parse_record < captured.txt`
use std::io::Read;

use tcrm_capture::tasks::parser::parse_captured;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let record = parse_captured(&text);
    println!("{}", record);
    Ok(())
}
