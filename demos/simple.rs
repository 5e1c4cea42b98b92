//! Load, inspect and save an INI configuration.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use typed_ini::{from_str, to_string};

const INPUT: &str = "\
; application settings
[app]
name = Demo Service
workers = 4
tags = web, api ; inline comment

[paths]
root = /srv/demo
search = ${paths:root}, /usr/share/demo
";

fn main() -> Result<(), Box<dyn Error>> {
    let config = from_str(INPUT)?;

    for section in config.iter() {
        println!("[{}]", section.name());
        for option in section.iter() {
            println!("  {} -> {:?}", option.name(), option.values());
        }
    }

    // Raw values are text; typed access converts on demand
    let workers: u64 = config.get_value("app", "workers")?;
    println!("\nworkers as u64: {}", workers);

    let saved = to_string(&config)?;
    println!("\nSaved:\n{}", saved);

    assert_eq!(from_str(&saved)?, config);
    println!("✓ Round-trip successful");

    Ok(())
}
