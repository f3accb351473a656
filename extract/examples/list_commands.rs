//! Lists the commands declared in a registration source.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p slashdoc-extract --example list_commands -- path/to/index.js
//! ```

use slashdoc_extract::extract_commands;

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: list_commands <source.js>");
        std::process::exit(2);
    };

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            std::process::exit(1);
        }
    };

    let registry = match extract_commands(&source) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    for group in registry.groups() {
        println!("{}", group.name);
        for command in &group.commands {
            println!(
                "  /{:<20} {} named, {} unnamed",
                command.name,
                command.named.len(),
                command.unnamed.len()
            );
        }
    }
}
