use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use n2k_resolver::Resolver;
use n2k_types::{is_valid_key, KEY_LEN, NULL_KEY};

/// Interactive resolve loop: one lookup per line until `quit` or EOF.
pub fn run_shell(resolver: &Resolver) -> anyhow::Result<()> {
    println!("Ctrl-C to quit, or just type \"quit\".");
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("enter avatar name or key: ") {
            Ok(line) => {
                let input = line.trim();
                if input == "quit" {
                    break;
                }
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);
                println!("{}", describe(resolver, input));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    debug!("interactive session finished");
    Ok(())
}

/// Resolve one input and phrase the result.
///
/// Inputs shaped like a key are looked up as keys, everything else as a
/// name; the dual index means either direction is a single point read.
pub fn describe(resolver: &Resolver, input: &str) -> String {
    let (name, key, grid) = if input.len() == KEY_LEN && is_valid_key(input) {
        let (name, grid) = resolver.lookup_by_key(input);
        (name, input.to_string(), grid)
    } else {
        let (key, grid) = resolver.lookup_by_name(input);
        (input.to_string(), key, grid)
    };

    if name.is_empty() || key == NULL_KEY {
        format!("sorry, unknown input {input:?}")
    } else {
        format!("{name} which has key: {key} comes from grid: {grid:?}")
    }
}
