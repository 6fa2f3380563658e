use std::io::{self, BufRead, Write};

use colored::Colorize;
use qc_session::{GameSession, SessionConfig, SessionError};

pub fn run(config: SessionConfig, name: &str) -> Result<(), String> {
    let seed = config.seed;
    let mut session = GameSession::load(name, config).map_err(|e| match e {
        SessionError::Data(e) => super::report(e),
        other => other.to_string(),
    })?;

    let c = session.character();
    println!("  {} Quest Chronicles", "Starting".bold());
    println!("  {} the {} (level {})", c.name.bold(), c.class, c.level);
    if let Some(seed) = seed {
        println!("  Seed: {seed}");
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    if session.config().autosave {
        session.save().map_err(|e| e.to_string())?;
    }
    Ok(())
}
