//! CLI probe for the ordering core.
//!
//! # Responsibility
//! - Verify `rankboard_core` linkage without a UI host.
//! - Expose key algebra operations for quick manual checks and scripting.

use clap::{Parser, Subcommand};
use rankboard_core::{
    batch_keys, generate_key, init_logging, key_after, key_before, position_to_key, Key,
    LogConfig,
};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "rankboard", about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print `pong` and the core version
    Ping,
    /// Mint a key between two neighbors; omit one side for an open end
    Between {
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Mint a key strictly before KEY
    Before { key: String },
    /// Mint a key strictly after KEY
    After { key: String },
    /// Print COUNT evenly spaced keys
    Batch { count: usize },
    /// Convert legacy numeric positions into keys
    Migrate {
        #[arg(required = true)]
        positions: Vec<f64>,
        /// Scale hint; defaults to the number of positions
        #[arg(long)]
        hint: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging is opt-in: only when RANKBOARD_LOG_DIR is set.
    if let Ok(config) = LogConfig::from_env() {
        if let Err(err) = init_logging(&config) {
            eprintln!("warning: {err}");
        }
    }

    match run(cli.command) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<Vec<String>, String> {
    match command {
        Command::Ping => Ok(vec![
            format!("rankboard_core ping={}", rankboard_core::ping()),
            format!("rankboard_core version={}", rankboard_core::core_version()),
        ]),
        Command::Between { before, after } => {
            let before = before.map(parse_key).transpose()?;
            let after = after.map(parse_key).transpose()?;
            let key = generate_key(before.as_ref(), after.as_ref()).map_err(|err| err.to_string())?;
            Ok(vec![key.to_string()])
        }
        Command::Before { key } => {
            let key = key_before(&parse_key(key)?).map_err(|err| err.to_string())?;
            Ok(vec![key.to_string()])
        }
        Command::After { key } => Ok(vec![key_after(&parse_key(key)?).to_string()]),
        Command::Batch { count } => Ok(batch_keys(count).iter().map(Key::to_string).collect()),
        Command::Migrate { positions, hint } => {
            let hint = hint.unwrap_or(positions.len());
            Ok(positions
                .iter()
                .map(|&position| format!("{position}\t{}", position_to_key(position, hint)))
                .collect())
        }
    }
}

fn parse_key(value: String) -> Result<Key, String> {
    Key::parse(value).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{run, Command};

    #[test]
    fn between_prints_midpoint() {
        let lines = run(Command::Between {
            before: Some("a".to_string()),
            after: Some("c".to_string()),
        })
        .unwrap();
        assert_eq!(lines, vec!["b"]);
    }

    #[test]
    fn between_reports_invalid_order() {
        let err = run(Command::Between {
            before: Some("c".to_string()),
            after: Some("a".to_string()),
        })
        .unwrap_err();
        assert!(err.contains("strictly before"));
    }

    #[test]
    fn invalid_key_is_rejected() {
        let err = run(Command::After {
            key: "42".to_string(),
        })
        .unwrap_err();
        assert!(err.contains("invalid key"));
    }

    #[test]
    fn migrate_pairs_positions_with_keys() {
        let lines = run(Command::Migrate {
            positions: vec![0.0, 1.0],
            hint: Some(1),
        })
        .unwrap();
        assert_eq!(lines, vec!["0\ta", "1\tn"]);
    }
}
