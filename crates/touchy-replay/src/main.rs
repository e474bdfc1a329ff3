//! Touchy Replay
//!
//! Feeds a recorded touch script through the gesture engine and prints every
//! emitted event as JSON.

mod script;

use script::Script;
use std::{env, fs, path::PathBuf, process};
use touchy_core::{TouchyError, TouchyResult};

fn main() {
    env_logger::init();
    log::info!("Starting touchy-replay v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn usage() -> String {
    "usage: touchy-replay <script.json> [--pretty]".to_string()
}

fn run() -> TouchyResult<()> {
    let mut script_path: Option<PathBuf> = None;
    let mut pretty = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--pretty" => pretty = true,
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(TouchyError::Script(format!("unknown argument: {value}")));
            }
            value => {
                if script_path.is_some() {
                    return Err(TouchyError::Script("multiple script paths provided".into()));
                }
                script_path = Some(PathBuf::from(value));
            }
        }
    }

    let path = script_path.ok_or_else(|| TouchyError::Script(usage()))?;
    let json = fs::read_to_string(&path)
        .map_err(|e| TouchyError::Script(format!("failed to read {}: {e}", path.display())))?;
    let script = Script::from_json(&json)?;

    for event in script.replay()? {
        let line = if pretty {
            serde_json::to_string_pretty(&event)
        } else {
            serde_json::to_string(&event)
        }
        .map_err(|e| TouchyError::Script(format!("failed to encode event: {e}")))?;
        println!("{line}");
    }
    Ok(())
}
