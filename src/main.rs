// mal - A tail-call-optimised Lisp interpreter written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::path::PathBuf;
use std::process;

use mal_embed::{Engine, MalVal};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

const PROMPT: &str = "user> ";
const HISTORY_FILE: &str = ".mal-history";

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("mal v{}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_tracing();

    let engine = match Engine::new() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Failed to load prelude: {}", e);
            process::exit(1);
        }
    };

    // Everything after the script name is visible to the script.
    let argv = args.iter().skip(2).map(|a| MalVal::string(a.as_str())).collect();
    engine.set("*ARGV*", MalVal::list(argv));

    match args.get(1) {
        Some(file) => run_file(&engine, file),
        None => run_repl(&engine),
    }
}

/// Install a `tracing` subscriber when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Load a source file through the prelude's `load-file`.
fn run_file(engine: &Engine, file: &str) {
    if let Err(e) = engine.call("load-file", &[MalVal::string(file)]) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `$MAL_HISTORY`, or `~/.mal-history`.
fn history_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("MAL_HISTORY") {
        return Some(PathBuf::from(path));
    }
    env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE))
}

/// Run the interactive REPL
fn run_repl(engine: &Engine) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not initialize REPL: {}", e);
            process::exit(1);
        }
    };

    let history = history_path();
    if let Some(path) = &history
        && let Err(e) = rl.load_history(path)
    {
        debug!(path = %path.display(), error = %e, "no history loaded");
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    debug!(error = %e, "history entry not added");
                }
                println!("{}", engine.rep(&line));
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history
        && let Err(e) = rl.save_history(path)
    {
        debug!(path = %path.display(), error = %e, "history not saved");
    }
}
