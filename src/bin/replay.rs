// Standalone replay tool for analyzing decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all ticks
//   --ticks <t1,t2>        Replay specific ticks (comma-separated)
//   --validate             Check logged actions against expectations
//   --verbose              Show detailed output for each tick
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use shrinkzone_snake::config::Config;
use shrinkzone_snake::replay::ReplayEngine;
use shrinkzone_snake::types::Action;

fn print_usage() {
    eprintln!("Decision Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all ticks in the log");
    eprintln!("  --ticks <T1,T2,...>     Replay specific ticks (comma-separated)");
    eprintln!("  --validate <T:A,...>    Validate logged actions (format: tick:action,...)");
    eprintln!("  --verbose               Show detailed output for each tick");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay snake_debug.jsonl --all");
    eprintln!("  replay snake_debug.jsonl --ticks 5,10,15");
    eprintln!("  replay snake_debug.jsonl --validate 5:up,10:left|shield");
}

fn parse_ticks(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid tick number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_actions(s: &str) -> Result<Vec<(i32, Vec<Action>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'tick:action'", pair));
            }

            let tick = parts[0]
                .parse::<i32>()
                .map_err(|e| format!("Invalid tick number '{}': {}", parts[0], e))?;

            // Several acceptable actions separated by '|'
            let actions: Result<Vec<Action>, String> = parts[1].split('|').map(Action::parse).collect();

            Ok((tick, actions?))
        })
        .collect()
}

enum Mode {
    All,
    Ticks(String),
    Validate(String),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.iter().any(|a| a == "--help") {
        print_usage();
        process::exit(if args.iter().any(|a| a == "--help") { 0 } else { 1 });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Some(Mode::All),
            "--ticks" | "--validate" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", args[i]);
                    process::exit(1);
                };
                match args[i].as_str() {
                    "--ticks" => mode = Some(Mode::Ticks(value.clone())),
                    "--validate" => mode = Some(Mode::Validate(value.clone())),
                    _ => config_path = value.clone(),
                }
                i += 1;
            }
            "--verbose" => verbose = true,
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all, --ticks, or --validate");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    match mode {
        Mode::All => {
            println!("Replaying all {} ticks...\n", entries.len());
            let mut results = engine.replay_all(&entries);
            results.sort_by_key(|r| r.tick);
            engine.print_report(&results);
        }
        Mode::Ticks(arg) => {
            let ticks = parse_ticks(&arg).unwrap_or_else(|e| {
                eprintln!("Error parsing ticks: {}", e);
                process::exit(1);
            });

            println!("Replaying {} specific tick(s)...\n", ticks.len());
            match engine.replay_ticks(&entries, &ticks) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(arg) => {
            let expected = parse_expected_actions(&arg).unwrap_or_else(|e| {
                eprintln!("Error parsing expected actions: {}", e);
                process::exit(1);
            });

            println!("Validating {} expected action(s)...\n", expected.len());
            match engine.validate_expected_actions(&entries, &expected) {
                Ok(()) => println!("✓ All expected actions validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
