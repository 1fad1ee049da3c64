// Judge entry point: one process per tick
//
// Reads the snapshot from stdin, writes the action code and its memory echo
// to stdout. Logs go to stderr so they never corrupt the response.

use log::{debug, error};
use std::io::{self, Read, Write};
use std::process;

use shrinkzone_snake::bot::Bot;
use shrinkzone_snake::config::Config;
use shrinkzone_snake::debug_logger::{DebugLogger, DecisionLogEntry};
use shrinkzone_snake::protocol;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Quiet by default; `RUST_LOG` overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::load_or_default();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        error!("Failed to read snapshot from stdin: {}", e);
        process::exit(1);
    }

    let tick_input = match protocol::parse_tick(&input, &config) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to parse snapshot: {}", e);
            process::exit(1);
        }
    };
    debug!("Previous action from memory: {:?}", tick_input.last_action);

    let bot = Bot::new(config.clone());
    let mut rng = bot.tick_rng();
    let decision = match bot.decide(&tick_input.world, &mut rng) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to decide: {}", e);
            process::exit(1);
        }
    };

    {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout
            .write_all(protocol::format_response(decision.action).as_bytes())
            .and_then(|_| stdout.flush())
        {
            error!("Failed to write response: {}", e);
            process::exit(1);
        }
    }

    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let tick = config.game.total_ticks - tick_input.world.remaining_ticks;
    logger
        .log_decision_now(DecisionLogEntry::new(tick, tick_input.world, &decision))
        .await;
}
