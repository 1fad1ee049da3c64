// HTTP host for the decision engine
//
// Useful for local harnesses that drive many ticks without spawning a process
// per tick. Accepts JSON world snapshots on POST /decide.

#[macro_use]
extern crate rocket;

use log::info;
use rocket::fairing::AdHoc;
use std::env;

use shrinkzone_snake::bot::Bot;
use shrinkzone_snake::config::Config;
use shrinkzone_snake::debug_logger::DebugLogger;
use shrinkzone_snake::handler;

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting decision server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config);

    rocket::build()
        .manage(bot)
        .manage(logger)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "shrinkzone-snake");
            })
        }))
        .mount("/", routes![handler::index, handler::decide])
}
