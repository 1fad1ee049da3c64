// HTTP handler bindings for the decision engine
//
// Thin wrappers that bind Rocket routes to the Bot. Harnesses post a JSON
// world snapshot and receive the action plus the memory echo.

use log::info;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::debug_logger::{DebugLogger, DecisionLogEntry};
use crate::types::World;

/// GET / endpoint
/// Returns engine metadata
#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /decide endpoint
/// Computes the action for one tick snapshot
#[post("/decide", format = "json", data = "<world>")]
pub async fn decide(
    bot: &State<Bot>,
    logger: &State<DebugLogger>,
    world: Json<World>,
) -> Result<Json<Value>, (Status, String)> {
    let mut world = world.into_inner();
    // Key flags follow the key list when one is posted, as on the judge path
    if !world.keys.is_empty() {
        world.sync_key_holders();
    }
    let mut rng = bot.tick_rng();

    let decision = bot
        .decide(&world, &mut rng)
        .map_err(|e| (Status::UnprocessableEntity, e))?;

    let tick = bot.config().game.total_ticks - world.remaining_ticks;
    info!(
        "Tick {}: {} ({})",
        tick,
        decision.action.as_str(),
        decision.tier.as_str()
    );

    let response = json!({
        "action": decision.action.code(),
        "memory": decision.action.code(),
        "name": decision.action.as_str(),
        "tier": decision.tier.as_str(),
    });

    logger.log_decision(DecisionLogEntry::new(tick, world, &decision));

    Ok(Json(response))
}
