// Per-tick decision engine
//
// Picks a target, scores the non-reversing moves that survive the lethality
// oracle, and degrades through cautious and forced escape tiers when none do.
// Every call is independent: nothing survives between ticks.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::config::Config;
use crate::safety::{count_obstacles, is_lethal};
use crate::space::reachable_count;
use crate::targeting::{select_target, Target};
use crate::types::{Action, Agent, Cell, Direction, World};
use crate::view::TickView;

/// Which stage of the decision produced the action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionTier {
    /// A move survived the full oracle and won on score
    Scored,
    /// Only safe once opponent head predictions were dropped
    Cautious,
    /// Random non-reversing move taken knowingly at risk
    Forced,
    /// Shield activated instead of a doomed move
    Shield,
}

impl DecisionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionTier::Scored => "scored",
            DecisionTier::Cautious => "cautious",
            DecisionTier::Forced => "forced",
            DecisionTier::Shield => "shield",
        }
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub tier: DecisionTier,
    pub target: Option<Target>,
}

/// Decision engine holding the static configuration
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns engine metadata
    pub fn info(&self) -> Value {
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "self_id": self.config.game.self_id,
            "grid": {
                "width": self.config.game.grid_width,
                "height": self.config.game.grid_height,
            },
            "total_ticks": self.config.game.total_ticks,
        })
    }

    /// Randomness for the forced tier: seeded from config when set
    pub fn tick_rng(&self) -> StdRng {
        match self.config.fallback.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        }
    }

    /// Computes the action for one tick
    ///
    /// Fails only when the configured self id is absent from the snapshot;
    /// otherwise an action is always produced, risky or not.
    pub fn decide<R: Rng + ?Sized>(&self, world: &World, rng: &mut R) -> Result<Decision, String> {
        let view = TickView::new(world, &self.config)?;
        if !world.zone_schedule_nested() {
            debug!(
                "Tick {}: zone schedule is not nested: {:?} -> {:?} -> {:?}",
                view.tick(),
                world.zone,
                world.next_zone,
                world.final_zone
            );
        }

        let target = select_target(&view);
        match target {
            Some(t) => debug!(
                "Tick {}: target {:?} at {:?} (score {:.2})",
                view.tick(),
                t.item.kind(),
                t.item.cell,
                t.score
            ),
            None => debug!("Tick {}: no target, maximizing space", view.tick()),
        }

        if let Some(dir) = Self::choose_scored_direction(&view, target.as_ref()) {
            return Ok(Decision {
                action: Action::Move(dir),
                tier: DecisionTier::Scored,
                target,
            });
        }

        info!("Tick {}: no safe scored move, retrying without head prediction", view.tick());
        if let Some(dir) = Self::cautious_retry(&view) {
            return Ok(Decision {
                action: Action::Move(dir),
                tier: DecisionTier::Cautious,
                target,
            });
        }

        let action = Self::forced_move(&view, rng);
        let tier = match action {
            Action::ActivateShield => DecisionTier::Shield,
            Action::Move(_) => DecisionTier::Forced,
        };
        warn!("Tick {}: encircled, falling back to {}", view.tick(), action.as_str());

        Ok(Decision { action, tier, target })
    }

    /// Moves we may consider at all: everything but reversing onto the neck
    fn candidate_directions(me: &Agent) -> impl Iterator<Item = Direction> + '_ {
        Direction::all()
            .into_iter()
            .filter(move |&dir| !me.is_reversal(dir))
    }

    /// Scores surviving moves; `None` when every candidate is lethal
    fn choose_scored_direction(view: &TickView, target: Option<&Target>) -> Option<Direction> {
        let head = view.head();
        let space = &view.config.space;
        let selection = &view.config.selection;

        let mut best: Option<(Direction, f64, usize)> = None;

        for dir in Self::candidate_directions(view.me) {
            let dest = dir.apply(&head);
            if is_lethal(&dest, view, true) {
                continue;
            }

            let mut score = match target {
                Some(t) => Self::target_pressure(view, &dest, t),
                None => reachable_count(&dest, view, space.open_field_depth) as f64,
            };
            score += selection.space_tie_weight * reachable_count(&dest, view, space.tie_lean_depth) as f64;

            debug!("  {} -> {:?}: {:.2}", dir.as_str(), dest, score);

            best = match best {
                None => Some((dir, score, count_obstacles(&dest, view))),
                Some((_, best_score, _)) if score > best_score => {
                    Some((dir, score, count_obstacles(&dest, view)))
                }
                Some((best_dir, best_score, best_obstacles)) if score == best_score => {
                    let obstacles = count_obstacles(&dest, view);
                    if obstacles < best_obstacles {
                        Some((dir, score, obstacles))
                    } else {
                        Some((best_dir, best_score, best_obstacles))
                    }
                }
                keep => keep,
            };
        }

        best.map(|(dir, _, _)| dir)
    }

    /// Distance-to-target score with a penalty for every rival that gets there first
    fn target_pressure(view: &TickView, dest: &Cell, target: &Target) -> f64 {
        let selection = &view.config.selection;
        let dist = dest.manhattan(&target.item.cell);
        let mut score = -selection.distance_weight * dist as f64;

        for rival in view.opponents() {
            if target.is_chest() && !rival.has_key {
                continue;
            }
            let Some(rival_head) = rival.head() else {
                continue;
            };
            let rival_dist = rival_head.manhattan(&target.item.cell);
            if rival_dist < dist {
                score -= selection.competition_weight * (dist - rival_dist) as f64;
            }
        }

        score
    }

    /// Escape tier one: drop head predictions and take the roomiest survivor
    fn cautious_retry(view: &TickView) -> Option<Direction> {
        let head = view.head();
        let depth = view.config.space.fallback_depth;

        let mut best: Option<(Direction, usize)> = None;
        for dir in Self::candidate_directions(view.me) {
            let dest = dir.apply(&head);
            if is_lethal(&dest, view, false) {
                continue;
            }
            let room = reachable_count(&dest, view, depth);
            if best.map_or(true, |(_, best_room)| room > best_room) {
                best = Some((dir, room));
            }
        }

        best.map(|(dir, _)| dir)
    }

    /// Escape tier two: random in-bounds move, or the shield when the move is doomed
    ///
    /// Re-draws are capped by `max_redraws`; the last draw is returned once the
    /// cap is hit so an action is always produced.
    fn forced_move<R: Rng + ?Sized>(view: &TickView, rng: &mut R) -> Action {
        let head = view.head();
        let fallback = &view.config.fallback;

        let mut pool: Vec<Direction> = Self::candidate_directions(view.me)
            .filter(|dir| view.in_bounds(&dir.apply(&head)))
            .collect();
        if pool.is_empty() {
            pool = Self::candidate_directions(view.me).collect();
        }

        let shield_ready = view.me.shield_cooldown == 0
            && view.me.score >= fallback.shield_min_score
            && view.world.remaining_ticks >= fallback.shield_min_remaining_ticks;

        let mut draws = 0;
        loop {
            let dir = pool[rng.random_range(0..pool.len())];
            if !is_lethal(&dir.apply(&head), view, false) {
                return Action::Move(dir);
            }
            if shield_ready {
                return Action::ActivateShield;
            }
            draws += 1;
            if draws > fallback.max_redraws {
                warn!("No survivable move after {} draws, taking {}", draws, dir.as_str());
                return Action::Move(dir);
            }
        }
    }
}
