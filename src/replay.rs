// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Re-run the engine on each logged world snapshot
// 3. Compare logged vs replayed actions
// 4. Generate analysis reports

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::{Bot, DecisionTier};
use crate::config::Config;
use crate::debug_logger::DecisionLogEntry;
use crate::types::Action;

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tick: i32,
    pub original_action: Action,
    pub replayed_action: Action,
    pub matches: bool,
    pub tier: DecisionTier,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    pub fallback_ticks: usize,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionLogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    ///
    /// The forced tier draws from a generator seeded with the configured seed
    /// (or 0), so replays are reproducible.
    pub fn replay_entry(&self, entry: &DecisionLogEntry) -> Result<ReplayResult, String> {
        let original_action = Action::from_code(entry.action as i64)
            .ok_or_else(|| format!("Tick {}: invalid logged action {}", entry.tick, entry.action))?;

        let seed = self.bot.config().fallback.seed.unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(seed);

        let start_time = Instant::now();
        let decision = self.bot.decide(&entry.world, &mut rng)?;
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = original_action == decision.action;

        if self.verbose {
            if matches {
                info!(
                    "Tick {}: ✓ MATCH - {} ({}, {}us)",
                    entry.tick,
                    decision.action.as_str(),
                    decision.tier.as_str(),
                    computation_time_us
                );
            } else {
                warn!(
                    "Tick {}: ✗ MISMATCH - Original: {}, Replayed: {} ({}, {}us)",
                    entry.tick,
                    original_action.as_str(),
                    decision.action.as_str(),
                    decision.tier.as_str(),
                    computation_time_us
                );
            }
        }

        Ok(ReplayResult {
            tick: entry.tick,
            original_action,
            replayed_action: decision.action,
            matches,
            tier: decision.tier,
            computation_time_us,
        })
    }

    /// Replays all entries in parallel; failed entries are logged and skipped
    pub fn replay_all(&self, entries: &[DecisionLogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.tick, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific ticks from a log file
    pub fn replay_ticks(
        &self,
        entries: &[DecisionLogEntry],
        ticks: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in ticks {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_ticks - matches;
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };
        let fallback_ticks = results
            .iter()
            .filter(|r| r.tier != DecisionTier::Scored)
            .count();

        ReplayStats {
            total_ticks,
            matches,
            mismatches,
            match_rate,
            fallback_ticks,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Fallback Ticks: {}", stats.fallback_ticks);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Tick {}: {} → {} ({})",
                    result.tick,
                    result.original_action.as_str(),
                    result.replayed_action.as_str(),
                    result.tier.as_str()
                );
            }
            println!();
        }
    }

    /// Validates that the logged actions are among the acceptable ones
    pub fn validate_expected_actions(
        &self,
        entries: &[DecisionLogEntry],
        expected: &[(i32, Vec<Action>)],
    ) -> Result<(), String> {
        for (tick, acceptable) in expected {
            let entry = entries
                .iter()
                .find(|e| e.tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            let actual = Action::from_code(entry.action as i64)
                .ok_or_else(|| format!("Tick {}: invalid logged action {}", tick, entry.action))?;

            if !acceptable.contains(&actual) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
                    actual.as_str()
                ));
            }
        }

        Ok(())
    }
}
