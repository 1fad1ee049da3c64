// Debug logging module for asynchronous decision logging
//
// Each decided tick is appended to a JSONL file as one entry holding the full
// world snapshot, so any tick can be replayed later. The judge runs one
// process per tick, hence the file is opened in append mode.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::Decision;
use crate::types::World;

/// A single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecisionLogEntry {
    pub tick: i32,
    pub action: u8,
    pub action_name: String,
    pub tier: String,
    pub world: World,
    pub timestamp: String,
}

impl DecisionLogEntry {
    pub fn new(tick: i32, world: World, decision: &Decision) -> Self {
        DecisionLogEntry {
            tick,
            action: decision.action.code(),
            action_name: decision.action.as_str().to_string(),
            tier: decision.tier.as_str().to_string(),
            world,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger, appending to `log_file_path` when enabled
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to open debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a decision without blocking the caller (fire-and-forget)
    /// Must be called from within a tokio runtime
    pub fn log_decision(&self, entry: DecisionLogEntry) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Logs a decision and waits for the write to finish
    pub async fn log_decision_now(&self, entry: DecisionLogEntry) {
        if !self.enabled {
            return;
        }
        Self::write_entry(self.file.clone(), entry).await;
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DecisionLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
