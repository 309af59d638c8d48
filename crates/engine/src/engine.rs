// SPDX-License-Identifier: MIT

//! The engine: owns all monitors and their recurring schedules

use crate::error::BuildError;
use crate::monitor::Monitor;
use std::sync::Arc;
use sweep_rulebook::Rulebook;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// The owner and scheduler of all monitors.
///
/// Each monitor runs on its own independently scheduled tokio task; the
/// first check fires immediately on start, then at the configured
/// interval. Checks never overlap themselves: a check that outlives its
/// interval simply causes the missed ticks to be skipped.
pub struct Engine {
    monitors: Vec<Arc<Monitor>>,
    tasks: Vec<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl Engine {
    /// Build the engine from a parsed rulebook.
    ///
    /// Every rule condition is parsed here, exactly once; any failure
    /// means no monitor starts.
    pub fn from_rulebook(rulebook: &Rulebook) -> Result<Self, BuildError> {
        let monitors = rulebook
            .monitors
            .iter()
            .map(|def| Monitor::from_def(def).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        let (shutdown, _) = watch::channel(false);

        Ok(Engine {
            monitors,
            tasks: Vec::new(),
            shutdown,
        })
    }

    pub fn monitors(&self) -> &[Arc<Monitor>] {
        &self.monitors
    }

    /// Start one recurring check task per monitor.
    ///
    /// The engine lifecycle is start-once / stop-once.
    pub fn start(&mut self) {
        for monitor in &self.monitors {
            let monitor = Arc::clone(monitor);
            let mut shutdown = self.shutdown.subscribe();

            self.tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(monitor.interval());
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            if let Err(e) = monitor.check() {
                                tracing::error!(
                                    root = %monitor.root().display(),
                                    error = %e,
                                    "check failed"
                                );
                            }
                        }
                        _ = shutdown.changed() => break,
                    }
                }
            }));
        }

        tracing::info!(monitors = self.monitors.len(), "started the cleanup engine");
    }

    /// Stop all schedules.
    ///
    /// No further checks start after this; an in-flight check runs to
    /// completion before its task exits.
    pub async fn stop(&mut self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "monitor task did not shut down cleanly");
            }
        }
        tracing::info!("engine terminated");
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
