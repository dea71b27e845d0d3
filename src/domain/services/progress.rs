#[cfg(test)]
#[path = "progress_test.rs"]
mod tests;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::models::Event;

/// Advisory status labels shown while a generation or refinement request is
/// outstanding. The sequence is driven purely by timers sized to the
/// documented worst case latency of the service (roughly three minutes); it
/// observes nothing about real progress and holds no correctness-relevant
/// state. The final stage label holds until the request settles.
pub struct ProgressNarrator {
    stages: Vec<(String, Duration)>,
}

impl Default for ProgressNarrator {
    fn default() -> ProgressNarrator {
        let stages = [
            ("Processing your OPM diagram...", 3),
            ("Analyzing diagram structure...", 15),
            ("Extracting OPM elements...", 15),
            ("Generating code with AI...", 120),
            ("Finalizing output...", 10),
        ]
        .iter()
        .map(|(label, seconds)| {
            return (label.to_string(), Duration::from_secs(*seconds));
        })
        .collect::<Vec<(String, Duration)>>();

        return ProgressNarrator { stages };
    }
}

impl ProgressNarrator {
    /// Starts narrating from the first stage. The returned guard revokes all
    /// pending stage transitions the moment it is stopped or dropped, so no
    /// label can fire after the owning request has settled.
    pub fn start(&self, tx: mpsc::UnboundedSender<Event>) -> NarratorGuard {
        let stages = self.stages.clone();
        let handle = tokio::spawn(async move {
            for (idx, (label, duration)) in stages.iter().enumerate() {
                if tx.send(Event::ProgressStage(label.to_string())).is_err() {
                    return;
                }

                if idx == stages.len() - 1 {
                    return;
                }
                time::sleep(*duration).await;
            }
        });

        return NarratorGuard { handle };
    }
}

pub struct NarratorGuard {
    handle: JoinHandle<()>,
}

impl NarratorGuard {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for NarratorGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
