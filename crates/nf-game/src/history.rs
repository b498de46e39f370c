//! Round history and export.

use chrono::{DateTime, Utc};
use nf_engine::{Outcome, Response};
use serde::{Deserialize, Serialize};

/// What happened in one completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    /// Zero-based round index.
    pub round: u32,
    /// Id of the scenario that was played.
    pub scenario_id: String,
    /// The adversary inject shown that round.
    pub inject: String,
    /// Responses the player committed.
    pub responses: Vec<Response>,
    /// The resolved outcome.
    pub outcome: Outcome,
    /// Meter before the outcome was applied.
    pub meter_before: i32,
    /// Meter after the outcome, within the game's meter bounds.
    pub meter_after: i32,
    /// Manpower spent this round.
    pub manpower_spent: u32,
    /// When the round was resolved.
    pub timestamp: DateTime<Utc>,
}

impl RoundRecord {
    /// Build a record, clamping the resulting meter to `[min, max]`.
    pub fn new(
        round: u32,
        scenario_id: impl Into<String>,
        inject: impl Into<String>,
        responses: Vec<Response>,
        outcome: Outcome,
        meter_before: i32,
        bounds: (i32, i32),
    ) -> Self {
        let meter_after = meter_before
            .saturating_add(outcome.meter_shift)
            .clamp(bounds.0, bounds.1);
        Self {
            round,
            scenario_id: scenario_id.into(),
            inject: inject.into(),
            manpower_spent: outcome.manpower_cost,
            responses,
            outcome,
            meter_before,
            meter_after,
            timestamp: Utc::now(),
        }
    }

    fn response_summary(&self) -> String {
        self.responses
            .iter()
            .map(|r| {
                if r.is_thorough() {
                    format!("{} (thorough)", r.kind)
                } else {
                    r.kind.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Chronological log of completed rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<RoundRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed round.
    pub fn push(&mut self, record: RoundRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&RoundRecord> {
        self.records.last()
    }

    /// Number of completed rounds.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no round has been completed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the history as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Narrative Front After-Action Report\n\n");
        for record in &self.records {
            out.push_str(&format!(
                "## Round {} ({})\n\n",
                record.round + 1,
                record.scenario_id
            ));
            out.push_str(&format!("> {}\n\n", record.inject));
            out.push_str(&format!("**Responses**: {}\n\n", record.response_summary()));
            for entry in &record.outcome.outcomes {
                out.push_str(&format!("- {} ({:+})\n", entry.text, entry.shift));
            }
            out.push_str(&format!(
                "\n**Meter**: {} -> {} ({:+})  \n",
                record.meter_before, record.meter_after, record.outcome.meter_shift
            ));
            out.push_str(&format!("**Manpower spent**: {}\n\n", record.manpower_spent));
        }
        out
    }

    /// Export the history as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&format!(
                "[{}] Round {} {}: {} | meter {} -> {} | manpower -{}\n",
                record.timestamp.format("%H:%M:%S"),
                record.round + 1,
                record.scenario_id,
                record.response_summary(),
                record.meter_before,
                record.meter_after,
                record.manpower_spent
            ));
            for entry in &record.outcome.outcomes {
                out.push_str(&format!("    {} ({:+})\n", entry.text, entry.shift));
            }
        }
        out
    }
}
