//! The static content registry.
//!
//! Holds every narrated line the engine can return: the per response type
//! and bucket narrative lists, the two critical overrides, and the synergy
//! texts. A registry is loaded once, never mutated, and shared read-only
//! between rounds (and threads).
//!
//! Language packs differ only in text. Keys, entry counts and shift values
//! must match so that every language plays with identical balance; see
//! [`ContentRegistry::parity_issues`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::response::ResponseType;
use crate::roll::Bucket;
use crate::synergy::SynergyKind;

/// One line of narration and its meter delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    /// The narrated text.
    pub text: String,
    /// Meter delta.
    pub shift: i32,
}

impl NarrativeEntry {
    /// Create an entry.
    pub fn new(text: impl Into<String>, shift: i32) -> Self {
        Self {
            text: text.into(),
            shift,
        }
    }
}

/// A response-independent critical override.
pub type CriticalOutcome = NarrativeEntry;

/// Result of a narrative lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSlot<'a> {
    /// The content table has entries for this combination.
    Entries(&'a [NarrativeEntry]),
    /// Nothing is defined (or the list is empty).
    Missing,
}

/// Immutable narrative content for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    narratives: BTreeMap<(ResponseType, Bucket), Vec<NarrativeEntry>>,
    critical_success: CriticalOutcome,
    critical_failure: CriticalOutcome,
    synergy_texts: BTreeMap<SynergyKind, String>,
}

/// A structural or balance difference between two language packs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityIssue {
    /// Where the difference is, e.g. `FACT_CHECK/SUCCESS[1]`.
    pub location: String,
    /// What differs.
    pub detail: String,
}

impl std::fmt::Display for ParityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.detail)
    }
}

#[derive(Deserialize)]
struct RawContent {
    #[serde(rename = "CRITICAL_OUTCOMES")]
    critical: RawCritical,
    #[serde(rename = "COMBINED", default)]
    combined: BTreeMap<String, RawSynergyText>,
    #[serde(flatten)]
    responses: BTreeMap<String, BTreeMap<String, Vec<NarrativeEntry>>>,
}

#[derive(Deserialize)]
struct RawCritical {
    #[serde(rename = "CRITICAL_SUCCESS")]
    success: NarrativeEntry,
    #[serde(rename = "CRITICAL_FAILURE")]
    failure: NarrativeEntry,
}

#[derive(Deserialize)]
struct RawSynergyText {
    bonus: Option<String>,
    penalty: Option<String>,
}

impl ContentRegistry {
    /// An empty registry with just the two critical outcomes.
    pub fn new(critical_success: CriticalOutcome, critical_failure: CriticalOutcome) -> Self {
        Self {
            narratives: BTreeMap::new(),
            critical_success,
            critical_failure,
            synergy_texts: BTreeMap::new(),
        }
    }

    /// Add narrative entries for a response type and ordinary bucket.
    pub fn with_entries(
        mut self,
        kind: ResponseType,
        bucket: Bucket,
        entries: impl IntoIterator<Item = NarrativeEntry>,
    ) -> Self {
        self.narratives
            .entry((kind, bucket))
            .or_default()
            .extend(entries);
        self
    }

    /// Set the text of a synergy rule.
    pub fn with_synergy_text(mut self, kind: SynergyKind, text: impl Into<String>) -> Self {
        self.synergy_texts.insert(kind, text.into());
        self
    }

    /// Load a registry from the JSON content layout.
    ///
    /// The layout maps response-type keys to bucket keys to entry lists, plus
    /// a `CRITICAL_OUTCOMES` section and a `COMBINED` section holding the
    /// synergy texts (each under `bonus` or `penalty`).
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let raw: RawContent = serde_json::from_str(json)?;
        let mut registry = Self::new(raw.critical.success, raw.critical.failure);

        for (type_key, buckets) in raw.responses {
            let kind = ResponseType::parse(&type_key)
                .ok_or_else(|| ContentError::UnknownResponseType(type_key.clone()))?;
            for (bucket_key, entries) in buckets {
                let bucket = Bucket::parse(&bucket_key)
                    .filter(|b| !b.is_critical())
                    .ok_or_else(|| ContentError::UnknownBucket {
                        response_type: type_key.clone(),
                        bucket: bucket_key.clone(),
                    })?;
                registry = registry.with_entries(kind, bucket, entries);
            }
        }

        for kind in SynergyKind::all() {
            let text = raw
                .combined
                .get(kind.key())
                .and_then(|t| t.bonus.clone().or_else(|| t.penalty.clone()))
                .ok_or_else(|| ContentError::MissingSynergyText(kind.key().to_string()))?;
            registry.synergy_texts.insert(*kind, text);
        }

        Ok(registry)
    }

    /// Look up the narrative list for a response type and bucket.
    pub fn narratives(&self, kind: ResponseType, bucket: Bucket) -> NarrativeSlot<'_> {
        match self.narratives.get(&(kind, bucket)) {
            Some(entries) if !entries.is_empty() => NarrativeSlot::Entries(entries),
            _ => NarrativeSlot::Missing,
        }
    }

    /// The critical override for a critical bucket, `None` otherwise.
    pub fn critical(&self, bucket: Bucket) -> Option<&CriticalOutcome> {
        match bucket {
            Bucket::CriticalSuccess => Some(&self.critical_success),
            Bucket::CriticalFailure => Some(&self.critical_failure),
            _ => None,
        }
    }

    /// The text of a synergy rule, if the pack defines one.
    pub fn synergy_text(&self, kind: SynergyKind) -> Option<&str> {
        self.synergy_texts.get(&kind).map(String::as_str)
    }

    /// Response type and bucket combinations without any narration.
    pub fn missing_slots(&self) -> Vec<(ResponseType, Bucket)> {
        ResponseType::all()
            .iter()
            .flat_map(|kind| Bucket::ordinary().iter().map(move |b| (*kind, *b)))
            .filter(|(kind, bucket)| self.narratives(*kind, *bucket) == NarrativeSlot::Missing)
            .collect()
    }

    /// Compare two language packs for structural and balance differences.
    ///
    /// Text may differ freely; keys, entry counts, and shifts may not.
    pub fn parity_issues(&self, other: &ContentRegistry) -> Vec<ParityIssue> {
        let mut issues = Vec::new();
        let mut push = |location: String, detail: String| {
            issues.push(ParityIssue { location, detail });
        };

        for kind in ResponseType::all() {
            for bucket in Bucket::ordinary() {
                let location = format!("{}/{}", kind.key(), bucket.key());
                let ours = self.narratives.get(&(*kind, *bucket)).map(Vec::as_slice).unwrap_or(&[]);
                let theirs = other.narratives.get(&(*kind, *bucket)).map(Vec::as_slice).unwrap_or(&[]);
                if ours.len() != theirs.len() {
                    push(location, format!("{} entries vs {}", ours.len(), theirs.len()));
                    continue;
                }
                for (i, (a, b)) in ours.iter().zip(theirs).enumerate() {
                    if a.shift != b.shift {
                        push(format!("{location}[{i}]"), format!("shift {} vs {}", a.shift, b.shift));
                    }
                }
            }
        }

        for bucket in [Bucket::CriticalSuccess, Bucket::CriticalFailure] {
            if let (Some(a), Some(b)) = (self.critical(bucket), other.critical(bucket))
                && a.shift != b.shift
            {
                push(bucket.key().to_string(), format!("shift {} vs {}", a.shift, b.shift));
            }
        }

        for kind in SynergyKind::all() {
            let ours = self.synergy_text(*kind).is_some();
            let theirs = other.synergy_text(*kind).is_some();
            if ours != theirs {
                push(
                    kind.key().to_string(),
                    format!("text defined {ours} vs {theirs}"),
                );
            }
        }

        issues
    }

    /// Like [`parity_issues`](Self::parity_issues), but as a result.
    pub fn check_parity(&self, other: &ContentRegistry) -> ContentResult<()> {
        let issues = self.parity_issues(other);
        for issue in &issues {
            tracing::warn!(%issue, "language pack mismatch");
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ContentError::ParityMismatch(issues.len()))
        }
    }
}
