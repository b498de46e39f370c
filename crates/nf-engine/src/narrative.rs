//! Narrative selection: turning a resolved bucket into a narrated line.

use crate::content::{ContentRegistry, NarrativeEntry, NarrativeSlot};
use crate::random::RandomSource;
use crate::response::ResponseType;
use crate::roll::Bucket;

/// Narration used when the content table has nothing for a combination.
pub const FALLBACK_TEXT: &str = "The situation evolves...";

/// Narration used when a scenario has no probabilities for a response type.
pub const UNKNOWN_RESPONSE_TEXT: &str = "Unknown response type.";

/// Choose the narrated result for a response type and resolved bucket.
///
/// Critical buckets return the fixed critical override without drawing.
/// Ordinary buckets draw one sample to pick an entry uniformly; a missing or
/// empty list yields a zero-shift fallback and draws nothing.
pub fn select(
    registry: &ContentRegistry,
    kind: ResponseType,
    bucket: Bucket,
    source: &mut dyn RandomSource,
) -> NarrativeEntry {
    if let Some(critical) = registry.critical(bucket) {
        return critical.clone();
    }

    match registry.narratives(kind, bucket) {
        NarrativeSlot::Entries(entries) => entries[source.pick_index(entries.len())].clone(),
        NarrativeSlot::Missing => {
            tracing::warn!(
                response_type = kind.key(),
                bucket = bucket.key(),
                "no narrative found, using fallback"
            );
            NarrativeEntry::new(FALLBACK_TEXT, 0)
        }
    }
}
