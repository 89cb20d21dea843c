//! Slot mapping: resolve a fixed list of named model slots against the
//! live catalog, keyword by keyword, falling back to embedded IDs. The
//! result has exactly one entry per slot, in slot order, no matter what
//! the provider returned.

use goalbreaker_types::{ModelInfo, ModelSlot};

/// Strategy for binding one slot to a live catalog entry.
pub trait SlotMatcher: Send + Sync {
    /// The live entry this slot binds to, or `None` to use the fallback ID.
    fn resolve(&self, slot: &ModelSlot, live: &[ModelInfo]) -> Option<ModelInfo>;
}

/// Default heuristic, tried in order: exact fallback-ID hit, then an entry
/// containing every keyword, then the entry containing the most keywords
/// provided that is a strict majority of them.
pub struct KeywordMatcher;

impl SlotMatcher for KeywordMatcher {
    fn resolve(&self, slot: &ModelSlot, live: &[ModelInfo]) -> Option<ModelInfo> {
        if let Some(exact) = live.iter().find(|m| m.id == slot.fallback_id) {
            return Some(exact.clone());
        }
        if slot.keywords.is_empty() {
            return None;
        }

        if let Some(full) =
            live.iter().find(|m| keyword_hits(&m.id, slot) == slot.keywords.len())
        {
            return Some(full.clone());
        }

        live.iter()
            .map(|m| (keyword_hits(&m.id, slot), m))
            .filter(|(hits, _)| hits * 2 > slot.keywords.len())
            .max_by_key(|(hits, _)| *hits)
            .map(|(_, m)| m.clone())
    }
}

fn keyword_hits(id: &str, slot: &ModelSlot) -> usize {
    let id = id.to_lowercase();
    slot.keywords.iter().filter(|keyword| id.contains(keyword.as_str())).count()
}

/// Resolve every slot, labeling each result with the slot's display name.
pub fn resolve_slots(
    slots: &[ModelSlot],
    live: &[ModelInfo],
    matcher: &dyn SlotMatcher,
) -> Vec<ModelInfo> {
    slots
        .iter()
        .map(|slot| {
            let mut info = matcher
                .resolve(slot, live)
                .unwrap_or_else(|| ModelInfo::from_id(&slot.fallback_id));
            info.name = slot.display_name.clone();
            info
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_catalog() -> Vec<ModelInfo> {
        vec![
            ModelInfo::from_id("deepseek/deepseek-r1-distill-llama-70b:free"),
            ModelInfo::from_id("google/gemini-2.0-flash-thinking-exp:free"),
            ModelInfo::from_id("mistralai/mistral-small-24b-instruct-2501:free"),
        ]
    }

    #[test]
    fn test_exact_fallback_id_wins() {
        let slot = ModelSlot::new(
            "Fast",
            &["nonsense"],
            "mistralai/mistral-small-24b-instruct-2501:free",
        );
        let found = KeywordMatcher.resolve(&slot, &live_catalog()).unwrap();
        assert_eq!(found.id, "mistralai/mistral-small-24b-instruct-2501:free");
    }

    #[test]
    fn test_all_keywords_match() {
        let slot = ModelSlot::new("Reasoner", &["deepseek", "r1"], "deepseek/deepseek-r1:free");
        let found = KeywordMatcher.resolve(&slot, &live_catalog()).unwrap();
        assert_eq!(found.id, "deepseek/deepseek-r1-distill-llama-70b:free");
    }

    #[test]
    fn test_majority_keywords_match() {
        // 2 of 3 keywords present is a strict majority.
        let slot = ModelSlot::new(
            "Thinker",
            &["gemini", "thinking", "ultra"],
            "google/gemini-pro",
        );
        let found = KeywordMatcher.resolve(&slot, &live_catalog()).unwrap();
        assert_eq!(found.id, "google/gemini-2.0-flash-thinking-exp:free");
    }

    #[test]
    fn test_no_match_falls_back_to_embedded_id() {
        let slot = ModelSlot::new("Writer", &["claude", "opus"], "anthropic/claude-3-haiku");
        let resolved = resolve_slots(&[slot], &live_catalog(), &KeywordMatcher);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "anthropic/claude-3-haiku");
        assert_eq!(resolved[0].name, "Writer");
    }

    #[test]
    fn test_result_is_fixed_length_and_ordered() {
        let slots = vec![
            ModelSlot::new("A", &["gemini"], "google/gemini-pro"),
            ModelSlot::new("B", &["unmatched"], "vendor/fallback-b"),
            ModelSlot::new("C", &["mistral"], "mistralai/mistral-tiny"),
        ];
        let resolved = resolve_slots(&slots, &live_catalog(), &KeywordMatcher);
        let names: Vec<&str> = resolved.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
