//! Model catalog descriptors and filter policies.

use serde::{Deserialize, Serialize};

/// Context window to report when the provider omits one.
pub const DEFAULT_CONTEXT_LENGTH: u32 = 4096;

/// A displayable model entry, either parsed from the provider's catalog
/// or taken from the static fallback table. Not mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    /// Provider-namespaced ID, e.g. `vendor/model-name:tier`.
    pub id: String,
    pub name: String,
    pub provider: String,
    pub context_length: u32,
}

impl ModelInfo {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
        context_length: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider: provider.into(),
            context_length,
        }
    }

    /// Build an entry from a bare model ID, deriving the display name from
    /// the segment after the namespace and the provider label from the
    /// namespace itself.
    pub fn from_id(id: &str) -> Self {
        let trimmed_tier = id.split(':').next().unwrap_or(id);
        let name = title_case(trimmed_tier.rsplit('/').next().unwrap_or(trimmed_tier));
        let provider = title_case(id.split('/').next().unwrap_or(""));
        Self::new(id, name, provider, DEFAULT_CONTEXT_LENGTH)
    }
}

/// Turns a `some-model-name` segment into `Some Model Name`.
pub fn title_case(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Which live catalog entries survive into the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModelFilter {
    /// Keep only free-tier models (`:free` suffix in the ID).
    #[default]
    FreeOnly,
    /// Keep only models whose namespace appears in the allow-list.
    Keep(Vec<String>),
    /// Keep everything the provider returns.
    All,
}

impl ModelFilter {
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::FreeOnly => id.contains(":free"),
            Self::Keep(namespaces) => {
                let namespace = id.split('/').next().unwrap_or("");
                namespaces.iter().any(|allowed| allowed == namespace)
            },
            Self::All => true,
        }
    }
}

/// A named slot in the fixed-order model list. Resolved against the live
/// catalog by keyword matching, falling back to the embedded ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelSlot {
    pub display_name: String,
    /// Lowercase keywords matched against live catalog IDs.
    pub keywords: Vec<String>,
    /// Used verbatim when no live entry matches.
    pub fallback_id: String,
}

impl ModelSlot {
    pub fn new(
        display_name: impl Into<String>,
        keywords: &[&str],
        fallback_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            fallback_id: fallback_id.into(),
        }
    }
}
