//! Model identifier and catalog metadata

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Identifier of a debate participant model (Value Object)
///
/// Ids are opaque to the engine; which backend serves an id is decided by
/// the provider registry at the boundary. Human-facing metadata (display
/// name, color) lives in the [`ModelCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    /// Create a new model id
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        Self::try_new(id).expect("model id cannot be empty")
    }

    /// Try to create a model id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The default participant set (claude + gpt, the stock pairing)
    pub fn default_models() -> Vec<ModelId> {
        vec![ModelId::new("claude"), ModelId::new("gpt")]
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ModelId::try_new(s).ok_or_else(|| DomainError::InvalidModel(s.to_string()))
    }
}

impl Serialize for ModelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Display metadata for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub id: ModelId,
    /// Name used when quoting this model to its peers and in rendered output
    pub display_name: String,
    /// Hex color for consumers that render the debate
    pub color: String,
}

impl ModelProfile {
    pub fn new(
        id: ModelId,
        display_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            color: color.into(),
        }
    }
}

/// Ordered registry of model display metadata
///
/// Seeded with the stock profiles; unknown ids resolve to a profile
/// synthesized from the id so the engine never refuses a model it has no
/// metadata for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    profiles: Vec<ModelProfile>,
}

/// Color assigned to models without a configured profile
const FALLBACK_COLOR: &str = "#6B7280";

impl ModelCatalog {
    /// Catalog with the stock model profiles
    pub fn builtin() -> Self {
        Self {
            profiles: vec![
                ModelProfile::new(ModelId::new("claude"), "Claude", "#D97706"),
                ModelProfile::new(ModelId::new("gpt"), "GPT-4o", "#10B981"),
                ModelProfile::new(ModelId::new("gemini"), "Gemini", "#3B82F6"),
            ],
        }
    }

    /// Empty catalog (profiles come from configuration)
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// All registered profiles, in registration order
    pub fn profiles(&self) -> &[ModelProfile] {
        &self.profiles
    }

    /// Look up a registered profile
    pub fn get(&self, id: &ModelId) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    /// Resolve a profile, synthesizing one for unregistered ids
    pub fn profile(&self, id: &ModelId) -> ModelProfile {
        self.get(id).cloned().unwrap_or_else(|| {
            ModelProfile::new(id.clone(), capitalize(id.as_str()), FALLBACK_COLOR)
        })
    }

    /// Display name for a model, synthesized if unregistered
    pub fn display_name(&self, id: &ModelId) -> String {
        self.profile(id).display_name
    }

    /// Insert or replace a profile, preserving registration order on replace
    pub fn upsert(&mut self, profile: ModelProfile) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
