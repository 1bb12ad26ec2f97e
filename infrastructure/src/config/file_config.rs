//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! Example configuration:
//!
//! ```toml
//! [debate]
//! rounds = 2
//! models = ["claude", "gpt"]
//! timeout_secs = 60
//!
//! [provider]
//! program = "ollama"
//! args = ["run", "{model}"]
//!
//! [models.claude]
//! display_name = "Claude"
//! color = "#D97706"
//! ```

use std::collections::BTreeMap;

use consensus_application::{DebateParams, SynthesisMode};
use consensus_domain::{DEFAULT_ROUNDS, ModelCatalog, ModelId, ModelProfile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("rounds cannot be 0")]
    InvalidRounds,

    #[error("timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("provider args reference no {{model}} placeholder")]
    MissingModelPlaceholder,
}

/// Raw debate configuration from TOML (`[debate]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Number of debate rounds
    pub rounds: u32,
    /// Participating model names; empty means the built-in default pair
    pub models: Vec<String>,
    /// Timeout in seconds for each provider call
    pub timeout_secs: u64,
    /// Token budget per provider call
    pub max_tokens: u32,
    /// Consensus strategy (uses application type)
    pub synthesis: SynthesisMode,
    /// Buffer size for the progress event channel
    pub event_buffer: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            models: Vec::new(),
            timeout_secs: 60,
            max_tokens: 4000,
            synthesis: SynthesisMode::default(),
            event_buffer: 64,
        }
    }
}

impl FileDebateConfig {
    /// Parse configured model names, falling back to the default pair.
    ///
    /// Whitespace-only names are skipped here; `validate` reports them.
    pub fn selected_models(&self) -> Vec<ModelId> {
        let models: Vec<ModelId> = self
            .models
            .iter()
            .filter_map(|name| ModelId::try_new(name.as_str()))
            .collect();
        if models.is_empty() {
            ModelId::default_models()
        } else {
            models
        }
    }

    /// Convert into application-layer parameters.
    pub fn to_params(&self) -> DebateParams {
        DebateParams::default()
            .with_timeout_seconds(self.timeout_secs)
            .with_max_tokens(self.max_tokens)
            .with_synthesis(self.synthesis)
            .with_event_buffer(self.event_buffer)
    }
}

/// Raw provider command configuration from TOML (`[provider]` section)
///
/// The configured program is spawned once per provider call, with `{model}`
/// in the argument list replaced by the model name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Executable serving model calls; `None` disables subprocess providers
    pub program: Option<String>,
    /// Arguments passed to the program, with `{model}` substitution
    pub args: Vec<String>,
}

impl FileProviderConfig {
    /// Stock argument list, the `-m <model>` convention of prompt-on-stdin
    /// CLIs.
    pub fn default_args() -> Vec<String> {
        vec!["-m".to_string(), "{model}".to_string()]
    }
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Self::default_args(),
        }
    }
}

/// Raw model profile from TOML (`[models.<id>]` entries)
///
/// A per-model `program`/`args` pair routes this model through its own
/// command instead of the global `[provider]` one; such args may hard-code
/// the vendor model name, so the `{model}` placeholder rule does not apply
/// to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelProfile {
    /// Human-readable name used when quoting this model to its peers
    pub display_name: Option<String>,
    /// Accent color hint for frontends
    pub color: Option<String>,
    /// Command serving this model, overriding `[provider]` program
    pub program: Option<String>,
    /// Arguments for the per-model command; falls back to `[provider]` args
    pub args: Option<Vec<String>>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate settings
    pub debate: FileDebateConfig,
    /// Provider command settings
    pub provider: FileProviderConfig,
    /// Per-model display overrides
    pub models: BTreeMap<String, FileModelProfile>,
}

impl FileConfig {
    /// Build the model catalog: built-in profiles plus file overrides.
    pub fn catalog(&self) -> ModelCatalog {
        let mut catalog = ModelCatalog::builtin();
        for (name, profile) in &self.models {
            let Some(id) = ModelId::try_new(name.as_str()) else {
                continue;
            };
            let base = catalog.profile(&id);
            catalog.upsert(ModelProfile::new(
                id,
                profile.display_name.clone().unwrap_or(base.display_name),
                profile.color.clone().unwrap_or(base.color),
            ));
        }
        catalog
    }

    /// Resolve the command serving a model.
    ///
    /// A `[models.<id>]` override wins over the global `[provider]` entry,
    /// field by field. `None` means no command is configured for this model
    /// at all.
    pub fn provider_command_for(&self, id: &ModelId) -> Option<(String, Vec<String>)> {
        let profile = self.models.get(id.as_str());
        let program = profile
            .and_then(|p| p.program.clone())
            .or_else(|| self.provider.program.clone())?;
        let args = profile
            .and_then(|p| p.args.clone())
            .unwrap_or_else(|| self.provider.args.clone());
        Some((program, args))
    }

    /// Fall back to defaults for values `validate` rejects.
    ///
    /// `selected_models` already skips empty names; zero rounds and a zero
    /// timeout return to their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = FileDebateConfig::default();
        if self.debate.rounds == 0 {
            self.debate.rounds = defaults.rounds;
        }
        if self.debate.timeout_secs == 0 {
            self.debate.timeout_secs = defaults.timeout_secs;
        }
        self
    }

    /// Collect every problem in the file rather than stopping at the first.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        if self.debate.rounds == 0 {
            issues.push(ConfigValidationError::InvalidRounds);
        }
        if self.debate.timeout_secs == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.debate.models.iter().any(|m| m.trim().is_empty()) {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.provider.program.is_some()
            && !self.provider.args.iter().any(|a| a.contains("{model}"))
        {
            issues.push(ConfigValidationError::MissingModelPlaceholder);
        }
        issues
    }
}
