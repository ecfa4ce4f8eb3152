//! Configuration for the shield CLI

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shield_bridges::AdaptiveCoreSink;
use shield_orchestrator::{BridgeRegistry, OrchestratorConfig};
use shield_types::ComponentId;

/// Main CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldConfig {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Which bridges are wired
    #[serde(default)]
    pub bridges: BridgesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Audit output
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            bridges: BridgesConfig::default(),
            logging: LoggingConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// Bridge wiring. A disabled protocol bridge stays registered but unwired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgesConfig {
    #[serde(default = "default_true")]
    pub enable_sentinel: bool,

    #[serde(default = "default_true")]
    pub enable_dqsn: bool,

    #[serde(default = "default_true")]
    pub enable_adn: bool,

    #[serde(default = "default_true")]
    pub enable_guardian_wallet: bool,

    #[serde(default = "default_true")]
    pub enable_qwg: bool,

    /// Read-only Adaptive Core sink
    #[serde(default = "default_true")]
    pub enable_adaptive_core: bool,
}

impl Default for BridgesConfig {
    fn default() -> Self {
        Self {
            enable_sentinel: true,
            enable_dqsn: true,
            enable_adn: true,
            enable_guardian_wallet: true,
            enable_qwg: true,
            enable_adaptive_core: true,
        }
    }
}

impl BridgesConfig {
    pub fn is_enabled(&self, id: ComponentId) -> bool {
        match id {
            ComponentId::Sentinel => self.enable_sentinel,
            ComponentId::Dqsn => self.enable_dqsn,
            ComponentId::Adn => self.enable_adn,
            ComponentId::GuardianWallet => self.enable_guardian_wallet,
            ComponentId::Qwg => self.enable_qwg,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Audit output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Print the canonical audit material to stderr after evaluation
    #[serde(default)]
    pub emit_material: bool,
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_name() -> String {
    "DigiByte Quantum Immune Shield v3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ShieldConfig {
    /// Load configuration: defaults, then the file (if any), then
    /// `SHIELD_*` environment variables with `__` between nested keys,
    /// e.g. `SHIELD_BRIDGES__ENABLE_QWG=false`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&ShieldConfig::default())?);

        // An explicitly named file must exist
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SHIELD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Orchestrator wiring described by this configuration.
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let registry = ComponentId::PROTOCOL_ORDER
            .into_iter()
            .filter(|id| !self.bridges.is_enabled(*id))
            .fold(BridgeRegistry::with_defaults(), BridgeRegistry::without);

        let config = OrchestratorConfig::new(registry);
        if self.bridges.enable_adaptive_core {
            config.with_sink(Arc::new(AdaptiveCoreSink::new()))
        } else {
            config
        }
    }
}
