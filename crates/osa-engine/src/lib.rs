//! OSA Rendering Engine
//!
//! Top-level composition of the tiered rendering pipeline:
//!
//! 1. Classify the URL path into a `(tier1, tier2, tier3)` triple
//! 2. Resolve the rendering rule for the triple
//! 3. Fetch tier data concurrently, with caching and de-duplication
//! 4. Resolve widget content against the rule's manifest (Never Blank)
//! 5. Dispatch to the widget renderer, isolating per-widget failure
//!
//! Construction is fallible (bad configuration, rule table referencing
//! an unregistered widget); rendering is not. Once an [`Engine`] exists,
//! every render produces a complete page, degrading through cache and
//! placeholder substitution instead of erroring.

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod session;

pub use config::EngineConfig;
pub use engine::{Engine, RenderedPage};
pub use session::{PageSession, RefreshWorker};

use osa_fetch::FetchError;
use osa_routes::RulesError;
use osa_widgets::RenderError;
use thiserror::Error;

/// Errors that can occur assembling the engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to read a configuration file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required configuration field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Rule override configuration is invalid
    #[error("Rule configuration error: {0}")]
    Rules(#[from] RulesError),

    /// The HTTP endpoint could not be built
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] FetchError),

    /// The rule table references a widget with no renderer
    #[error("Widget registry error: {0}")]
    Registry(#[from] RenderError),
}
