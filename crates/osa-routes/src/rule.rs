//! Rendering rules
//!
//! A rendering rule decides what one tier combination renders: the widget,
//! the upstream agents whose output feeds it, the DXP tools the data is
//! sourced from, and the field manifest the widget expects.

use osa_domain::{WidgetId, WidgetManifest};
use serde::{Deserialize, Serialize};

/// What to render for one tier combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingRule {
    /// Widget to instantiate
    pub widget: WidgetId,
    /// Upstream agent identifiers whose output feeds this page, in the
    /// order their data is presented
    pub required_agents: Vec<String>,
    /// External DXP tool names relevant for data sourcing
    pub dxp_tools: Vec<String>,
    /// Fields the widget expects
    pub manifest: WidgetManifest,
}

impl RenderingRule {
    /// Create a rule with an empty manifest
    pub fn new(widget: WidgetId) -> Self {
        Self {
            widget,
            required_agents: Vec::new(),
            dxp_tools: Vec::new(),
            manifest: WidgetManifest::new(),
        }
    }

    /// Builder-style agent list
    pub fn with_agents<I, S>(mut self, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_agents = agents.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style DXP tool list
    pub fn with_dxp_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dxp_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style manifest
    pub fn with_manifest(mut self, manifest: WidgetManifest) -> Self {
        self.manifest = manifest;
        self
    }
}
