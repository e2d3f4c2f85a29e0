//! Widget renderer registry
//!
//! Dispatch from `WidgetId` to a concrete renderer, built once at
//! startup. The registry is verified against the rule table before any
//! rendering happens, so a rule referencing an unregistered widget is a
//! startup error instead of a runtime surprise.
//!
//! Rendering is isolated per widget: a renderer returning an error or
//! panicking produces an inline error node scoped to that widget slot,
//! never a propagated failure.

use crate::node::RenderNode;
use crate::widgets;
use osa_domain::{ResolvedContent, WidgetId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Widget rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    /// A rule references a widget with no registered renderer
    #[error("No renderer registered for widget: {0}")]
    MissingRenderer(WidgetId),

    /// A renderer reported a failure
    #[error("Widget {widget} failed to render: {message}")]
    RenderFailed {
        /// The widget that failed
        widget: WidgetId,
        /// Failure description
        message: String,
    },
}

/// Trait for concrete widget renderers
pub trait WidgetRenderer: Send + Sync {
    /// The widget this renderer handles
    fn widget(&self) -> WidgetId;

    /// Render resolved content into a node tree
    fn render(&self, content: &ResolvedContent) -> Result<RenderNode, RenderError>;
}

/// Registry mapping widget identifiers to renderers
pub struct WidgetRegistry {
    renderers: HashMap<WidgetId, Box<dyn WidgetRenderer>>,
}

impl WidgetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Create a registry with every built-in renderer registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for renderer in widgets::default_renderers() {
            registry.register(renderer);
        }
        registry
    }

    /// Register a renderer, replacing any existing one for its widget
    pub fn register(&mut self, renderer: Box<dyn WidgetRenderer>) {
        self.renderers.insert(renderer.widget(), renderer);
    }

    /// Verify that every given widget has a registered renderer
    pub fn verify<I>(&self, widgets: I) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = WidgetId>,
    {
        for widget in widgets {
            if !self.renderers.contains_key(&widget) {
                return Err(RenderError::MissingRenderer(widget));
            }
        }
        Ok(())
    }

    /// Number of registered renderers
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// True when no renderer is registered
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render one widget, isolating failure to its slot
    ///
    /// Always returns a node: renderer errors and panics both collapse
    /// into an `InlineError` node for this widget, leaving the rest of
    /// the page unaffected.
    pub fn render(&self, widget: WidgetId, content: &ResolvedContent) -> RenderNode {
        let renderer = match self.renderers.get(&widget) {
            Some(renderer) => renderer,
            None => {
                tracing::error!(widget = %widget, "no renderer registered");
                return inline_error(widget, "This section is temporarily unavailable");
            }
        };

        match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(content))) {
            Ok(Ok(node)) => node,
            Ok(Err(e)) => {
                tracing::error!(widget = %widget, error = %e, "widget render failed");
                inline_error(widget, "This section could not be displayed")
            }
            Err(payload) => {
                tracing::error!(
                    widget = %widget,
                    panic = %panic_message(payload.as_ref()),
                    "widget render panicked"
                );
                inline_error(widget, "This section could not be displayed")
            }
        }
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn inline_error(widget: WidgetId, message: &str) -> RenderNode {
    RenderNode::InlineError {
        widget: widget.as_str().to_string(),
        message: message.to_string(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
