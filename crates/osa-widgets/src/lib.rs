//! OSA Widget Layer
//!
//! Widget container dispatch: a registry maps widget identifiers to
//! renderers, and each renderer turns `ResolvedContent` into a
//! framework-neutral `RenderNode` tree.
//!
//! # Key Concepts
//!
//! - **Registry verification**: the registry is checked against the rule
//!   table at startup, so a rule naming an unregistered widget fails
//!   fast instead of at render time.
//! - **Failure isolation**: one renderer erroring or panicking degrades
//!   only its own slot to an inline error node.
//! - **Neutral output**: the node tree is `Serialize`, leaving the
//!   actual presentation to the embedding application.

#![warn(missing_docs)]

pub mod node;
pub mod registry;
pub mod widgets;

pub use node::RenderNode;
pub use registry::{RenderError, WidgetRegistry, WidgetRenderer};
pub use widgets::default_renderers;
