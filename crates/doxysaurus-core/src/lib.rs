//! doxysaurus-core: Doxygen XML to documentation pages.
//!
//! The pipeline is [`Workspace::load`] (parse every compound file, link the
//! collections, assign permalinks), then a [`Renderer`] per output format,
//! then [`build_sidebar`] for navigation.

pub mod collection;
pub mod diagnostics;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod options;
pub mod permalink;
pub mod render;
pub mod sidebar;
pub mod workspace;
pub mod xml;

pub use collection::{CollectionKind, CompoundNode};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{Error, LinkError, ParseError, RenderError};
pub use hierarchy::Collections;
pub use options::Options;
pub use permalink::Resolver;
pub use render::{OutputFormat, Page, Renderer};
pub use sidebar::{build_sidebar, build_sidebar_filtered, SidebarItem};
pub use workspace::Workspace;
