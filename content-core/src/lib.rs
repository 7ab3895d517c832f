//! # Content Core
//!
//! Template engine for conference content: which kinds of content exist, how
//! each kind is created, summarised and edited, and how an item is brought into
//! line with the content its kind calls for.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     content-core                     │
//! ├──────────────────────────────────────────────────────┤
//! │  Taxonomy            │  Data model                   │
//! │  - ElementKind (33)  │  - Version chains             │
//! │  - BaseShape (6)     │  - Element / slot descriptors │
//! │  - ItemKind          │  - ContentDescriptor          │
//! ├──────────────────────────────────────────────────────┤
//! │  Templates           │  Registry & reconciliation    │
//! │  - one per shape     │  - shape → template table     │
//! │  - editing surfaces  │  - item schemas               │
//! │  - field commits     │  - fit_item_to_template       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers and timestamps come from an injected [`EngineContext`], so the
//! whole engine runs deterministically under test.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod context;
pub mod descriptor;
pub mod edit;
pub mod element;
pub mod error;
pub mod item;
pub mod kind;
pub mod reconcile;
pub mod registry;
pub mod schema;
pub mod surface;
pub mod template;

pub use config::EngineConfig;
pub use context::{EngineContext, SequentialContext, SystemContext};
pub use descriptor::ContentDescriptor;
pub use edit::{EditBuffer, EditSession};
pub use element::{
    ContentId, ElementDescriptor, ElementVersion, ShapePayload, UploadableElementDescriptor,
    VersionChain,
};
pub use error::{ContentError, ContentResult};
pub use item::{ItemDescriptor, ItemKind};
pub use kind::{kind_to_shape, BaseShape, ElementKind};
pub use reconcile::{fit_item_to_template, missing_content, MissingContent};
pub use registry::{RegistryBuilder, TemplateRegistry};
pub use schema::{item_schema, ItemSchema};
pub use surface::{EditingSurface, FieldKey, SurfaceNode};
pub use template::ContentTemplate;

/// Content core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
