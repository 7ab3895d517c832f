//! Template registry - the fixed table from base shape to template.
//!
//! A registry is assembled once at startup through [`RegistryBuilder`], which
//! refuses to build unless every [`BaseShape`] has a template registered under
//! its own shape. After that the table is read-only.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::config::EngineConfig;
use crate::error::{ContentError, ContentResult};
use crate::item::ItemKind;
use crate::kind::{BaseShape, ElementKind};
use crate::schema::item_schema;
use crate::template::{
    ComponentTemplate, ContentTemplate, FileTemplate, LinkTemplate, TextTemplate,
    UnsupportedTemplate, UrlTemplate, VideoTemplate,
};

/// Collects templates and checks coverage before producing a registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    templates: HashMap<BaseShape, Arc<dyn ContentTemplate>>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-filled with the six built-in templates.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .register(FileTemplate)
            .register(ComponentTemplate)
            .register(LinkTemplate)
            .register(TextTemplate)
            .register(UrlTemplate)
            .register(VideoTemplate)
    }

    /// Register a template under the shape it reports, replacing any earlier one.
    #[must_use]
    pub fn register(self, template: impl ContentTemplate + 'static) -> Self {
        let shape = template.shape();
        self.register_as(shape, Arc::new(template))
    }

    /// Register a template under an explicit shape slot.
    ///
    /// [`RegistryBuilder::build`] rejects a template whose own shape differs
    /// from the slot.
    #[must_use]
    pub fn register_as(mut self, shape: BaseShape, template: Arc<dyn ContentTemplate>) -> Self {
        self.templates.insert(shape, template);
        self
    }

    /// Replace the template for `shape` with a display-only placeholder.
    #[must_use]
    pub fn disable(self, shape: BaseShape) -> Self {
        self.register(UnsupportedTemplate::new(shape))
    }

    /// Produce the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::MissingTemplate`] if a shape has no template and
    /// [`ContentError::TemplateShapeMismatch`] if a template sits in another
    /// shape's slot.
    pub fn build(mut self) -> ContentResult<TemplateRegistry> {
        let mut templates = Vec::with_capacity(BaseShape::ALL.len());
        for slot in BaseShape::ALL {
            let template = self
                .templates
                .remove(&slot)
                .ok_or(ContentError::MissingTemplate(slot))?;
            if template.shape() != slot {
                return Err(ContentError::TemplateShapeMismatch {
                    slot,
                    template: template.shape(),
                });
            }
            templates.push(template);
        }
        let unsupported: Vec<BaseShape> = templates
            .iter()
            .filter(|t| !t.supported())
            .map(|t| t.shape())
            .collect();
        tracing::debug!(?unsupported, "template registry built");
        Ok(TemplateRegistry { templates })
    }
}

/// Read-only table from base shape to template.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    /// Indexed by [`BaseShape::index`]; one entry per shape.
    templates: Vec<Arc<dyn ContentTemplate>>,
}

impl TemplateRegistry {
    /// Registry with the six built-in templates.
    #[must_use]
    pub fn standard() -> Self {
        let templates: [Arc<dyn ContentTemplate>; 6] = [
            Arc::new(FileTemplate),
            Arc::new(ComponentTemplate),
            Arc::new(LinkTemplate),
            Arc::new(TextTemplate),
            Arc::new(UrlTemplate),
            Arc::new(VideoTemplate),
        ];
        Self {
            templates: templates.into(),
        }
    }

    /// Registry with the built-in templates, minus the shapes `config` disables.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryBuilder::build`] errors.
    pub fn from_config(config: &EngineConfig) -> ContentResult<Self> {
        config
            .disabled_shapes
            .iter()
            .fold(RegistryBuilder::standard(), |builder, &shape| builder.disable(shape))
            .build()
    }

    /// Template for a base shape.
    #[must_use]
    pub fn template(&self, shape: BaseShape) -> &dyn ContentTemplate {
        self.templates[shape.index()].as_ref()
    }

    /// Template for an element kind.
    #[must_use]
    pub fn resolve(&self, kind: ElementKind) -> &dyn ContentTemplate {
        self.template(kind.shape())
    }

    /// Whether content of `kind` can be created and edited.
    #[must_use]
    pub fn is_supported(&self, kind: ElementKind) -> bool {
        self.resolve(kind).supported()
    }

    /// Kinds offered in add-content menus.
    ///
    /// Without an item kind: every supported kind in declaration order. With one:
    /// the supported kinds its schema names come first (elements, then slots),
    /// followed by every other supported kind.
    #[must_use]
    pub fn list_supported_kinds(&self, item_kind: Option<ItemKind>) -> Vec<ElementKind> {
        let supported = ElementKind::ALL.into_iter().filter(|&kind| self.is_supported(kind));
        let Some(item_kind) = item_kind else {
            return supported.collect();
        };

        let schema = item_schema(item_kind);
        let mut kinds: Vec<ElementKind> = Vec::with_capacity(ElementKind::ALL.len());
        for &kind in schema.item_types.iter().chain(schema.uploadable_element_types) {
            if self.is_supported(kind) && !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds.extend(supported.filter(|kind| !schema.mentions(*kind)));
        kinds
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// The process-wide registry of built-in templates, built on first use.
#[must_use]
pub fn global() -> &'static TemplateRegistry {
    static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TemplateRegistry::standard)
}
