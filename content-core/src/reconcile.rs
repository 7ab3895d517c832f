//! Reconciliation - bringing an item's content into line with its schema.
//!
//! ```text
//! item ──► item_schema(item.type_name)
//!            │
//!            ├─ item_types not in elements ──► create_default(k, false) ──► push element
//!            └─ uploadables not in slots ────► create_default(k, true)  ──► push slot
//! ```
//!
//! Reconciliation only adds. Existing elements and slots are never removed,
//! changed or reordered, and content whose kind the schema does not mention is
//! kept. A second pass finds nothing missing, so fitting is idempotent.

use crate::context::EngineContext;
use crate::descriptor::ContentDescriptor;
use crate::item::ItemDescriptor;
use crate::kind::ElementKind;
use crate::registry::TemplateRegistry;
use crate::schema::item_schema;

/// Schema kinds an item lacks, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingContent {
    /// Kinds to add as elements.
    pub element_kinds: Vec<ElementKind>,
    /// Kinds to add as uploadable slots.
    pub uploadable_kinds: Vec<ElementKind>,
}

impl MissingContent {
    /// Whether the item already conforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_kinds.is_empty() && self.uploadable_kinds.is_empty()
    }
}

/// Work out which supported schema kinds `item` lacks.
#[must_use]
pub fn missing_content(registry: &TemplateRegistry, item: &ItemDescriptor) -> MissingContent {
    let schema = item_schema(item.type_name);

    let elements: Vec<ElementKind> = item.elements.iter().map(|e| e.type_name).collect();
    let slots: Vec<ElementKind> =
        item.uploadable_elements.iter().map(|u| u.type_name).collect();

    MissingContent {
        element_kinds: missing_kinds(registry, schema.item_types, &elements),
        uploadable_kinds: missing_kinds(registry, schema.uploadable_element_types, &slots),
    }
}

fn missing_kinds(
    registry: &TemplateRegistry,
    wanted: &[ElementKind],
    present: &[ElementKind],
) -> Vec<ElementKind> {
    let mut out: Vec<ElementKind> = Vec::new();
    for &kind in wanted {
        if registry.is_supported(kind) && !present.contains(&kind) && !out.contains(&kind) {
            out.push(kind);
        }
    }
    out
}

/// Return a copy of `item` with every missing schema kind added as fresh content.
///
/// Missing element kinds get an `ElementOnly` default, missing slot kinds a
/// `RequiredOnly` default, both appended after the existing entries.
#[must_use]
pub fn fit_item_to_template(
    registry: &TemplateRegistry,
    ctx: &dyn EngineContext,
    item: &ItemDescriptor,
) -> ItemDescriptor {
    let missing = missing_content(registry, item);
    if missing.is_empty() {
        return item.clone();
    }

    tracing::debug!(
        item = %item.id,
        kind = %item.type_name,
        elements = ?missing.element_kinds,
        uploadables = ?missing.uploadable_kinds,
        "adding schema content"
    );

    let mut next = item.clone();
    for kind in missing.element_kinds {
        let descriptor = registry.resolve(kind).create_default(ctx, kind, false);
        debug_assert!(
            matches!(descriptor, ContentDescriptor::ElementOnly { .. }),
            "{kind} default is not ElementOnly"
        );
        if let ContentDescriptor::ElementOnly { element } = descriptor {
            next.elements.push(element);
        } else {
            tracing::error!(%kind, "template returned a slot for an element default");
        }
    }
    for kind in missing.uploadable_kinds {
        let descriptor = registry.resolve(kind).create_default(ctx, kind, true);
        debug_assert!(
            matches!(descriptor, ContentDescriptor::RequiredOnly { .. }),
            "{kind} default is not RequiredOnly"
        );
        if let ContentDescriptor::RequiredOnly { uploadable_element } = descriptor {
            next.uploadable_elements.push(uploadable_element);
        } else {
            tracing::error!(%kind, "template returned an element for a slot default");
        }
    }
    next
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::context::SequentialContext;
    use crate::element::{ContentId, ElementDescriptor, UploadableElementDescriptor};
    use crate::item::ItemKind;
    use crate::kind::BaseShape;
    use proptest::prelude::*;

    /// Item kind plus stored element and slot kinds, duplicates and off-schema kinds included.
    fn arb_stored() -> impl Strategy<Value = (ItemKind, Vec<ElementKind>, Vec<ElementKind>)> {
        let kind = || prop::sample::select(ElementKind::ALL.to_vec());
        (
            prop::sample::select(ItemKind::ALL.to_vec()),
            prop::collection::vec(kind(), 0..6),
            prop::collection::vec(kind(), 0..6),
        )
    }

    fn arb_registry() -> impl Strategy<Value = TemplateRegistry> {
        prop::option::of(prop::sample::select(BaseShape::ALL.to_vec())).prop_map(|disabled| {
            let config = EngineConfig {
                disabled_shapes: disabled.into_iter().collect(),
                ..EngineConfig::default()
            };
            TemplateRegistry::from_config(&config).expect("complete registry")
        })
    }

    fn build_item(
        ctx: &SequentialContext,
        (kind, elements, slots): (ItemKind, Vec<ElementKind>, Vec<ElementKind>),
    ) -> ItemDescriptor {
        let mut item = ItemDescriptor::new(ContentId::from_uuid(ctx.new_id()), kind, "Stored");
        item.elements = elements
            .into_iter()
            .map(|k| ElementDescriptor::new(ctx, k))
            .collect();
        item.uploadable_elements = slots
            .into_iter()
            .map(|k| UploadableElementDescriptor::new(ctx, k))
            .collect();
        item
    }

    proptest! {
        #[test]
        fn prop_fit_is_idempotent(stored in arb_stored(), registry in arb_registry()) {
            let ctx = SequentialContext::new("tester");
            let item = build_item(&ctx, stored);

            let once = fit_item_to_template(&registry, &ctx, &item);
            let issued = ctx.ids_issued();
            let twice = fit_item_to_template(&registry, &ctx, &once);

            prop_assert_eq!(&twice, &once);
            prop_assert_eq!(ctx.ids_issued(), issued);
            prop_assert!(missing_content(&registry, &once).is_empty());
        }

        #[test]
        fn prop_fit_keeps_stored_content_as_prefix(
            stored in arb_stored(),
            registry in arb_registry(),
        ) {
            let ctx = SequentialContext::new("tester");
            let item = build_item(&ctx, stored);
            let fitted = fit_item_to_template(&registry, &ctx, &item);

            let elements = item.elements.len();
            let slots = item.uploadable_elements.len();
            prop_assert_eq!(&fitted.elements[..elements], &item.elements[..]);
            prop_assert_eq!(&fitted.uploadable_elements[..slots], &item.uploadable_elements[..]);
            prop_assert_eq!(fitted.id, item.id);
            prop_assert_eq!(&fitted.title, &item.title);

            // Only schema kinds are added, each once
            let schema = item_schema(item.type_name);
            for added in &fitted.elements[elements..] {
                prop_assert!(schema.item_types.contains(&added.type_name));
                prop_assert!(registry.is_supported(added.type_name));
                prop_assert!(!item.elements.iter().any(|e| e.type_name == added.type_name));
            }
            for added in &fitted.uploadable_elements[slots..] {
                prop_assert!(schema.uploadable_element_types.contains(&added.type_name));
                prop_assert!(registry.is_supported(added.type_name));
                prop_assert!(
                    !item.uploadable_elements.iter().any(|u| u.type_name == added.type_name)
                );
            }
        }
    }
}
