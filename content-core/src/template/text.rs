//! Text template: abstracts and free text blocks.

use super::{foreign_payload, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Template for [`BaseShape::Text`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTemplate;

impl ContentTemplate for TextTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::Text
    }

    fn fields(&self, _kind: ElementKind) -> &'static [FieldKey] {
        &[FieldKey::Text]
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        match &version.data.payload {
            ShapePayload::Text { text } => vec![SurfaceNode::TextField {
                field: FieldKey::Text,
                label: match element.type_name {
                    ElementKind::Abstract => "Abstract".to_string(),
                    _ => "Text".to_string(),
                },
                value: text.clone(),
                multiline: true,
            }],
            other => vec![foreign_payload(self.shape(), other)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;
    use crate::descriptor::ContentDescriptor;

    #[test]
    fn test_abstract_surface_is_multiline() {
        let ctx = SequentialContext::new("tester");
        let descriptor = TextTemplate.create_default(&ctx, ElementKind::Abstract, false);
        let surface = TextTemplate.produce_editing_surface(&ctx, &descriptor);

        assert_eq!(surface.fields(), vec![FieldKey::Text]);
        match &surface.root {
            SurfaceNode::Section { children, .. } => match &children[0] {
                SurfaceNode::TextField {
                    label, multiline, value, ..
                } => {
                    assert_eq!(label, "Abstract");
                    assert!(*multiline);
                    assert!(value.is_empty());
                }
                other => panic!("Expected TextField, got {other:?}"),
            },
            other => panic!("Expected Section, got {other:?}"),
        }
    }

    #[test]
    fn test_commit_appends_only_on_change() {
        let ctx = SequentialContext::new("tester");
        let descriptor = TextTemplate.create_default(&ctx, ElementKind::Text, false);

        let first = TextTemplate
            .commit_field(&ctx, &descriptor, FieldKey::Text, "Hello")
            .expect("should commit")
            .expect("value changed");
        let unchanged = TextTemplate
            .commit_field(&ctx, &first, FieldKey::Text, "Hello")
            .expect("should commit");

        assert!(unchanged.is_none());
        let element = first.element().expect("element");
        assert_eq!(element.data.len(), 1);
        assert!(matches!(first, ContentDescriptor::ElementOnly { .. }));
    }
}
