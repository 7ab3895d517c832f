//! Link template: display text plus target URL.

use super::{foreign_payload, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Template for [`BaseShape::Link`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTemplate;

impl ContentTemplate for LinkTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::Link
    }

    fn fields(&self, _kind: ElementKind) -> &'static [FieldKey] {
        &[FieldKey::LinkText, FieldKey::Url]
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        let ShapePayload::Link { text, url } = &version.data.payload else {
            return vec![foreign_payload(self.shape(), &version.data.payload)];
        };
        let text_label = match element.type_name {
            ElementKind::LinkButton => "Button text",
            _ => "Text",
        };
        vec![
            SurfaceNode::TextField {
                field: FieldKey::LinkText,
                label: text_label.to_string(),
                value: text.clone(),
                multiline: false,
            },
            SurfaceNode::UrlField {
                field: FieldKey::Url,
                label: "URL".to_string(),
                value: url.clone(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;

    #[test]
    fn test_link_button_label() {
        let ctx = SequentialContext::new("tester");
        let descriptor = LinkTemplate.create_default(&ctx, ElementKind::LinkButton, false);
        let surface = LinkTemplate.produce_editing_surface(&ctx, &descriptor);

        match &surface.root {
            SurfaceNode::Section { children, .. } => {
                assert!(matches!(
                    &children[0],
                    SurfaceNode::TextField { label, .. } if label == "Button text"
                ));
            }
            other => panic!("Expected Section, got {other:?}"),
        }
    }

    #[test]
    fn test_commit_keeps_other_field() {
        let ctx = SequentialContext::new("tester");
        let descriptor = LinkTemplate.create_default(&ctx, ElementKind::PaperLink, false);

        let with_text = LinkTemplate
            .commit_field(&ctx, &descriptor, FieldKey::LinkText, "Read the paper")
            .expect("should commit")
            .expect("value changed");
        let with_url = LinkTemplate
            .commit_field(&ctx, &with_text, FieldKey::Url, "https://example.org/paper.pdf")
            .expect("should commit")
            .expect("value changed");

        let latest = with_url.element().and_then(|e| e.data.latest()).expect("latest version");
        assert_eq!(latest.data.payload.field(FieldKey::LinkText), Some("Read the paper"));
        assert_eq!(latest.data.payload.field(FieldKey::Url), Some("https://example.org/paper.pdf"));
        assert_eq!(with_url.element().map(|e| e.data.len()), Some(2));
    }
}
