//! Placeholder for shapes a deployment has switched off.

use super::{read_only_notice, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Display-only template for a disabled base shape.
///
/// Surfaces carry a notice instead of editors and never a pending default.
/// Reconciliation skips kinds of an unsupported shape and add-content menus
/// leave them out.
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedTemplate {
    shape: BaseShape,
}

impl UnsupportedTemplate {
    /// Create a placeholder for `shape`.
    #[must_use]
    pub const fn new(shape: BaseShape) -> Self {
        Self { shape }
    }
}

impl ContentTemplate for UnsupportedTemplate {
    fn shape(&self) -> BaseShape {
        self.shape
    }

    fn supported(&self) -> bool {
        false
    }

    fn fields(&self, _kind: ElementKind) -> &'static [FieldKey] {
        &[]
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        _version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        vec![read_only_notice(element.type_name)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;
    use crate::descriptor::ContentDescriptor;
    use crate::element::ShapePayload;
    use crate::error::ContentError;
    use crate::template::{TextTemplate, VideoTemplate};

    #[test]
    fn test_unsupported_never_materializes() {
        let ctx = SequentialContext::new("tester");
        let descriptor = VideoTemplate.create_default(&ctx, ElementKind::VideoFile, false);
        let template = UnsupportedTemplate::new(BaseShape::Video);

        let surface = template.produce_editing_surface(&ctx, &descriptor);
        assert!(surface.pending.is_none());
        assert!(surface.fields().is_empty());
        assert!(!template.supported());
    }

    #[test]
    fn test_unsupported_rejects_commits() {
        let ctx = SequentialContext::new("tester");
        let descriptor = VideoTemplate.create_default(&ctx, ElementKind::VideoFile, false);
        let result = UnsupportedTemplate::new(BaseShape::Video).commit_field(
            &ctx,
            &descriptor,
            FieldKey::Text,
            "x",
        );
        assert!(matches!(result, Err(ContentError::UnsupportedShape(BaseShape::Video))));
    }

    #[test]
    fn test_unsupported_shows_stored_versions_read_only() {
        let ctx = SequentialContext::new("tester");
        let element = ElementDescriptor::new(&ctx, ElementKind::Abstract).with_version(
            ElementVersion::new(&ctx, ElementKind::Abstract, ShapePayload::empty(BaseShape::Text)),
        );
        let descriptor = ContentDescriptor::ElementOnly { element };

        let surface =
            UnsupportedTemplate::new(BaseShape::Text).produce_editing_surface(&ctx, &descriptor);
        assert!(surface.pending.is_none());
        let expected = "Abstract content cannot be edited here.";
        match &surface.root {
            SurfaceNode::Section { children, .. } => assert!(matches!(
                &children[..],
                [SurfaceNode::Notice { message }] if message == expected
            )),
            other => panic!("Expected Section, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_guards_foreign_kinds() {
        let ctx = SequentialContext::new("tester");
        let descriptor = TextTemplate.create_default(&ctx, ElementKind::Abstract, false);

        let surface =
            UnsupportedTemplate::new(BaseShape::Video).produce_editing_surface(&ctx, &descriptor);
        assert!(surface.is_fallback());
        assert!(surface.pending.is_none());
    }
}
