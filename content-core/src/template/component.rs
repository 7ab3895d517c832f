//! Component template: page widgets generated from conference data.

use super::{foreign_payload, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Template for [`BaseShape::Component`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentTemplate;

impl ContentTemplate for ComponentTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::Component
    }

    fn fields(&self, _kind: ElementKind) -> &'static [FieldKey] {
        &[]
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        match &version.data.payload {
            ShapePayload::Component {} => vec![SurfaceNode::notice(format!(
                "{} is generated from conference data and has no settings.",
                element.type_name.default_name()
            ))],
            other => vec![foreign_payload(self.shape(), other)],
        }
    }
}
