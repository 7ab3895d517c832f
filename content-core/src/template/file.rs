//! File template: uploaded images, papers, posters and audio.
//!
//! Uploading happens in the editor shell; the surface only shows the current
//! file and, for images, its alternative text.

use super::{foreign_payload, present, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Template for [`BaseShape::File`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTemplate;

impl ContentTemplate for FileTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::File
    }

    fn fields(&self, kind: ElementKind) -> &'static [FieldKey] {
        match kind {
            ElementKind::ImageFile | ElementKind::PosterFile => &[FieldKey::AltText],
            _ => &[],
        }
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        let ShapePayload::File { s3_url, alt_text } = &version.data.payload else {
            return vec![foreign_payload(self.shape(), &version.data.payload)];
        };

        let mut nodes = vec![SurfaceNode::FilePicker {
            label: format!("Upload {}", element.type_name.default_name().to_lowercase()),
            current: present(s3_url),
        }];
        if self.fields(element.type_name).contains(&FieldKey::AltText) {
            nodes.push(SurfaceNode::TextField {
                field: FieldKey::AltText,
                label: "Alternative text".to_string(),
                value: alt_text.clone().unwrap_or_default(),
                multiline: false,
            });
        }
        nodes
    }
}
