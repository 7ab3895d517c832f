//! URL template: a bare URL with an optional title.

use super::{foreign_payload, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SurfaceNode};

/// Template for [`BaseShape::Url`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlTemplate;

impl ContentTemplate for UrlTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::Url
    }

    fn fields(&self, kind: ElementKind) -> &'static [FieldKey] {
        match kind {
            // Zoom links are joined, never titled.
            ElementKind::Zoom => &[FieldKey::Url],
            _ => &[FieldKey::Url, FieldKey::Title],
        }
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        let ShapePayload::Url { url, title } = &version.data.payload else {
            return vec![foreign_payload(self.shape(), &version.data.payload)];
        };
        let url_label = match element.type_name {
            ElementKind::Zoom => "Zoom join URL",
            ElementKind::ImageUrl => "Image URL",
            ElementKind::PaperUrl => "Paper URL",
            ElementKind::PosterUrl => "Poster URL",
            ElementKind::VideoUrl => "Video URL",
            ElementKind::AudioUrl => "Audio URL",
            _ => "URL",
        };

        let mut nodes = vec![SurfaceNode::UrlField {
            field: FieldKey::Url,
            label: url_label.to_string(),
            value: url.clone(),
        }];
        if self.fields(element.type_name).contains(&FieldKey::Title) {
            nodes.push(SurfaceNode::TextField {
                field: FieldKey::Title,
                label: "Title (optional)".to_string(),
                value: title.clone().unwrap_or_default(),
                multiline: false,
            });
        }
        nodes
    }
}
