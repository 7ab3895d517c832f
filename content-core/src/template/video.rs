//! Video template: uploaded videos with subtitles and transcode state.

use super::{foreign_payload, present, ContentTemplate};
use crate::element::{ElementDescriptor, ElementVersion, ShapePayload};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{FieldKey, SubtitleEntry, SurfaceNode, TranscodeBadge};

/// Template for [`BaseShape::Video`] content.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoTemplate;

impl ContentTemplate for VideoTemplate {
    fn shape(&self) -> BaseShape {
        BaseShape::Video
    }

    fn fields(&self, _kind: ElementKind) -> &'static [FieldKey] {
        &[]
    }

    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode> {
        let ShapePayload::Video {
            s3_url,
            subtitles,
            transcode,
        } = &version.data.payload
        else {
            return vec![foreign_payload(self.shape(), &version.data.payload)];
        };

        let mut nodes = vec![SurfaceNode::FilePicker {
            label: format!("Upload {}", element.type_name.default_name().to_lowercase()),
            current: present(s3_url),
        }];

        if s3_url.is_empty() {
            nodes.push(SurfaceNode::notice("No video uploaded yet."));
        } else {
            nodes.push(SurfaceNode::VideoPreview {
                src: Some(s3_url.clone()),
                transcode: transcode.as_ref().map(|t| TranscodeBadge {
                    status: t.status,
                    message: t.message.clone(),
                }),
            });
        }

        if !subtitles.is_empty() {
            nodes.push(SurfaceNode::SubtitleList {
                entries: subtitles
                    .iter()
                    .map(|(language, details)| SubtitleEntry {
                        language: language.clone(),
                        status: details.status,
                    })
                    .collect(),
            });
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;
    use crate::descriptor::ContentDescriptor;
    use crate::element::{SubtitleDetails, SubtitleStatus, TranscodeDetails, TranscodeStatus};
    use std::collections::BTreeMap;

    #[test]
    fn test_transcoded_video_with_subtitles() {
        let ctx = SequentialContext::new("tester");
        let ContentDescriptor::ElementOnly { element } =
            VideoTemplate.create_default(&ctx, ElementKind::VideoPrepublish, false)
        else {
            panic!("Expected ElementOnly");
        };
        let mut subtitles = BTreeMap::new();
        subtitles.insert(
            "en_US".to_string(),
            SubtitleDetails {
                s3_url: "s3://bucket/v.srt".to_string(),
                status: SubtitleStatus::Completed,
            },
        );
        let element = element.with_version(ElementVersion::new(
            &ctx,
            ElementKind::VideoPrepublish,
            ShapePayload::Video {
                s3_url: "s3://bucket/v.mp4".to_string(),
                subtitles,
                transcode: Some(TranscodeDetails {
                    job_id: "job-1".to_string(),
                    status: TranscodeStatus::InProgress,
                    message: None,
                    updated_timestamp: 5,
                }),
            },
        ));

        let descriptor = ContentDescriptor::ElementOnly { element };
        let surface = VideoTemplate.produce_editing_surface(&ctx, &descriptor);
        let SurfaceNode::Section { children, .. } = &surface.root else {
            panic!("Expected Section");
        };
        assert!(children.iter().any(|node| matches!(
            node,
            SurfaceNode::VideoPreview {
                transcode: Some(TranscodeBadge {
                    status: TranscodeStatus::InProgress,
                    ..
                }),
                ..
            }
        )));
        assert!(children.iter().any(|node| matches!(
            node,
            SurfaceNode::SubtitleList { entries } if entries.len() == 1
        )));
    }

    #[test]
    fn test_empty_video_materializes_default() {
        let ctx = SequentialContext::new("tester");
        let descriptor = VideoTemplate.create_default(&ctx, ElementKind::VideoCountdown, false);
        let surface = VideoTemplate.produce_editing_surface(&ctx, &descriptor);

        let pending = surface.pending.expect("default version pending");
        let latest = pending.element().and_then(|e| e.data.latest()).expect("latest version");
        assert_eq!(latest.shape(), BaseShape::Video);
        assert_eq!(latest.data.kind, ElementKind::VideoCountdown);
    }
}
