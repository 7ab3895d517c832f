//! Elements and their append-only version chains.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::EngineContext;
use crate::kind::{BaseShape, ElementKind};
use crate::surface::FieldKey;

/// Number of uploads a freshly created slot allows.
pub const DEFAULT_UPLOADS_REMAINING: u32 = 3;

/// Unique identifier for elements, uploadable slots, uploaders and items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(Uuid);

impl ContentId {
    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identifier from its hyphenated string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing state of a subtitle track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubtitleStatus {
    /// Subtitles are being generated.
    InProgress,
    /// Subtitles are ready.
    Completed,
    /// Generation failed.
    Failed,
}

/// One subtitle track of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleDetails {
    /// Location of the subtitle file.
    pub s3_url: String,
    /// Processing state.
    pub status: SubtitleStatus,
}

/// State of a transcode job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TranscodeStatus {
    /// Job submitted, not finished.
    InProgress,
    /// Transcoded output is available.
    Completed,
    /// Job failed.
    Failed,
}

/// Transcode job attached to a video version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodeDetails {
    /// External job identifier.
    pub job_id: String,
    /// Job state.
    pub status: TranscodeStatus,
    /// Message reported by the transcoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Last status change (ms since epoch).
    pub updated_timestamp: u64,
}

/// Shape-specific payload of a version, tagged by its base shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "baseType")]
pub enum ShapePayload {
    /// Uploaded file.
    File {
        /// Storage locator.
        #[serde(rename = "s3Url")]
        s3_url: String,
        /// Alternative text.
        #[serde(rename = "altText", default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
    /// Built-in component, no payload.
    Component {},
    /// Display text and target.
    Link {
        /// Display text.
        text: String,
        /// Target URL.
        url: String,
    },
    /// Body text.
    Text {
        /// Body text.
        text: String,
    },
    /// Bare URL.
    #[serde(rename = "URL")]
    Url {
        /// The URL.
        url: String,
        /// Optional title.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// Video file.
    Video {
        /// Storage locator of the source video.
        #[serde(rename = "s3Url")]
        s3_url: String,
        /// Subtitle tracks keyed by language.
        #[serde(default)]
        subtitles: BTreeMap<String, SubtitleDetails>,
        /// Latest transcode job, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transcode: Option<TranscodeDetails>,
    },
}

impl ShapePayload {
    /// Placeholder payload for a shape: every field empty.
    #[must_use]
    pub fn empty(shape: BaseShape) -> Self {
        match shape {
            BaseShape::File => Self::File {
                s3_url: String::new(),
                alt_text: None,
            },
            BaseShape::Component => Self::Component {},
            BaseShape::Link => Self::Link {
                text: String::new(),
                url: String::new(),
            },
            BaseShape::Text => Self::Text {
                text: String::new(),
            },
            BaseShape::Url => Self::Url {
                url: String::new(),
                title: None,
            },
            BaseShape::Video => Self::Video {
                s3_url: String::new(),
                subtitles: BTreeMap::new(),
                transcode: None,
            },
        }
    }

    /// The base shape tag of this payload.
    #[must_use]
    pub const fn shape(&self) -> BaseShape {
        match self {
            Self::File { .. } => BaseShape::File,
            Self::Component {} => BaseShape::Component,
            Self::Link { .. } => BaseShape::Link,
            Self::Text { .. } => BaseShape::Text,
            Self::Url { .. } => BaseShape::Url,
            Self::Video { .. } => BaseShape::Video,
        }
    }

    /// Current value of an editable field, `None` if the shape has no such field.
    ///
    /// Optional fields read as the empty string when unset.
    #[must_use]
    pub fn field(&self, field: FieldKey) -> Option<&str> {
        match (self, field) {
            (Self::Text { text }, FieldKey::Text)
            | (Self::Link { text, .. }, FieldKey::LinkText) => Some(text.as_str()),
            (Self::Link { url, .. } | Self::Url { url, .. }, FieldKey::Url) => Some(url.as_str()),
            (Self::Url { title, .. }, FieldKey::Title) => Some(title.as_deref().unwrap_or("")),
            (Self::File { alt_text, .. }, FieldKey::AltText) => {
                Some(alt_text.as_deref().unwrap_or(""))
            }
            _ => None,
        }
    }

    /// Copy of this payload with one field replaced, `None` if the shape has no such field.
    #[must_use]
    pub fn with_field(&self, field: FieldKey, value: String) -> Option<Self> {
        let optional = |value: String| (!value.is_empty()).then_some(value);
        let mut next = self.clone();
        match (&mut next, field) {
            (Self::Text { text }, FieldKey::Text)
            | (Self::Link { text, .. }, FieldKey::LinkText) => *text = value,
            (Self::Link { url, .. } | Self::Url { url, .. }, FieldKey::Url) => *url = value,
            (Self::Url { title, .. }, FieldKey::Title) => *title = optional(value),
            (Self::File { alt_text, .. }, FieldKey::AltText) => *alt_text = optional(value),
            _ => return None,
        }
        Some(next)
    }
}

/// Payload of a version: the element kind plus its shape-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionData {
    /// Element kind the version was written for.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Shape-specific fields.
    #[serde(flatten)]
    pub payload: ShapePayload,
}

/// One immutable, timestamped, authored entry in a version chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementVersion {
    /// Creation time (ms since epoch).
    pub created_at: u64,
    /// Identity of the author.
    pub created_by: String,
    /// The payload.
    pub data: VersionData,
}

impl ElementVersion {
    /// Create a version stamped with the context's clock and actor.
    #[must_use]
    pub fn new(ctx: &dyn EngineContext, kind: ElementKind, payload: ShapePayload) -> Self {
        Self {
            created_at: ctx.now_ms(),
            created_by: ctx.actor().to_string(),
            data: VersionData { kind, payload },
        }
    }

    /// Base shape tag of this version.
    #[must_use]
    pub const fn shape(&self) -> BaseShape {
        self.data.payload.shape()
    }
}

/// Append-only sequence of versions. The last entry is the current payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionChain(Vec<ElementVersion>);

impl VersionChain {
    /// Create an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The current version, `None` for a chain that was never materialized.
    #[must_use]
    pub fn latest(&self) -> Option<&ElementVersion> {
        self.0.last()
    }

    /// Copy of this chain with `version` appended.
    #[must_use]
    pub fn appended(&self, version: ElementVersion) -> Self {
        let mut versions = Vec::with_capacity(self.0.len() + 1);
        versions.extend(self.0.iter().cloned());
        versions.push(version);
        Self(versions)
    }

    /// Number of versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no version has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Versions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ElementVersion> {
        self.0.iter()
    }
}

impl FromIterator<ElementVersion> for VersionChain {
    fn from_iter<I: IntoIterator<Item = ElementVersion>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A version whose tag disagrees with the element it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMismatch {
    /// Position in the chain.
    pub index: usize,
    /// Shape the element's kind requires.
    pub expected: BaseShape,
    /// Shape found on the version.
    pub found: BaseShape,
}

/// A piece of content attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Unique identifier.
    pub id: ContentId,
    /// Element kind.
    pub type_name: ElementKind,
    /// Display name.
    pub name: String,
    /// Whether the element is hidden from attendees.
    #[serde(default)]
    pub is_hidden: bool,
    /// Opaque layout hints owned by the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_data: Option<serde_json::Value>,
    /// Version history.
    #[serde(default)]
    pub data: VersionChain,
    /// Slot this element fulfils, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploadable_id: Option<ContentId>,
    /// Whether the element has not been saved yet.
    #[serde(default)]
    pub is_new: bool,
}

impl ElementDescriptor {
    /// Create an unsaved element with an empty version chain.
    #[must_use]
    pub fn new(ctx: &dyn EngineContext, kind: ElementKind) -> Self {
        Self {
            id: ContentId::from_uuid(ctx.new_id()),
            type_name: kind,
            name: kind.default_name().to_string(),
            is_hidden: false,
            layout_data: None,
            data: VersionChain::new(),
            uploadable_id: None,
            is_new: true,
        }
    }

    /// Copy of this element with `version` appended to its chain.
    #[must_use]
    pub fn with_version(&self, version: ElementVersion) -> Self {
        Self {
            data: self.data.appended(version),
            ..self.clone()
        }
    }

    /// First version whose base shape tag differs from the element kind's shape.
    #[must_use]
    pub fn shape_mismatch(&self) -> Option<VersionMismatch> {
        let expected = self.type_name.shape();
        self.data
            .iter()
            .enumerate()
            .find(|(_, version)| version.shape() != expected)
            .map(|(index, version)| VersionMismatch {
                index,
                expected,
                found: version.shape(),
            })
    }
}

/// An external contributor invited to fill a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderDescriptor {
    /// Unique identifier.
    pub id: ContentId,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Whether the upload invitation was sent.
    #[serde(default)]
    pub email_sent: bool,
}

/// A slot that external contributors fill in later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadableElementDescriptor {
    /// Unique identifier.
    pub id: ContentId,
    /// Kind of content expected.
    pub type_name: ElementKind,
    /// Display name.
    pub name: String,
    /// Whether the resulting element is hidden from attendees.
    #[serde(default)]
    pub is_hidden: bool,
    /// Invited contributors.
    #[serde(default)]
    pub uploaders: Vec<UploaderDescriptor>,
    /// Uploads still allowed, unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploads_remaining: Option<u32>,
    /// Whether the slot has not been saved yet.
    #[serde(default)]
    pub is_new: bool,
}

impl UploadableElementDescriptor {
    /// Create an unsaved slot with no uploaders.
    #[must_use]
    pub fn new(ctx: &dyn EngineContext, kind: ElementKind) -> Self {
        Self {
            id: ContentId::from_uuid(ctx.new_id()),
            type_name: kind,
            name: kind.default_name().to_string(),
            is_hidden: false,
            uploaders: Vec::new(),
            uploads_remaining: Some(DEFAULT_UPLOADS_REMAINING),
            is_new: true,
        }
    }

    /// Create an unsaved element that fulfils this slot.
    #[must_use]
    pub fn new_element(&self, ctx: &dyn EngineContext) -> ElementDescriptor {
        ElementDescriptor {
            name: self.name.clone(),
            is_hidden: self.is_hidden,
            uploadable_id: Some(self.id),
            ..ElementDescriptor::new(ctx, self.type_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;

    #[test]
    fn test_version_wire_format() {
        let json = r#"{
            "createdAt": 1000,
            "createdBy": "editor",
            "data": {
                "type": "PaperLink",
                "baseType": "Link",
                "text": "Read",
                "url": "https://example.org"
            }
        }"#;

        let version: ElementVersion = serde_json::from_str(json).expect("should parse");
        assert_eq!(version.data.kind, ElementKind::PaperLink);
        assert_eq!(version.shape(), BaseShape::Link);
        assert_eq!(version.data.payload.field(FieldKey::Url), Some("https://example.org"));

        let back = serde_json::to_value(&version).expect("should serialize");
        assert_eq!(back["data"]["baseType"], "Link");
        assert_eq!(back["data"]["type"], "PaperLink");
    }

    #[test]
    fn test_video_payload_defaults() {
        let json = r#"{ "type": "VideoFile", "baseType": "Video", "s3Url": "s3://bucket/v.mp4" }"#;
        let data: VersionData = serde_json::from_str(json).expect("should parse");
        match data.payload {
            ShapePayload::Video {
                s3_url,
                subtitles,
                transcode,
            } => {
                assert_eq!(s3_url, "s3://bucket/v.mp4");
                assert!(subtitles.is_empty());
                assert!(transcode.is_none());
            }
            other => panic!("Expected Video payload, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_append_leaves_original() {
        let ctx = SequentialContext::new("tester");
        let chain = VersionChain::new();
        assert!(chain.latest().is_none());

        let version =
            ElementVersion::new(&ctx, ElementKind::Text, ShapePayload::empty(BaseShape::Text));
        let next = chain.appended(version.clone());

        assert!(chain.is_empty());
        assert_eq!(next.len(), 1);
        assert_eq!(next.latest(), Some(&version));
    }

    #[test]
    fn test_with_field_only_touches_own_fields() {
        let link = ShapePayload::empty(BaseShape::Link);
        let edited = link
            .with_field(FieldKey::Url, "https://example.org".to_string())
            .expect("link has a url");
        assert_eq!(edited.field(FieldKey::Url), Some("https://example.org"));
        assert_eq!(edited.field(FieldKey::LinkText), Some(""));

        assert!(link.with_field(FieldKey::Title, "x".to_string()).is_none());
        assert!(ShapePayload::empty(BaseShape::Video)
            .with_field(FieldKey::Text, "x".to_string())
            .is_none());
    }

    #[test]
    fn test_optional_field_clears_to_none() {
        let url = ShapePayload::Url {
            url: "https://example.org".to_string(),
            title: Some("Example".to_string()),
        };
        let cleared = url.with_field(FieldKey::Title, String::new()).expect("url has a title");
        assert_eq!(
            cleared,
            ShapePayload::Url {
                url: "https://example.org".to_string(),
                title: None,
            }
        );
        assert_eq!(cleared.field(FieldKey::Title), Some(""));
    }

    #[test]
    fn test_shape_mismatch_detected() {
        let ctx = SequentialContext::new("tester");
        let element = ElementDescriptor::new(&ctx, ElementKind::Abstract).with_version(
            ElementVersion::new(&ctx, ElementKind::Abstract, ShapePayload::empty(BaseShape::Link)),
        );

        let mismatch = element.shape_mismatch().expect("should report mismatch");
        assert_eq!(mismatch.index, 0);
        assert_eq!(mismatch.expected, BaseShape::Text);
        assert_eq!(mismatch.found, BaseShape::Link);
    }

    #[test]
    fn test_slot_element_is_linked() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoPrepublish);
        let element = slot.new_element(&ctx);

        assert_eq!(element.uploadable_id, Some(slot.id));
        assert_eq!(element.type_name, slot.type_name);
        assert_ne!(element.id, slot.id);
        assert_eq!(slot.uploads_remaining, Some(DEFAULT_UPLOADS_REMAINING));
    }
}
