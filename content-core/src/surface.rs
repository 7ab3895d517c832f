//! Editing surfaces - the opaque contract between templates and the editor shell.
//!
//! A template never draws anything. It returns a [`SurfaceNode`] tree that the
//! editor shell renders however it likes, plus an optional pending commit.
//!
//! ## Surface components
//!
//! | Component       | Purpose                                         |
//! |-----------------|-------------------------------------------------|
//! | `section`       | Heading with nested components                  |
//! | `text_field`    | Editable text, optionally multi-line            |
//! | `url_field`     | Editable URL                                    |
//! | `file_picker`   | Upload control showing the current file         |
//! | `video_preview` | Player for the current source and its transcode |
//! | `subtitle_list` | Subtitle tracks and their status                |
//! | `notice`        | Display-only information                        |
//! | `diagnostic`    | Fallback shown when content and template disagree |
//!
//! ## Example JSON
//!
//! ```json
//! {
//!   "component": "section",
//!   "heading": "Link to paper",
//!   "children": [
//!     {
//!       "component": "text_field",
//!       "field": "link_text",
//!       "label": "Text",
//!       "value": "",
//!       "multiline": false
//!     },
//!     { "component": "url_field", "field": "url", "label": "URL", "value": "" }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::descriptor::ContentDescriptor;
use crate::element::{SubtitleStatus, TranscodeStatus};
use crate::error::{ContentError, ContentResult};

/// An editable field of a content payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// Body text.
    Text,
    /// Display text of a link.
    LinkText,
    /// Target or bare URL.
    Url,
    /// Title of a URL.
    Title,
    /// Alternative text of a file.
    AltText,
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::LinkText => "link_text",
            Self::Url => "url",
            Self::Title => "title",
            Self::AltText => "alt_text",
        };
        f.write_str(name)
    }
}

/// One subtitle track as shown to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    /// Language code.
    pub language: String,
    /// Processing state.
    pub status: SubtitleStatus,
}

/// Transcode state as shown to the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscodeBadge {
    /// Job state.
    pub status: TranscodeStatus,
    /// Message reported by the transcoder.
    #[serde(default)]
    pub message: Option<String>,
}

/// Editing surface component node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum SurfaceNode {
    /// Heading with nested components.
    Section {
        /// Heading text.
        heading: String,
        /// Nested components.
        children: Vec<SurfaceNode>,
    },

    /// Editable text.
    TextField {
        /// Field the value belongs to.
        field: FieldKey,
        /// Label text.
        label: String,
        /// Current committed value.
        value: String,
        /// Whether the field takes multiple lines.
        #[serde(default)]
        multiline: bool,
    },

    /// Editable URL.
    UrlField {
        /// Field the value belongs to.
        field: FieldKey,
        /// Label text.
        label: String,
        /// Current committed value.
        value: String,
    },

    /// Upload control.
    FilePicker {
        /// Label text.
        label: String,
        /// Location of the current file, if uploaded.
        #[serde(default)]
        current: Option<String>,
    },

    /// Video player.
    VideoPreview {
        /// Location of the source video, if uploaded.
        #[serde(default)]
        src: Option<String>,
        /// Latest transcode state.
        #[serde(default)]
        transcode: Option<TranscodeBadge>,
    },

    /// Subtitle tracks.
    SubtitleList {
        /// Tracks in language order.
        entries: Vec<SubtitleEntry>,
    },

    /// Display-only information.
    Notice {
        /// Message text.
        message: String,
    },

    /// Fallback for content the template cannot handle.
    Diagnostic {
        /// What went wrong.
        message: String,
    },
}

impl SurfaceNode {
    /// Build a section.
    #[must_use]
    pub fn section(heading: impl Into<String>, children: Vec<SurfaceNode>) -> Self {
        Self::Section {
            heading: heading.into(),
            children,
        }
    }

    /// Build a notice.
    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    /// Build a diagnostic.
    #[must_use]
    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self::Diagnostic {
            message: message.into(),
        }
    }

    /// Editable fields in this subtree, depth first.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldKey> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields(&self, out: &mut Vec<FieldKey>) {
        match self {
            Self::Section { children, .. } => {
                for child in children {
                    child.collect_fields(out);
                }
            }
            Self::TextField { field, .. } | Self::UrlField { field, .. } => out.push(*field),
            Self::FilePicker { .. }
            | Self::VideoPreview { .. }
            | Self::SubtitleList { .. }
            | Self::Notice { .. }
            | Self::Diagnostic { .. } => {}
        }
    }

    /// Current value shown for `field`, if the subtree contains it.
    #[must_use]
    pub fn field_value(&self, field: FieldKey) -> Option<&str> {
        match self {
            Self::Section { children, .. } => children.iter().find_map(|c| c.field_value(field)),
            Self::TextField { field: f, value, .. } | Self::UrlField { field: f, value, .. }
                if *f == field =>
            {
                Some(value.as_str())
            }
            _ => None,
        }
    }

    /// Whether the subtree is a diagnostic fallback.
    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Diagnostic { .. })
    }

    /// Serialize the tree for the editor shell.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ContentResult<String> {
        serde_json::to_string(self).map_err(ContentError::Serialization)
    }
}

/// What a template returns for one piece of content.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSurface {
    /// Component tree to render.
    pub root: SurfaceNode,
    /// Revised descriptor the caller commits on its next update cycle.
    ///
    /// Set when the template had to materialize a default first version.
    pub pending: Option<ContentDescriptor>,
}

impl EditingSurface {
    /// A surface with nothing to commit.
    #[must_use]
    pub fn new(root: SurfaceNode) -> Self {
        Self {
            root,
            pending: None,
        }
    }

    /// A surface whose content must be committed before the next render.
    #[must_use]
    pub fn with_pending(root: SurfaceNode, pending: ContentDescriptor) -> Self {
        Self {
            root,
            pending: Some(pending),
        }
    }

    /// A diagnostic fallback surface.
    #[must_use]
    pub fn fallback(message: impl Into<String>) -> Self {
        Self::new(SurfaceNode::diagnostic(message))
    }

    /// Whether this is a diagnostic fallback.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.root.is_diagnostic()
    }

    /// Editable fields on the surface.
    #[must_use]
    pub fn fields(&self) -> Vec<FieldKey> {
        self.root.fields()
    }
}
