//! Element taxonomy - the closed set of content kinds and their base shapes.
//!
//! Every [`ElementKind`] belongs to exactly one [`BaseShape`]. The mapping is an
//! exhaustive `match`, so it is total and fixed at compile time.
//!
//! | Base shape  | Kinds                                                               |
//! |-------------|---------------------------------------------------------------------|
//! | `Text`      | `Abstract`, `Text`                                                  |
//! | `Component` | schedule widgets, room lists, dividers, explore buttons             |
//! | `File`      | `ImageFile`, `PaperFile`, `PosterFile`, `AudioFile`                 |
//! | `URL`       | `ImageUrl`, `PaperUrl`, `PosterUrl`, `VideoUrl`, `AudioUrl`, `Zoom` |
//! | `Link`      | `Link`, `PaperLink`, `VideoLink`, `AudioLink`, `LinkButton`, ...    |
//! | `Video`     | broadcast, countdown, filler, prepublish and title videos           |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// The structural family a piece of content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseShape {
    /// Uploaded file (image, paper, poster, audio).
    File,
    /// Built-in page component with no payload of its own.
    Component,
    /// Display text plus target URL.
    Link,
    /// Free-form body text.
    Text,
    /// Bare URL with an optional title.
    #[serde(rename = "URL")]
    Url,
    /// Video with subtitles and transcode state.
    Video,
}

impl BaseShape {
    /// Every base shape, in table order.
    pub const ALL: [BaseShape; 6] = [
        BaseShape::File,
        BaseShape::Component,
        BaseShape::Link,
        BaseShape::Text,
        BaseShape::Url,
        BaseShape::Video,
    ];

    /// Position of this shape in [`BaseShape::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::File => 0,
            Self::Component => 1,
            Self::Link => 2,
            Self::Text => 3,
            Self::Url => 4,
            Self::Video => 5,
        }
    }

    /// Wire name of the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Component => "Component",
            Self::Link => "Link",
            Self::Text => "Text",
            Self::Url => "URL",
            Self::Video => "Video",
        }
    }
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseShape {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

/// The semantic type of a single piece of conference content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    /// Item abstract.
    Abstract,
    /// Free text block.
    Text,
    /// List of content groups (landing pages).
    ContentGroupList,
    /// Full conference schedule.
    WholeSchedule,
    /// Rooms currently running program events.
    LiveProgramRooms,
    /// Social rooms with people in them.
    ActiveSocialRooms,
    /// Sponsor booth grid.
    SponsorBooths,
    /// Horizontal divider.
    Divider,
    /// Button linking to the program.
    ExploreProgramButton,
    /// Button linking to the schedule.
    ExploreScheduleButton,
    /// Uploaded image.
    ImageFile,
    /// Uploaded paper.
    PaperFile,
    /// Uploaded poster.
    PosterFile,
    /// Uploaded audio.
    AudioFile,
    /// Image hosted elsewhere.
    ImageUrl,
    /// Paper hosted elsewhere.
    PaperUrl,
    /// Poster hosted elsewhere.
    PosterUrl,
    /// Video hosted elsewhere.
    VideoUrl,
    /// Audio hosted elsewhere.
    AudioUrl,
    /// Zoom meeting URL.
    Zoom,
    /// Generic link.
    Link,
    /// Link to a paper.
    PaperLink,
    /// Link to a video.
    VideoLink,
    /// Link to audio.
    AudioLink,
    /// Link rendered as a button.
    LinkButton,
    /// Link to an event hosted outside the conference.
    ExternalEventLink,
    /// Video played during a live broadcast.
    VideoBroadcast,
    /// Countdown shown before an event.
    VideoCountdown,
    /// Generic video file.
    VideoFile,
    /// Filler played between events.
    VideoFiller,
    /// Video published ahead of the event.
    VideoPrepublish,
    /// Sponsor reel played between events.
    VideoSponsorsFiller,
    /// Title card video.
    VideoTitles,
}

impl ElementKind {
    /// Every element kind, in declaration order.
    pub const ALL: [ElementKind; 33] = [
        ElementKind::Abstract,
        ElementKind::Text,
        ElementKind::ContentGroupList,
        ElementKind::WholeSchedule,
        ElementKind::LiveProgramRooms,
        ElementKind::ActiveSocialRooms,
        ElementKind::SponsorBooths,
        ElementKind::Divider,
        ElementKind::ExploreProgramButton,
        ElementKind::ExploreScheduleButton,
        ElementKind::ImageFile,
        ElementKind::PaperFile,
        ElementKind::PosterFile,
        ElementKind::AudioFile,
        ElementKind::ImageUrl,
        ElementKind::PaperUrl,
        ElementKind::PosterUrl,
        ElementKind::VideoUrl,
        ElementKind::AudioUrl,
        ElementKind::Zoom,
        ElementKind::Link,
        ElementKind::PaperLink,
        ElementKind::VideoLink,
        ElementKind::AudioLink,
        ElementKind::LinkButton,
        ElementKind::ExternalEventLink,
        ElementKind::VideoBroadcast,
        ElementKind::VideoCountdown,
        ElementKind::VideoFile,
        ElementKind::VideoFiller,
        ElementKind::VideoPrepublish,
        ElementKind::VideoSponsorsFiller,
        ElementKind::VideoTitles,
    ];

    /// The base shape this kind belongs to.
    #[must_use]
    pub const fn shape(self) -> BaseShape {
        kind_to_shape(self)
    }

    /// Human-readable name given to freshly created content of this kind.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::Text => "Text",
            Self::ContentGroupList => "Content group list",
            Self::WholeSchedule => "Whole schedule",
            Self::LiveProgramRooms => "Live program rooms",
            Self::ActiveSocialRooms => "Active social rooms",
            Self::SponsorBooths => "Sponsor booths",
            Self::Divider => "Divider",
            Self::ExploreProgramButton => "Explore program button",
            Self::ExploreScheduleButton => "Explore schedule button",
            Self::ImageFile => "Image file",
            Self::PaperFile => "Paper file",
            Self::PosterFile => "Poster image",
            Self::AudioFile => "Audio file",
            Self::ImageUrl => "Image URL",
            Self::PaperUrl => "URL of paper",
            Self::PosterUrl => "URL of poster",
            Self::VideoUrl => "URL of video",
            Self::AudioUrl => "URL of audio",
            Self::Zoom => "Zoom meeting",
            Self::Link => "Link",
            Self::PaperLink => "Link to paper",
            Self::VideoLink => "Link to video",
            Self::AudioLink => "Link to audio",
            Self::LinkButton => "Link button",
            Self::ExternalEventLink => "External event link",
            Self::VideoBroadcast => "Livestream broadcast video",
            Self::VideoCountdown => "Timer countdown video",
            Self::VideoFile => "Video file",
            Self::VideoFiller => "Filler video",
            Self::VideoPrepublish => "Pre-published video",
            Self::VideoSponsorsFiller => "Sponsors filler video",
            Self::VideoTitles => "Title video",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variant names are the wire names.
        write!(f, "{self:?}")
    }
}

impl FromStr for ElementKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

/// Map an element kind to its base shape.
#[must_use]
pub const fn kind_to_shape(kind: ElementKind) -> BaseShape {
    use ElementKind as K;
    match kind {
        K::Abstract | K::Text => BaseShape::Text,
        K::ContentGroupList
        | K::WholeSchedule
        | K::LiveProgramRooms
        | K::ActiveSocialRooms
        | K::SponsorBooths
        | K::Divider
        | K::ExploreProgramButton
        | K::ExploreScheduleButton => BaseShape::Component,
        K::ImageFile | K::PaperFile | K::PosterFile | K::AudioFile => BaseShape::File,
        K::ImageUrl | K::PaperUrl | K::PosterUrl | K::VideoUrl | K::AudioUrl | K::Zoom => {
            BaseShape::Url
        }
        K::Link
        | K::PaperLink
        | K::VideoLink
        | K::AudioLink
        | K::LinkButton
        | K::ExternalEventLink => BaseShape::Link,
        K::VideoBroadcast
        | K::VideoCountdown
        | K::VideoFile
        | K::VideoFiller
        | K::VideoPrepublish
        | K::VideoSponsorsFiller
        | K::VideoTitles => BaseShape::Video,
    }
}
