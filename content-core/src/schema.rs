//! Content schema per item kind.
//!
//! | Item kind                     | Elements                       | Uploadable slots      |
//! |-------------------------------|--------------------------------|-----------------------|
//! | Paper, Keynote, Workshop, …   | `Abstract`                     | `VideoPrepublish`,    |
//! |                               |                                | `VideoBroadcast`      |
//! | Poster                        | -                              | `PosterFile`          |
//! | `LandingPage`                 | `Abstract`, `ContentGroupList` | -                     |
//! | Sponsor                       | `Abstract`                     | `ImageFile`           |
//! | Other, Social, `SessionQAndA` | -                              | -                     |

use crate::item::ItemKind;
use crate::kind::ElementKind;

/// Element kinds an item is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSchema {
    /// Kinds expected as direct content.
    pub item_types: &'static [ElementKind],
    /// Kinds expected as uploadable slots.
    pub uploadable_element_types: &'static [ElementKind],
}

impl ItemSchema {
    /// Whether `kind` appears anywhere in the schema.
    #[must_use]
    pub fn mentions(&self, kind: ElementKind) -> bool {
        self.item_types.contains(&kind) || self.uploadable_element_types.contains(&kind)
    }
}

const TALK: ItemSchema = ItemSchema {
    item_types: &[ElementKind::Abstract],
    uploadable_element_types: &[ElementKind::VideoPrepublish, ElementKind::VideoBroadcast],
};

const EMPTY: ItemSchema = ItemSchema {
    item_types: &[],
    uploadable_element_types: &[],
};

/// The schema for an item kind.
#[must_use]
pub const fn item_schema(kind: ItemKind) -> ItemSchema {
    match kind {
        ItemKind::Demonstration
        | ItemKind::Keynote
        | ItemKind::Paper
        | ItemKind::Presentation
        | ItemKind::Symposium
        | ItemKind::Tutorial
        | ItemKind::Workshop => TALK,
        ItemKind::Poster => ItemSchema {
            item_types: &[],
            uploadable_element_types: &[ElementKind::PosterFile],
        },
        ItemKind::LandingPage => ItemSchema {
            item_types: &[ElementKind::Abstract, ElementKind::ContentGroupList],
            uploadable_element_types: &[],
        },
        ItemKind::Sponsor => ItemSchema {
            item_types: &[ElementKind::Abstract],
            uploadable_element_types: &[ElementKind::ImageFile],
        },
        ItemKind::Other | ItemKind::SessionQAndA | ItemKind::Social => EMPTY,
    }
}
