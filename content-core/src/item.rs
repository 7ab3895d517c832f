//! Items - the aggregates that own elements and uploadable slots.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::ContentDescriptor;
use crate::element::{ContentId, ElementDescriptor, UploadableElementDescriptor};
use crate::error::{ContentError, ContentResult};

/// The kind of an item, which selects its content schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Live demonstration.
    Demonstration,
    /// Keynote talk.
    Keynote,
    /// Conference landing page.
    LandingPage,
    /// Anything else.
    Other,
    /// Paper presentation.
    Paper,
    /// Poster.
    Poster,
    /// General presentation.
    Presentation,
    /// Question and answer session.
    SessionQAndA,
    /// Social event.
    Social,
    /// Sponsor page.
    Sponsor,
    /// Symposium.
    Symposium,
    /// Tutorial.
    Tutorial,
    /// Workshop.
    Workshop,
}

impl ItemKind {
    /// Every item kind.
    pub const ALL: [ItemKind; 13] = [
        ItemKind::Demonstration,
        ItemKind::Keynote,
        ItemKind::LandingPage,
        ItemKind::Other,
        ItemKind::Paper,
        ItemKind::Poster,
        ItemKind::Presentation,
        ItemKind::SessionQAndA,
        ItemKind::Social,
        ItemKind::Sponsor,
        ItemKind::Symposium,
        ItemKind::Tutorial,
        ItemKind::Workshop,
    ];
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for ItemKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContentError::UnknownKind(s.to_string()))
    }
}

/// An item with its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    /// Unique identifier.
    pub id: ContentId,
    /// Owning conference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_id: Option<ContentId>,
    /// Item kind.
    pub type_name: ItemKind,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Short title for compact listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    /// Attached content.
    #[serde(default)]
    pub elements: Vec<ElementDescriptor>,
    /// Slots awaiting external contributions.
    #[serde(default)]
    pub uploadable_elements: Vec<UploadableElementDescriptor>,
}

impl ItemDescriptor {
    /// Create an empty item.
    #[must_use]
    pub fn new(id: ContentId, type_name: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id,
            conference_id: None,
            type_name,
            title: title.into(),
            short_title: None,
            elements: Vec::new(),
            uploadable_elements: Vec::new(),
        }
    }

    /// One descriptor per piece of content.
    ///
    /// Slots come first in list order, each paired with the element linked to it;
    /// elements not linked to any slot follow in list order.
    #[must_use]
    pub fn content_descriptors(&self) -> Vec<ContentDescriptor> {
        let mut paired: HashSet<ContentId> = HashSet::new();
        let mut descriptors =
            Vec::with_capacity(self.elements.len() + self.uploadable_elements.len());

        for slot in &self.uploadable_elements {
            let linked = self.elements.iter().find(|element| {
                element.uploadable_id == Some(slot.id) && element.type_name == slot.type_name
            });
            match linked {
                Some(element) => {
                    paired.insert(element.id);
                    descriptors.push(ContentDescriptor::RequiredAndElement {
                        uploadable_element: slot.clone(),
                        element: element.clone(),
                    });
                }
                None => descriptors.push(ContentDescriptor::RequiredOnly {
                    uploadable_element: slot.clone(),
                }),
            }
        }

        descriptors.extend(
            self.elements
                .iter()
                .filter(|element| !paired.contains(&element.id))
                .map(|element| ContentDescriptor::ElementOnly {
                    element: element.clone(),
                }),
        );

        descriptors
    }

    /// Every identifier the item carries: its own, its conference's, and those
    /// of its elements, slots and uploaders.
    #[must_use]
    pub fn content_ids(&self) -> Vec<ContentId> {
        let mut ids = vec![self.id];
        ids.extend(self.conference_id);
        for element in &self.elements {
            ids.push(element.id);
            ids.extend(element.uploadable_id);
        }
        for slot in &self.uploadable_elements {
            ids.push(slot.id);
            ids.extend(slot.uploaders.iter().map(|uploader| uploader.id));
        }
        ids
    }

    /// Copy of this item with a revised piece of content written back.
    ///
    /// Elements and slots are matched by id and replaced in place; new ones are
    /// appended.
    #[must_use]
    pub fn with_content(&self, descriptor: &ContentDescriptor) -> Self {
        let mut next = self.clone();
        if let Some(slot) = descriptor.uploadable_element() {
            upsert(&mut next.uploadable_elements, slot.clone(), |s| s.id);
        }
        if let Some(element) = descriptor.element() {
            upsert(&mut next.elements, element.clone(), |e| e.id);
        }
        next
    }

    /// Parse an item from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a valid item.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        serde_json::from_str(json).map_err(ContentError::Serialization)
    }

    /// Serialize the item to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ContentResult<String> {
        serde_json::to_string_pretty(self).map_err(ContentError::Serialization)
    }
}

fn upsert<T>(list: &mut Vec<T>, value: T, id: impl Fn(&T) -> ContentId) {
    let key = id(&value);
    match list.iter_mut().find(|existing| id(&**existing) == key) {
        Some(existing) => *existing = value,
        None => list.push(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{EngineContext, SequentialContext};
    use crate::kind::ElementKind;

    fn paper(ctx: &SequentialContext) -> ItemDescriptor {
        ItemDescriptor::new(ContentId::from_uuid(ctx.new_id()), ItemKind::Paper, "A paper")
    }

    #[test]
    fn test_content_descriptors_pairs_slots() {
        let ctx = SequentialContext::new("tester");
        let mut item = paper(&ctx);

        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoPrepublish);
        let empty_slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoBroadcast);
        let fulfilled = slot.new_element(&ctx);
        let free = ElementDescriptor::new(&ctx, ElementKind::Abstract);

        item.elements = vec![free.clone(), fulfilled.clone()];
        item.uploadable_elements = vec![slot.clone(), empty_slot.clone()];

        let descriptors = item.content_descriptors();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(
            descriptors[0],
            ContentDescriptor::RequiredAndElement {
                uploadable_element: slot,
                element: fulfilled,
            }
        );
        assert_eq!(
            descriptors[1],
            ContentDescriptor::RequiredOnly {
                uploadable_element: empty_slot,
            }
        );
        assert_eq!(descriptors[2], ContentDescriptor::ElementOnly { element: free });
    }

    #[test]
    fn test_with_content_replaces_by_id() {
        let ctx = SequentialContext::new("tester");
        let mut item = paper(&ctx);
        let element = ElementDescriptor::new(&ctx, ElementKind::Abstract);
        item.elements.push(element.clone());

        let mut renamed = element;
        renamed.name = "Summary".to_string();
        let next = item.with_content(&ContentDescriptor::ElementOnly { element: renamed });

        assert_eq!(next.elements.len(), 1);
        assert_eq!(next.elements[0].name, "Summary");
        assert_eq!(item.elements[0].name, "Abstract");
    }

    #[test]
    fn test_with_content_appends_new() {
        let ctx = SequentialContext::new("tester");
        let item = paper(&ctx);
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoBroadcast);
        let element = slot.new_element(&ctx);
        let descriptor =
            ContentDescriptor::required_and_element(slot, element).expect("linked pair");

        let next = item.with_content(&descriptor);
        assert_eq!(next.elements.len(), 1);
        assert_eq!(next.uploadable_elements.len(), 1);
    }

    #[test]
    fn test_content_ids_cover_links() {
        let ctx = SequentialContext::new("tester");
        let mut item = paper(&ctx);
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoBroadcast);
        let element = slot.new_element(&ctx);
        item.uploadable_elements.push(slot.clone());
        item.elements.push(element.clone());

        let ids = item.content_ids();
        assert!(ids.contains(&item.id));
        assert!(ids.contains(&slot.id));
        assert!(ids.contains(&element.id));
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "typeName": "Poster",
            "title": "Posters",
            "elements": [],
            "uploadableElements": []
        }"#;

        let item = ItemDescriptor::from_json(json).expect("should parse");
        assert_eq!(item.type_name, ItemKind::Poster);
        let json = item.to_json().expect("should serialize");
        let back = ItemDescriptor::from_json(&json).expect("should parse");
        assert_eq!(back, item);
    }

    #[test]
    fn test_unknown_item_kind_is_a_data_error() {
        let json = r#"{ "id": "00000000-0000-0000-0000-000000000001", "typeName": "Banquet" }"#;
        assert!(matches!(
            ItemDescriptor::from_json(json),
            Err(ContentError::Serialization(_))
        ));
        assert!("banquet".parse::<ItemKind>().is_err());
        assert_eq!("landingpage".parse::<ItemKind>().expect("parse"), ItemKind::LandingPage);
    }
}
