//! Content descriptors - a piece of content in one of its three cardinalities.

use serde::{Deserialize, Serialize};

use crate::element::{ElementDescriptor, UploadableElementDescriptor};
use crate::error::{ContentError, ContentResult};
use crate::kind::ElementKind;

/// A piece of content attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ContentDescriptor {
    /// A slot exists, no content yet.
    RequiredOnly {
        /// The slot.
        uploadable_element: UploadableElementDescriptor,
    },
    /// A slot exists and has been fulfilled.
    RequiredAndElement {
        /// The slot.
        uploadable_element: UploadableElementDescriptor,
        /// The element fulfilling it.
        element: ElementDescriptor,
    },
    /// Content with no associated slot.
    ElementOnly {
        /// The element.
        element: ElementDescriptor,
    },
}

impl ContentDescriptor {
    /// Pair a slot with the element that fulfils it.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::SlotMismatch`] if the element is not linked to the
    /// slot or the two disagree on kind.
    pub fn required_and_element(
        uploadable_element: UploadableElementDescriptor,
        element: ElementDescriptor,
    ) -> ContentResult<Self> {
        check_slot(&uploadable_element, &element)?;
        Ok(Self::RequiredAndElement {
            uploadable_element,
            element,
        })
    }

    /// Check the slot/element invariant on a descriptor built elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::SlotMismatch`] for an inconsistent `RequiredAndElement`.
    pub fn validate(&self) -> ContentResult<()> {
        match self {
            Self::RequiredAndElement {
                uploadable_element,
                element,
            } => check_slot(uploadable_element, element),
            Self::RequiredOnly { .. } | Self::ElementOnly { .. } => Ok(()),
        }
    }

    /// Kind of the content.
    #[must_use]
    pub fn type_name(&self) -> ElementKind {
        match self {
            Self::RequiredOnly { uploadable_element }
            | Self::RequiredAndElement {
                uploadable_element, ..
            } => uploadable_element.type_name,
            Self::ElementOnly { element } => element.type_name,
        }
    }

    /// Display name: the element's, or the slot's when there is no element.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::RequiredOnly { uploadable_element } => &uploadable_element.name,
            Self::RequiredAndElement { element, .. } | Self::ElementOnly { element } => {
                &element.name
            }
        }
    }

    /// The element, if content exists.
    #[must_use]
    pub fn element(&self) -> Option<&ElementDescriptor> {
        match self {
            Self::RequiredOnly { .. } => None,
            Self::RequiredAndElement { element, .. } | Self::ElementOnly { element } => {
                Some(element)
            }
        }
    }

    /// The slot, if one exists.
    #[must_use]
    pub fn uploadable_element(&self) -> Option<&UploadableElementDescriptor> {
        match self {
            Self::RequiredOnly { uploadable_element }
            | Self::RequiredAndElement {
                uploadable_element, ..
            } => Some(uploadable_element),
            Self::ElementOnly { .. } => None,
        }
    }

    /// Whether the content is backed by a slot.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.uploadable_element().is_some()
    }

    /// Copy of this descriptor holding `element` instead of its current one.
    ///
    /// A `RequiredOnly` descriptor becomes `RequiredAndElement`; the element is
    /// linked to the slot.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::SlotMismatch`] if the element's kind differs from
    /// the slot's or it is already linked to another slot.
    pub fn with_element(&self, element: ElementDescriptor) -> ContentResult<Self> {
        match self {
            Self::ElementOnly { .. } => Ok(Self::ElementOnly { element }),
            Self::RequiredOnly { uploadable_element }
            | Self::RequiredAndElement {
                uploadable_element, ..
            } => {
                let mut element = element;
                if element.uploadable_id.is_none() {
                    element.uploadable_id = Some(uploadable_element.id);
                }
                Self::required_and_element(uploadable_element.clone(), element)
            }
        }
    }
}

fn check_slot(
    uploadable: &UploadableElementDescriptor,
    element: &ElementDescriptor,
) -> ContentResult<()> {
    if element.uploadable_id != Some(uploadable.id) {
        return Err(ContentError::SlotMismatch(format!(
            "element {} is not linked to slot {}",
            element.id, uploadable.id
        )));
    }
    if element.type_name != uploadable.type_name {
        return Err(ContentError::SlotMismatch(format!(
            "element is {} but slot expects {}",
            element.type_name, uploadable.type_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SequentialContext;

    #[test]
    fn test_required_and_element_accepts_linked_pair() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::PosterFile);
        let element = slot.new_element(&ctx);

        let descriptor =
            ContentDescriptor::required_and_element(slot.clone(), element).expect("linked pair");
        assert_eq!(descriptor.type_name(), ElementKind::PosterFile);
        assert!(descriptor.is_required());
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_required_and_element_rejects_unlinked() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::PosterFile);
        let element = ElementDescriptor::new(&ctx, ElementKind::PosterFile);

        let result = ContentDescriptor::required_and_element(slot, element);
        assert!(matches!(result, Err(ContentError::SlotMismatch(_))));
    }

    #[test]
    fn test_required_and_element_rejects_other_kind() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::PosterFile);
        let mut element = slot.new_element(&ctx);
        element.type_name = ElementKind::ImageFile;

        let result = ContentDescriptor::required_and_element(slot, element);
        assert!(matches!(result, Err(ContentError::SlotMismatch(_))));
    }

    #[test]
    fn test_with_element_links_required_only() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoBroadcast);
        let descriptor = ContentDescriptor::RequiredOnly {
            uploadable_element: slot.clone(),
        };

        let element = ElementDescriptor::new(&ctx, ElementKind::VideoBroadcast);
        let next = descriptor.with_element(element).expect("should link");

        assert!(matches!(next, ContentDescriptor::RequiredAndElement { .. }));
        assert_eq!(next.element().and_then(|e| e.uploadable_id), Some(slot.id));
        // The original snapshot is untouched.
        assert!(descriptor.element().is_none());
    }

    #[test]
    fn test_name_prefers_element() {
        let ctx = SequentialContext::new("tester");
        let slot = UploadableElementDescriptor::new(&ctx, ElementKind::VideoPrepublish);
        let mut element = slot.new_element(&ctx);
        element.name = "Keynote recording".to_string();

        let descriptor =
            ContentDescriptor::required_and_element(slot, element).expect("linked pair");
        assert_eq!(descriptor.name(), "Keynote recording");
    }

    #[test]
    fn test_wire_tag() {
        let ctx = SequentialContext::new("tester");
        let descriptor = ContentDescriptor::ElementOnly {
            element: ElementDescriptor::new(&ctx, ElementKind::Abstract),
        };
        let json = serde_json::to_value(&descriptor).expect("should serialize");
        assert_eq!(json["type"], "ElementOnly");
        assert_eq!(json["element"]["typeName"], "Abstract");

        let back: ContentDescriptor = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(back, descriptor);
    }
}
