//! Base-shape templates - one polymorphic handler per [`BaseShape`].
//!
//! Every template answers the same three questions for content of its shape:
//! how to build a fresh descriptor, what heading to show, and what editing
//! surface to offer. The shared flow lives in the trait's provided methods;
//! each shape only says which fields it edits and how a version is laid out.
//!
//! Two rules hold for every template:
//!
//! 1. A descriptor of a kind the template does not own, or a version chain with
//!    a foreign `baseType`, yields a diagnostic surface. Nothing panics.
//! 2. An element with an empty chain is shown with a synthesized first version,
//!    which is handed back as [`EditingSurface::pending`] for the caller to
//!    commit on its next update cycle.

mod component;
mod file;
mod link;
mod text;
mod unsupported;
mod url;
mod video;

pub use component::ComponentTemplate;
pub use file::FileTemplate;
pub use link::LinkTemplate;
pub use text::TextTemplate;
pub use unsupported::UnsupportedTemplate;
pub use url::UrlTemplate;
pub use video::VideoTemplate;

use std::fmt::Debug;

use crate::context::EngineContext;
use crate::descriptor::ContentDescriptor;
use crate::element::{
    ElementDescriptor, ElementVersion, ShapePayload, UploadableElementDescriptor,
};
use crate::error::{ContentError, ContentResult};
use crate::kind::{BaseShape, ElementKind};
use crate::surface::{EditingSurface, FieldKey, SurfaceNode};

/// Construction, summary and editing behaviour for one base shape.
pub trait ContentTemplate: Debug + Send + Sync {
    /// The shape this template owns.
    fn shape(&self) -> BaseShape;

    /// Whether the template can edit content. Unsupported shapes are display-only.
    fn supported(&self) -> bool {
        true
    }

    /// Fields a kind of this shape exposes for editing.
    fn fields(&self, kind: ElementKind) -> &'static [FieldKey];

    /// Component nodes for one version of an element.
    fn render_version(
        &self,
        element: &ElementDescriptor,
        version: &ElementVersion,
    ) -> Vec<SurfaceNode>;

    /// Payload of the first version synthesized for an empty chain.
    fn default_payload(&self, _kind: ElementKind) -> ShapePayload {
        ShapePayload::empty(self.shape())
    }

    /// Whether content of `kind` belongs to this template.
    fn accepts(&self, kind: ElementKind) -> bool {
        kind.shape() == self.shape()
    }

    /// Build a fresh descriptor for `kind`.
    ///
    /// `required` yields a `RequiredOnly` slot, otherwise an `ElementOnly`
    /// element with an empty version chain. Both are marked new and named after
    /// the kind.
    ///
    /// # Panics
    ///
    /// In debug builds, if `kind` is not of this template's shape. That can only
    /// happen through a registry wiring bug.
    fn create_default(
        &self,
        ctx: &dyn EngineContext,
        kind: ElementKind,
        required: bool,
    ) -> ContentDescriptor {
        debug_assert!(
            self.accepts(kind),
            "{kind} routed to the {} template",
            self.shape()
        );
        if required {
            ContentDescriptor::RequiredOnly {
                uploadable_element: UploadableElementDescriptor::new(ctx, kind),
            }
        } else {
            ContentDescriptor::ElementOnly {
                element: ElementDescriptor::new(ctx, kind),
            }
        }
    }

    /// Short display label for the editor heading.
    fn render_editor_heading(&self, descriptor: &ContentDescriptor) -> String {
        descriptor.name().to_string()
    }

    /// Editing surface for a descriptor.
    fn produce_editing_surface(
        &self,
        ctx: &dyn EngineContext,
        descriptor: &ContentDescriptor,
    ) -> EditingSurface {
        guarded_surface(self, ctx, descriptor)
    }

    /// Write a field edit back as a new version.
    ///
    /// Returns `Ok(None)` when `value` equals the latest committed value, so
    /// no-op edits never grow the chain. A `RequiredOnly` descriptor gains a new
    /// element linked to its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unsupported, does not own the
    /// descriptor's kind, or the kind has no such field.
    fn commit_field(
        &self,
        ctx: &dyn EngineContext,
        descriptor: &ContentDescriptor,
        field: FieldKey,
        value: &str,
    ) -> ContentResult<Option<ContentDescriptor>> {
        commit_field_edit(self, ctx, descriptor, field, value)
    }
}

fn guarded_surface<T: ContentTemplate + ?Sized>(
    template: &T,
    ctx: &dyn EngineContext,
    descriptor: &ContentDescriptor,
) -> EditingSurface {
    let kind = descriptor.type_name();
    let shape = template.shape();
    if !template.accepts(kind) {
        tracing::warn!(%kind, %shape, "descriptor routed to the wrong template");
        return EditingSurface::fallback(format!(
            "Cannot edit {kind} content with the {shape} editor ({kind} is {} content)",
            kind.shape()
        ));
    }
    if let Err(err) = descriptor.validate() {
        tracing::warn!(%kind, %err, "inconsistent content descriptor");
        return EditingSurface::fallback(err.to_string());
    }

    let heading = template.render_editor_heading(descriptor);
    if !template.supported() {
        let children = match descriptor.element() {
            Some(element) => match element.data.latest() {
                Some(version) => template.render_version(element, version),
                None => vec![read_only_notice(kind)],
            },
            None => vec![read_only_notice(kind)],
        };
        return EditingSurface::new(SurfaceNode::section(heading, children));
    }
    let slot_notice = descriptor.uploadable_element().map(slot_summary);

    let Some(element) = descriptor.element() else {
        let children = slot_notice.into_iter().collect();
        return EditingSurface::new(SurfaceNode::section(heading, children));
    };

    if let Some(mismatch) = element.shape_mismatch() {
        tracing::warn!(
            %kind,
            index = mismatch.index,
            found = %mismatch.found,
            "version has the wrong base type"
        );
        return EditingSurface::fallback(format!(
            "Version {} of {} holds {} data, expected {}",
            mismatch.index + 1,
            element.name,
            mismatch.found,
            mismatch.expected
        ));
    }

    let finish = |mut children: Vec<SurfaceNode>| {
        children.extend(slot_notice.clone());
        SurfaceNode::section(heading.clone(), children)
    };

    match element.data.latest() {
        Some(version) => EditingSurface::new(finish(template.render_version(element, version))),
        None => {
            let payload = template.default_payload(element.type_name);
            let version = ElementVersion::new(ctx, element.type_name, payload);
            let root = finish(template.render_version(element, &version));
            match descriptor.with_element(element.with_version(version)) {
                Ok(pending) => {
                    tracing::debug!(%kind, element = %element.id, "materialized default version");
                    EditingSurface::with_pending(root, pending)
                }
                Err(err) => EditingSurface::fallback(err.to_string()),
            }
        }
    }
}

fn commit_field_edit<T: ContentTemplate + ?Sized>(
    template: &T,
    ctx: &dyn EngineContext,
    descriptor: &ContentDescriptor,
    field: FieldKey,
    value: &str,
) -> ContentResult<Option<ContentDescriptor>> {
    let shape = template.shape();
    if !template.supported() {
        return Err(ContentError::UnsupportedShape(shape));
    }
    let kind = descriptor.type_name();
    if !template.accepts(kind) {
        return Err(ContentError::KindMismatch { kind, expected: shape });
    }
    if !template.fields(kind).contains(&field) {
        return Err(ContentError::UnsupportedField { shape, field });
    }

    let element = match descriptor {
        ContentDescriptor::RequiredOnly { uploadable_element } => {
            uploadable_element.new_element(ctx)
        }
        ContentDescriptor::RequiredAndElement { element, .. }
        | ContentDescriptor::ElementOnly { element } => element.clone(),
    };
    if element.shape_mismatch().is_some() {
        return Err(ContentError::KindMismatch {
            kind,
            expected: shape,
        });
    }
    let current = element.data.latest().map_or_else(
        || template.default_payload(kind),
        |version| version.data.payload.clone(),
    );

    if current.field(field) == Some(value) {
        return Ok(None);
    }
    let payload = current
        .with_field(field, value.to_string())
        .ok_or(ContentError::UnsupportedField { shape, field })?;
    let next = element.with_version(ElementVersion::new(ctx, kind, payload));
    descriptor.with_element(next).map(Some)
}

fn slot_summary(slot: &UploadableElementDescriptor) -> SurfaceNode {
    let uploaders = match slot.uploaders.len() {
        0 => "no uploaders invited".to_string(),
        1 => "1 uploader invited".to_string(),
        n => format!("{n} uploaders invited"),
    };
    let remaining = slot
        .uploads_remaining
        .map_or_else(|| "unlimited uploads".to_string(), |n| format!("{n} uploads remaining"));
    SurfaceNode::notice(format!("Uploadable: {uploaders}, {remaining}"))
}

/// Notice shown in place of editors for a disabled shape.
fn read_only_notice(kind: ElementKind) -> SurfaceNode {
    SurfaceNode::notice(format!("{kind} content cannot be edited here."))
}

/// Non-empty string as `Some`.
fn present(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Diagnostic node for a payload that slipped past the shape check.
fn foreign_payload(shape: BaseShape, payload: &ShapePayload) -> SurfaceNode {
    SurfaceNode::diagnostic(format!("{shape} editor received {} data", payload.shape()))
}
