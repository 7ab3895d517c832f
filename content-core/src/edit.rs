//! Edit buffers and the caller update loop.
//!
//! Templates never write to content themselves. Keystrokes land in an
//! [`EditBuffer`] and are committed through
//! [`ContentTemplate::commit_field`] when the field loses focus. Defaults a
//! template materializes during rendering are queued and applied on the next
//! [`EditSession::tick`], never during the render that produced them.

use std::collections::HashMap;

use crate::context::EngineContext;
use crate::descriptor::ContentDescriptor;
use crate::error::ContentResult;
use crate::surface::{EditingSurface, FieldKey};
use crate::template::ContentTemplate;

/// Uncommitted text for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    value: Option<String>,
}

impl EditBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffered text.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Buffered text, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Empty the buffer, returning its text only if it differs from `committed`.
    pub fn take_commit(&mut self, committed: &str) -> Option<String> {
        self.value.take().filter(|value| value != committed)
    }
}

/// A minimal editor update loop around one descriptor.
#[derive(Debug, Clone)]
pub struct EditSession {
    descriptor: ContentDescriptor,
    buffers: HashMap<FieldKey, EditBuffer>,
    queued: Option<ContentDescriptor>,
}

impl EditSession {
    /// Start editing `descriptor`.
    #[must_use]
    pub fn new(descriptor: ContentDescriptor) -> Self {
        Self {
            descriptor,
            buffers: HashMap::new(),
            queued: None,
        }
    }

    /// The descriptor as committed so far.
    #[must_use]
    pub fn descriptor(&self) -> &ContentDescriptor {
        &self.descriptor
    }

    /// Consume the session, returning the committed descriptor.
    #[must_use]
    pub fn into_descriptor(self) -> ContentDescriptor {
        self.descriptor
    }

    /// Whether a materialized default is waiting for the next tick.
    #[must_use]
    pub fn has_queued(&self) -> bool {
        self.queued.is_some()
    }

    /// Produce the editing surface, queueing its pending default.
    ///
    /// At most one default is queued; rendering again before a tick does not
    /// queue a second.
    pub fn render(
        &mut self,
        template: &dyn ContentTemplate,
        ctx: &dyn EngineContext,
    ) -> EditingSurface {
        let surface = template.produce_editing_surface(ctx, &self.descriptor);
        if self.queued.is_none() {
            self.queued.clone_from(&surface.pending);
        }
        surface
    }

    /// Buffer a keystroke-level edit.
    pub fn edit(&mut self, field: FieldKey, value: impl Into<String>) {
        self.buffers.entry(field).or_default().set(value);
    }

    /// Commit the buffered value of `field`.
    ///
    /// Returns whether a version was appended. A commit replaces any queued
    /// default, since it starts from the same default payload.
    ///
    /// # Errors
    ///
    /// Propagates [`ContentTemplate::commit_field`] errors.
    pub fn blur(
        &mut self,
        template: &dyn ContentTemplate,
        ctx: &dyn EngineContext,
        field: FieldKey,
    ) -> ContentResult<bool> {
        let committed = self.committed_value(template, field);
        let buffered = self.buffers.get_mut(&field);
        let Some(value) = buffered.and_then(|b| b.take_commit(&committed)) else {
            return Ok(false);
        };
        match template.commit_field(ctx, &self.descriptor, field, &value)? {
            Some(next) => {
                tracing::debug!(kind = %next.type_name(), %field, "field committed");
                self.descriptor = next;
                self.queued = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply queued commits and return how many were applied.
    pub fn tick(&mut self) -> usize {
        match self.queued.take() {
            Some(pending) => {
                self.descriptor = pending;
                1
            }
            None => 0,
        }
    }

    fn committed_value(&self, template: &dyn ContentTemplate, field: FieldKey) -> String {
        let kind = self.descriptor.type_name();
        let latest = self.descriptor.element().and_then(|e| e.data.latest());
        let payload =
            latest.map_or_else(|| template.default_payload(kind), |v| v.data.payload.clone());
        payload.field(field).unwrap_or_default().to_string()
    }
}
