//! State owner for the "List your project" form.
//!
//! [`ListProjectForm`] holds every piece of client-side state the form needs
//! (tag selections, avatar preview, preview modal, confirmation gate). A UI
//! layer renders from it and forwards user events to it.

use crate::avatar::{AvatarSelection, AvatarState, PreviewUrlFactory, SelectedFile};
use crate::confirmation::ConfirmationGate;
use crate::form_data::FormValues;
use crate::markup::MarkupRenderer;
use crate::preview::build_preview;
use crate::project::Project;
use crate::tags::{TagCategory, TagOption, TagsState};
use crate::types::Timestamp;

/// Sends the completed form to the server.
pub trait FormSubmitter {
    fn submit(&mut self, values: FormValues);
}

#[derive(Debug, Default)]
pub struct ListProjectForm {
    tags: TagsState,
    avatar: AvatarState,
    preview: Option<Project>,
    show_preview: bool,
    gate: ConfirmationGate,
}

impl ListProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &TagsState {
        &self.tags
    }

    pub fn avatar(&self) -> &AvatarState {
        &self.avatar
    }

    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }

    /// The preview to show, if the preview modal is open.
    pub fn visible_preview(&self) -> Option<&Project> {
        if self.show_preview {
            self.preview.as_ref()
        } else {
            None
        }
    }

    pub fn update_tags(&mut self, category: TagCategory, selections: Vec<TagOption>) {
        self.tags.update(category, selections);
    }

    pub fn select_avatar(
        &mut self,
        files: &[SelectedFile],
        preview_urls: &mut dyn PreviewUrlFactory,
    ) -> AvatarSelection {
        self.avatar.select(files, preview_urls)
    }

    /// Hidden inputs mirroring the tag selections.
    pub fn hidden_fields(&self) -> Vec<(&'static str, String)> {
        TagCategory::ALL
            .iter()
            .map(|&category| (category.field_name(), self.tags.hidden_value(category)))
            .collect()
    }

    /// Values as the browser would submit them: the visible inputs plus the
    /// hidden tag fields.
    pub fn collect_values(&self, visible: &FormValues) -> FormValues {
        let mut values = visible.clone();
        for (name, value) in self.hidden_fields() {
            values.set(name, value);
        }
        values
    }

    /// Build a preview from the current inputs and open the preview modal.
    pub fn display_preview(
        &mut self,
        visible: &FormValues,
        renderer: &dyn MarkupRenderer,
        now: Timestamp,
    ) {
        let values = self.collect_values(visible);
        self.preview = Some(build_preview(&values, &self.avatar.src, renderer, now));
        self.show_preview = true;
    }

    pub fn close_preview(&mut self) {
        self.show_preview = false;
    }

    /// The Submit button only opens the confirmation modal.
    pub fn click_submit(&mut self) {
        self.gate.request();
    }

    /// Confirm the modal and hand the form to `submitter`.
    pub fn confirm(&mut self, visible: &FormValues, submitter: &mut dyn FormSubmitter) -> bool {
        let values = self.collect_values(visible);
        self.gate.confirm(|| submitter.submit(values))
    }

    pub fn cancel(&mut self) {
        self.gate.cancel();
    }

    /// The server answered (e.g. with validation errors); allow resubmitting.
    pub fn submission_finished(&mut self) {
        self.gate.finish();
    }
}
