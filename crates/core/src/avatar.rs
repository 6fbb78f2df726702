//! Client-side avatar selection: size ceiling check and local preview.
//!
//! Nothing here touches the network; the file itself travels with the form
//! submission.

use crate::formatting::format_file_size;

/// Largest avatar accepted, client-side and server-side.
pub const MAX_AVATAR_SIZE_BYTES: u64 = 1024 * 1024;

/// File extensions accepted by the avatar input.
pub const ACCEPTED_AVATAR_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A file the user picked in the avatar input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// Produces revocable local URLs for previewing a picked file.
pub trait PreviewUrlFactory {
    fn create_object_url(&mut self, file: &SelectedFile) -> String;
}

/// What the caller must do with its file input after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSelection {
    /// The file fits; keep it in the input.
    Accepted,
    /// The file is too large; clear the input so it is not submitted.
    Rejected,
    /// The input change carried no file.
    Unchanged,
}

/// Avatar preview state. At most one of `src` and `error` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarState {
    pub src: String,
    pub size: String,
    pub error: String,
}

impl AvatarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a change of the avatar input.
    ///
    /// Only the first file is considered. Previously created preview URLs are
    /// not revoked.
    pub fn select(
        &mut self,
        files: &[SelectedFile],
        preview_urls: &mut dyn PreviewUrlFactory,
    ) -> AvatarSelection {
        let Some(file) = files.first() else {
            return AvatarSelection::Unchanged;
        };

        if file.size <= MAX_AVATAR_SIZE_BYTES {
            *self = AvatarState {
                src: preview_urls.create_object_url(file),
                size: format_file_size(file.size),
                error: String::new(),
            };
            AvatarSelection::Accepted
        } else {
            *self = AvatarState {
                src: String::new(),
                size: String::new(),
                error: oversized_message(),
            };
            AvatarSelection::Rejected
        }
    }
}

/// Error shown when a picked avatar exceeds [`MAX_AVATAR_SIZE_BYTES`].
pub fn oversized_message() -> String {
    format!(
        "Please choose a file smaller than {}",
        format_file_size(MAX_AVATAR_SIZE_BYTES)
    )
}
