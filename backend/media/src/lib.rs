//! Everything between a path on disk and a [`SelectedFile`].
//!
//! [`SelectedFile`]: textlift_core::SelectedFile

pub mod accept;
pub mod drop_paths;
pub mod loader;
pub mod mime_detect;
pub mod picker;

pub use accept::AcceptFilter;
pub use drop_paths::parse_dropped_paths;
pub use loader::{load_file, load_selection};
pub use mime_detect::detect_mime_type;
pub use picker::{list_entries, PickerEntry};
