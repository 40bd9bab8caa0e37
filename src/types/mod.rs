// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Slot names, image references, and task definition references.

mod image_ref;
mod slot_name;
mod task_ref;

pub use image_ref::{ImageRef, ParseImageRefError};
pub use slot_name::{SlotColour, SlotName, SlotNameError};
pub use task_ref::TaskDefinitionRef;
