//! # Script Panel Core
//!
//! Core types shared by the settings store and the palette canvas: geometry
//! values, the persisted layout document, constants, and the common error type.

pub mod constants;
pub mod document;
pub mod error;
pub mod types;

pub use document::{
    script_basename, script_extension, CanvasSettings, DisplayInfo, ItemId, LayoutDocument,
    PlacementInfo,
};
pub use error::{Error, Result};
pub use types::{Point, Rect, Rgb, Size};
