//! Crown and chin landmark editor.
//!
//! A photo is scaled to fit its container and two draggable markers are
//! placed over the crown and chin landmarks. Completed drags are converted
//! back to image pixels and reported as [`editor::LandmarkEvent`]s.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod marker;
pub mod photo;
pub mod sidecar;
pub mod viewport;

pub use app::LandmarkApp;
pub use config::Config;
pub use editor::{LandmarkEditor, LandmarkEvent, MIN_IMAGE_SIDE};
pub use error::{Error, Result};
pub use geometry::{CrownChinPointPair, Point, Size};
pub use marker::Landmark;
pub use viewport::ViewportFit;
