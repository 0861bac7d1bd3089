use clap::Parser;

use crate::geometry::{CrownChinPointPair, Point, Size};
use crate::photo::PhotoSource;

pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];

/// Drag crown and chin markers over a photo.
#[derive(Parser, Debug, Clone)]
#[command(name = "landmark-edit", version, about)]
pub struct Config {
    /// Photo to annotate: a file path or a base64 `data:` URI
    pub photo: Option<String>,

    /// Initial crown point in image pixels, as X,Y
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub crown: Option<Point>,

    /// Initial chin point in image pixels, as X,Y
    #[arg(long, value_name = "X,Y", allow_hyphen_values = true)]
    pub chin: Option<Point>,

    /// Side of the square marker glyphs, in screen points
    #[arg(long, default_value_t = 20.0, value_parser = parse_marker_size, allow_hyphen_values = true)]
    pub marker_size: f32,

    /// Neither read nor write the `.landmarks.json` file next to the photo
    #[arg(long)]
    pub no_sidecar: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn photo_source(&self) -> Option<PhotoSource> {
        self.photo.as_deref().map(PhotoSource::parse)
    }

    pub fn marker_size(&self) -> Size {
        Size::new(self.marker_size, self.marker_size)
    }

    /// Overlays the command-line points on `stored`, point by point, so a
    /// lone `--crown` keeps the stored chin.
    pub fn merge_landmarks(&self, stored: CrownChinPointPair) -> CrownChinPointPair {
        CrownChinPointPair::new(
            self.crown.unwrap_or(stored.crown),
            self.chin.unwrap_or(stored.chin),
        )
    }

    pub fn sidecar_enabled(&self) -> bool {
        !self.no_sidecar
    }
}

fn parse_marker_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !size.is_finite() || size <= 0.0 {
        return Err(format!("marker size must be a positive number, got {s}"));
    }
    Ok(size)
}
