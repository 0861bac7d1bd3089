use base64::Engine;
use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geometry::Size;

/// Where the photo comes from: a file on disk or an inline `data:` URI.
#[derive(Clone, Debug, PartialEq)]
pub enum PhotoSource {
    File(PathBuf),
    DataUri(String),
}

impl PhotoSource {
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("data:") {
            PhotoSource::DataUri(reference.to_string())
        } else {
            PhotoSource::File(PathBuf::from(reference))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PhotoSource::File(p) => Some(p),
            PhotoSource::DataUri(_) => None,
        }
    }

    /// Short label for window titles and log lines.
    pub fn display_name(&self) -> String {
        match self {
            PhotoSource::File(p) => p
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
            PhotoSource::DataUri(uri) => {
                let header = uri.split(',').next().unwrap_or("data:");
                header.to_string()
            }
        }
    }

    pub fn load(&self) -> Result<Photo> {
        let image = match self {
            PhotoSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| Error::Io {
                    path: path.clone(),
                    source,
                })?;
                image::load_from_memory(&bytes)?
            }
            PhotoSource::DataUri(uri) => image::load_from_memory(&decode_data_uri(uri)?)?,
        };
        Ok(Photo {
            source: self.clone(),
            image,
        })
    }
}

/// A decoded photo together with the reference it was loaded from.
#[derive(Clone, Debug)]
pub struct Photo {
    pub source: PhotoSource,
    pub image: DynamicImage,
}

impl Photo {
    pub fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        let rgba = self.image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let pixels = rgba.as_flat_samples();
        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice())
    }
}

/// Decodes the payload of a base64 `data:` URI.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let rest = uri.strip_prefix("data:").ok_or_else(|| Error::DataUri {
        message: "missing 'data:' prefix".to_string(),
    })?;
    let (header, payload) = rest.split_once(',').ok_or_else(|| Error::DataUri {
        message: "missing ',' separator".to_string(),
    })?;
    if !header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(Error::DataUri {
            message: "only base64 payloads are supported".to_string(),
        });
    }
    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::DataUri {
            message: e.to_string(),
        })
}
