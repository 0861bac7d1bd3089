use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::geometry::CrownChinPointPair;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LandmarkFile {
    landmarks: CrownChinPointPair,
}

/// `photo.jpg` -> `photo.jpg.landmarks.json`
pub fn sidecar_path(photo_path: &Path) -> PathBuf {
    photo_path.with_extension(format!(
        "{}landmarks.json",
        photo_path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!("{ext}."))
            .unwrap_or_default()
    ))
}

/// Reads the landmarks stored next to the photo, if any.
pub fn load_landmarks(photo_path: &Path) -> Result<Option<CrownChinPointPair>> {
    let path = sidecar_path(photo_path);
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    let file: LandmarkFile = serde_json::from_str(&data)?;
    Ok(Some(file.landmarks))
}

pub fn save_landmarks(photo_path: &Path, landmarks: &CrownChinPointPair) -> Result<PathBuf> {
    let path = sidecar_path(photo_path);
    let data = serde_json::to_string_pretty(&LandmarkFile {
        landmarks: *landmarks,
    })?;
    std::fs::write(&path, data).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
