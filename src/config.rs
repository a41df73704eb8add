use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::formats::JPEG_EXTENSIONS;
use crate::core::metadata::Result;

/// Caller-side settings. The codec itself never reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decimal places when showing a photo's coordinates.
    pub photo_precision: usize,
    /// Decimal places when showing coordinates pulled from a link.
    pub link_precision: usize,
    /// File extensions picked up by folder scans, compared without case.
    pub extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            photo_precision: 5,
            link_precision: 7,
            extensions: JPEG_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }

    /// Defaults when `path` is `None` or does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                debug!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "link_precision": 4 }"#).expect("partial config parses");

        assert_eq!(settings.link_precision, 4);
        assert_eq!(settings.photo_precision, 5);
        assert_eq!(settings.extensions, vec!["jpg", "jpeg"]);
    }

    #[test]
    fn absent_file_yields_defaults() {
        let settings = Settings::load_or_default(Some(Path::new("/nonexistent/geotagger.json")))
            .expect("absent file is not an error");

        assert_eq!(settings, Settings::default());
    }
}
