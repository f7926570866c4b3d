use simrec_core::{Error, Result};
use std::fmt;
use std::path::Path;

/// On-disk encoding of an artifact, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `.json`
    Json,
    /// `.json.gz`
    JsonGz,
    /// `.bin` or `.bincode`
    Bincode,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".json.gz") {
            Ok(ArtifactFormat::JsonGz)
        } else if name.ends_with(".json") {
            Ok(ArtifactFormat::Json)
        } else if name.ends_with(".bin") || name.ends_with(".bincode") {
            Ok(ArtifactFormat::Bincode)
        } else {
            Err(Error::InvalidConfig(format!(
                "unrecognized artifact extension: {}",
                path.display()
            )))
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactFormat::Json => write!(f, "json"),
            ArtifactFormat::JsonGz => write!(f, "json.gz"),
            ArtifactFormat::Bincode => write!(f, "bincode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new("data/movies.json")).unwrap(),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("similarity.JSON.GZ")).unwrap(),
            ArtifactFormat::JsonGz
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("similarity.bin")).unwrap(),
            ArtifactFormat::Bincode
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("similarity.bincode")).unwrap(),
            ArtifactFormat::Bincode
        );
    }

    #[test]
    fn test_unknown_extension() {
        let err = ArtifactFormat::from_path(Path::new("similarity.pkl")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
