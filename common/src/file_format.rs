use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

pub fn get_file_extension<P: AsRef<Path>>(path: &P) -> Option<&str> {
    path.as_ref().extension().and_then(|os_str| os_str.to_str())
}

/// Text formats used for parameter files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> FileFormatResult<Self> {
        let path = path.as_ref();
        let ext = get_file_extension(&path).ok_or(FileExtensionError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_case_insensitive() {
        assert_eq!(FileFormat::from_path("a.yaml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("a.YML").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("dir/a.Json").unwrap(), FileFormat::Json);
    }

    #[test]
    fn test_from_path_errors() {
        assert!(matches!(
            FileFormat::from_path("params"),
            Err(FileExtensionError::MissingFileExtension)
        ));
        assert!(matches!(
            FileFormat::from_path("params.toml"),
            Err(FileExtensionError::UnsupportedFileExtension(name)) if name == "params.toml"
        ));
    }
}
