use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::file_format::FileFormat;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> SerdeFormatResult<String> {
    let text = match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };

    Ok(normalize_line_endings(&text))
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: FileFormat,
) -> SerdeFormatResult<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Converts CRLF to LF and guarantees a single trailing newline.
fn normalize_line_endings(text: &str) -> String {
    let mut normalized = text.replace("\r\n", "\n");
    let trimmed_len = normalized.trim_end_matches('\n').len();
    normalized.truncate(trimmed_len);
    normalized.push('\n');
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Params {
        name: String,
        low: f32,
        high: f32,
    }

    #[test]
    fn test_serialize_then_deserialize_all_formats() {
        let params = Params {
            name: "skin".to_string(),
            low: 27.0,
            high: 35.0,
        };

        for format in [FileFormat::Yaml, FileFormat::Json] {
            let text = serialize(&params, format).unwrap();
            assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
            let back: Params = deserialize(&text, format).unwrap();
            assert_eq!(back, params, "format {:?}", format);
        }
    }

    #[test]
    fn test_deserialize_reports_format_error() {
        let result: SerdeFormatResult<Params> = deserialize("{ not json", FileFormat::Json);
        assert!(matches!(result, Err(SerdeFormatError::Json(_))));
    }
}
