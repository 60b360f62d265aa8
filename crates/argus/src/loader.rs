//! Document loading.
//!
//! The loader fetches the raw definition (filesystem path or http(s) URL),
//! detects YAML vs JSON, gates on the declared swagger version, expands
//! every `$ref` inline, and deserializes the result into the [`Document`]
//! model. Fetch failures and build failures are kept apart so the verifier
//! can wrap them as `failed to load definition` and `failed to build
//! Document` respectively.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::document::{Document, SWAGGER_VERSION};
use crate::error::{ExpandError, LoadError};
use crate::expand;

/// Resolution base of a loaded document, used to join relative `$ref`s.
#[derive(Debug, Clone)]
pub(crate) enum DocumentBase {
    /// The document was read from this file.
    File(PathBuf),
    /// The document was fetched from this URL.
    Url(Url),
}

impl DocumentBase {
    /// A canonical key identifying the document location.
    pub(crate) fn key(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.to_string(),
        }
    }

    /// Resolves a referenced location against this base.
    pub(crate) fn join(&self, reference: &str) -> Result<Self, ExpandError> {
        match self {
            Self::File(path) => {
                let referenced = Path::new(reference);
                if referenced.is_absolute() {
                    Ok(Self::File(referenced.to_path_buf()))
                } else {
                    let parent = path.parent().unwrap_or_else(|| Path::new(""));
                    Ok(Self::File(parent.join(referenced)))
                }
            }
            Self::Url(url) => {
                url.join(reference)
                    .map(Self::Url)
                    .map_err(|_| ExpandError::InvalidReference {
                        reference: reference.to_string(),
                    })
            }
        }
    }

    /// Reads the raw bytes at this location.
    pub(crate) fn read(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Self::File(path) => fs::read(path).map_err(|source| LoadError::Read {
                path: path.display().to_string(),
                source,
            }),
            Self::Url(url) => fetch_url(url),
        }
    }
}

/// Fetches the raw definition bytes from a filesystem path or http(s) URL.
pub(crate) fn fetch(location: &str) -> Result<(Vec<u8>, DocumentBase), LoadError> {
    if let Some(url) = parse_http_url(location) {
        let bytes = fetch_url(&url)?;
        Ok((bytes, DocumentBase::Url(url)))
    } else {
        let path = PathBuf::from(location);
        let bytes = fs::read(&path).map_err(|source| LoadError::Read {
            path: location.to_string(),
            source,
        })?;
        Ok((bytes, DocumentBase::File(path)))
    }
}

fn parse_http_url(location: &str) -> Option<Url> {
    let url = Url::parse(location).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn fetch_url(url: &Url) -> Result<Vec<u8>, LoadError> {
    debug!(url = %url, "fetching definition over http");
    let response = reqwest::blocking::get(url.clone()).map_err(|source| LoadError::Http {
        url: url.to_string(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().map_err(|source| LoadError::Http {
        url: url.to_string(),
        source,
    })?;
    Ok(bytes.to_vec())
}

/// Parses definition bytes into a JSON value, converting from YAML when the
/// location extension or a content sniff says so.
pub(crate) fn parse_bytes(location: &str, bytes: &[u8]) -> Result<Value, LoadError> {
    if is_yaml(location, bytes) {
        serde_yaml::from_slice(bytes).map_err(LoadError::Yaml)
    } else {
        serde_json::from_slice(bytes).map_err(LoadError::Json)
    }
}

fn is_yaml(location: &str, bytes: &[u8]) -> bool {
    let lower = location.to_ascii_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        return true;
    }
    if lower.ends_with(".json") {
        return false;
    }
    // No telling extension; JSON documents open with an object or array.
    !matches!(
        bytes.iter().find(|b| !b.is_ascii_whitespace()),
        Some(&b'{') | Some(&b'[')
    )
}

/// Builds the expanded document model from raw definition bytes.
pub(crate) fn build_document(
    location: &str,
    bytes: &[u8],
    base: &DocumentBase,
) -> Result<Document, LoadError> {
    let raw = parse_bytes(location, bytes)?;
    let version = raw
        .get("swagger")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if version != SWAGGER_VERSION {
        return Err(LoadError::UnsupportedVersion(version.to_string()));
    }

    let expanded = expand::expand_document(raw, base).map_err(LoadError::Expand)?;
    let document: Document = serde_json::from_value(expanded).map_err(LoadError::Model)?;
    info!(
        location,
        paths = document.paths.len(),
        base_path = %document.base_path,
        "api definition loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DocumentBase {
        DocumentBase::File(PathBuf::from("definition.json"))
    }

    #[test]
    fn test_is_yaml_by_extension() {
        assert!(is_yaml("api.yaml", b"{}"));
        assert!(is_yaml("api.YML", b"{}"));
        assert!(!is_yaml("api.json", b"swagger: '2.0'"));
    }

    #[test]
    fn test_is_yaml_by_content_sniff() {
        assert!(is_yaml("definition", b"swagger: '2.0'\n"));
        assert!(!is_yaml("definition", b"  {\"swagger\": \"2.0\"}"));
        assert!(!is_yaml("definition", b"[1]"));
    }

    #[test]
    fn test_parse_yaml_bytes() {
        let value = parse_bytes("api.yaml", b"swagger: '2.0'\npaths: {}\n").unwrap();
        assert_eq!(value["swagger"], "2.0");
    }

    #[test]
    fn test_parse_invalid_json_bytes() {
        let err = parse_bytes("api.json", b"{nope").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_build_document_rejects_other_versions() {
        let err = build_document("api.json", br#"{"swagger": "3.0"}"#, &base()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedVersion(v) if v == "3.0"));

        let err = build_document("api.json", br#"{"openapi": "3.0.0"}"#, &base()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedVersion(v) if v.is_empty()));
    }

    #[test]
    fn test_build_document_minimal() {
        let bytes = br#"{"swagger": "2.0", "basePath": "/v2", "paths": {}}"#;
        let document = build_document("api.json", bytes, &base()).unwrap();
        assert_eq!(document.base_path, "/v2");
        assert!(document.paths.is_empty());
    }

    #[test]
    fn test_fetch_missing_file() {
        let err = fetch("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn test_file_base_join_is_sibling_relative() {
        let base = DocumentBase::File(PathBuf::from("specs/api.json"));
        let joined = base.join("models/shared.json").unwrap();
        assert_eq!(joined.key(), format!("specs{}models/shared.json", std::path::MAIN_SEPARATOR));
    }

    #[test]
    fn test_url_base_join() {
        let base = DocumentBase::Url(Url::parse("https://example.com/specs/api.json").unwrap());
        let joined = base.join("shared.json").unwrap();
        assert_eq!(joined.key(), "https://example.com/specs/shared.json");
    }
}
