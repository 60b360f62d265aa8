//! Deserialized Swagger 2.0 document model.
//!
//! Only the subset the verifier consults is modeled: `paths`, `basePath`,
//! the document- and operation-level `consumes`/`produces` lists,
//! `parameters`, and `responses`. Unknown fields are ignored.
//!
//! The model is immutable once built, and by the time a [`Document`] exists
//! every `$ref` has already been resolved inline by the loader.

use std::collections::BTreeMap;

use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// The Swagger version this crate verifies against.
pub const SWAGGER_VERSION: &str = "2.0";

/// An expanded Swagger 2.0 document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Declared specification version; always `"2.0"` once loaded.
    pub swagger: String,
    /// URL prefix under which every path template is served.
    #[serde(default)]
    pub base_path: String,
    /// Document-wide request media types.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Document-wide response media types.
    #[serde(default)]
    pub produces: Vec<String>,
    /// Path templates in declaration order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// One declared path template: its per-method operations plus path-level
/// parameters shared by all of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// GET operation.
    pub get: Option<Operation>,
    /// PUT operation.
    pub put: Option<Operation>,
    /// POST operation.
    pub post: Option<Operation>,
    /// DELETE operation.
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    pub options: Option<Operation>,
    /// HEAD operation.
    pub head: Option<Operation>,
    /// PATCH operation.
    pub patch: Option<Operation>,
    /// Parameters shared by every operation under this template.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Returns the operation slot for an HTTP method.
    #[must_use]
    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            Method::HEAD => self.head.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            _ => None,
        }
    }

    /// Iterates over the declared (method, operation) pairs.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::GET, self.get.as_ref()),
            (Method::PUT, self.put.as_ref()),
            (Method::POST, self.post.as_ref()),
            (Method::DELETE, self.delete.as_ref()),
            (Method::OPTIONS, self.options.as_ref()),
            (Method::HEAD, self.head.as_ref()),
            (Method::PATCH, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, operation)| operation.map(|operation| (method, operation)))
    }
}

/// One HTTP method under one path template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    /// Request media types; overrides the document-wide list when non-empty.
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Response media types; overrides the document-wide list when non-empty.
    #[serde(default)]
    pub produces: Vec<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared responses.
    #[serde(default)]
    pub responses: Responses,
}

/// Declared responses of one operation: status-specific definitions plus the
/// optional `default` fallback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct Responses {
    /// The definition applying when no status-specific one matches.
    pub default: Option<ResponseDef>,
    /// Definitions keyed by numeric status code.
    pub status_codes: BTreeMap<u16, ResponseDef>,
}

impl TryFrom<IndexMap<String, Value>> for Responses {
    type Error = String;

    fn try_from(raw: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut responses = Responses::default();
        for (key, value) in raw {
            // Vendor extensions are legal inside `responses`.
            if key.starts_with("x-") {
                continue;
            }
            let definition: ResponseDef =
                serde_json::from_value(value).map_err(|err| format!("response '{key}': {err}"))?;
            if key == "default" {
                responses.default = Some(definition);
            } else {
                let code: u16 = key
                    .parse()
                    .map_err(|_| format!("invalid response status code '{key}'"))?;
                responses.status_codes.insert(code, definition);
            }
        }
        Ok(responses)
    }
}

/// One response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseDef {
    /// Human-readable description of the response.
    pub description: Option<String>,
    /// Schema the response payload must satisfy, if any.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// One declared parameter.
///
/// Only `in: body` parameters are verified; the other locations are carried
/// so the resolver can skip them explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Declared parameter name.
    #[serde(default)]
    pub name: String,
    /// Where the parameter lives.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,
    /// Schema the payload must satisfy; only meaningful for body parameters.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// The `in` location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// The request payload; the only location that is verified.
    Body,
    /// A query string parameter.
    Query,
    /// A path template variable.
    Path,
    /// A request header.
    Header,
    /// A form field.
    FormData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Document {
        serde_json::from_value(json!({
            "swagger": "2.0",
            "basePath": "/v2",
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "paths": {
                "/user/{username}": {
                    "put": {
                        "consumes": ["application/json; charset=utf-8"],
                        "parameters": [
                            {
                                "name": "body",
                                "in": "body",
                                "required": true,
                                "schema": {"type": "object"}
                            }
                        ],
                        "responses": {
                            "200": {"description": "ok", "schema": {"type": "object"}},
                            "default": {"description": "error"},
                            "x-internal": "ignored"
                        }
                    },
                    "parameters": [
                        {"name": "username", "in": "path", "required": true}
                    ]
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_document_fields() {
        let document = sample_document();
        assert_eq!(document.swagger, SWAGGER_VERSION);
        assert_eq!(document.base_path, "/v2");
        assert_eq!(document.consumes, vec!["application/json"]);
        assert_eq!(document.paths.len(), 1);
    }

    #[test]
    fn test_path_item_operation_dispatch() {
        let document = sample_document();
        let path_item = &document.paths["/user/{username}"];

        assert!(path_item.operation(&Method::PUT).is_some());
        assert!(path_item.operation(&Method::GET).is_none());
        assert!(path_item.operation(&Method::TRACE).is_none());
    }

    #[test]
    fn test_path_item_operations_iterates_declared_only() {
        let document = sample_document();
        let path_item = &document.paths["/user/{username}"];

        let methods: Vec<Method> = path_item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![Method::PUT]);
    }

    #[test]
    fn test_responses_split_default_from_status_codes() {
        let document = sample_document();
        let operation = document.paths["/user/{username}"].put.as_ref().unwrap();

        assert!(operation.responses.default.is_some());
        assert!(operation.responses.status_codes.contains_key(&200));
        assert_eq!(operation.responses.status_codes.len(), 1);
    }

    #[test]
    fn test_responses_reject_non_numeric_status() {
        let result: Result<Responses, _> = serde_json::from_value(json!({
            "ok": {"description": "bad key"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parameter_locations() {
        let document = sample_document();
        let path_item = &document.paths["/user/{username}"];
        let operation = path_item.put.as_ref().unwrap();

        assert_eq!(operation.parameters[0].location, ParameterLocation::Body);
        assert!(operation.parameters[0].required);
        assert_eq!(path_item.parameters[0].location, ParameterLocation::Path);
    }

    #[test]
    fn test_form_data_location_spelling() {
        let parameter: Parameter = serde_json::from_value(json!({
            "name": "avatar",
            "in": "formData"
        }))
        .unwrap();
        assert_eq!(parameter.location, ParameterLocation::FormData);
    }
}
