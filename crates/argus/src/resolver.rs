//! Operation resolution within a mapped path item.
//!
//! Stateless lookups over the expanded document: the operation slot for a
//! method, the effective MIME lists, the body parameter, and the response
//! definition for a status code. Query, header, path and formData parameters
//! are deliberately skipped; only the body parameter is verified.

use http::Method;

use crate::document::{Document, Operation, Parameter, ParameterLocation, PathItem, ResponseDef};
use crate::error::VerifierError;

/// Looks up the path item for a mapped template.
pub(crate) fn path_item<'a>(
    document: &'a Document,
    template: &str,
) -> Result<&'a PathItem, VerifierError> {
    document
        .paths
        .get(template)
        .ok_or_else(|| VerifierError::NoPathItem(template.to_string()))
}

/// Selects the operation slot for a method.
pub(crate) fn operation<'a>(
    path_item: &'a PathItem,
    method: &Method,
) -> Result<&'a Operation, VerifierError> {
    path_item
        .operation(method)
        .ok_or_else(|| VerifierError::NoOperation(method.to_string()))
}

/// The operation's request media types, or the document-wide list.
pub(crate) fn effective_consumes<'a>(
    document: &'a Document,
    operation: &'a Operation,
) -> &'a [String] {
    if operation.consumes.is_empty() {
        &document.consumes
    } else {
        &operation.consumes
    }
}

/// The operation's response media types, or the document-wide list.
pub(crate) fn effective_produces<'a>(
    document: &'a Document,
    operation: &'a Operation,
) -> &'a [String] {
    if operation.produces.is_empty() {
        &document.produces
    } else {
        &operation.produces
    }
}

/// First `in: body` parameter of the operation, falling through to the path
/// item's shared parameters.
pub(crate) fn body_parameter<'a>(
    operation: &'a Operation,
    path_item: &'a PathItem,
) -> Option<&'a Parameter> {
    find_body(&operation.parameters).or_else(|| find_body(&path_item.parameters))
}

fn find_body(parameters: &[Parameter]) -> Option<&Parameter> {
    parameters
        .iter()
        .find(|parameter| parameter.location == ParameterLocation::Body)
}

/// Response definition for a status code, with `default` fallback.
pub(crate) fn response_for_status(
    operation: &Operation,
    status: u16,
) -> Result<&ResponseDef, VerifierError> {
    operation
        .responses
        .status_codes
        .get(&status)
        .or(operation.responses.default.as_ref())
        .ok_or(VerifierError::NoResponseDefinition)
}
