//! Argus - contract verification for HTTP traffic
//!
//! This crate checks live HTTP requests and responses against a Swagger 2.0
//! API description: the path must be declared, the method defined, the body
//! content type acceptable, the payload decodable, and the decoded payload
//! valid against the JSON schema attached to the matched operation or
//! response status.
//!
//! # Overview
//!
//! A [`Verifier`] is built once per definition (filesystem path or http(s)
//! URL) and is read-only afterwards, so it can be shared across threads.
//! Verification mutates only the request/response handle passed in: the body
//! is drained exactly once and replaced by an in-memory buffer over the same
//! bytes, so downstream consumers still observe the original stream.
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────────────────┐
//!                  │  definition (file / URL)  │
//!                  └────────────┬──────────────┘
//!                               │ load + expand $refs
//!                  ┌────────────▼──────────────┐
//!                  │         Document          │
//!                  └────┬─────────────────┬────┘
//!                       │                 │
//!     HTTP request ┌────▼─────┐     ┌─────▼────┐
//!         │        │  Request │     │ Operation│
//!         ▼        │  Mapper  │────▶│ Resolver │
//!    ┌──────────┐  └──────────┘     └─────┬────┘
//!    │ Verifier │   template + vars       │ consumes/produces,
//!    └──────────┘                         ▼ body parameter, response
//!                            content type → decode → schema
//! ```
//!
//! # Example
//!
//! ```no_run
//! use argus::{Body, Verifier, VerifierOptions};
//!
//! let verifier = Verifier::from_location("petstore.json", VerifierOptions::default())?;
//!
//! let mut request = http::Request::builder()
//!     .method("PUT")
//!     .uri("/v2/user/testuser")
//!     .header("Content-Type", "application/json")
//!     .body(Body::from(r#"{"id": 123456}"#))?;
//!
//! verifier.verify_request(&mut request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod body;
mod config;
mod content_type;
mod decode;
mod document;
mod error;
mod expand;
mod loader;
mod mapper;
mod resolver;
mod schema;

pub use body::{Body, Request, Response};
pub use config::VerifierOptions;
pub use document::{
    Document, Operation, Parameter, ParameterLocation, PathItem, ResponseDef, Responses,
    SWAGGER_VERSION,
};
pub use error::{
    ContentTypeError, DecodeError, ExpandError, LoadError, SchemaViolations, ShapeMismatch,
    VerifierError, VerifierResult,
};
pub use mapper::{MappedRequest, RequestMapper};

pub use argus_router::Params;

use content_type::MimeScope;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use serde_json::Value;
use tracing::debug;

/// Verifies HTTP requests and responses against one Swagger 2.0 document.
///
/// The document, the route table and the options are fixed at construction;
/// the three verification entry points only mutate the request/response
/// handle they are given, so a single `Verifier` can serve concurrent
/// verifications of distinct pairs.
#[derive(Debug)]
pub struct Verifier {
    document: Document,
    mapper: RequestMapper,
    options: VerifierOptions,
}

impl Verifier {
    /// Loads the definition at `location` and builds a verifier over it.
    ///
    /// `location` is either a filesystem path or an http(s) URL; YAML and
    /// JSON documents are both accepted, and every `$ref` is expanded before
    /// the route table is built.
    pub fn from_location(location: &str, options: VerifierOptions) -> VerifierResult<Self> {
        let (bytes, base) = loader::fetch(location).map_err(VerifierError::LoadDefinition)?;
        let document =
            loader::build_document(location, &bytes, &base).map_err(VerifierError::BuildDocument)?;
        let mapper = RequestMapper::new(&document, options.ignore_base_path)?;

        Ok(Self {
            document,
            mapper,
            options,
        })
    }

    /// The expanded document this verifier checks against.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The options this verifier was built with.
    #[must_use]
    pub fn options(&self) -> VerifierOptions {
        self.options
    }

    /// Verifies a request against the definition.
    ///
    /// The request body is drained and restored as a replayable buffer, on
    /// failure paths too.
    pub fn verify_request(&self, request: &mut Request) -> VerifierResult<()> {
        let mapped = self
            .mapper
            .map(request.method(), request.uri().path())
            .ok_or(VerifierError::NoRouteMatch)?;
        debug!(template = %mapped.template, method = %request.method(), "request mapped");

        let path_item = resolver::path_item(&self.document, &mapped.template)?;
        let operation = resolver::operation(path_item, request.method())?;
        let parameter = resolver::body_parameter(operation, path_item);

        let body = request
            .body_mut()
            .drain()
            .map_err(VerifierError::ReadRequestBody)?;

        let Some(parameter) = parameter else {
            if body.is_empty() {
                return Ok(());
            }
            return Err(VerifierError::UndeclaredBody);
        };

        if parameter.required {
            check_schema_or_body(parameter.schema.as_ref(), body.len())
                .map_err(VerifierError::RequestBodyShape)?;
            if parameter.schema.is_none() || body.is_empty() {
                return Ok(());
            }
        }

        let consumes = resolver::effective_consumes(&self.document, operation);
        let content_type = content_type::negotiate(
            header_value(request.headers()),
            consumes,
            self.options.strict_content_type,
            MimeScope::Consumes,
        )?;

        let decoded =
            decode::decode_body(content_type, &body).map_err(VerifierError::DecodeRequest)?;

        match &parameter.schema {
            Some(schema) => {
                schema::validate(schema, &decoded).map_err(VerifierError::SchemaValidation)
            }
            None => Ok(()),
        }
    }

    /// Verifies a response against the definition, in the context of the
    /// request that produced it.
    ///
    /// The response body is drained and restored; the request is only
    /// consulted for its method and path.
    pub fn verify_response(&self, response: &mut Response, request: &Request) -> VerifierResult<()> {
        let mapped = self
            .mapper
            .map(request.method(), request.uri().path())
            .ok_or(VerifierError::NoRouteMatch)?;

        let path_item = resolver::path_item(&self.document, &mapped.template)?;
        let operation = resolver::operation(path_item, request.method())?;
        let definition = resolver::response_for_status(operation, response.status().as_u16())?;

        let body = response
            .body_mut()
            .drain()
            .map_err(VerifierError::ReadResponseBody)?;

        check_schema_or_body(definition.schema.as_ref(), body.len())
            .map_err(VerifierError::ResponseBodyShape)?;
        let Some(schema) = &definition.schema else {
            return Ok(());
        };

        let produces = resolver::effective_produces(&self.document, operation);
        let content_type = content_type::negotiate(
            header_value(response.headers()),
            produces,
            self.options.strict_content_type,
            MimeScope::Produces,
        )?;

        let decoded =
            decode::decode_body(content_type, &body).map_err(VerifierError::DecodeResponse)?;
        schema::validate(schema, &decoded).map_err(VerifierError::SchemaValidation)
    }

    /// Verifies a request/response pair.
    ///
    /// The request side runs first; a failure there is reported as
    /// inconsistent when the response status claims success (`< 400`). The
    /// response side runs regardless, and its verdict supersedes the request
    /// verdict when both fail.
    pub fn verify(&self, response: &mut Response, request: &mut Request) -> VerifierResult<()> {
        let mut report = Ok(());

        if let Err(err) = self.verify_request(request) {
            report = if response.status().as_u16() < 400 {
                Err(VerifierError::InconsistentVerdict(Box::new(err)))
            } else {
                Err(VerifierError::RequestFailed(Box::new(err)))
            };
        }

        if let Err(err) = self.verify_response(response, request) {
            report = Err(VerifierError::ResponseFailed(Box::new(err)));
        }

        report
    }
}

/// Builds a request-only verification callable over a freshly constructed
/// [`Verifier`].
pub fn new_request_verifier(
    location: &str,
    options: VerifierOptions,
) -> VerifierResult<impl Fn(&mut Request) -> VerifierResult<()>> {
    let verifier = Verifier::from_location(location, options)?;
    Ok(move |request: &mut Request| verifier.verify_request(request))
}

/// Builds a combined verification callable over a freshly constructed
/// [`Verifier`].
pub fn new_verifier(
    location: &str,
    options: VerifierOptions,
) -> VerifierResult<impl Fn(&mut Response, &mut Request) -> VerifierResult<()>> {
    let verifier = Verifier::from_location(location, options)?;
    Ok(move |response: &mut Response, request: &mut Request| verifier.verify(response, request))
}

/// The emptiness rule: a present body needs a schema, a declared schema
/// needs a body.
fn check_schema_or_body(schema: Option<&Value>, body_len: usize) -> Result<(), ShapeMismatch> {
    if schema.is_none() && body_len != 0 {
        return Err(ShapeMismatch::SchemaNotDefined);
    }
    if schema.is_some() && body_len == 0 {
        return Err(ShapeMismatch::BodyEmpty);
    }
    Ok(())
}

fn header_value(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
