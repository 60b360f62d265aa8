//! Error types for the verification engine.
//!
//! Every failure carries its cause both ways: embedded in the rendered
//! message (so a single `Display` pass shows the whole chain, outermost
//! first) and through `std::error::Error::source` for callers that walk the
//! chain programmatically.

use std::fmt;
use std::io;

use thiserror::Error;

/// Result alias using [`VerifierError`].
pub type VerifierResult<T> = Result<T, VerifierError>;

/// Errors raised while constructing a verifier or verifying traffic.
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The definition could not be fetched from its location.
    #[error("failed to load definition: {0}")]
    LoadDefinition(#[source] LoadError),

    /// The fetched definition could not be parsed, versioned, or expanded.
    #[error("failed to build Document: {0}")]
    BuildDocument(#[source] LoadError),

    /// The route table could not be built from the document's templates.
    #[error("failed to create request mapper: {0}")]
    BuildMapper(#[source] argus_router::InsertError),

    /// The request URL and method match no declared template.
    #[error("no path template matches current request")]
    NoRouteMatch,

    /// A mapped template has no path item in the document.
    #[error("no path item definition found for path template: {0}")]
    NoPathItem(String),

    /// The matched path item declares no operation for the request method.
    #[error("no operation configured for method: {0}")]
    NoOperation(String),

    /// No status-specific response and no `default` response is declared.
    #[error("neither default nor response schema for current status code is defined")]
    NoResponseDefinition,

    /// Request body emptiness and the declared schema disagree.
    #[error("either defined schema or request body is empty: {0}")]
    RequestBodyShape(#[source] ShapeMismatch),

    /// Response body emptiness and the declared schema disagree.
    #[error("either defined schema or response body is empty: {0}")]
    ResponseBodyShape(#[source] ShapeMismatch),

    /// The matched operation declares no body parameter, yet the request
    /// carried a payload.
    #[error("definition is not defined but body is not empty")]
    UndeclaredBody,

    /// Content-Type negotiation failed.
    #[error(transparent)]
    ContentType(#[from] ContentTypeError),

    /// The request body could not be drained.
    #[error("error reading request body: {0}")]
    ReadRequestBody(#[source] io::Error),

    /// The response body could not be drained.
    #[error("error reading response body: {0}")]
    ReadResponseBody(#[source] io::Error),

    /// The request body failed to decode as the negotiated media type.
    #[error("failed to decode request: {0}")]
    DecodeRequest(#[source] DecodeError),

    /// The response body failed to decode as the negotiated media type.
    #[error("failed to decode response: {0}")]
    DecodeResponse(#[source] DecodeError),

    /// The decoded body violates the declared schema.
    #[error(transparent)]
    SchemaValidation(#[from] SchemaViolations),

    /// Combined verdict: the request side failed while the response carried
    /// an error status.
    #[error("request validation failed: {0}")]
    RequestFailed(#[source] Box<VerifierError>),

    /// Combined verdict: the request side failed while the response claimed
    /// success.
    #[error("request validation failed but response status code is ok: {0}")]
    InconsistentVerdict(#[source] Box<VerifierError>),

    /// Combined verdict: the response side failed.
    #[error("response validation failed: {0}")]
    ResponseFailed(#[source] Box<VerifierError>),
}

/// Failures while fetching or building a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The definition file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Filesystem location of the definition.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The definition URL could not be fetched.
    #[error("failed to fetch {url}: {source}")]
    Http {
        /// The definition URL.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The definition URL answered with a non-2xx status.
    #[error("fetching {url} returned status {status}")]
    HttpStatus {
        /// The definition URL.
        url: String,
        /// The offending status code.
        status: u16,
    },

    /// The definition bytes are not valid YAML.
    #[error("failed to parse yaml document: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// The definition bytes are not valid JSON.
    #[error("failed to parse json document: {0}")]
    Json(#[source] serde_json::Error),

    /// The document does not declare Swagger 2.0.
    #[error("unsupported swagger version '{0}'")]
    UnsupportedVersion(String),

    /// A `$ref` could not be expanded.
    #[error("failed to expand document references: {0}")]
    Expand(#[source] ExpandError),

    /// The expanded document does not fit the Swagger 2.0 model.
    #[error("document does not fit the swagger 2.0 model: {0}")]
    Model(#[source] serde_json::Error),
}

/// Failures while expanding `$ref` inclusions.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// A `$ref` value is not a string.
    #[error("$ref must be a string")]
    NonStringRef,

    /// A reference points at nothing.
    #[error("reference '{0}' does not resolve to any value")]
    UnresolvedPointer(String),

    /// A reference chain loops back on itself.
    #[error("circular reference detected at '{0}'")]
    CircularReference(String),

    /// A referenced sibling document could not be loaded.
    #[error("cannot load referenced document '{location}': {source}")]
    External {
        /// Resolved location of the referenced document.
        location: String,
        /// Why loading it failed.
        #[source]
        source: Box<LoadError>,
    },

    /// A relative reference cannot be joined against the document base.
    #[error("cannot join reference '{reference}' against the document base")]
    InvalidReference {
        /// The offending reference.
        reference: String,
    },
}

/// The two legal outcomes of the body/schema emptiness rule being violated.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// The body carries content but the definition has no schema for it.
    #[error("schema is not defined")]
    SchemaNotDefined,

    /// The definition declares a schema but the body is empty.
    #[error("body is empty")]
    BodyEmpty,
}

/// Content-Type negotiation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentTypeError {
    /// Strict matching with no declared request media types.
    #[error("consumes is empty")]
    EmptyConsumes,

    /// Strict matching with no declared response media types.
    #[error("produces is empty")]
    EmptyProduces,

    /// The header satisfies none of the declared media types.
    #[error("Content-Type is not configured: {0}")]
    NotConfigured(String),
}

/// Body decoding failures.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("failed to decode json: {0}")]
    Json(#[source] serde_json::Error),

    /// No decoder is registered for the media type.
    #[error("no decoder for content-type: {0}")]
    NoDecoder(String),
}

/// Structured schema-validation failure returned by the validation adapter.
///
/// Rendered as a `validation failure list:` followed by one line per
/// violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolations {
    /// One rendered entry per violated constraint.
    pub errors: Vec<String>,
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failure list:")?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolations {}
