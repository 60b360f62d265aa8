//! Request-to-template mapping.
//!
//! The mapper turns a live method + URL path into the path template exactly
//! as it is declared in the document. Routes live under the document's base
//! path unless the verifier was told to ignore it, so URLs outside the
//! prefix simply do not match.

use argus_router::{Params, Router};
use http::Method;
use tracing::debug;

use crate::document::Document;
use crate::error::VerifierError;

/// A successfully mapped request.
#[derive(Debug, Clone)]
pub struct MappedRequest {
    /// The template exactly as declared in the document, base path stripped.
    pub template: String,
    /// Values captured by `{name}` segments.
    pub params: Params,
}

/// Immutable route table resolving live request URLs to declared templates.
#[derive(Debug)]
pub struct RequestMapper {
    router: Router,
}

impl RequestMapper {
    /// Builds the mapper from every `(method, template)` pair in the
    /// document.
    ///
    /// Each route is registered at `basePath + template` with the declared
    /// template as its payload, which is what a match reports back.
    pub fn new(document: &Document, ignore_base_path: bool) -> Result<Self, VerifierError> {
        let base_path = if ignore_base_path {
            ""
        } else {
            document.base_path.trim_end_matches('/')
        };

        let mut router = Router::new();
        for (template, path_item) in &document.paths {
            let mounted = format!("{base_path}{template}");
            for (method, _) in path_item.operations() {
                router
                    .at(&method, &mounted, template.as_str())
                    .map_err(VerifierError::BuildMapper)?;
            }
        }

        debug!(routes = router.len(), base_path, "request mapper initialized");
        Ok(Self { router })
    }

    /// Resolves a method and URL path to the declared template that matches.
    #[must_use]
    pub fn map(&self, method: &Method, path: &str) -> Option<MappedRequest> {
        self.router
            .match_route(method, path)
            .map(|matched| MappedRequest {
                template: matched.value.to_string(),
                params: matched.params,
            })
    }
}
