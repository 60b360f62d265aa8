//! Radix tree path router for matching request URLs against declared
//! path templates.
//!
//! Templates are URL patterns that may contain `{name}` segments, each of
//! which matches any single non-slash run. Matching is segment-wise with
//! trailing slashes normalized away, and literal segments always win over
//! `{name}` segments, so `/user/login` is preferred to `/user/{username}`
//! for the path `/user/login`.
//!
//! Every route carries a payload string per HTTP method; a match hands the
//! payload back together with the values captured by `{name}` segments.
//!
//! # Example
//!
//! ```rust
//! use argus_router::{MethodMap, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.insert(
//!     "/user/{username}",
//!     MethodMap::new().get("/user/{username}").put("/user/{username}"),
//! ).unwrap();
//!
//! let matched = router.match_route(&Method::PUT, "/user/testuser").unwrap();
//! assert_eq!(matched.value, "/user/{username}");
//! assert_eq!(matched.params.get("username"), Some("testuser"));
//! ```

mod method_map;
mod node;
mod params;
mod router;

pub use method_map::MethodMap;
pub use node::InsertError;
pub use params::Params;
pub use router::Router;

/// A matched route: the payload registered for the method, plus the values
/// captured by `{name}` segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Payload registered for the matched method.
    pub value: &'a str,
    /// Captured path variables.
    pub params: Params,
}
