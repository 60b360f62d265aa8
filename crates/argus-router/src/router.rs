//! High-level router API.
//!
//! This module provides the main [`Router`] struct which is the primary
//! interface for registering path templates and matching request paths.

use http::Method;

use crate::method_map::MethodMap;
use crate::node::{InsertError, Node};
use crate::params::Params;
use crate::RouteMatch;

/// A radix tree router over `{name}` path templates.
///
/// # Example
///
/// ```rust
/// use argus_router::{MethodMap, Router};
/// use http::Method;
///
/// let mut router = Router::new();
/// router.insert("/user/{username}", MethodMap::new().put("/user/{username}")).unwrap();
///
/// let matched = router.match_route(&Method::PUT, "/user/testuser").unwrap();
/// assert_eq!(matched.value, "/user/{username}");
/// assert_eq!(matched.params.get("username"), Some("testuser"));
/// ```
///
/// # Route priority
///
/// When a path could satisfy several templates, literal segments beat
/// `{name}` segments at every position, so `/user/login` wins over
/// `/user/{username}` for the path `/user/login`.
#[derive(Debug, Clone)]
pub struct Router {
    root: Node,
    route_count: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Registers a route.
    ///
    /// Method tables registered for the same template are merged; already
    /// registered methods win.
    ///
    /// # Errors
    ///
    /// Fails on a malformed `{name}` segment, or when the template declares a
    /// variable name that conflicts with an already registered template at
    /// the same position. A failed insert leaves the router untouched.
    pub fn insert(&mut self, path: &str, methods: MethodMap) -> Result<(), InsertError> {
        self.root.check_conflicts(path)?;
        self.root.insert(path, methods)?;
        self.route_count += 1;
        Ok(())
    }

    /// Convenience method to register a single-method route.
    ///
    /// # Errors
    ///
    /// Same failure conditions as [`insert`](Self::insert).
    pub fn at(
        &mut self,
        method: &Method,
        path: &str,
        payload: impl Into<String>,
    ) -> Result<(), InsertError> {
        self.insert(path, MethodMap::new().method(method, payload))
    }

    /// Matches a method and path against the router.
    #[must_use]
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let (methods, params) = self.root.match_path(path)?;
        let value = methods.value_for(method)?;
        Some(RouteMatch { value, params })
    }

    /// Matches a path alone, regardless of method.
    ///
    /// Useful for distinguishing unknown paths from known paths with an
    /// unsupported method.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&MethodMap, Params)> {
        self.root.match_path(path)
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
