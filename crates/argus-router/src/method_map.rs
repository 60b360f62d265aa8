//! Per-path method table.
//!
//! This module provides [`MethodMap`], which associates the HTTP methods a
//! Swagger 2.0 path item can declare (GET, PUT, POST, DELETE, OPTIONS, HEAD,
//! PATCH) with a payload string for a single route.

use http::Method;

/// Maps the seven Swagger 2.0 methods to a payload for a single route.
///
/// The payload is whatever string the caller wants back from a match; the
/// verification engine stores the declared path template.
///
/// # Example
///
/// ```rust
/// use argus_router::MethodMap;
/// use http::Method;
///
/// let map = MethodMap::new()
///     .get("/user/{username}")
///     .put("/user/{username}");
///
/// assert_eq!(map.value_for(&Method::GET), Some("/user/{username}"));
/// assert_eq!(map.value_for(&Method::DELETE), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MethodMap {
    get: Option<String>,
    put: Option<String>,
    post: Option<String>,
    delete: Option<String>,
    options: Option<String>,
    head: Option<String>,
    patch: Option<String>,
}

impl MethodMap {
    /// Creates a new empty method map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload for GET.
    #[must_use]
    pub fn get(mut self, payload: impl Into<String>) -> Self {
        self.get = Some(payload.into());
        self
    }

    /// Registers a payload for PUT.
    #[must_use]
    pub fn put(mut self, payload: impl Into<String>) -> Self {
        self.put = Some(payload.into());
        self
    }

    /// Registers a payload for POST.
    #[must_use]
    pub fn post(mut self, payload: impl Into<String>) -> Self {
        self.post = Some(payload.into());
        self
    }

    /// Registers a payload for DELETE.
    #[must_use]
    pub fn delete(mut self, payload: impl Into<String>) -> Self {
        self.delete = Some(payload.into());
        self
    }

    /// Registers a payload for OPTIONS.
    #[must_use]
    pub fn options(mut self, payload: impl Into<String>) -> Self {
        self.options = Some(payload.into());
        self
    }

    /// Registers a payload for HEAD.
    #[must_use]
    pub fn head(mut self, payload: impl Into<String>) -> Self {
        self.head = Some(payload.into());
        self
    }

    /// Registers a payload for PATCH.
    #[must_use]
    pub fn patch(mut self, payload: impl Into<String>) -> Self {
        self.patch = Some(payload.into());
        self
    }

    /// Registers a payload for a specific method.
    ///
    /// Methods outside the Swagger 2.0 set are ignored.
    #[must_use]
    pub fn method(mut self, method: &Method, payload: impl Into<String>) -> Self {
        let payload = payload.into();
        match *method {
            Method::GET => self.get = Some(payload),
            Method::PUT => self.put = Some(payload),
            Method::POST => self.post = Some(payload),
            Method::DELETE => self.delete = Some(payload),
            Method::OPTIONS => self.options = Some(payload),
            Method::HEAD => self.head = Some(payload),
            Method::PATCH => self.patch = Some(payload),
            _ => {}
        }
        self
    }

    /// Returns the payload registered for a method.
    #[must_use]
    pub fn value_for(&self, method: &Method) -> Option<&str> {
        match *method {
            Method::GET => self.get.as_deref(),
            Method::PUT => self.put.as_deref(),
            Method::POST => self.post.as_deref(),
            Method::DELETE => self.delete.as_deref(),
            Method::OPTIONS => self.options.as_deref(),
            Method::HEAD => self.head.as_deref(),
            Method::PATCH => self.patch.as_deref(),
            _ => None,
        }
    }

    /// Merges another method map into this one.
    ///
    /// A method already set in this map is NOT overwritten.
    pub fn merge(&mut self, other: MethodMap) {
        if self.get.is_none() {
            self.get = other.get;
        }
        if self.put.is_none() {
            self.put = other.put;
        }
        if self.post.is_none() {
            self.post = other.post;
        }
        if self.delete.is_none() {
            self.delete = other.delete;
        }
        if self.options.is_none() {
            self.options = other.options;
        }
        if self.head.is_none() {
            self.head = other.head;
        }
        if self.patch.is_none() {
            self.patch = other.patch;
        }
    }

    /// Returns true if any method is registered.
    #[must_use]
    pub fn has_any_method(&self) -> bool {
        self.get.is_some()
            || self.put.is_some()
            || self.post.is_some()
            || self.delete.is_some()
            || self.options.is_some()
            || self.head.is_some()
            || self.patch.is_some()
    }

    /// Returns the methods registered on this route.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<Method> {
        let mut methods = Vec::with_capacity(7);
        if self.get.is_some() {
            methods.push(Method::GET);
        }
        if self.put.is_some() {
            methods.push(Method::PUT);
        }
        if self.post.is_some() {
            methods.push(Method::POST);
        }
        if self.delete.is_some() {
            methods.push(Method::DELETE);
        }
        if self.options.is_some() {
            methods.push(Method::OPTIONS);
        }
        if self.head.is_some() {
            methods.push(Method::HEAD);
        }
        if self.patch.is_some() {
            methods.push(Method::PATCH);
        }
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_map_new() {
        let map = MethodMap::new();
        assert!(!map.has_any_method());
    }

    #[test]
    fn test_method_map_builders() {
        let map = MethodMap::new()
            .get("g")
            .put("pu")
            .post("po")
            .delete("d")
            .options("o")
            .head("h")
            .patch("pa");

        assert_eq!(map.value_for(&Method::GET), Some("g"));
        assert_eq!(map.value_for(&Method::PUT), Some("pu"));
        assert_eq!(map.value_for(&Method::POST), Some("po"));
        assert_eq!(map.value_for(&Method::DELETE), Some("d"));
        assert_eq!(map.value_for(&Method::OPTIONS), Some("o"));
        assert_eq!(map.value_for(&Method::HEAD), Some("h"));
        assert_eq!(map.value_for(&Method::PATCH), Some("pa"));
    }

    #[test]
    fn test_method_map_generic_setter() {
        let map = MethodMap::new().method(&Method::PATCH, "/pets/{petId}");
        assert_eq!(map.value_for(&Method::PATCH), Some("/pets/{petId}"));
    }

    #[test]
    fn test_method_map_ignores_unknown_methods() {
        let map = MethodMap::new().method(&Method::TRACE, "payload");
        assert!(!map.has_any_method());
        assert_eq!(map.value_for(&Method::TRACE), None);
    }

    #[test]
    fn test_method_map_merge_adds_without_overwriting() {
        let mut map = MethodMap::new().get("original");
        map.merge(MethodMap::new().get("replacement").post("created"));

        assert_eq!(map.value_for(&Method::GET), Some("original"));
        assert_eq!(map.value_for(&Method::POST), Some("created"));
    }

    #[test]
    fn test_method_map_allowed_methods() {
        let map = MethodMap::new().get("g").patch("p");

        let allowed = map.allowed_methods();
        assert!(allowed.contains(&Method::GET));
        assert!(allowed.contains(&Method::PATCH));
        assert!(!allowed.contains(&Method::POST));
    }
}
