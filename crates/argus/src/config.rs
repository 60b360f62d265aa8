//! Verifier configuration.

/// Options applied when a verifier is constructed.
///
/// The option set is closed: it is a plain struct, so an unrecognized option
/// is unrepresentable rather than a runtime failure. Options are read-only
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierOptions {
    /// Demand an exact, case-sensitive Content-Type match against the
    /// declared media types. On by default.
    pub strict_content_type: bool,
    /// Build the route table without the document's base path, so requests
    /// match regardless of prefix. Off by default.
    pub ignore_base_path: bool,
}

impl Default for VerifierOptions {
    fn default() -> Self {
        Self {
            strict_content_type: true,
            ignore_base_path: false,
        }
    }
}

impl VerifierOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Content-Type matching policy.
    #[must_use]
    pub fn strict_content_type(mut self, strict: bool) -> Self {
        self.strict_content_type = strict;
        self
    }

    /// Sets whether the base path is ignored while mapping requests.
    #[must_use]
    pub fn ignore_base_path(mut self, ignore: bool) -> Self {
        self.ignore_base_path = ignore;
        self
    }
}
