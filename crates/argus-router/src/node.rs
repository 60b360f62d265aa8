//! Radix tree node implementation.
//!
//! Each node represents one path segment. Static children are kept sorted for
//! binary search; a node holds at most one `{name}` parameter child. Empty
//! segments are filtered on both insertion and matching, which normalizes
//! trailing slashes away.

use crate::method_map::MethodMap;
use crate::params::Params;
use std::fmt;

/// Kind of path segment in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SegmentKind {
    /// Literal segment (e.g. "user", "store").
    Static,
    /// Named template variable (e.g. "{username}").
    Param(String),
}

/// Error raised while registering a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A segment contains `{` or `}` but is not a well-formed `{name}`.
    MalformedSegment {
        /// The offending segment text.
        segment: String,
    },
    /// Two templates declare different variable names at the same position.
    ParamNameConflict {
        /// Variable name already registered at this position.
        existing: String,
        /// Conflicting variable name from the new template.
        conflicting: String,
    },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSegment { segment } => {
                write!(f, "malformed template segment '{segment}'")
            }
            Self::ParamNameConflict {
                existing,
                conflicting,
            } => write!(
                f,
                "conflicting path variables '{{{existing}}}' and '{{{conflicting}}}' at the same position"
            ),
        }
    }
}

impl std::error::Error for InsertError {}

/// A node in the radix tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// The path segment this node represents.
    segment: String,
    /// The kind of segment.
    kind: SegmentKind,
    /// Method table, present when this node terminates a route.
    methods: Option<MethodMap>,
    /// Static children, sorted by segment for binary search.
    static_children: Vec<Node>,
    /// Parameter child (at most one per node).
    param_child: Option<Box<Node>>,
}

impl Node {
    fn new_static(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            kind: SegmentKind::Static,
            methods: None,
            static_children: Vec::new(),
            param_child: None,
        }
    }

    fn new_param(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            segment: format!("{{{name}}}"),
            kind: SegmentKind::Param(name),
            methods: None,
            static_children: Vec::new(),
            param_child: None,
        }
    }

    /// Creates the root node of a tree.
    pub(crate) fn root() -> Self {
        Self::new_static("")
    }

    /// Registers a route in the tree.
    pub(crate) fn insert(&mut self, path: &str, methods: MethodMap) -> Result<(), InsertError> {
        let segments = Self::parse_path(path)?;
        self.insert_segments(&segments, methods);
        Ok(())
    }

    fn parse_path(path: &str) -> Result<Vec<(String, SegmentKind)>, InsertError> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    if name.is_empty() || name.contains(['{', '}']) {
                        Err(InsertError::MalformedSegment {
                            segment: s.to_string(),
                        })
                    } else {
                        Ok((s.to_string(), SegmentKind::Param(name.to_string())))
                    }
                } else if s.contains(['{', '}']) {
                    Err(InsertError::MalformedSegment {
                        segment: s.to_string(),
                    })
                } else {
                    Ok((s.to_string(), SegmentKind::Static))
                }
            })
            .collect()
    }

    fn insert_segments(&mut self, segments: &[(String, SegmentKind)], methods: MethodMap) {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            if let Some(existing) = &mut self.methods {
                existing.merge(methods);
            } else {
                self.methods = Some(methods);
            }
            return;
        };

        match kind {
            SegmentKind::Static => {
                match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(i) => self.static_children[i].insert_segments(remaining, methods),
                    Err(i) => {
                        let mut child = Node::new_static(segment);
                        child.insert_segments(remaining, methods);
                        self.static_children.insert(i, child);
                    }
                }
            }
            SegmentKind::Param(name) => {
                let child = self
                    .param_child
                    .get_or_insert_with(|| Box::new(Node::new_param(name.clone())));
                child.insert_segments(remaining, methods);
            }
        }
    }

    /// Reports a variable-name conflict for an incoming template, if any.
    ///
    /// Called before [`insert`](Self::insert) commits anything so a failed
    /// registration leaves the tree untouched.
    pub(crate) fn check_conflicts(&self, path: &str) -> Result<(), InsertError> {
        let segments = Self::parse_path(path)?;
        let mut node = self;
        for (segment, kind) in &segments {
            match kind {
                SegmentKind::Static => {
                    match node
                        .static_children
                        .binary_search_by(|c| c.segment.as_str().cmp(segment))
                    {
                        Ok(i) => node = &node.static_children[i],
                        Err(_) => return Ok(()),
                    }
                }
                SegmentKind::Param(name) => {
                    let Some(child) = &node.param_child else {
                        return Ok(());
                    };
                    if let SegmentKind::Param(existing) = &child.kind {
                        if existing != name {
                            return Err(InsertError::ParamNameConflict {
                                existing: existing.clone(),
                                conflicting: name.clone(),
                            });
                        }
                    }
                    node = child.as_ref();
                }
            }
        }
        Ok(())
    }

    /// Matches a path against the tree.
    pub(crate) fn match_path(&self, path: &str) -> Option<(&MethodMap, Params)> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        self.match_segments(&segments, &mut params)
            .map(|methods| (methods, params))
    }

    fn match_segments<'a>(&'a self, segments: &[&str], params: &mut Params) -> Option<&'a MethodMap> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.methods.as_ref();
        };

        // Literal segments win over template variables at every position.
        if let Some(child) = self.find_static_child(segment) {
            let mark = params.len();
            if let Some(found) = child.match_segments(remaining, params) {
                return Some(found);
            }
            params.truncate(mark);
        }

        if let Some(child) = &self.param_child {
            if let SegmentKind::Param(name) = &child.kind {
                let mark = params.len();
                params.push(name.clone(), (*segment).to_string());
                if let Some(found) = child.match_segments(remaining, params) {
                    return Some(found);
                }
                params.truncate(mark);
            }
        }

        None
    }

    fn find_static_child(&self, segment: &str) -> Option<&Node> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}
