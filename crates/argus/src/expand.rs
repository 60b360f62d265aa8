//! `$ref` expansion for loaded documents.
//!
//! Internal references (`#/definitions/...`) resolve against the document
//! they appear in; relative references load the sibling document against the
//! current document's base (cached per location) and resolve within it
//! against that document's own base. Expansion replaces every reference
//! inline. A reference cycle is an error rather than a partially expanded
//! model.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::ExpandError;
use crate::loader::{self, DocumentBase};

/// Expands every `$ref` in `root`, yielding a reference-free document.
pub(crate) fn expand_document(root: Value, base: &DocumentBase) -> Result<Value, ExpandError> {
    let doc = Rc::new(Doc {
        root: root.clone(),
        base: base.clone(),
        key: base.key(),
    });
    let mut expander = Expander {
        docs: HashMap::from([(doc.key.clone(), Rc::clone(&doc))]),
    };
    let mut stack = Vec::new();
    expander.expand(&root, &doc, &mut stack)
}

/// A loaded document: lookup target for pointers plus its own base.
struct Doc {
    root: Value,
    base: DocumentBase,
    key: String,
}

struct Expander {
    /// Raw documents by location key.
    docs: HashMap<String, Rc<Doc>>,
}

impl Expander {
    fn expand(
        &mut self,
        value: &Value,
        doc: &Rc<Doc>,
        stack: &mut Vec<String>,
    ) -> Result<Value, ExpandError> {
        match value {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref") {
                    // JSON Reference semantics: siblings of $ref are ignored.
                    let reference = reference.as_str().ok_or(ExpandError::NonStringRef)?;
                    return self.expand_ref(reference, doc, stack);
                }
                let mut expanded = Map::with_capacity(map.len());
                for (key, child) in map {
                    expanded.insert(key.clone(), self.expand(child, doc, stack)?);
                }
                Ok(Value::Object(expanded))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.expand(item, doc, stack))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn expand_ref(
        &mut self,
        reference: &str,
        doc: &Rc<Doc>,
        stack: &mut Vec<String>,
    ) -> Result<Value, ExpandError> {
        let (location, pointer) = match reference.split_once('#') {
            Some((location, pointer)) => (location, pointer),
            None => (reference, ""),
        };

        let target_doc = if location.is_empty() {
            Rc::clone(doc)
        } else {
            self.load(location, doc)?
        };

        let target = if pointer.is_empty() {
            target_doc.root.clone()
        } else {
            target_doc
                .root
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| ExpandError::UnresolvedPointer(reference.to_string()))?
        };

        let guard = format!("{}#{pointer}", target_doc.key);
        if stack.contains(&guard) {
            return Err(ExpandError::CircularReference(reference.to_string()));
        }
        stack.push(guard);
        let expanded = self.expand(&target, &target_doc, stack);
        stack.pop();
        expanded
    }

    fn load(&mut self, location: &str, from: &Doc) -> Result<Rc<Doc>, ExpandError> {
        let base = from.base.join(location)?;
        let key = base.key();
        if let Some(doc) = self.docs.get(&key) {
            return Ok(Rc::clone(doc));
        }

        let bytes = base.read().map_err(|source| ExpandError::External {
            location: key.clone(),
            source: Box::new(source),
        })?;
        let root = loader::parse_bytes(location, &bytes).map_err(|source| ExpandError::External {
            location: key.clone(),
            source: Box::new(source),
        })?;

        let doc = Rc::new(Doc {
            root,
            base,
            key: key.clone(),
        });
        self.docs.insert(key, Rc::clone(&doc));
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use std::path::PathBuf;

    fn base() -> DocumentBase {
        DocumentBase::File(PathBuf::from("definition.json"))
    }

    #[test]
    fn test_internal_ref_expanded() {
        let root = json!({
            "paths": {
                "/user": {
                    "put": {
                        "parameters": [{"in": "body", "schema": {"$ref": "#/definitions/User"}}]
                    }
                }
            },
            "definitions": {
                "User": {"type": "object", "required": ["id"]}
            }
        });

        let expanded = expand_document(root, &base()).unwrap();
        assert_eq!(
            expanded["paths"]["/user"]["put"]["parameters"][0]["schema"],
            json!({"type": "object", "required": ["id"]})
        );
    }

    #[test]
    fn test_nested_refs_expanded() {
        let root = json!({
            "a": {"$ref": "#/definitions/Outer"},
            "definitions": {
                "Outer": {
                    "type": "object",
                    "properties": {"inner": {"$ref": "#/definitions/Inner"}}
                },
                "Inner": {"type": "string"}
            }
        });

        let expanded = expand_document(root, &base()).unwrap();
        assert_eq!(expanded["a"]["properties"]["inner"], json!({"type": "string"}));
        // The definitions section itself is expanded too.
        assert_eq!(
            expanded["definitions"]["Outer"]["properties"]["inner"],
            json!({"type": "string"})
        );
    }

    #[test]
    fn test_ref_siblings_are_ignored() {
        let root = json!({
            "a": {"$ref": "#/definitions/Inner", "description": "dropped"},
            "definitions": {"Inner": {"type": "string"}}
        });

        let expanded = expand_document(root, &base()).unwrap();
        assert_eq!(expanded["a"], json!({"type": "string"}));
    }

    #[test]
    fn test_unresolved_pointer() {
        let root = json!({"a": {"$ref": "#/definitions/Missing"}, "definitions": {}});
        let err = expand_document(root, &base()).unwrap_err();
        assert!(matches!(
            err,
            ExpandError::UnresolvedPointer(reference) if reference == "#/definitions/Missing"
        ));
    }

    #[test]
    fn test_circular_reference() {
        let root = json!({
            "a": {"$ref": "#/definitions/A"},
            "definitions": {
                "A": {"properties": {"b": {"$ref": "#/definitions/B"}}},
                "B": {"properties": {"a": {"$ref": "#/definitions/A"}}}
            }
        });

        let err = expand_document(root, &base()).unwrap_err();
        assert!(matches!(err, ExpandError::CircularReference(_)));
    }

    #[test]
    fn test_non_string_ref() {
        let root = json!({"a": {"$ref": 42}});
        let err = expand_document(root, &base()).unwrap_err();
        assert!(matches!(err, ExpandError::NonStringRef));
    }

    #[test]
    fn test_external_file_ref() {
        let dir = tempfile::tempdir().unwrap();

        let models = dir.path().join("models.json");
        let mut file = std::fs::File::create(&models).unwrap();
        file.write_all(
            json!({
                "definitions": {
                    "User": {
                        "type": "object",
                        "properties": {"pet": {"$ref": "#/definitions/Pet"}}
                    },
                    "Pet": {"type": "object"}
                }
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        let root = json!({"a": {"$ref": "models.json#/definitions/User"}});
        let base = DocumentBase::File(dir.path().join("api.json"));

        let expanded = expand_document(root, &base).unwrap();
        // The external schema's own internal ref resolves against models.json.
        assert_eq!(expanded["a"]["properties"]["pet"], json!({"type": "object"}));
    }

    #[test]
    fn test_external_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let root = json!({"a": {"$ref": "absent.json#/definitions/User"}});
        let base = DocumentBase::File(dir.path().join("api.json"));

        let err = expand_document(root, &base).unwrap_err();
        assert!(matches!(err, ExpandError::External { .. }));
    }
}
