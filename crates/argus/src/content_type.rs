//! Content-Type negotiation against declared media-type lists.

use crate::error::ContentTypeError;

/// Which declared list is being negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeScope {
    /// The request side (`consumes`).
    Consumes,
    /// The response side (`produces`).
    Produces,
}

/// Selects the declared media type satisfied by a Content-Type header.
///
/// Both sides are whitespace-trimmed. Strict mode demands a case-sensitive
/// exact match with some declared entry; relaxed mode accepts any declared
/// entry appearing inside the header value, so a parameterized header like
/// `application/json; charset=utf-8` still matches `application/json`.
/// Anything strict accepts, relaxed accepts too.
pub fn negotiate<'a>(
    header: &str,
    declared: &'a [String],
    strict: bool,
    scope: MimeScope,
) -> Result<&'a str, ContentTypeError> {
    if declared.is_empty() && strict {
        return Err(match scope {
            MimeScope::Consumes => ContentTypeError::EmptyConsumes,
            MimeScope::Produces => ContentTypeError::EmptyProduces,
        });
    }

    let header = header.trim();
    for entry in declared {
        let entry = entry.trim();
        let matched = if strict {
            header == entry
        } else {
            header.contains(entry)
        };
        if matched {
            return Ok(entry);
        }
    }

    Err(ContentTypeError::NotConfigured(header.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_strict_exact_match() {
        let list = declared(&["application/json"]);
        let selected = negotiate("application/json", &list, true, MimeScope::Consumes).unwrap();
        assert_eq!(selected, "application/json");
    }

    #[test]
    fn test_strict_rejects_parameterized_header() {
        let list = declared(&["application/json"]);
        let err = negotiate(
            "application/json; charset=utf-8",
            &list,
            true,
            MimeScope::Consumes,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContentTypeError::NotConfigured(header) if header == "application/json; charset=utf-8"
        ));
    }

    #[test]
    fn test_strict_is_case_sensitive() {
        let list = declared(&["application/json"]);
        assert!(negotiate("Application/JSON", &list, true, MimeScope::Consumes).is_err());
    }

    #[test]
    fn test_relaxed_accepts_parameterized_header() {
        let list = declared(&["application/json"]);
        let selected = negotiate(
            "application/json; charset=utf-8",
            &list,
            false,
            MimeScope::Consumes,
        )
        .unwrap();
        assert_eq!(selected, "application/json");
    }

    #[test]
    fn test_whitespace_trimmed_on_both_sides() {
        let list = declared(&["  application/json  "]);
        let selected = negotiate(" application/json ", &list, true, MimeScope::Produces).unwrap();
        assert_eq!(selected, "application/json");
    }

    #[test]
    fn test_empty_list_fails_in_strict_mode() {
        let err = negotiate("application/json", &[], true, MimeScope::Consumes).unwrap_err();
        assert_eq!(err, ContentTypeError::EmptyConsumes);

        let err = negotiate("application/json", &[], true, MimeScope::Produces).unwrap_err();
        assert_eq!(err, ContentTypeError::EmptyProduces);
    }

    #[test]
    fn test_empty_list_in_relaxed_mode_is_not_configured() {
        let err = negotiate("application/json", &[], false, MimeScope::Consumes).unwrap_err();
        assert!(matches!(err, ContentTypeError::NotConfigured(_)));
    }

    #[test]
    fn test_image_json_is_not_application_json() {
        let list = declared(&["application/json"]);
        let err = negotiate("image/json", &list, true, MimeScope::Produces).unwrap_err();
        assert!(matches!(
            err,
            ContentTypeError::NotConfigured(header) if header == "image/json"
        ));
    }

    #[test]
    fn test_strict_acceptance_implies_relaxed_acceptance() {
        let list = declared(&["application/json", "text/json"]);
        for header in ["application/json", "text/json"] {
            assert!(negotiate(header, &list, true, MimeScope::Consumes).is_ok());
            assert!(negotiate(header, &list, false, MimeScope::Consumes).is_ok());
        }
    }

    #[test]
    fn test_second_declared_entry_can_match() {
        let list = declared(&["application/xml", "application/json"]);
        let selected = negotiate("application/json", &list, true, MimeScope::Consumes).unwrap();
        assert_eq!(selected, "application/json");
    }
}
