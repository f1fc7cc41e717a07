//! Position references for easier record selection
//!
//! `list` numbers the visible records `@1`, `@2`, ... These numbers are not
//! persisted: they always refer to the view they were printed from, and are
//! translated to identifiers before anything is changed.

use thiserror::Error;

use crate::core::filter::View;
use crate::core::identity::RecordId;
use crate::core::record::Record;

/// A parsed user reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// Zero-based position in the current view
    Position(usize),
    /// Full or partial record ID
    Id(String),
}

impl Reference {
    /// Parse a reference
    ///
    /// Accepts:
    /// - `@N` format (e.g., `@1`, `@42`)
    /// - Plain number (e.g., `1`, `42`)
    /// - Full or partial record ID (passed through)
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        let reference = reference.trim();
        let num_str = if let Some(rest) = reference.strip_prefix('@') {
            rest
        } else if !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit()) {
            reference
        } else if reference.is_empty() {
            return Err(ReferenceError::Empty);
        } else {
            return Ok(Reference::Id(reference.to_string()));
        };

        match num_str.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Reference::Position(n - 1)),
            _ => Err(ReferenceError::InvalidPosition(reference.to_string())),
        }
    }
}

/// Format a zero-based view position for display
pub fn format_position(pos: usize) -> String {
    format!("@{}", pos + 1)
}

/// Resolve one reference against a view
pub fn resolve<T: Record>(view: &View<'_, T>, reference: &str) -> Result<RecordId, ReferenceError> {
    match Reference::parse(reference)? {
        Reference::Position(pos) => view.id_at(pos).cloned().ok_or(ReferenceError::NoSuchPosition {
            position: pos + 1,
            len: view.len(),
        }),
        Reference::Id(partial) => {
            let needle = partial.to_uppercase();
            let matches: Vec<&RecordId> = view
                .records()
                .map(Record::id)
                .filter(|id| {
                    let full = id.to_string();
                    full == needle || full.starts_with(&needle) || id.ulid().to_string().starts_with(&needle)
                })
                .collect();

            match matches.as_slice() {
                [] => Err(ReferenceError::NoMatch(partial)),
                [only] => Ok((*only).clone()),
                many => Err(ReferenceError::Ambiguous {
                    reference: partial,
                    count: many.len(),
                }),
            }
        }
    }
}

/// Resolve several references, keeping their order and dropping repeats
pub fn resolve_all<T: Record>(
    view: &View<'_, T>,
    references: &[String],
) -> Result<Vec<RecordId>, ReferenceError> {
    let mut ids: Vec<RecordId> = Vec::with_capacity(references.len());
    for reference in references {
        let id = resolve(view, reference)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Errors that can occur when resolving a reference
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("empty reference")]
    Empty,

    #[error("invalid position '{0}' (positions start at @1)")]
    InvalidPosition(String),

    #[error("no record at @{position} (list has {len})")]
    NoSuchPosition { position: usize, len: usize },

    #[error("no record matches '{0}'")]
    NoMatch(String),

    #[error("'{reference}' matches {count} records, use more of the ID")]
    Ambiguous { reference: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter;
    use crate::entities::ShoppingItem;

    fn items() -> Vec<ShoppingItem> {
        vec![
            ShoppingItem::new("floss"),
            ShoppingItem::new("hoop"),
            ShoppingItem::new("floss"),
        ]
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(Reference::parse("@1").unwrap(), Reference::Position(0));
        assert_eq!(Reference::parse("42").unwrap(), Reference::Position(41));
        assert!(Reference::parse("@0").is_err());
        assert!(Reference::parse("@x").is_err());
        assert_eq!(Reference::parse("").unwrap_err(), ReferenceError::Empty);
    }

    #[test]
    fn test_parse_passthrough() {
        assert_eq!(
            Reference::parse("SHOP-01J").unwrap(),
            Reference::Id("SHOP-01J".to_string())
        );
    }

    #[test]
    fn test_resolve_position_in_filtered_view() {
        let records = items();
        let view = filter(&records, "floss");

        let id = resolve(&view, "@2").unwrap();
        assert_eq!(id, records[2].id);
    }

    #[test]
    fn test_resolve_position_out_of_range() {
        let records = items();
        let view = filter(&records, "");
        let err = resolve(&view, "@9").unwrap_err();
        assert_eq!(err, ReferenceError::NoSuchPosition { position: 9, len: 3 });
    }

    #[test]
    fn test_resolve_full_and_partial_id() {
        let records = items();
        let view = filter(&records, "");
        let full = records[1].id.to_string();

        assert_eq!(resolve(&view, &full).unwrap(), records[1].id);
        assert_eq!(resolve(&view, &full.to_lowercase()).unwrap(), records[1].id);
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let records = items();
        let view = filter(&records, "");
        let err = resolve(&view, "SHOP-").unwrap_err();
        assert!(matches!(err, ReferenceError::Ambiguous { count: 3, .. }));
    }

    #[test]
    fn test_resolve_no_match() {
        let records = items();
        let view = filter(&records, "");
        assert!(matches!(
            resolve(&view, "THR-ZZZ").unwrap_err(),
            ReferenceError::NoMatch(_)
        ));
    }

    #[test]
    fn test_resolve_all_dedupes() {
        let records = items();
        let view = filter(&records, "");
        let ids = resolve_all(&view, &["@1".to_string(), "1".to_string(), "@3".to_string()]).unwrap();
        assert_eq!(ids, vec![records[0].id.clone(), records[2].id.clone()]);
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(0), "@1");
    }
}
