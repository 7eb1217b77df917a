//! Parsers for ontology dump rows.
//!
//! Each parser takes one line (trailing newline allowed) and returns a typed
//! row or a [`CoreError`]. Ingestion skips rows that fail to parse; nothing
//! here is fatal.
//!
//! # Formats
//!
//! | Dump | Shape | Used columns |
//! |------|-------|--------------|
//! | class/instance labels | TSV | 1 = node, 3 = `"label"@lang` |
//! | transitive types, taxonomy | TSV | 1 = from node, 3 = to node |
//! | names | one name per line | whole line |
//! | concept relations | TSV `relation form concept[/pos]` | all |

use crate::error::{CoreError, CoreResult};
use crate::types::{ConceptRelation, ConceptRow, Entry, Node, UNKNOWN_POS};

fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn column<'a>(columns: &[&'a str], index: usize, kind: &'static str) -> CoreResult<&'a str> {
    match columns.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(CoreError::malformed(kind, format!("column {} is empty", index))),
        None => Err(CoreError::malformed(
            kind,
            format!("expected at least {} columns, got {}", index + 1, columns.len()),
        )),
    }
}

/// Parse a label row into an [`Entry`].
///
/// The value column looks like `"Moscow"@eng`. It is lowercased, split at
/// the last `@` into label and language, and the quotes around the label are
/// removed.
///
/// ```
/// use lexigraph_core::parse_label_row;
///
/// let entry = parse_label_row("<id_1>\t<Moscow>\trdfs:label\t\"Moscow\"@eng\n").unwrap();
/// assert_eq!(entry.label, "moscow");
/// assert_eq!(entry.lang, "eng");
/// assert_eq!(entry.node.as_str(), "<Moscow>");
/// ```
pub fn parse_label_row(line: &str) -> CoreResult<Entry> {
    const KIND: &str = "label";
    let columns: Vec<&str> = strip_line_end(line).split('\t').collect();
    let node = column(&columns, 1, KIND)?;
    let value = column(&columns, 3, KIND)?.to_lowercase();

    let (quoted, lang) = value
        .rsplit_once('@')
        .ok_or_else(|| CoreError::malformed(KIND, "value has no @lang suffix"))?;
    let label = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| CoreError::malformed(KIND, format!("label {} is not quoted", quoted)))?;

    Ok(Entry {
        label: label.to_string(),
        node: Node::new(node),
        lang: lang.to_string(),
    })
}

/// Parse a two-node row (instance -> class, or child -> parent).
pub fn parse_transition_row(line: &str) -> CoreResult<(Node, Node)> {
    const KIND: &str = "transition";
    let columns: Vec<&str> = strip_line_end(line).split('\t').collect();
    let from = column(&columns, 1, KIND)?;
    let to = column(&columns, 3, KIND)?;
    Ok((Node::new(from), Node::new(to)))
}

/// Parse a names-list row.
pub fn parse_name_row(line: &str) -> CoreResult<String> {
    let name = strip_line_end(line);
    if name.is_empty() {
        return Err(CoreError::malformed("name", "empty line"));
    }
    Ok(name.to_string())
}

/// Parse a concept-relation row.
///
/// The concept column may carry a part-of-speech suffix (`слово/n`): the
/// first `/` piece is the concept, the last is the tag.
///
/// # Errors
///
/// - `CoreError::UnknownRelation` when the relation token is not one of
///   `ConceptuallyRelatedTo`, `DerivedFrom`, `Synonym`
/// - `CoreError::MalformedRow` when the row does not have three columns
pub fn parse_concept_row(line: &str) -> CoreResult<ConceptRow> {
    const KIND: &str = "concept";
    let columns: Vec<&str> = strip_line_end(line).split('\t').collect();
    if columns.len() != 3 {
        return Err(CoreError::malformed(
            KIND,
            format!("expected 3 columns, got {}", columns.len()),
        ));
    }
    let relation: ConceptRelation = columns[0].parse()?;
    let form = column(&columns, 1, KIND)?.to_lowercase();
    let raw_concept = column(&columns, 2, KIND)?;

    let pieces: Vec<&str> = raw_concept.split('/').collect();
    let concept = pieces[0].to_lowercase();
    if concept.is_empty() {
        return Err(CoreError::malformed(KIND, "empty concept"));
    }
    let pos = if pieces.len() > 1 {
        pieces[pieces.len() - 1].to_string()
    } else {
        UNKNOWN_POS.to_string()
    };

    Ok(ConceptRow {
        relation,
        concept,
        form,
        pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_row_lowercases_and_strips() {
        let entry =
            parse_label_row("<id>\t<Vladimir_Putin>\trdfs:label\t\"Владимир Путин\"@rus\t\n").unwrap();
        assert_eq!(entry.label, "владимир путин");
        assert_eq!(entry.lang, "rus");
        assert_eq!(entry.node.as_str(), "<Vladimir_Putin>");
    }

    #[test]
    fn test_label_row_keeps_inner_at_sign() {
        let entry = parse_label_row("<id>\t<X>\trdfs:label\t\"a@b\"@eng").unwrap();
        assert_eq!(entry.label, "a@b");
        assert_eq!(entry.lang, "eng");
    }

    #[test]
    fn test_label_row_missing_columns() {
        let err = parse_label_row("<id>\t<X>").unwrap_err();
        assert!(matches!(err, CoreError::MalformedRow { kind: "label", .. }));
    }

    #[test]
    fn test_label_row_missing_lang() {
        assert!(parse_label_row("<id>\t<X>\trdfs:label\t\"moscow\"").is_err());
    }

    #[test]
    fn test_label_row_unquoted() {
        assert!(parse_label_row("<id>\t<X>\trdfs:label\tmoscow@eng").is_err());
    }

    #[test]
    fn test_transition_row() {
        let (from, to) =
            parse_transition_row("<id>\t<Moscow>\trdf:type\t<wordnet_city_108524735>\n").unwrap();
        assert_eq!(from.as_str(), "<Moscow>");
        assert_eq!(to.as_str(), "<wordnet_city_108524735>");
        assert!(parse_transition_row("<id>\t<Moscow>\trdf:type").is_err());
    }

    #[test]
    fn test_name_row() {
        assert_eq!(parse_name_row("Алексей\r\n").unwrap(), "Алексей");
        assert!(parse_name_row("\n").is_err());
    }

    #[test]
    fn test_concept_row_with_pos() {
        let row = parse_concept_row("DerivedFrom\tПрезидентский\tпрезидент/n\n").unwrap();
        assert_eq!(row.relation, ConceptRelation::DerivedFrom);
        assert_eq!(row.form, "президентский");
        assert_eq!(row.concept, "президент");
        assert_eq!(row.pos, "n");
    }

    #[test]
    fn test_concept_row_without_pos() {
        let row = parse_concept_row("Synonym\tлодка\tЧёлн").unwrap();
        assert_eq!(row.concept, "чёлн");
        assert_eq!(row.pos, UNKNOWN_POS);
    }

    #[test]
    fn test_concept_row_unknown_relation() {
        let err = parse_concept_row("IsA\tлодка\tсудно").unwrap_err();
        assert_eq!(err, CoreError::UnknownRelation("IsA".to_string()));
    }

    #[test]
    fn test_concept_row_wrong_arity() {
        assert!(parse_concept_row("Synonym\tлодка").is_err());
    }
}
