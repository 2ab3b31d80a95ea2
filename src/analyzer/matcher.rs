//! Decides whether a candidate file is related to the entrypoint.
//!
//! The test is plain substring containment of a declared name in the
//! entrypoint's raw text. There is no tokenization, so a name that is part of
//! a longer identifier, or that only shows up in a comment or string literal,
//! still counts (false positive). A candidate reached only through an import
//! alias whose declared names never appear in the text is missed (false
//! negative). Callers rely on this over-approximation; keep it textual.

use super::extract::Declaration;

/// First exported declaration of the candidate whose name occurs verbatim in
/// the entrypoint text, if any. Case-sensitive, no normalization.
pub fn find_reference<'a>(entry_text: &str, exports: &'a [Declaration]) -> Option<&'a Declaration> {
    exports
        .iter()
        .find(|decl| entry_text.contains(decl.name.as_str()))
}
