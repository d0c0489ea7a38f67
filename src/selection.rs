//! Page-range parsing: free-text expression → canonical page selection.
//!
//! The grammar is comma-separated tokens, each either a single page number
//! or a hyphenated inclusive range: `"1, 3-5, 12"`. Whitespace around tokens
//! and around hyphen operands is insignificant. An empty or whitespace-only
//! expression selects every page.
//!
//! Parsing is deliberately permissive: malformed tokens (`"abc"`, `"3-"`,
//! `"1-2-3"`) and out-of-bounds pages are dropped silently instead of failing
//! the whole expression. The expression is re-parsed as the user types, so a
//! half-typed token must not invalidate the tokens around it. Range endpoints
//! are accepted in either order and clamped to `[1, total_pages]`.

use std::collections::BTreeSet;

/// An ordered, deduplicated set of 1-based page numbers.
///
/// Invariant: the inner list is strictly ascending. Construction goes through
/// [`PageSelection::parse`] or [`PageSelection::all`], both of which sort and
/// dedupe, so the invariant cannot be violated from outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection(Vec<u16>);

impl PageSelection {
    /// Parse a range expression against a document's page count.
    ///
    /// Returns the full range `[1, total_pages]` for an empty expression.
    /// Never fails: tokens that do not survive parsing or clamping are
    /// skipped, and the result may be empty (the orchestrator rejects an
    /// empty selection before rendering).
    ///
    /// # Example
    /// ```rust
    /// use pdf2img::PageSelection;
    ///
    /// let sel = PageSelection::parse("1, 3-5, 99", 5);
    /// assert_eq!(sel.pages(), &[1, 3, 4, 5]);
    /// ```
    pub fn parse(expression: &str, total_pages: u16) -> Self {
        if expression.trim().is_empty() {
            return Self::all(total_pages);
        }

        let mut pages: BTreeSet<u16> = BTreeSet::new();

        for token in expression.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            if let Some((a, b)) = token.split_once('-') {
                // Endpoints parse wider than u16 so "1-99999" clamps to the
                // page count instead of being dropped for overflow.
                if let (Ok(a), Ok(b)) = (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
                    let lo = a.min(b).max(1);
                    let hi = a.max(b).min(u32::from(total_pages));
                    for p in lo..=hi {
                        pages.insert(p as u16);
                    }
                }
                // Either endpoint unparsable: drop the token, keep going.
            } else if let Ok(p) = token.parse::<u32>() {
                if p >= 1 && p <= u32::from(total_pages) {
                    pages.insert(p as u16);
                }
            }
        }

        Self(pages.into_iter().collect())
    }

    /// The full selection `[1, total_pages]`.
    pub fn all(total_pages: u16) -> Self {
        Self((1..=total_pages).collect())
    }

    /// Selected page numbers, ascending, 1-based.
    pub fn pages(&self) -> &[u16] {
        &self.0
    }

    /// Number of selected pages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no page survived parsing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for exactly one selected page. Decides single-image vs. archive
    /// output.
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    /// Iterate the selected page numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_expression_selects_all_pages() {
        assert_eq!(PageSelection::parse("", 1).pages(), &[1]);
        assert_eq!(PageSelection::parse("", 5).pages(), &[1, 2, 3, 4, 5]);
        assert_eq!(PageSelection::parse("   ", 3).pages(), &[1, 2, 3]);
        assert_eq!(PageSelection::parse("\t\n", 2).pages(), &[1, 2]);
    }

    #[test]
    fn single_pages_and_ranges_combine() {
        let sel = PageSelection::parse("1, 3-5", 10);
        assert_eq!(sel.pages(), &[1, 3, 4, 5]);
    }

    #[test]
    fn reversed_endpoints_normalise() {
        assert_eq!(PageSelection::parse("2-1", 5).pages(), &[1, 2]);
        assert_eq!(PageSelection::parse("5-3", 10).pages(), &[3, 4, 5]);
    }

    #[test]
    fn out_of_bounds_single_page_dropped() {
        let sel = PageSelection::parse("1, 3-5, 99", 5);
        assert_eq!(sel.pages(), &[1, 3, 4, 5]);
    }

    #[test]
    fn range_clamps_to_document_bounds() {
        assert_eq!(PageSelection::parse("0-3", 10).pages(), &[1, 2, 3]);
        assert_eq!(PageSelection::parse("8-20", 10).pages(), &[8, 9, 10]);
        assert_eq!(PageSelection::parse("1-99999", 4).pages(), &[1, 2, 3, 4]);
    }

    #[test]
    fn range_wholly_outside_bounds_contributes_nothing() {
        assert!(PageSelection::parse("7-9", 5).is_empty());
        assert!(PageSelection::parse("0-0", 5).is_empty());
    }

    #[test]
    fn malformed_tokens_dropped_valid_kept() {
        assert_eq!(PageSelection::parse("abc, 2", 5).pages(), &[2]);
        assert_eq!(PageSelection::parse("1, x-3, 4", 5).pages(), &[1, 4]);
        assert_eq!(PageSelection::parse("3-, 2", 5).pages(), &[2]);
        assert_eq!(PageSelection::parse("-3, 2", 5).pages(), &[2]);
        assert_eq!(PageSelection::parse("1-2-3, 5", 5).pages(), &[5]);
    }

    #[test]
    fn all_tokens_malformed_yields_empty() {
        assert!(PageSelection::parse("abc, def", 5).is_empty());
        assert!(PageSelection::parse(",,,", 5).is_empty());
        assert!(PageSelection::parse("0", 5).is_empty());
    }

    #[test]
    fn duplicates_collapse_and_order_is_ascending() {
        let sel = PageSelection::parse("5, 1, 3, 1, 2-4", 10);
        assert_eq!(sel.pages(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn whitespace_around_tokens_and_operands_ignored() {
        let sel = PageSelection::parse("  1 ,  3 - 5 ,7  ", 10);
        assert_eq!(sel.pages(), &[1, 3, 4, 5, 7]);
    }

    #[test]
    fn parse_is_idempotent_and_order_stable() {
        let first = PageSelection::parse("4, 1-2, 4", 6);
        let second = PageSelection::parse("4, 1-2, 4", 6);
        assert_eq!(first, second);
        assert_eq!(first.pages(), &[1, 2, 4]);
    }

    #[test]
    fn single_page_selection_is_single() {
        assert!(PageSelection::parse("3", 5).is_single());
        assert!(!PageSelection::parse("3-4", 5).is_single());
        assert!(!PageSelection::parse("99", 5).is_single());
    }

    #[test]
    fn all_matches_empty_expression() {
        assert_eq!(PageSelection::all(7), PageSelection::parse("", 7));
        assert_eq!(PageSelection::all(7).len(), 7);
    }
}
