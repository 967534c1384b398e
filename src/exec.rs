//! Execution engine bits: the match driver and the search loop.

use crate::api::Match;
use crate::indexing::Input;
use crate::matcher::{CompiledMatcher, MatchResult, State};
use log::trace;

impl CompiledMatcher {
    /// Try to match at exactly byte position \p index of \p input, which must
    /// be a char boundary.
    /// This builds the initial State with every capture unset, and finishes
    /// with a continuation that accepts whatever state it is given.
    pub fn match_at(&self, input: &Input<'_>, index: usize) -> MatchResult {
        let x = State::new(index, self.n_capturing_parens);
        (self.root)(input, x, &Some)
    }

    /// Look for the leftmost match at or after char boundary \p start.
    /// If \p sticky is set, only \p start itself is tried.
    /// \return the index where the match begins, and its final State.
    pub(crate) fn search(
        &self,
        input: &Input<'_>,
        start: usize,
        sticky: bool,
    ) -> Option<(usize, State)> {
        if sticky {
            if start > input.len() {
                return None;
            }
            trace!("sticky match attempt at {}", start);
            return self.match_at(input, start).map(|s| (start, s));
        }
        let mut i = start;
        while i <= input.len() {
            i = self.start_predicate.next_candidate(input, i)?;
            trace!("match attempt at {}", i);
            if let Some(state) = self.match_at(input, i) {
                return Some((i, state));
            }
            i = input.next_pos(i);
        }
        None
    }
}

/// Convert a successful State beginning at \p start into a Match.
pub(crate) fn make_match(start: usize, state: &State) -> Match {
    Match {
        range: start..state.end_index(),
        captures: (1..state.capture_count())
            .map(|idx| state.capture(idx))
            .collect(),
    }
}

/// A struct which enables iteration over matches.
#[derive(Debug)]
pub struct Matches<'r, 't> {
    cm: &'r CompiledMatcher,
    input: Input<'t>,
    sticky: bool,

    /// Position to resume searching from, or None when exhausted.
    offset: Option<usize>,
}

impl<'r, 't> Matches<'r, 't> {
    pub(crate) fn new(cm: &'r CompiledMatcher, text: &'t str, start: usize, sticky: bool) -> Self {
        let input = Input::new(text);
        let offset = Some(input.index_at_or_after(start));
        Matches {
            cm,
            input,
            sticky,
            offset,
        }
    }
}

impl<'r, 't> Iterator for Matches<'r, 't> {
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.offset?;
        let (begin, state) = match self.cm.search(&self.input, start, self.sticky) {
            Some(found) => found,
            None => {
                self.offset = None;
                return None;
            }
        };
        let end = state.end_index();
        // Step past empty matches so iteration makes progress.
        self.offset = Some(if end == begin {
            self.input.next_pos(end)
        } else {
            end
        });
        Some(make_match(begin, &state))
    }
}

#[cfg(test)]
mod tests {
    use crate::indexing::Input;
    use crate::matcher::compile;
    use crate::parse::parse;

    #[test]
    fn search_finds_leftmost() {
        let cm = compile(&parse("b+").unwrap(), false, false).unwrap();
        let input = Input::new("aabbbab");
        let (start, state) = cm.search(&input, 0, false).unwrap();
        assert_eq!((start, state.end_index()), (2, 5));
        let (start, state) = cm.search(&input, 5, false).unwrap();
        assert_eq!((start, state.end_index()), (6, 7));
        assert!(cm.search(&input, 7, false).is_none());
        assert!(cm.search(&input, 8, false).is_none());
    }

    #[test]
    fn sticky_search_is_anchored() {
        let cm = compile(&parse("b").unwrap(), false, false).unwrap();
        let input = Input::new("ab");
        assert!(cm.search(&input, 0, true).is_none());
        assert_eq!(cm.search(&input, 1, true).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn search_steps_over_multibyte_characters() {
        let cm = compile(&parse("b").unwrap(), false, false).unwrap();
        let input = Input::new("\u{e9}\u{1F600}b");
        assert_eq!(cm.search(&input, 0, false).map(|(i, _)| i), Some(6));
        assert!(cm.search(&input, 7, false).is_none());
        let cm = compile(&parse("x*").unwrap(), false, false).unwrap();
        assert_eq!(cm.search(&input, 2, false).map(|(i, _)| i), Some(2));
        assert_eq!(cm.search(&input, 7, false).map(|(i, _)| i), Some(7));
    }

    #[test]
    fn empty_pattern_matches_at_end() {
        let cm = compile(&parse("").unwrap(), false, false).unwrap();
        let input = Input::new("ab");
        assert_eq!(cm.search(&input, 2, false).map(|(i, _)| i), Some(2));
        assert!(cm.search(&input, 3, false).is_none());
    }
}
