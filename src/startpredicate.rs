//! Support for quickly finding potential match locations.

use crate::ast::*;
use crate::indexing::Input;
use memchr::memmem;

/// A set of bytes, used to look for the first byte of a match.
#[derive(Debug, Clone)]
pub(crate) struct ByteBitmap([bool; 256]);

impl ByteBitmap {
    fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        let mut bits = [false; 256];
        for b in bytes {
            bits[b as usize] = true;
        }
        ByteBitmap(bits)
    }

    #[inline]
    fn contains(&self, b: u8) -> bool {
        self.0[b as usize]
    }

    /// \return the index of the first byte of \p haystack in the set.
    fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        haystack.iter().position(|&b| self.contains(b))
    }
}

/// Where a match may begin.
#[derive(Debug, Clone)]
pub(crate) enum StartPredicate {
    /// Anywhere.
    Arbitrary,

    /// Only where this literal text occurs.
    Sequence(memmem::Finder<'static>),

    /// Only at a character whose first UTF-8 byte is in the set.
    FirstByte(ByteBitmap),
}

impl StartPredicate {
    /// \return the first position at or after \p from where a match may
    /// start, or None if there is no such place. \p from must be a char
    /// boundary no further than the end of the input.
    pub(crate) fn next_candidate(&self, input: &Input<'_>, from: usize) -> Option<usize> {
        let rest = input.text().as_bytes().get(from..)?;
        // Both searches land on the first byte of a character, which is a
        // char boundary.
        let found = match self {
            StartPredicate::Arbitrary => return Some(from),
            StartPredicate::Sequence(finder) => finder.find(rest)?,
            StartPredicate::FirstByte(bitmap) => bitmap.find_in(rest)?,
        };
        Some(from + found)
    }
}

/// Append to \p prefix the literal characters every match of \p alt must
/// begin with.
/// \return true if all of \p alt was literal, so that whatever follows it
/// may extend the prefix.
fn literal_prefix(alt: &Alternative, prefix: &mut String) -> bool {
    for term in alt.terms() {
        let (atom, quantifier) = match &term.kind {
            // Assertions consume nothing.
            TermKind::Assertion(_) => continue,
            TermKind::Atom { atom, quantifier } => (atom, quantifier),
        };
        let min = quantifier.map_or(1, |q| q.bounds().0);
        if min == 0 {
            return false;
        }
        let complete = match atom {
            Atom::PatternCharacter(c) => {
                prefix.push(*c);
                true
            }
            Atom::AtomEscape(AtomEscape::CharacterEscape(ce)) => {
                prefix.push(ce.value());
                true
            }
            Atom::CapturingGroup { disjunction, .. } | Atom::NonCapturingGroup(disjunction) => {
                match &disjunction.disjunction {
                    None => literal_prefix(&disjunction.alternative, prefix),
                    Some(_) => false,
                }
            }
            _ => false,
        };
        // Only the first iteration of a quantified atom is known.
        if !complete || quantifier.is_some() {
            return false;
        }
    }
    true
}

/// \return a predicate for where matches of \p pattern may begin.
pub(crate) fn predicate_for_pattern(pattern: &Pattern, ignore_case: bool) -> StartPredicate {
    if ignore_case {
        return StartPredicate::Arbitrary;
    }
    let prefixes: Vec<String> = pattern
        .disjunction
        .alternatives()
        .map(|alt| {
            let mut prefix = String::new();
            literal_prefix(alt, &mut prefix);
            prefix
        })
        .collect();
    if prefixes.iter().any(String::is_empty) {
        return StartPredicate::Arbitrary;
    }

    // Use the shared prefix of all alternatives if there is one, otherwise
    // the set of their first bytes.
    let first = prefixes[0].as_bytes();
    let mut shared_len = first.len();
    for p in &prefixes[1..] {
        shared_len = shared_len.min(
            first
                .iter()
                .zip(p.as_bytes())
                .take_while(|(a, b)| a == b)
                .count(),
        );
    }
    // Don't cut a character in half.
    while !prefixes[0].is_char_boundary(shared_len) {
        shared_len -= 1;
    }
    if shared_len > 0 {
        StartPredicate::Sequence(memmem::Finder::new(&first[..shared_len]).into_owned())
    } else {
        StartPredicate::FirstByte(ByteBitmap::new(prefixes.iter().map(|p| p.as_bytes()[0])))
    }
}
