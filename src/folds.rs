//! Case canonicalization for case-insensitive matching.

use crate::codepointset::{CodePointSet, Interval};
use lazy_static::lazy_static;

/// Every cased letter lives below this code point.
const CASED_LIMIT: u32 = 0x1F000;

/// ES5 15.10.2.8 Canonicalize, for the case-insensitive flavor.
/// Uppercase \p ch; if that does not produce a single character, keep \p ch.
/// A non-ASCII character is never canonicalized to an ASCII one, so for example
/// U+017F (long s) does not match 's'.
pub fn canonicalize(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_uppercase();
    }
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(cu), None) if cu.is_ascii() => ch,
        (Some(cu), None) => cu,
        _ => ch,
    }
}

lazy_static! {
    /// Every (code point, canonical form) pair where the two differ, sorted by
    /// code point.
    static ref CANONICAL_CHANGES: Vec<(u32, u32)> = (0..CASED_LIMIT)
        .filter_map(char::from_u32)
        .filter_map(|c| {
            let cc = canonicalize(c);
            if cc != c {
                Some((c as u32, cc as u32))
            } else {
                None
            }
        })
        .collect();

    /// The code points from CANONICAL_CHANGES, as a set.
    static ref CHANGED_BY_CANONICALIZE: CodePointSet = {
        let mut cps = CodePointSet::new();
        for &(cp, _) in CANONICAL_CHANGES.iter() {
            cps.add_one(cp);
        }
        cps
    };
}

/// \return the set of canonical forms of every member of \p cps.
/// A character `ch` then belongs to the case-insensitive class exactly when
/// `canonicalize(ch)` belongs to the result.
pub fn canonicalize_set(cps: &CodePointSet) -> CodePointSet {
    let mut result = cps.clone();
    result.remove(CHANGED_BY_CANONICALIZE.intervals());
    for iv in cps.intervals() {
        add_canonical_forms(*iv, &mut result);
    }
    result
}

fn add_canonical_forms(iv: Interval, recv: &mut CodePointSet) {
    let start = CANONICAL_CHANGES.partition_point(|&(cp, _)| cp < iv.first);
    for &(cp, canonical) in CANONICAL_CHANGES[start..].iter() {
        if !iv.contains(cp) {
            break;
        }
        recv.add_one(canonical);
    }
}
