use crate::codepointset::{CodePointSet, Interval};

// Character classes like \d or \S.

/// Construct an interval from an inclusive range of char.
const fn r(first: char, last: char) -> Interval {
    Interval {
        first: first as u32,
        last: last as u32,
    }
}

/// Construct an interval from a single char.
const fn r1(c: char) -> Interval {
    Interval {
        first: c as u32,
        last: c as u32,
    }
}

// Note all of these are sorted.

/// ES5 15.10.2.6 IsWordChar.
pub const WORD_CHARS: [Interval; 4] = [r('0', '9'), r('A', 'Z'), r1('_'), r('a', 'z')];

/// ES5 15.10.2.12 "\d".
pub const DIGITS: [Interval; 1] = [r('0', '9')];

/// ES5 7.2 WhiteSpace: TAB, VT, FF, SP, NBSP, BOM, and the Zs category.
pub const WHITESPACE: [Interval; 9] = [
    // TAB, VT, FF
    r('\u{0009}', '\u{000C}'),
    r1('\u{0020}'),
    r1('\u{00A0}'),
    r1('\u{1680}'),
    r('\u{2000}', '\u{200A}'),
    r1('\u{202F}'),
    r1('\u{205F}'),
    r1('\u{3000}'),
    r1('\u{FEFF}'),
];

/// ES5 7.3 LineTerminator.
pub const LINE_TERMINATOR: [Interval; 3] =
    [r1('\u{000A}'), r1('\u{000D}'), r('\u{2028}', '\u{2029}')];

/// \return whether \p c is a line terminator.
#[inline]
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// \return whether \p c is a word character, as used by \b and \w.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The character class escapes: \d \s \w and their negations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacterClassType {
    Digits,
    Spaces,
    Words,
}

/// \return a CodePointSet for a given class escape (positive or negative).
pub fn codepoints_from_class(ct: CharacterClassType, positive: bool) -> CodePointSet {
    let mut cps = match ct {
        CharacterClassType::Digits => CodePointSet::from_sorted_disjoint_intervals(DIGITS.to_vec()),
        CharacterClassType::Words => {
            CodePointSet::from_sorted_disjoint_intervals(WORD_CHARS.to_vec())
        }
        CharacterClassType::Spaces => {
            let mut cps = CodePointSet::from_sorted_disjoint_intervals(WHITESPACE.to_vec());
            for &iv in LINE_TERMINATOR.iter() {
                cps.add(iv)
            }
            cps
        }
    };
    if !positive {
        cps = cps.inverted()
    }
    cps
}

/// The set matched by `.`: everything but line terminators.
pub fn dot_codepoints() -> CodePointSet {
    CodePointSet::from_sorted_disjoint_intervals(LINE_TERMINATOR.to_vec()).inverted()
}
