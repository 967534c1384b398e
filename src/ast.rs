//! Abstract syntax tree for ECMAScript regular expressions.
//!
//! The shape follows the grammar productions: disjunctions and alternatives
//! are right-nested lists, and every category of the grammar is its own enum.

pub use crate::charclasses::CharacterClassType;
use core::fmt;

/// The root of a parsed regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub disjunction: Disjunction,

    /// Total number of capturing groups in the pattern.
    pub n_capturing_parens: usize,
}

/// Alternatives joined by `|`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disjunction {
    pub alternative: Alternative,
    pub disjunction: Option<Box<Disjunction>>,
}

/// A sequence of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alternative {
    /// Zero terms.
    Empty,

    /// A term followed by the rest of the sequence.
    Sequence {
        term: Box<Term>,
        alternative: Box<Alternative>,
    },
}

/// An assertion, or an atom with an optional quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub kind: TermKind,

    /// The first capturing group number defined within this term.
    pub paren_index: usize,

    /// How many capturing groups are defined within this term.
    /// Groups `[paren_index, paren_index + paren_count)` are reset each time a
    /// quantified term repeats.
    pub paren_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermKind {
    Assertion(Assertion),
    Atom {
        atom: Atom,
        quantifier: Option<Quantifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// `^`
    BeginningOfLine,
    /// `$`
    EndOfLine,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
    /// `(?=...)`
    ZeroWidthPositive(Box<Disjunction>),
    /// `(?!...)`
    ZeroWidthNegative(Box<Disjunction>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    PatternCharacter(char),
    Dot,
    AtomEscape(AtomEscape),
    CharacterClass(CharacterClass),
    CapturingGroup {
        disjunction: Box<Disjunction>,
        capturing_number: usize,
    },
    NonCapturingGroup(Box<Disjunction>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuantifierPrefix {
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{n}`
    Fixed(usize),
    /// `{n,}`
    LowerBound(usize),
    /// `{n,m}`
    Range(usize, usize),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quantifier {
    pub prefix: QuantifierPrefix,
    pub lazy: bool,
}

impl Quantifier {
    /// \return the (min, max) iteration counts; a max of None is unbounded.
    pub fn bounds(&self) -> (usize, Option<usize>) {
        match self.prefix {
            QuantifierPrefix::Star => (0, None),
            QuantifierPrefix::Plus => (1, None),
            QuantifierPrefix::Question => (0, Some(1)),
            QuantifierPrefix::Fixed(n) => (n, Some(n)),
            QuantifierPrefix::LowerBound(n) => (n, None),
            QuantifierPrefix::Range(n, m) => (n, Some(m)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    pub ranges: ClassRanges,
    pub inverted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassRanges {
    Empty,
    Nonempty(Box<NonemptyClassRanges>),
}

/// The contents of a non-empty bracket, as a right-nested chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonemptyClassRanges {
    /// The final atom of the class.
    Atom(ClassAtom),

    /// A single atom followed by more ranges.
    AtomThen(ClassAtom, Box<NonemptyClassRanges>),

    /// A dashed range `a-b` followed by (possibly empty) ranges.
    Range(ClassAtom, ClassAtom, ClassRanges),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassAtom {
    Dash,
    SourceCharacter(char),
    ClassEscape(ClassEscape),
}

impl ClassAtom {
    /// \return the single character this atom denotes, or None if it is a
    /// class escape like `\d`.
    pub fn single_char(&self) -> Option<char> {
        match self {
            ClassAtom::Dash => Some('-'),
            ClassAtom::SourceCharacter(c) => Some(*c),
            ClassAtom::ClassEscape(ClassEscape::Backspace) => Some('\u{0008}'),
            ClassAtom::ClassEscape(ClassEscape::CharacterEscape(ce)) => Some(ce.value()),
            ClassAtom::ClassEscape(ClassEscape::CharacterClassEscape(_)) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassEscape {
    /// `\b` inside a class is backspace.
    Backspace,
    CharacterEscape(CharacterEscape),
    CharacterClassEscape(CharacterClassEscape),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomEscape {
    /// A backreference `\n`.
    DecimalEscape(usize),
    CharacterEscape(CharacterEscape),
    CharacterClassEscape(CharacterClassEscape),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacterEscape {
    /// `\f \n \r \t \v`, holding the escaped character's value.
    ControlEscape(char),
    /// `\cX`, holding the letter X.
    ControlLetter(char),
    /// `\0`
    Null,
    /// `\xHH`
    HexEscape(char),
    /// `\uHHHH`, or a pair of them forming a surrogate pair.
    UnicodeEscape(char),
    /// A backslash followed by a non-identifier character.
    IdentityEscape(char),
}

impl CharacterEscape {
    /// \return the character denoted by the escape.
    pub fn value(&self) -> char {
        match *self {
            CharacterEscape::ControlEscape(c) => c,
            CharacterEscape::ControlLetter(c) => char::from((c as u8) % 32),
            CharacterEscape::Null => '\0',
            CharacterEscape::HexEscape(c)
            | CharacterEscape::UnicodeEscape(c)
            | CharacterEscape::IdentityEscape(c) => c,
        }
    }
}

/// `\d \D \s \S \w \W`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CharacterClassEscape {
    pub class_type: CharacterClassType,
    pub positive: bool,
}

impl CharacterClassEscape {
    fn letter(&self) -> char {
        let c = match self.class_type {
            CharacterClassType::Digits => 'd',
            CharacterClassType::Spaces => 's',
            CharacterClassType::Words => 'w',
        };
        if self.positive {
            c
        } else {
            c.to_ascii_uppercase()
        }
    }
}

impl Alternative {
    /// \return an iterator over the terms of this alternative, in order.
    pub fn terms(&self) -> Terms<'_> {
        Terms { alt: self }
    }
}

/// Iterator over the terms of an Alternative.
#[derive(Debug, Clone)]
pub struct Terms<'a> {
    alt: &'a Alternative,
}

impl<'a> Iterator for Terms<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        match self.alt {
            Alternative::Empty => None,
            Alternative::Sequence { term, alternative } => {
                self.alt = alternative;
                Some(term)
            }
        }
    }
}

impl Disjunction {
    /// \return an iterator over the alternatives of this disjunction, in order.
    pub fn alternatives(&self) -> impl Iterator<Item = &Alternative> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let dis = next?;
            next = dis.disjunction.as_deref();
            Some(&dis.alternative)
        })
    }
}

// Tree dump, one node per line, with ".." per level of depth.

fn indent(f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "..")?;
    }
    Ok(())
}

fn display_disjunction(dis: &Disjunction, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "Disjunction")?;
    for alt in dis.alternatives() {
        indent(f, depth + 1)?;
        match alt {
            Alternative::Empty => writeln!(f, "Alternative (empty)")?,
            Alternative::Sequence { .. } => writeln!(f, "Alternative")?,
        }
        for term in alt.terms() {
            display_term(term, depth + 2, f)?;
        }
    }
    Ok(())
}

fn display_term(term: &Term, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    indent(f, depth)?;
    match &term.kind {
        TermKind::Assertion(assertion) => match assertion {
            Assertion::BeginningOfLine => writeln!(f, "Assertion ^"),
            Assertion::EndOfLine => writeln!(f, "Assertion $"),
            Assertion::WordBoundary => writeln!(f, "Assertion \\b"),
            Assertion::NotWordBoundary => writeln!(f, "Assertion \\B"),
            Assertion::ZeroWidthPositive(dis) => {
                writeln!(f, "Assertion (?=)")?;
                display_disjunction(dis, depth + 1, f)
            }
            Assertion::ZeroWidthNegative(dis) => {
                writeln!(f, "Assertion (?!)")?;
                display_disjunction(dis, depth + 1, f)
            }
        },
        TermKind::Atom { atom, quantifier } => {
            write!(f, "Term")?;
            if let Some(q) = quantifier {
                let (min, max) = q.bounds();
                match max {
                    Some(max) => write!(f, " {{{},{}}}", min, max)?,
                    None => write!(f, " {{{},}}", min)?,
                }
                if q.lazy {
                    write!(f, " lazy")?;
                }
                if term.paren_count > 0 {
                    write!(
                        f,
                        " (groups {}..{})",
                        term.paren_index,
                        term.paren_index + term.paren_count
                    )?;
                }
            }
            writeln!(f)?;
            display_atom(atom, depth + 1, f)
        }
    }
}

fn display_atom(atom: &Atom, depth: usize, f: &mut fmt::Formatter) -> fmt::Result {
    indent(f, depth)?;
    match atom {
        Atom::PatternCharacter(c) => writeln!(f, "Char {:?}", c),
        Atom::Dot => writeln!(f, "Dot"),
        Atom::AtomEscape(AtomEscape::DecimalEscape(n)) => writeln!(f, "BackRef {}", n),
        Atom::AtomEscape(AtomEscape::CharacterEscape(ce)) => {
            writeln!(f, "Char {:?}", ce.value())
        }
        Atom::AtomEscape(AtomEscape::CharacterClassEscape(cce)) => {
            writeln!(f, "ClassEscape \\{}", cce.letter())
        }
        Atom::CharacterClass(cc) => writeln!(f, "CharacterClass {}", cc),
        Atom::CapturingGroup {
            disjunction,
            capturing_number,
        } => {
            writeln!(f, "CapturingGroup {}", capturing_number)?;
            display_disjunction(disjunction, depth + 1, f)
        }
        Atom::NonCapturingGroup(disjunction) => {
            writeln!(f, "NonCapturingGroup")?;
            display_disjunction(disjunction, depth + 1, f)
        }
    }
}

impl fmt::Display for ClassAtom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassAtom::ClassEscape(ClassEscape::CharacterClassEscape(cce)) => {
                write!(f, "\\{}", cce.letter())
            }
            _ => match self.single_char() {
                Some(c) => write!(f, "{}", c.escape_debug()),
                None => Ok(()),
            },
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        if self.inverted {
            write!(f, "^")?;
        }
        let mut next = match &self.ranges {
            ClassRanges::Empty => None,
            ClassRanges::Nonempty(r) => Some(r.as_ref()),
        };
        while let Some(ranges) = next {
            next = match ranges {
                NonemptyClassRanges::Atom(a) => {
                    write!(f, "{}", a)?;
                    None
                }
                NonemptyClassRanges::AtomThen(a, rest) => {
                    write!(f, "{}", a)?;
                    Some(rest.as_ref())
                }
                NonemptyClassRanges::Range(a, b, rest) => {
                    write!(f, "{}-{}", a, b)?;
                    match rest {
                        ClassRanges::Empty => None,
                        ClassRanges::Nonempty(r) => Some(r.as_ref()),
                    }
                }
            };
        }
        write!(f, "]")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Pattern ({} capturing groups)", self.n_capturing_parens)?;
        display_disjunction(&self.disjunction, 1, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_term(c: char) -> Term {
        Term {
            kind: TermKind::Atom {
                atom: Atom::PatternCharacter(c),
                quantifier: None,
            },
            paren_index: 1,
            paren_count: 0,
        }
    }

    #[test]
    fn quantifier_bounds() {
        let q = |prefix| Quantifier {
            prefix,
            lazy: false,
        };
        assert_eq!(q(QuantifierPrefix::Star).bounds(), (0, None));
        assert_eq!(q(QuantifierPrefix::Plus).bounds(), (1, None));
        assert_eq!(q(QuantifierPrefix::Question).bounds(), (0, Some(1)));
        assert_eq!(q(QuantifierPrefix::Fixed(3)).bounds(), (3, Some(3)));
        assert_eq!(q(QuantifierPrefix::LowerBound(2)).bounds(), (2, None));
        assert_eq!(q(QuantifierPrefix::Range(2, 5)).bounds(), (2, Some(5)));
    }

    #[test]
    fn escape_values() {
        assert_eq!(CharacterEscape::ControlLetter('J').value(), '\n');
        assert_eq!(CharacterEscape::ControlLetter('j').value(), '\n');
        assert_eq!(CharacterEscape::Null.value(), '\0');
        assert_eq!(CharacterEscape::HexEscape('A').value(), 'A');
    }

    #[test]
    fn term_iteration() {
        let alt = Alternative::Sequence {
            term: Box::new(char_term('a')),
            alternative: Box::new(Alternative::Sequence {
                term: Box::new(char_term('b')),
                alternative: Box::new(Alternative::Empty),
            }),
        };
        let chars: Vec<_> = alt
            .terms()
            .map(|t| match &t.kind {
                TermKind::Atom {
                    atom: Atom::PatternCharacter(c),
                    ..
                } => *c,
                _ => panic!("Unexpected term"),
            })
            .collect();
        assert_eq!(chars, vec!['a', 'b']);
        assert_eq!(Alternative::Empty.terms().count(), 0);
    }

    #[test]
    fn class_display() {
        let cc = CharacterClass {
            ranges: ClassRanges::Nonempty(Box::new(NonemptyClassRanges::Range(
                ClassAtom::SourceCharacter('a'),
                ClassAtom::SourceCharacter('z'),
                ClassRanges::Nonempty(Box::new(NonemptyClassRanges::Atom(ClassAtom::Dash))),
            ))),
            inverted: true,
        };
        assert_eq!(cc.to_string(), "[^a-z-]");
    }
}
