//! Parser from regex patterns to the AST

use crate::ast::*;
use crate::charclasses::CharacterClassType;
use crate::scanner::Scanner;
use crate::unicode;
use crate::util::is_syntax_char;
use log::debug;

/// The largest quantifier bound accepted in `{n,m}`.
pub const MAX_QUANTIFIER_BOUND: usize = u32::MAX as usize;

/// Represents an error encountered during regex compilation.
/// The text contains a human-readable error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The pattern (or flags) are malformed.
    #[error("SyntaxError: {0}")]
    Syntax(String),

    /// A broken invariant in the engine itself.
    #[error("InternalError: {0}")]
    Internal(String),
}

impl Error {
    /// \return the human-readable message, without the error kind.
    pub fn text(&self) -> &str {
        match self {
            Error::Syntax(text) | Error::Internal(text) => text,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }
}

pub(crate) fn error<S, T>(text: S) -> Result<T, Error>
where
    S: ToString,
{
    Err(Error::Syntax(text.to_string()))
}

/// \return whether \p c may begin a Term.
fn can_start_term(c: char) -> bool {
    !is_syntax_char(c) || matches!(c, '^' | '$' | '\\' | '.' | '(' | '[')
}

/// \return whether \p c begins a QuantifierPrefix.
fn is_quantifier_start(c: char) -> bool {
    matches!(c, '*' | '+' | '?' | '{')
}

/// Either a lone class atom or a dashed range, before the class chain is
/// assembled.
enum ClassItem {
    Single(ClassAtom),
    Range(ClassAtom, ClassAtom),
}

struct Parser {
    scanner: Scanner,
}

impl Parser {
    fn parse_pattern(&mut self) -> Result<Pattern, Error> {
        // Parse a disjunction. If we consume everything, it's success. If there's
        // something left, it's an error (for example, an excess closing paren).
        let disjunction = self.parse_disjunction()?;
        match self.scanner.next() {
            None => Ok(Pattern {
                disjunction,
                n_capturing_parens: self.scanner.capturing_parens(),
            }),
            Some(')') => Err(self.scanner.syntax_error("Unbalanced parenthesis")),
            Some(c) if is_quantifier_start(c) => {
                Err(self.scanner.syntax_error("Nothing to repeat"))
            }
            Some(_) => Err(self.scanner.syntax_error("Unexpected characters at end of pattern")),
        }
    }

    /// ES5 15.10.2.3 Disjunction.
    fn parse_disjunction(&mut self) -> Result<Disjunction, Error> {
        let mut alternatives = vec![self.parse_alternative()?];
        while self.scanner.try_pop("|") {
            alternatives.push(self.parse_alternative()?);
        }
        let mut result: Option<Disjunction> = None;
        for alternative in alternatives.into_iter().rev() {
            result = Some(Disjunction {
                alternative,
                disjunction: result.map(Box::new),
            });
        }
        result.ok_or_else(|| Error::Internal("Disjunction without alternatives".to_string()))
    }

    /// ES5 15.10.2.4 Alternative.
    /// Terms are gathered in a loop and then nested to the right.
    fn parse_alternative(&mut self) -> Result<Alternative, Error> {
        let mut terms = Vec::new();
        while let Some(term) = self.parse_term()? {
            terms.push(term);
        }
        let mut result = Alternative::Empty;
        for term in terms.into_iter().rev() {
            result = Alternative::Sequence {
                term: Box::new(term),
                alternative: Box::new(result),
            };
        }
        Ok(result)
    }

    /// ES5 15.10.2.5 Term.
    /// \return None if the lookahead cannot begin a term.
    fn parse_term(&mut self) -> Result<Option<Term>, Error> {
        match self.scanner.next() {
            Some(c) if can_start_term(c) => {}
            _ => return Ok(None),
        }
        let start_parens = self.scanner.capturing_parens();
        if let Some(assertion) = self.parse_assertion()? {
            if self.scanner.next().map_or(false, is_quantifier_start) {
                return Err(self.scanner.syntax_error("Quantifier not allowed here"));
            }
            return Ok(Some(Term {
                kind: TermKind::Assertion(assertion),
                paren_index: start_parens + 1,
                paren_count: self.scanner.capturing_parens() - start_parens,
            }));
        }
        let atom = self.parse_atom()?;
        let quantifier = self.parse_quantifier()?;
        Ok(Some(Term {
            kind: TermKind::Atom { atom, quantifier },
            paren_index: start_parens + 1,
            paren_count: self.scanner.capturing_parens() - start_parens,
        }))
    }

    /// ES5 15.10.2.6 Assertion.
    fn parse_assertion(&mut self) -> Result<Option<Assertion>, Error> {
        let assertion = if self.scanner.try_pop("^") {
            Assertion::BeginningOfLine
        } else if self.scanner.try_pop("$") {
            Assertion::EndOfLine
        } else if self.scanner.try_pop("\\b") {
            Assertion::WordBoundary
        } else if self.scanner.try_pop("\\B") {
            Assertion::NotWordBoundary
        } else if self.scanner.try_pop("(?=") {
            Assertion::ZeroWidthPositive(Box::new(self.parse_group_contents()?))
        } else if self.scanner.try_pop("(?!") {
            Assertion::ZeroWidthNegative(Box::new(self.parse_group_contents()?))
        } else {
            return Ok(None);
        };
        Ok(Some(assertion))
    }

    /// Parse a disjunction followed by the closing paren of its group.
    fn parse_group_contents(&mut self) -> Result<Disjunction, Error> {
        let disjunction = self.parse_disjunction()?;
        self.scanner
            .pop_or_syntax_error(')', "Unbalanced parenthesis")?;
        Ok(disjunction)
    }

    /// ES5 15.10.2.7 Quantifier.
    fn parse_quantifier(&mut self) -> Result<Option<Quantifier>, Error> {
        let prefix = match self.parse_quantifier_prefix()? {
            Some(prefix) => prefix,
            None => return Ok(None),
        };
        let lazy = self.scanner.try_pop("?");
        Ok(Some(Quantifier { prefix, lazy }))
    }

    fn parse_quantifier_prefix(&mut self) -> Result<Option<QuantifierPrefix>, Error> {
        let s = &mut self.scanner;
        if s.try_pop("*") {
            return Ok(Some(QuantifierPrefix::Star));
        } else if s.try_pop("+") {
            return Ok(Some(QuantifierPrefix::Plus));
        } else if s.try_pop("?") {
            return Ok(Some(QuantifierPrefix::Question));
        } else if !s.try_pop("{") {
            return Ok(None);
        }

        let min = s.pop_decimal_digits()?;
        let prefix = if s.try_pop(",") {
            if s.next().map_or(false, |c| c.is_ascii_digit()) {
                let max = s.pop_decimal_digits()?;
                QuantifierPrefix::Range(min, max)
            } else {
                QuantifierPrefix::LowerBound(min)
            }
        } else {
            QuantifierPrefix::Fixed(min)
        };
        s.pop_or_syntax_error('}', "Unterminated quantifier")?;

        let (min, max) = Quantifier {
            prefix,
            lazy: false,
        }
        .bounds();
        if min > MAX_QUANTIFIER_BOUND || max.map_or(false, |max| max > MAX_QUANTIFIER_BOUND) {
            return error("Quantifier bound too large");
        }
        if let Some(max) = max {
            if max < min {
                return error(format!(
                    "Numbers out of order in quantifier {{{},{}}}",
                    min, max
                ));
            }
        }
        Ok(Some(prefix))
    }

    /// ES5 15.10.2.8 Atom.
    /// The caller has already checked that the lookahead can begin a term.
    fn parse_atom(&mut self) -> Result<Atom, Error> {
        let c = self.scanner.pop()?;
        match c {
            '.' => Ok(Atom::Dot),
            '\\' => Ok(Atom::AtomEscape(self.parse_atom_escape()?)),
            '[' => Ok(Atom::CharacterClass(self.parse_character_class()?)),
            '(' => {
                if self.scanner.try_pop("?:") {
                    Ok(Atom::NonCapturingGroup(Box::new(
                        self.parse_group_contents()?,
                    )))
                } else if self.scanner.next() == Some('?') {
                    Err(self.scanner.syntax_error("Invalid group"))
                } else {
                    let capturing_number = self.scanner.next_capturing_number();
                    let disjunction = Box::new(self.parse_group_contents()?);
                    Ok(Atom::CapturingGroup {
                        disjunction,
                        capturing_number,
                    })
                }
            }
            c => Ok(Atom::PatternCharacter(c)),
        }
    }

    /// ES5 15.10.2.9 AtomEscape. The backslash has been consumed.
    fn parse_atom_escape(&mut self) -> Result<AtomEscape, Error> {
        let c = match self.scanner.next() {
            Some(c) => c,
            None => return error("Incomplete escape"),
        };
        if let Some(cce) = self.try_parse_character_class_escape() {
            return Ok(AtomEscape::CharacterClassEscape(cce));
        }
        if ('1'..='9').contains(&c) {
            // A backreference. Whether the group exists is checked at compile time.
            return Ok(AtomEscape::DecimalEscape(self.scanner.pop_decimal_digits()?));
        }
        Ok(AtomEscape::CharacterEscape(self.parse_character_escape()?))
    }

    /// ES5 15.10.2.12 CharacterClassEscape.
    fn try_parse_character_class_escape(&mut self) -> Option<CharacterClassEscape> {
        let c = self.scanner.next()?;
        let class_type = match c.to_ascii_lowercase() {
            'd' => CharacterClassType::Digits,
            's' => CharacterClassType::Spaces,
            'w' => CharacterClassType::Words,
            _ => return None,
        };
        self.scanner.advance();
        Some(CharacterClassEscape {
            class_type,
            positive: c.is_ascii_lowercase(),
        })
    }

    /// ES5 15.10.2.10 CharacterEscape. The backslash has been consumed.
    fn parse_character_escape(&mut self) -> Result<CharacterEscape, Error> {
        let c = match self.scanner.next() {
            Some(c) => c,
            None => return error("Incomplete escape"),
        };
        let escape = match c {
            'f' => CharacterEscape::ControlEscape('\u{000C}'),
            'n' => CharacterEscape::ControlEscape('\n'),
            'r' => CharacterEscape::ControlEscape('\r'),
            't' => CharacterEscape::ControlEscape('\t'),
            'v' => CharacterEscape::ControlEscape('\u{000B}'),
            'c' => match self.scanner.peek_at(1) {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    self.scanner.advance();
                    CharacterEscape::ControlLetter(letter)
                }
                _ => return Err(self.scanner.syntax_error("Invalid control escape")),
            },
            '0' => {
                // CharacterEscape :: "0 [lookahead != DecimalDigit]"
                if self.scanner.peek_at(1).map_or(false, |c| c.is_ascii_digit()) {
                    return Err(self.scanner.syntax_error("Invalid decimal escape"));
                }
                CharacterEscape::Null
            }
            'x' => {
                self.scanner.advance();
                return match self.try_pop_hex_digits(2) {
                    Some(v) => Ok(CharacterEscape::HexEscape(char_from_hex(v)?)),
                    None => Err(self.scanner.syntax_error("Invalid hex escape")),
                };
            }
            'u' => {
                self.scanner.advance();
                return self.parse_unicode_escape_body();
            }
            c if unicode::is_identifier_part(c) => {
                return Err(self.scanner.syntax_error("Invalid identity escape"));
            }
            c => CharacterEscape::IdentityEscape(c),
        };
        self.scanner.advance();
        Ok(escape)
    }

    /// Parse the HHHH of `\uHHHH`. A high surrogate followed by an escaped low
    /// surrogate forms one character; any other surrogate is an error.
    fn parse_unicode_escape_body(&mut self) -> Result<CharacterEscape, Error> {
        let first = match self.try_pop_hex_digits(4) {
            Some(v) => v,
            None => return Err(self.scanner.syntax_error("Invalid unicode escape")),
        };
        if (0xD800..=0xDBFF).contains(&first) {
            let checkpoint = self.scanner.checkpoint();
            if self.scanner.try_pop("\\u") {
                if let Some(second) = self.try_pop_hex_digits(4) {
                    if (0xDC00..=0xDFFF).contains(&second) {
                        let cp = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                        return Ok(CharacterEscape::UnicodeEscape(char_from_hex(cp)?));
                    }
                }
            }
            self.scanner.restore(checkpoint);
        }
        match char::from_u32(first) {
            Some(c) => Ok(CharacterEscape::UnicodeEscape(c)),
            None => Err(self.scanner.syntax_error("Unpaired surrogate in unicode escape")),
        }
    }

    /// Consume exactly \p count hex digits and return their value, or consume
    /// nothing and return None.
    fn try_pop_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for i in 0..count {
            value = value * 16 + self.scanner.peek_at(i)?.to_digit(16)?;
        }
        for _ in 0..count {
            self.scanner.advance();
        }
        Some(value)
    }

    /// ES5 15.10.2.13 CharacterClass. The open bracket has been consumed.
    fn parse_character_class(&mut self) -> Result<CharacterClass, Error> {
        let inverted = self.scanner.try_pop("^");
        let mut items = Vec::new();
        while let Some(first) = self.parse_class_atom()? {
            // A dash which is not the last character of the class forms a range.
            if self.scanner.next() == Some('-')
                && self.scanner.peek_at(1).map_or(false, |c| c != ']')
            {
                self.scanner.advance();
                let second = match self.parse_class_atom()? {
                    Some(atom) => atom,
                    None => return Err(self.scanner.syntax_error("Unbalanced bracket")),
                };
                match (first.single_char(), second.single_char()) {
                    (Some(lo), Some(hi)) if lo > hi => {
                        return error(format!(
                            "Range out of order in character class [{}-{}]",
                            first, second
                        ));
                    }
                    (Some(_), Some(_)) => {}
                    _ => {
                        return error(format!("Invalid character range [{}-{}]", first, second));
                    }
                }
                items.push(ClassItem::Range(first, second));
            } else {
                items.push(ClassItem::Single(first));
            }
        }
        self.scanner
            .pop_or_syntax_error(']', "Unbalanced bracket")?;

        let mut tail: Option<NonemptyClassRanges> = None;
        for item in items.into_iter().rev() {
            tail = Some(match item {
                ClassItem::Single(atom) => match tail {
                    None => NonemptyClassRanges::Atom(atom),
                    Some(rest) => NonemptyClassRanges::AtomThen(atom, Box::new(rest)),
                },
                ClassItem::Range(lo, hi) => NonemptyClassRanges::Range(
                    lo,
                    hi,
                    match tail {
                        None => ClassRanges::Empty,
                        Some(rest) => ClassRanges::Nonempty(Box::new(rest)),
                    },
                ),
            });
        }
        let ranges = match tail {
            None => ClassRanges::Empty,
            Some(r) => ClassRanges::Nonempty(Box::new(r)),
        };
        Ok(CharacterClass { ranges, inverted })
    }

    /// ES5 15.10.2.16 ClassAtom.
    /// \return None at the closing bracket or the end of the pattern.
    fn parse_class_atom(&mut self) -> Result<Option<ClassAtom>, Error> {
        let atom = match self.scanner.next() {
            None | Some(']') => return Ok(None),
            Some('-') => {
                self.scanner.advance();
                ClassAtom::Dash
            }
            Some('\\') => {
                self.scanner.advance();
                ClassAtom::ClassEscape(self.parse_class_escape()?)
            }
            Some(c) => {
                self.scanner.advance();
                ClassAtom::SourceCharacter(c)
            }
        };
        Ok(Some(atom))
    }

    /// ES5 15.10.2.19 ClassEscape. The backslash has been consumed.
    fn parse_class_escape(&mut self) -> Result<ClassEscape, Error> {
        match self.scanner.next() {
            None => error("Incomplete escape"),
            Some('b') => {
                self.scanner.advance();
                Ok(ClassEscape::Backspace)
            }
            Some(c) if ('1'..='9').contains(&c) => {
                Err(self.scanner.syntax_error("Invalid decimal escape in character class"))
            }
            Some(_) => {
                if let Some(cce) = self.try_parse_character_class_escape() {
                    return Ok(ClassEscape::CharacterClassEscape(cce));
                }
                Ok(ClassEscape::CharacterEscape(self.parse_character_escape()?))
            }
        }
    }
}

fn char_from_hex(v: u32) -> Result<char, Error> {
    char::from_u32(v).ok_or_else(|| Error::Syntax(format!("Invalid code point {:#X}", v)))
}

/// Parse a pattern into its AST.
/// \return the pattern, or a SyntaxError.
pub fn parse(pattern: &str) -> Result<Pattern, Error> {
    let mut p = Parser {
        scanner: Scanner::new(pattern),
    };
    let result = p.parse_pattern();
    match &result {
        Ok(ast) => debug!(
            "parsed /{}/ with {} capturing groups",
            pattern, ast.n_capturing_parens
        ),
        Err(err) => debug!("failed to parse /{}/: {}", pattern, err),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chr(c: char) -> Term {
        atom_term(Atom::PatternCharacter(c), None, 0, 0)
    }

    fn atom_term(
        atom: Atom,
        quantifier: Option<Quantifier>,
        paren_index: usize,
        paren_count: usize,
    ) -> Term {
        Term {
            kind: TermKind::Atom { atom, quantifier },
            paren_index,
            paren_count,
        }
    }

    fn seq(terms: Vec<Term>) -> Alternative {
        let mut alt = Alternative::Empty;
        for term in terms.into_iter().rev() {
            alt = Alternative::Sequence {
                term: Box::new(term),
                alternative: Box::new(alt),
            };
        }
        alt
    }

    fn dis(alts: Vec<Alternative>) -> Disjunction {
        let mut result = None;
        for alternative in alts.into_iter().rev() {
            result = Some(Disjunction {
                alternative,
                disjunction: result.map(Box::new),
            });
        }
        result.unwrap()
    }

    fn first_term(p: &Pattern) -> &Term {
        p.disjunction.alternative.terms().next().unwrap()
    }

    fn first_atom(pattern: &str) -> Atom {
        match &first_term(&parse(pattern).unwrap()).kind {
            TermKind::Atom { atom, .. } => atom.clone(),
            TermKind::Assertion(a) => panic!("Unexpected assertion {:?}", a),
        }
    }

    #[test]
    fn test_empty_pattern() {
        let p = parse("").unwrap();
        assert_eq!(p.n_capturing_parens, 0);
        assert_eq!(p.disjunction, dis(vec![Alternative::Empty]));
    }

    #[test]
    fn test_alternation_structure() {
        let p = parse("ab|c|").unwrap();
        assert_eq!(
            p.disjunction,
            dis(vec![
                seq(vec![chr('a'), chr('b')]),
                seq(vec![chr('c')]),
                Alternative::Empty
            ])
        );
    }

    #[test]
    fn test_paren_bookkeeping() {
        // (a(b))*(c)
        let p = parse("(a(b))*(c)").unwrap();
        assert_eq!(p.n_capturing_parens, 3);
        let terms: Vec<_> = p.disjunction.alternative.terms().collect();
        assert_eq!(terms.len(), 2);
        assert_eq!((terms[0].paren_index, terms[0].paren_count), (1, 2));
        assert_eq!((terms[1].paren_index, terms[1].paren_count), (3, 1));
        match &terms[1].kind {
            TermKind::Atom {
                atom: Atom::CapturingGroup {
                    capturing_number, ..
                },
                quantifier: None,
            } => assert_eq!(*capturing_number, 3),
            other => panic!("Unexpected term {:?}", other),
        }
    }

    #[test]
    fn test_quantifiers() {
        let q = |pattern: &str| match &first_term(&parse(pattern).unwrap()).kind {
            TermKind::Atom { quantifier, .. } => quantifier.unwrap(),
            _ => panic!("Expected atom"),
        };
        assert_eq!(q("a*").bounds(), (0, None));
        assert!(q("a+?").lazy);
        assert_eq!(q("a{010}").prefix, QuantifierPrefix::Fixed(10));
        assert_eq!(q("a{2,}").prefix, QuantifierPrefix::LowerBound(2));
        assert_eq!(q("a{2,4}?").prefix, QuantifierPrefix::Range(2, 4));
        assert_eq!(q("a{4294967295}").bounds(), (4294967295, Some(4294967295)));
        assert!(parse("a{4294967296}").is_err());
        assert!(parse("a{3,2}").is_err());
        assert!(parse("a{2").is_err());
        assert!(parse("a{,2}").is_err());
    }

    #[test]
    fn test_assertions() {
        let p = parse("^\\b\\B$").unwrap();
        let kinds: Vec<_> = p
            .disjunction
            .alternative
            .terms()
            .map(|t| t.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                TermKind::Assertion(Assertion::BeginningOfLine),
                TermKind::Assertion(Assertion::WordBoundary),
                TermKind::Assertion(Assertion::NotWordBoundary),
                TermKind::Assertion(Assertion::EndOfLine),
            ]
        );
        assert!(parse("^*").is_err());
        assert!(parse("(?=a)+").is_err());
        assert!(parse("\\b{2}").is_err());
    }

    #[test]
    fn test_lookahead() {
        let p = parse("(?=(a))(?!b)").unwrap();
        assert_eq!(p.n_capturing_parens, 1);
        let terms: Vec<_> = p.disjunction.alternative.terms().collect();
        assert!(matches!(
            terms[0].kind,
            TermKind::Assertion(Assertion::ZeroWidthPositive(_))
        ));
        assert!(matches!(
            terms[1].kind,
            TermKind::Assertion(Assertion::ZeroWidthNegative(_))
        ));
    }

    #[test]
    fn test_escapes() {
        let ce = |pattern: &str| match first_atom(pattern) {
            Atom::AtomEscape(AtomEscape::CharacterEscape(ce)) => ce,
            other => panic!("Unexpected atom {:?}", other),
        };
        assert_eq!(ce("\\n").value(), '\n');
        assert_eq!(ce("\\v").value(), '\u{000B}');
        assert_eq!(ce("\\cJ"), CharacterEscape::ControlLetter('J'));
        assert_eq!(ce("\\0"), CharacterEscape::Null);
        assert_eq!(ce("\\x41"), CharacterEscape::HexEscape('A'));
        assert_eq!(ce("\\u00e9"), CharacterEscape::UnicodeEscape('\u{e9}'));
        assert_eq!(
            ce("\\uD83D\\uDE00"),
            CharacterEscape::UnicodeEscape('\u{1F600}')
        );
        assert_eq!(ce("\\/"), CharacterEscape::IdentityEscape('/'));
        assert_eq!(ce("\\$"), CharacterEscape::IdentityEscape('$'));
        assert_eq!(
            first_atom("\\12"),
            Atom::AtomEscape(AtomEscape::DecimalEscape(12))
        );
        assert_eq!(
            first_atom("\\W"),
            Atom::AtomEscape(AtomEscape::CharacterClassEscape(CharacterClassEscape {
                class_type: CharacterClassType::Words,
                positive: false,
            }))
        );
    }

    #[test]
    fn test_bad_escapes() {
        for pattern in [
            "\\", "\\c", "\\c1", "\\01", "\\x4", "\\xZZ", "\\u12", "\\uD800", "\\uDC00",
            "\\a", "\\_", "\\e", "\\\u{e9}",
        ] {
            let err = parse(pattern).unwrap_err();
            assert!(err.is_syntax_error(), "{} gave {:?}", pattern, err);
        }
    }

    #[test]
    fn test_character_classes() {
        let class = |pattern: &str| match first_atom(pattern) {
            Atom::CharacterClass(cc) => cc,
            other => panic!("Unexpected atom {:?}", other),
        };
        assert_eq!(class("[]").ranges, ClassRanges::Empty);
        assert!(class("[^]").inverted);
        assert_eq!(class("[a-z]").to_string(), "[a-z]");
        assert_eq!(class("[-a]").to_string(), "[-a]");
        assert_eq!(class("[a-]").to_string(), "[a-]");
        assert_eq!(class("[\\d-]").to_string(), "[\\d-]");
        assert_eq!(class("[a-c-e]").to_string(), "[a-c-e]");
        assert_eq!(class("[\\b]").to_string(), "[\\u{8}]");
        assert_eq!(
            class("[\\-]").ranges,
            ClassRanges::Nonempty(Box::new(NonemptyClassRanges::Atom(
                ClassAtom::ClassEscape(ClassEscape::CharacterEscape(
                    CharacterEscape::IdentityEscape('-')
                ))
            )))
        );
        assert_eq!(
            class("[ab]").ranges,
            ClassRanges::Nonempty(Box::new(NonemptyClassRanges::AtomThen(
                ClassAtom::SourceCharacter('a'),
                Box::new(NonemptyClassRanges::Atom(ClassAtom::SourceCharacter('b')))
            )))
        );
    }

    #[test]
    fn test_bad_classes() {
        for pattern in ["[", "[a", "[a-", "[z-a]", "[\\d-z]", "[a-\\w]", "[\\1]", "[\\B]"] {
            assert!(parse(pattern).is_err(), "{} should fail", pattern);
        }
    }

    #[test]
    fn test_structural_errors() {
        let text = |pattern: &str| parse(pattern).unwrap_err().text().to_string();
        assert!(text("(a").starts_with("Unbalanced parenthesis"));
        assert!(text("a)").starts_with("Unbalanced parenthesis"));
        assert!(text("*a").starts_with("Nothing to repeat"));
        assert!(text("a|?").starts_with("Nothing to repeat"));
        assert!(text("a]").starts_with("Unexpected characters"));
        assert!(text("(?<a)").starts_with("Invalid group"));
    }

    #[test]
    fn test_display_dump() {
        let p = parse("a(b)*").unwrap();
        let dump = p.to_string();
        assert!(dump.starts_with("Pattern (1 capturing groups)\n"));
        assert!(dump.contains("....Term {0,} (groups 1..2)\n"));
        assert!(dump.contains("CapturingGroup 1\n"));
    }
}
