//! A cursor over the pattern source.

use crate::parse::{error, Error};

/// Scanner owns the pattern's characters, a cursor into them, and the count
/// of capturing groups opened so far.
#[derive(Debug)]
pub(crate) struct Scanner {
    chars: Vec<char>,
    pos: usize,
    capturing_parens: usize,
}

impl Scanner {
    pub(crate) fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            capturing_parens: 0,
        }
    }

    /// \return the lookahead character, or None at the end of the pattern.
    #[inline]
    pub(crate) fn next(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// \return the character \p n positions past the lookahead.
    #[inline]
    pub(crate) fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    /// \return the unconsumed remainder of the pattern.
    pub(crate) fn rest(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }

    /// If the remaining input starts with \p s, consume it and return true.
    /// Otherwise leave the cursor alone and return false.
    pub(crate) fn try_pop(&mut self, s: &str) -> bool {
        let mut pos = self.pos;
        for c in s.chars() {
            if self.chars.get(pos) != Some(&c) {
                return false;
            }
            pos += 1;
        }
        self.pos = pos;
        true
    }

    /// Consume the lookahead character, which the caller has already inspected.
    #[inline]
    pub(crate) fn advance(&mut self) {
        debug_assert!(self.pos < self.chars.len(), "advanced past end of pattern");
        self.pos += 1;
    }

    /// \return the cursor position, for a later restore().
    #[inline]
    pub(crate) fn checkpoint(&self) -> usize {
        self.pos
    }

    /// Rewind the cursor to a position returned from checkpoint().
    #[inline]
    pub(crate) fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }

    /// Consume and return one character.
    pub(crate) fn pop(&mut self) -> Result<char, Error> {
        match self.next() {
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => error("Unexpected end of pattern"),
        }
    }

    /// Consume \p c, or raise a SyntaxError carrying \p msg and the remaining
    /// input.
    pub(crate) fn pop_or_syntax_error(&mut self, c: char, msg: &str) -> Result<(), Error> {
        let mut buf = [0; 4];
        if self.try_pop(c.encode_utf8(&mut buf)) {
            Ok(())
        } else {
            Err(self.syntax_error(msg))
        }
    }

    /// Greedily consume one or more decimal digits, returning their value.
    /// The value saturates rather than overflowing; leading zeros are fine.
    pub(crate) fn pop_decimal_digits(&mut self) -> Result<usize, Error> {
        let mut result: usize = 0;
        let mut count = 0;
        while let Some(digit) = self.next().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            count += 1;
            result = result.saturating_mul(10).saturating_add(digit as usize);
        }
        if count == 0 {
            return Err(self.syntax_error("Expected decimal digits"));
        }
        Ok(result)
    }

    /// \return the number of the capturing group being opened.
    /// Called once per capturing group, in source order, so numbering is
    /// 1-based and left-to-right.
    pub(crate) fn next_capturing_number(&mut self) -> usize {
        self.capturing_parens += 1;
        self.capturing_parens
    }

    /// \return the number of capturing groups opened so far.
    #[inline]
    pub(crate) fn capturing_parens(&self) -> usize {
        self.capturing_parens
    }

    /// Build a SyntaxError with \p msg and the remaining input.
    pub(crate) fn syntax_error(&self, msg: &str) -> Error {
        Error::Syntax(format!("{} at {:?}", msg, self.rest()))
    }
}

#[cfg(test)]
mod tests {
    use super::Scanner;

    #[test]
    fn try_pop_is_atomic() {
        let mut s = Scanner::new("(?:abc)");
        assert!(!s.try_pop("(?="));
        assert_eq!(s.next(), Some('('));
        assert!(s.try_pop("(?:"));
        assert_eq!(s.rest(), "abc)");
        assert!(!s.try_pop("abcd"));
        assert_eq!(s.rest(), "abc)");
    }

    #[test]
    fn checkpoint_and_restore() {
        let mut s = Scanner::new("\\u0041");
        let cp = s.checkpoint();
        assert!(s.try_pop("\\u"));
        s.advance();
        assert_eq!(s.rest(), "041");
        s.restore(cp);
        assert_eq!(s.rest(), "\\u0041");
    }

    #[test]
    fn pop_and_errors() {
        let mut s = Scanner::new("ab");
        assert_eq!(s.pop().unwrap(), 'a');
        assert!(s.pop_or_syntax_error(')', "Unbalanced parenthesis").is_err());
        assert_eq!(s.next(), Some('b'));
        assert!(s.pop_or_syntax_error('b', "unused").is_ok());
        assert!(s.pop().is_err());
        assert_eq!(s.next(), None);
    }

    #[test]
    fn decimal_digits() {
        let mut s = Scanner::new("0010,}");
        assert_eq!(s.pop_decimal_digits().unwrap(), 10);
        assert_eq!(s.next(), Some(','));
        assert!(s.pop_decimal_digits().is_err());

        let mut s = Scanner::new("99999999999999999999999999");
        assert_eq!(s.pop_decimal_digits().unwrap(), usize::MAX);
        assert_eq!(s.next(), None);
    }

    #[test]
    fn capturing_numbers() {
        let mut s = Scanner::new("");
        assert_eq!(s.capturing_parens(), 0);
        assert_eq!(s.next_capturing_number(), 1);
        assert_eq!(s.next_capturing_number(), 2);
        assert_eq!(s.capturing_parens(), 2);
    }

    #[test]
    fn syntax_error_mentions_remaining_input() {
        let s = Scanner::new("abc");
        let err = s.syntax_error("Oops");
        assert!(err.text().contains("Oops"));
        assert!(err.text().contains("abc"));
    }
}
