use crate::exec;
use crate::indexing::Input;
use crate::matcher::{self, CompiledMatcher};
use crate::parse;
use crate::util::is_syntax_char;

use core::{fmt, ops, str::FromStr};
use std::sync::Arc;

pub use parse::Error;

/// Flags used to control regex parsing and matching.
/// The default flags are case-sensitive, not-multiline, not-global and
/// not-sticky.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// If set, exec() searches from last_index and updates it.
    /// Equivalent to the 'g' flag in JavaScript.
    pub global: bool,

    /// If set, make the regex case-insensitive.
    /// Equivalent to the 'i' flag in JavaScript.
    pub ignore_case: bool,

    /// If set, ^ and $ match at line terminators, not just the input boundaries.
    /// Equivalent to the 'm' flag in JavaScript.
    pub multiline: bool,

    /// If set, matches must begin exactly at last_index.
    /// Equivalent to the 'y' flag in JavaScript.
    pub sticky: bool,
}

impl Flags {
    /// Construct a Flags from a string of JavaScript flag letters.
    /// Letters other than g, i, m and y, or any letter given twice, are a
    /// SyntaxError.
    pub fn parse(s: &str) -> Result<Flags, Error> {
        let mut result = Flags::default();
        for c in s.chars() {
            let flag = match c {
                'g' => &mut result.global,
                'i' => &mut result.ignore_case,
                'm' => &mut result.multiline,
                'y' => &mut result.sticky,
                _ => return parse::error(format!("Invalid flag '{}' in \"{}\"", c, s)),
            };
            if *flag {
                return parse::error(format!("Duplicate flag '{}' in \"{}\"", c, s));
            }
            *flag = true;
        }
        Ok(result)
    }
}

impl FromStr for Flags {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Flags::parse(s)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.global {
            f.write_str("g")?;
        }
        if self.ignore_case {
            f.write_str("i")?;
        }
        if self.multiline {
            f.write_str("m")?;
        }
        if self.sticky {
            f.write_str("y")?;
        }
        Ok(())
    }
}

/// Range is used to express the extent of a match, as byte indexes into the
/// input string.
pub type Range = core::ops::Range<usize>;

/// An iterator type which yields `Match`es found in a string.
pub type Matches<'r, 't> = exec::Matches<'r, 't>;

/// A Match represents a portion of a string which was found to match a Regex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The total range of the match. Note this may be empty, if the regex
    /// matched an empty string.
    pub range: Range,

    /// The list of captures. This has length equal to the number of capturing
    /// groups in the regex. For each capture, if the value is None, that group
    /// did not match (for example, it was in a not-taken branch of an
    /// alternation). If the value is Some, the group did match with the
    /// enclosed range.
    pub captures: Vec<Option<Range>>,
}

impl Match {
    /// Access a group by index, using the convention of Python's group()
    /// function. Index 0 is the total match, index 1 is the first capture
    /// group.
    #[inline]
    pub fn group(&self, idx: usize) -> Option<Range> {
        if idx == 0 {
            Some(self.range.clone())
        } else {
            self.captures.get(idx - 1).cloned().flatten()
        }
    }

    /// Returns the range over the starting and ending byte offsets of the match in the haystack.
    ///
    /// This is a convenience function to work around
    /// the fact that Range does not support Copy.
    #[inline]
    pub fn range(&self) -> Range {
        self.range.clone()
    }

    /// Returns the starting byte offset of the match in the haystack.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns the ending byte offset of the match in the haystack.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Return an iterator over a Match. The first returned value is the total
    /// match, and subsequent values represent the capture groups.
    #[inline]
    pub fn groups(&self) -> Groups {
        Groups::new(self)
    }
}

/// An iterator over the capture groups of a [`Match`]
///
/// This struct is created by the [`groups`] method on [`Match`].
///
/// [`Match`]: ../struct.Match.html
/// [`groups`]: ../struct.Match.html#method.groups
#[derive(Clone)]
pub struct Groups<'m> {
    mat: &'m Match,
    i: usize,
    max: usize,
}

impl<'m> Groups<'m> {
    #[inline]
    fn new(mat: &'m Match) -> Self {
        Self {
            mat,
            i: 0,
            max: mat.captures.len() + 1,
        }
    }
}

impl Iterator for Groups<'_> {
    type Item = Option<Range>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let i = self.i;
        if i < self.max {
            self.i += 1;
            Some(self.mat.group(i))
        } else {
            None
        }
    }
}

/// The result of a successful exec(), shaped like a JavaScript match array.
/// Element 0 is the matched text, element n is capture group n, and groups
/// that did not participate are None.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArray<'t> {
    /// Byte offset in `input` where the match begins.
    pub index: usize,

    /// The string that was searched.
    pub input: &'t str,

    elements: Vec<Option<&'t str>>,
}

impl<'t> MatchArray<'t> {
    /// \return the number of elements: one more than the number of capturing
    /// groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false: element 0 is the matched text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// \return element \p idx, or None if it is out of range or the group did
    /// not participate.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&'t str> {
        self.elements.get(idx).copied().flatten()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Option<&'t str>] {
        &self.elements
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Option<&'t str>> {
        self.elements.iter()
    }
}

impl<'t> ops::Index<usize> for MatchArray<'t> {
    type Output = Option<&'t str>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.elements[idx]
    }
}

impl<'a, 't> IntoIterator for &'a MatchArray<'t> {
    type Item = &'a Option<&'t str>;
    type IntoIter = core::slice::Iter<'a, Option<&'t str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// A Regex is the compiled version of a pattern, plus the lastIndex used by
/// global and sticky searches.
#[derive(Debug, Clone)]
pub struct Regex {
    source: String,
    flags: Flags,
    cm: Arc<CompiledMatcher>,
    last_index: usize,
}

/// \return the pattern as it would appear between slashes.
fn source_text(pattern: &str) -> String {
    match pattern {
        "" => "(?:)".to_string(),
        "/" => "\\/".to_string(),
        _ => pattern.to_string(),
    }
}

impl Regex {
    /// Construct a regex by parsing `pattern` using the default flags.
    /// An Error may be returned if the syntax is invalid.
    /// Note that this is rather expensive; prefer to cache a Regex which is
    /// intended to be used more than once.
    #[inline]
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Self::with_options(pattern, Flags::default())
    }

    /// Construct a regex by parsing `pattern` with the JavaScript flag letters
    /// in `flags`.
    #[inline]
    pub fn with_flags(pattern: &str, flags: &str) -> Result<Regex, Error> {
        Self::with_options(pattern, Flags::parse(flags)?)
    }

    /// Construct a regex by parsing `pattern` with `flags`.
    /// An Error may be returned if the syntax is invalid.
    pub fn with_options(pattern: &str, flags: Flags) -> Result<Regex, Error> {
        let ast = parse::parse(pattern)?;
        let cm = matcher::compile(&ast, flags.multiline, flags.ignore_case)?;
        Ok(Regex {
            source: source_text(pattern),
            flags,
            cm: Arc::new(cm),
            last_index: 0,
        })
    }

    /// \return the pattern text, as it would appear between slashes.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn global(&self) -> bool {
        self.flags.global
    }

    #[inline]
    pub fn ignore_case(&self) -> bool {
        self.flags.ignore_case
    }

    #[inline]
    pub fn multiline(&self) -> bool {
        self.flags.multiline
    }

    #[inline]
    pub fn sticky(&self) -> bool {
        self.flags.sticky
    }

    /// \return the byte offset where the next global or sticky exec() starts.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    #[inline]
    pub fn set_last_index(&mut self, last_index: usize) {
        self.last_index = last_index
    }

    /// \return the number of capturing groups in the pattern.
    #[inline]
    pub fn capture_count(&self) -> usize {
        self.cm.n_capturing_parens()
    }

    /// Search `text` the way JavaScript's RegExp.prototype.exec does.
    ///
    /// Without the global or sticky flag, the search starts at 0 and
    /// last_index is left alone. Otherwise the search starts at last_index,
    /// which is moved to the end of the match, or reset to 0 on failure.
    ///
    ///  ```rust
    ///   use respec::Regex;
    ///   let mut re = Regex::with_flags(r"a(\d)", "g").unwrap();
    ///   let m = re.exec("a1 a2").unwrap();
    ///   assert_eq!(m.get(1), Some("1"));
    ///   assert_eq!(re.last_index(), 2);
    ///   assert_eq!(re.exec("a1 a2").unwrap().index, 3);
    ///   assert!(re.exec("a1 a2").is_none());
    ///   assert_eq!(re.last_index(), 0);
    ///   ```
    pub fn exec<'t>(&mut self, text: &'t str) -> Option<MatchArray<'t>> {
        let uses_last_index = self.flags.global || self.flags.sticky;
        let start = if uses_last_index { self.last_index } else { 0 };
        let input = Input::new(text);
        let found = if start > text.len() {
            None
        } else {
            self.cm
                .search(&input, input.index_at_or_after(start), self.flags.sticky)
        };
        let (begin, state) = match found {
            Some(found) => found,
            None => {
                if uses_last_index {
                    self.last_index = 0;
                }
                return None;
            }
        };
        let end = state.end_index();
        if uses_last_index {
            self.last_index = end;
        }
        let mut elements = Vec::with_capacity(state.capture_count());
        elements.push(Some(input.slice(begin..end)));
        for idx in 1..state.capture_count() {
            elements.push(state.capture(idx).map(|r| input.slice(r)));
        }
        Some(MatchArray {
            index: begin,
            input: text,
            elements,
        })
    }

    /// \return whether exec() finds a match. last_index is updated the same
    /// way.
    #[inline]
    pub fn test(&mut self, text: &str) -> bool {
        self.exec(text).is_some()
    }

    /// Searches `text` to find the first match.
    #[inline]
    pub fn find(&self, text: &str) -> Option<Match> {
        self.find_iter(text).next()
    }

    /// Searches `text`, returning an iterator over non-overlapping matches.
    /// Note that the resulting Iterator borrows both the regex `'r` and the
    /// input string as `'t`.
    #[inline]
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        self.find_from(text, 0)
    }

    /// Returns an iterator for matches found in 'text' starting at byte index
    /// `start`. Unlike slicing `text`, `^` and `\b` still see the characters
    /// before `start`.
    /// Example:
    ///
    ///  ```rust
    ///   use respec::Regex;
    ///   let text = "xyxy";
    ///   let re = Regex::new(r"\by").unwrap();
    ///   assert!(re.find(&text[1..]).is_some());
    ///   assert!(re.find_from(text, 1).next().is_none());
    ///   ```
    #[inline]
    pub fn find_from<'r, 't>(&'r self, text: &'t str, start: usize) -> Matches<'r, 't> {
        exec::Matches::new(&self.cm, text, start, self.flags.sticky)
    }

    /// Split `text` around matches of this regex, the way JavaScript's
    /// String.prototype.split does. Captures are spliced into the result, with
    /// None for groups that did not participate. At most `limit` pieces are
    /// returned.
    ///
    ///  ```rust
    ///   use respec::Regex;
    ///   let re = Regex::new(r"\s*(,)\s*").unwrap();
    ///   assert_eq!(
    ///       re.split("a , b,c", None),
    ///       vec![Some("a"), Some(","), Some("b"), Some(","), Some("c")]
    ///   );
    ///   ```
    pub fn split<'t>(&self, text: &'t str, limit: Option<usize>) -> Vec<Option<&'t str>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut pieces = Vec::new();
        if limit == 0 {
            return pieces;
        }
        let input = Input::new(text);
        let size = input.len();
        if size == 0 {
            if self.cm.match_at(&input, 0).is_none() {
                pieces.push(Some(text));
            }
            return pieces;
        }

        // p is the start of the current piece, q the position being tried.
        let mut p = 0;
        let mut q = p;
        while q != size {
            let z = match self.cm.match_at(&input, q) {
                Some(z) => z,
                None => {
                    q = input.next_pos(q);
                    continue;
                }
            };
            let e = z.end_index();
            if e == p {
                q = input.next_pos(q);
                continue;
            }
            pieces.push(Some(input.slice(p..q)));
            if pieces.len() == limit {
                return pieces;
            }
            p = e;
            for idx in 1..z.capture_count() {
                pieces.push(z.capture(idx).map(|r| input.slice(r)));
                if pieces.len() == limit {
                    return pieces;
                }
            }
            q = p;
        }
        pieces.push(Some(input.slice(p..size)));
        pieces
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}

impl fmt::Display for Regex {
    /// Render as a JavaScript regex literal, like `/a+/gi`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Escape every regex syntax character in `text` with a backslash, so that
/// the result matches `text` literally.
///
///  ```rust
///   use respec::{escape, Regex};
///   let re = Regex::new(&escape("1+1=2?")).unwrap();
///   assert!(re.find("is 1+1=2?").is_some());
///   ```
pub fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if is_syntax_char(c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// The layers under Regex: parse a pattern to an AST, compile the AST to a
/// matcher, and run the matcher at one position of an input.
///
///  ```rust
///   use respec::backends::{compile, parse, Input};
///   let pattern = parse("a(b)?").unwrap();
///   let cm = compile(&pattern, false, false).unwrap();
///   let input = Input::new("xab");
///   assert!(cm.match_at(&input, 0).is_none());
///   let state = cm.match_at(&input, 1).unwrap();
///   assert_eq!(state.end_index(), 3);
///   assert_eq!(state.capture(1), Some(2..3));
///   ```
pub mod backends {
    pub use crate::indexing::Input;
    pub use crate::matcher::{compile, CompiledMatcher, Continuation, MatchResult, State};
    pub use crate::parse::parse;
}
