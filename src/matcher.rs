//! Compiles an AST into a tree of continuation-passing matcher closures.
//!
//! A Matcher takes the input, a State, and a Continuation. It tries to match
//! its piece of the pattern at the State's end index; on each way it succeeds
//! it calls the Continuation with the resulting State, and returns the first
//! non-failure result. Backtracking falls out of returning None and letting
//! the caller try its next alternative.
//!
//! Positions are byte offsets into the input, on char boundaries.

use crate::ast::*;
use crate::charclasses::{self, is_line_terminator, is_word_char};
use crate::codepointset::{CodePointSet, Interval};
use crate::folds::{canonicalize, canonicalize_set};
use crate::indexing::Input;
use crate::parse::{error, Error};
use crate::startpredicate::{self, StartPredicate};
use log::debug;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// An intermediate matcher state: a position in the input, and the captures
/// made so far. Captures are shared between states and copied on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    end_index: usize,
    captures: Rc<Vec<Option<Range<usize>>>>,
}

impl State {
    /// Construct a state at \p end_index with \p n_capturing_parens unset
    /// captures.
    pub fn new(end_index: usize, n_capturing_parens: usize) -> State {
        State {
            end_index,
            captures: Rc::new(vec![None; n_capturing_parens + 1]),
        }
    }

    /// \return the position just past what has been matched.
    #[inline]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// \return the byte range of capture group \p idx, or None if the
    /// group did not participate. Index 0 is unused.
    #[inline]
    pub fn capture(&self, idx: usize) -> Option<Range<usize>> {
        self.captures.get(idx).cloned().flatten()
    }

    /// \return the number of capture slots, including the unused slot 0.
    #[inline]
    pub fn capture_count(&self) -> usize {
        self.captures.len()
    }

    #[inline]
    fn with_end(self, end_index: usize) -> State {
        State {
            end_index,
            captures: self.captures,
        }
    }
}

/// A successful State, or None for failure.
pub type MatchResult = Option<State>;

/// The rest of the match, to be run after a matcher succeeds.
pub type Continuation<'c> = dyn Fn(State) -> MatchResult + 'c;

type MatcherFn = dyn Fn(&Input<'_>, State, &Continuation<'_>) -> MatchResult + Send + Sync;

type Matcher = Box<MatcherFn>;

/// Box a closure as a Matcher. Routing closures through here pins down their
/// argument types.
fn matcher<F>(f: F) -> Matcher
where
    F: Fn(&Input<'_>, State, &Continuation<'_>) -> MatchResult + Send + Sync + 'static,
{
    Box::new(f)
}

/// The result of compiling a Pattern.
pub struct CompiledMatcher {
    pub(crate) root: Matcher,
    pub(crate) n_capturing_parens: usize,
    pub(crate) start_predicate: StartPredicate,
}

impl fmt::Debug for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompiledMatcher")
            .field("n_capturing_parens", &self.n_capturing_parens)
            .field("start_predicate", &self.start_predicate)
            .finish_non_exhaustive()
    }
}

impl CompiledMatcher {
    /// \return the number of capturing groups in the pattern.
    pub fn n_capturing_parens(&self) -> usize {
        self.n_capturing_parens
    }
}

/// Parameters of a quantified term.
#[derive(Debug, Copy, Clone)]
struct Repeat {
    min: usize,
    max: Option<usize>,
    greedy: bool,
    paren_index: usize,
    paren_count: usize,
}

/// ES5 15.10.2.5 RepeatMatcher.
fn repeat_matcher(
    m: &MatcherFn,
    rep: Repeat,
    input: &Input<'_>,
    x: State,
    c: &Continuation<'_>,
) -> MatchResult {
    if rep.max == Some(0) {
        return c(x);
    }
    let x_end = x.end_index;
    let d = |y: State| -> MatchResult {
        // An iteration past the minimum must consume something.
        if rep.min == 0 && y.end_index == x_end {
            return None;
        }
        let next = Repeat {
            min: rep.min.saturating_sub(1),
            max: rep.max.map(|max| max - 1),
            ..rep
        };
        repeat_matcher(m, next, input, y, c)
    };

    // Each iteration starts with the term's own groups unset.
    let mut captures = Rc::clone(&x.captures);
    if rep.paren_count > 0 {
        let slots = Rc::make_mut(&mut captures);
        for slot in &mut slots[rep.paren_index..rep.paren_index + rep.paren_count] {
            *slot = None;
        }
    }
    let xr = State {
        end_index: x_end,
        captures,
    };

    if rep.min != 0 {
        return m(input, xr, &d);
    }
    if !rep.greedy {
        return c(x).or_else(|| m(input, xr, &d));
    }
    m(input, xr, &d).or_else(|| c(x))
}

/// RepeatMatcher for an atom which matches exactly one run of characters,
/// one per CharSet, and has no groups. Each iteration then succeeds in at
/// most one way and consumes something, so iterations are counted in a loop
/// and the continuation is tried at each count, instead of nesting a call per
/// iteration.
fn run_repeat_matcher(
    run: Vec<CharSet>,
    min: usize,
    max: Option<usize>,
    greedy: bool,
) -> Matcher {
    let max = max.unwrap_or(usize::MAX);
    matcher(move |input, x, c| {
        let iterate = |pos: usize| -> Option<usize> {
            let mut pos = pos;
            for set in &run {
                let ch = input.char_at(pos)?;
                if !set.matches(ch) {
                    return None;
                }
                pos += ch.len_utf8();
            }
            Some(pos)
        };

        if !greedy {
            let mut end = x.end_index;
            let mut count = 0;
            loop {
                if count >= min {
                    if let Some(r) = c(x.clone().with_end(end)) {
                        return Some(r);
                    }
                }
                if count == max {
                    return None;
                }
                end = iterate(end)?;
                count += 1;
            }
        }

        // ends[n] is the position after n iterations.
        let mut ends = vec![x.end_index];
        while ends.len() - 1 < max {
            match ends.last().and_then(|&pos| iterate(pos)) {
                Some(pos) => ends.push(pos),
                None => break,
            }
        }
        if ends.len() - 1 < min {
            return None;
        }
        ends[min..]
            .iter()
            .rev()
            .find_map(|&end| c(x.clone().with_end(end)))
    })
}

/// One character test of a CharacterSetMatcher.
/// Under ignoreCase, a character matches if its canonical form equals the
/// canonical form of some member; the set is canonicalized up front so that
/// is a single lookup.
#[derive(Debug, Clone)]
struct CharSet {
    cps: CodePointSet,
    invert: bool,
    ignore_case: bool,
}

impl CharSet {
    fn new(cps: CodePointSet, invert: bool, ignore_case: bool) -> CharSet {
        let cps = if ignore_case {
            canonicalize_set(&cps)
        } else {
            cps
        };
        CharSet {
            cps,
            invert,
            ignore_case,
        }
    }

    #[inline]
    fn matches(&self, ch: char) -> bool {
        let cc = if self.ignore_case {
            canonicalize(ch)
        } else {
            ch
        };
        self.cps.contains(cc as u32) != self.invert
    }
}

/// ES5 15.10.2.6 IsWordChar applied on both sides of \p e.
/// Outside the input there are no word characters.
fn is_word_boundary(input: &Input<'_>, e: usize) -> bool {
    let before = input.char_before(e).map_or(false, is_word_char);
    let after = input.char_at(e).map_or(false, is_word_char);
    before != after
}

struct Compiler {
    multiline: bool,
    ignore_case: bool,
    n_capturing_parens: usize,
}

impl Compiler {
    /// ES5 15.10.2.3 Disjunction.
    fn compile_disjunction(&self, dis: &Disjunction) -> Result<Matcher, Error> {
        let m1 = self.compile_alternative(&dis.alternative)?;
        let m2 = match &dis.disjunction {
            None => return Ok(m1),
            Some(rest) => self.compile_disjunction(rest)?,
        };
        Ok(matcher(move |input, x, c| {
            m1(input, x.clone(), c).or_else(|| m2(input, x, c))
        }))
    }

    /// ES5 15.10.2.4 Alternative.
    fn compile_alternative(&self, alt: &Alternative) -> Result<Matcher, Error> {
        match alt {
            Alternative::Empty => Ok(matcher(|_, x, c| c(x))),
            Alternative::Sequence { term, alternative } => {
                let m1 = self.compile_term(term)?;
                if **alternative == Alternative::Empty {
                    return Ok(m1);
                }
                let m2 = self.compile_alternative(alternative)?;
                Ok(matcher(move |input, x, c| {
                    m1(input, x, &|y: State| m2(input, y, c))
                }))
            }
        }
    }

    /// ES5 15.10.2.5 Term.
    fn compile_term(&self, term: &Term) -> Result<Matcher, Error> {
        let (atom, quantifier) = match &term.kind {
            TermKind::Assertion(assertion) => return self.compile_assertion(assertion),
            TermKind::Atom { atom, quantifier } => (atom, quantifier),
        };
        let quantifier = match quantifier {
            None => return self.compile_atom(atom),
            Some(q) => q,
        };
        let (min, max) = quantifier.bounds();
        if max.map_or(false, |max| max < min) {
            return error(format!("Numbers out of order in quantifier {{{},{:?}}}", min, max));
        }
        if term.paren_index + term.paren_count > self.n_capturing_parens + 1 {
            return Err(Error::Internal(format!(
                "Term groups {}..{} exceed group count {}",
                term.paren_index,
                term.paren_index + term.paren_count,
                self.n_capturing_parens
            )));
        }
        if term.paren_count == 0 {
            if let Some(run) = self.character_run(atom)? {
                return Ok(run_repeat_matcher(run, min, max, !quantifier.lazy));
            }
        }
        let m = self.compile_atom(atom)?;
        let rep = Repeat {
            min,
            max,
            greedy: !quantifier.lazy,
            paren_index: term.paren_index,
            paren_count: term.paren_count,
        };
        Ok(matcher(move |input, x, c| repeat_matcher(&*m, rep, input, x, c)))
    }

    /// ES5 15.10.2.6 Assertion.
    fn compile_assertion(&self, assertion: &Assertion) -> Result<Matcher, Error> {
        let multiline = self.multiline;
        Ok(match assertion {
            Assertion::BeginningOfLine => matcher(move |input, x, c| {
                let e = x.end_index;
                let at_start = e == 0
                    || (multiline && input.char_before(e).map_or(false, is_line_terminator));
                if at_start {
                    c(x)
                } else {
                    None
                }
            }),
            Assertion::EndOfLine => matcher(move |input, x, c| {
                let e = x.end_index;
                let at_end = e == input.len()
                    || (multiline && input.char_at(e).map_or(false, is_line_terminator));
                if at_end {
                    c(x)
                } else {
                    None
                }
            }),
            Assertion::WordBoundary => matcher(|input, x, c| {
                if is_word_boundary(input, x.end_index) {
                    c(x)
                } else {
                    None
                }
            }),
            Assertion::NotWordBoundary => matcher(|input, x, c| {
                if is_word_boundary(input, x.end_index) {
                    None
                } else {
                    c(x)
                }
            }),
            Assertion::ZeroWidthPositive(dis) => {
                // Runs to completion on its own; the rest of the pattern
                // cannot backtrack into it. Its captures survive.
                let m = self.compile_disjunction(dis)?;
                matcher(move |input, x, c| {
                    let y = m(input, x.clone(), &Some)?;
                    c(State {
                        end_index: x.end_index,
                        captures: y.captures,
                    })
                })
            }
            Assertion::ZeroWidthNegative(dis) => {
                let m = self.compile_disjunction(dis)?;
                matcher(move |input, x, c| {
                    if m(input, x.clone(), &Some).is_some() {
                        return None;
                    }
                    c(x)
                })
            }
        })
    }

    /// ES5 15.10.2.8 Atom.
    fn compile_atom(&self, atom: &Atom) -> Result<Matcher, Error> {
        match atom {
            Atom::PatternCharacter(ch) => Ok(self.character_matcher(*ch)),
            Atom::Dot => Ok(self.character_set_matcher(charclasses::dot_codepoints(), false)),
            Atom::CharacterClass(cc) => {
                let cps = class_ranges_codepoints(&cc.ranges)?;
                Ok(self.character_set_matcher(cps, cc.inverted))
            }
            Atom::AtomEscape(AtomEscape::DecimalEscape(n)) => self.backreference_matcher(*n),
            Atom::AtomEscape(AtomEscape::CharacterEscape(ce)) => {
                Ok(self.character_matcher(ce.value()))
            }
            Atom::AtomEscape(AtomEscape::CharacterClassEscape(cce)) => Ok(self
                .character_set_matcher(
                    charclasses::codepoints_from_class(cce.class_type, cce.positive),
                    false,
                )),
            Atom::CapturingGroup {
                disjunction,
                capturing_number,
            } => {
                let paren_index = *capturing_number;
                if paren_index == 0 || paren_index > self.n_capturing_parens {
                    return Err(Error::Internal(format!(
                        "Capturing group {} out of range",
                        paren_index
                    )));
                }
                let m = self.compile_disjunction(disjunction)?;
                Ok(matcher(move |input, x, c| {
                    let x_end = x.end_index;
                    m(input, x, &|y: State| {
                        let State {
                            end_index,
                            mut captures,
                        } = y;
                        Rc::make_mut(&mut captures)[paren_index] = Some(x_end..end_index);
                        c(State {
                            end_index,
                            captures,
                        })
                    })
                }))
            }
            Atom::NonCapturingGroup(disjunction) => self.compile_disjunction(disjunction),
        }
    }

    /// \return the CharSets \p atom matches one after another, if \p atom is
    /// a character, a class, or a group of those with no alternation,
    /// quantifiers, or assertions. Otherwise None.
    fn character_run(&self, atom: &Atom) -> Result<Option<Vec<CharSet>>, Error> {
        let set = match atom {
            Atom::PatternCharacter(ch) => self.char_set(single_char_set(*ch), false),
            Atom::Dot => self.char_set(charclasses::dot_codepoints(), false),
            Atom::CharacterClass(cc) => {
                self.char_set(class_ranges_codepoints(&cc.ranges)?, cc.inverted)
            }
            Atom::AtomEscape(AtomEscape::CharacterEscape(ce)) => {
                self.char_set(single_char_set(ce.value()), false)
            }
            Atom::AtomEscape(AtomEscape::CharacterClassEscape(cce)) => self.char_set(
                charclasses::codepoints_from_class(cce.class_type, cce.positive),
                false,
            ),
            Atom::NonCapturingGroup(dis) if dis.disjunction.is_none() => {
                let mut run = Vec::new();
                for term in dis.alternative.terms() {
                    match &term.kind {
                        TermKind::Atom {
                            atom,
                            quantifier: None,
                        } => match self.character_run(atom)? {
                            Some(inner) => run.extend(inner),
                            None => return Ok(None),
                        },
                        _ => return Ok(None),
                    }
                }
                // An empty group needs the empty-iteration rule.
                return Ok(if run.is_empty() { None } else { Some(run) });
            }
            _ => return Ok(None),
        };
        Ok(Some(vec![set]))
    }

    fn char_set(&self, cps: CodePointSet, invert: bool) -> CharSet {
        CharSet::new(cps, invert, self.ignore_case)
    }

    fn character_matcher(&self, ch: char) -> Matcher {
        self.character_set_matcher(single_char_set(ch), false)
    }

    /// ES5 15.10.2.8 CharacterSetMatcher.
    fn character_set_matcher(&self, cps: CodePointSet, invert: bool) -> Matcher {
        let set = self.char_set(cps, invert);
        matcher(move |input, x, c| {
            let e = x.end_index;
            let ch = input.char_at(e)?;
            if !set.matches(ch) {
                return None;
            }
            c(x.with_end(e + ch.len_utf8()))
        })
    }

    /// ES5 15.10.2.9 AtomEscape, for a DecimalEscape.
    fn backreference_matcher(&self, n: usize) -> Result<Matcher, Error> {
        if n == 0 || n > self.n_capturing_parens {
            return error(format!(
                "Backreference \\{} exceeds number of capture groups",
                n
            ));
        }
        let ignore_case = self.ignore_case;
        Ok(matcher(move |input, x, c| {
            let s = match x.capture(n) {
                // A group that did not participate matches the empty string.
                None => return c(x),
                Some(s) => s,
            };
            // Canonical forms may differ in UTF-8 length, so walk both.
            let mut pos = x.end_index;
            for a in input.slice(s).chars() {
                let b = input.char_at(pos)?;
                if a != b && !(ignore_case && canonicalize(a) == canonicalize(b)) {
                    return None;
                }
                pos += b.len_utf8();
            }
            c(x.with_end(pos))
        }))
    }
}

fn single_char_set(ch: char) -> CodePointSet {
    let mut cps = CodePointSet::new();
    cps.add_one(ch as u32);
    cps
}

/// ES5 15.10.2.15 ClassRanges, flattened to a set of code points.
fn class_ranges_codepoints(ranges: &ClassRanges) -> Result<CodePointSet, Error> {
    let mut cps = CodePointSet::new();
    let mut next = match ranges {
        ClassRanges::Empty => None,
        ClassRanges::Nonempty(r) => Some(r.as_ref()),
    };
    while let Some(r) = next {
        next = match r {
            NonemptyClassRanges::Atom(atom) => {
                add_class_atom(&mut cps, atom);
                None
            }
            NonemptyClassRanges::AtomThen(atom, rest) => {
                add_class_atom(&mut cps, atom);
                Some(rest.as_ref())
            }
            NonemptyClassRanges::Range(lo, hi, rest) => {
                match (lo.single_char(), hi.single_char()) {
                    (Some(first), Some(last)) if first <= last => {
                        cps.add(Interval::new(first as u32, last as u32))
                    }
                    _ => return error(format!("Invalid character range {}-{}", lo, hi)),
                }
                match rest {
                    ClassRanges::Empty => None,
                    ClassRanges::Nonempty(r) => Some(r.as_ref()),
                }
            }
        };
    }
    Ok(cps)
}

fn add_class_atom(cps: &mut CodePointSet, atom: &ClassAtom) {
    match atom {
        ClassAtom::ClassEscape(ClassEscape::CharacterClassEscape(cce)) => cps.add_set(
            charclasses::codepoints_from_class(cce.class_type, cce.positive),
        ),
        _ => {
            if let Some(c) = atom.single_char() {
                cps.add_one(c as u32)
            }
        }
    }
}

/// Compile a parsed pattern into a matcher.
/// Fails with a SyntaxError for backreferences to nonexistent groups.
pub fn compile(
    pattern: &Pattern,
    multiline: bool,
    ignore_case: bool,
) -> Result<CompiledMatcher, Error> {
    let compiler = Compiler {
        multiline,
        ignore_case,
        n_capturing_parens: pattern.n_capturing_parens,
    };
    let root = compiler.compile_disjunction(&pattern.disjunction)?;
    let start_predicate = startpredicate::predicate_for_pattern(pattern, ignore_case);
    debug!(
        "compiled matcher: {} capturing groups, multiline={}, ignore_case={}, start predicate {:?}",
        pattern.n_capturing_parens, multiline, ignore_case, start_predicate
    );
    Ok(CompiledMatcher {
        root,
        n_capturing_parens: pattern.n_capturing_parens,
        start_predicate,
    })
}
