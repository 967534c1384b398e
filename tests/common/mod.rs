#![allow(clippy::uninlined_format_args)]

use respec::backends::{compile, parse, Input};

/// Test that \p pattern fails to parse with default flags.
#[track_caller]
pub fn test_parse_fails(pattern: &str) {
    let res = respec::Regex::new(pattern);
    assert!(res.is_err(), "Pattern should not have parsed: {}", pattern);
}

/// Test that \p pattern fails to parse with flags.
#[track_caller]
pub fn test_parse_fails_flags(pattern: &str, flags: &str) {
    let res = respec::Regex::with_flags(pattern, flags);
    assert!(res.is_err(), "Pattern should not have parsed: {}", pattern);
}

/// Format a Match by inserting commas between all capture groups.
fn format_match(r: &respec::Match, input: &str) -> String {
    let mut result = input[r.range()].to_string();
    for cg in r.captures.iter() {
        result.push(',');
        if let Some(cg) = cg {
            result.push_str(&input[cg.clone()])
        }
    }
    result
}

pub trait StringTestHelpers {
    /// "Fluent" style helper for testing that a String is equal to a str.
    fn test_eq(&self, s: &str);
}

impl StringTestHelpers for String {
    #[track_caller]
    fn test_eq(&self, rhs: &str) {
        assert_eq!(self.as_str(), rhs)
    }
}

pub trait VecTestHelpers {
    /// "Fluent" style helper for testing that a Vec<&str> is equal to a
    /// Vec<&str>.
    fn test_eq(&self, rhs: Vec<&str>);
}

impl VecTestHelpers for Vec<&str> {
    #[track_caller]
    fn test_eq(&self, rhs: Vec<&str>) {
        assert_eq!(*self, rhs)
    }
}

/// A compiled regex which remembers a TestConfig.
#[derive(Debug, Clone)]
pub struct TestCompiledRegex {
    re: respec::Regex,
    pattern: String,
    flags: respec::Flags,
    tc: TestConfig,
}

impl TestCompiledRegex {
    /// Search for self in \p input, returning a list of all matches.
    #[track_caller]
    pub fn matches(&self, input: &str, start: usize) -> Vec<respec::Match> {
        match self.tc.driver {
            Driver::Facade => self.re.find_from(input, start).collect(),
            Driver::EveryPosition => self.matches_at_every_position(input, start),
        }
    }

    /// Run the compiled matcher at each position in turn, with no start
    /// predicate.
    fn matches_at_every_position(&self, text: &str, start: usize) -> Vec<respec::Match> {
        let pattern = parse(&self.pattern).expect("Pattern should parse");
        let cm = compile(&pattern, self.flags.multiline, self.flags.ignore_case)
            .expect("Pattern should compile");
        let input = Input::new(text);
        let mut result = Vec::new();
        let mut i = input.index_at_or_after(start);
        while i <= input.len() {
            let state = match cm.match_at(&input, i) {
                Some(state) => state,
                None => {
                    i = input.next_pos(i);
                    continue;
                }
            };
            let end = state.end_index();
            result.push(respec::Match {
                range: i..end,
                captures: (1..state.capture_count())
                    .map(|idx| state.capture(idx))
                    .collect(),
            });
            i = if end == i { input.next_pos(end) } else { end };
        }
        result
    }

    /// Search for self in \p input, returning the first Match, or None if
    /// none.
    pub fn find(&self, input: &str) -> Option<respec::Match> {
        self.matches(input, 0).into_iter().next()
    }

    /// Match against a string, returning the first formatted match.
    #[track_caller]
    pub fn match1f(&self, input: &str) -> String {
        match self.find(input) {
            Some(m) => format_match(&m, input),
            None => panic!("Failed to match {}", input),
        }
    }

    /// Match against a string, returning the match as a Vec containing None
    /// for unmatched groups, or the matched strings.
    #[track_caller]
    pub fn match1_vec<'b>(&self, input: &'b str) -> Vec<Option<&'b str>> {
        let mut result = Vec::new();
        let m: respec::Match = self.find(input).expect("Failed to match");
        result.push(Some(&input[m.range()]));
        for cr in m.captures {
            result.push(cr.map(|r| &input[r]));
        }
        result
    }

    /// Test that matching against \p input fails.
    #[track_caller]
    pub fn test_fails(&self, input: &str) {
        assert!(
            self.find(input).is_none(),
            "{} should not have matched {:?}",
            self.re,
            input
        )
    }

    /// Test that matching against \p input succeeds.
    #[track_caller]
    pub fn test_succeeds(&self, input: &str) {
        assert!(
            self.find(input).is_some(),
            "{} should have matched {:?}",
            self.re,
            input
        )
    }

    /// Return a list of all non-overlapping total match ranges from a given
    /// start.
    pub fn match_all_from(&self, input: &str, start: usize) -> Vec<respec::Range> {
        self.matches(input, start)
            .into_iter()
            .map(move |m| m.range())
            .collect()
    }

    /// Return a list of all non-overlapping matches.
    pub fn match_all<'b>(&self, input: &'b str) -> Vec<&'b str> {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| &input[m.range()])
            .collect()
    }

    /// Collect all matches into a String, separated by commas.
    pub fn run_global_match(&self, input: &str) -> String {
        self.matches(input, 0)
            .into_iter()
            .map(move |m| format_match(&m, input))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// How a test runs a regex.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Driver {
    /// Through Regex::find_from, which uses the start predicate.
    Facade,

    /// Through the backends module, trying every position.
    EveryPosition,
}

/// Description of how to test a regex.
#[derive(Debug, Copy, Clone)]
pub struct TestConfig {
    driver: Driver,
}

impl TestConfig {
    /// Compile a pattern to a regex, with default flags.
    #[track_caller]
    pub fn compile(&self, pattern: &str) -> TestCompiledRegex {
        self.compilef(pattern, "")
    }

    /// Compile a pattern to a regex, with given flags.
    #[track_caller]
    pub fn compilef(&self, pattern: &str, flags_str: &str) -> TestCompiledRegex {
        let re = respec::Regex::with_flags(pattern, flags_str);
        assert!(
            re.is_ok(),
            "Failed to parse! flags: {} pattern: {}, error: {}",
            flags_str,
            pattern,
            re.unwrap_err()
        );
        let re = re.unwrap();
        TestCompiledRegex {
            flags: re.flags(),
            re,
            pattern: pattern.to_string(),
            tc: *self,
        }
    }

    /// Test that \p pattern and \p flags successfully parses, and matches
    /// \p input.
    #[track_caller]
    pub fn test_match_succeeds(&self, pattern: &str, flags_str: &str, input: &str) {
        let cr = self.compilef(pattern, flags_str);
        cr.test_succeeds(input)
    }

    /// Test that \p pattern and \p flags successfully parses, and does not
    /// match \p input.
    #[track_caller]
    pub fn test_match_fails(&self, pattern: &str, flags_str: &str, input: &str) {
        let cr = self.compilef(pattern, flags_str);
        cr.test_fails(input)
    }
}

/// Invoke \p F with each test config, in turn.
pub fn test_with_configs<F>(func: F)
where
    F: Fn(TestConfig),
{
    func(TestConfig {
        driver: Driver::Facade,
    });
    func(TestConfig {
        driver: Driver::EveryPosition,
    });
}

/// Run exec() once and return the match array as owned strings, or None.
#[track_caller]
pub fn exec_vec(pattern: &str, flags: &str, input: &str) -> Option<Vec<Option<String>>> {
    let mut re = respec::Regex::with_flags(pattern, flags)
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", pattern, err));
    re.exec(input)
        .map(|m| m.iter().map(|e| e.map(str::to_string)).collect())
}

/// Shorthand for building an expected exec() result.
pub fn arr(elements: &[Option<&str>]) -> Option<Vec<Option<String>>> {
    Some(elements.iter().map(|e| e.map(str::to_string)).collect())
}
