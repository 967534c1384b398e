#![allow(clippy::uninlined_format_args)]

use respec::{escape, Regex};

#[test]
fn test_escape_basic() {
    assert_eq!(escape("hello"), "hello");
    assert_eq!(escape(""), "");
    assert_eq!(escape("abc123"), "abc123");
    // Characters with no special meaning outside a class are left alone.
    assert_eq!(escape("a-b/c,d=e"), "a-b/c,d=e");
}

#[test]
fn test_escape_special_characters() {
    for c in ['\\', '^', '$', '.', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}'] {
        assert_eq!(escape(&c.to_string()), format!("\\{}", c));
    }
    assert_eq!(escape("$100 + tax (15%)"), "\\$100 \\+ tax \\(15%\\)");
    assert_eq!(escape("file.txt"), "file\\.txt");
}

#[test]
fn test_escape_with_regex() {
    let test_cases = [
        "Hello. How are you?",
        "$100 + tax (15%)",
        "a^b$c.d|e?f*g+h(i)j[k]l{m}n\\o",
        "C:\\Program Files\\MyApp",
        "[brackets] and {braces}",
        ".*+?|^$()[]{}\\",
        "caf\u{e9} \u{4f60}\u{597d} \u{1F31F}",
    ];

    for test_case in test_cases {
        let escaped = escape(test_case);
        let regex = Regex::new(&escaped)
            .unwrap_or_else(|_| panic!("Failed to create regex for: {}", escaped));

        // The escaped pattern matches exactly the original string.
        let haystack = format!("<<{}>>", test_case);
        let m = regex
            .find(&haystack)
            .unwrap_or_else(|| panic!("{} should match {}", escaped, test_case));
        assert_eq!(&haystack[m.range()], test_case);
        assert_eq!(m.start(), 2);
    }
}

#[test]
fn test_escape_prevents_regex_interpretation() {
    let test_cases = [
        (".*", "\\.\\*", "abc"),
        ("a+", "a\\+", "aaa"),
        ("(abc)", "\\(abc\\)", "abc"),
        ("[abc]", "\\[abc\\]", "a"),
        ("a|b", "a\\|b", "b"),
        ("^start", "\\^start", "start"),
        ("end$", "end\\$", "end"),
    ];

    for (original, expected_escaped, decoy) in test_cases {
        let escaped = escape(original);
        assert_eq!(escaped, expected_escaped);

        let regex = Regex::new(&escaped).unwrap();
        assert!(regex.find(original).is_some());
        assert!(regex.find(decoy).is_none(), "{} matched {}", escaped, decoy);
    }
}
