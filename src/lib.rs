/*!

# respec - ECMAScript 5 regular expressions in Rust

This crate provides a regular expression engine which follows the ECMAScript 5.1 (15.10) RegExp semantics:
patterns are parsed into an abstract syntax tree, and the tree is compiled into continuation-passing matcher closures
that backtrack exactly the way the ECMAScript algorithm does.

# Example: test if a string contains a match

```rust
use respec::Regex;
let re = Regex::new(r"\d{4}").unwrap();
let matched = re.find("2020-20-05").is_some();
assert!(matched);
```

# Example: iterating over matches

Here we use a backreference to find doubled characters:

```rust
use respec::Regex;
let re = Regex::new(r"(\w)\1").unwrap();
let text = "Frankly, Miss Piggy, I don't give a hoot!";
for m in re.find_iter(text) {
    println!("{}", &text[m.range()])
}
// Output: ss
// Output: gg
// Output: oo

```

# Example: JavaScript-style exec

`Regex::exec` returns a match array like JavaScript's, and follows the `lastIndex` protocol for the `g` and `y` flags.

```rust
use respec::Regex;
let mut re = Regex::with_flags(r"(z)((a+)?(b+)?(c))*", "").unwrap();
let m = re.exec("zaacbbbcac").unwrap();
assert_eq!(
    m.as_slice(),
    &[Some("zaacbbbcac"), Some("z"), Some("ac"), Some("a"), None, Some("c")]
);
```

Note that group 4 is `None`: each iteration of a quantified group starts with its inner captures cleared.

# Supported Syntax

respec targets ECMAScript 5.1 syntax: alternation, greedy and lazy quantifiers, capturing and non-capturing groups,
backreferences, lookahead assertions, character classes and the `\d \s \w` escapes. The flags are `g`, `i`, `m` and `y`.

Later additions such as lookbehind, named groups, the `u` and `s` flags and Unicode property escapes are not supported.

# Unicode remarks

Matching operates on Unicode code points. All positions reported by the API are byte offsets into the `&str` that was searched.

Case-insensitive matching uses the ECMAScript 5 Canonicalize operation: characters are compared by their uppercase forms,
and a non-ASCII character never matches an ASCII one.

```rust
use respec::Regex;
let re = Regex::with_flags("\u{00E9}", "i").unwrap();
assert!(re.find("\u{00C9}").is_some());
let re = Regex::with_flags("s", "i").unwrap();
assert!(re.find("\u{017F}").is_none());
```

# Architecture

respec has a scanner, a recursive-descent parser producing an AST, a compiler from the AST into matcher closures, and a
driver which runs the root matcher at successive positions. The lower layers are available in [`backends`].

Quantified characters, classes and groups of plain characters (`a*`, `.*`, `(?:ab)+`) repeat in a loop. Other quantified
groups recurse once per iteration, so repeating those thousands of times needs a correspondingly large stack.

*/

#![warn(clippy::all)]
#![allow(clippy::upper_case_acronyms, clippy::match_like_matches_macro)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

pub use crate::api::*;

mod util;

pub mod ast;

mod api;
mod charclasses;
mod codepointset;
mod exec;
mod folds;
mod indexing;
mod matcher;
mod parse;
mod scanner;
mod startpredicate;
mod unicode;
