use icu_properties::GeneralCategory;

/// \return whether \p c is an identifier part character for the purposes of
/// IdentityEscape validation: a member of one of the categories
/// Lu Ll Lt Lm Lo Nl Mn Mc Nd Pc.
/// Such characters may not be escaped with a bare backslash.
pub(crate) fn is_identifier_part(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric() || c == '_';
    }
    matches!(
        icu_properties::maps::general_category().get(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::LetterNumber
            | GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::DecimalNumber
            | GeneralCategory::ConnectorPunctuation
    )
}

#[cfg(test)]
mod tests {
    use super::is_identifier_part;

    #[test]
    fn ascii_identifier_parts() {
        for c in ['a', 'Z', '0', '9', '_'] {
            assert!(is_identifier_part(c), "{:?}", c);
        }
        for c in ['$', '-', '/', '.', ' ', '\\', '*', '\n'] {
            assert!(!is_identifier_part(c), "{:?}", c);
        }
    }

    #[test]
    fn unicode_identifier_parts() {
        // Letters, combining marks, digits and connector punctuation.
        for c in [
            '\u{00E9}', '\u{03BC}', '\u{4E2D}', '\u{0301}', '\u{0660}', '\u{203F}', '\u{2160}',
        ] {
            assert!(is_identifier_part(c), "{:?}", c);
        }
        // Symbols, spaces, format characters and other punctuation.
        for c in ['\u{00A7}', '\u{00A0}', '\u{200D}', '\u{2014}', '\u{20AC}'] {
            assert!(!is_identifier_part(c), "{:?}", c);
        }
    }
}
