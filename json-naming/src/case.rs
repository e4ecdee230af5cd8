//! Conversion of identifiers into lower-case, separator-delimited text.
//!
//! Both built-in conventions come from the same routine, [`convert`], which takes the
//! separator pair as data:
//!
//! ```rust
//! use json_naming::case::{CaseExt, Separators, convert};
//!
//! assert_eq!(convert("DeltaFoxtrot", Separators::SNAKE), "delta_foxtrot");
//! assert_eq!("UTCZulu".to_kebab_case(), "utc-zulu");
//! ```

use std::borrow::Cow;

/// The pair of delimiter characters that defines one case convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separators {
    /// The separator that is emitted.
    pub primary: char,
    /// The separator that is accepted on input and normalized to `primary`.
    pub alternate: char,
}

impl Separators {
    /// snake_case: emits `_`, normalizes `-`.
    pub const SNAKE: Self = Self::new('_', '-');
    /// kebab-case: emits `-`, normalizes `_`.
    pub const KEBAB: Self = Self::new('-', '_');

    pub const fn new(primary: char, alternate: char) -> Self {
        Self { primary, alternate }
    }

    fn is_separator(&self, ch: char) -> bool {
        ch == self.primary || ch == self.alternate
    }
}

/// Convert `source` to lower-case text delimited by `separators.primary`.
///
/// Empty input is returned as-is without allocating. The conversion never fails.
pub fn convert(source: &str, separators: Separators) -> Cow<'_, str> {
    if source.is_empty() {
        return Cow::Borrowed(source);
    }

    let chars: Vec<char> = source.chars().collect();
    // A separator before every character is the worst case.
    let mut output = String::with_capacity(source.len() * 2);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            if !output.is_empty() && !output.ends_with(separators.primary) {
                output.push(separators.primary);
            }
            continue;
        }

        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == separators.primary {
            output.push(ch);
            continue;
        }

        if ch == separators.alternate {
            output.push(separators.primary);
            continue;
        }

        if output.is_empty() {
            output.extend(ch.to_lowercase());
            continue;
        }

        // Whitespace and separators have already emitted a separator.
        if !output.ends_with(separators.primary)
            && let Some(&next) = chars.get(i + 1)
            && !next.is_uppercase()
            && !next.is_numeric()
            && !separators.is_separator(next)
        {
            output.push(separators.primary);
        }

        output.extend(ch.to_lowercase());
    }

    let trimmed = output.trim_end_matches(separators.primary).len();
    output.truncate(trimmed);

    Cow::Owned(output)
}

/// Like [`convert`], for input that may be absent. `None` is returned unchanged.
pub fn convert_opt(source: Option<&str>, separators: Separators) -> Option<Cow<'_, str>> {
    source.map(|source| convert(source, separators))
}

/// Convert `source` to snake_case.
pub fn to_snake_case(source: &str) -> Cow<'_, str> {
    convert(source, Separators::SNAKE)
}

/// Convert `source` to kebab-case.
pub fn to_kebab_case(source: &str) -> Cow<'_, str> {
    convert(source, Separators::KEBAB)
}

/// Method-call form of the case conversions.
pub trait CaseExt {
    fn to_separated_case(&self, separators: Separators) -> String;

    fn to_snake_case(&self) -> String {
        self.to_separated_case(Separators::SNAKE)
    }

    fn to_kebab_case(&self) -> String {
        self.to_separated_case(Separators::KEBAB)
    }
}

impl CaseExt for str {
    fn to_separated_case(&self, separators: Separators) -> String {
        convert(self, separators).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAKE_CASES: &[(&str, &str)] = &[
        ("FooBar", "foo_bar"),
        ("fooBar", "foo_bar"),
        ("FOO_BAR", "foo_bar"),
        ("foo_bar", "foo_bar"),
        ("foo bar", "foo_bar"),
        ("FOOBar", "foo_bar"),
        ("  Alpha1_Bravo2_3Charlie  ", "alpha1_bravo2_3_charlie"),
        ("  Alpha1_Bravo2_Charlie3  ", "alpha1_bravo2_charlie3"),
    ];

    #[test]
    fn snake_case_scenarios() {
        for (source, expected) in SNAKE_CASES {
            assert_eq!(to_snake_case(source), *expected, "source: {source:?}");
        }
    }

    #[test]
    fn kebab_case_scenarios() {
        for (source, expected) in SNAKE_CASES {
            let source = source.replace('_', "-");
            let expected = expected.replace('_', "-");
            assert_eq!(to_kebab_case(&source), expected, "source: {source:?}");
        }
    }

    #[test]
    fn alternate_separator_is_normalized() {
        assert_eq!(to_snake_case("foo-bar"), "foo_bar");
        assert_eq!(to_kebab_case("foo_bar"), "foo-bar");
        assert_eq!(to_kebab_case("Alpha1_Bravo2_3Charlie"), "alpha1-bravo2-3-charlie");
    }

    #[test]
    fn empty_and_absent_input_is_unchanged() {
        assert!(matches!(to_snake_case(""), Cow::Borrowed("")));
        assert_eq!(convert_opt(None, Separators::SNAKE), None);
        assert_eq!(convert_opt(Some(""), Separators::KEBAB).as_deref(), Some(""));
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(to_snake_case("   \t   "), "");
        assert_eq!(to_kebab_case("   \t   "), "");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(to_snake_case("foo   bar"), "foo_bar");
        assert_eq!(to_snake_case("foo \t\n bar"), "foo_bar");
        assert_eq!(to_kebab_case("  Foo  Bar  "), "foo-bar");
    }

    #[test]
    fn acronyms_stay_together() {
        assert_eq!(to_snake_case("UTCZulu"), "utc_zulu");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("ID"), "id");
    }

    #[test]
    fn trailing_capital_is_not_split() {
        assert_eq!(to_snake_case("fooB"), "foob");
    }

    #[test]
    fn conversion_is_idempotent() {
        let inputs = [
            "FooBar",
            "fooBar",
            "FOO_BAR",
            "foo-bar",
            "FOOBar",
            "  Alpha1_Bravo2_3Charlie  ",
            "  Alpha1_Bravo2_Charlie3  ",
            "DeltaFoxtrot",
            "UTCZulu",
            "already_snake_case",
            "Mixed-Separators_AndCase",
            "With Spaces And\tTabs",
            "x",
            "X",
            "9Lives",
        ];

        for separators in [Separators::SNAKE, Separators::KEBAB] {
            for input in inputs {
                let once = convert(input, separators).into_owned();
                let twice = convert(&once, separators).into_owned();
                assert_eq!(once, twice, "input: {input:?}");
            }
        }
    }

    /// Idempotence covers letters, digits, whitespace and separators. Other punctuation is
    /// treated as a word start and gains a separator on a second pass.
    #[test]
    fn punctuation_is_not_idempotent() {
        let once = convert("a.B", Separators::SNAKE).into_owned();
        assert_eq!(once, "a.b");
        assert_eq!(convert(&once, Separators::SNAKE), "a_.b");

        assert_eq!(convert("a.B", Separators::KEBAB), "a.b");
        assert_eq!(convert("a.b", Separators::KEBAB), "a-.b");
    }

    #[test]
    fn extension_trait_matches_free_functions() {
        assert_eq!("DeltaFoxtrot".to_snake_case(), "delta_foxtrot");
        assert_eq!("DeltaFoxtrot".to_kebab_case(), "delta-foxtrot");
        assert_eq!(
            "DeltaFoxtrot".to_separated_case(Separators::new('.', ' ')),
            "delta.foxtrot"
        );
    }
}
