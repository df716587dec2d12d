//! City name sanitizing for the weather query string

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics from `input`: decompose to NFD and drop combining marks.
#[must_use]
pub fn remove_accents(input: &str) -> String {
    input.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Letters in the Unicode sense: general category `L*`. Letter-like symbols
/// such as `Ⓐ` (So) or `Ⅻ` (Nl) do not count.
#[must_use]
pub fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Turn a city name into a query token.
///
/// Accents are removed, everything but letters and whitespace is dropped,
/// and the remaining words are joined with `+`. `"São Paulo"` becomes
/// `"Sao+Paulo"`. Returns an empty string when no letters are left.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let letters: String = remove_accents(input)
        .chars()
        .filter(|c| is_letter(*c) || c.is_whitespace())
        .collect();

    letters.split_whitespace().collect::<Vec<_>>().join("+")
}
