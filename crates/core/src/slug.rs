//! URL slug generation.
//!
//! Cyrillic letters are transliterated to Latin one character at a time, the
//! result is lowercased and everything outside `[a-z0-9-]` is dropped.
//! Uniqueness is not checked here; the `uq_*_slug` constraints report
//! collisions at write time.

use std::sync::LazyLock;

use regex::Regex;

/// Returned when nothing usable survives normalization.
pub const FALLBACK_SLUG: &str = "item";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));
static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// Latin replacement for a single Cyrillic letter, or `None` when `c` is not
/// a mapped letter. Soft and hard signs map to the empty string.
fn transliterate(c: char) -> Option<&'static str> {
    let mapped = match c.to_lowercase().next().unwrap_or(c) {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

/// Produce a URL-safe slug from free text.
///
/// # Examples
///
/// ```
/// use itam_core::slug::generate;
/// assert_eq!(generate("Team Alpha"), "team-alpha");
/// assert_eq!(generate("Хакатон 2024"), "hakaton-2024");
/// assert_eq!(generate("!!!"), "item");
/// ```
pub fn generate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }

    let lowered = out.to_lowercase().replace(' ', "-");
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let collapsed = DASH_RUNS.replace_all(&stripped, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
