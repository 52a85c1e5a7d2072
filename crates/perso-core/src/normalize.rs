//! Bank label normalization
//!
//! Raw bank descriptions carry card fragments, operation prefixes and value
//! dates around the merchant name ("CARTE 12/01 CARREFOUR CB*6759"). The
//! normalizer strips that noise so that repeated purchases at the same
//! merchant produce the same string.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Card suffix (last four digits) to member name
pub type CardMap = HashMap<String, String>;

/// `DD/MM`, `DD/MM/YY` and `DD/MM/YYYY` value dates
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}(/\d{2,4})?").expect("valid regex"));

/// Operation prefixes, with an optional `*1234` card fragment
static BANK_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(CARTE|CB|PRLV|SEPA|VIR)\b\*?\d*").expect("valid regex")
});

/// References and card numbers
static LONG_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4,}\b").expect("valid regex"));

static CARD_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CB\*(\d{4})").expect("valid regex"));

/// Normalize a raw bank label to a merchant-like string.
///
/// ```
/// use perso_core::normalize::normalize_label;
///
/// assert_eq!(normalize_label("CARREFOUR CB*6759"), "Carrefour");
/// assert_eq!(normalize_label("PRLV SEPA FREE MOBILE 12/01/24"), "Free Mobile");
/// ```
pub fn normalize_label(label: &str) -> String {
    let mut current = strip_noise(label);

    // Removing a fragment can splice its neighbours into a new one
    // ("123/456/78" leaves "16/78"), so repeat until nothing changes.
    loop {
        let next = strip_noise(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One pass of noise removal, trimming and casing
fn strip_noise(label: &str) -> String {
    let label = DATE_RE.replace_all(label, "");
    let label = BANK_PREFIX_RE.replace_all(&label, "");
    let label = LONG_NUMBER_RE.replace_all(&label, "");

    let trimmed = label.trim_matches(|c: char| !c.is_ascii_alphanumeric());
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");

    title_case(&collapsed)
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word restarts after any character that is not a letter, so
/// `"l'atelier 3m"` becomes `"L'Atelier 3M"`. When the upper-case form of
/// the first letter has several characters (`ß` is `SS`), only the first
/// one stays upper-case: `"ßa"` becomes `"Ssa"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            out.extend(upper.flat_map(char::to_lowercase));
        }
        prev_letter = c.is_alphabetic();
    }
    out
}

/// Last four digits of a `CB*NNNN` card fragment, if present
pub fn card_suffix(label: &str) -> Option<&str> {
    CARD_SUFFIX_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Household member who used the card found in `label`.
///
/// Unknown cards are reported as `"Carte NNNN"`; labels without a card
/// fragment yield `None`.
pub fn extract_card_member(label: &str, card_map: &CardMap) -> Option<String> {
    let suffix = card_suffix(label)?;
    Some(
        card_map
            .get(suffix)
            .cloned()
            .unwrap_or_else(|| format!("Carte {}", suffix)),
    )
}
