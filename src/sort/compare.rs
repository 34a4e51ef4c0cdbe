//! Sort keys and the row comparator.
//!
//! Cell texts are converted to numbers the way a browser's unary `+`
//! would: surrounding whitespace is ignored, an empty string is `0`,
//! `0x`/`0o`/`0b` prefixes are honoured, `Infinity` is recognised and
//! anything else that is not a plain decimal literal is `NaN`.
//!
//! Under [`ComparePolicy::Legacy`] two keys compare numerically only when
//! *both* numbers are truthy, i.e. neither `NaN` nor zero. A cell holding
//! `"0"` (or an empty cell) therefore compares as text against everything,
//! even against other numbers. Tables that relied on this ordering keep
//! it; [`ComparePolicy::Numeric`] opts into treating zero as a number.
//!
//! Identical texts compare `Equal` under both policies and the merge sort
//! keeps tied rows in their current order. Browsers that sort with a
//! comparator that never answers "equal" may instead reverse runs of tied
//! text keys; that ordering is not reproduced.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// How two cell values are compared when sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparePolicy {
    /// Numeric only when both values are non-zero numbers, otherwise text
    #[default]
    Legacy,
    /// Numeric whenever both values are numbers (zero included), otherwise text
    Numeric,
}

/// A cell text with its numeric reading, extracted once per row
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub text: String,
    pub number: f64,
}

impl SortKey {
    pub fn new(text: String) -> Self {
        let number = js_number(&text);
        Self { text, number }
    }
}

impl ComparePolicy {
    /// Whether `n` may take part in a numeric comparison
    fn admits(self, n: f64) -> bool {
        match self {
            ComparePolicy::Legacy => !n.is_nan() && n != 0.0,
            ComparePolicy::Numeric => !n.is_nan(),
        }
    }

    pub fn compare(self, a: &SortKey, b: &SortKey) -> Ordering {
        if self.admits(a.number) && self.admits(b.number) {
            // Infinity - Infinity is NaN in the browser, which sorts as equal
            return a.number.partial_cmp(&b.number).unwrap_or(Ordering::Equal);
        }
        a.text.cmp(&b.text)
    }
}

fn is_js_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Numeric value of `text` under the browser's string-to-number rules
pub fn js_number(text: &str) -> f64 {
    let s = text.trim_matches(is_js_space);
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_prefixed(s) {
        return value;
    }
    // Rust also accepts "inf" and "nan"; the browser does not
    let decimal_only = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_only {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`, `0o` and `0b` literals; no sign allowed
fn parse_prefixed(s: &str) -> Option<f64> {
    let mut chars = s.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next() {
        Some('x' | 'X') => 16,
        Some('o' | 'O') => 8,
        Some('b' | 'B') => 2,
        _ => return None,
    };
    let digits = chars.as_str();
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Stable merge sort that never panics on an inconsistent comparator.
///
/// The legacy policy mixes numeric and text comparisons, which is not a
/// total order (`"10" < "9"` as text but `9 < 10` as numbers). The result
/// for such inputs is deterministic but depends on the merge order.
pub(crate) fn merge_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort_by(left, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(a), Some(b)) => compare(a, b) == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("42", 42.0 ; "integer")]
    #[test_case("  -3.5\n", -3.5 ; "padded negative")]
    #[test_case("", 0.0 ; "empty is zero")]
    #[test_case("   ", 0.0 ; "blank is zero")]
    #[test_case(".5", 0.5 ; "leading dot")]
    #[test_case("1e3", 1000.0 ; "exponent")]
    #[test_case("0x1F", 31.0 ; "hex")]
    #[test_case("0b101", 5.0 ; "binary")]
    #[test_case("0o17", 15.0 ; "octal")]
    fn test_js_number(text: &str, expected: f64) {
        assert_eq!(js_number(text), expected);
    }

    #[test_case("abc" ; "word")]
    #[test_case("12px" ; "unit suffix")]
    #[test_case("inf" ; "rust infinity spelling")]
    #[test_case("NaN" ; "nan literal")]
    #[test_case("-0x10" ; "signed hex")]
    #[test_case("0x" ; "bare prefix")]
    #[test_case("1,000" ; "grouping comma")]
    fn test_js_number_nan(text: &str) {
        assert!(js_number(text).is_nan());
    }

    #[test]
    fn test_js_number_infinity() {
        assert_eq!(js_number("Infinity"), f64::INFINITY);
        assert_eq!(js_number("-Infinity"), f64::NEG_INFINITY);
    }

    fn key(s: &str) -> SortKey {
        SortKey::new(s.to_string())
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let policy = ComparePolicy::Legacy;
        assert_eq!(policy.compare(&key("9"), &key("10")), Ordering::Less);
        assert_eq!(policy.compare(&key("-2"), &key("1.5")), Ordering::Less);
    }

    #[test]
    fn test_legacy_zero_falls_back_to_text() {
        let policy = ComparePolicy::Legacy;
        // As numbers 0 < 0.5; as text "." sorts before "0"
        assert_eq!(policy.compare(&key("0"), &key(".5")), Ordering::Greater);
        assert_eq!(policy.compare(&key("0"), &key("-1")), Ordering::Greater);
    }

    #[test]
    fn test_numeric_policy_treats_zero_as_number() {
        let policy = ComparePolicy::Numeric;
        assert_eq!(policy.compare(&key("0"), &key(".5")), Ordering::Less);
        assert_eq!(policy.compare(&key("0"), &key("-1")), Ordering::Greater);
        assert_eq!(policy.compare(&key("0"), &key("abc")), Ordering::Less);
    }

    #[test_case(ComparePolicy::Legacy, "a" ; "legacy text")]
    #[test_case(ComparePolicy::Legacy, "0" ; "legacy zero")]
    #[test_case(ComparePolicy::Numeric, "abc" ; "numeric text")]
    fn test_identical_texts_are_equal(policy: ComparePolicy, text: &str) {
        assert_eq!(policy.compare(&key(text), &key(text)), Ordering::Equal);
    }

    #[test]
    fn test_text_comparison_is_case_sensitive() {
        let policy = ComparePolicy::Legacy;
        assert_eq!(policy.compare(&key("Zed"), &key("apple")), Ordering::Less);
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = merge_sort_by(items, &mut |x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn test_merge_sort_tolerates_non_transitive_order() {
        let keys: Vec<SortKey> = ["10", "9", "0", "abc", "", "2", "0"]
            .iter()
            .map(|s| key(s))
            .collect();
        let sorted = merge_sort_by(keys, &mut |a, b| ComparePolicy::Legacy.compare(a, b));
        assert_eq!(sorted.len(), 7);
    }
}
