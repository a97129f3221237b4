//! Value normalization applied while mapping entries.

use chrono::NaiveDate;

/// End-of-range tokens meaning "still ongoing" (matched case-insensitively).
pub const ONGOING_TOKENS: [&str; 4] = ["present", "ongoing", "current", "now"];

/// Rewrites every comma in a category as `" /"`.
///
/// Notion treats commas in select option names as separators, so
/// `"1.3.6 Awards, Lectureships, Prizes"` becomes
/// `"1.3.6 Awards / Lectureships / Prizes"`. Surrounding whitespace is
/// left exactly as it was.
#[must_use]
pub fn sanitize_category(category: &str) -> String {
    category.replace(',', " /")
}

/// Returns `true` if `token` is one of [`ONGOING_TOKENS`].
#[must_use]
pub fn is_ongoing(token: &str) -> bool {
    ONGOING_TOKENS
        .iter()
        .any(|ongoing| token.eq_ignore_ascii_case(ongoing))
}

/// Resolves a range end: ongoing tokens become `today`, anything else
/// passes through untouched.
#[must_use]
pub fn resolve_end_date(end: &str, today: NaiveDate) -> String {
    if is_ongoing(end) {
        format_date(today)
    } else {
        end.to_string()
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_case("1.3.6 Awards, Lectureships, Prizes", "1.3.6 Awards / Lectureships / Prizes" ; "comma and space")]
    #[test_case("A,B", "A /B" ; "bare comma")]
    #[test_case("1.2 Teaching", "1.2 Teaching" ; "no comma")]
    #[test_case(",", " /" ; "only comma")]
    fn test_sanitize_category(input: &str, expected: &str) {
        assert_eq!(sanitize_category(input), expected);
    }

    #[test_case("present" ; "present")]
    #[test_case("Present" ; "capitalized")]
    #[test_case("ONGOING" ; "upper")]
    #[test_case("current" ; "current")]
    #[test_case("now" ; "now")]
    fn test_ongoing_tokens_resolve_to_today(token: &str) {
        assert_eq!(resolve_end_date(token, day(2026, 3, 9)), "2026-03-09");
    }

    #[test_case("2023-12-31" ; "iso date")]
    #[test_case("present day" ; "token with suffix")]
    #[test_case(" now" ; "leading space")]
    #[test_case("" ; "empty")]
    fn test_other_ends_pass_through(end: &str) {
        assert_eq!(resolve_end_date(end, day(2026, 3, 9)), end);
    }
}
