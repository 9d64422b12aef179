//! Sequential case identifiers.
//!
//! Identifiers have the form `CASO-NNNN`: a fixed prefix followed by a
//! decimal sequence number zero-padded to four digits. Numbers of five or
//! more digits widen naturally.

/// Prefix shared by every case identifier.
pub const CASE_ID_PREFIX: &str = "CASO-";

/// Extracts the sequence number of an identifier.
///
/// Returns `None` for anything that is not the prefix followed by a
/// non-negative decimal integer.
///
/// # Examples
///
/// ```
/// use kuntur_persistence::core::identifier::parse_case_number;
///
/// assert_eq!(parse_case_number("CASO-0042"), Some(42));
/// assert_eq!(parse_case_number("CASO-12345"), Some(12345));
/// assert_eq!(parse_case_number("CASO-abc"), None);
/// assert_eq!(parse_case_number("0042"), None);
/// ```
pub fn parse_case_number(id_caso: &str) -> Option<u64> {
    let digits = id_caso.strip_prefix(CASE_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Formats a sequence number as an identifier.
pub fn format_case_id(number: u64) -> String {
    format!("{CASE_ID_PREFIX}{number:04}")
}

/// Returns the identifier following the highest one among `existing`.
///
/// Malformed identifiers are ignored. With no valid identifier the
/// sequence starts at 1.
pub fn next_case_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing
        .into_iter()
        .filter_map(parse_case_number)
        .max()
        .map_or(1, |max| max.saturating_add(1));
    format_case_id(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_starts_at_one() {
        assert_eq!(next_case_id(std::iter::empty()), "CASO-0001");
    }

    #[test]
    fn test_max_plus_one() {
        let ids = ["CASO-0003", "CASO-0001", "CASO-0002"];
        assert_eq!(next_case_id(ids), "CASO-0004");
    }

    #[test]
    fn test_gaps_follow_maximum() {
        let ids = ["CASO-0001", "CASO-0010"];
        assert_eq!(next_case_id(ids), "CASO-0011");
    }

    #[test]
    fn test_malformed_ignored() {
        let ids = ["CASO-abc", "caso-0005", "CASO-", "CASO--3", "CASO-+7", "CASO-0002"];
        assert_eq!(next_case_id(ids), "CASO-0003");
    }

    #[test]
    fn test_all_malformed_starts_at_one() {
        let ids = ["X-1", "", "CASO-1.5"];
        assert_eq!(next_case_id(ids), "CASO-0001");
    }

    #[test]
    fn test_widens_past_four_digits() {
        assert_eq!(next_case_id(["CASO-9999"]), "CASO-10000");
        assert_eq!(format_case_id(7), "CASO-0007");
    }

    #[test]
    fn test_saturates_at_max() {
        let max = format_case_id(u64::MAX);
        assert_eq!(next_case_id([max.as_str()]), max);
    }

    #[test]
    fn test_overflowing_suffix_is_malformed() {
        assert_eq!(parse_case_number("CASO-99999999999999999999999"), None);
    }
}
