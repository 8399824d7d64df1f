use std::cmp::Ordering;
use std::fmt;

/// A user count as typed or imported.
///
/// Text without a leading non-negative integer is kept verbatim in `Invalid`
/// so the grid can show it back while editing and so downstream code can
/// report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserCount {
    Count(u64),
    Invalid(String),
}

impl UserCount {
    /// Best effort: trims whitespace, skips an optional `+`, then reads the
    /// leading run of digits and ignores the rest ("1500.0" -> 1500,
    /// "42 users" -> 42).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        match unsigned[..end].parse::<u64>() {
            Ok(n) => UserCount::Count(n),
            Err(_) => UserCount::Invalid(raw.to_string()),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, UserCount::Count(_))
    }

    /// Text for an inline edit box.
    pub fn edit_text(&self) -> String {
        match self {
            UserCount::Count(n) => n.to_string(),
            UserCount::Invalid(raw) => raw.clone(),
        }
    }
}

impl Default for UserCount {
    fn default() -> Self {
        UserCount::Count(0)
    }
}

/// Valid counts ascend numerically; every invalid value sorts after them.
impl Ord for UserCount {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (UserCount::Count(a), UserCount::Count(b)) => a.cmp(b),
            (UserCount::Count(_), UserCount::Invalid(_)) => Ordering::Less,
            (UserCount::Invalid(_), UserCount::Count(_)) => Ordering::Greater,
            (UserCount::Invalid(a), UserCount::Invalid(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for UserCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for UserCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserCount::Count(n) => write!(f, "{}", format_grouped(*n)),
            UserCount::Invalid(raw) => write!(f, "invalid ({:?})", raw),
        }
    }
}

/// Formats with comma thousands separators: 1234567 -> "1,234,567".
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One row of the data grid: a state or province and its user count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRecord {
    /// Positional id. Not unique across edits; re-import renumbers from 1.
    pub id: u64,
    pub state_province: String,
    /// Join key against boundary feature names (exact, case-sensitive).
    pub country: String,
    pub total_users: UserCount,
}

impl RegionRecord {
    pub fn new(
        id: u64,
        state_province: impl Into<String>,
        country: impl Into<String>,
        total_users: u64,
    ) -> Self {
        Self {
            id,
            state_province: state_province.into(),
            country: country.into(),
            total_users: UserCount::Count(total_users),
        }
    }
}

/// The editable fields of a [`RegionRecord`], carrying the new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionField {
    StateProvince(String),
    Country(String),
    TotalUsers(UserCount),
}

impl RegionRecord {
    pub fn with_field(&self, field: RegionField) -> Self {
        let mut next = self.clone();
        match field {
            RegionField::StateProvince(v) => next.state_province = v,
            RegionField::Country(v) => next.country = v,
            RegionField::TotalUsers(v) => next.total_users = v,
        }
        next
    }
}

/// New list with the record at `index` updated. Out of range returns the list unchanged.
pub fn with_field_edit(records: &[RegionRecord], index: usize, field: RegionField) -> Vec<RegionRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if i == index {
                r.with_field(field.clone())
            } else {
                r.clone()
            }
        })
        .collect()
}

/// New list without the record at `index`.
pub fn without_index(records: &[RegionRecord], index: usize) -> Vec<RegionRecord> {
    records
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, r)| r.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RegionRecord> {
        vec![
            RegionRecord::new(1, "California", "USA", 1_000_000),
            RegionRecord::new(2, "New York", "USA", 800_000),
            RegionRecord::new(3, "Ontario", "Canada", 500_000),
            RegionRecord::new(4, "England", "United Kingdom", 2_000_000),
        ]
    }

    #[test]
    fn test_parse_user_count() {
        assert_eq!(UserCount::parse("1000000"), UserCount::Count(1_000_000));
        assert_eq!(UserCount::parse(" 42 \r"), UserCount::Count(42));
        assert_eq!(UserCount::parse("abc"), UserCount::Invalid("abc".into()));
        assert_eq!(UserCount::parse(""), UserCount::Invalid(String::new()));
        assert_eq!(UserCount::parse("-5"), UserCount::Invalid("-5".into()));
    }

    #[test]
    fn test_parse_reads_leading_digits() {
        assert_eq!(UserCount::parse("1500.0"), UserCount::Count(1500));
        assert_eq!(UserCount::parse("12abc"), UserCount::Count(12));
        assert_eq!(UserCount::parse(" 42 users"), UserCount::Count(42));
        assert_eq!(UserCount::parse("+7"), UserCount::Count(7));
        assert_eq!(UserCount::parse("1,000"), UserCount::Count(1));
        assert_eq!(UserCount::parse("users: 42"), UserCount::Invalid("users: 42".into()));
        assert_eq!(UserCount::parse(".5"), UserCount::Invalid(".5".into()));
        // Too large for a count
        let huge = "99999999999999999999999";
        assert_eq!(UserCount::parse(huge), UserCount::Invalid(huge.into()));
    }

    #[test]
    fn test_invalid_counts_sort_last() {
        let mut counts = vec![
            UserCount::Invalid("x".into()),
            UserCount::Count(5),
            UserCount::Count(1),
        ];
        counts.sort();
        assert_eq!(
            counts,
            vec![UserCount::Count(1), UserCount::Count(5), UserCount::Invalid("x".into())]
        );
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(1_000_000), "1,000,000");
        assert_eq!(format_grouped(12_345_678), "12,345,678");
    }

    #[test]
    fn test_delete_keeps_relative_order() {
        let records = sample();
        for i in 0..records.len() {
            let next = without_index(&records, i);
            assert_eq!(next.len(), records.len() - 1);
            let expected: Vec<_> = records
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, r)| r.clone())
                .collect();
            assert_eq!(next, expected);
        }
    }

    #[test]
    fn test_field_edit_touches_one_record() {
        let records = sample();
        let next = with_field_edit(&records, 2, RegionField::Country("Canadaa".into()));
        assert_eq!(next[2].country, "Canadaa");
        assert_eq!(next[2].state_province, "Ontario");
        assert_eq!(&next[..2], &records[..2]);
        assert_eq!(next[3], records[3]);

        let unchanged = with_field_edit(&records, 10, RegionField::Country("X".into()));
        assert_eq!(unchanged, records);
    }
}
