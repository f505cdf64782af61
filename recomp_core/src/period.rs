//! Period selection and filtering.
//!
//! A period is either the literal token `"all"` or a `"YYYY-MM"` month.
//! Membership is a plain prefix test on the `YYYY-MM-DD` date string; no
//! calendar validation happens here, so a malformed date simply never
//! matches a month.

use crate::{Error, Result, WeighIn, Workout};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// The "every record" period token
pub const ALL: &str = "all";

/// Check whether a date string belongs to a period
///
/// `"all"` accepts everything, including a missing or empty date.
/// Any other period matches dates that start with it.
pub fn is_in_period(date: Option<&str>, period: &str) -> bool {
    if period == ALL {
        return true;
    }
    match date {
        Some(d) if !d.is_empty() => d.starts_with(period),
        _ => false,
    }
}

/// Records that can be filtered by period
pub trait Dated {
    fn date(&self) -> Option<&str>;
}

impl Dated for Workout {
    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

impl Dated for WeighIn {
    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }
}

/// Keep the records that fall in `period`, preserving their order
pub fn filter_by_period<T: Dated + Clone>(items: &[T], period: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| is_in_period(item.date(), period))
        .cloned()
        .collect()
}

pub fn filter_workouts_by_period(workouts: &[Workout], period: &str) -> Vec<Workout> {
    filter_by_period(workouts, period)
}

pub fn filter_metrics_by_period(metrics: &[WeighIn], period: &str) -> Vec<WeighIn> {
    filter_by_period(metrics, period)
}

/// Parse a `YYYY-MM` token into the first day of that month
fn parse_month(token: &str) -> Option<NaiveDate> {
    if token.len() != 7 {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{}-01", token), "%Y-%m-%d").ok()
}

/// True for `"all"` or a well-formed `YYYY-MM`
pub fn is_valid_period_token(token: &str) -> bool {
    token == ALL || parse_month(token).is_some()
}

/// Human label for a month token: `"2026-03"` → `"Mar 2026"`
pub fn month_label(token: &str) -> Option<String> {
    parse_month(token).map(|d| d.format("%b %Y").to_string())
}

// ============================================================================
// Period registry
// ============================================================================

/// Ordered token → label mapping of the periods a user can select
///
/// `"all"` is always first when present; month tokens follow in
/// lexicographic (and therefore chronological) order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct Periods {
    entries: Vec<(String, String)>,
}

impl Default for Periods {
    fn default() -> Self {
        Self::from_pairs([
            (ALL, "All Time"),
            ("2025-12", "Dec 2025"),
            ("2026-01", "Jan 2026"),
            ("2026-02", "Feb 2026"),
        ])
    }
}

impl From<BTreeMap<String, String>> for Periods {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut periods = Periods {
            entries: map.into_iter().collect(),
        };
        periods.sort();
        periods
    }
}

impl Serialize for Periods {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

impl Periods {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        map.into()
    }

    fn sort(&mut self) {
        self.entries
            .sort_by(|(a, _), (b, _)| {
                (a.as_str() != ALL, a.as_str()).cmp(&(b.as_str() != ALL, b.as_str()))
            });
    }

    /// Register a new month
    ///
    /// Rejects malformed tokens and tokens that already exist. When `label`
    /// is `None` the label is derived from the month ("Mar 2026").
    pub fn add_period(&mut self, key: &str, label: Option<&str>) -> Result<()> {
        if self.contains(key) {
            return Err(Error::Validation(format!("Month already exists: {}", key)));
        }
        let derived = month_label(key)
            .ok_or_else(|| Error::Validation(format!("Period must be YYYY-MM, got {:?}", key)))?;
        let label = label.map(str::to_string).unwrap_or(derived);

        self.entries.push((key.to_string(), label));
        self.sort();
        tracing::info!("Added period {}", key);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Label for display, falling back to the token itself
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.label(key).unwrap_or(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Month tokens in order, without `"all"`
    pub fn months(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| *k != ALL)
            .collect()
    }

    /// The month registered immediately before `key`
    ///
    /// `None` for `"all"`, for the earliest month, and for unknown tokens.
    pub fn previous(&self, key: &str) -> Option<&str> {
        let months = self.months();
        let idx = months.iter().position(|m| *m == key)?;
        idx.checked_sub(1).map(|i| months[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(id: i64, date: &str) -> Workout {
        Workout::new(id, date, "Upper Body")
    }

    #[test]
    fn test_all_accepts_everything() {
        assert!(is_in_period(Some("2025-12-01"), ALL));
        assert!(is_in_period(Some(""), ALL));
        assert!(is_in_period(Some("garbage"), ALL));
        assert!(is_in_period(None, ALL));
    }

    #[test]
    fn test_month_prefix_match() {
        assert!(is_in_period(Some("2025-12-01"), "2025-12"));
        assert!(!is_in_period(Some("2026-01-01"), "2025-12"));
        assert!(!is_in_period(Some(""), "2025-12"));
        assert!(!is_in_period(None, "2025-12"));
        // No calendar validation, only the prefix matters
        assert!(is_in_period(Some("2025-12-99"), "2025-12"));
        assert!(!is_in_period(Some("12/01/2025"), "2025-12"));
    }

    #[test]
    fn test_filter_preserves_order_and_is_exact() {
        let workouts = vec![
            workout(3, "2026-01-04"),
            workout(1, "2025-12-01"),
            workout(2, "2026-01-02"),
            workout(4, ""),
        ];

        for period in [ALL, "2025-12", "2026-01", "2026-02"] {
            let filtered = filter_workouts_by_period(&workouts, period);
            let mut cursor = 0;
            for kept in &filtered {
                assert!(is_in_period(Some(&kept.date), period));
                let pos = workouts[cursor..].iter().position(|w| w == kept).unwrap();
                cursor += pos + 1;
            }
            let excluded = workouts.iter().filter(|w| !filtered.contains(w));
            for w in excluded {
                assert!(!is_in_period(Some(&w.date), period));
            }
        }

        let jan: Vec<i64> = filter_workouts_by_period(&workouts, "2026-01")
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(jan, vec![3, 2]);
        assert_eq!(filter_workouts_by_period(&workouts, ALL).len(), 4);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_metrics_by_period(&[], "2026-01").is_empty());
        assert!(filter_workouts_by_period(&[], ALL).is_empty());
    }

    #[test]
    fn test_default_periods_order() {
        let periods = Periods::default();
        let keys: Vec<_> = periods.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["all", "2025-12", "2026-01", "2026-02"]);
        assert_eq!(periods.label("2026-01"), Some("Jan 2026"));
    }

    #[test]
    fn test_add_period_keeps_all_first() {
        let mut periods = Periods::default();
        periods.add_period("2025-11", None).unwrap();
        periods.add_period("2026-03", Some("March!")).unwrap();

        let keys: Vec<_> = periods.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["all", "2025-11", "2025-12", "2026-01", "2026-02", "2026-03"]);
        assert_eq!(periods.label("2025-11"), Some("Nov 2025"));
        assert_eq!(periods.label("2026-03"), Some("March!"));
    }

    #[test]
    fn test_add_period_rejects_duplicates_and_bad_tokens() {
        let mut periods = Periods::default();
        assert!(matches!(
            periods.add_period("2026-01", None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            periods.add_period("2026-13", None),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            periods.add_period("2026-1", None),
            Err(Error::Validation(_))
        ));
        assert_eq!(periods.len(), 4);
    }

    #[test]
    fn test_previous_period() {
        let periods = Periods::default();
        assert_eq!(periods.previous("2026-02"), Some("2026-01"));
        assert_eq!(periods.previous("2025-12"), None);
        assert_eq!(periods.previous(ALL), None);
        assert_eq!(periods.previous("2030-01"), None);
    }

    #[test]
    fn test_periods_json_puts_all_first() {
        let json = r#"{"2026-01": "Jan 2026", "all": "All Time", "2025-12": "Dec 2025"}"#;
        let periods: Periods = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&periods).unwrap();
        assert_eq!(
            out,
            r#"{"all":"All Time","2025-12":"Dec 2025","2026-01":"Jan 2026"}"#
        );
    }

    #[test]
    fn test_valid_period_tokens() {
        assert!(is_valid_period_token("all"));
        assert!(is_valid_period_token("2026-02"));
        assert!(!is_valid_period_token("2026-02-01"));
        assert!(!is_valid_period_token("Feb"));
        assert_eq!(month_label("2026-03").as_deref(), Some("Mar 2026"));
    }
}
