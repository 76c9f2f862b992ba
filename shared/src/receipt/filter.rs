//! Receipt list filtering
//!
//! The list view fetches the full receipt set once and refilters it in
//! memory on every keystroke; no pagination. Totals may arrive as numbers
//! or currency-formatted strings and are normalized once at load time.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::types::ReceiptStatus;

/// A stored total: a plain number, or legacy currency-formatted text
/// such as `"₹1,234.50"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTotal {
    Number(f64),
    Text(String),
}

impl Default for RawTotal {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

/// Receipt summary as fetched for the list view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    pub id: String,
    #[serde(default)]
    pub receipt_number: String,
    #[serde(default)]
    pub customer_name: String,
    /// ISO `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    pub status: ReceiptStatus,
    #[serde(default)]
    pub total: RawTotal,
}

/// List entry with its total normalized to a number
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptListEntry {
    pub id: String,
    pub receipt_number: String,
    pub customer_name: String,
    pub date: String,
    pub status: ReceiptStatus,
    pub total: f64,
}

impl From<ReceiptSummary> for ReceiptListEntry {
    fn from(summary: ReceiptSummary) -> Self {
        Self {
            total: normalize_total(&summary.total),
            id: summary.id,
            receipt_number: summary.receipt_number,
            customer_name: summary.customer_name,
            date: summary.date,
            status: summary.status,
        }
    }
}

/// Normalize a raw total to a number
///
/// Text values keep only digits, dot, and minus before parsing, so
/// `"₹1,234.50"` becomes `1234.50`. Unparseable values default to 0.
pub fn normalize_total(raw: &RawTotal) -> f64 {
    match raw {
        RawTotal::Number(n) if n.is_finite() => *n,
        RawTotal::Number(_) => 0.0,
        RawTotal::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            cleaned.parse().unwrap_or(0.0)
        }
    }
}

/// Five-way status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Full,
    Advance,
    Due,
    DuePaid,
}

impl StatusFilter {
    fn matches(&self, status: ReceiptStatus) -> bool {
        match self {
            Self::All => true,
            Self::Full => status == ReceiptStatus::Full,
            Self::Advance => status == ReceiptStatus::Advance,
            Self::Due => status == ReceiptStatus::Due,
            Self::DuePaid => status == ReceiptStatus::DuePaid,
        }
    }
}

/// Combined list filter
///
/// The text search is OR across fields; the status, year, and month
/// predicates are ANDed on top of it.
#[derive(Debug, Clone, Default)]
pub struct ReceiptFilter {
    /// Case-insensitive substring over id, receipt number, customer name,
    /// stringified total, and display status
    pub search: String,
    pub status: StatusFilter,
    pub year: Option<i32>,
    /// 1 through 12
    pub month: Option<u32>,
}

impl ReceiptFilter {
    pub fn matches(&self, entry: &ReceiptListEntry) -> bool {
        self.matches_search(entry)
            && self.status.matches(entry.status)
            && self.matches_year(entry)
            && self.matches_month(entry)
    }

    fn matches_search(&self, entry: &ReceiptListEntry) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let total_text = entry.total.to_string();
        [
            entry.id.as_str(),
            entry.receipt_number.as_str(),
            entry.customer_name.as_str(),
            total_text.as_str(),
            entry.status.display_label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    // A receipt with an unparseable date never matches a year/month filter.
    fn matches_year(&self, entry: &ReceiptListEntry) -> bool {
        match self.year {
            None => true,
            Some(year) => parse_date(&entry.date).is_some_and(|d| d.year() == year),
        }
    }

    fn matches_month(&self, entry: &ReceiptListEntry) -> bool {
        match self.month {
            None => true,
            Some(month) => parse_date(&entry.date).is_some_and(|d| d.month() == month),
        }
    }
}

/// Apply a filter over loaded entries, preserving order
pub fn filter_receipts<'a>(
    entries: &'a [ReceiptListEntry],
    filter: &ReceiptFilter,
) -> Vec<&'a ReceiptListEntry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
