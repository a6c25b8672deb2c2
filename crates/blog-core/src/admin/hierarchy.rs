//! Year → month → day navigation over a timestamp field.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use super::query::DateDrilldown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLevel {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub label: String,
    pub drilldown: DateDrilldown,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateHierarchy {
    pub field: &'static str,
    pub current: Option<DateDrilldown>,
    /// Level of the buckets, `None` once a single day is selected.
    pub level: Option<DateLevel>,
    pub buckets: Vec<DateBucket>,
}

impl DateHierarchy {
    /// Group `dates` into the buckets one level below `current`.
    ///
    /// Dates outside the `current` period are ignored.
    pub fn build(
        field: &'static str,
        current: Option<DateDrilldown>,
        dates: impl IntoIterator<Item = DateTime<Utc>>,
    ) -> Self {
        let level = match current {
            None => Some(DateLevel::Year),
            Some(DateDrilldown { month: None, .. }) => Some(DateLevel::Month),
            Some(DateDrilldown { day: None, .. }) => Some(DateLevel::Day),
            Some(_) => None,
        };
        let range = current.as_ref().and_then(DateDrilldown::range);

        let mut counts: BTreeMap<(i32, u32, u32), u64> = BTreeMap::new();
        if let Some(level) = level {
            for at in dates {
                if range.is_some_and(|r| !r.contains(at)) {
                    continue;
                }
                let key = match level {
                    DateLevel::Year => (at.year(), 0, 0),
                    DateLevel::Month => (at.year(), at.month(), 0),
                    DateLevel::Day => (at.year(), at.month(), at.day()),
                };
                *counts.entry(key).or_default() += 1;
            }
        }

        let buckets = counts
            .into_iter()
            .map(|((year, month, day), count)| {
                let (drilldown, label) = match level {
                    Some(DateLevel::Month) => (
                        DateDrilldown::month(year, month),
                        format_date(year, month, 1, "%B %Y"),
                    ),
                    Some(DateLevel::Day) => (
                        DateDrilldown::day(year, month, day),
                        format_date(year, month, day, "%B %-d"),
                    ),
                    _ => (DateDrilldown::year(year), year.to_string()),
                };
                DateBucket {
                    label,
                    drilldown,
                    count,
                }
            })
            .collect();

        Self {
            field,
            current,
            level,
            buckets,
        }
    }
}

fn format_date(year: i32, month: u32, day: u32, fmt: &str) -> String {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}
