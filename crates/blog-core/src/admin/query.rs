//! Change list query parsing: search, list filters, date drill-down, paging.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::options::{AdminField, FieldKind, ModelAdmin};
use crate::error::DomainError;

pub const SEARCH_PARAM: &str = "q";
pub const PAGE_PARAM: &str = "p";
pub const YEAR_PARAM: &str = "year";
pub const MONTH_PARAM: &str = "month";
pub const DAY_PARAM: &str = "day";

/// Half-open `[start, end)` interval of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_range(date: NaiveDate) -> Option<DateRange> {
    let next = date.succ_opt()?;
    Some(DateRange {
        start: start_of(date),
        end: start_of(next),
    })
}

fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(DateRange {
        start: start_of(first),
        end: start_of(next),
    })
}

fn year_range(year: i32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let next = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
    Some(DateRange {
        start: start_of(first),
        end: start_of(next),
    })
}

/// Relative date choices offered by a date list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl DateFilter {
    pub const ALL: &'static [DateFilter] = &[
        DateFilter::Today,
        DateFilter::Past7Days,
        DateFilter::ThisMonth,
        DateFilter::ThisYear,
    ];

    pub fn param(&self) -> &'static str {
        match self {
            DateFilter::Today => "today",
            DateFilter::Past7Days => "past_7_days",
            DateFilter::ThisMonth => "this_month",
            DateFilter::ThisYear => "this_year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateFilter::Today => "Today",
            DateFilter::Past7Days => "Past 7 days",
            DateFilter::ThisMonth => "This month",
            DateFilter::ThisYear => "This year",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.param() == value)
    }

    /// The calendar period this choice covers, as seen at `now` (UTC).
    pub fn range(&self, now: DateTime<Utc>) -> Option<DateRange> {
        let today = now.date_naive();
        match self {
            DateFilter::Today => day_range(today),
            DateFilter::Past7Days => {
                let tomorrow = today.succ_opt()?;
                Some(DateRange {
                    start: start_of(today) - TimeDelta::days(7),
                    end: start_of(tomorrow),
                })
            }
            DateFilter::ThisMonth => month_range(today.year(), today.month()),
            DateFilter::ThisYear => year_range(today.year()),
        }
    }
}

/// Position in the year → month → day navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateDrilldown {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl DateDrilldown {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: None,
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// Period covered, or `None` if this is not a real calendar date.
    pub fn range(&self) -> Option<DateRange> {
        match (self.month, self.day) {
            (None, None) => year_range(self.year),
            (Some(month), None) => month_range(self.year, month),
            (Some(month), Some(day)) => day_range(NaiveDate::from_ymd_opt(self.year, month, day)?),
            (None, Some(_)) => None,
        }
    }

    /// One level up, or `None` from the year level.
    pub fn parent(&self) -> Option<DateDrilldown> {
        match (self.month, self.day) {
            (Some(month), Some(_)) => Some(DateDrilldown::month(self.year, month)),
            (Some(_), None) => Some(DateDrilldown::year(self.year)),
            _ => None,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![(YEAR_PARAM, self.year.to_string())];
        if let Some(month) = self.month {
            params.push((MONTH_PARAM, month.to_string()));
        }
        if let Some(day) = self.day {
            params.push((DAY_PARAM, day.to_string()));
        }
        params
    }
}

/// Parsed value of a list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Choice(String),
    Id(Uuid),
    Bool(bool),
    Date(DateRange),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<F> {
    pub field: F,
    pub value: FilterValue,
}

/// A validated change list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeListQuery<F> {
    pub search_terms: Vec<String>,
    pub filters: Vec<ListFilter<F>>,
    pub drilldown: Option<DateDrilldown>,
    /// 1-based page number.
    pub page: u64,
    pub per_page: u64,
}

impl<F> ChangeListQuery<F> {
    pub fn new(per_page: u64) -> Self {
        Self {
            search_terms: Vec::new(),
            filters: Vec::new(),
            drilldown: None,
            page: 1,
            per_page,
        }
    }

    pub fn with_search(mut self, q: &str) -> Self {
        self.search_terms = split_search_terms(q);
        self
    }

    pub fn with_filter(mut self, field: F, value: FilterValue) -> Self {
        self.filters.push(ListFilter { field, value });
        self
    }

    pub fn with_drilldown(mut self, drilldown: DateDrilldown) -> Self {
        self.drilldown = Some(drilldown);
        self
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    pub fn drilldown_range(&self) -> Option<DateRange> {
        self.drilldown.as_ref().and_then(DateDrilldown::range)
    }
}

/// Split a search string into terms on whitespace.
///
/// Double-quoted sections are kept together as a single term with the quotes
/// and surrounding whitespace removed; blank phrases are dropped. An
/// unterminated quote runs to the end of the input.
pub fn split_search_terms(q: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in q.chars() {
        match c {
            '"' => {
                if in_quotes {
                    push_term(&mut terms, &mut current);
                }
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => push_term(&mut terms, &mut current),
            c => current.push(c),
        }
    }
    push_term(&mut terms, &mut current);
    terms
}

fn push_term(terms: &mut Vec<String>, current: &mut String) {
    let term = current.trim();
    if !term.is_empty() {
        terms.push(term.to_string());
    }
    current.clear();
}

fn invalid(field: &str, value: &str) -> DomainError {
    DomainError::Validation(format!("Invalid value {value:?} for filter {field:?}"))
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, DomainError> {
    value.trim().parse().map_err(|_| invalid(name, value))
}

impl<F: AdminField> ModelAdmin<F> {
    /// Validate raw query-string pairs against this admin's configuration.
    ///
    /// Rejects undeclared parameters, filters on fields that are not list
    /// filters, unparseable values and impossible drill-down dates. A filter
    /// given more than once keeps its last value.
    pub fn parse_query(
        &self,
        params: &[(String, String)],
        now: DateTime<Utc>,
    ) -> Result<ChangeListQuery<F>, DomainError> {
        let mut query = ChangeListQuery::new(self.list_per_page);
        let (mut year, mut month, mut day) = (None, None, None);

        for (key, value) in params {
            match key.as_str() {
                SEARCH_PARAM => {
                    if self.search_fields.is_empty() {
                        return Err(DomainError::Validation(format!(
                            "{} cannot be searched",
                            self.verbose_name_plural
                        )));
                    }
                    query.search_terms.extend(split_search_terms(value));
                }
                PAGE_PARAM => {
                    let page: u64 = parse_number(PAGE_PARAM, value)?;
                    if page == 0 {
                        return Err(invalid(PAGE_PARAM, value));
                    }
                    query.page = page;
                }
                YEAR_PARAM => year = Some(parse_number::<i32>(YEAR_PARAM, value)?),
                MONTH_PARAM => month = Some(parse_number::<u32>(MONTH_PARAM, value)?),
                DAY_PARAM => day = Some(parse_number::<u32>(DAY_PARAM, value)?),
                name => {
                    let field = F::from_name(name)
                        .filter(|f| self.list_filter.contains(f))
                        .ok_or_else(|| {
                            DomainError::Validation(format!(
                                "Filtering by {name:?} is not allowed"
                            ))
                        })?;
                    let value = parse_filter_value(field, value, now)?;
                    match query.filters.iter_mut().find(|f| f.field == field) {
                        Some(existing) => existing.value = value,
                        None => query.filters.push(ListFilter { field, value }),
                    }
                }
            }
        }

        if year.is_some() || month.is_some() || day.is_some() {
            if self.date_hierarchy.is_none() {
                return Err(DomainError::Validation(format!(
                    "{} have no date hierarchy",
                    self.verbose_name_plural
                )));
            }
            let drilldown = match (year, month, day) {
                (Some(y), None, None) => DateDrilldown::year(y),
                (Some(y), Some(m), None) => DateDrilldown::month(y, m),
                (Some(y), Some(m), Some(d)) => DateDrilldown::day(y, m, d),
                _ => {
                    return Err(DomainError::Validation(
                        "Date drill-down needs year, then month, then day".to_string(),
                    ));
                }
            };
            if drilldown.range().is_none() {
                return Err(DomainError::Validation(format!(
                    "Not a valid date: {drilldown:?}"
                )));
            }
            query.drilldown = Some(drilldown);
        }

        Ok(query)
    }
}

fn parse_filter_value<F: AdminField>(
    field: F,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<FilterValue, DomainError> {
    let name = field.name();
    match field.kind() {
        FieldKind::Choice { choices } => choices
            .iter()
            .find(|(value, _)| *value == raw)
            .map(|(value, _)| FilterValue::Choice((*value).to_string()))
            .ok_or_else(|| invalid(name, raw)),
        FieldKind::ForeignKey { .. } => Uuid::parse_str(raw.trim())
            .map(FilterValue::Id)
            .map_err(|_| invalid(name, raw)),
        FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(FilterValue::Bool(true)),
            "0" | "false" | "no" => Ok(FilterValue::Bool(false)),
            _ => Err(invalid(name, raw)),
        },
        FieldKind::DateTime => DateFilter::from_param(raw.trim())
            .and_then(|f| f.range(now))
            .map(FilterValue::Date)
            .ok_or_else(|| invalid(name, raw)),
        _ => Err(DomainError::Validation(format!(
            "Field {name:?} does not support filtering"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::admin::fields::{CommentField, PostField};
    use crate::admin::site::{comment_admin, post_admin};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 13, 30, 0).unwrap()
    }

    #[test]
    fn search_terms_split_on_whitespace_and_keep_phrases() {
        assert_eq!(split_search_terms("  rust  async "), vec!["rust", "async"]);
        assert_eq!(
            split_search_terms(r#"hello "big world" x"#),
            vec!["hello", "big world", "x"]
        );
        assert_eq!(split_search_terms(r#""unterminated phrase"#), vec!["unterminated phrase"]);
        assert!(split_search_terms("   ").is_empty());
    }

    #[test]
    fn blank_phrases_are_not_terms() {
        assert_eq!(split_search_terms(r#""   " rust"#), vec!["rust"]);
        assert_eq!(split_search_terms(r#"" big world ""#), vec!["big world"]);
        assert!(split_search_terms("\"\"").is_empty());
    }

    #[test]
    fn repeated_filter_keeps_last_value() {
        let query = post_admin()
            .parse_query(&params(&[("status", "draft"), ("status", "published")]), now())
            .unwrap();

        assert_eq!(
            query.filters,
            vec![ListFilter {
                field: PostField::Status,
                value: FilterValue::Choice("published".into())
            }]
        );
    }

    #[test]
    fn parses_declared_post_filters() {
        let author = Uuid::new_v4();
        let query = post_admin()
            .parse_query(
                &params(&[
                    ("q", "hello world"),
                    ("status", "published"),
                    ("author", &author.to_string()),
                    ("created_date", "today"),
                    ("p", "2"),
                ]),
                now(),
            )
            .unwrap();

        assert_eq!(query.search_terms, vec!["hello", "world"]);
        assert_eq!(query.page, 2);
        assert_eq!(query.page_index(), 1);
        assert_eq!(
            query.filters[0],
            ListFilter {
                field: PostField::Status,
                value: FilterValue::Choice("published".into())
            }
        );
        assert_eq!(query.filters[1].value, FilterValue::Id(author));
        let FilterValue::Date(range) = query.filters[2].value else {
            panic!("expected a date range");
        };
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_filters_that_are_not_declared() {
        // `slug` exists on posts but is not a list filter
        let err = post_admin()
            .parse_query(&params(&[("slug", "hello")]), now())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(comment_admin()
            .parse_query(&params(&[("author", &Uuid::new_v4().to_string())]), now())
            .is_err());
    }

    #[test]
    fn rejects_bad_filter_values() {
        let admin = post_admin();
        assert!(admin.parse_query(&params(&[("status", "archived")]), now()).is_err());
        assert!(admin.parse_query(&params(&[("author", "bob")]), now()).is_err());
        assert!(admin.parse_query(&params(&[("created_date", "yesterday")]), now()).is_err());
        assert!(admin.parse_query(&params(&[("p", "0")]), now()).is_err());
    }

    #[test]
    fn boolean_filter_accepts_common_spellings() {
        let admin = comment_admin();
        for (raw, expected) in [("1", true), ("True", true), ("no", false), ("0", false)] {
            let query = admin
                .parse_query(&params(&[("is_approved", raw)]), now())
                .unwrap();
            assert_eq!(
                query.filters,
                vec![ListFilter {
                    field: CommentField::IsApproved,
                    value: FilterValue::Bool(expected)
                }]
            );
        }
    }

    #[test]
    fn drilldown_requires_ordered_parts_and_real_dates() {
        let admin = post_admin();
        let query = admin
            .parse_query(&params(&[("year", "2024"), ("month", "2")]), now())
            .unwrap();
        assert_eq!(query.drilldown, Some(DateDrilldown::month(2024, 2)));
        let range = query.drilldown_range().unwrap();
        assert_eq!(range.end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        assert!(admin.parse_query(&params(&[("month", "2")]), now()).is_err());
        assert!(admin
            .parse_query(&params(&[("year", "2023"), ("month", "2"), ("day", "29")]), now())
            .is_err());
        assert!(admin
            .parse_query(&params(&[("year", "2024"), ("month", "13")]), now())
            .is_err());
    }

    #[test]
    fn comments_have_no_date_hierarchy() {
        assert!(comment_admin()
            .parse_query(&params(&[("year", "2024")]), now())
            .is_err());
    }

    #[test]
    fn relative_date_filters() {
        let n = now();
        let week = DateFilter::Past7Days.range(n).unwrap();
        assert_eq!(week.start, Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap());
        assert!(week.contains(n));

        let month = DateFilter::ThisMonth.range(n).unwrap();
        assert_eq!(month.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(month.end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());

        let december = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        let year = DateFilter::ThisYear.range(december).unwrap();
        assert_eq!(year.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert!(!year.contains(year.end));
    }

    #[test]
    fn drilldown_parent_walks_up() {
        let d = DateDrilldown::day(2024, 3, 5);
        assert_eq!(d.parent(), Some(DateDrilldown::month(2024, 3)));
        assert_eq!(d.parent().and_then(|m| m.parent()), Some(DateDrilldown::year(2024)));
        assert_eq!(DateDrilldown::year(2024).parent(), None);
    }
}
