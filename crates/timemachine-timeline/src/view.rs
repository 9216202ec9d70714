//! Timeline view construction.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use timemachine_core::error::CoreError;
use timemachine_core::models::{MediaKind, MediaRecord};

use crate::month::YearMonth;

/// Timeline type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MediaKind),
}

impl TypeFilter {
    fn keeps(self, kind: MediaKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => kind == wanted,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = CoreError;

    /// `"all"` or any media kind name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(s.parse()?))
        }
    }
}

/// One calendar-day bucket. `day == None` is the unknown-date bucket,
/// which always sorts last.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: Option<NaiveDate>,
    pub records: Vec<MediaRecord>,
}

/// View model consumed by the timeline display.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    /// Day buckets, newest first, unknown last.
    pub groups: Vec<DayGroup>,
    /// Every navigable month, newest first, spanning all records
    /// regardless of the active filters.
    pub months: Vec<YearMonth>,
    /// The month the navigator should highlight. Display only; it never
    /// filters the groups.
    pub selected_month: Option<YearMonth>,
}

/// Build the timeline view.
///
/// Pure given its four inputs: no I/O, no side effects, deterministic
/// output including group and within-group order.
pub fn view(
    records: &[MediaRecord],
    filter: TypeFilter,
    search: &str,
    selected_month: Option<YearMonth>,
) -> TimelineView {
    let needle = search.trim().to_lowercase();

    let mut dated: BTreeMap<NaiveDate, Vec<MediaRecord>> = BTreeMap::new();
    let mut unknown: Vec<MediaRecord> = Vec::new();
    for record in records {
        if !filter.keeps(record.file_type) {
            continue;
        }
        if !needle.is_empty() && !matches_search(record, &needle) {
            continue;
        }
        match record.effective_date() {
            Some(instant) => dated
                .entry(instant.date_naive())
                .or_default()
                .push(record.clone()),
            None => unknown.push(record.clone()),
        }
    }

    let mut groups: Vec<DayGroup> = dated
        .into_iter()
        .rev()
        .map(|(day, mut records)| {
            // Stable: same-instant records keep their input order.
            records.sort_by_key(|r| Reverse(r.effective_date()));
            DayGroup {
                day: Some(day),
                records,
            }
        })
        .collect();
    if !unknown.is_empty() {
        groups.push(DayGroup {
            day: None,
            records: unknown,
        });
    }

    let months = month_span(records);
    let selected_month = selected_month
        .filter(|month| months.contains(month))
        .or_else(|| months.first().copied());

    TimelineView {
        groups,
        months,
        selected_month,
    }
}

/// Case-insensitive substring match over name, description, and tags.
/// `needle` must already be trimmed and lowercased.
fn matches_search(record: &MediaRecord, needle: &str) -> bool {
    record.file_name.to_lowercase().contains(needle)
        || record
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || record
            .tags
            .iter()
            .flatten()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Every month from the earliest to the latest dated record, inclusive,
/// descending. Spans all records, not just the filtered set; empty when
/// no record carries a date (month navigation disabled).
fn month_span(records: &[MediaRecord]) -> Vec<YearMonth> {
    let mut earliest: Option<DateTime<Utc>> = None;
    let mut latest: Option<DateTime<Utc>> = None;
    for instant in records.iter().filter_map(MediaRecord::effective_date) {
        earliest = Some(earliest.map_or(instant, |e| e.min(instant)));
        latest = Some(latest.map_or(instant, |l| l.max(instant)));
    }
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return Vec::new();
    };

    let stop = YearMonth::of(earliest.date_naive());
    let mut current = YearMonth::of(latest.date_naive());
    let mut months = Vec::new();
    loop {
        months.push(current);
        if current == stop {
            break;
        }
        current = current.pred();
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_filter_parses_the_query_surface() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "image".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(MediaKind::Image)
        );
        assert_eq!(
            "note".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(MediaKind::Note)
        );
        assert!("everything".parse::<TypeFilter>().is_err());
    }
}
