//! Calendar-day views over the permanent log.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use time::{Date, UtcOffset};

use super::model::FoodEntry;
use super::totals::{totals, NutritionTotals};

/// Fixed divisor of the weekly summary.
pub const WEEK_DAYS: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: Date,
    pub entries: Vec<FoodEntry>,
}

impl DayGroup {
    pub fn totals(&self) -> NutritionTotals {
        totals(&self.entries)
    }

    /// Entries of this day whose names match `query`.
    pub fn matching_entries<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a FoodEntry> {
        self.entries.iter().filter(move |e| name_matches(&e.name, query))
    }
}

/// Case-insensitive substring match; an empty query matches everything.
pub fn name_matches(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

pub fn local_date(entry: &FoodEntry, offset: UtcOffset) -> Date {
    entry.timestamp.to_offset(offset).date()
}

/// Partitions the log by local calendar date. Groups come out in ascending
/// date order; entries inside a group are ordered by timestamp, ties keeping
/// their log order.
pub fn group_by_day(history: &[FoodEntry], offset: UtcOffset) -> Vec<DayGroup> {
    let mut days: BTreeMap<Date, Vec<FoodEntry>> = BTreeMap::new();
    for entry in history {
        days.entry(local_date(entry, offset))
            .or_default()
            .push(entry.clone());
    }
    days.into_iter()
        .map(|(date, mut entries)| {
            entries.sort_by_key(|e| e.timestamp);
            DayGroup { date, entries }
        })
        .collect()
}

/// Keeps whole groups that contain at least one matching name.
pub fn filter_groups(groups: Vec<DayGroup>, query: &str) -> Vec<DayGroup> {
    groups
        .into_iter()
        .filter(|g| g.entries.iter().any(|e| name_matches(&e.name, query)))
        .collect()
}

pub fn sort_groups_descending(mut groups: Vec<DayGroup>) -> Vec<DayGroup> {
    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyRollup {
    pub average_calories: f64,
    pub total_entries: usize,
    pub active_days: usize,
    /// Whole percent; exceeds 100 once more than seven distinct days are logged.
    pub consistency: f64,
}

/// Summary over the whole log. The average divides the all-time calorie total
/// by seven regardless of how many days the log actually spans.
pub fn weekly_rollup(history: &[FoodEntry], offset: UtcOffset) -> WeeklyRollup {
    let active_days = history
        .iter()
        .map(|e| local_date(e, offset))
        .collect::<BTreeSet<_>>()
        .len();
    WeeklyRollup {
        average_calories: (totals(history).calories / WEEK_DAYS).round(),
        total_entries: history.len(),
        active_days,
        consistency: (active_days as f64 / WEEK_DAYS * 100.0).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::model::NutritionFacts;
    use time::macros::{date, datetime, offset};
    use time::OffsetDateTime;

    fn at(name: &str, calories: f64, ts: OffsetDateTime) -> FoodEntry {
        FoodEntry::at(
            name,
            NutritionFacts {
                calories,
                ..Default::default()
            },
            ts,
        )
    }

    fn sample() -> Vec<FoodEntry> {
        vec![
            at("Nasi Putih", 130.0, datetime!(2024-03-01 07:00 UTC)),
            at("Ayam Goreng", 250.0, datetime!(2024-03-01 12:00 UTC)),
            at("Pisang", 89.0, datetime!(2024-03-02 09:00 UTC)),
            at("Tempe Goreng", 190.0, datetime!(2024-03-04 19:00 UTC)),
        ]
    }

    #[test]
    fn grouping_is_a_partition() {
        let history = sample();
        let groups = group_by_day(&history, UtcOffset::UTC);
        assert_eq!(groups.len(), 3);

        let mut ids: Vec<_> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.id))
            .collect();
        let mut expected: Vec<_> = history.iter().map(|e| e.id).collect();
        ids.sort();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn group_lists_entries_chronologically() {
        let groups = group_by_day(&sample(), UtcOffset::UTC);
        let names: Vec<_> = groups[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Nasi Putih", "Ayam Goreng"]);
        assert_eq!(groups[0].totals().calories, 380.0);
    }

    #[test]
    fn group_orders_by_timestamp_not_log_order() {
        let history = vec![
            at("lunch", 450.0, datetime!(2024-03-01 12:00 UTC)),
            at("breakfast", 300.0, datetime!(2024-03-01 07:00 UTC)),
            at("snack", 90.0, datetime!(2024-03-01 12:00 UTC)),
        ];
        let groups = group_by_day(&history, UtcOffset::UTC);
        assert_eq!(groups.len(), 1);
        let names: Vec<_> = groups[0].entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["breakfast", "lunch", "snack"]);
    }

    #[test]
    fn grouping_uses_the_local_offset() {
        let history = vec![
            at("late", 1.0, datetime!(2024-03-01 20:00 UTC)),
            at("early", 1.0, datetime!(2024-03-02 01:00 UTC)),
        ];
        assert_eq!(group_by_day(&history, UtcOffset::UTC).len(), 2);

        let jakarta = group_by_day(&history, offset!(+7));
        assert_eq!(jakarta.len(), 1);
        assert_eq!(jakarta[0].date, date!(2024-03-02));
    }

    #[test]
    fn empty_query_keeps_every_group() {
        let groups = group_by_day(&sample(), UtcOffset::UTC);
        assert_eq!(filter_groups(groups.clone(), ""), groups);
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_whole_group() {
        let groups = group_by_day(&sample(), UtcOffset::UTC);
        let kept = filter_groups(groups, "GORENG");
        let dates: Vec<_> = kept.iter().map(|g| g.date).collect();
        assert_eq!(dates, [date!(2024-03-01), date!(2024-03-04)]);
        assert_eq!(kept[0].entries.len(), 2);

        let shown: Vec<_> = kept[0].matching_entries("goreng").map(|e| e.name.as_str()).collect();
        assert_eq!(shown, ["Ayam Goreng"]);
    }

    #[test]
    fn filter_without_match_is_empty() {
        let groups = group_by_day(&sample(), UtcOffset::UTC);
        assert!(filter_groups(groups, "rendang").is_empty());
    }

    #[test]
    fn two_dates_sort_most_recent_first() {
        let history = vec![
            at("Rice", 130.0, datetime!(2024-05-10 08:00 UTC)),
            at("Egg", 154.0, datetime!(2024-05-12 08:00 UTC)),
        ];
        let groups = sort_groups_descending(group_by_day(&history, UtcOffset::UTC));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date!(2024-05-12));
        assert_eq!(groups[1].date, date!(2024-05-10));
    }

    #[test]
    fn weekly_rollup_divides_all_time_total_by_seven() {
        let r = weekly_rollup(&sample(), UtcOffset::UTC);
        // 659 kcal / 7 = 94.14
        assert_eq!(r.average_calories, 94.0);
        assert_eq!(r.total_entries, 4);
        assert_eq!(r.active_days, 3);
        assert_eq!(r.consistency, 43.0);
    }

    #[test]
    fn weekly_rollup_of_empty_log() {
        let r = weekly_rollup(&[], UtcOffset::UTC);
        assert_eq!(r.average_calories, 0.0);
        assert_eq!(r.total_entries, 0);
        assert_eq!(r.active_days, 0);
        assert_eq!(r.consistency, 0.0);
    }
}
