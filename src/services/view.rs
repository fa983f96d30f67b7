//! Date-filtered views over the expense collection
//!
//! Pure functions: the collection is borrowed, never modified, and the
//! result is recomputed on every read.

use std::cmp::Ordering;

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::config::settings::WeekStart;
use crate::models::{DateFilter, DateFilterKind, Expense};

/// The local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Expenses inside `filter`, newest first
///
/// Records whose date cannot be parsed are left out.
pub fn view(
    expenses: &[Expense],
    filter: &DateFilter,
    week_start: WeekStart,
    today: NaiveDate,
) -> Vec<Expense> {
    let mut selected: Vec<Expense> = expenses
        .iter()
        .filter(|e| {
            e.day()
                .is_some_and(|day| in_window(filter, week_start, today, day))
        })
        .cloned()
        .collect();

    sort_newest_first(&mut selected);
    selected
}

/// Whether `day` falls inside the filter window relative to `today`
pub fn in_window(filter: &DateFilter, week_start: WeekStart, today: NaiveDate, day: NaiveDate) -> bool {
    match filter.kind {
        DateFilterKind::All => true,
        DateFilterKind::Today => day == today,
        DateFilterKind::Yesterday => Some(day) == today.pred_opt(),
        DateFilterKind::Week => {
            let start = week_start.week_start_of(today);
            start <= day && day <= today
        }
        DateFilterKind::LastWeek => {
            let this_start = week_start.week_start_of(today);
            let start = this_start - Duration::days(7);
            start <= day && day < this_start
        }
        DateFilterKind::Month => (day.year(), day.month()) == (today.year(), today.month()),
        DateFilterKind::LastMonth => (day.year(), day.month()) == previous_month(today),
        DateFilterKind::Custom => match (filter.start, filter.end) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => true,
        },
    }
}

fn previous_month(today: NaiveDate) -> (i32, u32) {
    if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    }
}

/// Sort by date descending (full timestamp when present), then by creation
/// time descending. Records with unparseable dates go last.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(compare_newest_first);
}

fn compare_newest_first(a: &Expense, b: &Expense) -> Ordering {
    b.date
        .timestamp()
        .cmp(&a.date.timestamp())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExpenseDate, NewExpense, WalletId};
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense_on(date: &str, description: &str) -> Expense {
        Expense::from_new(
            NewExpense::new(Amount::new(1.0), ExpenseDate::new(date)).with_description(description),
            WalletId::new(),
        )
    }

    fn descriptions(expenses: &[Expense]) -> Vec<&str> {
        expenses.iter().map(|e| e.description.as_str()).collect()
    }

    /// One record per day from 2024-05-01 through 2024-05-22
    fn may() -> Vec<Expense> {
        (1..=22)
            .map(|d| expense_on(&format!("2024-05-{:02}", d), &d.to_string()))
            .collect()
    }

    fn wednesday() -> NaiveDate {
        day(2024, 5, 15)
    }

    #[test]
    fn test_week_sunday_start() {
        let result = view(&may(), &DateFilter::new(DateFilterKind::Week), WeekStart::Sunday, wednesday());
        assert_eq!(descriptions(&result), vec!["15", "14", "13", "12"]);
    }

    #[test]
    fn test_week_monday_start() {
        let result = view(&may(), &DateFilter::new(DateFilterKind::Week), WeekStart::Monday, wednesday());
        assert_eq!(descriptions(&result), vec!["15", "14", "13"]);
    }

    #[test]
    fn test_last_week_sunday_start() {
        let result = view(
            &may(),
            &DateFilter::new(DateFilterKind::LastWeek),
            WeekStart::Sunday,
            wednesday(),
        );
        assert_eq!(descriptions(&result), vec!["11", "10", "9", "8", "7", "6", "5"]);
    }

    #[test]
    fn test_last_week_monday_start() {
        let result = view(
            &may(),
            &DateFilter::new(DateFilterKind::LastWeek),
            WeekStart::Monday,
            wednesday(),
        );
        assert_eq!(descriptions(&result), vec!["12", "11", "10", "9", "8", "7", "6"]);
    }

    #[test]
    fn test_monday_start_on_sunday_covers_six_days_back() {
        // 2024-05-19 is a Sunday
        let result = view(&may(), &DateFilter::new(DateFilterKind::Week), WeekStart::Monday, day(2024, 5, 19));
        assert_eq!(descriptions(&result), vec!["19", "18", "17", "16", "15", "14", "13"]);
    }

    #[test]
    fn test_today_and_yesterday() {
        let data = may();
        let today = view(&data, &DateFilter::new(DateFilterKind::Today), WeekStart::Sunday, wednesday());
        let yesterday = view(&data, &DateFilter::new(DateFilterKind::Yesterday), WeekStart::Sunday, wednesday());

        assert_eq!(descriptions(&today), vec!["15"]);
        assert_eq!(descriptions(&yesterday), vec!["14"]);
    }

    #[test]
    fn test_month_and_last_month_across_year_boundary() {
        let data = vec![
            expense_on("2023-12-31", "december"),
            expense_on("2024-01-02", "january"),
            expense_on("2022-12-15", "old december"),
        ];
        let today = day(2024, 1, 10);

        let month = view(&data, &DateFilter::new(DateFilterKind::Month), WeekStart::Sunday, today);
        let last = view(&data, &DateFilter::new(DateFilterKind::LastMonth), WeekStart::Sunday, today);

        assert_eq!(descriptions(&month), vec!["january"]);
        assert_eq!(descriptions(&last), vec!["december"]);
    }

    #[test]
    fn test_custom_range_inclusive() {
        let filter = DateFilter::custom(day(2024, 5, 3), day(2024, 5, 5));
        let result = view(&may(), &filter, WeekStart::Sunday, wednesday());
        assert_eq!(descriptions(&result), vec!["5", "4", "3"]);
    }

    #[test]
    fn test_custom_missing_bound_is_all() {
        let filter = DateFilter {
            kind: DateFilterKind::Custom,
            start: Some(day(2024, 5, 3)),
            end: None,
        };
        assert_eq!(view(&may(), &filter, WeekStart::Sunday, wednesday()).len(), 22);
    }

    #[test]
    fn test_unparseable_dates_excluded() {
        let data = vec![expense_on("not a date", "bad"), expense_on("2024-05-15", "good")];

        let result = view(&data, &DateFilter::all(), WeekStart::Sunday, wednesday());
        assert_eq!(descriptions(&result), vec!["good"]);
    }

    #[test]
    fn test_sorted_by_timestamp_then_created_at() {
        let mut morning = expense_on("2024-05-15T08:00:00Z", "morning");
        let evening = expense_on("2024-05-15T19:30:00Z", "evening");
        let mut first = expense_on("2024-05-14", "first");
        let mut second = expense_on("2024-05-14", "second");
        first.created_at = Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).unwrap();
        second.created_at = Utc.with_ymd_and_hms(2024, 5, 14, 10, 0, 0).unwrap();
        morning.created_at = Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap();

        let data = vec![first, morning, second, evening];
        let result = view(&data, &DateFilter::all(), WeekStart::Sunday, wednesday());

        assert_eq!(descriptions(&result), vec!["evening", "morning", "second", "first"]);
    }

    #[test]
    fn test_same_filter_twice_gives_same_view() {
        let data = may();
        let snapshot = data.clone();
        let filter = DateFilter::new(DateFilterKind::Week);

        let first = view(&data, &filter, WeekStart::Monday, wednesday());
        let second = view(&data, &filter, WeekStart::Monday, wednesday());

        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert_eq!(data, snapshot);
    }
}
