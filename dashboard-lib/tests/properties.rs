//! Property tests for date resolution and table paging.

use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;
use chrono::Weekday;
use dashboard_lib::dates::format_date;
use dashboard_lib::dates::resolve;
use dashboard_lib::dates::rewrite_condition;
use dashboard_lib::model::Record;
use dashboard_lib::table::Column;
use dashboard_lib::table::TableAction;
use dashboard_lib::table::TableEngine;
use dashboard_lib::table::TableOptions;
use proptest::prelude::*;

const KEYWORDS: [&str; 9] = [
    "TODAY",
    "YESTERDAY",
    "TOMORROW",
    "WEEK_START",
    "WEEK_END",
    "MONTH_START",
    "MONTH_END",
    "YEAR_START",
    "YEAR_END",
];

/// Dates with four-digit years, so every one has a literal spelling.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3_200_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1000, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(days))
            .unwrap()
    })
}

fn numbered_rows(total: usize) -> Vec<Record> {
    (0..total)
        .map(|i| Record::with_id(i.to_string()).set("n", i as i64))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn resolve_is_pure(today in any_date(), index in 0usize..KEYWORDS.len()) {
        let token = KEYWORDS[index];
        prop_assert_eq!(resolve(token, today), resolve(token, today));
    }

    #[test]
    fn literal_round_trip(date in any_date(), today in any_date()) {
        prop_assert_eq!(resolve(&format_date(date), today), Ok(date));
    }

    #[test]
    fn aliases_match_offsets(today in any_date()) {
        prop_assert_eq!(resolve("YESTERDAY", today), resolve("TODAY-1", today));
        prop_assert_eq!(resolve("TOMORROW", today), resolve("TODAY+1", today));
        prop_assert_eq!(resolve("TODAY", today), resolve("TODAY+0", today));
    }

    #[test]
    fn week_bounds_contain_today(today in any_date()) {
        let start = resolve("WEEK_START", today).unwrap();
        let end = resolve("WEEK_END", today).unwrap();
        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert_eq!(end.weekday(), Weekday::Sun);
        prop_assert!(start <= today && today <= end);
        prop_assert_eq!((end - start).num_days(), 6);
    }

    #[test]
    fn month_bounds_contain_today(today in any_date()) {
        let start = resolve("MONTH_START", today).unwrap();
        let end = resolve("MONTH_END", today).unwrap();
        prop_assert_eq!(start.day(), 1);
        prop_assert_eq!(end.month(), today.month());
        prop_assert!(end.succ_opt().is_none_or(|next| next.day() == 1));
        prop_assert!(start <= today && today <= end);
    }

    #[test]
    fn rewrite_ignores_text_without_keywords(text in "[a-z0-9 ,'=<>]{0,40}", today in any_date()) {
        prop_assert_eq!(rewrite_condition(&text, today), text);
    }

    #[test]
    fn paging_visits_every_row_once(total in 0usize..120, page_size in 1usize..25) {
        let columns = vec![Column::new("n", "N")];
        let options = TableOptions::new().with_page_size(page_size);
        let mut engine = TableEngine::new(columns, numbered_rows(total), options).unwrap();

        let mut seen = Vec::new();
        loop {
            let view = engine.view();
            prop_assert!(view.rows.len() <= page_size);
            prop_assert!(view.page_index < view.page_count.max(1));
            seen.extend(view.rows.iter().map(|r| r.id().unwrap_or_default().to_string()));
            if !view.can_go_next {
                break;
            }
            prop_assert!(engine.dispatch(TableAction::NextPage));
        }

        let expected: Vec<String> = (0..total).map(|i| i.to_string()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn page_index_is_always_clamped(total in 0usize..80, page_size in 1usize..20, index in 0usize..1000) {
        let columns = vec![Column::new("n", "N")];
        let options = TableOptions::new().with_page_size(page_size);
        let mut engine = TableEngine::new(columns, numbered_rows(total), options).unwrap();

        engine.dispatch(TableAction::SetPageIndex(index));
        let view = engine.view();
        prop_assert_eq!(view.page_count, total.div_ceil(page_size));
        prop_assert!(view.page_index < view.page_count.max(1));
        prop_assert_eq!(view.is_empty, total == 0);
    }

    #[test]
    fn descending_reverses_distinct_keys(total in 1usize..60) {
        let columns = vec![Column::new("n", "N")];
        let mut engine = TableEngine::new(
            columns,
            numbered_rows(total),
            TableOptions::new().with_page_size(total),
        )
        .unwrap();

        engine.dispatch(TableAction::HeaderClicked("n".into()));
        let ascending: Vec<_> = engine.view().rows.iter().map(|r| r.id().map(str::to_string)).collect();
        engine.dispatch(TableAction::HeaderClicked("n".into()));
        let mut descending: Vec<_> = engine.view().rows.iter().map(|r| r.id().map(str::to_string)).collect();
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }
}
