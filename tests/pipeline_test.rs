//! End-to-end extraction runs against simulated comparison pages.

use perflab_scrape::host::{HostPage, SimulatedPage, SimulatedRegion, SimulatedRow};
use perflab_scrape::{extract, MetricRecord, NullProgress, Options};
use std::cell::RefCell;

/// (metric name, group, percent, baseline, comparison) per row.
type Cells = (&'static str, &'static str, &'static str, &'static str, &'static str);

const IMPROVEMENT_PAGES: [[Cells; 3]; 2] = [
    [
        ("speedometer3/TodoMVC-React/Score", "desktop", "-4.5", "1,204.5 ms", "1,150.3 ms"),
        ("speedometer3/Editor-CodeMirror/Score", "desktop", "-2.25", "88 ms", "86.02 ms"),
        ("jetstream2/Air/Runtime", "mobile", "-1", "12.5 ms", "12.37 ms"),
    ],
    [
        ("jetstream2/Basic/Startup", "mobile", "-7.75", "340 ms", "313.65 ms"),
        ("motionmark/Canvas-Lines/Score", "desktop", "-0.5", "1,000 pts", "995 pts"),
        ("loadline/Phone-Load/FirstContentfulPaint", "phone", "-3", "2,150 ms", "2,085.5 ms"),
    ],
];

const REGRESSION_PAGES: [[Cells; 3]; 2] = [
    [
        ("speedometer3/NewsSite-Next/Score", "desktop", "6.5", "410 ms", "436.65 ms"),
        ("jetstream2/Octane-Box/Runtime", "desktop", "2", "50 ms", "51 ms"),
        ("motionmark/Images/Score", "mobile", "12.25", "3,200 pts", "3,592 pts"),
    ],
    [
        ("loadline/Tablet-Load/LargestContentfulPaint", "tablet", "1.5", "1,800 ms", "1,827 ms"),
        ("memory/Browser-Idle/PrivateFootprint", "desktop", "4", "1,024 MB", "1,064.96 MB"),
        ("power/Video-Playback/Energy", "laptop", "9.75", "20 J", "21.95 J"),
    ],
];

fn region(label: &str, pages: &[[Cells; 3]]) -> SimulatedRegion {
    pages.iter().fold(SimulatedRegion::new(label), |region, rows| {
        region.page(
            rows.iter()
                .map(|&(name, group, pct, base, comp)| SimulatedRow::new(name, group, pct, base, comp))
                .collect(),
        )
    })
}

fn comparison_page() -> SimulatedPage {
    SimulatedPage::new(
        Some(region("P0 Improvements", &IMPROVEMENT_PAGES)),
        Some(region("P0 Regressions", &REGRESSION_PAGES)),
    )
    .with_busy_polls(3)
}

fn assert_matches_cells(record: &MetricRecord, cells: Cells) {
    let (name, group, pct, base, comp) = cells;
    let mut parts = name.split('/');
    assert_eq!(Some(record.benchmark.as_str()), parts.next());
    assert_eq!(Some(record.story.as_str()), parts.next());
    assert_eq!(Some(record.metric.as_str()), parts.next());
    assert_eq!(record.group, group);
    assert_eq!(record.percent_change, pct.parse::<f64>().expect("percent"));

    let number = |text: &str| -> f64 {
        text.split_whitespace().next().expect("number").replace(',', "").parse().expect("value")
    };
    assert_eq!(record.baseline_value, number(base));
    assert_eq!(record.comparison_value, number(comp));
    assert_eq!(record.unit, comp.split_whitespace().nth(1).expect("unit"));
}

#[tokio::test(start_paused = true)]
async fn two_pages_of_three_rows_per_region() {
    let page = comparison_page();
    let options = Options::default();
    let result = extract(&page, &options, &NullProgress).await;

    assert!(result.success, "{}", result.message);
    assert_eq!(result.total(), 12);
    assert_eq!(result.message, "Found 6 improvements and 6 regressions");

    let expected_improvements = IMPROVEMENT_PAGES.iter().flatten();
    for (record, &cells) in result.improvements.iter().zip(expected_improvements) {
        assert_matches_cells(record, cells);
    }
    let expected_regressions = REGRESSION_PAGES.iter().flatten();
    for (record, &cells) in result.regressions.iter().zip(expected_regressions) {
        assert_matches_cells(record, cells);
    }

    assert_eq!(page.visited("P0 Improvements"), vec![1, 2]);
    assert_eq!(page.visited("P0 Regressions"), vec![1, 2]);
    assert_eq!(page.clicks(), 2);
}

#[tokio::test(start_paused = true)]
async fn missing_region_returns_failure_with_empty_lists() {
    let page = SimulatedPage::new(None, Some(region("P0 Regressions", &REGRESSION_PAGES)));
    let result = extract(&page, &Options::default(), &NullProgress).await;

    assert!(!result.success);
    assert!(result.improvements.is_empty());
    assert!(result.regressions.is_empty());
    assert!(result.message.contains("Please ensure the page has fully loaded"));
}

#[tokio::test(start_paused = true)]
async fn repeated_runs_yield_identical_records() {
    let page = comparison_page();
    let options = Options::default();

    let first = extract(&page, &options, &NullProgress).await;
    let second = extract(&page, &options, &NullProgress).await;

    assert!(first.success && second.success);
    let json = |records: &[MetricRecord]| serde_json::to_string(records).expect("json");
    assert_eq!(json(&first.improvements), json(&second.improvements));
    assert_eq!(json(&first.regressions), json(&second.regressions));
    // The second run starts from the last page and walks back to page 1.
    assert_eq!(page.visited("P0 Improvements"), vec![1, 2, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn progress_phases_are_reported_in_order() {
    let page = comparison_page();
    let seen = RefCell::new(Vec::new());
    let sink = |percent: u8, phase: &str| seen.borrow_mut().push((percent, phase.to_string()));
    let result = extract(&page, &Options::default(), &sink).await;
    assert!(result.success);

    let updates = seen.into_inner();
    let phases: Vec<&str> = updates.iter().map(|(_, phase)| phase.as_str()).collect();
    assert_eq!(
        phases[..4],
        ["Loading page", "Finding elements", "Validating elements", "Extracting data"]
    );
    assert!(phases.contains(&"Processing improvements (2/2)"));
    assert!(phases.contains(&"Completed regressions"));
    assert_eq!(updates.last(), Some(&(100, "Complete".to_string())));

    let improvement_percents: Vec<u8> = updates
        .iter()
        .filter(|(_, phase)| phase.contains("improvements"))
        .map(|(percent, _)| *percent)
        .collect();
    assert!(improvement_percents.windows(2).all(|w| w[0] <= w[1]));
    assert!(improvement_percents.iter().all(|p| (50..=75).contains(p)));
}

#[tokio::test(start_paused = true)]
async fn stalled_region_fails_the_whole_run() {
    let stuck = region("P0 Regressions", &REGRESSION_PAGES).stalled(perflab_scrape::host::Stall::Frozen);
    let page = SimulatedPage::new(Some(region("P0 Improvements", &IMPROVEMENT_PAGES)), Some(stuck));
    let options = Options {
        max_navigation_steps: 20,
        ..Options::default()
    };
    let result = extract(&page, &options, &NullProgress).await;

    assert!(!result.success);
    assert_eq!(result.total(), 0);
    assert!(result.message.contains("Pagination stalled"));
}

#[tokio::test(start_paused = true)]
async fn rows_with_unparsable_cells_are_skipped() {
    let page = SimulatedPage::new(
        Some(
            SimulatedRegion::new("P0 Improvements").page(vec![
                SimulatedRow::new("speedometer3/TodoMVC-React/Score", "desktop", "-4.5", "10 ms", "9 ms"),
                SimulatedRow::raw(&["speedometer3/Broken/Score", "desktop", "-1"]),
                SimulatedRow::new("speedometer3/Pending/Score", "desktop", "pending", "10 ms", "9 ms"),
            ]),
        ),
        Some(SimulatedRegion::new("P0 Regressions").page(vec![SimulatedRow::new(
            "jetstream2/Air/Runtime",
            "mobile",
            "3",
            "12 ms",
            "12.36 s",
        )])),
    );
    let result = extract(&page, &Options::immediate(), &NullProgress).await;

    assert!(result.success);
    assert_eq!(result.improvements.len(), 1);
    assert_eq!(result.regressions.len(), 1);
    assert_eq!(result.regressions[0].unit, "s");
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn regions_receive_stable_ids() {
    let page = comparison_page();
    let options = Options::immediate();
    let result = perflab_scrape::extract_blocking(&page, &options, &NullProgress).expect("runtime");
    assert!(result.success);
    assert_eq!(page.assigned_id("P0 Improvements").as_deref(), Some("P0ImprovementsWrapper"));
    assert_eq!(page.assigned_id("P0 Regressions").as_deref(), Some("P0RegressionsWrapper"));

    let snapshot = page.snapshot().expect("snapshot");
    assert!(snapshot.select("#P0RegressionsWrapper .ms-List-cell").exists());
}
