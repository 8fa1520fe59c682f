//! Run a full paginated extraction against a generated comparison page.
//!
//! Usage: `simulate [PAGES] [ROWS_PER_PAGE]` (defaults: 3 pages of 4 rows).
//! Progress goes to stderr; the sorted tables and a summary go to stdout.

use std::time::Duration;

use perflab_scrape::host::{SimulatedPage, SimulatedRegion, SimulatedRow};
use perflab_scrape::report::{self, Summary, TableSort};
use perflab_scrape::session::{self, Session};
use perflab_scrape::{MetricRecord, Options};

const BENCHMARKS: [&str; 4] = ["speedometer3", "jetstream2", "motionmark", "loadline"];
const STORIES: [&str; 3] = ["TodoMVC", "Editor", "Canvas"];

fn arg(index: usize, default: usize) -> usize {
    std::env::args()
        .nth(index)
        .and_then(|a| a.parse().ok())
        .unwrap_or(default)
}

fn region(label: &str, sign: f64, pages: usize, rows: usize) -> SimulatedRegion {
    let mut region = SimulatedRegion::new(label);
    for page in 0..pages {
        let cells: Vec<SimulatedRow> = (0..rows)
            .map(|row| {
                let n = page * rows + row;
                let baseline = 100.0 + 37.5 * n as f64;
                let change = sign * (1.0 + (n % 7) as f64 * 1.5);
                let comparison = baseline * (1.0 + change / 100.0);
                SimulatedRow::new(
                    &format!(
                        "{}/{}/metric{}",
                        BENCHMARKS[n % BENCHMARKS.len()],
                        STORIES[n % STORIES.len()],
                        n
                    ),
                    if n % 2 == 0 { "desktop" } else { "mobile" },
                    &format!("{change:.1}"),
                    &format!("{baseline:.1} ms"),
                    &format!("{comparison:.1} ms"),
                )
            })
            .collect();
        region = region.page(cells);
    }
    region
}

fn print_table(title: &str, records: &[MetricRecord]) {
    let mut rows = records.to_vec();
    report::sort_records(&mut rows, TableSort::default());
    println!("{title}");
    for r in &rows {
        println!(
            "  {:<14} {:<8} {:<10} {:<8} {:>7} {:>12} {:>12}",
            r.benchmark,
            r.story,
            r.metric,
            r.group,
            report::format_percent_change(r.percent_change),
            report::format_value(r.baseline_value, &r.unit),
            report::format_value(r.comparison_value, &r.unit),
        );
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let pages = arg(1, 3).max(1);
    let rows = arg(2, 4);
    let page = SimulatedPage::new(
        Some(region("P0 Improvements", -1.0, pages, rows)),
        Some(region("P0 Regressions", 1.0, pages, rows)),
    )
    .with_busy_polls(2);
    let options = Options {
        warmup: Duration::from_millis(200),
        poll_interval: Duration::from_millis(10),
        page_advance_delay: Duration::from_millis(10),
        ..Options::default()
    };
    let session = Session::new(page, options);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };
    let progress = |percent: u8, phase: &str| eprintln!("[{percent:>3}%] {phase}");

    match runtime.block_on(session.results(&progress)) {
        Ok(snapshot) => {
            print_table("P0 Improvements", &snapshot.improvements);
            print_table("P0 Regressions", &snapshot.regressions);
            println!("{}", Summary::of(&snapshot.improvements, &snapshot.regressions));
            println!("navigation clicks: {}", session.page().clicks());
        }
        Err(e) => {
            eprintln!("{}", session::user_message(&e));
            std::process::exit(1);
        }
    }
}
