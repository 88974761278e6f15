//! Latency harness for offset vs cursor pagination
//!
//! Runs a fixed set of page requests against a pager and reports the
//! min/mean/max latency per scenario. Offset pages near the end of a large
//! collection pay for the skip; cursor pages should not.

use crate::error::Result;
use crate::pagination::{CursorRequest, OffsetRequest, Pager, PaginationRequest};
use crate::store::RecordStore;
use serde::Serialize;
use std::time::{Duration, Instant};

/// One benchmark scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub request: PaginationRequest,
}

/// Timing summary for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub iterations: u32,
    pub records: usize,
    pub min_us: u128,
    pub mean_us: u128,
    pub max_us: u128,
}

/// Build the scenarios for a collection of `total_records` active records
pub fn scenarios(total_records: u64, page_size: u32) -> Result<Vec<Scenario>> {
    let size = i64::from(CursorRequest::new(0, i64::from(page_size))?.page_size());
    let total = i64::try_from(total_records).unwrap_or(i64::MAX);
    let total_pages = total_records.div_ceil(size as u64).max(1) as i64;
    let offset = |page: i64| -> Result<PaginationRequest> {
        Ok(OffsetRequest::new(page.max(1), size)?.into())
    };
    let cursor = |at: i64| CursorRequest::new(at.max(0), size);

    Ok(vec![
        Scenario {
            name: "offset: first page",
            request: offset(1)?,
        },
        Scenario {
            name: "offset: next page",
            request: offset(2)?,
        },
        Scenario {
            name: "offset: previous page",
            request: offset(total_pages - 1)?,
        },
        Scenario {
            name: "offset: last page",
            request: offset(total_pages)?,
        },
        Scenario {
            name: "offset: near end",
            request: offset(total_pages - 5)?,
        },
        Scenario {
            name: "cursor: first page",
            request: cursor(0)?.into(),
        },
        Scenario {
            name: "cursor: next page",
            request: cursor(size)?.into(),
        },
        Scenario {
            name: "cursor: previous page",
            request: cursor(2 * size)?.previous_page(true).into(),
        },
        Scenario {
            name: "cursor: last page",
            request: cursor(total - size)?.into(),
        },
        Scenario {
            name: "cursor: near end",
            request: cursor(total - 500)?.into(),
        },
    ])
}

/// Run every scenario `iterations` times
pub async fn run<S>(
    pager: &Pager<S>,
    scenarios: &[Scenario],
    iterations: u32,
) -> Result<Vec<ScenarioResult>>
where
    S: RecordStore + ?Sized,
{
    let iterations = iterations.max(1);
    let mut results = Vec::with_capacity(scenarios.len());

    for scenario in scenarios {
        let mut min = Duration::MAX;
        let mut max = Duration::ZERO;
        let mut total = Duration::ZERO;
        let mut records = 0;

        for _ in 0..iterations {
            let started = Instant::now();
            let page = pager.paginate(&scenario.request).await?;
            let elapsed = started.elapsed();

            records = page.data.len();
            min = min.min(elapsed);
            max = max.max(elapsed);
            total += elapsed;
        }

        let result = ScenarioResult {
            name: scenario.name,
            iterations,
            records,
            min_us: min.as_micros(),
            mean_us: (total / iterations).as_micros(),
            max_us: max.as_micros(),
        };
        tracing::info!(
            scenario = result.name,
            mean_us = result.mean_us as u64,
            "Benchmark scenario done"
        );
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{seed_users, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_scenarios_for_seeded_collection() {
        let scenarios = scenarios(10_000, 50).unwrap();
        assert_eq!(scenarios.len(), 10);

        let last = scenarios
            .iter()
            .find(|s| s.name == "offset: last page")
            .unwrap();
        assert_eq!(last.request, OffsetRequest::new(200, 50).unwrap().into());

        let cursor_last = scenarios
            .iter()
            .find(|s| s.name == "cursor: last page")
            .unwrap();
        assert_eq!(cursor_last.request, CursorRequest::new(9950, 50).unwrap().into());
    }

    #[test]
    fn test_scenarios_for_tiny_collection() {
        let scenarios = scenarios(3, 50).unwrap();
        assert!(scenarios.iter().all(|s| match s.request {
            PaginationRequest::Offset(o) => o.page() >= 1,
            PaginationRequest::Cursor(c) => c.cursor() >= 0,
        }));
    }

    #[test]
    fn test_scenarios_reject_zero_page_size() {
        let err = scenarios(100, 0).unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.public_message(), "page size must be greater than 0");
    }

    #[tokio::test]
    async fn test_run_reports_every_scenario() {
        let pager = Pager::new(Arc::new(
            MemoryStore::from_records(seed_users(1_000)).unwrap(),
        ));
        let scenarios = scenarios(1_000, 50).unwrap();
        let results = run(&pager, &scenarios, 2).await.unwrap();

        assert_eq!(results.len(), scenarios.len());
        for result in &results {
            assert_eq!(result.iterations, 2);
            assert!(result.min_us <= result.max_us);
        }
        let first = results.iter().find(|r| r.name == "cursor: first page").unwrap();
        assert_eq!(first.records, 50);
    }
}
