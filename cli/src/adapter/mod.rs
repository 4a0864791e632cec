//! # API Adapter
//!
//! One narrow function per remote intent. Each builds the request, issues the call(s)
//! and hands back records or the remote error unchanged. Describe-many calls are
//! folded into a [`DescribedMap`] keyed by identifier.

pub mod clusters;
pub mod errors;
pub mod instances;
pub mod task_definitions;
pub mod tasks;
pub mod waiter;

use std::future::Future;

use shared::api::Page;
use shared::models::{Described, DescribedMap, Failure, Keyed};

use crate::client::ApiError;

pub use errors::PilotError;

/// Maximum identifiers accepted by a single describe call.
pub const DESCRIBE_BATCH: usize = 100;

/// Folds records and failures into `map`.
///
/// Every record key ends up with its record, every failure key with its failure, and a
/// key present in both lists carries both. Re-applying the same input leaves the map
/// unchanged.
pub fn merge_into<T: Keyed>(map: &mut DescribedMap<T>, records: Vec<T>, failures: Vec<Failure>) {
    for record in records {
        let Some(key) = record.key().map(str::to_string) else {
            tracing::warn!("Dropping described record without identifier");
            continue;
        };
        map.entry(key)
            .or_insert(Described {
                record: None,
                failure: None,
            })
            .record = Some(record);
    }
    for failure in failures {
        let Some(key) = failure.arn.clone() else {
            tracing::warn!(reason=?failure.reason, "Dropping failure without identifier");
            continue;
        };
        map.entry(key)
            .or_insert(Described {
                record: None,
                failure: None,
            })
            .failure = Some(failure);
    }
}

pub fn merge_described<T: Keyed>(records: Vec<T>, failures: Vec<Failure>) -> DescribedMap<T> {
    let mut map = DescribedMap::new();
    merge_into(&mut map, records, failures);
    map
}

/// Drains a paginated list operation, following continuation tokens to the end.
pub(crate) async fn collect_pages<P, F, Fut>(mut fetch: F) -> Result<Vec<String>, ApiError>
where
    P: Page,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, ApiError>>,
{
    let mut items = Vec::new();
    let mut token = None;
    loop {
        let (page, next) = fetch(token.take()).await?.items();
        items.extend(page);
        match next {
            Some(next) if !next.is_empty() => token = Some(next),
            _ => return Ok(items),
        }
    }
}
