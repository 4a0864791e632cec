use std::collections::BTreeMap;

use serde::Serialize;

use super::Failure;

/// Outcome of describing one identifier: the record, a failure, or both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Described<T> {
    pub record: Option<T>,
    pub failure: Option<Failure>,
}

impl<T> Described<T> {
    pub fn found(record: T) -> Self {
        Described {
            record: Some(record),
            failure: None,
        }
    }

    pub fn failed(failure: Failure) -> Self {
        Described {
            record: None,
            failure: Some(failure),
        }
    }
}

/// Describe results keyed by identifier.
pub type DescribedMap<T> = BTreeMap<String, Described<T>>;
