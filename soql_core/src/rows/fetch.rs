//! Asynchronous picklist value fetching.
//!
//! A fetch is described by a [`PicklistRequest`] that captures the target
//! row's [`RowKey`]. The caller runs the request against a
//! [`PicklistSource`] on whatever executor it likes and hands the resulting
//! [`PicklistResolution`] back to [`FilterRows::apply_picklist`]. Every clear
//! of a row bumps its generation, so a resolution that arrives after the row
//! was cleared, re-pointed at another field or removed is discarded.
//!
//! [`FilterRows::apply_picklist`]: super::FilterRows::apply_picklist

use std::fmt;
use std::future::Future;

use super::RowId;
use crate::metadata::PicklistOption;

/// Identity of a row at a point in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub id: RowId,
    pub generation: u64,
}

/// A picklist collaborator failed to return values
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Picklist fetch failed: {}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// Supplies candidate values for picklist fields
pub trait PicklistSource {
    fn picklist_values(
        &self,
        object_type: &str,
        field: &str,
    ) -> impl Future<Output = Result<Vec<PicklistOption>, FetchError>> + Send;
}

/// A pending fetch for one row
#[derive(Debug, Clone, PartialEq)]
pub struct PicklistRequest {
    pub key: RowKey,
    pub object_type: String,
    pub field: String,
}

impl PicklistRequest {
    pub fn new(key: RowKey, object_type: &str, field: &str) -> Self {
        Self {
            key,
            object_type: object_type.to_string(),
            field: field.to_string(),
        }
    }

    /// Runs the fetch, keeping the row key alongside the result
    pub async fn resolve<S: PicklistSource>(self, source: &S) -> PicklistResolution {
        let result = source
            .picklist_values(&self.object_type, &self.field)
            .await;

        PicklistResolution {
            key: self.key,
            field: self.field,
            result,
        }
    }
}

/// The completed fetch, ready to be applied to the row collection
#[derive(Debug, Clone, PartialEq)]
pub struct PicklistResolution {
    pub key: RowKey,
    pub field: String,
    pub result: Result<Vec<PicklistOption>, FetchError>,
}

/// What happened when a resolution was applied
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    /// Options were stored and the row's value input enabled
    Applied,
    /// The row was cleared, changed or removed since the request was made
    Stale,
    /// The collaborator returned an error; the row stays disabled
    Failed(FetchError),
}
