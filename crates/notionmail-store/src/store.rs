//! The record store abstraction.

use std::future::Future;

use crate::error::Result;
use crate::record::{Patch, Properties, Query, QueryPage, Record, RecordId};

/// A remote document database holding one record per entry.
///
/// Every method performs exactly one remote call and never retries.
/// Implementations are expected to enforce their own transport timeout.
pub trait RecordStore {
    /// Creates a record with the given properties and returns its new ID.
    fn create(&self, properties: Properties) -> impl Future<Output = Result<RecordId>> + Send;

    /// Fetches one page of records matching the query.
    fn query(&self, query: &Query) -> impl Future<Output = Result<QueryPage>> + Send;

    /// Retrieves a single record.
    ///
    /// Fails with [`crate::Error::NotFound`] if no such record exists.
    fn retrieve(&self, id: &RecordId) -> impl Future<Output = Result<Record>> + Send;

    /// Applies a patch to a record and returns the updated record.
    ///
    /// Fails with [`crate::Error::NotFound`] if no such record exists.
    fn update(&self, id: &RecordId, patch: Patch) -> impl Future<Output = Result<Record>> + Send;
}
