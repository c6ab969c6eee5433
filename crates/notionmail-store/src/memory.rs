//! In-memory record store for testing without network.
//!
//! Records are kept in insertion order. Queries return archived records too,
//! like a store that cannot filter them server-side, so callers must hide
//! archived records themselves.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::record::{Patch, Properties, Query, QueryPage, Record, RecordId};
use crate::store::RecordStore;

/// Default page size, matching the Notion API maximum.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A store call, as recorded by [`MemoryStore::calls`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `create` with the given properties.
    Create(Properties),
    /// `query` with the given parameters.
    Query(Query),
    /// `retrieve` of the given ID.
    Retrieve(RecordId),
    /// `update` of the given ID.
    Update(RecordId, Patch),
}

/// Failure injected into a [`MemoryStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Failure {
    /// Every call succeeds.
    #[default]
    None,
    /// Every query fails.
    Queries,
    /// Every create fails.
    Creates,
    /// Updates fail once this many have succeeded.
    UpdatesAfter(usize),
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    calls: Vec<Call>,
    next_id: u64,
    updates_ok: usize,
}

/// Record store backed by a vector.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
    page_size: usize,
    failure: Failure,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: DEFAULT_PAGE_SIZE,
            failure: Failure::None,
        }
    }

    /// Sets the maximum number of records per query page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Injects a failure.
    #[must_use]
    pub const fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }

    /// Returns every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Returns a snapshot of every stored record, archived ones included.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    /// Inserts a record directly, bypassing the call log.
    pub fn insert(&self, record: Record) {
        self.lock().records.push(record);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn injected(operation: &str) -> Error {
        Error::api_error(503, "service_unavailable", format!("injected {operation} failure"))
    }
}

impl RecordStore for MemoryStore {
    async fn create(&self, properties: Properties) -> Result<RecordId> {
        let mut state = self.lock();
        state.calls.push(Call::Create(properties.clone()));

        if self.failure == Failure::Creates {
            return Err(Self::injected("create"));
        }

        state.next_id += 1;
        let id = RecordId::new(format!("page-{:04}", state.next_id));
        state.records.push(Record {
            id: id.clone(),
            archived: false,
            properties,
        });
        Ok(id)
    }

    async fn query(&self, query: &Query) -> Result<QueryPage> {
        let mut state = self.lock();
        state.calls.push(Call::Query(query.clone()));

        if self.failure == Failure::Queries {
            return Err(Self::injected("query"));
        }

        let offset = match &query.start_cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| Error::api_error(400, "validation_error", "invalid start_cursor"))?,
            None => 0,
        };
        let page_size = query
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .map_or(self.page_size, |size| size.min(self.page_size))
            .max(1);

        let matching: Vec<&Record> = state
            .records
            .iter()
            .filter(|record| query.filter.as_ref().is_none_or(|f| f.matches(record)))
            .collect();

        let records: Vec<Record> = matching
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|record| (*record).clone())
            .collect();
        let end = offset + records.len();
        let next_cursor = (end < matching.len()).then(|| end.to_string());

        Ok(QueryPage {
            records,
            next_cursor,
        })
    }

    async fn retrieve(&self, id: &RecordId) -> Result<Record> {
        let mut state = self.lock();
        state.calls.push(Call::Retrieve(id.clone()));

        state
            .records
            .iter()
            .find(|record| record.id == *id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Could not find page with ID: {id}")))
    }

    async fn update(&self, id: &RecordId, patch: Patch) -> Result<Record> {
        let mut state = self.lock();
        state.calls.push(Call::Update(id.clone(), patch.clone()));

        if let Failure::UpdatesAfter(limit) = self.failure
            && state.updates_ok >= limit
        {
            return Err(Self::injected("update"));
        }

        let record = state
            .records
            .iter_mut()
            .find(|record| record.id == *id)
            .ok_or_else(|| Error::NotFound(format!("Could not find page with ID: {id}")))?;

        match patch {
            Patch::Properties(properties) => record.properties.extend(properties),
            Patch::Archive => record.archived = true,
        }
        let updated = record.clone();
        state.updates_ok += 1;
        Ok(updated)
    }
}
