//! Message service over a record store.
//!
//! Provides the message operations used by the shell: sending, listing,
//! editing and archiving. Reads fail soft, writes fail hard.

use chrono::{FixedOffset, SecondsFormat, Utc};
use notionmail_store::{Filter, Patch, Query, Record, RecordStore};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::message::projection::{project, recipient_filter, text_patch, to_properties};
use crate::message::{
    EditOutcome, Message, MessageId, OutgoingMessage, StoredMessage, validate_id,
    validate_outgoing, validate_recipient,
};

/// Largest page size the Notion API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Message operations backed by a record store.
///
/// The store handle is owned by the service and only ever read.
#[derive(Debug)]
pub struct MessageService<S> {
    store: S,
    page_size: Option<u32>,
    display_offset: Option<FixedOffset>,
}

impl<S: RecordStore> MessageService<S> {
    /// Creates a service over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            page_size: None,
            display_offset: None,
        }
    }

    /// Sets the page size requested from the store, clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.clamp(1, MAX_PAGE_SIZE));
        self
    }

    /// Renders timestamps at a fixed offset instead of the local time zone.
    #[must_use]
    pub const fn with_display_offset(mut self, offset: FixedOffset) -> Self {
        self.display_offset = Some(offset);
        self
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Send a message and return its ID.
    ///
    /// An empty body is stored as the placeholder text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` without touching the store if the sender
    /// or recipient is blank, and `Error::Store` if the write fails.
    pub async fn send(&self, sender: &str, recipient: &str, text: &str) -> Result<MessageId> {
        validate_outgoing(sender, recipient)?;

        let outgoing = OutgoingMessage::new(sender, recipient, text);
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let id = self
            .store
            .create(to_properties(&outgoing, &timestamp))
            .await?;

        info!("Sent message {id} from {sender:?} to {recipient:?}");
        Ok(id)
    }

    /// List the active messages addressed to `recipient`.
    ///
    /// Store failures are logged and yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the recipient is blank.
    pub async fn list_for(&self, recipient: &str) -> Result<Vec<Message>> {
        match self.try_list_for(recipient).await {
            Ok(messages) => Ok(messages),
            Err(e) if e.is_validation() => Err(e),
            Err(e) => {
                error!("Failed to fetch messages for {recipient:?}: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// List the active messages addressed to `recipient`, propagating store failures.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the recipient is blank and `Error::Store`
    /// if any page fails to load.
    pub async fn try_list_for(&self, recipient: &str) -> Result<Vec<Message>> {
        validate_recipient(recipient)?;

        let records = self.collect_records(Some(recipient_filter(recipient))).await?;
        let total = records.len();

        let messages: Vec<Message> = records
            .iter()
            .filter_map(|record| self.to_stored(record).into_active())
            .collect();

        if messages.len() < total {
            debug!(
                "Skipped {} archived records for {recipient:?}",
                total - messages.len()
            );
        }
        Ok(messages)
    }

    /// Retrieve a single message, archived or not.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the store has no such record.
    pub async fn retrieve(&self, id: &MessageId) -> Result<StoredMessage> {
        validate_id(id.as_str())?;

        let record = self
            .store
            .retrieve(id)
            .await
            .map_err(|e| not_found_as(id, e))?;
        Ok(self.to_stored(&record))
    }

    /// Replace the text of a message.
    ///
    /// Blank text leaves the message untouched and reports `Unchanged`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the message does not exist or is archived,
    /// and `Error::Store` if the update fails.
    pub async fn edit(&self, id: &MessageId, new_text: &str) -> Result<EditOutcome> {
        let current = self.retrieve(id).await?;
        if current.is_archived() {
            return Err(Error::NotFound(id.to_string()));
        }

        if new_text.trim().is_empty() {
            debug!("Blank replacement for {id}, nothing to do");
            return Ok(EditOutcome::Unchanged);
        }

        self.store
            .update(id, text_patch(new_text))
            .await
            .map_err(|e| not_found_as(id, e))?;

        info!("Updated text of message {id}");
        Ok(EditOutcome::Updated)
    }

    /// Archive a message. Archiving an archived message is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the message does not exist and
    /// `Error::Store` if the update fails.
    pub async fn delete_one(&self, id: &MessageId) -> Result<()> {
        validate_id(id.as_str())?;

        self.store
            .update(id, Patch::Archive)
            .await
            .map_err(|e| not_found_as(id, e))?;

        info!("Archived message {id}");
        Ok(())
    }

    /// Archive every record in the store, whatever its recipient.
    ///
    /// Records are enumerated first, then archived one at a time. Nothing is
    /// rolled back on failure.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if enumeration fails, and
    /// `Error::PartialDelete` with the number already archived if an
    /// archive call fails.
    pub async fn delete_all(&self) -> Result<usize> {
        let records = self.collect_records(None).await?;
        debug!("Archiving {} records", records.len());

        let mut archived = 0;
        for record in &records {
            if let Err(e) = self.store.update(&record.id, Patch::Archive).await {
                warn!(
                    "Archiving stopped at {} after {archived} of {}: {e}",
                    record.id,
                    records.len()
                );
                return Err(Error::PartialDelete {
                    archived,
                    source: Box::new(not_found_as(&record.id, e)),
                });
            }
            archived += 1;
        }

        info!("Archived {archived} messages");
        Ok(archived)
    }

    /// Follow the cursor chain until the store reports no further page.
    async fn collect_records(&self, filter: Option<Filter>) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut cursor = None;
        let mut pages = 0_usize;

        loop {
            let mut query = Query::new().with_cursor(cursor.take());
            if let Some(filter) = &filter {
                query = query.with_filter(filter.clone());
            }
            if let Some(size) = self.page_size {
                query = query.with_page_size(size);
            }

            let page = self.store.query(&query).await?;
            pages += 1;
            records.extend(page.records);

            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Fetched {} records in {pages} pages", records.len());
        Ok(records)
    }

    fn to_stored(&self, record: &Record) -> StoredMessage {
        project(record, self.display_offset.as_ref())
    }
}

/// Report store-level not-found errors against the requested ID.
fn not_found_as(id: &MessageId, error: notionmail_store::Error) -> Error {
    if error.is_not_found() {
        Error::NotFound(id.to_string())
    } else {
        Error::from(error)
    }
}
