//! Process-lifetime in-memory stores.
//!
//! Both repositories are cheap `Clone` handles over shared state, so a single
//! instance built at startup can be handed to every use case.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anyhow::anyhow;
use chrono::{DateTime, Utc};

use qrfeed_domain::id::{FeedbackId, QrCodeId};
use qrfeed_domain::sentiment::Sentiment;

use crate::domain::repository::{FeedbackRepository, QrCodeRepository};
use crate::domain::types::{Feedback, QrCode, ScanOutcome};
use crate::error::FeedbackServiceError;

fn poisoned<T>(_: PoisonError<T>) -> FeedbackServiceError {
    FeedbackServiceError::Internal(anyhow!("in-memory store lock poisoned"))
}

// ── QR codes ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct QrCodeTable {
    by_id: HashMap<QrCodeId, Arc<Mutex<QrCode>>>,
    order: Vec<QrCodeId>,
}

/// QR code registry. Each record sits behind its own mutex; the table lock is
/// only held long enough to find the record.
#[derive(Clone, Default)]
pub struct MemoryQrCodeRepository {
    table: Arc<RwLock<QrCodeTable>>,
}

impl MemoryQrCodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, id: QrCodeId) -> Result<Option<Arc<Mutex<QrCode>>>, FeedbackServiceError> {
        let table = self.table.read().map_err(poisoned)?;
        Ok(table.by_id.get(&id).cloned())
    }
}

impl QrCodeRepository for MemoryQrCodeRepository {
    async fn create(&self, code: &QrCode) -> Result<(), FeedbackServiceError> {
        let mut table = self.table.write().map_err(poisoned)?;
        if table
            .by_id
            .insert(code.id, Arc::new(Mutex::new(code.clone())))
            .is_none()
        {
            table.order.push(code.id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: QrCodeId) -> Result<Option<QrCode>, FeedbackServiceError> {
        let Some(record) = self.record(id)? else {
            return Ok(None);
        };
        let code = record.lock().map_err(poisoned)?;
        Ok(Some(code.clone()))
    }

    async fn list(&self) -> Result<Vec<QrCode>, FeedbackServiceError> {
        let table = self.table.read().map_err(poisoned)?;
        table
            .order
            .iter()
            .filter_map(|id| table.by_id.get(id))
            .map(|record| {
                record
                    .lock()
                    .map(|code| QrCode::clone(&code))
                    .map_err(poisoned)
            })
            .collect()
    }

    async fn consume_scan(
        &self,
        id: QrCodeId,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, FeedbackServiceError> {
        let Some(record) = self.record(id)? else {
            return Ok(ScanOutcome::NotFound);
        };
        let mut code = record.lock().map_err(poisoned)?;
        Ok(code.try_consume(now))
    }
}

// ── Feedback ─────────────────────────────────────────────────────────────────

/// Append-only feedback log. Records are pushed fully built, so readers never
/// observe a partial entry.
#[derive(Clone, Default)]
pub struct MemoryFeedbackRepository {
    entries: Arc<RwLock<Vec<Feedback>>>,
}

impl MemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered<P>(&self, predicate: P) -> Result<Vec<Feedback>, FeedbackServiceError>
    where
        P: Fn(&Feedback) -> bool,
    {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().filter(|&f| predicate(f)).cloned().collect())
    }
}

impl FeedbackRepository for MemoryFeedbackRepository {
    async fn insert(&self, feedback: Feedback) -> Result<(), FeedbackServiceError> {
        self.entries.write().map_err(poisoned)?.push(feedback);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackServiceError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().find(|f| f.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Feedback>, FeedbackServiceError> {
        self.filtered(|_| true)
    }

    async fn list_by_qr_id(&self, qr_id: &str) -> Result<Vec<Feedback>, FeedbackServiceError> {
        self.filtered(|f| f.qr_id == qr_id)
    }

    async fn list_by_sentiment(
        &self,
        sentiment: Sentiment,
    ) -> Result<Vec<Feedback>, FeedbackServiceError> {
        self.filtered(|f| f.sentiment == sentiment)
    }

    async fn list_recent(&self, count: usize) -> Result<Vec<Feedback>, FeedbackServiceError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut recent: Vec<Feedback> = entries.iter().rev().cloned().collect();
        drop(entries);
        // Stable sort keeps newer inserts first among equal timestamps.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(count);
        Ok(recent)
    }
}
