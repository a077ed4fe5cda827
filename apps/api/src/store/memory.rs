#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{DateRange, PromptStore, StoreError};
use crate::models::prompt::{NewPrompt, PromptRecord};

/// In-process store. Used for local runs (`NEBULA_STORE=memory`) and as the
/// test double for everything above the store seam.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<PromptRecord>>,
    fail_inserts: AtomicBool,
    fail_lists: AtomicBool,
    insert_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds pre-existing rows, e.g. fixtures with fixed `created_at`.
    pub fn with_rows(rows: Vec<PromptRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Makes subsequent inserts fail, simulating a rejected write.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent lists fail, simulating a rejected read.
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<PromptRecord>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PromptStore for MemoryStore {
    async fn insert(&self, prompt: NewPrompt) -> Result<PromptRecord, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert rejected".to_string()));
        }

        let record = PromptRecord {
            id: Uuid::new_v4(),
            text: prompt.text,
            platform: prompt.platform,
            content_date: prompt.content_date,
            layout_type: prompt.layout_type,
            created_at: Utc::now(),
        };
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn list(&self, range: Option<DateRange>) -> Result<Vec<PromptRecord>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("list rejected".to_string()));
        }

        let mut rows: Vec<PromptRecord> = self
            .lock()?
            .iter()
            .filter(|r| match range {
                None => true,
                Some(range) => r.content_date.is_some_and(|d| range.contains(d)),
            })
            .cloned()
            .collect();
        // Stable sort: rows inserted later win ties on equal timestamps.
        rows.reverse();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
