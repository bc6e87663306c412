//! Bounded, in-memory record of user-visible activity.
//!
//! Every entry lands in two buffers: a detail buffer backing the full log
//! view and a short digest shown on the main screen. Both keep the most
//! recent entry first and drop their oldest entry independently once full.

use std::{collections::VecDeque, sync::Arc};

use chrono::{DateTime, Local};
use shared::domain::LogSeverity;

pub const DETAIL_CAPACITY: usize = 50;
pub const DIGEST_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonic insertion counter; breaks ties between equal timestamps.
    pub sequence: u64,
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub severity: LogSeverity,
}

impl LogEntry {
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%m/%d/%Y, %H:%M:%S").to_string()
    }
}

#[derive(Debug)]
pub struct ActivityLog {
    detail: VecDeque<Arc<LogEntry>>,
    digest: VecDeque<Arc<LogEntry>>,
    detail_capacity: usize,
    digest_capacity: usize,
    next_sequence: u64,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacities(DETAIL_CAPACITY, DIGEST_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacities(detail_capacity: usize, digest_capacity: usize) -> Self {
        Self {
            detail: VecDeque::with_capacity(detail_capacity),
            digest: VecDeque::with_capacity(digest_capacity),
            detail_capacity,
            digest_capacity,
            next_sequence: 0,
        }
    }

    pub fn record(&mut self, message: impl Into<String>, severity: LogSeverity) -> Arc<LogEntry> {
        let entry = Arc::new(LogEntry {
            sequence: self.next_sequence,
            timestamp: Local::now(),
            message: message.into(),
            severity,
        });
        self.next_sequence += 1;

        push_bounded(&mut self.detail, Arc::clone(&entry), self.detail_capacity);
        push_bounded(&mut self.digest, Arc::clone(&entry), self.digest_capacity);
        entry
    }

    /// Full log, most recent first.
    pub fn detail(&self) -> impl Iterator<Item = &LogEntry> {
        self.detail.iter().map(Arc::as_ref)
    }

    /// Recent-activity digest, most recent first.
    pub fn digest(&self) -> impl Iterator<Item = &LogEntry> {
        self.digest.iter().map(Arc::as_ref)
    }

    pub fn detail_len(&self) -> usize {
        self.detail.len()
    }

    pub fn digest_len(&self) -> usize {
        self.digest.len()
    }
}

fn push_bounded(buffer: &mut VecDeque<Arc<LogEntry>>, entry: Arc<LogEntry>, capacity: usize) {
    buffer.push_front(entry);
    buffer.truncate(capacity);
}
