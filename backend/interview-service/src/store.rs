//! In-memory interview storage
//!
//! Process-local and lost on restart. Good enough for the interview API to
//! have somewhere to put data; swap for a database-backed store when needed.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewRecord {
    pub id: Uuid,
    pub owner: String,
    pub candidate_name: String,
    pub position: String,
    pub scheduled_at: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default)]
pub struct InterviewStore {
    records: Arc<DashMap<Uuid, InterviewRecord>>,
}

impl InterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &self,
        owner: &str,
        candidate_name: String,
        position: String,
        scheduled_at: i64,
    ) -> InterviewRecord {
        let record = InterviewRecord {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            candidate_name,
            position,
            scheduled_at,
            created_at: Utc::now().timestamp(),
        };
        self.records.insert(record.id, record.clone());
        record
    }

    pub fn get(&self, id: &Uuid) -> Option<InterviewRecord> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    /// All interviews owned by `owner`, earliest first
    pub fn list_for_owner(&self, owner: &str) -> Vec<InterviewRecord> {
        let mut records: Vec<InterviewRecord> = self
            .records
            .iter()
            .filter(|entry| entry.owner == owner)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| (record.scheduled_at, record.created_at));
        records
    }
}
