//! Implements DataStorePort over process memory.
//!
//! Seeded from the embedded demo dataset. Nothing survives a restart.

use crate::domain::{Course, DomainError, ForumPost, Progress, ProgressMap, ProgressPatch, Quiz};
use crate::ports::{Clock, DataStorePort};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Demo dataset embedded at compile time.
const SEED_JSON: &str = include_str!("seed.json");

/// Collections: courses, user_id -> (course_id -> Progress), quizzes, forum posts.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub courses: Vec<Course>,
    pub progress: HashMap<String, ProgressMap>,
    pub quizzes: Vec<Quiz>,
    pub forum_posts: Vec<ForumPost>,
}

impl StoreData {
    /// Parses the embedded demo dataset.
    pub fn seed() -> Result<Self, DomainError> {
        serde_json::from_str(SEED_JSON)
            .map_err(|e| DomainError::DataStore(format!("invalid seed data: {}", e)))
    }
}

/// In-memory store. Every call optionally sleeps `latency` to mimic a remote backend.
pub struct MemoryStore {
    data: RwLock<StoreData>,
    clock: Arc<dyn Clock>,
    latency: Duration,
}

impl MemoryStore {
    pub fn new(data: StoreData, clock: Arc<dyn Clock>) -> Self {
        Self {
            data: RwLock::new(data),
            clock,
            latency: Duration::ZERO,
        }
    }

    /// Store holding the embedded demo dataset.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        Ok(Self::new(StoreData::seed()?, clock))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Copy of a single progress record, if present.
    pub async fn progress_record(&self, user_id: &str, course_id: &str) -> Option<Progress> {
        let data = self.data.read().await;
        data.progress
            .get(user_id)
            .and_then(|m| m.get(course_id))
            .cloned()
    }
}

#[async_trait::async_trait]
impl DataStorePort for MemoryStore {
    async fn get_courses(&self) -> Result<Vec<Course>, DomainError> {
        self.simulate_latency().await;
        Ok(self.data.read().await.courses.clone())
    }

    async fn get_progress(&self, user_id: &str) -> Result<ProgressMap, DomainError> {
        self.simulate_latency().await;
        let data = self.data.read().await;
        Ok(data.progress.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_quizzes(&self, course_id: Option<&str>) -> Result<Vec<Quiz>, DomainError> {
        self.simulate_latency().await;
        let data = self.data.read().await;
        Ok(match course_id {
            Some(id) => data
                .quizzes
                .iter()
                .filter(|q| q.course_id == id)
                .cloned()
                .collect(),
            None => data.quizzes.clone(),
        })
    }

    async fn get_forum_posts(
        &self,
        course_id: Option<&str>,
    ) -> Result<Vec<ForumPost>, DomainError> {
        self.simulate_latency().await;
        let data = self.data.read().await;
        Ok(match course_id {
            Some(id) => data
                .forum_posts
                .iter()
                .filter(|p| p.course_id == id)
                .cloned()
                .collect(),
            None => data.forum_posts.clone(),
        })
    }

    async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        patch: &ProgressPatch,
    ) -> Result<(), DomainError> {
        self.simulate_latency().await;
        let stamp = self.clock.now_stamp();
        let mut data = self.data.write().await;
        let record = data
            .progress
            .entry(user_id.to_string())
            .or_default()
            .entry(course_id.to_string())
            .or_default();
        patch.apply(record);
        record.last_updated = Some(stamp);
        debug!(user_id, course_id, score = record.score, "progress updated");
        Ok(())
    }
}
