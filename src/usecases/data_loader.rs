//! Initial catalog load: courses, quizzes and forum posts in one pass.

use crate::domain::{AppState, Course, DomainError, ForumPost, Quiz};
use crate::ports::DataStorePort;
use std::sync::Arc;
use tracing::{error, info};

/// Reference collections fetched at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub quizzes: Vec<Quiz>,
    pub forum_posts: Vec<ForumPost>,
}

impl Catalog {
    pub fn apply_to(self, state: &mut AppState) {
        state.courses = self.courses;
        state.quizzes = self.quizzes;
        state.forum_posts = self.forum_posts;
    }
}

pub struct DataLoader {
    store: Arc<dyn DataStorePort>,
}

impl DataLoader {
    pub fn new(store: Arc<dyn DataStorePort>) -> Self {
        Self { store }
    }

    /// Fetches the three collections concurrently. Any failure fails the whole load.
    pub async fn load_catalog(&self) -> Result<Catalog, DomainError> {
        let result = tokio::try_join!(
            self.store.get_courses(),
            self.store.get_quizzes(None),
            self.store.get_forum_posts(None),
        );
        match result {
            Ok((courses, quizzes, forum_posts)) => {
                info!(
                    courses = courses.len(),
                    quizzes = quizzes.len(),
                    forum_posts = forum_posts.len(),
                    "catalog loaded"
                );
                Ok(Catalog {
                    courses,
                    quizzes,
                    forum_posts,
                })
            }
            Err(e) => {
                error!(error = %e, "error loading initial data");
                Err(DomainError::DataLoad(e.to_string()))
            }
        }
    }
}
