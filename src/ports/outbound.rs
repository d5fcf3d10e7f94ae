//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AuthUser, Chrome, Course, DomainError, ForumPost, Notice, NoticeKind, ProgressMap,
    ProgressPatch, Quiz,
};
use std::collections::HashMap;
use tokio::sync::oneshot;

/// Region that receives the rendered view.
pub const CONTENT_REGION: &str = "content-area";

/// Backend collections: catalog, per-user progress, quizzes, forum posts.
#[async_trait::async_trait]
pub trait DataStorePort: Send + Sync {
    async fn get_courses(&self) -> Result<Vec<Course>, DomainError>;

    /// Progress of `user_id` keyed by course id. Unknown users get an empty map.
    async fn get_progress(&self, user_id: &str) -> Result<ProgressMap, DomainError>;

    /// `None` = every quiz; `Some(id)` = quizzes of that course, in collection order.
    async fn get_quizzes(&self, course_id: Option<&str>) -> Result<Vec<Quiz>, DomainError>;

    /// `None` = every post; `Some(id)` = posts of that course, in collection order.
    async fn get_forum_posts(&self, course_id: Option<&str>)
    -> Result<Vec<ForumPost>, DomainError>;

    /// Shallow-merges `patch` into the (user, course) record, creating it if absent, and
    /// stamps `last_updated`. Last writer wins.
    async fn update_progress(
        &self,
        user_id: &str,
        course_id: &str,
        patch: &ProgressPatch,
    ) -> Result<(), DomainError>;
}

/// Session backend.
#[async_trait::async_trait]
pub trait AuthPort: Send + Sync {
    /// Signs in with a freshly minted opaque id.
    async fn sign_in_anonymously(&self) -> Result<AuthUser, DomainError>;

    /// Signs in with an id derived from the token's first 8 characters.
    async fn sign_in_with_token(&self, token: &str) -> Result<AuthUser, DomainError>;

    async fn sign_out(&self) -> Result<(), DomainError>;

    async fn current_user(&self) -> Option<AuthUser>;

    /// One-shot "auth state changed" notification. Fires exactly once, after the
    /// backend resolves the initial session (`None` = signed out).
    async fn on_auth_state_changed(
        &self,
    ) -> Result<oneshot::Receiver<Option<AuthUser>>, DomainError>;
}

/// Attributes of every visible element on the page, in document order.
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    elements: Vec<HashMap<String, String>>,
}

impl PageElements {
    pub fn new(elements: Vec<HashMap<String, String>>) -> Self {
        Self { elements }
    }

    pub fn has_id(&self, element_id: &str) -> bool {
        self.elements
            .iter()
            .any(|attrs| attrs.get("id").is_some_and(|id| id == element_id))
    }

    /// Values of `data_attr` on elements carrying `class`, duplicates removed.
    pub fn values_by_class(&self, class: &str, data_attr: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for attrs in &self.elements {
            let has_class = attrs
                .get("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class));
            if !has_class {
                continue;
            }
            if let Some(value) = attrs.get(data_attr) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        values
    }
}

/// Presentation layer. Regions and elements are addressed by stable identifiers or by a
/// class marker plus a data attribute.
#[async_trait::async_trait]
pub trait RenderSurface: Send + Sync {
    async fn has_region(&self, region_id: &str) -> bool;

    /// Replaces the region's markup. Fails with `MissingTarget` if the region is absent.
    async fn replace_region(&self, region_id: &str, markup: &str) -> Result<(), DomainError>;

    /// One pass over the current markup. Callers doing several lookups keep the result.
    async fn elements(&self) -> PageElements;

    /// True if a visible element with this id exists anywhere on the page.
    async fn find_by_id(&self, element_id: &str) -> bool {
        self.elements().await.has_id(element_id)
    }

    /// Values of `data_attr` on every visible element carrying `class`, in document
    /// order, duplicates removed.
    async fn find_by_class(&self, class: &str, data_attr: &str) -> Vec<String> {
        self.elements().await.values_by_class(class, data_attr)
    }

    async fn show_notice(&self, notice: &Notice) -> Result<(), DomainError>;

    async fn dismiss_notice(&self, kind: NoticeKind);

    async fn open_notice(&self, kind: NoticeKind) -> Option<Notice>;

    async fn update_chrome(&self, chrome: &Chrome) -> Result<(), DomainError>;

    /// Full page markup (chrome, content, open notices).
    async fn snapshot(&self) -> String;
}
