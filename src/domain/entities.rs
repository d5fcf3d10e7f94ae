//! Domain entities. Pure data structures for the core business.
//!
//! Serialized with camelCase keys so seed data reads like the backend documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry. Reference data; never mutated by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub duration: String,
    pub level: Level,
    /// Number of enrolled students (catalog figure, not this user's enrollment).
    pub enrolled: u32,
    pub rating: f32,
    pub lectures: u32,
    pub quizzes: u32,
}

/// Enrollment / completion / score state for one (user, course) pair.
///
/// Timestamps are kept as the strings the backend hands out (RFC 3339 or `YYYY-MM-DD`);
/// see [`crate::domain::time::parse_timestamp`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    pub enrolled: bool,
    pub enrolled_at: Option<String>,
    pub completed: bool,
    /// Not clamped: completing a course adds a fixed bonus on top of quiz scores.
    pub score: u32,
    pub completed_at: Option<String>,
    pub last_accessed: Option<String>,
    pub last_updated: Option<String>,
}

/// course_id -> Progress for a single user.
pub type ProgressMap = HashMap<String, Progress>;

/// Partial update merged into a [`Progress`] record. `None` leaves a field untouched.
///
/// `completed_at` is doubly optional so a patch can clear it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressPatch {
    pub enrolled: Option<bool>,
    pub enrolled_at: Option<String>,
    pub completed: Option<bool>,
    pub score: Option<u32>,
    pub completed_at: Option<Option<String>>,
    pub last_accessed: Option<String>,
}

impl ProgressPatch {
    /// Shallow merge into `target`.
    pub fn apply(&self, target: &mut Progress) {
        if let Some(enrolled) = self.enrolled {
            target.enrolled = enrolled;
        }
        if let Some(ref at) = self.enrolled_at {
            target.enrolled_at = Some(at.clone());
        }
        if let Some(completed) = self.completed {
            target.completed = completed;
        }
        if let Some(score) = self.score {
            target.score = score;
        }
        if let Some(ref at) = self.completed_at {
            target.completed_at = at.clone();
        }
        if let Some(ref at) = self.last_accessed {
            target.last_accessed = Some(at.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub questions: u32,
    pub due_date: String,
    pub completed: bool,
    /// 0 until taken.
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub replies: u32,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Relative label such as "2 hours ago".
    pub time: String,
    pub read: bool,
}

/// Identity returned by the auth backend. Display attributes may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Signed-in user held by the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Courses,
    Forum,
    Quizzes,
    Dashboard,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Home,
        View::Courses,
        View::Forum,
        View::Quizzes,
        View::Dashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Courses => "courses",
            View::Forum => "forum",
            View::Quizzes => "quizzes",
            View::Dashboard => "dashboard",
        }
    }

    /// Unknown names resolve to `None`; callers fall back to [`View::Home`].
    pub fn parse(name: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.as_str() == name)
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Courses => "Courses",
            View::Forum => "Forum",
            View::Quizzes => "Quizzes",
            View::Dashboard => "Dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_only_supplied_fields() {
        let mut p = Progress {
            enrolled: true,
            score: 40,
            last_accessed: Some("2025-03-01".into()),
            ..Default::default()
        };
        ProgressPatch {
            completed: Some(true),
            completed_at: Some(Some("2025-03-02".into())),
            ..Default::default()
        }
        .apply(&mut p);

        assert!(p.enrolled);
        assert!(p.completed);
        assert_eq!(p.score, 40);
        assert_eq!(p.completed_at.as_deref(), Some("2025-03-02"));
        assert_eq!(p.last_accessed.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn patch_can_clear_completed_at() {
        let mut p = Progress {
            completed: true,
            completed_at: Some("2025-01-15".into()),
            ..Default::default()
        };
        ProgressPatch {
            completed: Some(false),
            completed_at: Some(None),
            ..Default::default()
        }
        .apply(&mut p);
        assert!(!p.completed);
        assert_eq!(p.completed_at, None);
    }

    #[test]
    fn view_names_round_trip_and_unknown_is_none() {
        for v in View::ALL {
            assert_eq!(View::parse(v.as_str()), Some(v));
        }
        assert_eq!(View::parse("settings"), None);
    }

    #[test]
    fn progress_deserializes_with_missing_fields() {
        let p: Progress = serde_json::from_str(r#"{"completed":true,"score":85}"#).unwrap();
        assert!(p.completed);
        assert_eq!(p.score, 85);
        assert!(!p.enrolled);
        assert_eq!(p.completed_at, None);
    }
}
