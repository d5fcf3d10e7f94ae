//! Core domain layer. No external I/O dependencies.
//!
//! Entities, application state and the derived figures the views show.

pub mod entities;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod state;
pub mod time;

pub use entities::{
    AuthUser, Course, ForumPost, Level, Notification, Progress, ProgressMap, ProgressPatch, Quiz,
    User, View,
};
pub use errors::DomainError;
pub use events::{Action, Chrome, Notice, NoticeKind, Target};
pub use state::{AppState, SessionState};
