//! Application state. One record per running app, owned by the controller.

use crate::domain::entities::{
    Course, ForumPost, Notification, Progress, ProgressMap, Quiz, User, View,
};
use crate::domain::events::{Action, Chrome};

/// Session lifecycle: SignedOut -> SignedIn -> SignedOut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub current_view: View,
    pub user: Option<User>,
    pub courses: Vec<Course>,
    /// Progress of the signed-in (or most recently signed-in) user. Survives sign-out.
    pub progress: ProgressMap,
    pub quizzes: Vec<Quiz>,
    pub forum_posts: Vec<ForumPost>,
    pub notifications: Vec<Notification>,
    pub mobile_menu_open: bool,
    /// Action attached to the open modal notice.
    pub pending_action: Option<Action>,
    /// Bumped on every navigation.
    pub nav_epoch: u64,
    /// Bumped on every explicit sign-in / sign-out.
    pub session_epoch: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty collections, no session, home view.
    pub fn new() -> Self {
        Self {
            current_view: View::Home,
            user: None,
            courses: Vec::new(),
            progress: ProgressMap::new(),
            quizzes: Vec::new(),
            forum_posts: Vec::new(),
            notifications: default_notifications(),
            mobile_menu_open: false,
            pending_action: None,
            nav_epoch: 0,
            session_epoch: 0,
        }
    }

    pub fn session(&self) -> SessionState {
        if self.user.is_some() {
            SessionState::SignedIn
        } else {
            SessionState::SignedOut
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
        self.nav_epoch += 1;
    }

    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.session_epoch += 1;
    }

    /// Drops the session. Loaded progress is kept.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.session_epoch += 1;
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    pub fn find_quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn progress_for(&self, course_id: &str) -> Option<&Progress> {
        self.progress.get(course_id)
    }

    /// Enrollment is the presence of a Progress record.
    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.progress.contains_key(course_id)
    }

    pub fn is_completed(&self, course_id: &str) -> bool {
        self.progress_for(course_id).is_some_and(|p| p.completed)
    }

    /// Course title by id, falling back to the raw id.
    pub fn course_title<'a>(&'a self, course_id: &'a str) -> &'a str {
        self.find_course(course_id)
            .map(|c| c.title.as_str())
            .unwrap_or(course_id)
    }

    pub fn chrome(&self) -> Chrome {
        Chrome {
            user_display: self.user.as_ref().map(|u| u.display_name.clone()),
            signed_in: self.user.is_some(),
            dashboard_nav_visible: self.user.is_some(),
            mobile_menu_open: self.mobile_menu_open,
        }
    }
}

fn default_notifications() -> Vec<Notification> {
    let n = |id: u32, title: &str, message: &str, time: &str, read: bool| Notification {
        id,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read,
    };
    vec![
        n(
            1,
            "New Assignment Posted",
            "Database Systems Assignment 2 is now available",
            "2 hours ago",
            false,
        ),
        n(
            2,
            "Forum Reply",
            "Dr. Smith replied to your question in SE-101",
            "1 day ago",
            false,
        ),
        n(
            3,
            "Course Update",
            "New lecture videos added to Web Development course",
            "3 days ago",
            true,
        ),
        n(
            4,
            "Quiz Results",
            "Your Object-Oriented Design quiz is graded",
            "1 week ago",
            true,
        ),
    ]
}
