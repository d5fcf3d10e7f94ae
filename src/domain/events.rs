//! UI-facing value types: click targets, actions bound to them, notices and chrome.

use crate::domain::entities::View;
use std::fmt;

/// A clickable element on the rendered page.
///
/// Either a stable element id, or a shared class marker plus the value of the
/// element's data attribute (e.g. `enroll-btn` / `se-101`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Id(String),
    Marker { class: String, data: String },
}

impl Target {
    pub fn id(id: impl Into<String>) -> Self {
        Target::Id(id.into())
    }

    pub fn marker(class: impl Into<String>, data: impl Into<String>) -> Self {
        Target::Marker {
            class: class.into(),
            data: data.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "#{}", id),
            Target::Marker { class, data } => write!(f, ".{}[{}]", class, data),
        }
    }
}

/// Controller operation triggered by a bound target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(View),
    /// Mobile nav entry: navigates and closes the mobile menu.
    NavigateMobile(View),
    ToggleMobileMenu,
    /// Auth button: signs out when signed in, signs in otherwise.
    ToggleAuth,
    DashboardSignIn,
    Enroll(String),
    ToggleComplete(String),
    WatchPreview(String),
    /// Offers the quiz simulation; the notice action starts it.
    TakeQuiz(String),
    StartQuiz(String),
    OpenCourseForum(String),
    DismissNotice(NoticeKind),
    /// Runs the action attached to the open modal notice, if any.
    ConfirmNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Modal,
    Video,
}

/// User-visible notice (modal dialog or video preview).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub action_label: String,
    pub action: Option<Action>,
}

impl Notice {
    /// Plain modal with a "Close" button.
    pub fn modal(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Modal,
            title: title.into(),
            message: message.into(),
            action_label: "Close".to_string(),
            action: None,
        }
    }

    /// Modal whose action button runs `action`.
    pub fn with_action(mut self, label: impl Into<String>, action: Option<Action>) -> Self {
        self.action_label = label.into();
        self.action = action;
        self
    }

    /// Video preview for a course's first lecture.
    pub fn video(course_title: &str, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Video,
            title: format!("{} - Lecture 1", course_title),
            message: description.into(),
            action_label: "Close".to_string(),
            action: None,
        }
    }
}

/// Page chrome outside the content area, derived from state on every render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chrome {
    /// Display name shown in the header; `None` hides it.
    pub user_display: Option<String>,
    pub signed_in: bool,
    pub dashboard_nav_visible: bool,
    pub mobile_menu_open: bool,
}

impl Chrome {
    pub fn auth_label(&self) -> &'static str {
        if self.signed_in { "Sign Out" } else { "Sign In" }
    }
}
