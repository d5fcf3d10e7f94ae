//! Binding table: which action each clickable element on the current page triggers.
//!
//! Rebuilt from the surface after every render; a table from an earlier render is
//! discarded, so clicks on elements that no longer exist resolve to nothing.

use crate::domain::{Action, AppState, NoticeKind, Target, View};
use crate::ports::RenderSurface;

/// Element ids with a fixed action.
const ID_BINDINGS: &[(&str, IdAction)] = &[
    ("nav-home", IdAction::Navigate(View::Home)),
    ("nav-courses", IdAction::Navigate(View::Courses)),
    ("nav-forum", IdAction::Navigate(View::Forum)),
    ("nav-quizzes", IdAction::Navigate(View::Quizzes)),
    ("nav-dashboard", IdAction::Navigate(View::Dashboard)),
    ("nav-home-mobile", IdAction::NavigateMobile(View::Home)),
    ("nav-courses-mobile", IdAction::NavigateMobile(View::Courses)),
    ("nav-dashboard-mobile", IdAction::NavigateMobile(View::Dashboard)),
    ("mobile-menu-btn", IdAction::ToggleMobileMenu),
    ("auth-button", IdAction::ToggleAuth),
    ("dashboard-signin-btn", IdAction::DashboardSignIn),
    ("modal-action", IdAction::ConfirmNotice),
    ("modal-close", IdAction::Dismiss(NoticeKind::Modal)),
    ("video-close", IdAction::Dismiss(NoticeKind::Video)),
];

#[derive(Debug, Clone, Copy)]
enum IdAction {
    Navigate(View),
    NavigateMobile(View),
    ToggleMobileMenu,
    ToggleAuth,
    DashboardSignIn,
    ConfirmNotice,
    Dismiss(NoticeKind),
}

impl IdAction {
    fn to_action(self) -> Action {
        match self {
            IdAction::Navigate(v) => Action::Navigate(v),
            IdAction::NavigateMobile(v) => Action::NavigateMobile(v),
            IdAction::ToggleMobileMenu => Action::ToggleMobileMenu,
            IdAction::ToggleAuth => Action::ToggleAuth,
            IdAction::DashboardSignIn => Action::DashboardSignIn,
            IdAction::ConfirmNotice => Action::ConfirmNotice,
            IdAction::Dismiss(kind) => Action::DismissNotice(kind),
        }
    }
}

/// Class markers and the data attribute carrying the element's parameter.
const MARKERS: &[(&str, &str)] = &[
    ("nav-link", "data-view"),
    ("enroll-btn", "data-course-id"),
    ("complete-course-btn", "data-course-id"),
    ("watch-video-btn", "data-course-id"),
    ("course-forum-link", "data-course-id"),
    ("take-quiz-btn", "data-quiz-id"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub action: Action,
    /// Human-readable description for menus and logs.
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    pub generation: u64,
    pub bindings: Vec<Binding>,
}

impl BindingTable {
    /// Scans the surface and binds every element found.
    pub async fn build(surface: &dyn RenderSurface, state: &AppState, generation: u64) -> Self {
        let elements = surface.elements().await;
        let mut bindings = Vec::new();

        for (id, id_action) in ID_BINDINGS {
            if elements.has_id(id) {
                let action = id_action.to_action();
                bindings.push(Binding {
                    target: Target::id(*id),
                    label: describe(&action, state),
                    action,
                });
            }
        }

        for (class, data_attr) in MARKERS {
            for value in elements.values_by_class(class, data_attr) {
                let Some(action) = marker_action(class, &value) else {
                    continue;
                };
                bindings.push(Binding {
                    target: Target::marker(*class, value),
                    label: describe(&action, state),
                    action,
                });
            }
        }

        Self {
            generation,
            bindings,
        }
    }

    pub fn resolve(&self, target: &Target) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|b| &b.target == target)
            .map(|b| &b.action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn marker_action(class: &str, value: &str) -> Option<Action> {
    let id = value.to_string();
    match class {
        // unknown view names fall back to home
        "nav-link" => Some(Action::Navigate(View::parse(value).unwrap_or(View::Home))),
        "enroll-btn" => Some(Action::Enroll(id)),
        "complete-course-btn" => Some(Action::ToggleComplete(id)),
        "watch-video-btn" => Some(Action::WatchPreview(id)),
        "course-forum-link" => Some(Action::OpenCourseForum(id)),
        "take-quiz-btn" => Some(Action::TakeQuiz(id)),
        _ => None,
    }
}

fn describe(action: &Action, state: &AppState) -> String {
    let quiz_title = |id: &str| {
        state
            .find_quiz(id)
            .map(|q| q.title.clone())
            .unwrap_or_else(|| id.to_string())
    };
    match action {
        Action::Navigate(view) => format!("Go to {}", view.title()),
        Action::NavigateMobile(view) => format!("Go to {} (mobile menu)", view.title()),
        Action::ToggleMobileMenu => {
            if state.mobile_menu_open {
                "Close menu".to_string()
            } else {
                "Open menu".to_string()
            }
        }
        Action::ToggleAuth => state.chrome().auth_label().to_string(),
        Action::DashboardSignIn => "Sign In Now".to_string(),
        Action::Enroll(id) => format!("Enroll: {}", state.course_title(id)),
        Action::ToggleComplete(id) => {
            if state.is_completed(id) {
                format!("Reopen: {}", state.course_title(id))
            } else {
                format!("Mark complete: {}", state.course_title(id))
            }
        }
        Action::WatchPreview(id) => format!("Watch preview: {}", state.course_title(id)),
        Action::TakeQuiz(id) => format!("Take quiz: {}", quiz_title(id)),
        Action::StartQuiz(id) => format!("Start quiz: {}", quiz_title(id)),
        Action::OpenCourseForum(id) => format!("Course forum: {}", state.course_title(id)),
        Action::DismissNotice(NoticeKind::Modal) => "Close dialog".to_string(),
        Action::DismissNotice(NoticeKind::Video) => "Close video".to_string(),
        Action::ConfirmNotice => "Confirm dialog".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::surface::HtmlPage;
    use crate::domain::{Chrome, DomainError, Notice};
    use crate::ports::{CONTENT_REGION, PageElements};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts markup scans.
    struct CountingPage {
        page: HtmlPage,
        scans: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RenderSurface for CountingPage {
        async fn has_region(&self, region_id: &str) -> bool {
            self.page.has_region(region_id).await
        }

        async fn replace_region(&self, region_id: &str, markup: &str) -> Result<(), DomainError> {
            self.page.replace_region(region_id, markup).await
        }

        async fn elements(&self) -> PageElements {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.page.elements().await
        }

        async fn show_notice(&self, notice: &Notice) -> Result<(), DomainError> {
            self.page.show_notice(notice).await
        }

        async fn dismiss_notice(&self, kind: NoticeKind) {
            self.page.dismiss_notice(kind).await
        }

        async fn open_notice(&self, kind: NoticeKind) -> Option<Notice> {
            self.page.open_notice(kind).await
        }

        async fn update_chrome(&self, chrome: &Chrome) -> Result<(), DomainError> {
            self.page.update_chrome(chrome).await
        }

        async fn snapshot(&self) -> String {
            self.page.snapshot().await
        }
    }

    #[tokio::test]
    async fn binds_chrome_and_markers() {
        let page = HtmlPage::new();
        page.replace_region(
            CONTENT_REGION,
            r#"<button class="enroll-btn" data-course-id="se-101">Enroll</button>
               <button class="nav-link" data-view="bogus">x</button>"#,
        )
        .await
        .unwrap();
        let state = AppState::new();
        let table = BindingTable::build(&page, &state, 3).await;

        assert_eq!(table.generation, 3);
        assert_eq!(
            table.resolve(&Target::id("auth-button")),
            Some(&Action::ToggleAuth)
        );
        assert_eq!(
            table.resolve(&Target::marker("enroll-btn", "se-101")),
            Some(&Action::Enroll("se-101".into()))
        );
        assert_eq!(
            table.resolve(&Target::marker("nav-link", "bogus")),
            Some(&Action::Navigate(View::Home))
        );
        // hidden while signed out
        assert_eq!(table.resolve(&Target::id("nav-dashboard")), None);
        assert_eq!(table.resolve(&Target::id("modal-close")), None);
    }

    #[tokio::test]
    async fn build_scans_the_page_once() {
        let surface = CountingPage {
            page: HtmlPage::new(),
            scans: AtomicUsize::new(0),
        };
        surface
            .replace_region(
                CONTENT_REGION,
                r#"<button class="take-quiz-btn" data-quiz-id="quiz-1">Take</button>"#,
            )
            .await
            .unwrap();
        let table = BindingTable::build(&surface, &AppState::new(), 1).await;

        assert_eq!(surface.scans.load(Ordering::SeqCst), 1);
        assert_eq!(
            table.resolve(&Target::marker("take-quiz-btn", "quiz-1")),
            Some(&Action::TakeQuiz("quiz-1".into()))
        );
        assert!(table.resolve(&Target::id("mobile-menu-btn")).is_some());
    }

    #[tokio::test]
    async fn modal_buttons_bound_while_open() {
        let page = HtmlPage::new();
        page.show_notice(&Notice::modal("Hi", "there")).await.unwrap();
        let table = BindingTable::build(&page, &AppState::new(), 1).await;
        assert_eq!(
            table.resolve(&Target::id("modal-close")),
            Some(&Action::DismissNotice(NoticeKind::Modal))
        );
        assert_eq!(
            table.resolve(&Target::id("modal-action")),
            Some(&Action::ConfirmNotice)
        );
    }

    #[test]
    fn labels_use_course_titles_with_fallback() {
        let state = AppState::new();
        assert_eq!(
            describe(&Action::Enroll("zz-999".into()), &state),
            "Enroll: zz-999"
        );
        assert_eq!(describe(&Action::ToggleAuth, &state), "Sign In");
    }
}
