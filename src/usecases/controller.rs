//! Application controller.
//!
//! Owns the [`AppState`] and is its only writer. Every action runs under one async lock:
//! check the content region, apply the action, re-render the current view, rebuild the
//! binding table. Asynchronous completions (initial session, welcome timer) arrive as
//! [`AppEvent`]s carrying the epoch they started in.

use crate::domain::{
    Action, AppState, AuthUser, DomainError, Notice, NoticeKind, ProgressPatch, SessionState,
    Target, View,
};
use crate::ports::{AuthPort, CONTENT_REGION, Clock, DataStorePort, EntropySource, RenderSurface};
use crate::usecases::bindings::BindingTable;
use crate::usecases::data_loader::DataLoader;
use crate::usecases::session_service::{SessionService, user_from_auth};
use crate::usecases::views::render_view;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, error, info, warn};

pub const LOAD_FAILURE_MESSAGE: &str =
    "Failed to load application data. Please refresh the page.";

const WELCOME_TITLE: &str = "Welcome to NexusLearn Demo";
const WELCOME_MESSAGE: &str = "This is a demonstration of the NexusLearn online learning platform for COSC 369 Software Engineering class. You can sign in as a demo student, browse courses, track progress, and explore all features.";
const QUIZ_SIMULATION_MESSAGE: &str = "This is a quiz simulation. In a real application, you would take an actual quiz here with multiple-choice questions, coding challenges, etc.";

/// Inclusive range of simulated quiz scores.
const QUIZ_SCORE_MIN: u32 = 70;
const QUIZ_SCORE_MAX: u32 = 100;
/// Added to the course score when it is marked complete.
const COMPLETION_BONUS: u32 = 20;

/// Completion of an asynchronous operation started earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Initial session resolved. Ignored if an explicit sign-in/out happened since.
    AuthStateChanged {
        user: Option<AuthUser>,
        session_epoch: u64,
    },
    /// Startup welcome timer fired. Suppressed if the user navigated since.
    Welcome { nav_epoch: u64 },
}

struct Inner {
    state: AppState,
    bindings: BindingTable,
    generation: u64,
}

pub struct AppController {
    inner: Mutex<Inner>,
    surface: Arc<dyn RenderSurface>,
    store: Arc<dyn DataStorePort>,
    session: SessionService,
    loader: DataLoader,
    entropy: Arc<dyn EntropySource>,
    clock: Arc<dyn Clock>,
    welcome_delay: Duration,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: Mutex<mpsc::UnboundedReceiver<AppEvent>>,
}

impl AppController {
    pub fn new(
        store: Arc<dyn DataStorePort>,
        auth: Arc<dyn AuthPort>,
        surface: Arc<dyn RenderSurface>,
        entropy: Arc<dyn EntropySource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            inner: Mutex::new(Inner {
                state: AppState::new(),
                bindings: BindingTable::default(),
                generation: 0,
            }),
            surface,
            session: SessionService::new(auth, Arc::clone(&store)),
            loader: DataLoader::new(Arc::clone(&store)),
            store,
            entropy,
            clock,
            welcome_delay: Duration::from_millis(1000),
            events_tx,
            events_rx: Mutex::new(events_rx),
        }
    }

    pub fn with_welcome_delay(mut self, delay: Duration) -> Self {
        self.welcome_delay = delay;
        self
    }

    /// Sign in with this token instead of anonymously.
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.session = self.session.with_token(token);
        self
    }

    pub fn surface(&self) -> Arc<dyn RenderSurface> {
        Arc::clone(&self.surface)
    }

    pub async fn state(&self) -> AppState {
        self.inner.lock().await.state.clone()
    }

    pub async fn bindings(&self) -> BindingTable {
        self.inner.lock().await.bindings.clone()
    }

    /// Loads the catalog, subscribes to the initial session, renders the home view and
    /// arms the welcome timer.
    ///
    /// A load failure shows the error notice and returns `DataLoad`; nothing is retried
    /// and no session listener is installed.
    pub async fn start(&self) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        self.require_content_region().await?;

        match self.loader.load_catalog().await {
            Ok(catalog) => catalog.apply_to(&mut inner.state),
            Err(e) => {
                self.notify(&mut inner.state, Notice::modal("Error", LOAD_FAILURE_MESSAGE))
                    .await;
                self.render(&mut inner).await?;
                return Err(e);
            }
        }

        match self.session.watch_initial_session().await {
            Ok(rx) => {
                let tx = self.events_tx.clone();
                let session_epoch = inner.state.session_epoch;
                tokio::spawn(async move {
                    if let Ok(user) = rx.await {
                        let _ = tx.send(AppEvent::AuthStateChanged {
                            user,
                            session_epoch,
                        });
                    }
                });
            }
            Err(e) => warn!(error = %e, "could not subscribe to auth state"),
        }

        self.render(&mut inner).await?;

        let tx = self.events_tx.clone();
        let delay = self.welcome_delay;
        let nav_epoch = inner.state.nav_epoch;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::Welcome { nav_epoch });
        });

        info!(
            courses = inner.state.courses.len(),
            quizzes = inner.state.quizzes.len(),
            "application started"
        );
        Ok(())
    }

    /// Clicks a page element. Returns `false` when nothing on the current page is bound
    /// to `target`.
    pub async fn click(&self, target: &Target) -> Result<bool, DomainError> {
        let mut inner = self.inner.lock().await;
        let Some(action) = inner.bindings.resolve(target).cloned() else {
            debug!(
                element = %target,
                generation = inner.generation,
                "click on unbound element ignored"
            );
            return Ok(false);
        };
        self.dispatch_locked(&mut inner, action).await?;
        Ok(true)
    }

    /// Runs an action directly, bypassing the binding table.
    pub async fn dispatch(&self, action: Action) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        self.dispatch_locked(&mut inner, action).await
    }

    pub async fn handle_event(&self, event: AppEvent) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().await;
        match event {
            AppEvent::AuthStateChanged {
                user,
                session_epoch,
            } => {
                if session_epoch != inner.state.session_epoch {
                    debug!(
                        started = session_epoch,
                        current = inner.state.session_epoch,
                        "stale auth state ignored"
                    );
                    return Ok(());
                }
                self.require_content_region().await?;
                match user {
                    Some(auth_user) => {
                        let user = user_from_auth(auth_user);
                        let uid = user.uid.clone();
                        inner.state.sign_in(user);
                        if let Some(progress) = self.session.load_progress(&uid).await {
                            inner.state.progress = progress;
                        }
                        info!(uid = %uid, "initial session resolved: signed in");
                    }
                    None => {
                        if inner.state.user.is_some() {
                            inner.state.sign_out();
                        }
                        info!("initial session resolved: signed out");
                    }
                }
                self.render(&mut inner).await
            }
            AppEvent::Welcome { nav_epoch } => {
                if nav_epoch != inner.state.nav_epoch {
                    debug!("welcome notice skipped after navigation");
                    return Ok(());
                }
                self.require_content_region().await?;
                let notice =
                    Notice::modal(WELCOME_TITLE, WELCOME_MESSAGE).with_action("Get Started", None);
                self.notify(&mut inner.state, notice).await;
                self.render(&mut inner).await
            }
        }
    }

    /// Handles every event already queued. Returns how many were handled.
    pub async fn pump(&self) -> Result<usize, DomainError> {
        let mut handled = 0;
        loop {
            let event = {
                let mut rx = self.events_rx.lock().await;
                match rx.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                }
            };
            self.handle_event(event).await?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Waits for the next event and handles it.
    pub async fn next_event(&self) -> Result<(), DomainError> {
        let event = {
            let mut rx = self.events_rx.lock().await;
            rx.recv().await
        };
        match event {
            Some(event) => self.handle_event(event).await,
            None => Ok(()),
        }
    }

    async fn require_content_region(&self) -> Result<(), DomainError> {
        if self.surface.has_region(CONTENT_REGION).await {
            Ok(())
        } else {
            error!(region = CONTENT_REGION, "content area not found");
            Err(DomainError::MissingTarget(CONTENT_REGION.to_string()))
        }
    }

    async fn dispatch_locked(&self, inner: &mut Inner, action: Action) -> Result<(), DomainError> {
        self.require_content_region().await?;
        debug!(?action, "dispatch");

        let action = match action {
            Action::ConfirmNotice => {
                self.surface.dismiss_notice(NoticeKind::Modal).await;
                inner.state.pending_action.take()
            }
            other => Some(other),
        };
        if let Some(action) = action {
            self.apply(&mut inner.state, action).await;
        }
        self.render(inner).await
    }

    async fn apply(&self, state: &mut AppState, action: Action) {
        match action {
            Action::Navigate(view) => state.navigate(view),
            Action::NavigateMobile(view) => {
                state.navigate(view);
                state.mobile_menu_open = false;
            }
            Action::ToggleMobileMenu => state.mobile_menu_open = !state.mobile_menu_open,
            Action::ToggleAuth => match state.session() {
                SessionState::SignedIn => self.sign_out(state).await,
                SessionState::SignedOut => self.sign_in(state, true).await,
            },
            Action::DashboardSignIn => self.sign_in(state, false).await,
            Action::Enroll(course_id) => self.enroll(state, &course_id).await,
            Action::ToggleComplete(course_id) => self.toggle_complete(state, &course_id).await,
            Action::WatchPreview(course_id) => self.watch_preview(state, &course_id).await,
            Action::TakeQuiz(quiz_id) => {
                if state.find_quiz(&quiz_id).is_none() {
                    warn!(quiz_id, "unknown quiz");
                    return;
                }
                let notice = Notice::modal("Quiz Simulation", QUIZ_SIMULATION_MESSAGE)
                    .with_action("Start Quiz", Some(Action::StartQuiz(quiz_id)));
                self.notify(state, notice).await;
            }
            Action::StartQuiz(quiz_id) => self.start_quiz(state, &quiz_id).await,
            Action::OpenCourseForum(course_id) => {
                state.navigate(View::Forum);
                debug!(course_id, "course forum opened");
                self.notify(
                    state,
                    Notice::modal(
                        "Forum Filter Applied",
                        "Now showing discussions for the selected course.",
                    ),
                )
                .await;
            }
            Action::DismissNotice(kind) => {
                self.surface.dismiss_notice(kind).await;
                if kind == NoticeKind::Modal {
                    state.pending_action = None;
                }
            }
            // resolved in dispatch_locked
            Action::ConfirmNotice => {}
        }
    }

    async fn sign_in(&self, state: &mut AppState, with_notices: bool) {
        if with_notices {
            self.notify(
                state,
                Notice::modal("Signing In", "Please wait while we sign you in..."),
            )
            .await;
        }
        match self.session.sign_in().await {
            Ok(user) => {
                let uid = user.uid.clone();
                let name = user.display_name.clone();
                state.sign_in(user);
                if let Some(progress) = self.session.load_progress(&uid).await {
                    state.progress = progress;
                }
                if with_notices {
                    self.notify(
                        state,
                        Notice::modal("Welcome!", format!("Welcome to NexusLearn, {}!", name)),
                    )
                    .await;
                }
            }
            Err(e) => {
                warn!(error = %e, "sign-in failed");
                self.notify(
                    state,
                    Notice::modal("Sign In Error", "Failed to sign in. Please try again."),
                )
                .await;
            }
        }
    }

    async fn sign_out(&self, state: &mut AppState) {
        match self.session.sign_out().await {
            Ok(uid) => debug!(uid = ?uid, "session ended"),
            Err(e) => {
                warn!(error = %e, "sign-out failed");
                return;
            }
        }
        state.sign_out();
        self.notify(
            state,
            Notice::modal("Signed Out", "You have been successfully signed out."),
        )
        .await;
    }

    async fn enroll(&self, state: &mut AppState, course_id: &str) {
        let title = match course_title(state, course_id) {
            Ok(title) => title,
            Err(e) => {
                warn!(error = %e, "action ignored");
                return;
            }
        };
        let Some(uid) = state.user.as_ref().map(|u| u.uid.clone()) else {
            self.notify(
                state,
                Notice::modal("Sign In Required", "Please sign in to enroll in courses."),
            )
            .await;
            return;
        };

        let now = self.clock.now_stamp();
        let patch = ProgressPatch {
            enrolled: Some(true),
            enrolled_at: Some(now.clone()),
            completed: Some(false),
            score: Some(0),
            ..Default::default()
        };
        if let Err(e) = self.store.update_progress(&uid, course_id, &patch).await {
            error!(course_id, error = %e, "enrollment not saved");
            self.notify(
                state,
                Notice::modal("Error", "Failed to update progress. Please try again."),
            )
            .await;
            return;
        }

        let entry = state.progress.entry(course_id.to_string()).or_default();
        patch.apply(entry);
        entry.last_accessed = Some(now);
        info!(uid = %uid, course_id, "enrolled");

        self.notify(
            state,
            Notice::modal(
                "Enrollment Successful",
                format!("You have successfully enrolled in \"{}\"!", title),
            ),
        )
        .await;
    }

    async fn toggle_complete(&self, state: &mut AppState, course_id: &str) {
        let title = match course_title(state, course_id) {
            Ok(title) => title,
            Err(e) => {
                warn!(error = %e, "action ignored");
                return;
            }
        };
        let Some(uid) = state.user.as_ref().map(|u| u.uid.clone()) else {
            self.notify(
                state,
                Notice::modal(
                    "Sign In Required",
                    "Please sign in to track course progress.",
                ),
            )
            .await;
            return;
        };

        let current = state.progress_for(course_id).cloned().unwrap_or_default();
        let completing = !current.completed;
        let patch = if completing {
            ProgressPatch {
                completed: Some(true),
                completed_at: Some(Some(self.clock.now_stamp())),
                // not clamped to 100
                score: Some(current.score.saturating_add(COMPLETION_BONUS)),
                ..Default::default()
            }
        } else {
            ProgressPatch {
                completed: Some(false),
                completed_at: Some(None),
                score: Some(current.score),
                ..Default::default()
            }
        };
        if let Err(e) = self.store.update_progress(&uid, course_id, &patch).await {
            error!(course_id, error = %e, "completion not saved");
            self.notify(
                state,
                Notice::modal("Error", "Failed to update progress. Please try again."),
            )
            .await;
            return;
        }
        let entry = state.progress.entry(course_id.to_string()).or_default();
        patch.apply(entry);
        info!(course_id, completed = completing, score = entry.score, "completion toggled");

        let notice = if completing {
            Notice::modal(
                "Course Completed",
                format!("Congratulations! You have completed \"{}\"!", title),
            )
        } else {
            Notice::modal(
                "Course Reopened",
                format!("\"{}\" has been marked as incomplete.", title),
            )
        };
        self.notify(state, notice).await;
    }

    async fn watch_preview(&self, state: &mut AppState, course_id: &str) {
        let Some(notice) = state
            .find_course(course_id)
            .map(|c| Notice::video(&c.title, c.description.clone()))
        else {
            warn!(course_id, "unknown course");
            return;
        };
        self.notify(state, notice).await;

        if state.user.is_some() {
            if let Some(progress) = state.progress.get_mut(course_id) {
                progress.last_accessed = Some(self.clock.now_stamp());
            }
        }
    }

    async fn start_quiz(&self, state: &mut AppState, quiz_id: &str) {
        let score = self.entropy.uniform(QUIZ_SCORE_MIN, QUIZ_SCORE_MAX);
        let Some(quiz) = state.quizzes.iter_mut().find(|q| q.id == quiz_id) else {
            warn!(quiz_id, "unknown quiz");
            return;
        };
        quiz.completed = true;
        quiz.score = score;
        let title = quiz.title.clone();
        let course_id = quiz.course_id.clone();

        // Course progress belongs to the signed-in user only.
        let mut raised = None;
        if state.user.is_some() {
            if let Some(progress) = state.progress.get_mut(&course_id) {
                if score > progress.score {
                    progress.score = score;
                    raised = Some(score);
                }
            }
        }
        if let (Some(new_score), Some(user)) = (raised, state.user.as_ref()) {
            let patch = ProgressPatch {
                score: Some(new_score),
                ..Default::default()
            };
            if let Err(e) = self.store.update_progress(&user.uid, &course_id, &patch).await {
                warn!(course_id, error = %e, "course score not saved");
            }
        }
        info!(quiz_id, score, course_id, "quiz completed");

        self.notify(
            state,
            Notice::modal(
                "Quiz Completed",
                format!("You scored {}% on \"{}\"!", score, title),
            ),
        )
        .await;
    }

    /// Shows a notice. A modal's action becomes the pending action; failures are logged.
    async fn notify(&self, state: &mut AppState, notice: Notice) {
        match self.surface.show_notice(&notice).await {
            Ok(()) => {
                if notice.kind == NoticeKind::Modal {
                    state.pending_action = notice.action;
                }
            }
            Err(e) => error!(title = %notice.title, error = %e, "notice not shown"),
        }
    }

    async fn render(&self, inner: &mut Inner) -> Result<(), DomainError> {
        let markup = render_view(&inner.state);
        self.surface.replace_region(CONTENT_REGION, &markup).await?;
        self.surface.update_chrome(&inner.state.chrome()).await?;

        inner.generation += 1;
        inner.bindings =
            BindingTable::build(self.surface.as_ref(), &inner.state, inner.generation).await;
        debug!(
            view = %inner.state.current_view,
            generation = inner.generation,
            bindings = inner.bindings.len(),
            "rendered"
        );
        Ok(())
    }
}

fn course_title(state: &AppState, course_id: &str) -> Result<String, DomainError> {
    state
        .find_course(course_id)
        .map(|c| c.title.clone())
        .ok_or_else(|| DomainError::NotFound {
            entity: "course",
            id: course_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockAuthAdapter;
    use crate::adapters::entropy::{FixedClock, FixedEntropy};
    use crate::adapters::store::MemoryStore;
    use crate::adapters::surface::HtmlPage;
    use crate::domain::{Course, ForumPost, ProgressMap, Quiz};

    const LONG: Duration = Duration::from_secs(3600);
    const SHORT: Duration = Duration::from_millis(5);

    struct Harness {
        controller: AppController,
        page: Arc<HtmlPage>,
        store: Arc<MemoryStore>,
    }

    fn harness(
        entropy: FixedEntropy,
        page: HtmlPage,
        auth_delay: Duration,
        welcome_delay: Duration,
    ) -> Harness {
        let clock = Arc::new(FixedClock::demo());
        let store = Arc::new(MemoryStore::seeded(clock.clone()).unwrap());
        let entropy = Arc::new(entropy);
        let auth = Arc::new(MockAuthAdapter::new(entropy.clone()).with_resolve_delay(auth_delay));
        let page = Arc::new(page);
        let controller =
            AppController::new(store.clone(), auth, page.clone(), entropy, clock)
                .with_welcome_delay(welcome_delay);
        Harness {
            controller,
            page,
            store,
        }
    }

    /// Demo user signed in through the initial session.
    async fn signed_in_demo(entropy_value: u32) -> Harness {
        let h = harness(
            FixedEntropy::new(entropy_value, true),
            HtmlPage::new(),
            SHORT,
            LONG,
        );
        h.controller.start().await.unwrap();
        h.controller.next_event().await.unwrap();
        h
    }

    fn signed_out(page: HtmlPage) -> Harness {
        harness(FixedEntropy::new(0, false), page, LONG, LONG)
    }

    async fn modal_title(page: &HtmlPage) -> Option<String> {
        page.open_notice(NoticeKind::Modal).await.map(|n| n.title)
    }

    async fn content(page: &HtmlPage) -> String {
        page.region(CONTENT_REGION).await.unwrap_or_default()
    }

    #[tokio::test]
    async fn startup_renders_home_and_binds_chrome() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();

        let state = h.controller.state().await;
        assert_eq!(state.current_view, View::Home);
        assert_eq!(state.courses.len(), 6);
        assert!(state.user.is_none());
        assert!(content(&h.page).await.contains("Featured Courses"));

        let bindings = h.controller.bindings().await;
        assert!(bindings.resolve(&Target::id("auth-button")).is_some());
        assert!(bindings.resolve(&Target::id("nav-dashboard")).is_none());
    }

    #[tokio::test]
    async fn initial_session_loads_demo_progress() {
        let h = signed_in_demo(0).await;
        let state = h.controller.state().await;
        assert_eq!(state.user.as_ref().map(|u| u.uid.as_str()), Some("demo-user-12345"));

        assert!(h.controller.click(&Target::id("nav-courses")).await.unwrap());
        let html = content(&h.page).await;
        assert!(html.contains("<span class=\"progress-value\">85%</span>"));
        assert!(html.contains("style=\"width: 85%\""));
        assert!(h.page.find_by_id("nav-dashboard").await);
    }

    #[tokio::test]
    async fn signed_out_initial_session_keeps_dashboard_hidden() {
        let h = harness(FixedEntropy::new(0, false), HtmlPage::new(), SHORT, LONG);
        h.controller.start().await.unwrap();
        h.controller.next_event().await.unwrap();

        assert!(h.controller.state().await.user.is_none());
        assert!(!h.controller.click(&Target::id("nav-dashboard")).await.unwrap());
        h.controller.dispatch(Action::Navigate(View::Dashboard)).await.unwrap();
        assert!(content(&h.page).await.contains("id=\"dashboard-signin-btn\""));
    }

    #[tokio::test]
    async fn enroll_without_session_only_shows_notice() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();

        let target = Target::marker("enroll-btn", "se-101");
        assert!(h.controller.click(&target).await.unwrap());
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Sign In Required"));
        assert!(h.controller.state().await.progress.is_empty());
    }

    #[tokio::test]
    async fn complete_without_session_only_shows_notice() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        h.controller
            .dispatch(Action::ToggleComplete("se-101".into()))
            .await
            .unwrap();
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Sign In Required"));
        assert!(h.controller.state().await.progress.is_empty());
    }

    #[tokio::test]
    async fn sign_in_enroll_and_toggle_completion() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();

        h.controller.click(&Target::id("auth-button")).await.unwrap();
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Welcome!"));
        let state = h.controller.state().await;
        let uid = state.user.as_ref().map(|u| u.uid.clone()).unwrap();
        assert_eq!(uid, "user-aaaaaaaaa");
        assert!(state.progress.is_empty());
        assert_eq!(state.chrome().auth_label(), "Sign Out");

        h.controller
            .click(&Target::marker("enroll-btn", "se-101"))
            .await
            .unwrap();
        assert_eq!(
            modal_title(&h.page).await.as_deref(),
            Some("Enrollment Successful")
        );
        let stored = h.store.progress_record(&uid, "se-101").await.unwrap();
        assert!(stored.enrolled);
        assert_eq!(stored.score, 0);
        assert!(stored.last_updated.is_some());
        let local = h.controller.state().await.progress["se-101"].clone();
        assert_eq!(local.last_accessed, Some(FixedClock::demo().now_stamp()));

        h.controller.click(&Target::id("nav-courses")).await.unwrap();
        let toggle = Target::marker("complete-course-btn", "se-101");
        h.controller.click(&toggle).await.unwrap();
        let local = h.controller.state().await.progress["se-101"].clone();
        assert!(local.completed);
        assert_eq!(local.score, 20);
        assert!(local.completed_at.is_some());
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Course Completed"));

        h.controller.click(&toggle).await.unwrap();
        let local = h.controller.state().await.progress["se-101"].clone();
        assert!(!local.completed);
        assert_eq!(local.completed_at, None);
        assert_eq!(local.score, 20);
        let stored = h.store.progress_record(&uid, "se-101").await.unwrap();
        assert_eq!(stored.completed_at, None);
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Course Reopened"));
    }

    #[tokio::test]
    async fn completion_bonus_is_not_clamped() {
        let h = harness(FixedEntropy::new(0, true), HtmlPage::new(), SHORT, LONG);
        let bump = ProgressPatch {
            score: Some(95),
            ..Default::default()
        };
        h.store
            .update_progress("demo-user-12345", "db-201", &bump)
            .await
            .unwrap();
        h.controller.start().await.unwrap();
        h.controller.next_event().await.unwrap();
        h.controller.click(&Target::id("nav-courses")).await.unwrap();

        let toggle = Target::marker("complete-course-btn", "db-201");
        h.controller.click(&toggle).await.unwrap();
        assert_eq!(h.controller.state().await.progress["db-201"].score, 115);
        assert!(content(&h.page).await.contains("style=\"width: 115%\""));

        h.controller.click(&toggle).await.unwrap();
        let progress = h.controller.state().await.progress["db-201"].clone();
        assert!(!progress.completed);
        assert_eq!(progress.score, 115);
    }

    #[tokio::test]
    async fn quiz_raises_course_score() {
        let h = signed_in_demo(99).await;
        h.controller.click(&Target::id("nav-quizzes")).await.unwrap();
        h.controller
            .click(&Target::marker("take-quiz-btn", "quiz-2"))
            .await
            .unwrap();
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Quiz Simulation"));

        assert!(h.controller.click(&Target::id("modal-action")).await.unwrap());
        let state = h.controller.state().await;
        let quiz = state.find_quiz("quiz-2").unwrap();
        assert!(quiz.completed);
        assert_eq!(quiz.score, 99);
        assert_eq!(state.progress["se-101"].score, 99);
        assert_eq!(
            h.store
                .progress_record("demo-user-12345", "se-101")
                .await
                .map(|p| p.score),
            Some(99)
        );
        let notice = h.page.open_notice(NoticeKind::Modal).await.unwrap();
        assert_eq!(notice.title, "Quiz Completed");
        assert!(notice.message.contains("You scored 99%"));
        assert!(state.pending_action.is_none());
    }

    #[tokio::test]
    async fn quiz_never_lowers_course_score() {
        // uniform() clamps 0 up to the minimum score
        let h = signed_in_demo(0).await;
        h.controller
            .dispatch(Action::StartQuiz("quiz-2".into()))
            .await
            .unwrap();
        let state = h.controller.state().await;
        assert_eq!(state.find_quiz("quiz-2").map(|q| q.score), Some(70));
        assert_eq!(state.progress["se-101"].score, 85);
    }

    #[tokio::test]
    async fn signed_out_quiz_leaves_course_score() {
        let h = signed_in_demo(99).await;
        h.controller.click(&Target::id("auth-button")).await.unwrap();
        assert!(h.controller.state().await.user.is_none());

        h.controller
            .dispatch(Action::StartQuiz("quiz-2".into()))
            .await
            .unwrap();
        let state = h.controller.state().await;
        assert_eq!(state.find_quiz("quiz-2").map(|q| q.score), Some(99));
        assert_eq!(state.progress["se-101"].score, 85);
        assert_eq!(
            h.store
                .progress_record("demo-user-12345", "se-101")
                .await
                .map(|p| p.score),
            Some(85)
        );
    }

    #[tokio::test]
    async fn closing_quiz_modal_drops_pending_start() {
        let h = signed_in_demo(99).await;
        h.controller
            .dispatch(Action::TakeQuiz("quiz-2".into()))
            .await
            .unwrap();
        assert!(h.controller.state().await.pending_action.is_some());

        h.controller.click(&Target::id("modal-close")).await.unwrap();
        let state = h.controller.state().await;
        assert!(state.pending_action.is_none());
        assert!(!state.find_quiz("quiz-2").unwrap().completed);
        assert!(modal_title(&h.page).await.is_none());
    }

    #[tokio::test]
    async fn sign_out_falls_back_to_prompt_and_keeps_progress() {
        let h = signed_in_demo(0).await;
        h.controller.click(&Target::id("nav-dashboard")).await.unwrap();
        assert!(content(&h.page).await.contains("Student Dashboard"));

        h.controller.click(&Target::id("auth-button")).await.unwrap();
        let state = h.controller.state().await;
        assert_eq!(state.session(), SessionState::SignedOut);
        assert!(state.is_enrolled("se-101"));
        assert_eq!(modal_title(&h.page).await.as_deref(), Some("Signed Out"));
        assert!(content(&h.page).await.contains("Please Sign In"));
        assert!(!h.page.find_by_id("nav-dashboard").await);
        assert!(!h.page.find_by_id("user-display").await);
    }

    #[tokio::test]
    async fn dashboard_sign_in_has_no_notices() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        h.controller.dispatch(Action::Navigate(View::Dashboard)).await.unwrap();
        assert!(h.controller.click(&Target::id("dashboard-signin-btn")).await.unwrap());

        assert!(h.controller.state().await.user.is_some());
        assert!(modal_title(&h.page).await.is_none());
        let html = content(&h.page).await;
        assert!(html.contains("Student Dashboard"));
        assert!(html.contains("<p class=\"stat-value text-3xl font-bold\">0%</p>"));
    }

    #[tokio::test]
    async fn missing_content_region_aborts_without_mutation() {
        let h = signed_out(HtmlPage::with_regions(&[]));
        let err = h.controller.start().await.unwrap_err();
        assert!(matches!(err, DomainError::MissingTarget(_)));
        assert!(h.controller.state().await.courses.is_empty());

        let err = h
            .controller
            .dispatch(Action::Navigate(View::Courses))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingTarget(_)));
        let state = h.controller.state().await;
        assert_eq!(state.current_view, View::Home);
        assert_eq!(state.nav_epoch, 0);
    }

    #[tokio::test]
    async fn clicks_on_stale_elements_are_ignored() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        let enroll = Target::marker("enroll-btn", "se-101");
        assert!(h.controller.bindings().await.resolve(&enroll).is_some());

        h.controller.click(&Target::id("nav-forum")).await.unwrap();
        assert!(!h.controller.click(&enroll).await.unwrap());
        assert!(modal_title(&h.page).await.is_none());
    }

    #[tokio::test]
    async fn explicit_sign_in_wins_over_late_initial_session() {
        let h = harness(
            FixedEntropy::new(0, true),
            HtmlPage::new(),
            Duration::from_millis(30),
            LONG,
        );
        h.controller.start().await.unwrap();
        h.controller.click(&Target::id("auth-button")).await.unwrap();
        h.controller.next_event().await.unwrap();

        let state = h.controller.state().await;
        assert_eq!(state.user.map(|u| u.uid), Some("user-aaaaaaaaa".to_string()));
        assert!(state.progress.is_empty());
    }

    #[tokio::test]
    async fn welcome_notice_after_startup() {
        let h = harness(FixedEntropy::new(0, false), HtmlPage::new(), LONG, SHORT);
        h.controller.start().await.unwrap();
        h.controller.next_event().await.unwrap();

        let notice = h.page.open_notice(NoticeKind::Modal).await.unwrap();
        assert_eq!(notice.title, WELCOME_TITLE);
        assert!(notice.message.contains("for COSC 369 Software Engineering class"));
        assert_eq!(notice.action_label, "Get Started");

        assert!(h.controller.click(&Target::id("modal-action")).await.unwrap());
        assert!(modal_title(&h.page).await.is_none());
    }

    #[tokio::test]
    async fn welcome_notice_skipped_after_navigation() {
        let h = harness(
            FixedEntropy::new(0, false),
            HtmlPage::new(),
            LONG,
            Duration::from_millis(20),
        );
        h.controller.start().await.unwrap();
        h.controller.click(&Target::id("nav-courses")).await.unwrap();
        h.controller.next_event().await.unwrap();
        assert!(modal_title(&h.page).await.is_none());
    }

    #[tokio::test]
    async fn mobile_menu_navigation_closes_menu() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        assert!(!h.controller.click(&Target::id("nav-courses-mobile")).await.unwrap());

        h.controller.click(&Target::id("mobile-menu-btn")).await.unwrap();
        assert!(h.controller.click(&Target::id("nav-courses-mobile")).await.unwrap());
        let state = h.controller.state().await;
        assert_eq!(state.current_view, View::Courses);
        assert!(!state.mobile_menu_open);
        assert!(!h.page.find_by_id("nav-courses-mobile").await);
    }

    #[tokio::test]
    async fn course_forum_link_opens_forum() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        h.controller.click(&Target::id("nav-forum")).await.unwrap();
        h.controller
            .click(&Target::marker("course-forum-link", "db-201"))
            .await
            .unwrap();
        assert_eq!(h.controller.state().await.current_view, View::Forum);
        assert_eq!(
            modal_title(&h.page).await.as_deref(),
            Some("Forum Filter Applied")
        );
    }

    #[tokio::test]
    async fn hero_buttons_navigate() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        h.controller
            .click(&Target::marker("nav-link", "courses"))
            .await
            .unwrap();
        assert_eq!(h.controller.state().await.current_view, View::Courses);
    }

    #[tokio::test]
    async fn preview_touches_last_accessed_only_when_enrolled() {
        let h = signed_in_demo(0).await;
        h.controller
            .click(&Target::marker("watch-video-btn", "db-201"))
            .await
            .unwrap();
        let video = h.page.open_notice(NoticeKind::Video).await.unwrap();
        assert_eq!(video.title, "Database Systems and SQL - Lecture 1");
        assert_eq!(
            h.controller.state().await.progress["db-201"].last_accessed,
            Some(FixedClock::demo().now_stamp())
        );

        h.controller.click(&Target::id("video-close")).await.unwrap();
        assert!(h.page.open_notice(NoticeKind::Video).await.is_none());
    }

    #[tokio::test]
    async fn preview_without_session_changes_nothing() {
        let h = signed_out(HtmlPage::new());
        h.controller.start().await.unwrap();
        h.controller
            .click(&Target::marker("watch-video-btn", "se-101"))
            .await
            .unwrap();
        assert!(h.page.open_notice(NoticeKind::Video).await.is_some());
        assert!(h.controller.state().await.progress.is_empty());
    }

    #[tokio::test]
    async fn unknown_course_is_ignored() {
        let h = signed_in_demo(0).await;
        let before = h.controller.state().await.progress;
        h.controller
            .dispatch(Action::Enroll("zz-999".into()))
            .await
            .unwrap();
        assert_eq!(h.controller.state().await.progress, before);
        assert!(modal_title(&h.page).await.is_none());
        assert!(matches!(
            course_title(&AppState::new(), "zz-999"),
            Err(DomainError::NotFound { entity: "course", .. })
        ));
    }

    #[tokio::test]
    async fn notices_fail_soft_without_modal_elements() {
        let h = signed_out(HtmlPage::new().without_modals());
        h.controller.start().await.unwrap();
        h.controller
            .dispatch(Action::Enroll("se-101".into()))
            .await
            .unwrap();
        assert!(h.controller.state().await.progress.is_empty());
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl DataStorePort for FailingStore {
        async fn get_courses(&self) -> Result<Vec<Course>, DomainError> {
            Err(DomainError::DataStore("backend unavailable".into()))
        }
        async fn get_progress(&self, _user_id: &str) -> Result<ProgressMap, DomainError> {
            Ok(ProgressMap::new())
        }
        async fn get_quizzes(&self, _course_id: Option<&str>) -> Result<Vec<Quiz>, DomainError> {
            Ok(Vec::new())
        }
        async fn get_forum_posts(
            &self,
            _course_id: Option<&str>,
        ) -> Result<Vec<ForumPost>, DomainError> {
            Ok(Vec::new())
        }
        async fn update_progress(
            &self,
            _user_id: &str,
            _course_id: &str,
            _patch: &ProgressPatch,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_failure_shows_notice_and_skips_session() {
        let entropy = Arc::new(FixedEntropy::new(0, true));
        let auth = Arc::new(MockAuthAdapter::new(entropy.clone()).with_resolve_delay(SHORT));
        let page = Arc::new(HtmlPage::new());
        let controller = AppController::new(
            Arc::new(FailingStore),
            auth,
            page.clone(),
            entropy,
            Arc::new(FixedClock::demo()),
        )
        .with_welcome_delay(LONG);

        let err = controller.start().await.unwrap_err();
        assert!(matches!(err, DomainError::DataLoad(_)));
        let notice = page.open_notice(NoticeKind::Modal).await.unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.message, LOAD_FAILURE_MESSAGE);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(controller.pump().await.unwrap(), 0);
        assert!(controller.state().await.user.is_none());
    }
}
