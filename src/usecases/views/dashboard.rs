//! Personal dashboard. Falls back to a sign-in prompt without a session.

use super::markup::{progress_bar_class, stat_card};
use crate::domain::metrics::{
    ActivityKind, DashboardSummary, RECENT_ACTIVITY_LIMIT, partition_courses, recent_activity,
};
use crate::domain::time::format_date;
use crate::domain::{AppState, User};
use crate::shared::html::escape_html;

/// Notifications listed on the dashboard.
pub const NOTIFICATION_COUNT: usize = 4;

pub fn render(state: &AppState) -> String {
    match state.user {
        Some(ref user) => render_signed_in(state, user),
        None => sign_in_prompt(),
    }
}

fn sign_in_prompt() -> String {
    let mut html = String::new();
    html.push_str("<section class=\"dashboard-view signed-out bg-white rounded-xl shadow-lg p-8 text-center\">\n");
    html.push_str("<i class=\"fas fa-user-lock text-5xl text-gray-400\"></i>\n");
    html.push_str("<h2 class=\"text-2xl font-bold text-gray-800 mb-4\">Please Sign In</h2>\n");
    html.push_str("<p class=\"text-gray-600 mb-6\">You need to be signed in to view your personalized dashboard.</p>\n");
    html.push_str("<button id=\"dashboard-signin-btn\" class=\"bg-indigo-600 text-white px-6 py-3 rounded-lg\">Sign In Now</button>\n");
    html.push_str("</section>\n");
    html
}

fn render_signed_in(state: &AppState, user: &User) -> String {
    let summary = DashboardSummary::compute(state);
    let mut html = String::new();
    html.push_str("<section class=\"dashboard-view\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold text-gray-800 mb-2\">Student Dashboard</h1>\n");
    let name = if user.display_name.is_empty() {
        "Student"
    } else {
        user.display_name.as_str()
    };
    html.push_str(&format!(
        "<p class=\"text-gray-600\">Welcome back, {}! Here's your learning progress.</p>\n",
        escape_html(name)
    ));

    html.push_str("<div class=\"stats grid grid-cols-4 gap-6 mb-8\">\n");
    html.push_str(&stat_card(
        "Enrolled Courses",
        &summary.enrolled.to_string(),
        "fa-book-open",
    ));
    html.push_str(&stat_card(
        "Completed",
        &summary.completed.to_string(),
        "fa-check-circle",
    ));
    html.push_str(&stat_card(
        "Average Score",
        &format!("{}%", summary.average_score),
        average_icon(summary.average_score),
    ));
    html.push_str(&stat_card(
        "Quiz Completion",
        &format!("{}%", summary.quiz_completion_rate),
        "fa-clipboard-check",
    ));
    html.push_str("</div>\n");

    html.push_str(&course_progress(state, summary.in_progress));
    html.push_str(&notifications(state, summary.unread_notifications));
    html.push_str(&activity_feed(state));

    html.push_str("</section>\n");
    html
}

fn average_icon(average: u32) -> &'static str {
    match average {
        70.. => "fa-chart-line text-green-500",
        50..=69 => "fa-chart-line text-yellow-500",
        _ => "fa-chart-line text-red-500",
    }
}

fn course_progress(state: &AppState, in_progress: usize) -> String {
    let enrolled = partition_courses(state).enrolled;
    let mut html = String::new();
    html.push_str("<div class=\"course-progress bg-white rounded-xl shadow-lg p-6\">\n");
    html.push_str(&format!(
        "<h2 class=\"text-xl font-bold text-gray-800 mb-6\">Course Progress</h2><span class=\"in-progress-count\">{} in progress</span>\n",
        in_progress
    ));
    for course in &enrolled {
        let progress = state.progress_for(&course.id).cloned().unwrap_or_default();
        let status = if progress.completed {
            "Completed"
        } else {
            "In progress"
        };
        html.push_str(&format!(
            "<div class=\"course-progress-item\" data-course-id=\"{}\">\n<span class=\"font-medium\">{}</span><span class=\"progress-value\">{}%</span>\n<div class=\"w-full bg-gray-200 rounded-full h-2.5\"><div class=\"progress-bar h-2.5 rounded-full {}\" style=\"width: {}%\"></div></div>\n<span class=\"text-xs\">{}</span><span class=\"text-xs\">Last activity: {}</span>\n</div>\n",
            escape_html(&course.id),
            escape_html(&course.title),
            progress.score,
            progress_bar_class(progress.score),
            progress.score,
            status,
            escape_html(&format_date(progress.last_accessed.as_deref()))
        ));
    }
    if enrolled.is_empty() {
        html.push_str("<div class=\"empty-state text-center py-8\">\n<p class=\"text-gray-500\">You haven't enrolled in any courses yet.</p>\n<button class=\"nav-link text-indigo-600\" data-view=\"courses\">Browse available courses &rarr;</button>\n</div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn notifications(state: &AppState, unread: usize) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"notifications bg-white rounded-xl shadow-lg p-6\">\n");
    html.push_str(&format!(
        "<h2 class=\"text-xl font-bold text-gray-800\">Notifications</h2><span class=\"unread-count\">{} unread</span>\n",
        unread
    ));
    for n in state.notifications.iter().take(NOTIFICATION_COUNT) {
        let class = if n.read {
            "notification read bg-gray-50"
        } else {
            "notification unread bg-blue-50 border-l-4 border-blue-500"
        };
        html.push_str(&format!(
            "<div class=\"{} p-3 rounded-lg\">\n<h4 class=\"font-medium\">{}</h4>\n<p class=\"text-sm text-gray-600\">{}</p>\n<p class=\"text-xs text-gray-500\">{}</p>\n</div>\n",
            class,
            escape_html(&n.title),
            escape_html(&n.message),
            escape_html(&n.time)
        ));
    }
    html.push_str("</div>\n");
    html
}

fn activity_feed(state: &AppState) -> String {
    let activities = recent_activity(state, RECENT_ACTIVITY_LIMIT);
    let mut html = String::new();
    html.push_str("<div class=\"recent-activity bg-white rounded-xl shadow-lg p-6\">\n");
    html.push_str("<h2 class=\"text-xl font-bold text-gray-800 mb-6\">Recent Activity</h2>\n");
    for activity in &activities {
        let icon = match activity.kind {
            ActivityKind::CourseCompleted => "fa-trophy text-green-500",
            ActivityKind::QuizCompleted => "fa-clipboard-check text-blue-500",
        };
        html.push_str(&format!(
            "<div class=\"activity flex items-start p-3\">\n<i class=\"fas {}\"></i>\n<p class=\"font-medium text-gray-800\">{}</p>\n<p class=\"text-sm text-gray-600\">{}</p>\n<p class=\"text-xs text-gray-500\">{}</p>\n</div>\n",
            icon,
            escape_html(&activity.title),
            escape_html(&activity.description),
            escape_html(&format_date(Some(&activity.time)))
        ));
    }
    if activities.is_empty() {
        html.push_str("<div class=\"empty-state text-center py-6\">\n<p class=\"text-gray-500\">No recent activity to display.</p>\n<p class=\"text-gray-500 text-sm\">Start learning to see your activity here!</p>\n</div>\n");
    }
    html.push_str("</div>\n");
    html
}
