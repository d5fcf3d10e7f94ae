//! Landing page: hero, platform stats, featured courses.

use super::markup::{group_thousands, level_badge, section_heading, stat_card};
use crate::domain::{AppState, Course};
use crate::shared::html::{escape_html, truncate_chars};

/// Number of catalog entries shown as featured.
pub const FEATURED_COUNT: usize = 3;
const DESCRIPTION_PREVIEW: usize = 100;

const STUDENTS_ENROLLED: u32 = 1210;
const HOURS_OF_CONTENT: &str = "320+";
const COMPLETION_RATE: &str = "87%";

pub fn render(state: &AppState) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"home-view\">\n");

    html.push_str("<div class=\"hero gradient-bg rounded-2xl p-8 text-white mb-12\">\n");
    html.push_str("<h1 class=\"text-4xl font-bold mb-4\">Welcome to NexusLearn</h1>\n");
    html.push_str("<p class=\"text-xl mb-6\">Your modern, collaborative online learning platform. Access high-quality courses, interact with instructors, and track your learning progress.</p>\n");
    html.push_str("<button class=\"nav-link bg-white text-indigo-600 px-6 py-3 rounded-lg\" data-view=\"courses\"><i class=\"fas fa-book-open\"></i><span>Browse Courses</span></button>\n");
    html.push_str("<button class=\"nav-link border-2 border-white px-6 py-3 rounded-lg\" data-view=\"dashboard\"><i class=\"fas fa-chart-line\"></i><span>View Dashboard</span></button>\n");
    html.push_str("</div>\n");

    html.push_str("<div class=\"stats grid grid-cols-4 gap-6 mb-12\">\n");
    html.push_str(&stat_card(
        "Active Courses",
        &state.courses.len().to_string(),
        "fa-book",
    ));
    html.push_str(&stat_card(
        "Enrolled Students",
        &group_thousands(STUDENTS_ENROLLED),
        "fa-users",
    ));
    html.push_str(&stat_card("Hours of Content", HOURS_OF_CONTENT, "fa-video"));
    html.push_str(&stat_card("Completion Rate", COMPLETION_RATE, "fa-trophy"));
    html.push_str("</div>\n");

    html.push_str(&section_heading("Featured Courses"));
    html.push_str("<div class=\"featured grid grid-cols-3 gap-6 mb-12\">\n");
    for course in state.courses.iter().take(FEATURED_COUNT) {
        html.push_str(&featured_card(state, course));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"how-it-works bg-white rounded-2xl p-8\">\n");
    html.push_str("<h2 class=\"text-3xl font-bold text-center\">How NexusLearn Works</h2>\n");
    for (step, text) in [
        (
            "1. Sign Up &amp; Enroll",
            "Create your free account and browse our catalog of courses.",
        ),
        (
            "2. Learn with Video Lectures",
            "Watch high-quality video lectures and access reading materials.",
        ),
        (
            "3. Track Your Progress",
            "Complete assignments, take quizzes, and monitor your learning journey.",
        ),
    ] {
        html.push_str(&format!(
            "<div class=\"text-center\"><h3 class=\"text-xl font-bold\">{}</h3><p class=\"text-gray-600\">{}</p></div>\n",
            step, text
        ));
    }
    html.push_str("</div>\n");

    html.push_str("</section>\n");
    html
}

fn featured_card(state: &AppState, course: &Course) -> String {
    let id = escape_html(&course.id);
    let mut html = String::new();
    html.push_str("<div class=\"course-card bg-white p-6 rounded-xl shadow-lg\">\n");
    html.push_str(&format!(
        "<h3 class=\"text-xl font-bold text-gray-800\">{}</h3>\n<p class=\"text-sm text-gray-500\">{}</p>\n{}\n",
        escape_html(&course.title),
        escape_html(&course.instructor),
        level_badge(course.level)
    ));
    html.push_str(&format!(
        "<p class=\"text-gray-600 mb-4 text-sm\">{}...</p>\n",
        escape_html(truncate_chars(&course.description, DESCRIPTION_PREVIEW))
    ));
    html.push_str(&format!(
        "<div class=\"text-sm text-gray-500\"><span>{}</span><span>{} students</span><span>{}</span></div>\n",
        escape_html(&course.duration),
        course.enrolled,
        course.rating
    ));
    html.push_str(&format!(
        "<button data-course-id=\"{}\" class=\"watch-video-btn text-indigo-600\"><i class=\"fas fa-play-circle\"></i><span>Preview</span></button>\n",
        id
    ));

    let progress = state.progress_for(&course.id);
    if progress.is_some_and(|p| p.completed) {
        html.push_str("<span class=\"completed-badge px-3 py-1 text-xs rounded-full bg-green-100 text-green-800\"><i class=\"fas fa-check\"></i> Completed</span>\n");
    } else {
        let label = if progress.is_some_and(|p| p.score > 0) {
            "Continue"
        } else {
            "Enroll Now"
        };
        html.push_str(&format!(
            "<button data-course-id=\"{}\" class=\"enroll-btn bg-indigo-600 text-white px-4 py-2 rounded-lg\">{}</button>\n",
            id, label
        ));
    }
    html.push_str("</div>\n");
    html
}
