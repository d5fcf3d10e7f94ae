//! Course catalog split into enrolled and available sections.

use super::markup::{level_badge, progress_bar_class, section_heading};
use crate::domain::metrics::partition_courses;
use crate::domain::time::format_date;
use crate::domain::{AppState, Course, Progress};
use crate::shared::html::{escape_html, truncate_chars};

const DESCRIPTION_PREVIEW: usize = 120;

pub fn render(state: &AppState) -> String {
    let partition = partition_courses(state);
    let mut html = String::new();
    html.push_str("<section class=\"courses-view\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold text-gray-800 mb-2\">Course Catalog</h1>\n");
    html.push_str("<p class=\"text-gray-600 mb-8\">Browse and enroll in our selection of software engineering courses.</p>\n");

    if !partition.enrolled.is_empty() {
        html.push_str("<div class=\"enrolled-courses mb-12\">\n");
        html.push_str(&section_heading("My Enrolled Courses"));
        for course in &partition.enrolled {
            let progress = state.progress_for(&course.id).cloned().unwrap_or_default();
            html.push_str(&enrolled_card(course, &progress));
        }
        html.push_str("</div>\n");
    }

    html.push_str("<div class=\"available-courses\">\n");
    html.push_str(&section_heading("Available Courses"));
    for course in &partition.available {
        html.push_str(&available_card(course));
    }
    html.push_str("</div>\n");

    html.push_str("</section>\n");
    html
}

fn card_header(course: &Course) -> String {
    format!(
        "<h3 class=\"text-xl font-bold text-gray-800\">{}</h3>\n<p class=\"text-sm text-gray-500\">{}</p>\n{}\n<p class=\"text-gray-600 mb-4 text-sm\">{}...</p>\n",
        escape_html(&course.title),
        escape_html(&course.instructor),
        level_badge(course.level),
        escape_html(truncate_chars(&course.description, DESCRIPTION_PREVIEW))
    )
}

fn enrolled_card(course: &Course, progress: &Progress) -> String {
    let id = escape_html(&course.id);
    let score = progress.score;
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"course-card enrolled bg-white p-6 rounded-xl shadow-lg\" data-course-id=\"{}\">\n",
        id
    ));
    html.push_str(&card_header(course));
    html.push_str(&format!(
        "<div class=\"progress\"><span>Progress</span><span class=\"progress-value\">{}%</span>\n<div class=\"w-full bg-gray-200 rounded-full h-2\"><div class=\"progress-bar h-2 rounded-full {}\" style=\"width: {}%\"></div></div></div>\n",
        score,
        progress_bar_class(score),
        score
    ));
    html.push_str(&format!(
        "<div class=\"text-sm text-gray-500\"><span>{} lectures</span><span>{} quizzes</span>",
        course.lectures, course.quizzes
    ));
    if let Some(ref at) = progress.last_accessed {
        html.push_str(&format!(
            "<span class=\"last-accessed\">Last accessed: {}</span>",
            escape_html(&format_date(Some(at)))
        ));
    }
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<button data-course-id=\"{}\" class=\"watch-video-btn text-indigo-600\"><i class=\"fas fa-play-circle\"></i><span>Resume</span></button>\n",
        id
    ));
    if progress.completed {
        html.push_str("<span class=\"completed-badge px-3 py-1 text-sm rounded-full bg-green-100 text-green-800\"><i class=\"fas fa-check\"></i> Completed</span>\n");
        html.push_str(&format!(
            "<button data-course-id=\"{}\" class=\"complete-course-btn text-gray-500 text-sm\">Reopen</button>\n",
            id
        ));
    } else {
        html.push_str(&format!(
            "<button data-course-id=\"{}\" class=\"complete-course-btn bg-green-600 text-white px-4 py-2 rounded-lg\">Mark Complete</button>\n",
            id
        ));
    }
    html.push_str("</div>\n");
    html
}

fn available_card(course: &Course) -> String {
    let id = escape_html(&course.id);
    let mut html = String::new();
    html.push_str(&format!(
        "<div class=\"course-card available bg-white p-6 rounded-xl shadow-lg\" data-course-id=\"{}\">\n",
        id
    ));
    html.push_str(&card_header(course));
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
    html.push_str(&format!(
        "<button data-course-id=\"{}\" class=\"enroll-btn bg-indigo-600 text-white px-4 py-2 rounded-lg\">Enroll Now</button>\n",
        id
    ));
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::views::fixtures::state_with_courses;

    #[test]
    fn completed_course_shows_stored_score() {
        let mut state = state_with_courses(&["se-101", "db-201"]);
        state.progress.insert(
            "se-101".into(),
            Progress {
                enrolled: true,
                completed: true,
                score: 85,
                ..Default::default()
            },
        );
        let html = render(&state);
        assert!(html.contains("My Enrolled Courses"));
        assert!(html.contains("<span class=\"progress-value\">85%</span>"));
        assert!(html.contains("bg-green-500\" style=\"width: 85%\""));
        assert!(html.contains("complete-course-btn text-gray-500 text-sm\">Reopen"));
        assert!(html.contains("data-course-id=\"db-201\" class=\"enroll-btn"));
        assert!(!html.contains("data-course-id=\"se-101\" class=\"enroll-btn"));
    }

    #[test]
    fn no_enrolled_section_without_progress() {
        let state = state_with_courses(&["a"]);
        let html = render(&state);
        assert!(!html.contains("My Enrolled Courses"));
        assert!(html.contains("Available Courses"));
    }

    #[test]
    fn unclamped_score_renders_verbatim() {
        let mut state = state_with_courses(&["a"]);
        state.progress.insert(
            "a".into(),
            Progress {
                score: 115,
                last_accessed: Some("2025-01-15".into()),
                ..Default::default()
            },
        );
        let html = render(&state);
        assert!(html.contains("style=\"width: 115%\""));
        assert!(html.contains("Last accessed: Jan 15, 2025"));
        assert!(html.contains(">Mark Complete</button>"));
    }

    #[test]
    fn low_scores_use_yellow_bar() {
        let mut state = state_with_courses(&["a"]);
        state.progress.insert("a".into(), Progress::default());
        assert!(render(&state).contains("bg-yellow-500\" style=\"width: 0%\""));
    }
}
