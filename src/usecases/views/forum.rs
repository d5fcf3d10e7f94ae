//! Discussion list and per-course forum links.

use super::markup::section_heading;
use crate::domain::{AppState, ForumPost};
use crate::shared::html::escape_html;

/// Number of courses offered as course forums.
pub const COURSE_FORUM_COUNT: usize = 6;

pub fn render(state: &AppState) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"forum-view\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold text-gray-800 mb-2\">Discussion Forum</h1>\n");
    html.push_str("<p class=\"text-gray-600 mb-8\">Ask questions, share insights, and collaborate with fellow students and instructors.</p>\n");

    html.push_str("<div class=\"discussions bg-white rounded-xl shadow-lg p-6 mb-8\">\n");
    html.push_str(&section_heading("Recent Discussions"));
    for post in &state.forum_posts {
        html.push_str(&post_card(state, post));
    }
    html.push_str("</div>\n");

    html.push_str(&section_heading("Course-Specific Forums"));
    html.push_str("<div class=\"course-forums grid grid-cols-3 gap-4\">\n");
    for course in state.courses.iter().take(COURSE_FORUM_COUNT) {
        let post_count = state
            .forum_posts
            .iter()
            .filter(|p| p.course_id == course.id)
            .count();
        html.push_str(&format!(
            "<a href=\"#\" data-course-id=\"{}\" class=\"course-forum-link bg-white border rounded-xl p-4\">\n<h3 class=\"font-bold text-gray-800\">{}</h3><span class=\"post-count\">{}</span>\n<p class=\"text-sm text-gray-600\">{}</p>\n<div class=\"text-sm text-indigo-600\"><i class=\"fas fa-comments\"></i> Visit Forum</div>\n</a>\n",
            escape_html(&course.id),
            escape_html(&course.title),
            post_count,
            escape_html(&course.instructor)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("</section>\n");
    html
}

fn post_card(state: &AppState, post: &ForumPost) -> String {
    let badge = if post.resolved {
        "<span class=\"status-badge resolved bg-green-100 text-green-800\"><i class=\"fas fa-check\"></i> Resolved</span>"
    } else {
        "<span class=\"status-badge active bg-yellow-100 text-yellow-800\"><i class=\"fas fa-comments\"></i> Active</span>"
    };
    format!(
        "<div class=\"forum-post border border-gray-200 rounded-lg p-4\" data-post-id=\"{}\">\n<h3 class=\"font-bold text-lg text-gray-800\">{}</h3>\n<p class=\"text-sm text-gray-500\"><span>{}</span> &bull; <span>{}</span> &bull; <span class=\"post-course\">{}</span></p>\n{}\n<span class=\"replies\">Join Discussion ({} replies)</span>\n</div>\n",
        escape_html(&post.id),
        escape_html(&post.title),
        escape_html(&post.author),
        escape_html(&post.date),
        escape_html(state.course_title(&post.course_id)),
        badge,
        post.replies
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::views::fixtures::state_with_courses;

    fn post(id: &str, course_id: &str, resolved: bool) -> ForumPost {
        ForumPost {
            id: id.into(),
            course_id: course_id.into(),
            title: format!("Post {}", id),
            author: "Alex".into(),
            date: "2025-01-10".into(),
            replies: 3,
            resolved,
        }
    }

    #[test]
    fn posts_reference_course_titles_with_fallback() {
        let mut state = state_with_courses(&["a"]);
        state.forum_posts = vec![post("p1", "a", true), post("p2", "zz-999", false)];
        let html = render(&state);
        assert!(html.contains("<span class=\"post-course\">Course a</span>"));
        assert!(html.contains("<span class=\"post-course\">zz-999</span>"));
        assert!(html.contains("Resolved"));
        assert!(html.contains("Active"));
        assert!(html.contains("Join Discussion (3 replies)"));
    }

    #[test]
    fn links_first_six_course_forums_with_counts() {
        let mut state = state_with_courses(&["a", "b", "c", "d", "e", "f", "g"]);
        state.forum_posts = vec![post("p1", "a", true), post("p2", "a", false)];
        let html = render(&state);
        assert_eq!(html.matches("course-forum-link").count(), 6);
        assert!(html.contains("data-course-id=\"a\" class=\"course-forum-link"));
        assert!(!html.contains("data-course-id=\"g\""));
        assert!(html.contains("<span class=\"post-count\">2</span>"));
    }
}
