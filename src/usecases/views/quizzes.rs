//! Upcoming quizzes table and completed quiz cards.

use super::markup::section_heading;
use crate::domain::metrics::ScoreBand;
use crate::domain::{AppState, Quiz};
use crate::shared::html::escape_html;

/// Badge class for a quiz score band.
pub fn score_band_class(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => "bg-green-100 text-green-800 border-green-200",
        ScoreBand::Mid => "bg-yellow-100 text-yellow-800 border-yellow-200",
        ScoreBand::Low => "bg-orange-100 text-orange-800 border-orange-200",
        ScoreBand::Fail => "bg-red-100 text-red-800 border-red-200",
    }
}

pub fn render(state: &AppState) -> String {
    let (completed, upcoming): (Vec<&Quiz>, Vec<&Quiz>) =
        state.quizzes.iter().partition(|q| q.completed);

    let mut html = String::new();
    html.push_str("<section class=\"quizzes-view\">\n");
    html.push_str("<h1 class=\"text-3xl font-bold text-gray-800 mb-2\">Quizzes &amp; Assessments</h1>\n");
    html.push_str("<p class=\"text-gray-600 mb-8\">Test your knowledge and track your learning progress with our quizzes.</p>\n");

    if !upcoming.is_empty() {
        html.push_str("<div class=\"upcoming-quizzes mb-12\">\n");
        html.push_str(&section_heading("Upcoming Quizzes"));
        html.push_str("<table class=\"w-full\">\n<thead><tr><th>Quiz</th><th>Course</th><th>Questions</th><th>Due Date</th><th>Action</th></tr></thead>\n<tbody>\n");
        for quiz in &upcoming {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><button class=\"take-quiz-btn bg-indigo-600 text-white px-4 py-2 rounded-lg\" data-quiz-id=\"{}\">Take Quiz</button></td></tr>\n",
                escape_html(&quiz.title),
                escape_html(state.course_title(&quiz.course_id)),
                quiz.questions,
                escape_html(&quiz.due_date),
                escape_html(&quiz.id)
            ));
        }
        html.push_str("</tbody>\n</table>\n</div>\n");
    }

    if completed.is_empty() {
        html.push_str("<div class=\"empty-state bg-yellow-50 border border-yellow-200 rounded-xl p-6 text-center\">\n");
        html.push_str("<h3 class=\"text-xl font-bold text-yellow-800 mb-2\">No Completed Quizzes Yet</h3>\n");
        html.push_str("<p class=\"text-yellow-700\">Complete your first quiz to see your results here!</p>\n");
        html.push_str("</div>\n");
    } else {
        html.push_str("<div class=\"completed-quizzes\">\n");
        html.push_str(&section_heading("Completed Quizzes"));
        for quiz in &completed {
            let band = ScoreBand::from_score(quiz.score);
            html.push_str(&format!(
                "<div class=\"quiz-card bg-white rounded-xl shadow-lg p-6\" data-quiz-id=\"{}\">\n<h3 class=\"font-bold text-lg\">{}</h3>\n<p class=\"text-sm text-gray-500\">{}</p>\n<span class=\"score-badge score-{} {}\">{}%</span>\n<div class=\"text-sm text-gray-600\"><span>Questions: {}</span><span>Completed: {}</span></div>\n</div>\n",
                escape_html(&quiz.id),
                escape_html(&quiz.title),
                escape_html(state.course_title(&quiz.course_id)),
                band.as_str(),
                score_band_class(band),
                quiz.score,
                quiz.questions,
                escape_html(&quiz.due_date)
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</section>\n");
    html
}
