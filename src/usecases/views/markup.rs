//! Fragments shared by several views.

use crate::domain::Level;
use crate::shared::html::escape_html;

/// Badge class for a course level.
pub fn level_badge_class(level: Level) -> &'static str {
    match level {
        Level::Beginner => "bg-blue-100 text-blue-800",
        Level::Intermediate => "bg-purple-100 text-purple-800",
        Level::Advanced => "bg-pink-100 text-pink-800",
    }
}

pub fn level_badge(level: Level) -> String {
    format!(
        "<span class=\"level-badge px-2 py-1 text-xs rounded-full {}\">{}</span>",
        level_badge_class(level),
        level
    )
}

/// Progress bar colour: green from 70 up, yellow below.
pub fn progress_bar_class(score: u32) -> &'static str {
    if score >= 70 {
        "bg-green-500"
    } else {
        "bg-yellow-500"
    }
}

pub fn stat_card(label: &str, value: &str, icon: &str) -> String {
    format!(
        "<div class=\"stat-card bg-white rounded-xl shadow p-6\">\
         <i class=\"fas {} text-indigo-600\"></i>\
         <p class=\"stat-value text-3xl font-bold\">{}</p>\
         <p class=\"stat-label text-gray-500\">{}</p></div>\n",
        icon,
        escape_html(value),
        escape_html(label)
    )
}

pub fn section_heading(text: &str) -> String {
    format!(
        "<h2 class=\"text-2xl font-bold text-gray-800 mb-6\">{}</h2>\n",
        escape_html(text)
    )
}

/// Thousands separator for the marketing figures.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
