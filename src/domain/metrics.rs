//! Derived figures shown by the views. Pure functions over [`AppState`].

use crate::domain::entities::Course;
use crate::domain::state::AppState;
use crate::domain::time::parse_timestamp;

/// Number of entries in the dashboard's recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Courses split by enrollment. Disjoint and exhaustive over `state.courses`, both in
/// catalog order.
#[derive(Debug)]
pub struct CoursePartition<'a> {
    pub enrolled: Vec<&'a Course>,
    pub available: Vec<&'a Course>,
}

pub fn partition_courses(state: &AppState) -> CoursePartition<'_> {
    let (enrolled, available): (Vec<&Course>, Vec<&Course>) = state
        .courses
        .iter()
        .partition(|c| state.is_enrolled(&c.id));
    CoursePartition {
        enrolled,
        available,
    }
}

/// Rounded mean; 0 for an empty slice.
pub fn average_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    (total as f64 / scores.len() as f64).round() as u32
}

/// Rounded percentage of `completed` over `total`; 0 when `total` is 0.
pub fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub enrolled: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub average_score: u32,
    pub quiz_completion_rate: u32,
    pub unread_notifications: usize,
}

impl DashboardSummary {
    pub fn compute(state: &AppState) -> Self {
        let enrolled = partition_courses(state).enrolled;
        let completed = enrolled
            .iter()
            .filter(|c| state.is_completed(&c.id))
            .count();
        let scores: Vec<u32> = enrolled
            .iter()
            .map(|c| state.progress_for(&c.id).map(|p| p.score).unwrap_or(0))
            .collect();
        let quizzes_done = state.quizzes.iter().filter(|q| q.completed).count();

        Self {
            enrolled: enrolled.len(),
            completed,
            in_progress: enrolled.len() - completed,
            average_score: average_score(&scores),
            quiz_completion_rate: completion_rate(quizzes_done, state.quizzes.len()),
            unread_notifications: state.notifications.iter().filter(|n| !n.read).count(),
        }
    }
}

/// Four-tier band for quiz scores (inclusive lower bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Mid,
    Low,
    Fail,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => ScoreBand::High,
            70..=89 => ScoreBand::Mid,
            50..=69 => ScoreBand::Low,
            _ => ScoreBand::Fail,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Mid => "mid",
            ScoreBand::Low => "low",
            ScoreBand::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    CourseCompleted,
    QuizCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Raw event time as stored.
    pub time: String,
}

/// Completed courses (that carry `completed_at`) and completed quizzes (timed by their
/// due date), newest first, at most `limit` entries.
///
/// Entries whose time does not parse sort after every dated entry, keeping their
/// relative order.
pub fn recent_activity(state: &AppState, limit: usize) -> Vec<Activity> {
    let mut activities = Vec::new();

    for course in &state.courses {
        let Some(progress) = state.progress_for(&course.id) else {
            continue;
        };
        if !progress.completed {
            continue;
        }
        if let Some(ref at) = progress.completed_at {
            activities.push(Activity {
                kind: ActivityKind::CourseCompleted,
                title: format!("Completed \"{}\"", course.title),
                description: format!("Score: {}%", progress.score),
                time: at.clone(),
            });
        }
    }

    for quiz in state.quizzes.iter().filter(|q| q.completed) {
        let description = match state.find_course(&quiz.course_id) {
            Some(course) => format!("Course: {}", course.title),
            None => format!("Quiz: {}", quiz.id),
        };
        activities.push(Activity {
            kind: ActivityKind::QuizCompleted,
            title: format!("Completed \"{}\"", quiz.title),
            description,
            time: quiz.due_date.clone(),
        });
    }

    activities.sort_by_key(|a| std::cmp::Reverse(parse_timestamp(&a.time)));
    activities.truncate(limit);
    activities
}
