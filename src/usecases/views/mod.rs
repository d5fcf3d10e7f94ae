//! View renderers. Pure `&AppState -> String` functions, one per view.

mod markup;

pub mod courses;
pub mod dashboard;
pub mod forum;
pub mod home;
pub mod quizzes;

use crate::domain::{AppState, View};

/// Markup of the current view.
pub fn render_view(state: &AppState) -> String {
    match state.current_view {
        View::Home => home::render(state),
        View::Courses => courses::render(state),
        View::Forum => forum::render(state),
        View::Quizzes => quizzes::render(state),
        View::Dashboard => dashboard::render(state),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use fixtures::state_with_courses;

    #[test]
    fn renders_the_current_view() {
        let mut state = state_with_courses(&["a"]);
        for view in View::ALL {
            state.current_view = view;
            let html = render_view(&state);
            assert!(html.contains(&format!("class=\"{}-view", view.as_str())));
        }
    }
}
