//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Each turn lists the elements bound on the current page; choosing one clicks it. The
//! full page is written to `output_path` after every turn.

use crate::adapters::ui::progress::Spinner;
use crate::domain::{DomainError, Notice, NoticeKind, SessionState};
use crate::ports::InputPort;
use crate::usecases::{AppController, BindingTable};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use inquire::error::InquireError;
use inquire::ui::{Color as PromptColor, RenderConfig, Styled};
use inquire::Select;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

const QUIT_LABEL: &str = "Quit";
const PAGE_SIZE: usize = 15;

/// Prompt styling shared by every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(PromptColor::LightMagenta))
        .with_highlighted_option_prefix(Styled::new(">").with_fg(PromptColor::LightCyan));
    inquire::set_global_render_config(config);
}

/// Menu entries for the current page, `Quit` last.
pub fn menu_labels(table: &BindingTable) -> Vec<String> {
    let mut labels: Vec<String> = table.bindings.iter().map(|b| b.label.clone()).collect();
    labels.push(QUIT_LABEL.to_string());
    labels
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    controller: Arc<AppController>,
    output_path: PathBuf,
    /// Wait for the initial session before the first prompt.
    await_session: bool,
}

impl TuiInputPort {
    pub fn new(controller: Arc<AppController>, output_path: PathBuf) -> Self {
        Self {
            controller,
            output_path,
            await_session: true,
        }
    }

    /// Skip the session wait (nothing will resolve it after a failed start).
    pub fn with_session_wait(mut self, await_session: bool) -> Self {
        self.await_session = await_session;
        self
    }

    async fn write_snapshot(&self) -> Result<(), DomainError> {
        let page = self.controller.surface().snapshot().await;
        tokio::fs::write(&self.output_path, page)
            .await
            .map_err(|e| {
                DomainError::Surface(format!("write {}: {}", self.output_path.display(), e))
            })?;
        debug!(path = %self.output_path.display(), "page snapshot written");
        Ok(())
    }

    /// Prints notices that opened since the previous turn.
    async fn print_new_notices(&self, shown: &mut [Option<Notice>; 2]) {
        let surface = self.controller.surface();
        for (slot, kind) in [NoticeKind::Modal, NoticeKind::Video].into_iter().enumerate() {
            let open = surface.open_notice(kind).await;
            if open.is_some() && open != shown[slot] {
                if let Some(ref notice) = open {
                    print_notice(notice);
                }
            }
            shown[slot] = open;
        }
    }
}

fn print_notice(notice: &Notice) {
    let mut out = stdout();
    let color = match notice.kind {
        NoticeKind::Modal => Color::Magenta,
        NoticeKind::Video => Color::Cyan,
    };
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(SetAttribute(Attribute::Bold));
    let _ = out.execute(Print(format!("\r\n== {} ==\r\n", notice.title)));
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!("{}\r\n\r\n", notice.message)));
    let _ = out.flush();
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        if self.await_session {
            let spinner = Spinner::start("Resolving session...");
            self.controller.next_event().await?;
            spinner.finish(match self.controller.state().await.session() {
                SessionState::SignedIn => "Signed in as demo student",
                SessionState::SignedOut => "Browsing as guest",
            });
        }

        let mut shown: [Option<Notice>; 2] = [None, None];
        loop {
            self.controller.pump().await?;
            self.print_new_notices(&mut shown).await;
            self.write_snapshot().await?;

            let state = self.controller.state().await;
            let table = self.controller.bindings().await;
            let labels = menu_labels(&table);
            let message = format!("[{}] Choose an action:", state.current_view.title());

            let choice = tokio::task::spawn_blocking(move || {
                Select::new(&message, labels)
                    .with_page_size(PAGE_SIZE)
                    .raw_prompt()
            })
            .await
            .map_err(|e| DomainError::Surface(e.to_string()))?;

            let index = match choice {
                Ok(option) => option.index,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(DomainError::Surface(e.to_string())),
            };
            let Some(binding) = table.bindings.get(index) else {
                break;
            };
            self.controller.click(&binding.target).await?;
        }

        info!(path = %self.output_path.display(), "session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, Target};
    use crate::usecases::Binding;

    #[test]
    fn quit_is_always_last() {
        let table = BindingTable {
            generation: 1,
            bindings: vec![Binding {
                target: Target::id("auth-button"),
                action: Action::ToggleAuth,
                label: "Sign In".into(),
            }],
        };
        assert_eq!(menu_labels(&table), ["Sign In", "Quit"]);
        assert_eq!(menu_labels(&BindingTable::default()), ["Quit"]);
    }
}
