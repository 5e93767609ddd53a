//! App actor - message loop processing UI events

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RenderState, UiEvent};

/// App actor that owns the state and applies UI events one at a time
pub struct AppActor {
    state: AppState,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        Self::with_state(AppState::new(), render_tx)
    }

    pub fn with_state(state: AppState, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        AppActor { state, render_tx }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        while let Some(event) = ui_rx.recv().await {
            if self.handle_ui_event(event) {
                tracing::info!("Quit requested");
                break;
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Key(key) => {
                return match self.state.map_key(key) {
                    Some(UiEvent::Key(_)) | None => false,
                    Some(mapped) => self.handle_ui_event(mapped),
                };
            }

            // Roster
            UiEvent::RosterUp => self.state.roster_up(),
            UiEvent::RosterDown => self.state.roster_down(),
            UiEvent::SelectFriend => self.state.select_at_cursor(),
            UiEvent::ToggleAddForm => self.state.toggle_add_form(),

            // Focus
            UiEvent::FocusForm => self.state.focus_form(),
            UiEvent::FocusRoster => self.state.focus_roster(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),

            // Input editing
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::TogglePayer => self.state.toggle_payer(),
            UiEvent::Submit => {
                if let Err(e) = self.state.submit() {
                    tracing::warn!(error = %e, "Submit rejected");
                }
            }

            // Popups
            UiEvent::ShowExport => self.state.show_export(),
            UiEvent::CloseExport => self.state.close_export(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
