//! Command handlers - translate UI events into state transitions

use crossterm::event::KeyEvent;

use crate::app::draft::TextInput;
use crate::app::AppState;
use crate::messages::ui_events::{key_to_ui_event, Focus, FormField, FormKind};
use crate::messages::UiEvent;

impl AppState {
    /// Map a key press using the current focus, form and popups
    pub fn map_key(&self, key: KeyEvent) -> Option<UiEvent> {
        key_to_ui_event(
            key,
            self.focus,
            self.mode.form(),
            self.active_field,
            self.show_help,
            self.export_json.is_some(),
        )
    }

    // ========================
    // Roster
    // ========================

    pub fn roster_up(&mut self) {
        if !self.friends.is_empty() {
            self.roster_cursor = self
                .roster_cursor
                .checked_sub(1)
                .unwrap_or(self.friends.len() - 1);
        }
    }

    pub fn roster_down(&mut self) {
        if !self.friends.is_empty() {
            self.roster_cursor = (self.roster_cursor + 1) % self.friends.len();
        }
    }

    /// Select (or deselect) the friend under the roster cursor
    pub fn select_at_cursor(&mut self) {
        if let Some(id) = self.friends.get(self.roster_cursor).map(|f| f.id) {
            self.select_friend(id);
        }
    }

    // ========================
    // Focus
    // ========================

    pub fn focus_form(&mut self) {
        if self.mode.form() != FormKind::None {
            self.focus = Focus::Form;
        }
    }

    pub fn focus_roster(&mut self) {
        self.focus = Focus::Roster;
    }

    pub fn next_field(&mut self) {
        self.active_field = self.active_field.map(|f| f.next());
    }

    pub fn prev_field(&mut self) {
        self.active_field = self.active_field.map(|f| f.prev());
    }

    // ========================
    // Input editing
    // ========================

    fn active_input(&self) -> Option<&TextInput> {
        match self.active_field? {
            FormField::FriendName => Some(&self.add_draft.name),
            FormField::ImageUrl => Some(&self.add_draft.image_url),
            FormField::BillValue => Some(&self.split_draft.bill),
            FormField::UserExpense => Some(&self.split_draft.user_expense),
            FormField::Payer => None,
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.active_field? {
            FormField::FriendName => Some(&mut self.add_draft.name),
            FormField::ImageUrl => Some(&mut self.add_draft.image_url),
            FormField::BillValue => Some(&mut self.split_draft.bill),
            FormField::UserExpense => Some(&mut self.split_draft.user_expense),
            FormField::Payer => None,
        }
    }

    /// Route an edited copy of the active input through the draft rules
    fn commit_input(&mut self, candidate: TextInput) {
        match self.active_field {
            Some(FormField::FriendName) => self.add_draft.name = candidate,
            Some(FormField::ImageUrl) => self.add_draft.image_url = candidate,
            Some(FormField::BillValue) => self.split_draft.edit_bill(candidate),
            Some(FormField::UserExpense) => {
                if !self.split_draft.edit_user_expense(candidate) {
                    tracing::debug!("User expense exceeds bill, edit rejected");
                }
            }
            Some(FormField::Payer) | None => {}
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(candidate) = self.active_input().map(|input| input.with_char(c)) {
            self.commit_input(candidate);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(candidate) = self.active_input().map(|input| input.with_backspace()) {
            self.commit_input(candidate);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.move_right();
        }
    }

    pub fn toggle_payer(&mut self) {
        if self.active_field == Some(FormField::Payer) {
            self.split_draft.toggle_payer();
        }
    }

    /// Submit whichever form is mounted
    pub fn submit(&mut self) -> anyhow::Result<()> {
        match self.mode.form() {
            FormKind::AddFriend => {
                self.submit_add_friend();
            }
            FormKind::SplitBill => {
                self.submit_split_bill()?;
            }
            FormKind::None => {}
        }
        Ok(())
    }

    // ========================
    // Popups
    // ========================

    pub fn show_export(&mut self) {
        match serde_json::to_string_pretty(&self.friends) {
            Ok(json) => self.export_json = Some(json),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize friends"),
        }
    }

    pub fn close_export(&mut self) {
        self.export_json = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Mode;
    use crate::models::FriendId;

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.enter_char(c);
        }
    }

    #[test]
    fn test_map_key_follows_focus() {
        use crossterm::event::{KeyCode, KeyModifiers};
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let mut state = AppState::new();
        assert_eq!(state.map_key(q), Some(UiEvent::Quit));
        state.toggle_add_form();
        assert_eq!(state.map_key(q), Some(UiEvent::CharInput('q')));
    }

    #[test]
    fn test_roster_cursor_wraps() {
        let mut state = AppState::new();
        state.roster_up();
        assert_eq!(state.roster_cursor, 2);
        state.roster_down();
        assert_eq!(state.roster_cursor, 0);
    }

    #[test]
    fn test_select_at_cursor_toggles() {
        let mut state = AppState::new();
        state.roster_down();
        state.select_at_cursor();
        assert_eq!(state.selected(), Some(FriendId(933372)));
        assert_eq!(state.focus, Focus::Form);
        state.select_at_cursor();
        assert_eq!(state.selected(), None);
        assert_eq!(state.focus, Focus::Roster);
    }

    #[test]
    fn test_typing_into_add_form() {
        let mut state = AppState::new();
        state.toggle_add_form();
        type_str(&mut state, "Mia");
        state.next_field();
        assert_eq!(state.active_field, Some(FormField::ImageUrl));
        state.delete_char();
        type_str(&mut state, "9");
        assert_eq!(state.add_draft.name.value(), "Mia");
        assert_eq!(state.add_draft.image_url.value(), "https://i.pravatar.cc/49");
        state.submit().unwrap();
        assert_eq!(state.friends.len(), 4);
        assert_eq!(state.mode, Mode::Idle);
        assert!(state.friends[3].image.starts_with("https://i.pravatar.cc/49?u="));
    }

    #[test]
    fn test_bill_text_stored_as_typed() {
        let mut state = AppState::new();
        state.select_at_cursor();
        type_str(&mut state, "-5");
        assert_eq!(state.split_draft.bill.value(), "-5");
        assert_eq!(state.split_draft.bill_total(), Some(-5.0));
        state.delete_char();
        state.delete_char();
        type_str(&mut state, "1a0");
        assert_eq!(state.split_draft.bill.value(), "1a0");
        assert_eq!(state.split_draft.bill_total(), None);
    }

    #[test]
    fn test_expense_accepted_after_malformed_bill() {
        let mut state = AppState::new();
        state.select_at_cursor();
        type_str(&mut state, "1.2.");
        state.next_field();
        type_str(&mut state, "5");
        assert_eq!(state.split_draft.user_expense.value(), "5");
    }

    #[test]
    fn test_keystroke_clamp_on_user_expense() {
        let mut state = AppState::new();
        state.select_at_cursor();
        type_str(&mut state, "50");
        state.next_field();
        type_str(&mut state, "80");
        // "8" fits under 50, "80" does not
        assert_eq!(state.split_draft.user_expense.value(), "8");
    }

    #[test]
    fn test_split_flow_through_commands() {
        let mut state = AppState::new();
        state.select_at_cursor();
        type_str(&mut state, "100");
        state.next_field();
        type_str(&mut state, "30");
        state.next_field();
        state.toggle_payer();
        state.submit().unwrap();
        assert_eq!(state.friends[0].balance, -37.0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_submit_empty_split_keeps_form() {
        let mut state = AppState::new();
        state.select_at_cursor();
        state.submit().unwrap();
        assert_eq!(state.selected(), Some(FriendId(118836)));
        assert_eq!(state.friends[0].balance, -7.0);
    }

    #[test]
    fn test_toggle_payer_only_on_payer_field() {
        let mut state = AppState::new();
        state.select_at_cursor();
        state.toggle_payer();
        assert_eq!(state.split_draft.payer, crate::models::Payer::User);
        state.prev_field();
        state.toggle_payer();
        assert_eq!(state.split_draft.payer, crate::models::Payer::Friend);
    }

    #[test]
    fn test_export_lists_friends() {
        let mut state = AppState::new();
        state.show_export();
        let json = state.export_json.clone().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[0]["name"], "Clark");
        state.close_export();
        assert!(state.export_json.is_none());
    }

    #[test]
    fn test_focus_form_requires_open_form() {
        let mut state = AppState::new();
        state.focus_form();
        assert_eq!(state.focus, Focus::Roster);
        state.toggle_add_form();
        state.focus_roster();
        state.focus_form();
        assert_eq!(state.focus, Focus::Form);
    }
}
