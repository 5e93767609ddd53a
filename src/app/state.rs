//! App state - pure data structure with no I/O logic
//!
//! `AppState` is the single owner of the friend list. The named transitions
//! below are the only code that mutates friends or the selection.

use anyhow::{bail, Result};

use crate::app::draft::{AddFriendDraft, SplitBillDraft};
use crate::messages::ui_events::{Focus, FormField, FormKind};
use crate::messages::{RenderState, StatusMessage};
use crate::models::{seed_friends, Friend, FriendId};

/// What the right-hand side of the screen is doing.
///
/// The add form and a selected friend can never coexist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    AddingFriend,
    SplittingBill(FriendId),
}

impl Mode {
    pub fn form(&self) -> FormKind {
        match self {
            Mode::Idle => FormKind::None,
            Mode::AddingFriend => FormKind::AddFriend,
            Mode::SplittingBill(_) => FormKind::SplitBill,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub friends: Vec<Friend>,
    pub mode: Mode,
    next_friend_id: u64,

    // Roster cursor
    pub roster_cursor: usize,

    // Forms
    pub focus: Focus,
    pub active_field: Option<FormField>,
    pub add_draft: AddFriendDraft,
    pub split_draft: SplitBillDraft,

    // Status bar
    pub status: Option<StatusMessage>,

    // Popups
    pub show_help: bool,
    pub export_json: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_friends(seed_friends())
    }

    pub fn with_friends(friends: Vec<Friend>) -> Self {
        let next_friend_id = friends.iter().map(|f| f.id.0).max().unwrap_or(0) + 1;
        AppState {
            friends,
            mode: Mode::Idle,
            next_friend_id,
            roster_cursor: 0,
            focus: Focus::Roster,
            active_field: None,
            add_draft: AddFriendDraft::default(),
            split_draft: SplitBillDraft::default(),
            status: None,
            show_help: false,
            export_json: None,
        }
    }

    /// Hand out a fresh friend id, never one already in the list
    pub fn allocate_friend_id(&mut self) -> FriendId {
        let id = FriendId(self.next_friend_id);
        self.next_friend_id += 1;
        id
    }

    pub fn selected(&self) -> Option<FriendId> {
        match self.mode {
            Mode::SplittingBill(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_add_form_open(&self) -> bool {
        self.mode == Mode::AddingFriend
    }

    pub fn friend(&self, id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    /// Switch mode and reset focus to match the mounted form
    fn set_mode(&mut self, mode: Mode) {
        let previous = self.mode;
        self.mode = mode;
        match mode {
            Mode::Idle => {
                self.focus = Focus::Roster;
                self.active_field = None;
            }
            Mode::AddingFriend => {
                if previous != Mode::AddingFriend {
                    self.add_draft.reset();
                }
                self.focus = Focus::Form;
                self.active_field = FormField::first_of(FormKind::AddFriend);
            }
            Mode::SplittingBill(_) => {
                if previous != mode {
                    self.split_draft = SplitBillDraft::default();
                }
                self.focus = Focus::Form;
                self.active_field = FormField::first_of(FormKind::SplitBill);
            }
        }
    }

    // ========================
    // Transitions
    // ========================

    /// Open the add form if closed, close it if open. Always drops the selection.
    pub fn toggle_add_form(&mut self) {
        if self.is_add_form_open() {
            self.set_mode(Mode::Idle);
        } else {
            self.set_mode(Mode::AddingFriend);
        }
        tracing::debug!(mode = ?self.mode, "Toggled add form");
    }

    /// Append a friend built around an id from `allocate_friend_id`.
    ///
    /// Empty name or image is ignored. On success the add form closes.
    pub fn add_friend(&mut self, friend: Friend) -> Option<FriendId> {
        if friend.name.is_empty() || friend.image.is_empty() {
            return None;
        }
        let id = friend.id;
        tracing::info!(%id, name = %friend.name, "Added friend");
        self.status = Some(StatusMessage::now(format!("Added {} to your friends", friend.name)));
        self.friends.push(friend);
        self.set_mode(Mode::Idle);
        Some(id)
    }

    /// Select a friend for splitting; selecting the current selection clears it.
    pub fn select_friend(&mut self, id: FriendId) {
        if self.selected() == Some(id) {
            self.set_mode(Mode::Idle);
        } else {
            self.set_mode(Mode::SplittingBill(id));
        }
        tracing::debug!(mode = ?self.mode, "Selection changed");
    }

    /// Add `amount` to the selected friend's balance and clear the selection
    pub fn split_bill(&mut self, amount: f64) -> Result<()> {
        let Some(id) = self.selected() else {
            bail!("split_bill called without a selected friend");
        };
        let Some(friend) = self.friends.iter_mut().find(|f| f.id == id) else {
            bail!("selected friend {} does not exist", id);
        };
        friend.balance += amount;
        tracing::info!(%id, amount, balance = friend.balance, "Split bill");
        self.status = Some(StatusMessage::now(format!(
            "Split a bill with {}: {}",
            friend.name,
            friend.balance_text()
        )));
        self.set_mode(Mode::Idle);
        Ok(())
    }

    // ========================
    // Form submission
    // ========================

    /// Commit the add-friend draft. The image URL gets `?u=<id>` so repeated
    /// defaults stay distinct.
    pub fn submit_add_friend(&mut self) -> Option<FriendId> {
        if !self.is_add_form_open() || !self.add_draft.is_complete() {
            return None;
        }
        let id = self.allocate_friend_id();
        let image = format!("{}?u={}", self.add_draft.image_url.value(), id);
        let friend = Friend::new(id, self.add_draft.name.value(), image);
        let added = self.add_friend(friend);
        self.add_draft.reset();
        added
    }

    /// Commit the split-bill draft; incomplete drafts are ignored
    pub fn submit_split_bill(&mut self) -> Result<bool> {
        if self.selected().is_none() {
            return Ok(false);
        }
        match self.split_draft.settlement() {
            Some(amount) => {
                self.split_bill(amount)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            friends: self.friends.clone(),
            roster_cursor: self.roster_cursor,
            selected: self.selected(),
            form: self.mode.form(),
            focus: self.focus,
            active_field: self.active_field,
            add_draft: self.add_draft.clone(),
            split_draft: self.split_draft.clone(),
            split_friend_name: self
                .selected()
                .and_then(|id| self.friend(id))
                .map(|f| f.name.clone()),
            status: self.status.clone(),
            show_help: self.show_help,
            export_json: self.export_json.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLARK: FriendId = FriendId(118836);
    const SARAH: FriendId = FriendId(933372);

    fn balance_of(state: &AppState, id: FriendId) -> f64 {
        state.friend(id).unwrap().balance
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.friends.len(), 3);
        assert_eq!(state.mode, Mode::Idle);
        assert_eq!(state.selected(), None);
        assert!(!state.is_add_form_open());
    }

    #[test]
    fn test_select_twice_clears_selection() {
        let mut state = AppState::new();
        state.select_friend(CLARK);
        assert_eq!(state.selected(), Some(CLARK));
        state.select_friend(CLARK);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_select_other_friend_switches_and_resets_draft() {
        let mut state = AppState::new();
        state.select_friend(CLARK);
        state.split_draft.set_bill("40");
        state.select_friend(SARAH);
        assert_eq!(state.selected(), Some(SARAH));
        assert_eq!(state.split_draft, SplitBillDraft::default());
    }

    #[test]
    fn test_select_closes_add_form() {
        let mut state = AppState::new();
        state.toggle_add_form();
        assert!(state.is_add_form_open());
        state.select_friend(CLARK);
        assert!(!state.is_add_form_open());
        assert_eq!(state.selected(), Some(CLARK));
    }

    #[test]
    fn test_add_form_clears_selection() {
        let mut state = AppState::new();
        state.select_friend(CLARK);
        state.toggle_add_form();
        assert!(state.is_add_form_open());
        assert_eq!(state.selected(), None);
        state.toggle_add_form();
        assert_eq!(state.mode, Mode::Idle);
    }

    #[test]
    fn test_stale_id_becomes_selection() {
        let mut state = AppState::new();
        state.select_friend(FriendId(1));
        assert_eq!(state.selected(), Some(FriendId(1)));
        assert!(state.split_bill(10.0).is_err());
        assert_eq!(state.selected(), Some(FriendId(1)));
    }

    #[test]
    fn test_add_friend_rejects_empty_fields() {
        let mut state = AppState::new();
        state.toggle_add_form();
        let id = state.allocate_friend_id();
        assert_eq!(state.add_friend(Friend::new(id, "", "url")), None);
        assert_eq!(state.add_friend(Friend::new(id, "name", "")), None);
        assert_eq!(state.friends.len(), 3);
        assert!(state.is_add_form_open());
    }

    #[test]
    fn test_add_friend_appends() {
        let mut state = AppState::new();
        state.toggle_add_form();
        let id = state.allocate_friend_id();
        assert_eq!(state.add_friend(Friend::new(id, "Mia", "https://i.pravatar.cc/48")), Some(id));
        assert_eq!(state.friends.len(), 4);
        let mia = &state.friends[3];
        assert_eq!(mia.id, id);
        assert_eq!(mia.name, "Mia");
        assert_eq!(mia.balance, 0.0);
        assert!(!state.is_add_form_open());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut state = AppState::new();
        let a = state.allocate_friend_id();
        let b = state.allocate_friend_id();
        state.add_friend(Friend::new(a, "A", "x")).unwrap();
        state.add_friend(Friend::new(b, "B", "x")).unwrap();
        assert_ne!(a, b);
        assert!(state.friends.iter().filter(|f| f.id == a).count() == 1);
        assert!(state.friends[..3].iter().all(|f| f.id != a && f.id != b));
    }

    #[test]
    fn test_submit_add_friend_suffixes_image() {
        let mut state = AppState::new();
        state.toggle_add_form();
        state.add_draft.name = crate::app::draft::TextInput::new("Mia");
        let id = state.submit_add_friend().unwrap();
        let mia = state.friend(id).unwrap();
        assert_eq!(mia.image, format!("https://i.pravatar.cc/48?u={}", id));
        assert!(!state.is_add_form_open());
        assert!(state.add_draft.name.is_empty());
    }

    #[test]
    fn test_submit_add_friend_reports_through_add_friend() {
        let mut state = AppState::new();
        state.toggle_add_form();
        state.add_draft.name = crate::app::draft::TextInput::new("Mia");
        let id = state.submit_add_friend().unwrap();
        assert_eq!(state.friends.last().map(|f| f.id), Some(id));
        assert_eq!(state.friends[3].balance, 0.0);
        assert_eq!(state.status.as_ref().unwrap().text, "Added Mia to your friends");
    }

    #[test]
    fn test_submit_add_friend_incomplete_keeps_form_open() {
        let mut state = AppState::new();
        state.toggle_add_form();
        assert_eq!(state.submit_add_friend(), None);
        assert!(state.is_add_form_open());
        assert_eq!(state.friends.len(), 3);
    }

    #[test]
    fn test_split_bill_user_pays() {
        let mut state = AppState::new();
        state.select_friend(CLARK);
        state.split_draft.set_bill("100");
        assert!(state.split_draft.set_user_expense("30"));
        assert!(state.submit_split_bill().unwrap());
        assert_eq!(balance_of(&state, CLARK), 63.0);
        assert_eq!(state.selected(), None);
        assert_eq!(state.friend(CLARK).unwrap().balance_text(), "Clark owes you 63$");
    }

    #[test]
    fn test_split_bill_friend_pays() {
        let mut state = AppState::new();
        state.select_friend(CLARK);
        state.split_draft.set_bill("100");
        state.split_draft.set_user_expense("30");
        state.split_draft.toggle_payer();
        assert!(state.submit_split_bill().unwrap());
        assert_eq!(balance_of(&state, CLARK), -37.0);
    }

    #[test]
    fn test_split_bill_incomplete_is_ignored() {
        let mut state = AppState::new();
        state.select_friend(SARAH);
        state.split_draft.set_bill("100");
        assert!(!state.submit_split_bill().unwrap());
        assert_eq!(balance_of(&state, SARAH), 20.0);
        assert_eq!(state.selected(), Some(SARAH));
    }

    #[test]
    fn test_split_bill_requires_selection() {
        let mut state = AppState::new();
        assert!(state.split_bill(5.0).is_err());
        let balances: Vec<f64> = state.friends.iter().map(|f| f.balance).collect();
        assert_eq!(balances, vec![-7.0, 20.0, 0.0]);
    }

    #[test]
    fn test_status_message_after_commit() {
        let mut state = AppState::new();
        assert!(state.status.is_none());
        state.select_friend(SARAH);
        state.split_bill(-20.0).unwrap();
        let status = state.status.as_ref().unwrap();
        assert_eq!(status.text, "Split a bill with Sarah: You and Sarah are even");
    }

    #[test]
    fn test_render_state_carries_selection() {
        let mut state = AppState::new();
        state.select_friend(SARAH);
        let render = state.to_render_state();
        assert_eq!(render.selected, Some(SARAH));
        assert_eq!(render.form, FormKind::SplitBill);
        assert_eq!(render.split_friend_name.as_deref(), Some("Sarah"));
        assert_eq!(render.active_field, Some(FormField::BillValue));
    }
}
