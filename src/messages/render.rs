//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::draft::{AddFriendDraft, SplitBillDraft};
use crate::messages::ui_events::{Focus, FormField, FormKind};
use crate::models::{seed_friends, Friend, FriendId};

/// Message shown in the status bar after a committed change
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub at: DateTime<Local>,
}

impl StatusMessage {
    pub fn now(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            at: Local::now(),
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Roster
    pub friends: Vec<Friend>,
    pub roster_cursor: usize,
    pub selected: Option<FriendId>,

    // Forms
    pub form: FormKind,
    pub focus: Focus,
    pub active_field: Option<FormField>,
    pub add_draft: AddFriendDraft,
    pub split_draft: SplitBillDraft,
    /// Name shown in the split form title; `None` if the selection is stale
    pub split_friend_name: Option<String>,

    // Status bar
    pub status: Option<StatusMessage>,

    // Popups
    pub show_help: bool,
    /// Pretty-printed friend list while the export popup is open
    pub export_json: Option<String>,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            friends: seed_friends(),
            roster_cursor: 0,
            selected: None,
            form: FormKind::None,
            focus: Focus::Roster,
            active_field: None,
            add_draft: AddFriendDraft::default(),
            split_draft: SplitBillDraft::default(),
            split_friend_name: None,
            status: None,
            show_help: false,
            export_json: None,
        }
    }
}
