//! Form drafts - transient, uncommitted field values
//!
//! A draft lives only while its form is shown. Nothing here touches the
//! friend list; committing a draft is done by `AppState`.

use crate::constants::DEFAULT_IMAGE_URL;
use crate::models::Payer;

/// Single-line text buffer with a byte-offset cursor kept on char boundaries
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Create an input with the cursor placed at the end
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        TextInput { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position counted in chars, for terminal placement
    pub fn display_cursor(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    /// The input as it would look after typing `c`
    pub fn with_char(&self, c: char) -> TextInput {
        let mut next = self.clone();
        next.value.insert(next.cursor, c);
        next.cursor += c.len_utf8();
        next
    }

    /// The input as it would look after a backspace
    pub fn with_backspace(&self) -> TextInput {
        let mut next = self.clone();
        if next.cursor > 0 {
            let prev = next.value[..next.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            next.value.remove(prev);
            next.cursor = prev;
        }
        next
    }

    pub fn insert(&mut self, c: char) {
        *self = self.with_char(c);
    }

    pub fn backspace(&mut self) {
        *self = self.with_backspace();
    }
}

/// Parse a numeric field; blank or malformed text has no value
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Empty and zero both count as "not filled in"
fn filled(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Scratch state of the add-friend form
#[derive(Clone, Debug, PartialEq)]
pub struct AddFriendDraft {
    pub name: TextInput,
    pub image_url: TextInput,
}

impl Default for AddFriendDraft {
    fn default() -> Self {
        AddFriendDraft {
            name: TextInput::default(),
            image_url: TextInput::new(DEFAULT_IMAGE_URL),
        }
    }
}

impl AddFriendDraft {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.image_url.is_empty()
    }

    pub fn reset(&mut self) {
        *self = AddFriendDraft::default();
    }
}

/// Scratch state of the split-bill form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitBillDraft {
    pub bill: TextInput,
    pub user_expense: TextInput,
    pub payer: Payer,
}

impl SplitBillDraft {
    pub fn bill_total(&self) -> Option<f64> {
        parse_amount(self.bill.value())
    }

    pub fn user_expense(&self) -> Option<f64> {
        parse_amount(self.user_expense.value())
    }

    /// The friend's share, derived on every read. An empty user expense counts as 0.
    pub fn friend_expense(&self) -> Option<f64> {
        self.bill_total()
            .map(|bill| bill - self.user_expense().unwrap_or(0.0))
    }

    /// Replace the bill text; stored as typed
    pub fn edit_bill(&mut self, candidate: TextInput) {
        self.bill = candidate;
    }

    /// Upper bound for the user expense: the bill, 0 for a blank bill, and
    /// no bound at all while the bill text is malformed.
    fn expense_limit(&self) -> Option<f64> {
        if self.bill.value().trim().is_empty() {
            return Some(0.0);
        }
        self.bill_total()
    }

    /// Replace the user expense text unless it would exceed the bill.
    ///
    /// Returns `false` when the edit is rejected and the previous value kept.
    pub fn edit_user_expense(&mut self, candidate: TextInput) -> bool {
        if let (Some(proposed), Some(limit)) = (parse_amount(candidate.value()), self.expense_limit()) {
            if proposed > limit {
                return false;
            }
        }
        self.user_expense = candidate;
        true
    }

    pub fn set_bill(&mut self, text: &str) {
        self.edit_bill(TextInput::new(text));
    }

    pub fn set_user_expense(&mut self, text: &str) -> bool {
        self.edit_user_expense(TextInput::new(text))
    }

    pub fn toggle_payer(&mut self) {
        self.payer = self.payer.toggle();
    }

    /// Signed amount to apply to the friend's balance, or `None` if the form
    /// is incomplete.
    ///
    /// User pays: the friend now owes their share (`+friend_expense`).
    /// Friend pays: the user's share is recorded against the friend (`-user_expense`).
    pub fn settlement(&self) -> Option<f64> {
        let bill = filled(self.bill_total())?;
        let user = filled(self.user_expense())?;
        Some(match self.payer {
            Payer::User => bill - user,
            Payer::Friend => -user,
        })
    }
}
