//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Raw key press, mapped by the App layer against its live state
    Key(KeyEvent),

    // Roster navigation
    RosterUp,
    RosterDown,
    SelectFriend,
    ToggleAddForm,

    // Focus
    FocusForm,
    FocusRoster,
    NextField,
    PrevField,

    // Input editing
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    TogglePayer,
    Submit,

    // Popups
    ShowExport,
    CloseExport,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Pane receiving keystrokes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Roster,
    Form,
}

/// Which form is currently mounted, if any
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormKind {
    #[default]
    None,
    AddFriend,
    SplitBill,
}

/// Editable field inside a form
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField {
    FriendName,
    ImageUrl,
    BillValue,
    UserExpense,
    Payer,
}

impl FormField {
    /// First field focused when a form opens
    pub fn first_of(kind: FormKind) -> Option<FormField> {
        match kind {
            FormKind::None => None,
            FormKind::AddFriend => Some(FormField::FriendName),
            FormKind::SplitBill => Some(FormField::BillValue),
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::FriendName => FormField::ImageUrl,
            FormField::ImageUrl => FormField::FriendName,
            FormField::BillValue => FormField::UserExpense,
            FormField::UserExpense => FormField::Payer,
            FormField::Payer => FormField::BillValue,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::FriendName => FormField::ImageUrl,
            FormField::ImageUrl => FormField::FriendName,
            FormField::BillValue => FormField::Payer,
            FormField::UserExpense => FormField::BillValue,
            FormField::Payer => FormField::UserExpense,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    focus: Focus,
    form: FormKind,
    active_field: Option<FormField>,
    show_help: bool,
    show_export: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Popups swallow keys first
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_export {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('q') => {
                Some(UiEvent::CloseExport)
            }
            _ => None,
        };
    }

    match focus {
        Focus::Roster => handle_roster_keys(key, form),
        Focus::Form => handle_form_keys(key, active_field),
    }
}

/// Handle keys while the friend list has focus
fn handle_roster_keys(key: KeyEvent, form: FormKind) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::RosterUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::RosterDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::SelectFriend),
        KeyCode::Char('a') => Some(UiEvent::ToggleAddForm),
        KeyCode::Char('x') => Some(UiEvent::ShowExport),
        KeyCode::Tab if form != FormKind::None => Some(UiEvent::FocusForm),
        _ => None,
    }
}

/// Handle keys while a form has focus
fn handle_form_keys(key: KeyEvent, active_field: Option<FormField>) -> Option<UiEvent> {
    let on_payer = active_field == Some(FormField::Payer);
    match key.code {
        KeyCode::Esc => Some(UiEvent::FocusRoster),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_payer => {
            Some(UiEvent::TogglePayer)
        }
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(_) if on_payer => None,
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
