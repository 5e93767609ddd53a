//! Terminal drawing - renders a `RenderState` snapshot, never mutates it

use ratatui::{prelude::*, widgets::*};

use crate::app::draft::TextInput;
use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::{Focus, FormField, FormKind};
use crate::messages::RenderState;
use crate::models::{BalanceStatus, Payer};

/// Balance colour: red when the user owes, green when owed
pub fn balance_color(status: BalanceStatus) -> Color {
    match status {
        BalanceStatus::YouOwe(_) => Color::Red,
        BalanceStatus::OwesYou(_) => Color::Green,
        BalanceStatus::Even => Color::Gray,
    }
}

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[1]);

    draw_sidebar(f, state, columns[0]);
    if state.form == FormKind::SplitBill {
        draw_split_form(f, state, columns[1]);
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(json) = &state.export_json {
        draw_export_popup(f, json, area);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Yellow).bold()),
        Span::styled(format!(" v{}", APP_VERSION), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_sidebar(f: &mut Frame, state: &RenderState, area: Rect) {
    let add_height = if state.form == FormKind::AddFriend { 6 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(add_height)])
        .split(area);

    draw_roster(f, state, chunks[0]);

    if state.form == FormKind::AddFriend {
        draw_add_form(f, state, chunks[1]);
    } else {
        let button = Paragraph::new(" [a] Add friend ")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, chunks[1]);
    }
}

fn draw_roster(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Roster;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = state
        .friends
        .iter()
        .map(|friend| {
            let is_selected = state.selected == Some(friend.id);
            let marker = if is_selected { "[x] " } else { "[ ] " };
            let status = friend.balance_status();
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(friend.name.clone(), Style::default().bold()),
                    Span::styled(format!("  {}", friend.image), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", friend.balance_text()),
                    Style::default().fg(balance_color(status)),
                )),
            ])
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" Friends ({}) ", state.friends.len())),
        )
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(Some(state.roster_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// One labelled input row, highlighted when it is the active field
fn field_line<'a>(label: &'a str, value: String, active: bool) -> Line<'a> {
    let value_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let label_style = if active {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(value, value_style),
    ])
}

/// Place the terminal cursor inside `input` on the given row of a bordered block
fn place_cursor(f: &mut Frame, area: Rect, row: u16, label: &str, input: &TextInput) {
    let y = area.y.saturating_add(1).saturating_add(row);
    f.set_cursor_position(Position::new(cursor_column(area, label, input), y));
}

/// Cursor column after `label` and the input's cursor, pinned inside the right border
fn cursor_column(area: Rect, label: &str, input: &TextInput) -> u16 {
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let offset = u16::try_from(label.chars().count() + input.display_cursor()).unwrap_or(u16::MAX);
    area.x.saturating_add(1).saturating_add(offset).min(max_x)
}

const NAME_LABEL: &str = "Friend name: ";
const IMAGE_LABEL: &str = "Image URL:   ";

fn draw_add_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Form;
    let active = |field: FormField| is_focused && state.active_field == Some(field);
    let draft = &state.add_draft;

    let lines = vec![
        field_line(NAME_LABEL, draft.name.value().to_string(), active(FormField::FriendName)),
        field_line(IMAGE_LABEL, draft.image_url.value().to_string(), active(FormField::ImageUrl)),
        Line::from(""),
        Line::from(Span::styled(" Enter: Add ", Style::default().fg(Color::Black).bg(Color::Yellow))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
        .title(" Add friend ");
    f.render_widget(Paragraph::new(lines).block(block), area);

    match state.active_field {
        Some(FormField::FriendName) if is_focused => place_cursor(f, area, 0, NAME_LABEL, &draft.name),
        Some(FormField::ImageUrl) if is_focused => place_cursor(f, area, 1, IMAGE_LABEL, &draft.image_url),
        _ => {}
    }
}

const BILL_LABEL: &str = "Bill value:        ";
const EXPENSE_LABEL: &str = "Your expense:      ";

fn draw_split_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Form;
    let active = |field: FormField| is_focused && state.active_field == Some(field);
    let draft = &state.split_draft;
    let name = state.split_friend_name.as_deref().unwrap_or("?");

    let friend_label = format!("{:<19}", format!("{}'s expense:", name));
    let friend_expense = draft
        .friend_expense()
        .map(|v| v.to_string())
        .unwrap_or_default();
    let payer = match draft.payer {
        Payer::User => "You".to_string(),
        Payer::Friend => name.to_string(),
    };

    let lines = vec![
        field_line(BILL_LABEL, draft.bill.value().to_string(), active(FormField::BillValue)),
        field_line(EXPENSE_LABEL, draft.user_expense.value().to_string(), active(FormField::UserExpense)),
        Line::from(vec![
            Span::raw(friend_label),
            Span::styled(friend_expense, Style::default().fg(Color::DarkGray)),
        ]),
        field_line("Who pays the bill: ", format!("< {} >", payer), active(FormField::Payer)),
        Line::from(""),
        Line::from(Span::styled(" Enter: Split bill ", Style::default().fg(Color::Black).bg(Color::Yellow))),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        })
        .title(format!(" Split a bill with {} ", name));
    f.render_widget(Paragraph::new(lines).block(block), area);

    match state.active_field {
        Some(FormField::BillValue) if is_focused => place_cursor(f, area, 0, BILL_LABEL, &draft.bill),
        Some(FormField::UserExpense) if is_focused => {
            place_cursor(f, area, 1, EXPENSE_LABEL, &draft.user_expense)
        }
        _ => {}
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = match state.focus {
        Focus::Roster => " ↑/↓:move | Enter:select | a:add friend | Tab:form | x:export | ?:help | q:quit ",
        Focus::Form => " Tab:next field | Enter:submit | ←/→:payer | Esc:back to list ",
    };

    let line = match &state.status {
        Some(status) => Line::from(vec![
            Span::styled(
                format!(" [{}] {} ", status.at.format("%H:%M:%S"), status.text),
                Style::default().fg(Color::Green),
            ),
            Span::styled(hints, Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 EAT-'N-SPLIT - Keyboard Shortcuts

 FRIEND LIST
   ↑ / ↓  (k / j)     Move cursor
   Enter / Space      Select friend (again to close)
   a                  Open / close the add-friend form
   Tab                Focus the open form
   x                  Show friends as JSON

 FORMS
   Tab / Shift+Tab    Next / previous field
   ← / →              Move cursor, or switch who pays
   Enter              Submit
   Esc                Back to the friend list

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_export_popup(f: &mut Frame, json: &str, area: Rect) {
    let popup_area = centered_rect(70, 80, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Friends as JSON (Esc to close) ")
        .style(Style::default().bg(Color::Black));

    let content = Paragraph::new(highlight_json(json))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

/// Minimal JSON colouring for pretty-printed output: keys, strings, numbers
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = line[..line.len() - trimmed.len()].to_string();

            let Some((key, value)) = trimmed.split_once("\": ") else {
                return Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Yellow)));
            };

            let value_color = if value.starts_with('"') {
                Color::Green
            } else {
                Color::Magenta
            };
            Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{}\"", key), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::styled(value.to_string(), Style::default().fg(value_color)),
            ])
        })
        .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
