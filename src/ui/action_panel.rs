//! Action panel: the form-level buttons beside the fields

use super::components::{render_action_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{ADD_FIELD_SHORTCUT, LOAD_SHORTCUT, SAVE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{Action, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Panel width including button borders
pub const ACTION_PANEL_WIDTH: u16 = 22;

fn shortcut(action: Action) -> Option<&'static str> {
    match action {
        Action::AddField => Some(ADD_FIELD_SHORTCUT),
        Action::Submit => Some(SUBMIT_SHORTCUT),
        Action::Save => Some(SAVE_SHORTCUT),
        Action::Load => Some(LOAD_SHORTCUT),
        Action::CopyJson => None,
        Action::Quit => Some("q"),
    }
}

fn accent(action: Action) -> Color {
    match action {
        Action::Submit => Color::Green,
        Action::Quit => Color::Red,
        _ => Color::Cyan,
    }
}

/// Draw one button per action, plus the shortcut of the selected one
pub fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::Actions;
    let selected = app.state.selected_action();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(Action::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, action) in Action::ALL.iter().enumerate() {
        let is_selected = focused && *action == selected;
        render_action_button(
            frame,
            chunks[idx + 1],
            action.label(),
            is_selected,
            accent(*action),
        );
    }

    let hint = match (focused, shortcut(selected)) {
        (true, Some(keys)) => format!(" {keys}"),
        (true, None) => String::new(),
        (false, _) => " Esc: actions".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(hint)).style(Style::default().fg(Color::DarkGray)),
        chunks[Action::ALL.len() + 1],
    );
}
