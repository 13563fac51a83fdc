//! UI module for rendering the TUI

mod action_panel;
mod components;
mod forms;
mod layout;
mod type_menu;

use crate::app::App;
use crate::state::Overlay;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    forms::draw_form(frame, areas.form, app);
    action_panel::draw_action_panel(frame, areas.actions, app);
    layout::draw_status_bar(frame, areas.status, app);

    match app.state.overlay {
        Overlay::TypeMenu { selected } => type_menu::draw_type_menu(frame, selected),
        Overlay::LoadDialog => {
            components::render_load_dialog(frame, &app.state.load_input, &app.document_name())
        }
        Overlay::None => {}
    }

    // Errors draw above everything else
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.error_queue.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignerConfig;
    use crate::transfer::MockDocumentTransfer;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut document = MockDocumentTransfer::new();
        document
            .expect_describe()
            .return_const("form-config.json".to_string());
        App::new(
            DesignerConfig::default(),
            Box::new(document),
            Box::new(MockDocumentTransfer::new()),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_starter_form() {
        let screen = render(&app());
        assert!(screen.contains("Dynamic Form Builder"));
        assert!(screen.contains("Name"));
        assert!(screen.contains("Address"));
        assert!(screen.contains("Submit"));
    }

    #[test]
    fn test_draws_overlays_and_errors() {
        let mut app = app();
        app.open_load_dialog();
        assert!(render(&app).contains("Load JSON Configuration"));

        app.push_error("no field with id 9");
        assert!(render(&app).contains("no field with id 9"));
    }

    #[test]
    fn test_draws_type_menu() {
        let mut app = app();
        app.open_type_menu();
        assert!(render(&app).contains("Radio Button"));
    }
}
