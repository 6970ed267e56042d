//! Shared UI components (status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use crate::app::{AppState, InputMode, NoticeLevel};

/// Render the bottom status bar with mode, pending request and last notice.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Dialog => "DIALOG",
    };
    let mut msg = format!("mode: {mode}  rows/page:{}", app.rows_per_page);
    if let Some(hint) = pending_hint(app) {
        msg.push_str(&format!("  {hint}"));
    }
    let mut style = Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg);
    if let Some(notice) = &app.notice {
        msg.push_str(&format!("  {}", notice.message));
        if notice.level == NoticeLevel::Error {
            style = style.fg(app.theme.error_fg);
        }
    }
    f.render_widget(Paragraph::new(msg).style(style), area);
}

/// "[creating...]" while a request is outstanding.
pub fn pending_hint(app: &AppState) -> Option<String> {
    app.in_flight.as_ref().map(|r| format!("[{}...]", r.label()))
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Usuario;
    use crate::app::{Completion, Notice};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| crate::ui::render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), Rect::new(0, 0, 20, 10));
    }

    #[test]
    fn grid_and_status_show_rows_and_errors() {
        let mut app = AppState::new("http://localhost:8000/api/usuario");
        app.request_list();
        app.apply_completion(Completion::Listed(Ok(vec![Usuario::new(1, "Ana", "Ruiz"), Usuario::new(2, "Luis", "Diaz")])));
        app.notice = Some(Notice::error("DELETE rejected by server (404)"));

        let text = screen(&mut app);
        assert!(text.contains("Usuarios CRUD (2/2)"));
        assert!(text.contains("Ana"));
        assert!(text.contains("Diaz"));
        assert!(text.contains("DELETE rejected by server (404)"));
    }

    #[test]
    fn delete_dialog_names_the_record() {
        let mut app = AppState::new("http://localhost:8000/api/usuario");
        app.request_list();
        app.apply_completion(Completion::Listed(Ok(vec![Usuario::new(7, "Ana", "Ruiz")])));
        let ana = app.usuarios[0].clone();
        app.select_for_delete(&ana);

        let text = screen(&mut app);
        assert!(text.contains("Delete usuario 'Ana Ruiz' (id 7)?"));
        assert!(text.contains("mode: DIALOG"));
    }

    #[test]
    fn pending_hint_follows_in_flight_request() {
        let mut app = AppState::new("memory://ui");
        assert_eq!(pending_hint(&app), None);
        app.request_list();
        assert_eq!(pending_hint(&app).as_deref(), Some("[loading...]"));
    }
}
