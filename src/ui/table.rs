use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;

/// The data grid: one page of the visible rows around the cursor.
pub fn render_usuarios_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 { app.rows_per_page = body_height; }

    let block = Block::default()
        .title(format!("Usuarios CRUD ({}/{})", app.usuarios.len(), app.directory.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.usuarios.is_empty() {
        let msg = if app.in_flight.is_some() {
            "Loading..."
        } else if app.search_query.is_empty() {
            "No usuarios yet. Press n to add one."
        } else {
            "No usuarios match the search."
        };
        let p = Paragraph::new(msg).style(Style::default().fg(app.theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }

    let start = (app.selected_index / app.rows_per_page) * app.rows_per_page;
    let end = (start + app.rows_per_page).min(app.usuarios.len());
    let slice = &app.usuarios[start..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else { Style::default().fg(app.theme.text) };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.nombre.clone()),
            Cell::from(u.apellidos.clone()),
        ]).style(style)
    });

    let widths = [Constraint::Length(10), Constraint::Percentage(40), Constraint::Percentage(60)];

    let header = Row::new(vec!["ID", "NOMBRE", "APELLIDOS"]).style(
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}
