pub mod components;
pub mod dialogs;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", app.search_query),
        InputMode::Normal | InputMode::Dialog if !app.search_query.is_empty() => {
            format!("  filter: \"{}\"", app.search_query)
        }
        InputMode::Normal | InputMode::Dialog => String::new(),
    };
    let p = Paragraph::new(format!(
        "{}{prompt}  usuarios:{}  | {}",
        app.endpoint,
        app.directory.len(),
        app.keymap.help_line()
    ))
    .block(
        Block::default()
            .title("usuarios-tui")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    table::render_usuarios_table(f, root[1], app);
    components::render_status_bar(f, root[2], app);

    if app.dialog.is_open() {
        let area = f.area();
        dialogs::render_dialog(f, area, app);
    }
}
