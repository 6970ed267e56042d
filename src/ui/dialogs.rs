use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, Dialog, DraftField};
use crate::ui::components::{centered_rect, pending_hint};

pub fn render_dialog(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.dialog {
        Dialog::Closed => {}
        Dialog::Insert => render_form(f, area, app, "Add new usuario", "Enter: insert  Esc: cancel"),
        Dialog::Edit(id) => {
            let title = format!("Edit usuario {id}");
            render_form(f, area, app, &title, "Enter: save  Esc: cancel");
        }
        Dialog::Delete(id) => render_delete_confirm(f, area, app, &id.to_string()),
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &AppState, title: &str, actions: &str) {
    let rect = centered_rect(56, 9, area);
    let lines: Vec<String> = [DraftField::Nombre, DraftField::Apellidos]
        .into_iter()
        .map(|field| {
            let marker = if app.selection.focus == field { "▶" } else { " " };
            let cursor = if app.selection.focus == field { "_" } else { "" };
            format!("{marker} {:<10} {}{cursor}", format!("{}:", field.label()), app.selection.value(field))
        })
        .collect();
    let mut body = lines.join("\n");
    body.push_str("\n\n");
    body.push_str(actions);
    if let Some(hint) = pending_hint(app) {
        body.push_str(&format!("\n{hint}"));
    }
    let p = Paragraph::new(body).block(
        Block::default().title(title.to_string()).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, id: &str) {
    let rect = centered_rect(56, 8, area);
    let name = app.selection.draft();
    let full = format!("{} {}", name.nombre, name.apellidos);
    let mut body = format!("Delete usuario '{}' (id {id})?\n\n  [y] Yes    [n] No", full.trim());
    if let Some(hint) = pending_hint(app) {
        body.push_str(&format!("\n{hint}"));
    }
    let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default().title("Confirm delete").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
