use crate::app::AppState;

/// Rebuild the visible rows from the mirror, keeping those whose id, nombre
/// or apellidos contain the search query (case-insensitive).
pub fn apply_search(app: &mut AppState) {
    let q = app.search_query.trim().to_lowercase();
    if q.is_empty() {
        app.usuarios = app.directory.records().to_vec();
    } else {
        app.usuarios = app
            .directory
            .records()
            .iter()
            .filter(|u| {
                u.nombre.to_lowercase().contains(&q)
                    || u.apellidos.to_lowercase().contains(&q)
                    || u.full_name().to_lowercase().contains(&q)
                    || u.id.to_string().to_lowercase().contains(&q)
            })
            .cloned()
            .collect();
    }
    app.selected_index = app.selected_index.min(app.usuarios.len().saturating_sub(1));
}
