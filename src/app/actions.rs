//! CRUD operations on [`AppState`].
//!
//! Operations that talk to the server return the [`Request`] to dispatch and
//! mark it in flight; [`AppState::apply_completion`] reconciles the mirror
//! when the answer arrives. Only one request may be in flight at a time.
use tracing::{debug, error, info, warn};

use super::{AppState, Completion, Dialog, DialogKind, DraftField, InputMode, Notice, Request, Selection};
use crate::api::{Usuario, UsuarioId};
use crate::directory::Directory;
use crate::error::ApiError;

impl AppState {
    /// Record under the grid cursor.
    pub fn selected(&self) -> Option<&Usuario> {
        self.usuarios.get(self.selected_index)
    }

    /// Fetch the whole collection.
    pub fn request_list(&mut self) -> Option<Request> {
        self.begin(Request::List)
    }

    pub fn select_for_edit(&mut self, record: &Usuario) {
        self.selection = Selection::from_record(record);
        self.set_dialog(Dialog::Edit(record.id.clone()));
    }

    pub fn select_for_delete(&mut self, record: &Usuario) {
        self.selection = Selection::from_record(record);
        self.set_dialog(Dialog::Delete(record.id.clone()));
    }

    /// Set one field of the working copy; the other field is left alone.
    pub fn edit_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.selection.set(field, value.into());
    }

    /// Open `kind`, or close it if it is the dialog already showing. Opening
    /// a dialog replaces whichever other one was open. Edit and delete target
    /// the record under the cursor and do nothing on an empty grid.
    pub fn toggle_dialog(&mut self, kind: DialogKind) {
        if self.dialog.kind() == Some(kind) {
            self.close_dialog();
            return;
        }
        match kind {
            DialogKind::Insert => {
                self.selection = Selection::default();
                self.set_dialog(Dialog::Insert);
            }
            DialogKind::Edit => {
                if let Some(u) = self.selected().cloned() {
                    self.select_for_edit(&u);
                }
            }
            DialogKind::Delete => {
                if let Some(u) = self.selected().cloned() {
                    self.select_for_delete(&u);
                }
            }
        }
    }

    pub fn close_dialog(&mut self) {
        self.set_dialog(Dialog::Closed);
    }

    /// Build the request for the open dialog. Refused while another request
    /// is in flight or when the form is empty.
    pub fn submit(&mut self) -> Option<Request> {
        let request = match &self.dialog {
            Dialog::Closed => return None,
            Dialog::Insert | Dialog::Edit(_) if self.selection.draft().is_blank() => {
                self.notice = Some(Notice::error("nombre and apellidos are both empty"));
                return None;
            }
            Dialog::Insert => Request::Create(self.selection.draft()),
            Dialog::Edit(id) => Request::Update { id: id.clone(), draft: self.selection.draft() },
            Dialog::Delete(id) => Request::Delete { id: id.clone() },
        };
        let request = self.begin(request)?;
        self.issued_by = Some(self.dialog_generation);
        Some(request)
    }

    /// Reconcile the mirror with the outcome of the in-flight request.
    pub fn apply_completion(&mut self, completion: Completion) {
        self.in_flight = None;
        let issued_by = self.issued_by.take();
        let mut focus: Option<UsuarioId> = None;
        match completion {
            Completion::Listed(Ok(rows)) => {
                self.directory = Directory::from_listing(rows);
                info!(count = self.directory.len(), "collection loaded");
                self.notice = Some(Notice::info(format!("loaded {} usuarios", self.directory.len())));
            }
            Completion::Created(Ok(u)) => {
                info!(id = %u.id, "usuario created");
                self.notice = Some(Notice::info(format!("created {}", u.full_name())));
                focus = Some(u.id.clone());
                self.directory = self.directory.with_appended(u);
                self.close_if_issued_by(issued_by);
            }
            Completion::Updated { id, result: Ok(u) } => {
                if u.id != id {
                    warn!(requested = %id, returned = %u.id, "server answered update with a different id");
                }
                // the row stays keyed by the id that was edited
                let u = Usuario { id: id.clone(), ..u };
                if !self.directory.contains(&id) {
                    warn!(%id, "updated usuario is not in the local mirror");
                }
                info!(%id, "usuario updated");
                self.notice = Some(Notice::info(format!("saved {}", u.full_name())));
                focus = Some(id);
                self.directory = self.directory.with_replaced(u);
                self.close_if_issued_by(issued_by);
            }
            Completion::Deleted { id, result: Ok(()) } => {
                info!(%id, "usuario deleted");
                self.notice = Some(Notice::info(format!("deleted usuario {id}")));
                self.directory = self.directory.without(&id);
                let targets_gone = matches!(&self.dialog, Dialog::Edit(t) | Dialog::Delete(t) if *t == id);
                if targets_gone {
                    self.close_dialog();
                } else {
                    self.close_if_issued_by(issued_by);
                }
            }
            Completion::Listed(Err(e)) => self.report_failure("list", &e),
            Completion::Created(Err(e)) => self.report_failure("create", &e),
            Completion::Updated { result: Err(e), .. } => self.report_failure("update", &e),
            Completion::Deleted { result: Err(e), .. } => self.report_failure("delete", &e),
        }
        self.refresh_view();
        if let Some(id) = focus {
            self.focus_on(&id);
        }
    }

    /// Recompute the visible rows from the mirror and the search query.
    pub fn refresh_view(&mut self) {
        crate::search::apply_search(self);
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.usuarios.is_empty() {
            self.selected_index = 0;
            return;
        }
        let last = self.usuarios.len() - 1;
        self.selected_index = self.selected_index.saturating_add_signed(delta).min(last);
    }

    fn focus_on(&mut self, id: &UsuarioId) {
        if let Some(idx) = self.usuarios.iter().position(|u| &u.id == id) {
            self.selected_index = idx;
        }
    }

    fn begin(&mut self, request: Request) -> Option<Request> {
        if let Some(current) = &self.in_flight {
            debug!(?request, "refused: another request is in flight");
            self.notice = Some(Notice::info(format!("still {}, try again in a moment", current.label())));
            return None;
        }
        self.in_flight = Some(request.clone());
        Some(request)
    }

    /// Close the dialog only if it is the same opening that sent the request.
    fn close_if_issued_by(&mut self, issued_by: Option<u64>) {
        if issued_by == Some(self.dialog_generation) && self.dialog.is_open() {
            self.close_dialog();
        }
    }

    fn set_dialog(&mut self, dialog: Dialog) {
        self.dialog_generation = self.dialog_generation.wrapping_add(1);
        self.input_mode = if dialog.is_open() { InputMode::Dialog } else { InputMode::Normal };
        self.dialog = dialog;
    }

    fn report_failure(&mut self, op: &str, e: &ApiError) {
        match e.status() {
            Some(status) => warn!(op, status, error = %e, "request rejected"),
            None => error!(op, error = %e, "request failed"),
        }
        self.notice = Some(Notice::error(e.short_message()));
    }
}
