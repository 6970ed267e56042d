//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state. The CRUD
//! operations on that state live in `actions`, the request worker in
//! `worker`, and the terminal loop in `update` (re-exported as `run`).
//!
pub mod actions;
pub mod keymap;
pub mod update;
pub mod worker;

use ratatui::style::Color;

use crate::api::{Usuario, UsuarioDraft, UsuarioId};
use crate::directory::Directory;
use keymap::Keymap;

pub use worker::{Completion, Dispatcher, Request};

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Dialog,
}

/// The three dialogs, without their target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Insert,
    Edit,
    Delete,
}

/// Which dialog is open. Only one can be open at a time; edit and delete
/// remember the id they were opened for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Insert,
    Edit(UsuarioId),
    Delete(UsuarioId),
}

impl Dialog {
    pub fn kind(&self) -> Option<DialogKind> {
        match self {
            Dialog::Closed => None,
            Dialog::Insert => Some(DialogKind::Insert),
            Dialog::Edit(_) => Some(DialogKind::Edit),
            Dialog::Delete(_) => Some(DialogKind::Delete),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }
}

/// Editable fields of the create/edit forms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DraftField {
    Nombre,
    Apellidos,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Nombre => DraftField::Apellidos,
            DraftField::Apellidos => DraftField::Nombre,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Nombre => "Nombre",
            DraftField::Apellidos => "Apellidos",
        }
    }
}

/// Working copy behind the create/edit/delete dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub id: Option<UsuarioId>,
    pub nombre: String,
    pub apellidos: String,
    pub focus: DraftField,
}

impl Default for Selection {
    fn default() -> Self {
        Self { id: None, nombre: String::new(), apellidos: String::new(), focus: DraftField::Nombre }
    }
}

impl Selection {
    pub fn from_record(u: &Usuario) -> Self {
        Self { id: Some(u.id.clone()), nombre: u.nombre.clone(), apellidos: u.apellidos.clone(), focus: DraftField::Nombre }
    }

    pub fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Nombre => &self.nombre,
            DraftField::Apellidos => &self.apellidos,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Nombre => self.nombre = value,
            DraftField::Apellidos => self.apellidos = value,
        }
    }

    pub fn draft(&self) -> UsuarioDraft {
        UsuarioDraft::new(self.nombre.clone(), self.apellidos.clone())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Message shown in the status bar until the next one replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// Catppuccin Mocha palette.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
        }
    }
}

pub struct AppState {
    /// Local mirror of the collection.
    pub directory: Directory,
    /// Rows currently shown in the grid (mirror filtered by `search_query`).
    pub usuarios: Vec<Usuario>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub dialog: Dialog,
    /// Bumped on every open or close, so a late answer can tell whether the
    /// dialog that sent it is still the one showing.
    pub dialog_generation: u64,
    pub selection: Selection,
    /// The one request allowed to be outstanding.
    pub in_flight: Option<Request>,
    /// `dialog_generation` at the time the in-flight request was submitted.
    pub issued_by: Option<u64>,
    pub notice: Option<Notice>,
    pub endpoint: String,
}

impl AppState {
    /// Empty state for the collection at `endpoint`; call
    /// [`AppState::request_list`] to populate it.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            directory: Directory::new(),
            usuarios: Vec::new(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme: Theme::mocha(),
            keymap: Keymap::default(),
            dialog: Dialog::Closed,
            dialog_generation: 0,
            selection: Selection::default(),
            in_flight: None,
            issued_by: None,
            notice: None,
            endpoint: endpoint.into(),
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
