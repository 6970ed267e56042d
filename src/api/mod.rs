//! Wire model and adapter seam for the usuario collection endpoint.
//!
//! `UsuarioApi` is the only way the application talks to the server; the
//! reqwest implementation lives in [`http`].
pub mod http;

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use http::HttpUsuarioApi;

/// Server-assigned identifier. Opaque to the client: it is only compared and
/// echoed back in item URLs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UsuarioId {
    Number(i64),
    Text(String),
}

impl Display for UsuarioId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UsuarioId::Number(n) => write!(f, "{n}"),
            UsuarioId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for UsuarioId {
    fn from(n: i64) -> Self {
        UsuarioId::Number(n)
    }
}

impl From<i32> for UsuarioId {
    fn from(n: i32) -> Self {
        UsuarioId::Number(n.into())
    }
}

impl From<&str> for UsuarioId {
    fn from(s: &str) -> Self {
        UsuarioId::Text(s.to_string())
    }
}

/// A record of the remote collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: UsuarioId,
    pub nombre: String,
    pub apellidos: String,
}

impl Usuario {
    pub fn new(id: impl Into<UsuarioId>, nombre: impl Into<String>, apellidos: impl Into<String>) -> Self {
        Self { id: id.into(), nombre: nombre.into(), apellidos: apellidos.into() }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellidos).trim().to_string()
    }
}

/// Request body for create and update; never carries an id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsuarioDraft {
    pub nombre: String,
    pub apellidos: String,
}

impl UsuarioDraft {
    pub fn new(nombre: impl Into<String>, apellidos: impl Into<String>) -> Self {
        Self { nombre: nombre.into(), apellidos: apellidos.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.nombre.trim().is_empty() && self.apellidos.trim().is_empty()
    }
}

/// CRUD operations against the collection endpoint.
#[async_trait]
pub trait UsuarioApi: Send + Sync {
    /// Human readable location of the collection, shown in the header.
    fn endpoint(&self) -> String;

    async fn list(&self) -> Result<Vec<Usuario>, ApiError>;

    async fn create(&self, draft: &UsuarioDraft) -> Result<Usuario, ApiError>;

    async fn update(&self, id: &UsuarioId, draft: &UsuarioDraft) -> Result<Usuario, ApiError>;

    async fn delete(&self, id: &UsuarioId) -> Result<(), ApiError>;
}
