//! Local mirror of the remote collection.
//!
//! Every change produces a new `Directory`; the previous value is never
//! mutated in place. At most one record per id is held.
use std::collections::HashSet;

use tracing::warn;

use crate::api::{Usuario, UsuarioId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    records: Vec<Usuario>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a full listing. Duplicate ids keep their first occurrence.
    pub fn from_listing(listing: Vec<Usuario>) -> Self {
        let mut seen = HashSet::with_capacity(listing.len());
        let mut records = Vec::with_capacity(listing.len());
        for u in listing {
            if seen.insert(u.id.clone()) {
                records.push(u);
            } else {
                warn!(id = %u.id, "listing contains a duplicate id; keeping the first record");
            }
        }
        Self { records }
    }

    pub fn records(&self) -> &[Usuario] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &UsuarioId) -> Option<&Usuario> {
        self.records.iter().find(|u| &u.id == id)
    }

    pub fn contains(&self, id: &UsuarioId) -> bool {
        self.get(id).is_some()
    }

    /// Append a created record. An id that is already mirrored is replaced
    /// where it stands instead of being duplicated.
    pub fn with_appended(&self, record: Usuario) -> Self {
        if self.contains(&record.id) {
            return self.with_replaced(record);
        }
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Swap in the server's version of a record, keeping its position.
    /// Unknown ids leave the mirror as it was.
    pub fn with_replaced(&self, record: Usuario) -> Self {
        let records = self
            .records
            .iter()
            .map(|u| if u.id == record.id { record.clone() } else { u.clone() })
            .collect();
        Self { records }
    }

    pub fn without(&self, id: &UsuarioId) -> Self {
        let records = self.records.iter().filter(|u| &u.id != id).cloned().collect();
        Self { records }
    }
}
