use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::resource::{Resource, ResourceKind};

/// One statically declared resource, addressable by id from an indirect
/// related-resource reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(flatten)]
    pub resource: Resource,
}

/// The static resource catalog supplied by the configuration collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResourceCatalog {
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

impl ResourceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, id: impl Into<String>, resource: Resource) {
        self.entries.push(CatalogEntry {
            id: id.into(),
            resource,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves an indirect reference. An unknown id yields `None` (the
    /// caller escalates); several non-equal definitions for one id are never
    /// silently picked from.
    pub fn lookup(&self, id: &str, kind: ResourceKind) -> Result<Option<&Resource>> {
        let matches: Vec<&Resource> = self
            .entries
            .iter()
            .filter(|entry| entry.id == id && entry.resource.kind == kind)
            .map(|entry| &entry.resource)
            .collect();

        match matches.as_slice() {
            [] => {
                debug!(id, %kind, "no catalog entry for reference");
                Ok(None)
            }
            [first, rest @ ..] => {
                if rest.iter().all(|&candidate| first.same_identity(candidate)) {
                    Ok(Some(*first))
                } else {
                    Err(CoreError::AmbiguousResource {
                        id: id.to_string(),
                        kind,
                        count: matches.len(),
                    })
                }
            }
        }
    }

    pub fn all(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.entries
            .iter()
            .filter(move |entry| entry.resource.kind == kind)
            .map(|entry| &entry.resource)
    }

    /// The sole declared resource of `kind`, when exactly one exists.
    pub fn single(&self, kind: ResourceKind) -> Option<&Resource> {
        let mut matching = self.all(kind);
        let first = matching.next()?;
        match matching.next() {
            None => Some(first),
            Some(_) => None,
        }
    }
}
