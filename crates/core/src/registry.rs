use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::{Resource, ResourceId, ResourceKind};

/// Deduplicating store of resolved resources. The registry owns every
/// registered resource; measured values hold `ResourceId` handles into it.
/// Registration is the only mutation and is idempotent under semantically
/// equal resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of an already-registered resource with the same
    /// semantic identity, or registers `resource` and returns its new
    /// handle. Invalid resources are rejected before anything is committed.
    pub fn lookup_or_register(&mut self, resource: Resource) -> Result<ResourceId> {
        if !resource.is_valid() {
            return Err(CoreError::InvalidResource);
        }

        if let Some(index) = self
            .resources
            .iter()
            .position(|existing| existing.same_identity(&resource))
        {
            debug!(kind = %resource.kind, name = resource.display_name(), "resource already registered");
            return Ok(ResourceId(index));
        }

        debug!(kind = %resource.kind, name = resource.display_name(), "registering resource");
        self.resources.push(resource);
        Ok(ResourceId(self.resources.len() - 1))
    }

    pub fn get(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn get_mut(&mut self, id: ResourceId) -> &mut Resource {
        &mut self.resources[id.0]
    }

    /// All registered resources of `kind`, in registration order.
    pub fn all(&self, kind: ResourceKind) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .filter(move |(_, resource)| resource.kind == kind)
            .map(|(index, resource)| (ResourceId(index), resource))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
