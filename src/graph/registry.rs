//! External vertex id → internal handle mapping.

use hashbrown::HashMap;

use crate::model::{Vertex, VertexHandle};
use crate::{Error, Result};

/// Lazily assigns a [`VertexHandle`] to every external node id.
///
/// Handles are dense and issued in order of first appearance, so two builds
/// over the same rows hand out identical handles. One registry belongs to one
/// build; there is no shared registry.
#[derive(Debug, Clone, Default)]
pub struct VertexRegistry {
    by_id: HashMap<i64, VertexHandle>,
    /// handle index → external id
    ids: Vec<i64>,
}

impl VertexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `id`, creating it on first reference.
    pub fn resolve(&mut self, id: i64) -> Result<VertexHandle> {
        if let Some(&handle) = self.by_id.get(&id) {
            return Ok(handle);
        }

        let raw = u32::try_from(self.ids.len())
            .map_err(|_| Error::CapacityExceeded("vertices"))?;
        let handle = VertexHandle(raw);
        self.by_id.insert(id, handle);
        self.ids.push(id);
        Ok(handle)
    }

    /// Handle for `id` if it has been seen.
    pub fn get(&self, id: i64) -> Option<VertexHandle> {
        self.by_id.get(&id).copied()
    }

    /// External id behind `handle`.
    pub fn id_of(&self, handle: VertexHandle) -> Option<i64> {
        self.ids.get(handle.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All registered vertices in creation order.
    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, &id)| Vertex::new(VertexHandle(i as u32), id))
    }
}
