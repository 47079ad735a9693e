//! Index-addressed node storage shared by the three containers.
//!
//! Every container owns exactly one [`Arena`]. Links between nodes (tree
//! children and parents, chain successors, skip-list `right`/`bottom`) are
//! [`NodeId`]s into that arena, so they never own anything and dropping the
//! arena releases the whole graph iteratively. Nothing is ever removed, which
//! keeps ids stable for the lifetime of the container.
//!
//! Copying an arena slot-for-slot keeps every id valid in the copy, so a
//! cloned container reproduces the exact shape of its source.

use std::ops::{Index, IndexMut};

use super::SetError;

/// Handle to a node stored in an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Growable slab of nodes addressed by [`NodeId`].
pub struct Arena<N> {
    nodes: Vec<N>,
    /// Node count past which `try_reserve` fails, for exercising the
    /// allocation-failure paths.
    #[cfg(test)]
    reserve_limit: Option<usize>,
}

impl<N> Arena<N> {
    pub const fn new() -> Self {
        Self::from_nodes(Vec::new())
    }

    const fn from_nodes(nodes: Vec<N>) -> Self {
        Self {
            nodes,
            #[cfg(test)]
            reserve_limit: None,
        }
    }

    /// Number of nodes ever allocated.
    #[inline]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Makes room for `additional` more nodes without aborting on failure.
    ///
    /// After a successful call the next `additional` calls to [`Arena::alloc`]
    /// cannot fail.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), SetError> {
        #[cfg(test)]
        if self
            .reserve_limit
            .is_some_and(|limit| self.nodes.len().saturating_add(additional) > limit)
        {
            return Err(exhausted());
        }
        self.nodes.try_reserve(additional)?;
        Ok(())
    }

    /// Stores `node` and returns its id.
    pub fn alloc(&mut self, node: N) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Iterates over every node id in allocation order.
    #[cfg_attr(not(feature = "hash"), allow(dead_code))]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<N> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Makes every later `try_reserve` that would grow the arena past `limit`
    /// nodes fail. `None` lifts the limit.
    #[cfg(test)]
    pub const fn limit_reservations(&mut self, limit: Option<usize>) {
        self.reserve_limit = limit;
    }
}

#[cfg(test)]
fn exhausted() -> SetError {
    match Vec::<u8>::new().try_reserve(usize::MAX) {
        Err(error) => SetError::Allocation(error),
        Ok(()) => unreachable!("reserving usize::MAX bytes cannot succeed"),
    }
}

impl<N: Clone> Arena<N> {
    /// Deep-copies the arena, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, SetError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(self.nodes.len())?;
        nodes.extend(self.nodes.iter().cloned());
        Ok(Self::from_nodes(nodes))
    }
}

impl<N: Clone> Clone for Arena<N> {
    fn clone(&self) -> Self {
        Self::from_nodes(self.nodes.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.0]
    }
}
