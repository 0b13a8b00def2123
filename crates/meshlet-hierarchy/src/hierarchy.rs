//! The meshlet LOD hierarchy arena.

// Arena indices fit in u32 for any realistic mesh
#![allow(clippy::cast_possible_truncation)]

use std::fmt::Write as _;
use std::ops::Range;

use meshlet_types::Meshlet;

/// A bottom-up DAG of meshlets stored as a flat arena.
///
/// Level 0 holds the full-detail clusters; each higher level covers the same
/// surface with roughly half the triangles. Links are index-based: every
/// meshlet has at most one parent (in-degree 1 upward) while a parent lists
/// all the children it was coarsened from. Invariants maintained by the
/// builder:
///
/// - `cluster_error` never decreases from child to parent, and a child's
///   `parent_error` equals its parent's `cluster_error`
/// - a parent's bounding sphere encloses each child's bounding sphere
#[derive(Debug, Clone, Default)]
pub struct MeshletHierarchy {
    meshlets: Vec<Meshlet>,
    parents: Vec<Option<u32>>,
    children: Vec<Vec<u32>>,
    levels: Vec<Range<usize>>,
}

impl MeshletHierarchy {
    pub(crate) fn push_level(&mut self, meshlets: Vec<Meshlet>) -> Range<usize> {
        let start = self.meshlets.len();
        self.parents.resize(start + meshlets.len(), None);
        self.children.resize(start + meshlets.len(), Vec::new());
        self.meshlets.extend(meshlets);
        let range = start..self.meshlets.len();
        self.levels.push(range.clone());
        range
    }

    pub(crate) fn link(&mut self, child: u32, parent: u32) {
        self.parents[child as usize] = Some(parent);
        self.children[parent as usize].push(child);
    }

    pub(crate) fn meshlet_mut(&mut self, id: u32) -> &mut Meshlet {
        &mut self.meshlets[id as usize]
    }

    /// Total number of meshlets across all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshlets.len()
    }

    /// Whether the hierarchy holds no meshlets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshlets.is_empty()
    }

    /// Number of LOD levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// All meshlets, level by level.
    #[must_use]
    pub fn meshlets(&self) -> &[Meshlet] {
        &self.meshlets
    }

    /// The meshlet with arena index `id`.
    #[must_use]
    pub fn meshlet(&self, id: u32) -> &Meshlet {
        &self.meshlets[id as usize]
    }

    /// The parent of `id`, if it has one.
    #[must_use]
    pub fn parent(&self, id: u32) -> Option<u32> {
        self.parents[id as usize]
    }

    /// The children `id` was coarsened from; empty at level 0.
    #[must_use]
    pub fn children(&self, id: u32) -> &[u32] {
        &self.children[id as usize]
    }

    /// Arena indices of the meshlets with no parent.
    pub fn roots(&self) -> impl Iterator<Item = u32> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_none())
            .map(|(i, _)| i as u32)
    }

    /// The arena index range of LOD `level`.
    #[must_use]
    pub fn level(&self, level: usize) -> Range<usize> {
        self.levels[level].clone()
    }

    /// The meshlets of LOD `level`.
    #[must_use]
    pub fn level_meshlets(&self, level: usize) -> &[Meshlet] {
        &self.meshlets[self.levels[level].clone()]
    }

    /// Render the DAG in Graphviz dot format, for debugging.
    ///
    /// Nodes are labeled `id@lod (triangles, error)`; edges point from
    /// parent to child.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph meshlets {\n  rankdir=BT;\n");
        for (i, m) in self.meshlets.iter().enumerate() {
            let _ = writeln!(
                out,
                "  n{i} [label=\"{:08x}@{} ({}t, e={:.3e})\"];",
                m.id,
                m.lod,
                m.triangle_count(),
                m.cluster_error
            );
        }
        for (child, parent) in self.parents.iter().enumerate() {
            if let Some(parent) = parent {
                let _ = writeln!(out, "  n{child} -> n{parent};");
            }
        }
        out.push_str("}\n");
        out
    }
}
