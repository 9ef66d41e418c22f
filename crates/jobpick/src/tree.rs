//! The selection tree and its flag-propagation engine.
//!
//! The tree is an arena: nodes live in a `Vec`, identified by [`NodeId`],
//! with the parent stored as a plain id back-reference. Three tagged
//! variants ([`NodeKind`]) form a closed set — root, category, job — with
//! no rendering-toolkit inheritance anywhere.
//!
//! Child lists materialize on demand (first expansion, or result
//! collection). A lazily created child inherits its parent's current flag,
//! so propagation can stop descending at unmaterialized subtrees without
//! losing state: the flag it would have written is the flag the children
//! will be born with.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::job::{BuildError, Category, JobDescriptor, JobSource};

/// Index of a node in the tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Which variant a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Depth 0; children are the participating categories.
    Root,
    /// Depth 1; children are the category's member jobs.
    Category,
    /// Leaf; its key is a globally unique job id.
    Job,
}

#[derive(Debug)]
struct Node {
    /// Unique among siblings; globally unique for jobs.
    key: String,
    /// Display name (category name or job summary).
    label: String,
    kind: NodeKind,
    depth: usize,
    parent: Option<NodeId>,
    /// `None` until the child list is materialized.
    children: Option<Vec<NodeId>>,
    /// Inclusion state. Every node starts included.
    flag: bool,
    /// Presentation-only; never affects `flag`.
    expanded: bool,
}

const ROOT: NodeId = NodeId(0);

/// Hierarchy of categories and jobs with per-node inclusion flags.
///
/// Built fresh for each interactive session and dropped when the session
/// ends, together with its key-to-node index. Two sessions never share
/// state.
#[derive(Debug)]
pub struct SelectionTree {
    nodes: Vec<Node>,
    /// Materialized node registry: category/job key to arena id.
    index: HashMap<String, NodeId>,
    /// Flat job list the category nodes draw their children from.
    jobs: Vec<JobDescriptor>,
    /// Participating categories, pre-sorted by display name.
    categories: Vec<Category>,
}

impl SelectionTree {
    /// Build a tree from `source` with every flag set to included.
    ///
    /// Jobs are validated eagerly so a job referencing an unregistered
    /// category fails here rather than mid-session, but only the root and
    /// its category children are materialized; job rows appear when their
    /// category is first expanded or when the result is collected.
    pub fn build(source: &dyn JobSource) -> Result<Self, BuildError> {
        let mut categories = source.participating_categories();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        let mut jobs = Vec::new();
        for job_id in source.todo_list() {
            let job = source.job(&job_id).ok_or(BuildError::UnknownJob {
                job_id: job_id.clone(),
            })?;
            if !categories.iter().any(|c| c.id == job.category_id) {
                return Err(BuildError::UnknownCategory {
                    job_id: job.id,
                    category_id: job.category_id,
                });
            }
            jobs.push(job);
        }
        debug!(
            jobs = jobs.len(),
            categories = categories.len(),
            "selection tree built"
        );

        let root = Node {
            key: String::new(),
            label: "Categories".to_string(),
            kind: NodeKind::Root,
            depth: 0,
            parent: None,
            children: None,
            flag: true,
            expanded: true,
        };
        let mut tree = Self {
            nodes: vec![root],
            index: HashMap::new(),
            jobs,
            categories,
        };
        // The root starts expanded, so its category rows must exist.
        tree.resolve_children(ROOT);
        Ok(tree)
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn key(&self, id: NodeId) -> &str {
        &self.nodes[id.0].key
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].kind == NodeKind::Job
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.0].depth
    }

    pub fn flag(&self, id: NodeId) -> bool {
        self.nodes[id.0].flag
    }

    pub fn expanded(&self, id: NodeId) -> bool {
        self.nodes[id.0].expanded
    }

    /// Display label. `show_ids` swaps job summaries for raw job ids;
    /// categories and the root are unaffected.
    pub fn label(&self, id: NodeId, show_ids: bool) -> &str {
        let node = &self.nodes[id.0];
        if node.kind == NodeKind::Job && show_ids {
            &node.key
        } else {
            &node.label
        }
    }

    /// Look up a materialized node by its category or job key.
    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Materialized children, or an empty slice if the list has not been
    /// resolved yet.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.0].children.as_deref().unwrap_or(&[])
    }

    // ── Propagation engine ────────────────────────────────────────────

    /// Flip a node's flag and re-establish tree-wide consistency.
    ///
    /// Descendants are settled first, then ancestors; returns the new flag.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        let new_state = !self.nodes[id.0].flag;
        self.set_flag(id, new_state);
        new_state
    }

    /// Set a node's flag and propagate in both directions.
    pub fn set_flag(&mut self, id: NodeId, new_state: bool) {
        trace!(key = %self.nodes[id.0].key, new_state, "flag set");
        self.nodes[id.0].flag = new_state;
        self.propagate_descendants(id, new_state);
        self.propagate_ancestors(id, new_state);
    }

    /// Force every materialized descendant to `new_state`.
    ///
    /// Descent stops at unmaterialized child lists; those children inherit
    /// the parent's flag when they are resolved, so no state is lost.
    fn propagate_descendants(&mut self, id: NodeId, new_state: bool) {
        let Some(children) = self.nodes[id.0].children.clone() else {
            return;
        };
        for child in children {
            self.nodes[child.0].flag = new_state;
            self.propagate_descendants(child, new_state);
        }
    }

    /// Walk ancestors one level at a time.
    ///
    /// Including a node includes every ancestor unconditionally. Excluding
    /// one stops at the first ancestor that still has another included
    /// child. An ancestor of a materialized node always has a resolved
    /// child list, so the sibling check never misses anyone.
    fn propagate_ancestors(&mut self, id: NodeId, new_state: bool) {
        let mut parent = self.nodes[id.0].parent;
        while let Some(p) = parent {
            if !new_state {
                let any_included = self
                    .children(p)
                    .iter()
                    .any(|&child| self.nodes[child.0].flag);
                if any_included {
                    break;
                }
            }
            self.nodes[p.0].flag = new_state;
            parent = self.nodes[p.0].parent;
        }
    }

    // ── Expansion ─────────────────────────────────────────────────────

    /// Flip a branch node's expanded state, materializing its children on
    /// first expansion. No-op on leaves; never touches flags.
    pub fn toggle_expanded(&mut self, id: NodeId) {
        if self.is_leaf(id) {
            return;
        }
        self.nodes[id.0].expanded = !self.nodes[id.0].expanded;
        if self.nodes[id.0].expanded {
            self.resolve_children(id);
        }
    }

    /// Nodes currently on screen: depth-first over expanded branches.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let mut rows = Vec::new();
        self.push_visible(ROOT, &mut rows);
        rows
    }

    fn push_visible(&self, id: NodeId, rows: &mut Vec<NodeId>) {
        rows.push(id);
        if self.nodes[id.0].expanded {
            for &child in self.children(id) {
                self.push_visible(child, rows);
            }
        }
    }

    // ── Result collection ─────────────────────────────────────────────

    /// Ids of every included job, whether or not its category was ever
    /// expanded on screen.
    ///
    /// Materializes the whole tree first: the result is seeded from
    /// logical flags, not from what happened to be rendered.
    pub fn selected_jobs(&mut self) -> BTreeSet<String> {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            for child in self.resolve_children(id) {
                if !self.is_leaf(child) {
                    stack.push(child);
                }
            }
        }
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Job && n.flag)
            .map(|n| n.key.clone())
            .collect()
    }

    // ── Materialization ───────────────────────────────────────────────

    /// Resolve a node's child list, creating the child nodes on first call.
    ///
    /// Root children are the participating categories in display-name
    /// order; category children are member jobs in id order. New children
    /// inherit the parent's current flag.
    fn resolve_children(&mut self, id: NodeId) -> Vec<NodeId> {
        if let Some(children) = &self.nodes[id.0].children {
            return children.clone();
        }

        let entries: Vec<(String, String)> = match self.nodes[id.0].kind {
            NodeKind::Root => self
                .categories
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            NodeKind::Category => {
                let mut members: Vec<(String, String)> = self
                    .jobs
                    .iter()
                    .filter(|j| j.category_id == self.nodes[id.0].key)
                    .map(|j| (j.id.clone(), j.name.clone()))
                    .collect();
                members.sort_by(|a, b| a.0.cmp(&b.0));
                members
            }
            NodeKind::Job => return Vec::new(),
        };

        let child_kind = match self.nodes[id.0].kind {
            NodeKind::Root => NodeKind::Category,
            _ => NodeKind::Job,
        };
        let depth = self.nodes[id.0].depth + 1;
        let flag = self.nodes[id.0].flag;
        let mut ids = Vec::with_capacity(entries.len());
        for (key, label) in entries {
            let child = NodeId(self.nodes.len());
            self.nodes.push(Node {
                key: key.clone(),
                label,
                kind: child_kind,
                depth,
                parent: Some(id),
                // Leaves are born fully resolved.
                children: match child_kind {
                    NodeKind::Job => Some(Vec::new()),
                    _ => None,
                },
                flag,
                expanded: false,
            });
            self.index.insert(key, child);
            ids.push(child);
        }
        self.nodes[id.0].children = Some(ids.clone());
        ids
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
