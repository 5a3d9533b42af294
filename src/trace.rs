//! Records labeled parser activity so a partial [`ParseTree`] can be rebuilt.
//!
//! Nodes live in an arena and link to their parent, their previous sibling and
//! their latest child. Abandoned alternatives are dropped by rewinding a
//! parent's `latest_child`, never by deleting nodes.

use crate::parse_tree::ParseTree;

pub(crate) type NodeId = usize;

#[derive(Debug)]
struct TraceNode {
    name: String,
    begin: usize,
    end: usize,
    value: Option<String>,
    parent: Option<NodeId>,
    previous: Option<NodeId>,
    latest_child: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct Trace {
    nodes: Vec<TraceNode>,
    current: NodeId,
    root_name: String,
}

impl Trace {
    pub(crate) fn new(root_name: &str, index: usize) -> Self {
        let mut trace = Trace {
            nodes: Vec::new(),
            current: 0,
            root_name: root_name.to_string(),
        };
        trace.current = trace.add(root_name.to_string(), index, None, None);
        trace
    }

    fn add(
        &mut self,
        name: String,
        begin: usize,
        parent: Option<NodeId>,
        previous: Option<NodeId>,
    ) -> NodeId {
        self.nodes.push(TraceNode {
            name,
            begin,
            end: begin,
            value: None,
            parent,
            previous,
            latest_child: None,
        });
        self.nodes.len() - 1
    }

    /// Opens a child of the current node and makes it current
    pub(crate) fn push(&mut self, name: &str, index: usize) {
        let parent = self.current;
        let previous = self.nodes[parent].latest_child;
        let child = self.add(name.to_string(), index, Some(parent), previous);
        self.nodes[parent].latest_child = Some(child);
        self.current = child;
    }

    /// Closes the current node at `index` and returns to its parent
    pub(crate) fn pop(&mut self, index: usize) {
        let node = &mut self.nodes[self.current];
        node.end = index.max(node.begin);
        if let Some(parent) = node.parent {
            self.current = parent;
        }
    }

    pub(crate) fn current(&self) -> NodeId {
        self.current
    }

    pub(crate) fn set_current_value(&mut self, value: String) {
        self.nodes[self.current].value = Some(value);
    }

    pub(crate) fn latest_child(&self) -> Option<NodeId> {
        self.nodes[self.current].latest_child
    }

    pub(crate) fn set_latest_child(&mut self, child: Option<NodeId>) {
        debug_assert!(child.is_none_or(|c| self.nodes[c].parent == Some(self.current)));
        self.nodes[self.current].latest_child = child;
    }

    /// Starts a detached root, used when parsing moves to the token level
    pub(crate) fn start_fresh(&mut self, index: usize) {
        let name = self.root_name.clone();
        self.current = self.add(name, index, None, None);
    }

    /// Drops `node` from its parent's children and returns the parent.
    /// A root is returned unchanged.
    pub(crate) fn orphanize(&mut self, node: NodeId) -> NodeId {
        match self.nodes[node].parent {
            Some(parent) => {
                self.nodes[parent].latest_child = self.nodes[node].previous;
                parent
            }
            None => node,
        }
    }

    /// Makes `node` the latest child along its whole ancestry, closes every
    /// node on the way at `index`, and returns the root.
    pub(crate) fn freeze(&mut self, node: NodeId, index: usize) -> NodeId {
        let mut node = node;
        self.close(node, index);
        while let Some(parent) = self.nodes[node].parent {
            self.nodes[parent].latest_child = Some(node);
            node = parent;
            self.close(node, index);
        }
        node
    }

    fn close(&mut self, node: NodeId, index: usize) {
        let node = &mut self.nodes[node];
        node.end = index.max(node.begin);
    }

    pub(crate) fn to_parse_tree(&self, node: NodeId) -> ParseTree {
        let mut children = Vec::new();
        let mut child = self.nodes[node].latest_child;
        while let Some(id) = child {
            children.push(self.to_parse_tree(id));
            child = self.nodes[id].previous;
        }
        children.reverse();
        let n = &self.nodes[node];
        ParseTree {
            name: n.name.clone(),
            begin: n.begin,
            end: n.end,
            value: n.value.clone(),
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_builds_children_in_order() {
        let mut trace = Trace::new("root", 0);
        trace.push("a", 0);
        trace.set_current_value("1".to_string());
        trace.pop(1);
        trace.push("b", 1);
        trace.pop(2);
        let root = trace.freeze(trace.current(), 2);
        let tree = trace.to_parse_tree(root);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].name, "a");
        assert_eq!(tree.children[0].value.as_deref(), Some("1"));
        assert_eq!(tree.children[1].begin, 1);
        assert_eq!(tree.end, 2);
    }

    #[test]
    fn test_rewinding_latest_child_drops_abandoned_branch() {
        let mut trace = Trace::new("root", 0);
        let saved = trace.latest_child();
        trace.push("abandoned", 0);
        trace.pop(3);
        trace.set_latest_child(saved);
        trace.push("kept", 0);
        trace.pop(1);
        let root = trace.freeze(trace.current(), 1);
        let tree = trace.to_parse_tree(root);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "kept");
    }

    #[test]
    fn test_orphanize_then_freeze() {
        let mut trace = Trace::new("root", 0);
        trace.push("outer", 0);
        trace.push("inner", 1);
        let failed = trace.current();
        let parent = trace.orphanize(failed);
        let root = trace.freeze(parent, 4);
        let tree = trace.to_parse_tree(root);
        let outer = tree.child("outer").unwrap();
        assert!(outer.children.is_empty());
        assert_eq!(outer.end, 4);
        assert_eq!(outer.value, None);
    }
}
