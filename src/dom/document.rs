use crate::dom::node::{FieldRole, Node, NodeId};
use crate::dom::selector::Selector;
use crate::error::GarlicError;

/// Arena-backed document tree with the traversal primitives the
/// persistence layer consumes.
#[derive(Debug, Clone)]
pub struct Document {
    origin: String,
    route: String,
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn new(origin: &str, route: &str, root_tag: &str) -> Self {
        Document {
            origin: origin.to_string(),
            route: route.to_string(),
            nodes: vec![Node::new(root_tag)],
            root: NodeId(0),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GarlicError> {
        self.nodes.get_mut(id.0).ok_or(GarlicError::UnknownNode(id.0))
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Append a new element under `parent` and return its id.
    pub fn append(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, GarlicError> {
        let mut node = Node::new(tag);
        for (name, value) in attrs {
            node.attrs.insert(name.to_lowercase(), value.to_string());
        }
        node.checked = node.attrs.contains_key("checked");
        self.append_node(parent, node)
    }

    pub(crate) fn append_node(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, GarlicError> {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Remove `id` (and its subtree) from the tree. The arena slot stays
    /// allocated so outstanding ids remain valid but detached.
    pub fn detach(&mut self, id: NodeId) -> Result<(), GarlicError> {
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        Ok(())
    }

    /// True when `id` is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.parent(node_id);
        }
        false
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    pub fn tag(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.tag.as_str()).unwrap_or("")
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn children_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.tag(*c) == tag)
            .collect()
    }

    /// Children of `id`'s parent sharing its tag, `id` included.
    /// Empty for the root or a detached node.
    pub fn same_tag_siblings(&self, id: NodeId) -> Vec<NodeId> {
        match self.parent(id) {
            Some(parent) => self.children_by_tag(parent, self.tag(id)),
            None => Vec::new(),
        }
    }

    /// Position of `id` among its same-tag siblings.
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        self.same_tag_siblings(id).iter().position(|s| *s == id)
    }

    /// Nearest ancestor-or-self with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if self.tag(node_id) == tag {
                return Some(node_id);
            }
            current = self.parent(node_id);
        }
        None
    }

    pub fn closest_form(&self, id: NodeId) -> Option<NodeId> {
        self.closest(id, "form")
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(node_id) = current {
            out.push(node_id);
            current = self.parent(node_id);
        }
        out
    }

    /// Descendants of `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node_id) = stack.pop() {
            out.push(node_id);
            stack.extend(self.children(node_id).iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// Attached nodes in document order matching `selector`, root included.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, GarlicError> {
        let root = self.root;
        let parsed = Selector::parse(selector)?;
        let mut out = Vec::new();
        if parsed.matches(self, root) {
            out.push(root);
        }
        out.extend(self.select_within(root, &parsed));
        Ok(out)
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn select_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|d| selector.matches(self, *d))
            .collect()
    }

    // =========================================================================
    // Attributes & field state
    // =========================================================================

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), GarlicError> {
        self.node_mut(id)?
            .attrs
            .insert(name.to_lowercase(), value.to_string());
        Ok(())
    }

    pub fn role(&self, id: NodeId) -> FieldRole {
        self.node(id).map(Node::role).unwrap_or(FieldRole::Other)
    }

    /// Current value of a field: the live value, else the `value`
    /// attribute, else `"on"` for checkable inputs, else empty.
    pub fn value(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };
        if let Some(v) = &node.value {
            return v.clone();
        }
        if let Some(v) = node.attr("value") {
            return v.to_string();
        }
        if node.role().is_checkable() {
            return "on".to_string();
        }
        String::new()
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), GarlicError> {
        self.node_mut(id)?.value = Some(value.to_string());
        Ok(())
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node(id).map(|n| n.checked).unwrap_or(false)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), GarlicError> {
        self.node_mut(id)?.checked = checked;
        Ok(())
    }

    /// Check `id`. A radio unchecks every other radio with the same name
    /// in the same form (or the whole document outside a form).
    pub fn check(&mut self, id: NodeId) -> Result<(), GarlicError> {
        if self.role(id) == FieldRole::Radio {
            for peer in self.radio_group(id) {
                if peer != id {
                    self.set_checked(peer, false)?;
                }
            }
        }
        self.set_checked(id, true)
    }

    /// Radios sharing `id`'s name within its form, `id` included.
    pub fn radio_group(&self, id: NodeId) -> Vec<NodeId> {
        let name = self.attr(id, "name");
        let scope = self.closest_form(id).unwrap_or(self.root);
        self.descendants(scope)
            .into_iter()
            .filter(|p| self.role(*p) == FieldRole::Radio && self.attr(*p, "name") == name)
            .collect()
    }
}
