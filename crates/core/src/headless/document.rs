//! Arena-backed element tree.

use hashbrown::HashMap;

use super::geometry::Rect;
use super::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
    pub style: HashMap<String, String>,
    pub text: String,
    pub value: String,
    pub rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element description used to build pages.
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    rect: Rect,
}

impl El {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Adds one or more whitespace-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.style.push((property.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Initial form value; also the value restored by a form reset.
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    /// Full-width block at `y` with the given height.
    pub fn at(mut self, y: f64, height: f64) -> Self {
        self.rect = Rect::new(0.0, y, 1280.0, height);
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    pub(crate) focused: Option<NodeId>,
    pub(crate) scroll_y: f64,
    pub(crate) viewport_width: f64,
    pub(crate) viewport_height: f64,
}

impl Document {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            focused: None,
            scroll_y: 0.0,
            viewport_width,
            viewport_height,
        };
        let root = doc.create("html");
        let body = doc.create("body");
        doc.attach(root, body);
        doc.root = root;
        doc.body = body;
        doc
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Creates a detached element.
    pub fn create(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        id
    }

    pub fn append(&mut self, parent: NodeId, el: El) -> NodeId {
        let id = self.create(&el.tag);
        let node = self.node_mut(id);
        node.classes = el.classes;
        node.attrs.extend(el.attrs);
        node.style.extend(el.style);
        node.text = el.text;
        node.rect = el.rect;
        if let Some(value) = el.value {
            node.attrs.insert("value".to_string(), value.clone());
            node.value = value;
        }
        self.attach(parent, id);
        id
    }

    /// Moves `child` under `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    /// Attached elements in document order.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(self.root)
            .into_iter()
            .filter(|id| sel.matches(self, *id))
            .collect()
    }

    pub fn select_within(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        self.descendants(scope)
            .into_iter()
            .find(|id| sel.matches(self, *id))
    }

    pub fn closest(&self, id: NodeId, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if sel.matches(self, node) {
                return Some(node);
            }
            cursor = self.parent(node);
        }
        None
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.node(*n).attrs.get("id").map(String::as_str) == Some(id))
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let node = self.node(id);
        if name == "class" {
            return Some(node.classes.join(" "));
        }
        node.attrs.get(name).cloned()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let node = self.node_mut(id);
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if name == "class" {
            self.node_mut(id).classes.clear();
        } else {
            self.node_mut(id).attrs.remove(name);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.node_mut(id).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.node_mut(id).classes.retain(|c| c != class);
    }

    /// `textContent`: own text followed by descendants' text.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = self.node(id).text.clone();
        for child in self.descendants(id) {
            out.push_str(&self.node(child).text);
        }
        out
    }

    /// Replaces the element's content with a single text run.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        self.node_mut(id).text = text.to_string();
    }

    pub fn is_form_control(&self, id: NodeId) -> bool {
        matches!(self.node(id).tag.as_str(), "input" | "textarea" | "select")
    }

    pub fn reset_form(&mut self, form: NodeId) {
        for id in self.descendants(form) {
            if self.is_form_control(id) {
                let default = self.node(id).attrs.get("value").cloned().unwrap_or_default();
                self.node_mut(id).value = default;
            }
        }
    }

    pub fn scroll_height(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.rect.bottom())
            .fold(self.viewport_height, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_subtrees_are_not_selectable() {
        let mut doc = Document::new(1280.0, 800.0);
        let body = doc.body();
        let section = doc.append(body, El::new("section").id("menu"));
        let card = doc.append(section, El::new("div").class("menu-item"));
        assert_eq!(doc.select_all(".menu-item"), vec![card]);
        assert_eq!(doc.element_by_id("menu"), Some(section));

        doc.detach(section);
        assert!(!doc.is_attached(card));
        assert!(doc.select_all(".menu-item").is_empty());
        assert_eq!(doc.element_by_id("menu"), None);
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let mut doc = Document::new(1280.0, 800.0);
        let body = doc.body();
        let div = doc.append(body, El::new("div"));
        doc.append(div, El::new("i").class("fas fa-check"));
        doc.append(div, El::new("span").text("Saved"));
        assert_eq!(doc.text_content(div), "Saved");

        doc.set_text(div, "Replaced");
        assert_eq!(doc.text_content(div), "Replaced");
        assert!(doc.children(div).is_empty());
    }

    #[test]
    fn reset_restores_default_values() {
        let mut doc = Document::new(1280.0, 800.0);
        let body = doc.body();
        let form = doc.append(body, El::new("form"));
        let name = doc.append(form, El::new("input").id("name"));
        let guests = doc.append(form, El::new("select").id("guests").value("2"));
        doc.node_mut(name).value = "Jane".to_string();
        doc.node_mut(guests).value = "6".to_string();

        doc.reset_form(form);
        assert_eq!(doc.node(name).value, "");
        assert_eq!(doc.node(guests).value, "2");
    }

    #[test]
    fn previous_element_sibling_is_the_preceding_child() {
        let mut doc = Document::new(1280.0, 800.0);
        let body = doc.body();
        let footer = doc.append(body, El::new("footer"));
        let input = doc.append(footer, El::new("input"));
        let button = doc.append(footer, El::new("button"));
        assert_eq!(doc.previous_element_sibling(button), Some(input));
        assert_eq!(doc.previous_element_sibling(input), None);
    }
}
