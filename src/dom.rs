//! In-memory page document.
//!
//! DESIGN
//! ======
//! Every UI behavior in this crate reads and mutates a `Document`: a tree of
//! id-addressed elements with class lists and inner content, plus the few
//! page-level facts the behaviors touch (body scroll lock, location, the
//! confirm responder). `Document` is a cheap `Clone` handle over shared state,
//! so the notification manager, the visibility controller and the session
//! terminator can all hold the same page.
//!
//! Operations addressed at an id that does not exist return
//! [`Outcome::MissingTarget`] instead of failing: absent UI is optional UI.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Class that hides an element.
pub const HIDDEN: &str = "hidden";

/// Result of an operation addressed at an element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The element existed and the operation was applied.
    Applied,
    /// No element with the requested id is in the document.
    MissingTarget,
}

impl Outcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("element id already in document: {0}")]
    DuplicateId(String),
    #[error("parent element not found: {0}")]
    MissingParent(String),
}

/// Page-level scroll behavior of the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

// =============================================================================
// ELEMENT
// =============================================================================

/// A single element. Built detached, then attached with [`Document::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,
    pub content: String,
    parent: Option<String>,
    children: Vec<String>,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            classes: Vec::new(),
            content: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Add every whitespace-separated class in `classes`.
    #[must_use]
    pub fn with_classes(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_owned());
            }
        }
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-joined class attribute, in insertion order.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

type ConfirmResponder = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<DocumentInner>>,
}

struct DocumentInner {
    elements: HashMap<String, Element>,
    /// Top-level element ids, in document order.
    roots: Vec<String>,
    overflow: Overflow,
    location: String,
    confirm: Option<ConfirmResponder>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Document")
            .field("elements", &inner.elements.len())
            .field("overflow", &inner.overflow)
            .field("location", &inner.location)
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document located at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::at("/")
    }

    /// Empty document located at `location`.
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DocumentInner {
                elements: HashMap::new(),
                roots: Vec::new(),
                overflow: Overflow::Auto,
                location: location.into(),
                confirm: None,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DocumentInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach `element` as the last child of `parent` (or as a top-level
    /// element when `parent` is `None`).
    ///
    /// # Errors
    ///
    /// Fails if the id is already taken or the parent does not exist.
    pub fn append(&self, parent: Option<&str>, mut element: Element) -> Result<(), DomError> {
        let mut inner = self.lock();
        if inner.elements.contains_key(&element.id) {
            return Err(DomError::DuplicateId(element.id));
        }
        let id = element.id.clone();
        match parent {
            Some(parent_id) => {
                let Some(parent) = inner.elements.get_mut(parent_id) else {
                    return Err(DomError::MissingParent(parent_id.to_owned()));
                };
                parent.children.push(id.clone());
                element.parent = Some(parent_id.to_owned());
            }
            None => {
                inner.roots.push(id.clone());
                element.parent = None;
            }
        }
        element.children.clear();
        inner.elements.insert(id, element);
        Ok(())
    }

    /// Detach an element and its whole subtree.
    pub fn remove(&self, id: &str) -> Outcome {
        let mut inner = self.lock();
        let Some(element) = inner.elements.get(id) else {
            return Outcome::MissingTarget;
        };
        match element.parent.clone() {
            Some(parent_id) => {
                if let Some(parent) = inner.elements.get_mut(&parent_id) {
                    parent.children.retain(|c| c != id);
                }
            }
            None => inner.roots.retain(|r| r != id),
        }

        let mut stack = vec![id.to_owned()];
        while let Some(next) = stack.pop() {
            if let Some(removed) = inner.elements.remove(&next) {
                stack.extend(removed.children);
            }
        }
        Outcome::Applied
    }

    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.lock().elements.contains_key(id)
    }

    /// Snapshot of an element.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<Element> {
        self.lock().elements.get(id).cloned()
    }

    #[must_use]
    pub fn parent(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).and_then(|e| e.parent.clone())
    }

    #[must_use]
    pub fn children(&self, id: &str) -> Vec<String> {
        self.lock()
            .elements
            .get(id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    /// Whether `node` is `ancestor` or lies anywhere beneath it.
    #[must_use]
    pub fn contains(&self, ancestor: &str, node: &str) -> bool {
        let inner = self.lock();
        if !inner.elements.contains_key(ancestor) {
            return false;
        }
        let mut cursor = inner.elements.get(node);
        while let Some(element) = cursor {
            if element.id == ancestor {
                return true;
            }
            cursor = element.parent.as_ref().and_then(|p| inner.elements.get(p));
        }
        false
    }

    /// Ids of every element carrying `class`, in document order.
    #[must_use]
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        let inner = self.lock();
        let mut out = Vec::new();
        let mut stack: Vec<&String> = inner.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(element) = inner.elements.get(id) else {
                continue;
            };
            if element.has_class(class) {
                out.push(id.clone());
            }
            stack.extend(element.children.iter().rev());
        }
        out
    }

    // -------------------------------------------------------------------------
    // Class list
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.lock().elements.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&self, id: &str, class: &str) -> Outcome {
        self.with_element(id, |element| {
            if !element.has_class(class) {
                element.classes.push(class.to_owned());
            }
        })
    }

    pub fn remove_class(&self, id: &str, class: &str) -> Outcome {
        self.with_element(id, |element| element.classes.retain(|c| c != class))
    }

    /// Flip `class` on `id`. Returns whether the class is now present, or
    /// `None` if the element is missing.
    pub fn toggle_class(&self, id: &str, class: &str) -> Option<bool> {
        let mut present = None;
        self.with_element(id, |element| {
            if element.has_class(class) {
                element.classes.retain(|c| c != class);
                present = Some(false);
            } else {
                element.classes.push(class.to_owned());
                present = Some(true);
            }
        });
        present
    }

    /// Swap `from` for `to`, keeping the class position when `from` is present.
    pub fn replace_class(&self, id: &str, from: &str, to: &str) -> Outcome {
        self.with_element(id, |element| {
            match element.classes.iter().position(|c| c == from) {
                Some(pos) => element.classes[pos] = to.to_owned(),
                None if !element.has_class(to) => element.classes.push(to.to_owned()),
                None => {}
            }
            let mut seen = false;
            element.classes.retain(|c| {
                if c != to {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });
        })
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn content(&self, id: &str) -> Option<String> {
        self.lock().elements.get(id).map(|e| e.content.clone())
    }

    pub fn set_content(&self, id: &str, content: &str) -> Outcome {
        self.with_element(id, |element| content.clone_into(&mut element.content))
    }

    fn with_element(&self, id: &str, f: impl FnOnce(&mut Element)) -> Outcome {
        let mut inner = self.lock();
        match inner.elements.get_mut(id) {
            Some(element) => {
                f(element);
                Outcome::Applied
            }
            None => Outcome::MissingTarget,
        }
    }

    // -------------------------------------------------------------------------
    // Page
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.lock().overflow
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        self.lock().overflow = overflow;
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.lock().location.clone()
    }

    pub fn navigate(&self, location: &str) {
        tracing::debug!(%location, "navigate");
        location.clone_into(&mut self.lock().location);
    }

    /// Install the callback that answers confirmation prompts.
    pub fn set_confirm_responder<F>(&self, responder: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.lock().confirm = Some(Arc::new(responder));
    }

    /// Ask the user to confirm `message`. Declines when no responder is set.
    #[must_use]
    pub fn confirm(&self, message: &str) -> bool {
        let responder = self.lock().confirm.clone();
        responder.is_some_and(|r| r(message))
    }
}
