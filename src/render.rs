//! Headless render host: anchor, root identity, declarative view tree.
//!
//! DESIGN
//! ======
//! The shell never talks to a real DOM. A `RenderRoot` is attached to a named
//! anchor and tracks its own identity (UUID) plus a mount generation, so the
//! reinit semantics — soft reuses the root, hard discards it — are directly
//! observable. `view` builds the declarative tree from the current model.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::store::AppModel;

// =============================================================================
// ANCHOR
// =============================================================================

/// Named mount point in the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomAnchor {
    id: String,
}

impl DomAnchor {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// VIEW TREE
// =============================================================================

/// One node of the declarative view tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), text: None, children: Vec::new() }
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }
}

/// The full tree handed to a render root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiTree {
    pub root: Node,
}

/// Build the view for the current model: splash until init, login for
/// anonymous sessions, the app shell otherwise.
#[must_use]
pub fn view(model: &AppModel) -> UiTree {
    let page = if !model.app_ready {
        Node::new("splash")
    } else {
        match &model.profile {
            Some(profile) if profile.is_authenticated() => Node::new("shell")
                .child(Node::new("sidebar"))
                .child(Node::new("canvas").text(profile.name.clone())),
            _ => Node::new("login"),
        }
    };
    UiTree { root: Node::new("app").child(page) }
}

// =============================================================================
// RENDER ROOT
// =============================================================================

/// A render root attached to an anchor. Identity is fixed at attach time; a
/// hard reinit attaches a new root rather than reusing this one.
#[derive(Debug)]
pub struct RenderRoot {
    id: Uuid,
    anchor_id: String,
    generation: u64,
    mounted: Option<UiTree>,
}

impl RenderRoot {
    /// Attach a fresh root (new identity) to the anchor.
    #[must_use]
    pub fn attach(anchor: &DomAnchor) -> Self {
        let root = Self {
            id: Uuid::new_v4(),
            anchor_id: anchor.id().to_string(),
            generation: 0,
            mounted: None,
        };
        debug!(root = %root.id, anchor = %root.anchor_id, "render: root attached");
        root
    }

    /// Render a tree into this root, replacing whatever was mounted.
    pub fn mount(&mut self, tree: UiTree) {
        self.generation += 1;
        self.mounted = Some(tree);
        debug!(root = %self.id, generation = self.generation, "render: mounted");
    }

    /// Discard the mounted tree. The root identity survives.
    pub fn unmount(&mut self) {
        self.mounted = None;
        debug!(root = %self.id, "render: unmounted");
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    /// How many times a tree has been mounted into this root.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    #[must_use]
    pub fn tree(&self) -> Option<&UiTree> {
        self.mounted.as_ref()
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
