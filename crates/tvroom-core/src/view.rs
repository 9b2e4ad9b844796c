use std::rc::Rc;

use crate::{Color, Modifier};

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;

#[derive(Clone)]
pub enum ViewKind {
    Box,
    Column,
    Text {
        text: String,
        color: Color,
        font_size: f32,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    /// Third-party video iframe. Fills its parent.
    VideoEmbed {
        src: String,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Box => write!(f, "Box"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::Text {
                text,
                color,
                font_size,
            } => f
                .debug_struct("Text")
                .field("text", text)
                .field("color", color)
                .field("font_size", font_size)
                .finish(),
            ViewKind::Button { text, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::VideoEmbed { src } => f.debug_struct("VideoEmbed").field("src", src).finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    /// Stable name used to find a node after layout (`"tv"`, `"tv-scene"`).
    pub key: Option<String>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            key: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Depth-first search by key.
    pub fn find(&self, key: &str) -> Option<&View> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    /// Depth-first visit of every node.
    pub fn walk(&self, f: &mut dyn FnMut(&View)) {
        f(self);
        for c in &self.children {
            c.walk(f);
        }
    }

    /// Concatenated text of every `Text`/`Button` in the subtree.
    pub fn text_content(&self) -> String {
        let mut out = Vec::new();
        self.walk(&mut |v| match &v.kind {
            ViewKind::Text { text, .. } | ViewKind::Button { text, .. } => out.push(text.clone()),
            _ => {}
        });
        out.join("\n")
    }

    /// Invokes the click handler of the first button in this subtree.
    /// Returns `false` when there is none.
    pub fn click(&self) -> bool {
        if let ViewKind::Button {
            on_click: Some(cb), ..
        } = &self.kind
        {
            cb();
            return true;
        }
        self.children.iter().any(|c| c.click())
    }
}
