//! Flexbox layout of a view tree, used to measure keyed nodes.

use std::collections::HashMap;

use taffy::prelude::*;
use tvroom_core::{Modifier, Rect, View, ViewKind};

/// Absolute rects of every keyed node, by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutRects {
    rects: HashMap<String, Rect>,
}

impl LayoutRects {
    pub fn get(&self, key: &str) -> Option<Rect> {
        self.rects.get(key).copied()
    }

    /// Size of `key`, zero when the node was not in the tree.
    pub fn size_of(&self, key: &str) -> tvroom_core::Size {
        self.get(key).map(|r| r.size()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

const TEXT_WIDTH_FACTOR: f32 = 0.6;
const LINE_HEIGHT_FACTOR: f32 = 1.3;
const BUTTON_PADDING: f32 = 8.0;

fn text_size(text: &str, font_size: f32) -> (f32, f32) {
    let lines: Vec<&str> = text.lines().collect();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (
        longest as f32 * font_size * TEXT_WIDTH_FACTOR,
        lines.len().max(1) as f32 * font_size * LINE_HEIGHT_FACTOR,
    )
}

fn style_for(m: &Modifier, kind: &ViewKind) -> Style {
    let mut s = Style {
        display: Display::Flex,
        ..Default::default()
    };

    s.flex_direction = FlexDirection::Column;
    s.justify_content = m.justify_content;
    s.align_items = m.align_items;
    s.flex_grow = m.flex_grow.unwrap_or(0.0);
    s.flex_shrink = 0.0;

    match kind {
        ViewKind::Text {
            text, font_size, ..
        } => {
            let (w, h) = text_size(text, *font_size);
            s.size = taffy::geometry::Size {
                width: length(w),
                height: length(h),
            };
        }
        ViewKind::Button { text, .. } => {
            let (w, h) = text_size(text, 14.0);
            s.size = taffy::geometry::Size {
                width: length(w + BUTTON_PADDING * 2.0),
                height: length(h + BUTTON_PADDING),
            };
        }
        ViewKind::VideoEmbed { .. } => {
            s.size = taffy::geometry::Size {
                width: percent(1.0),
                height: percent(1.0),
            };
        }
        _ => {}
    }

    if m.fill_max {
        s.size = taffy::geometry::Size {
            width: percent(1.0),
            height: percent(1.0),
        };
    }
    if m.fill_max_w {
        s.size.width = percent(1.0);
    }
    if let Some(sz) = m.size {
        s.size = taffy::geometry::Size {
            width: length(sz.width.max(0.0)),
            height: length(sz.height.max(0.0)),
        };
    }
    if let Some(w) = m.width {
        s.size.width = length(w.max(0.0));
    }
    if let Some(h) = m.height {
        s.size.height = length(h.max(0.0));
    }
    if let Some(p) = m.padding {
        s.padding = taffy::geometry::Rect {
            left: length(p),
            right: length(p),
            top: length(p),
            bottom: length(p),
        };
    }
    if m.absolute {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.offset_left.map(length).unwrap_or_else(auto),
            right: m.offset_right.map(length).unwrap_or_else(auto),
            top: m.offset_top.map(length).unwrap_or_else(auto),
            bottom: auto(),
        };
    }
    s
}

fn build(
    v: &View,
    tree: &mut TaffyTree<()>,
    keyed: &mut Vec<(NodeId, String)>,
) -> Result<NodeId, taffy::TaffyError> {
    let children = v
        .children
        .iter()
        .map(|c| build(c, tree, keyed))
        .collect::<Result<Vec<_>, _>>()?;
    let node = tree.new_with_children(style_for(&v.modifier, &v.kind), &children)?;
    if let Some(key) = &v.key {
        keyed.push((node, key.clone()));
    }
    Ok(node)
}

/// Lays `root` out in a `viewport` sized box and returns the absolute rect of
/// every keyed node.
pub fn layout(root: &View, viewport: tvroom_core::Size) -> Result<LayoutRects, taffy::TaffyError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();
    let mut keyed = Vec::new();
    let root_node = build(root, &mut tree, &mut keyed)?;

    let mut rs = tree.style(root_node)?.clone();
    rs.size = taffy::geometry::Size {
        width: length(viewport.width),
        height: length(viewport.height),
    };
    tree.set_style(root_node, rs)?;

    tree.compute_layout(
        root_node,
        taffy::geometry::Size {
            width: AvailableSpace::Definite(viewport.width),
            height: AvailableSpace::Definite(viewport.height),
        },
    )?;

    // Taffy locations are parent-relative; walk down accumulating offsets.
    let mut absolute: HashMap<NodeId, (f32, f32)> = HashMap::new();
    let mut stack = vec![(root_node, 0.0f32, 0.0f32)];
    while let Some((node, px, py)) = stack.pop() {
        let l = tree.layout(node)?;
        let (x, y) = (px + l.location.x, py + l.location.y);
        absolute.insert(node, (x, y));
        for child in tree.children(node)? {
            stack.push((child, x, y));
        }
    }

    let mut rects = HashMap::new();
    for (node, key) in keyed {
        let l = tree.layout(node)?;
        let (x, y) = absolute.get(&node).copied().unwrap_or_default();
        rects.insert(
            key,
            Rect {
                x,
                y,
                w: l.size.width,
                h: l.size.height,
            },
        );
    }
    Ok(LayoutRects { rects })
}
