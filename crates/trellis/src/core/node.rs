use std::{any::Any, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        dnd::DragPackage,
        event::Caller,
        id::{NodeId, SkinId},
        layout::Dock,
    },
    geom::{Margin, Padding, Rect, Size, SizeFlags},
    widget::Widget,
};

/// Mouse cursor shapes a control can request while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorType {
    /// Default arrow.
    #[default]
    Normal,
    /// Text insertion beam.
    Beam,
    /// Vertical resize.
    SizeNs,
    /// Horizontal resize.
    SizeWe,
    /// Diagonal resize, top-left to bottom-right.
    SizeNwse,
    /// Diagonal resize, top-right to bottom-left.
    SizeNesw,
    /// Move in any direction.
    SizeAll,
    /// Action not allowed.
    No,
    /// Busy.
    Wait,
    /// Pointing hand.
    Finger,
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Node name used for lookups.
    pub(crate) name: String,

    /// Logical parent, the control this node was attached to.
    pub(crate) parent: Option<NodeId>,
    /// Container whose child list holds this node. Differs from `parent`
    /// when the parent redirects children to an inner panel.
    pub(crate) actual_parent: Option<NodeId>,
    /// Descendant that receives children added to this node.
    pub(crate) inner_panel: Option<NodeId>,
    /// Literal children in z-order, back to front.
    pub(crate) children: Vec<NodeId>,
    /// Tooltip control owned by this node.
    pub(crate) tooltip: Option<NodeId>,
    /// Skin override for this subtree.
    pub(crate) skin: Option<SkinId>,

    /// Rectangle relative to the actual parent.
    pub(crate) bounds: Rect,
    /// Region left for fill-docked children after edge docking.
    pub(crate) inner_bounds: Rect,
    /// Bounds at the local origin.
    pub(crate) render_bounds: Rect,
    /// Outer spacing consumed by docking.
    pub(crate) margin: Margin,
    /// Inner spacing around children.
    pub(crate) padding: Padding,
    /// Docking edges.
    pub(crate) dock: Dock,
    /// Per-axis sizing policies.
    pub(crate) size_flags: SizeFlags,
    /// Minimum size.
    pub(crate) min_size: Size,
    /// Maximum size.
    pub(crate) max_size: Size,
    /// Size requested during the last sizing pass.
    pub(crate) preferred: Size,

    /// Hidden nodes are skipped by layout, rendering and hit-testing.
    pub(crate) hidden: bool,
    /// Disabled nodes are skipped in the tab chain.
    pub(crate) disabled: bool,
    /// Whether the node is a target for mouse hit-testing.
    pub(crate) mouse_input: bool,
    /// Whether the node takes keyboard input.
    pub(crate) keyboard_input: bool,
    /// Clamp moves to the parent's interior.
    pub(crate) restrict_to_parent: bool,
    /// Whether the node joins the tab chain.
    pub(crate) tabable: bool,
    /// Whether the node counts towards its parent's child size.
    pub(crate) include_in_size: bool,
    /// Layout must run for this node.
    pub(crate) needs_layout: bool,
    /// Cached rendering for this node is stale.
    pub(crate) cache_dirty: bool,
    /// Render this subtree through a cache texture.
    pub(crate) cache_to_texture: bool,
    /// Ignore the node's position when sizing undocked children.
    pub(crate) strict_alignment: bool,
    /// Whether the widget should draw its background.
    pub(crate) draw_background: bool,

    /// Cursor requested while hovered.
    pub(crate) cursor: CursorType,
    /// Arbitrary keyed application data.
    pub(crate) user_data: HashMap<String, Box<dyn Any>>,
    /// Accelerator bindings keyed by normalized key string.
    pub(crate) accelerators: HashMap<String, Caller>,
    /// Named event bindings.
    pub(crate) events: HashMap<String, Caller>,
    /// Drag payload offered by this node.
    pub(crate) drag_package: Option<DragPackage>,
}

impl Node {
    /// Construct a detached node around a widget.
    pub(crate) fn new(name: &str, bounds: Rect, widget: Box<dyn Widget>) -> Self {
        Self {
            widget: Some(widget),
            name: name.to_string(),
            parent: None,
            actual_parent: None,
            inner_panel: None,
            children: Vec::new(),
            tooltip: None,
            skin: None,
            bounds,
            inner_bounds: bounds,
            render_bounds: Rect::new(0, 0, bounds.w, bounds.h),
            margin: Margin::default(),
            padding: Padding::default(),
            dock: Dock::NONE,
            size_flags: SizeFlags::default(),
            min_size: Size::default(),
            max_size: Size::new(i32::MAX, i32::MAX),
            preferred: Size::default(),
            hidden: false,
            disabled: false,
            mouse_input: true,
            keyboard_input: false,
            restrict_to_parent: false,
            tabable: false,
            include_in_size: true,
            needs_layout: true,
            cache_dirty: true,
            cache_to_texture: false,
            strict_alignment: false,
            draw_background: true,
            cursor: CursorType::Normal,
            user_data: HashMap::new(),
            accelerators: HashMap::new(),
            events: HashMap::new(),
            drag_package: None,
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the logical parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the container holding this node.
    pub fn actual_parent(&self) -> Option<NodeId> {
        self.actual_parent
    }

    /// Return the inner panel, if children are redirected.
    pub fn inner_panel(&self) -> Option<NodeId> {
        self.inner_panel
    }

    /// Return the literal child list in z-order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the tooltip control, if any.
    pub fn tooltip(&self) -> Option<NodeId> {
        self.tooltip
    }

    /// Return the skin override, if any.
    pub fn skin(&self) -> Option<SkinId> {
        self.skin
    }

    /// Return the bounds relative to the actual parent.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Return the region left for fill-docked children.
    pub fn inner_bounds(&self) -> Rect {
        self.inner_bounds
    }

    /// Return the bounds at the local origin.
    pub fn render_bounds(&self) -> Rect {
        self.render_bounds
    }

    /// Return the margin.
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Return the padding.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Return the docking edges.
    pub fn dock(&self) -> Dock {
        self.dock
    }

    /// Return the sizing policies.
    pub fn size_flags(&self) -> SizeFlags {
        self.size_flags
    }

    /// Return the configured minimum size.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Return the configured maximum size.
    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// Return the size computed by the last sizing pass.
    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    /// Is the node itself hidden?
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Is the node disabled?
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Does the node accept mouse input?
    pub fn mouse_input_enabled(&self) -> bool {
        self.mouse_input
    }

    /// Does the node accept keyboard input?
    pub fn keyboard_input_enabled(&self) -> bool {
        self.keyboard_input
    }

    /// Is the node in the tab chain?
    pub fn is_tabable(&self) -> bool {
        self.tabable
    }

    /// Does layout need to run for this node?
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Is the cached rendering stale?
    pub fn is_cache_dirty(&self) -> bool {
        self.cache_dirty
    }

    /// Is this subtree rendered through a cache texture?
    pub fn cache_to_texture(&self) -> bool {
        self.cache_to_texture
    }

    /// Does the node count towards its parent's child size?
    pub fn include_in_size(&self) -> bool {
        self.include_in_size
    }

    /// Should the widget draw its background?
    pub fn draw_background(&self) -> bool {
        self.draw_background
    }

    /// Return the requested cursor.
    pub fn cursor(&self) -> CursorType {
        self.cursor
    }

    /// Return the drag payload offered by this node.
    pub fn drag_package(&self) -> Option<&DragPackage> {
        self.drag_package.as_ref()
    }
}
