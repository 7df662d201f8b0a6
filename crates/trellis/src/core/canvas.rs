#[cfg(debug_assertions)]
use std::collections::HashSet;
use std::any::Any;

use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::{
    core::{
        anim::Animations,
        config::Config,
        context::Context,
        dnd::DragAndDrop,
        error::{Error, Result},
        id::{NodeId, SkinId, TypedId},
        node::{CursorType, Node},
        skin::Skin,
        tooltip::TooltipState,
    },
    geom::Point,
    widget::Widget,
    widgets::Base,
};

/// The canvas owns every control in an arena, the registered skins, and the
/// process-wide interaction state: hover, keyboard focus, mouse capture, the
/// tab chain and the delayed-delete queue.
pub struct Canvas {
    /// Arena of all nodes.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node.
    pub(crate) root: NodeId,
    /// Registered skins.
    pub(crate) skins: SlotMap<SkinId, Box<dyn Skin>>,
    /// Runtime configuration.
    pub(crate) config: Config,

    /// Node under the mouse.
    pub(crate) hovered: Option<NodeId>,
    /// Node receiving keyboard input.
    pub(crate) keyboard_focus: Option<NodeId>,
    /// Node capturing the mouse.
    pub(crate) mouse_focus: Option<NodeId>,
    /// First node of the tab chain.
    pub(crate) first_tab: Option<NodeId>,
    /// Node that receives focus on the next tab press.
    pub(crate) next_tab: Option<NodeId>,
    /// Last known mouse position in canvas coordinates.
    pub(crate) mouse_pos: Point,
    /// Cursor requested by the hovered node.
    pub(crate) cursor: CursorType,

    /// Nodes queued for destruction at the start of the next frame.
    pub(crate) delayed_delete: Vec<NodeId>,
    /// Drag-and-drop state.
    pub(crate) dnd: DragAndDrop,
    /// Tooltip state.
    pub(crate) tooltip: TooltipState,
    /// Running animations.
    pub(crate) animations: Animations,
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a canvas with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("canvas", config.default_bounds, Box::new(Base)));
        Self {
            nodes,
            root,
            skins: SlotMap::with_key(),
            config,
            hovered: None,
            keyboard_focus: None,
            mouse_focus: None,
            first_tab: None,
            next_tab: None,
            mouse_pos: Point::zero(),
            cursor: CursorType::Normal,
            delayed_delete: Vec::new(),
            dnd: DragAndDrop::default(),
            tooltip: TooltipState::default(),
            animations: Animations::default(),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Does the id refer to a live node?
    pub fn contains(&self, id: impl Into<NodeId>) -> bool {
        self.nodes.contains_key(id.into())
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Borrow a node.
    pub fn node(&self, id: impl Into<NodeId>) -> Result<&Node> {
        let id = id.into();
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Borrow a node mutably.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Create a plain control under a parent. A `None` parent creates a
    /// detached control.
    pub fn create(&mut self, parent: Option<NodeId>, name: &str) -> Result<NodeId> {
        self.create_with(parent, name, Base)
    }

    /// Create a control with a widget under a parent.
    pub fn create_with<W: Widget>(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        widget: W,
    ) -> Result<NodeId> {
        if let Some(p) = parent
            && !self.nodes.contains_key(p)
        {
            return Err(Error::NodeNotFound(p));
        }
        let id = self.nodes.insert(Node::new(
            name,
            self.config.default_bounds,
            Box::new(widget),
        ));
        debug!(?id, name, kind = self.kind_of(id), "create");
        if parent.is_some() {
            self.set_parent(id, parent)?;
        }
        self.invalidate(id);
        Ok(id)
    }

    /// Create a control and return a typed handle for its widget.
    pub fn create_typed<W: Widget>(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        widget: W,
    ) -> Result<TypedId<W>> {
        self.create_with(parent, name, widget).map(TypedId::new)
    }

    /// Widget kind name of a node, for logs and dumps.
    pub(crate) fn kind_of(&self, id: NodeId) -> &'static str {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .map(|w| w.kind())
            .unwrap_or("?")
    }

    /// Borrow a node's widget as a concrete type.
    pub fn widget<W: Widget>(&self, id: impl Into<NodeId>) -> Option<&W> {
        self.nodes
            .get(id.into())?
            .widget
            .as_deref()?
            .downcast_ref::<W>()
    }

    /// Mutably borrow a node's widget as a concrete type.
    pub fn widget_mut<W: Widget>(&mut self, id: impl Into<NodeId>) -> Option<&mut W> {
        self.nodes
            .get_mut(id.into())?
            .widget
            .as_deref_mut()?
            .downcast_mut::<W>()
    }

    /// Take a node's widget out of its slot for the duration of a call that
    /// also needs the canvas. The widget is restored afterwards unless the
    /// node was destroyed or its slot refilled during the call.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Result<R> {
        let node = self.node_mut(id)?;
        let mut widget = node
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = {
            let mut ctx = Context::new(self, id);
            f(widget.as_mut(), &mut ctx)
        };
        if let Some(node) = self.nodes.get_mut(id)
            && node.widget.is_none()
        {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Run a widget hook, skipping it if the node is gone or its widget is
    /// already borrowed further up the stack.
    pub(crate) fn notify<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Option<R> {
        match self.with_widget_mut(id, f) {
            Ok(r) => Some(r),
            Err(e) => {
                trace!(?id, error = %e, "hook skipped");
                None
            }
        }
    }

    /// Register a skin and return its id.
    pub fn add_skin(&mut self, skin: impl Skin + 'static) -> SkinId {
        self.skins.insert(Box::new(skin))
    }

    /// Register a skin and make it the root's skin if the root has none.
    pub fn install_skin(&mut self, skin: impl Skin + 'static) -> SkinId {
        let id = self.add_skin(skin);
        if self.nodes[self.root].skin.is_none() {
            let root = self.root;
            self.set_skin(root, Some(id), false);
        }
        id
    }

    /// Borrow a registered skin.
    pub fn skin_mut(&mut self, id: SkinId) -> Result<&mut dyn Skin> {
        match self.skins.get_mut(id) {
            Some(s) => Ok(s.as_mut()),
            None => Err(Error::SkinNotFound(id)),
        }
    }

    /// Borrow a registered skin as its concrete type.
    pub fn skin_as<S: Skin + 'static>(&self, id: SkinId) -> Option<&S> {
        let skin: &dyn Any = self.skins.get(id)?.as_ref();
        skin.downcast_ref::<S>()
    }

    /// Mutably borrow a registered skin as its concrete type.
    pub fn skin_as_mut<S: Skin + 'static>(&mut self, id: SkinId) -> Option<&mut S> {
        let skin: &mut dyn Any = self.skins.get_mut(id)?.as_mut();
        skin.downcast_mut::<S>()
    }

    /// Set or clear a node's skin override, optionally applying the same
    /// override to every descendant.
    pub fn set_skin(&mut self, id: NodeId, skin: Option<SkinId>, do_children: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.skin != skin {
            node.skin = skin;
            self.invalidate(id);
            self.redraw(id);
            self.notify(id, |w, ctx| w.on_skin_changed(ctx));
        }
        if do_children {
            let children = self.nodes.get(id).map(|n| n.children.clone());
            for child in children.unwrap_or_default() {
                self.set_skin(child, skin, true);
            }
        }
    }

    /// Resolve the effective skin: the nearest override on the node or its
    /// logical ancestors.
    pub fn resolve_skin(&self, id: NodeId) -> Result<SkinId> {
        let mut current = Some(id);
        while let Some(n) = current {
            let node = self.node(n)?;
            if let Some(skin) = node.skin {
                return Ok(skin);
            }
            current = node.parent;
        }
        warn!(?id, "no skin on node or ancestors");
        Err(Error::NoSkin(id))
    }

    /// Mark a node's layout and cached rendering stale.
    pub fn invalidate(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.needs_layout = true;
            node.cache_dirty = true;
        }
    }

    /// Invalidate the logical parent, if any.
    pub fn invalidate_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            self.invalidate(parent);
        }
    }

    /// Invalidate the literal children and the inner panel's children,
    /// recursing through whole subtrees when asked.
    pub fn invalidate_children(&mut self, id: NodeId, recursive: bool) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let children = node.children.clone();
        let inner = node.inner_panel;
        for child in children {
            self.invalidate(child);
            if recursive {
                self.invalidate_children(child, true);
            }
        }
        if let Some(inner) = inner
            && !recursive
        {
            let inner_children = self.nodes.get(inner).map(|n| n.children.clone());
            for child in inner_children.unwrap_or_default() {
                self.invalidate(child);
            }
        }
    }

    /// Mark a node and all of its logical ancestors as needing a repaint.
    pub fn redraw(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(n) = current {
            let Some(node) = self.nodes.get_mut(n) else {
                break;
            };
            node.cache_dirty = true;
            current = node.parent;
        }
    }

    /// Hide or show a node.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.hidden == hidden {
            return Ok(());
        }
        node.hidden = hidden;
        self.invalidate(id);
        self.redraw(id);
        Ok(())
    }

    /// Show a node.
    pub fn show(&mut self, id: NodeId) -> Result<()> {
        self.set_hidden(id, false)
    }

    /// Hide a node.
    pub fn hide(&mut self, id: NodeId) -> Result<()> {
        self.set_hidden(id, true)
    }

    /// Is the node and every logical ancestor shown?
    pub fn visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            match self.nodes.get(n) {
                Some(node) if !node.hidden => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Enable or disable a node.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.disabled != disabled {
            node.disabled = disabled;
            self.redraw(id);
        }
        Ok(())
    }

    /// Is the node disabled itself or through a logical ancestor?
    pub fn is_disabled(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            match self.nodes.get(n) {
                Some(node) if node.disabled => return true,
                Some(node) => current = node.parent,
                None => return false,
            }
        }
        false
    }

    /// Allow or block mouse hit-testing on a node.
    pub fn set_mouse_input_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.mouse_input = enabled;
        Ok(())
    }

    /// Allow or block keyboard input on a node.
    pub fn set_keyboard_input_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.node_mut(id)?.keyboard_input = enabled;
        Ok(())
    }

    /// Add a node to, or remove it from, the tab chain.
    pub fn set_tabable(&mut self, id: NodeId, tabable: bool) -> Result<()> {
        self.node_mut(id)?.tabable = tabable;
        Ok(())
    }

    /// Clamp moves of this node to its parent's interior.
    pub fn set_restrict_to_parent(&mut self, id: NodeId, restrict: bool) -> Result<()> {
        self.node_mut(id)?.restrict_to_parent = restrict;
        Ok(())
    }

    /// Include or exclude the node from its parent's child size.
    pub fn set_include_in_size(&mut self, id: NodeId, include: bool) -> Result<()> {
        self.node_mut(id)?.include_in_size = include;
        Ok(())
    }

    /// Control whether the widget draws its background.
    pub fn set_draw_background(&mut self, id: NodeId, draw: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.draw_background != draw {
            node.draw_background = draw;
            self.redraw(id);
        }
        Ok(())
    }

    /// Rename a node.
    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.node_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Set the cursor a node requests while hovered.
    pub fn set_cursor(&mut self, id: NodeId, cursor: CursorType) -> Result<()> {
        self.node_mut(id)?.cursor = cursor;
        Ok(())
    }

    /// Publish a node's cursor as the requested cursor.
    pub fn update_cursor(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get(id) {
            self.cursor = node.cursor;
        }
    }

    /// The cursor most recently requested by a hovered node.
    pub fn requested_cursor(&self) -> CursorType {
        self.cursor
    }

    /// Attach keyed application data to a node.
    pub fn set_user_data<T: Any>(&mut self, id: NodeId, key: &str, value: T) -> Result<()> {
        self.node_mut(id)?
            .user_data
            .insert(key.to_string(), Box::new(value));
        Ok(())
    }

    /// Retrieve keyed application data of a given type.
    pub fn user_data<T: Any>(&self, id: NodeId, key: &str) -> Option<&T> {
        self.nodes.get(id)?.user_data.get(key)?.downcast_ref::<T>()
    }

    /// Collect a subtree of literal children in pre-order, including the root.
    pub(crate) fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect a subtree of literal children in post-order, including the root.
    pub(crate) fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Return true if `ancestor` appears in the logical parent chain of `node`.
    pub(crate) fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Return true if the node is attached to the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root, id)
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn debug_assert_tree_invariants(&self) {
        debug_assert!(self.nodes.contains_key(self.root), "root node missing");
        for (id, node) in self.nodes.iter() {
            let mut seen = HashSet::with_capacity(node.children.len());
            for child in &node.children {
                debug_assert!(seen.insert(*child), "duplicate child {child:?} under {id:?}");
                debug_assert!(
                    self.nodes.get(*child).and_then(|c| c.actual_parent) == Some(id),
                    "child {child:?} actual parent mismatch under {id:?}"
                );
            }
            if let Some(actual) = node.actual_parent {
                debug_assert!(
                    self.nodes
                        .get(actual)
                        .is_some_and(|p| p.children.contains(&id)),
                    "container {actual:?} missing child {id:?}"
                );
            }
            debug_assert_eq!(
                node.parent.is_some(),
                node.actual_parent.is_some(),
                "parent links disagree on {id:?}"
            );
        }
        for held in [self.hovered, self.keyboard_focus, self.mouse_focus]
            .into_iter()
            .flatten()
        {
            debug_assert!(self.nodes.contains_key(held), "global points at missing node {held:?}");
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn debug_assert_tree_invariants(&self) {}
}
