//! Drag-and-drop packages and the in-flight drag state.

use std::{any::Any, fmt, rc::Rc};

use tracing::debug;

use crate::{
    core::{
        canvas::Canvas,
        error::{Error, Result},
        id::NodeId,
    },
    geom::Point,
};

/// Payload a control offers for dragging.
#[derive(Clone, Default)]
pub struct DragPackage {
    /// Whether the control can be dragged at all.
    pub draggable: bool,
    /// Package type name, matched by drop targets.
    pub name: String,
    /// Application payload.
    pub user_data: Option<Rc<dyn Any>>,
    /// Grab point relative to the source control.
    pub hold_offset: Point,
    /// Control drawn under the cursor while dragging.
    pub draw_control: Option<NodeId>,
}

impl DragPackage {
    /// A draggable package with a type name.
    pub fn new(name: &str) -> Self {
        Self {
            draggable: true,
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for DragPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragPackage")
            .field("draggable", &self.draggable)
            .field("name", &self.name)
            .field("user_data", &self.user_data.is_some())
            .field("hold_offset", &self.hold_offset)
            .field("draw_control", &self.draw_control)
            .finish()
    }
}

/// The drag in progress, if any.
#[derive(Debug, Default)]
pub struct DragAndDrop {
    /// Control being dragged.
    pub(crate) source: Option<NodeId>,
    /// Package being dragged.
    pub(crate) package: Option<DragPackage>,
    /// Control last hovered by the drag.
    pub(crate) hovered: Option<NodeId>,
}

impl DragAndDrop {
    /// Is a drag in progress?
    pub fn is_dragging(&self) -> bool {
        self.package.is_some()
    }

    /// Control being dragged.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Package being dragged.
    pub fn package(&self) -> Option<&DragPackage> {
        self.package.as_ref()
    }

    /// Control last hovered by the drag.
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Forget a destroyed control. Losing the source or the package's draw
    /// control ends the drag.
    pub fn control_deleted(&mut self, id: NodeId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        let draws = self
            .package
            .as_ref()
            .is_some_and(|p| p.draw_control == Some(id));
        if self.source == Some(id) || draws {
            self.end();
        }
    }

    /// Clear the drag.
    fn end(&mut self) {
        self.source = None;
        self.package = None;
        self.hovered = None;
    }
}

impl Canvas {
    /// Offer a drag package from a node, or withdraw it.
    pub fn set_drag_package(&mut self, id: NodeId, package: Option<DragPackage>) -> Result<()> {
        self.node_mut(id)?.drag_package = package;
        Ok(())
    }

    /// The node's offered package.
    pub fn drag_package(&self, id: NodeId) -> Option<&DragPackage> {
        self.nodes.get(id)?.drag_package.as_ref()
    }

    /// Does the node offer a draggable package?
    pub fn is_draggable(&self, id: NodeId) -> bool {
        self.drag_package(id).is_some_and(|p| p.draggable)
    }

    /// Drag-and-drop state.
    pub fn drag_and_drop(&self) -> &DragAndDrop {
        &self.dnd
    }

    /// Begin dragging a package from a node grabbed at a canvas point. The
    /// hold offset is recorded relative to the node.
    pub fn start_dragging(&mut self, id: NodeId, mut package: DragPackage, at: Point) -> Result<()> {
        self.node(id)?;
        package.hold_offset = self.canvas_pos_to_local(id, at);
        debug!(?id, name = %package.name, "start drag");
        self.dnd.source = Some(id);
        self.dnd.package = Some(package);
        self.dnd.hovered = None;
        Ok(())
    }

    /// Track the control under an in-flight drag.
    pub fn drag_hover(&mut self, target: Option<NodeId>) {
        if self.dnd.is_dragging() {
            self.dnd.hovered = target.filter(|t| self.contains(*t));
        }
    }

    /// Abandon the drag in progress.
    pub fn cancel_drag(&mut self) {
        self.dnd.end();
    }

    /// Drop the in-flight package on a target. When the target's widget
    /// accepts the package the drag source moves under the target. Returns
    /// `true` if the drop was accepted; the drag ends either way.
    pub fn handle_drop(&mut self, target: NodeId) -> Result<bool> {
        self.node(target)?;
        let (Some(package), Some(source)) = (self.dnd.package.take(), self.dnd.source) else {
            return Ok(false);
        };
        let accepts = self
            .nodes
            .get(target)
            .and_then(|n| n.widget.as_deref())
            .is_some_and(|w| w.can_accept_package(&package));
        self.dnd.end();
        if !accepts {
            debug!(?target, name = %package.name, "drop refused");
            return Ok(false);
        }
        debug!(?source, ?target, name = %package.name, "drop");
        match self.set_parent(source, Some(target)) {
            Ok(()) => Ok(true),
            Err(Error::WouldCreateCycle { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    /// Drop target accepting packages named "card".
    struct Tray;

    impl Widget for Tray {
        fn can_accept_package(&self, package: &DragPackage) -> bool {
            package.name == "card"
        }
    }

    #[test]
    fn drop_reparents_when_accepted() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let tray = c.create_with(Some(root), "tray", Tray)?;
        let card = c.create(Some(root), "card")?;
        c.set_drag_package(card, Some(DragPackage::new("card")))?;
        assert!(c.is_draggable(card));

        c.start_dragging(card, DragPackage::new("card"), Point::new(3, 4))?;
        assert_eq!(c.drag_and_drop().package().map(|p| p.hold_offset), Some(Point::new(3, 4)));
        assert!(c.handle_drop(tray)?);
        assert_eq!(c.node(card)?.parent(), Some(tray));
        assert!(!c.drag_and_drop().is_dragging());
        Ok(())
    }

    #[test]
    fn refused_drop_ends_drag() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let plain = c.create(Some(root), "plain")?;
        let card = c.create(Some(root), "card")?;
        c.start_dragging(card, DragPackage::new("card"), Point::zero())?;
        assert!(!c.handle_drop(plain)?);
        assert_eq!(c.node(card)?.parent(), Some(root));
        assert!(!c.drag_and_drop().is_dragging());
        Ok(())
    }

    #[test]
    fn destroying_source_cancels() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let card = c.create(Some(root), "card")?;
        c.start_dragging(card, DragPackage::new("card"), Point::zero())?;
        c.destroy(card)?;
        assert!(!c.drag_and_drop().is_dragging());
        Ok(())
    }

    #[test]
    fn mouse_moves_track_drag_target() -> Result<()> {
        use crate::{core::focus::FocusManager, geom::Rect};

        let mut c = Canvas::new();
        let root = c.root();
        c.set_bounds(root, Rect::new(0, 0, 100, 100))?;
        let tray = c.create_with(Some(root), "tray", Tray)?;
        c.set_bounds(tray, Rect::new(50, 0, 50, 50))?;
        let card = c.create(Some(root), "card")?;
        c.set_bounds(card, Rect::new(0, 0, 20, 20))?;

        c.mouse_moved(Point::new(60, 10));
        assert_eq!(c.drag_and_drop().hovered(), None);

        c.start_dragging(card, DragPackage::new("card"), Point::new(5, 5))?;
        c.mouse_moved(Point::new(60, 10));
        assert_eq!(c.drag_and_drop().hovered(), Some(tray));
        c.mouse_moved(Point::new(10, 80));
        assert_eq!(c.drag_and_drop().hovered(), Some(root));

        c.cancel_drag();
        assert_eq!(c.drag_and_drop().hovered(), None);
        Ok(())
    }
}
