use tracing::debug;

use crate::{
    core::{
        canvas::Canvas,
        error::{Error, Result},
        id::NodeId,
        skin::Palette,
    },
    widgets::Label,
};

/// Which control's tooltip is showing.
#[derive(Debug, Default)]
pub struct TooltipState {
    /// Owner of the visible tooltip.
    active: Option<NodeId>,
}

impl TooltipState {
    /// Show the tooltip owned by a control.
    pub fn enable(&mut self, owner: NodeId) {
        self.active = Some(owner);
    }

    /// Hide the tooltip if the control owns the visible one.
    pub fn disable(&mut self, owner: NodeId) {
        if self.active == Some(owner) {
            self.active = None;
        }
    }

    /// Forget a destroyed control.
    pub fn control_deleted(&mut self, id: NodeId) {
        self.disable(id);
    }

    /// Owner of the visible tooltip.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }
}

impl Canvas {
    /// Tooltip state.
    pub fn tooltip_state(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Install a control as a node's tooltip, or remove the current one. The
    /// tooltip is held as a literal child of the owner, hidden, and left out
    /// of layout and child sizing. A replaced tooltip is destroyed.
    pub fn set_tooltip(&mut self, id: NodeId, tooltip: Option<NodeId>) -> Result<()> {
        let old = self.node(id)?.tooltip;
        if old == tooltip {
            return Ok(());
        }
        if let Some(tip) = tooltip {
            self.node(tip)?;
            if self.is_ancestor(tip, id) {
                return Err(Error::WouldCreateCycle {
                    parent: id,
                    child: tip,
                });
            }
        }
        if let Some(old) = old {
            self.destroy(old)?;
        }
        let Some(tip) = tooltip else {
            return Ok(());
        };
        self.set_parent(tip, None)?;
        self.push_child(id, tip);
        let node = self.node_mut(tip)?;
        node.parent = Some(id);
        node.hidden = true;
        node.include_in_size = false;
        self.node_mut(id)?.tooltip = Some(tip);
        debug!(?id, ?tip, "set tooltip");
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Give a node a text tooltip: a label coloured with the palette's
    /// tooltip text colour, padded, and sized to its text.
    pub fn set_tooltip_text(&mut self, id: NodeId, text: &str) -> Result<NodeId> {
        let color = match self.resolve_skin(id) {
            Ok(skin) => self.skin_mut(skin)?.palette().tooltip_text,
            Err(_) => Palette::default().tooltip_text,
        };
        let label = Label::new(text).with_color(color).with_background("Tooltip");
        let tip = self.create_with(None, "tooltip", label)?;
        let padding = self.config.tooltip_padding;
        self.set_padding(tip, padding)?;
        self.set_tooltip(id, Some(tip))?;
        self.size_to_contents(tip)?;
        Ok(tip)
    }
}
