use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::id::{NodeId, SkinId};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("node not found: {0:?}")]
    /// The node id does not refer to a live node.
    NodeNotFound(NodeId),

    #[error("skin not found: {0:?}")]
    /// The skin id does not refer to a registered skin.
    SkinNotFound(SkinId),

    #[error("no skin set on {0:?} or any of its ancestors")]
    /// Skin resolution reached the top of the tree without finding a skin.
    NoSkin(NodeId),

    #[error("the canvas root cannot be removed")]
    /// Attempted to destroy or reparent the root node.
    CannotRemoveRoot,

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Attaching the child would make it its own ancestor.
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Child being attached.
        child: NodeId,
    },

    #[error("widget for {0:?} is already borrowed")]
    /// A widget hook re-entered its own node.
    ReentrantWidgetBorrow(NodeId),

    #[error("{panel:?} is not a direct child of {owner:?}")]
    /// The requested inner panel is not in the owner's child list.
    InvalidInnerPanel {
        /// Control that would redirect its children.
        owner: NodeId,
        /// Panel that would receive them.
        panel: NodeId,
    },

    #[error("config: {0}")]
    /// Configuration could not be loaded.
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
