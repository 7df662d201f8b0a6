#![allow(clippy::new_without_default, clippy::multiple_inherent_impl)]
//! Core types for the trellis control tree.

// Core modules - public
/// Keyboard accelerators.
pub mod accel;
/// Keyframe-free size animations.
pub mod anim;
/// Bounds mutation and coordinate transforms.
pub mod bounds;
/// Canvas configuration.
pub mod config;
/// Drag-and-drop packages and state.
pub mod dnd;
/// Debug dump utilities.
pub mod dump;
/// Core error types.
pub mod error;
/// Named events and key codes.
pub mod event;
/// Focus, hover and input dispatch.
pub mod focus;
/// Docking layout engine.
pub mod layout;
/// Node data stored in the arena.
pub mod node;
/// Render traversal.
pub mod paint;
/// Renderer interfaces.
pub mod render;
/// Skin interfaces and the simple skin.
pub mod skin;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// Tooltip state.
pub mod tooltip;

// Core modules - internal
/// The canvas arena.
pub mod canvas;
/// Hook context.
pub mod context;
/// Node ID types.
pub mod id;
/// Tree structure mutation and lookup.
pub mod tree;

// Public exports from internal modules
pub use canvas::Canvas;
pub use context::Context;
pub use id::{NodeId, SkinId, TypedId};
