//! Trellis: a retained-mode control tree.
//!
//! Trellis keeps every control in an arena owned by a [`Canvas`]. Controls
//! dock into their containers through a per-axis layout engine, render
//! through a pluggable [`Renderer`] and [`Skin`], and share a single
//! keyboard focus, hover and tab chain.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Canvas`] - The arena, tree, layout and render traversal
//! - [`Widget`] - The trait implemented by all widgets
//! - [`Skin`] and [`Renderer`] - The drawing backend
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Size, etc.)
//! - [`widgets`] - Built-in widget implementations

#![warn(missing_docs)]

// Internal core module - re-export specific items below
mod core;

// Public modules
pub mod prelude;
pub mod widget;
pub mod widgets;

pub use trellis_geom as geom;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
// Re-export core types
pub use core::{
    Canvas, Context, NodeId, SkinId, TypedId,
    config::Config,
    error::{Error, Result},
    event::Key,
    focus::FocusManager,
    layout::Dock,
    render::{CacheToTexture, Renderer},
    skin::Skin,
};
// Re-export submodules
pub use core::{
    anim, config, dnd, dump, error, event, focus, layout, node, paint, render, skin, tooltip,
};
pub use widget::Widget;
