//! Convenience re-exports for common trellis types.

pub use crate::{
    Canvas, Context, Dock, FocusManager, Key, NodeId, Result, SkinId, TypedId, Widget,
    geom::{Dim, Edges, Margin, Padding, Point, Rect, Size, SizeFlag, SizeFlags},
    paint::Paint,
    render::{CacheToTexture, Renderer},
    skin::{Color, DrawState, Palette, SimpleSkin, Skin},
    widgets::{Base, Label, Panel},
};
