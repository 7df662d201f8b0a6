use std::{cell::RefCell, rc::Rc};

use crate::{
    core::{context::Context, dnd::DragPackage, event::Key, id::NodeId, paint::Paint, skin::Skin},
    geom::{Rect, Size},
    widget::Widget,
};

/// Shared record of the hooks a [`Recorder`] saw, readable after the recorder's
/// node is gone.
#[derive(Debug, Clone, Default)]
pub struct HookLog {
    /// Hook names in call order.
    events: Rc<RefCell<Vec<String>>>,
}

impl HookLog {
    /// Record a hook.
    fn push(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }

    /// Every recorded hook in order.
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// How many times a hook fired.
    pub fn count(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    /// Forget recorded hooks.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// A widget that records every hook it receives. Knobs control the answers
/// it gives to the hooks that return values.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Shared record.
    log: HookLog,
    /// Content size reported by `measure`.
    pub content: Option<Size>,
    /// Keys this recorder claims.
    pub handles_keys: Vec<Key>,
    /// Claim wheel events.
    pub handles_wheel: bool,
    /// Accept accelerators only while focused.
    pub accel_only_focus: bool,
    /// Package name accepted on drop.
    pub accepts: Option<String>,
    /// Value reported through `value`.
    pub value: String,
}

impl Recorder {
    /// A recorder with a fresh log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder recording into an existing log.
    pub fn with_log(log: &HookLog) -> Self {
        Self {
            log: log.clone(),
            ..Self::default()
        }
    }

    /// The recorder's log.
    pub fn log(&self) -> HookLog {
        self.log.clone()
    }
}

impl Widget for Recorder {
    fn kind(&self) -> &'static str {
        "Recorder"
    }

    fn think(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("think");
    }

    fn measure(&mut self, _skin: &mut dyn Skin) -> Option<Size> {
        self.content
    }

    fn layout(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("layout");
    }

    fn post_layout(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("post_layout");
    }

    fn render(&mut self, p: &mut Paint<'_>) {
        self.log.push(format!("render:{}", p.node().name()));
    }

    fn on_bounds_changed(&mut self, _old: Rect, _ctx: &mut Context<'_>) {
        self.log.push("bounds_changed");
    }

    fn on_child_bounds_changed(&mut self, _child: NodeId, _old: Rect, _ctx: &mut Context<'_>) {
        self.log.push("child_bounds_changed");
    }

    fn on_child_added(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {
        self.log.push("child_added");
    }

    fn on_child_removed(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {
        self.log.push("child_removed");
    }

    fn on_child_touched(&mut self, _child: NodeId, _ctx: &mut Context<'_>) {
        self.log.push("child_touched");
    }

    fn on_skin_changed(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("skin_changed");
    }

    fn on_keyboard_focus(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("focus");
    }

    fn on_lost_keyboard_focus(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("blur");
    }

    fn on_mouse_enter(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("enter");
    }

    fn on_mouse_leave(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("leave");
    }

    fn on_key(&mut self, key: Key, _down: bool, _ctx: &mut Context<'_>) -> bool {
        self.log.push("key");
        self.handles_keys.contains(&key)
    }

    fn on_mouse_wheel(&mut self, _delta: i32, _ctx: &mut Context<'_>) -> bool {
        self.log.push("wheel");
        self.handles_wheel
    }

    fn accelerator_only_focus(&self) -> bool {
        self.accel_only_focus
    }

    fn accelerate_pressed(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("accelerate");
    }

    fn can_accept_package(&self, package: &DragPackage) -> bool {
        self.accepts.as_deref() == Some(package.name.as_str())
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn pre_delete(&mut self, _ctx: &mut Context<'_>) {
        self.log.push("pre_delete");
    }
}
