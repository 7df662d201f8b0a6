//! Timed size animations.
//!
//! A tween interpolates one dimension of a control from a start to an end
//! value over a fixed length, after an optional delay. Progress is eased with
//! `progress.powf(ease)`, so an ease of 1 is linear.

use std::{collections::HashMap, time::Duration};

use tracing::trace;

use crate::core::{canvas::Canvas, error::Result, id::NodeId};

/// The dimension a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    /// Control width.
    Width,
    /// Control height.
    Height,
}

/// One running interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Driven dimension.
    pub property: Property,
    /// Value at the start.
    pub from: i32,
    /// Value at the end.
    pub to: i32,
    /// Running time, excluding the delay.
    pub length: Duration,
    /// Wait before the tween starts.
    pub delay: Duration,
    /// Easing exponent.
    pub ease: f32,
    /// Hide the control when the tween finishes.
    pub hide: bool,
    /// Time consumed so far, including the delay.
    elapsed: Duration,
}

impl Tween {
    /// A linear tween with no delay.
    pub fn new(property: Property, from: i32, to: i32, length: Duration) -> Self {
        Self {
            property,
            from,
            to,
            length,
            delay: Duration::ZERO,
            ease: 1.0,
            hide: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Set the start delay.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing exponent.
    pub fn ease(mut self, ease: f32) -> Self {
        self.ease = ease;
        self
    }

    /// Hide the control on completion.
    pub fn hide_on_finish(mut self) -> Self {
        self.hide = true;
        self
    }

    /// Has the delay passed?
    fn started(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Has the tween run its full length?
    fn finished(&self) -> bool {
        self.elapsed >= self.delay + self.length
    }

    /// Interpolated value at the current time.
    pub fn value(&self) -> i32 {
        let running = self.elapsed.saturating_sub(self.delay);
        let progress = if self.length.is_zero() {
            1.0
        } else {
            (running.as_secs_f32() / self.length.as_secs_f32()).clamp(0.0, 1.0)
        };
        let eased = progress.powf(self.ease);
        self.from + ((self.to - self.from) as f32 * eased).round() as i32
    }
}

/// A value a tween produced during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Animated control.
    pub node: NodeId,
    /// Driven dimension.
    pub property: Property,
    /// New value.
    pub value: i32,
    /// The tween completed on this tick.
    pub finished: bool,
    /// Hide the control now.
    pub hide: bool,
}

/// Running tweens keyed by control. A control's tweens run concurrently.
#[derive(Debug, Default)]
pub struct Animations {
    /// Tweens per control.
    running: HashMap<NodeId, Vec<Tween>>,
}

impl Animations {
    /// Queue a tween for a control.
    pub fn add(&mut self, node: NodeId, tween: Tween) {
        self.running.entry(node).or_default().push(tween);
    }

    /// Drop every tween for a control.
    pub fn cancel(&mut self, node: NodeId) {
        self.running.remove(&node);
    }

    /// Is anything animating?
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Is the control animating?
    pub fn is_animating(&self, node: NodeId) -> bool {
        self.running.contains_key(&node)
    }

    /// Advance every tween and collect the values to apply. Finished tweens
    /// are removed.
    pub fn tick(&mut self, dt: Duration) -> Vec<Step> {
        let mut steps = Vec::new();
        for (node, tweens) in &mut self.running {
            for t in tweens.iter_mut() {
                t.elapsed += dt;
                if !t.started() {
                    continue;
                }
                let finished = t.finished();
                steps.push(Step {
                    node: *node,
                    property: t.property,
                    value: if finished { t.to } else { t.value() },
                    finished,
                    hide: finished && t.hide,
                });
            }
            tweens.retain(|t| !t.finished());
        }
        self.running.retain(|_, t| !t.is_empty());
        steps
    }
}

impl Canvas {
    /// Running animations.
    pub fn animations(&self) -> &Animations {
        &self.animations
    }

    /// Animate a node.
    pub fn animate(&mut self, id: NodeId, tween: Tween) -> Result<()> {
        self.node(id)?;
        self.animations.add(id, tween);
        Ok(())
    }

    /// Advance animations and apply their values.
    pub fn tick_animations(&mut self, dt: Duration) -> Result<()> {
        for step in self.animations.tick(dt) {
            if !self.contains(step.node) {
                continue;
            }
            trace!(node = ?step.node, ?step.property, step.value, "animate");
            match step.property {
                Property::Width => self.set_width(step.node, step.value)?,
                Property::Height => self.set_height(step.node, step.value)?,
            };
            if step.hide {
                self.hide(step.node)?;
            }
        }
        Ok(())
    }

    /// Grow from zero to the current width. The width drops to zero now.
    pub fn anim_width_in(&mut self, id: NodeId, length: Duration, delay: Duration, ease: f32) -> Result<()> {
        let w = self.node(id)?.bounds.w;
        self.animate(id, Tween::new(Property::Width, 0, w, length).delay(delay).ease(ease))?;
        self.set_width(id, 0)?;
        Ok(())
    }

    /// Shrink from the current width to zero, then hide.
    pub fn anim_width_out(&mut self, id: NodeId, length: Duration, delay: Duration, ease: f32) -> Result<()> {
        let w = self.node(id)?.bounds.w;
        let tween = Tween::new(Property::Width, w, 0, length)
            .delay(delay)
            .ease(ease)
            .hide_on_finish();
        self.animate(id, tween)
    }

    /// Grow from zero to the current height. The height drops to zero now.
    pub fn anim_height_in(&mut self, id: NodeId, length: Duration, delay: Duration, ease: f32) -> Result<()> {
        let h = self.node(id)?.bounds.h;
        self.animate(id, Tween::new(Property::Height, 0, h, length).delay(delay).ease(ease))?;
        self.set_height(id, 0)?;
        Ok(())
    }

    /// Shrink from the current height to zero, then hide.
    pub fn anim_height_out(&mut self, id: NodeId, length: Duration, delay: Duration, ease: f32) -> Result<()> {
        let h = self.node(id)?.bounds.h;
        let tween = Tween::new(Property::Height, h, 0, length)
            .delay(delay)
            .ease(ease)
            .hide_on_finish();
        self.animate(id, tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rect;

    /// Milliseconds.
    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn ease_shapes_progress() {
        let mut t = Tween::new(Property::Width, 0, 100, ms(100));
        t.elapsed = ms(50);
        assert_eq!(t.value(), 50);
        let mut t = t.ease(2.0);
        t.elapsed = ms(50);
        assert_eq!(t.value(), 25);
    }

    #[test]
    fn width_in_grows_after_delay() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        c.set_bounds(a, Rect::new(0, 0, 80, 10))?;
        c.anim_width_in(a, ms(100), ms(20), 1.0)?;
        assert_eq!(c.node(a)?.bounds().w, 0);

        c.tick_animations(ms(10))?;
        assert_eq!(c.node(a)?.bounds().w, 0);
        c.tick_animations(ms(60))?;
        assert_eq!(c.node(a)?.bounds().w, 40);
        c.tick_animations(ms(100))?;
        assert_eq!(c.node(a)?.bounds().w, 80);
        assert!(c.animations().is_empty());
        Ok(())
    }

    #[test]
    fn height_out_hides_and_cancel_on_destroy() -> Result<()> {
        let mut c = Canvas::new();
        let root = c.root();
        let a = c.create(Some(root), "a")?;
        c.anim_height_out(a, ms(10), Duration::ZERO, 1.0)?;
        c.tick_animations(ms(20))?;
        assert_eq!(c.node(a)?.bounds().h, 0);
        assert!(c.node(a)?.is_hidden());

        let b = c.create(Some(root), "b")?;
        c.anim_width_out(b, ms(10), Duration::ZERO, 1.0)?;
        assert!(c.animations().is_animating(b));
        c.destroy(b)?;
        assert!(!c.animations().is_animating(b));
        Ok(())
    }
}
