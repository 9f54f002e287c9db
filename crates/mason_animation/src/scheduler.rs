//! Animation scheduler
//!
//! Owns all active tweens and the rendered property values of every target,
//! and advances them each frame.

use crate::animator::{Animator, Target, TweenOptions};
use crate::clock::FrameClock;
use crate::properties::PropertyMap;
use crate::tween::Tween;
use mason_core::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TweenId;
}

/// The animation scheduler that ticks all active tweens
///
/// Starting a tween for a property kills the part of any in-flight tween that
/// drives the same property on the same target; the new tween picks up from
/// the currently rendered value. A rapid sequence of retargets therefore never
/// lets a stale tween finish after a newer one.
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
    by_target: FxHashMap<Target, SmallVec<[TweenId; 2]>>,
    rendered: FxHashMap<Target, PropertyMap>,
    dirty: FxHashSet<Target>,
    clock: FrameClock,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
            by_target: FxHashMap::default(),
            rendered: FxHashMap::default(),
            dirty: FxHashSet::default(),
            clock: FrameClock::new(),
        }
    }

    /// Currently rendered values of `target`
    pub fn rendered(&self, target: Target) -> Option<&PropertyMap> {
        self.rendered.get(&target)
    }

    /// Number of live tweens
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Number of live tweens on `target`
    pub fn tweens_on(&self, target: Target) -> usize {
        self.by_target.get(&target).map_or(0, |ids| ids.len())
    }

    pub fn has_active_animations(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Advance from a frame timestamp in milliseconds
    pub fn tick_at(&mut self, now_ms: f64) {
        if let Some(dt) = self.clock.tick(now_ms) {
            self.tick(dt);
        }
    }

    /// Advance all tweens by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        let mut finished: SmallVec<[TweenId; 8]> = SmallVec::new();

        for (id, tween) in self.tweens.iter_mut() {
            let target = tween.target();
            let rendered = self.rendered.entry(target).or_default();
            let done = tween.step(dt, rendered);
            if tween.is_started() {
                self.dirty.insert(target);
            }
            if done {
                finished.push(id);
            }
        }

        for id in finished {
            self.remove_tween(id);
        }
    }

    /// Take the targets whose rendered values changed since the last call,
    /// ordered by target
    pub fn drain_dirty(&mut self) -> Vec<(Target, PropertyMap)> {
        let mut changed: Vec<(Target, PropertyMap)> = self
            .dirty
            .drain()
            .filter_map(|target| self.rendered.get(&target).map(|values| (target, *values)))
            .collect();
        changed.sort_by_key(|(target, _)| *target);
        changed
    }

    /// Stop every tween and forget all rendered state
    pub fn clear(&mut self) {
        self.tweens.clear();
        self.by_target.clear();
        self.rendered.clear();
        self.dirty.clear();
        self.clock.reset();
    }

    fn remove_tween(&mut self, id: TweenId) {
        let Some(tween) = self.tweens.remove(id) else {
            return;
        };
        let target = tween.target();
        if let Some(ids) = self.by_target.get_mut(&target) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.by_target.remove(&target);
            }
        }
    }

    /// Kill the parts of in-flight tweens on `target` that drive any of
    /// `properties`
    fn supersede(&mut self, target: Target, properties: &PropertyMap) {
        let Some(ids) = self.by_target.get_mut(&target) else {
            return;
        };
        let tweens = &mut self.tweens;
        ids.retain(|id| {
            let Some(tween) = tweens.get_mut(*id) else {
                return false;
            };
            for (property, _) in properties.iter() {
                tween.drop_property(property);
            }
            if tween.end_values().is_empty() {
                tweens.remove(*id);
                false
            } else {
                true
            }
        });
        if ids.is_empty() {
            self.by_target.remove(&target);
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for AnimationScheduler {
    fn animate(
        &mut self,
        target: Target,
        from: Option<&PropertyMap>,
        to: &PropertyMap,
        options: TweenOptions,
    ) {
        if to.is_empty() {
            return;
        }
        self.supersede(target, to);

        if let Some(from) = from {
            self.rendered.entry(target).or_default().merge(from);
            self.dirty.insert(target);
        }

        let id = self.tweens.insert(Tween::new(target, from, to, options));
        self.by_target.entry(target).or_default().push(id);
        tracing::trace!(
            "tween {:?} on node {} layer {} over {}s (+{}s)",
            id,
            target.node,
            target.layer,
            options.duration,
            options.delay
        );
    }

    fn set_immediate(&mut self, target: Target, properties: &PropertyMap) {
        self.supersede(target, properties);
        self.rendered.entry(target).or_default().merge(properties);
        self.dirty.insert(target);
    }

    fn release(&mut self, node: NodeId) {
        let ids: Vec<TweenId> = self
            .tweens
            .iter()
            .filter(|(_, tween)| tween.target().node == node)
            .map(|(id, _)| id)
            .collect();
        for id in ids {
            self.remove_tween(id);
        }
        self.rendered.retain(|target, _| target.node != node);
        self.dirty.retain(|target| target.node != node);
    }
}
