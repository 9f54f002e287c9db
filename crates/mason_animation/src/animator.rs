//! The animator capability
//!
//! Layout code never tweens anything itself. It describes what should move
//! through [`Animator`], which is implemented by [`AnimationScheduler`] for
//! real playback and by [`RecordingAnimator`] for tests.
//!
//! [`AnimationScheduler`]: crate::AnimationScheduler
//! [`RecordingAnimator`]: crate::RecordingAnimator

use crate::easing::Easing;
use crate::properties::PropertyMap;
use mason_core::NodeId;

/// An animatable part of a host node
///
/// Layer 0 is the node itself; higher layers address overlays inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    pub node: NodeId,
    pub layer: u8,
}

impl Target {
    pub const fn root(node: NodeId) -> Self {
        Self { node, layer: 0 }
    }

    pub const fn layer(node: NodeId, layer: u8) -> Self {
        Self { node, layer }
    }
}

/// Timing options for a tween. All times are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenOptions {
    pub duration: f32,
    pub easing: Easing,
    pub delay: f32,
    /// Extra delay per index when animating a staggered set
    pub stagger: f32,
}

impl TweenOptions {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: 0.0,
            stagger: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger;
        self
    }
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self::new(0.5, Easing::EaseOutQuad)
    }
}

/// One member of a staggered set: its own start and end values
#[derive(Clone, Debug, PartialEq)]
pub struct StaggeredTween {
    pub target: Target,
    pub from: Option<PropertyMap>,
    pub to: PropertyMap,
}

/// Something that can animate properties of host targets
pub trait Animator {
    /// Tween `target` to `to`. When `from` is given its values are rendered
    /// immediately and the tween starts from them; otherwise it starts from
    /// the currently rendered values.
    ///
    /// A new tween supersedes in-flight tweens of the same properties on the
    /// same target.
    fn animate(
        &mut self,
        target: Target,
        from: Option<&PropertyMap>,
        to: &PropertyMap,
        options: TweenOptions,
    );

    /// Set properties with no transition, cancelling tweens of them
    fn set_immediate(&mut self, target: Target, properties: &PropertyMap);

    /// Drop all state held for every layer of `node`
    fn release(&mut self, node: NodeId);

    /// Animate a set, delaying the member at `index` by
    /// `options.delay + index * options.stagger`
    fn animate_staggered(&mut self, tweens: &[StaggeredTween], options: TweenOptions) {
        for (index, tween) in tweens.iter().enumerate() {
            let delay = options.delay + index as f32 * options.stagger;
            self.animate(
                tween.target,
                tween.from.as_ref(),
                &tween.to,
                TweenOptions {
                    delay,
                    stagger: 0.0,
                    ..options
                },
            );
        }
    }
}

impl<A: Animator + ?Sized> Animator for Box<A> {
    fn animate(
        &mut self,
        target: Target,
        from: Option<&PropertyMap>,
        to: &PropertyMap,
        options: TweenOptions,
    ) {
        (**self).animate(target, from, to, options);
    }

    fn set_immediate(&mut self, target: Target, properties: &PropertyMap) {
        (**self).set_immediate(target, properties);
    }

    fn release(&mut self, node: NodeId) {
        (**self).release(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingAnimator;

    #[test]
    fn test_staggered_delays() {
        let mut animator = RecordingAnimator::new();
        let tweens: Vec<StaggeredTween> = (1..=3)
            .map(|node| StaggeredTween {
                target: Target::root(node),
                from: Some(PropertyMap::opacity(0.0)),
                to: PropertyMap::position(node as f32 * 10.0, 0.0),
            })
            .collect();
        let options = TweenOptions::new(1.0, Easing::Linear)
            .with_delay(0.5)
            .with_stagger(0.1);

        animator.animate_staggered(&tweens, options);

        let recorded: Vec<_> = animator.animations().collect();
        assert_eq!(recorded.len(), 3);
        for (index, (target, from, to, options)) in recorded.into_iter().enumerate() {
            assert_eq!(target, tweens[index].target);
            assert_eq!(from, tweens[index].from.as_ref());
            assert_eq!(to, &tweens[index].to);
            assert!((options.delay - (0.5 + index as f32 * 0.1)).abs() < 1e-6);
            assert_eq!(options.stagger, 0.0);
        }
    }

    #[test]
    fn test_boxed_animator_forwards() {
        let mut boxed: Box<RecordingAnimator> = Box::new(RecordingAnimator::new());
        boxed.set_immediate(Target::layer(4, 1), &PropertyMap::opacity(0.0));
        boxed.release(4);
        assert_eq!(boxed.calls().len(), 2);
    }
}
