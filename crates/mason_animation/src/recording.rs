//! Recording animator
//!
//! An [`Animator`] that performs nothing and records every call, for asserting
//! what layout code asked to animate.

use crate::animator::{Animator, Target, TweenOptions};
use crate::properties::PropertyMap;
use mason_core::NodeId;

/// A recorded animator call
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatorCall {
    Animate {
        target: Target,
        from: Option<PropertyMap>,
        to: PropertyMap,
        options: TweenOptions,
    },
    SetImmediate {
        target: Target,
        properties: PropertyMap,
    },
    Release {
        node: NodeId,
    },
}

#[derive(Debug, Default)]
pub struct RecordingAnimator {
    calls: Vec<AnimatorCall>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[AnimatorCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// All `animate` calls as (target, from, to, options)
    pub fn animations(
        &self,
    ) -> impl Iterator<Item = (Target, Option<&PropertyMap>, &PropertyMap, TweenOptions)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            AnimatorCall::Animate {
                target,
                from,
                to,
                options,
            } => Some((*target, from.as_ref(), to, *options)),
            _ => None,
        })
    }

    /// `animate` calls aimed at `target`
    pub fn animations_for(
        &self,
        target: Target,
    ) -> impl Iterator<Item = (Option<&PropertyMap>, &PropertyMap, TweenOptions)> + '_ {
        self.animations()
            .filter(move |(t, ..)| *t == target)
            .map(|(_, from, to, options)| (from, to, options))
    }

    /// `set_immediate` calls aimed at `target`
    pub fn immediates_for(&self, target: Target) -> impl Iterator<Item = &PropertyMap> + '_ {
        self.calls.iter().filter_map(move |call| match call {
            AnimatorCall::SetImmediate {
                target: t,
                properties,
            } if *t == target => Some(properties),
            _ => None,
        })
    }

    pub fn released(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.calls.iter().filter_map(|call| match call {
            AnimatorCall::Release { node } => Some(*node),
            _ => None,
        })
    }
}

impl Animator for RecordingAnimator {
    fn animate(
        &mut self,
        target: Target,
        from: Option<&PropertyMap>,
        to: &PropertyMap,
        options: TweenOptions,
    ) {
        self.calls.push(AnimatorCall::Animate {
            target,
            from: from.copied(),
            to: *to,
            options,
        });
    }

    fn set_immediate(&mut self, target: Target, properties: &PropertyMap) {
        self.calls.push(AnimatorCall::SetImmediate {
            target,
            properties: *properties,
        });
    }

    fn release(&mut self, node: NodeId) {
        self.calls.push(AnimatorCall::Release { node });
    }
}
