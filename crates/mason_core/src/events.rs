//! Event model
//!
//! Events a host surface delivers to the layout engine, and the subscription
//! registry hosts use to decide which events to deliver.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Identifier of a node on the host surface
pub type NodeId = u64;

/// Node id reserved for the viewport / window itself
pub const VIEWPORT: NodeId = 0;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const CLICK: EventType = 8;
    /// Size of an observed node changed
    pub const RESIZE: EventType = 40;
}

/// An event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
        }
    }

    pub fn pointer(event_type: EventType, target: NodeId, x: f32, y: f32) -> Self {
        Self {
            data: EventData::Pointer { x, y },
            ..Self::new(event_type, target)
        }
    }

    /// A resize notification carrying the newly measured size of `target`
    pub fn resize(target: NodeId, width: f32, height: f32) -> Self {
        Self {
            data: EventData::Resize { width, height },
            ..Self::new(event_types::RESIZE, target)
        }
    }

    /// Measured width for resize events
    pub fn width(&self) -> Option<f32> {
        match self.data {
            EventData::Resize { width, .. } => Some(width),
            _ => None,
        }
    }
}

new_key_type! {
    /// Disposable handle for a registered subscription
    pub struct SubscriptionId;
}

struct Subscription {
    target: NodeId,
    event_type: EventType,
}

/// Registry of subscriptions keyed by (node, event type)
///
/// Subscriptions carry no handler: the host checks the route and forwards
/// matching events to whoever owns the subscription.
pub struct EventDispatcher {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    routes: FxHashMap<(NodeId, EventType), SmallVec<[SubscriptionId; 2]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register interest in `event_type` on `target`
    pub fn subscribe(&mut self, target: NodeId, event_type: EventType) -> SubscriptionId {
        let id = self.subscriptions.insert(Subscription { target, event_type });
        self.routes.entry((target, event_type)).or_default().push(id);
        id
    }

    /// Release a subscription. Returns false for stale handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(sub) = self.subscriptions.remove(id) else {
            return false;
        };
        let key = (sub.target, sub.event_type);
        if let Some(ids) = self.routes.get_mut(&key) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.routes.remove(&key);
            }
        }
        true
    }

    /// Release every subscription on `target`
    pub fn unsubscribe_target(&mut self, target: NodeId) -> usize {
        let ids: Vec<SubscriptionId> = self
            .subscriptions
            .iter()
            .filter(|(_, sub)| sub.target == target)
            .map(|(id, _)| id)
            .collect();
        for id in &ids {
            self.unsubscribe(*id);
        }
        ids.len()
    }

    pub fn is_subscribed(&self, target: NodeId, event_type: EventType) -> bool {
        self.routes.contains_key(&(target, event_type))
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn clear(&mut self) {
        self.subscriptions.clear();
        self.routes.clear();
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
