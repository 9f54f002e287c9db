//! Resize observation
//!
//! The engine observes both its container and the viewport. Notifications are
//! coalesced: only the most recent one is kept until the next frame takes it.

use crate::host::TileHost;
use mason_core::events::event_types::RESIZE;
use mason_core::{Event, NodeId, SubscriptionId};
use smallvec::SmallVec;

/// A resize waiting for the next frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PendingResize {
    /// The container reported its new width
    Measured(f32),
    /// The viewport changed; the container must be measured again
    Remeasure,
}

/// Subscriptions for container and viewport size, plus the coalescing slot
#[derive(Debug, Default)]
pub struct ResizeBridge {
    container: NodeId,
    subscriptions: SmallVec<[SubscriptionId; 2]>,
    pending: Option<PendingResize>,
    coalesced: usize,
}

impl ResizeBridge {
    /// Subscribe to size changes of the host's container and viewport
    pub fn attach<H: TileHost + ?Sized>(host: &mut H) -> Self {
        let container = host.container_node();
        let mut subscriptions = SmallVec::new();
        subscriptions.push(host.subscribe(container, RESIZE));
        subscriptions.push(host.subscribe(mason_core::events::VIEWPORT, RESIZE));
        Self {
            container,
            subscriptions,
            pending: None,
            coalesced: 0,
        }
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Record a resize event. Returns false for events the bridge does not
    /// observe.
    pub fn observe(&mut self, event: &Event) -> bool {
        if !self.is_attached() || event.event_type != RESIZE {
            return false;
        }
        if event.target == self.container {
            match event.width() {
                Some(width) => self.notify_width(width),
                None => self.notify_remeasure(),
            }
            true
        } else if event.target == mason_core::events::VIEWPORT {
            self.notify_remeasure();
            true
        } else {
            false
        }
    }

    pub fn notify_width(&mut self, width: f32) {
        self.replace(PendingResize::Measured(width));
    }

    pub fn notify_remeasure(&mut self) {
        self.replace(PendingResize::Remeasure);
    }

    fn replace(&mut self, next: PendingResize) {
        if self.pending.replace(next).is_some() {
            self.coalesced += 1;
        }
    }

    /// Take the pending resize, if any
    pub fn take(&mut self) -> Option<PendingResize> {
        self.pending.take()
    }

    /// Number of notifications superseded before a frame took them
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }

    /// Release both subscriptions and drop any pending resize
    pub fn detach<H: TileHost + ?Sized>(&mut self, host: &mut H) {
        for subscription in self.subscriptions.drain(..) {
            host.unsubscribe(subscription);
        }
        self.pending = None;
    }
}
