//! Tile registry
//!
//! Maps item ids to the tiles mounted for them. A tile is created the first
//! time a layout pass references its id and reused by every later pass; tiles
//! are only released by [`TileRegistry::drain`] at teardown.

use crate::config::LayoutConfig;
use crate::geometry::GridItem;
use crate::host::TileHost;
use crate::item::{ItemId, ItemSet};
use crate::tile::{TileBlueprint, TileElement};
use mason_core::events::event_types::{CLICK, POINTER_ENTER, POINTER_LEAVE};
use mason_core::{NodeId, SubscriptionId};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle of a tile in the registry
    pub struct TileKey;
}

/// A tile paired with the layout slot it fills in the current pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub key: TileKey,
    /// Index into the pass's grid items
    pub slot: usize,
}

/// Outcome of a reconcile, both halves in grid-item order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub created: Vec<Placement>,
    pub existing: Vec<Placement>,
}

impl Reconciliation {
    pub fn len(&self) -> usize {
        self.created.len() + self.existing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.existing.is_empty()
    }
}

/// Arena of mounted tiles with lookup by item id and by host node
#[derive(Default)]
pub struct TileRegistry {
    tiles: SlotMap<TileKey, TileElement>,
    by_id: FxHashMap<ItemId, TileKey>,
    by_node: FxHashMap<NodeId, TileKey>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve each grid item to a tile, mounting tiles for unseen ids.
    ///
    /// Does nothing when the host's container is not attached. Grid items
    /// whose id is not in `items` are skipped.
    pub fn reconcile<H: TileHost + ?Sized>(
        &mut self,
        host: &mut H,
        grid_items: &[GridItem],
        items: &ItemSet,
        config: &LayoutConfig,
    ) -> Reconciliation {
        let mut result = Reconciliation::default();
        if !host.is_attached() {
            tracing::debug!("masonry: container detached, skipping reconcile");
            return result;
        }

        for (slot, grid_item) in grid_items.iter().enumerate() {
            if let Some(&key) = self.by_id.get(&grid_item.id) {
                result.existing.push(Placement { key, slot });
                continue;
            }

            let Some(item) = items.get(&grid_item.id) else {
                tracing::warn!("masonry: no item for grid id `{}`", grid_item.id);
                continue;
            };

            let blueprint = TileBlueprint::for_item(item, config);
            let node = host.mount(&blueprint);

            let mut subscriptions: SmallVec<[SubscriptionId; 3]> = SmallVec::new();
            subscriptions.push(host.subscribe(node, POINTER_ENTER));
            subscriptions.push(host.subscribe(node, POINTER_LEAVE));
            if item.link.is_some() {
                subscriptions.push(host.subscribe(node, CLICK));
            }

            let key = self
                .tiles
                .insert(TileElement::new(item, node, &blueprint, subscriptions));
            self.by_id.insert(item.id.clone(), key);
            self.by_node.insert(node, key);
            tracing::trace!("masonry: mounted tile `{}` as node {}", item.id, node);

            result.created.push(Placement { key, slot });
        }

        result
    }

    pub fn get(&self, key: TileKey) -> Option<&TileElement> {
        self.tiles.get(key)
    }

    pub fn get_mut(&mut self, key: TileKey) -> Option<&mut TileElement> {
        self.tiles.get_mut(key)
    }

    pub fn key_for_id(&self, id: &ItemId) -> Option<TileKey> {
        self.by_id.get(id).copied()
    }

    /// Tile mounted as `node`, for routing host events
    pub fn key_for_node(&self, node: NodeId) -> Option<TileKey> {
        self.by_node.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileKey, &TileElement)> {
        self.tiles.iter()
    }

    /// Unsubscribe and unmount every tile, emptying the registry. Returns the
    /// released nodes.
    pub fn drain<H: TileHost + ?Sized>(&mut self, host: &mut H) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.tiles.len());
        for (_, mut tile) in self.tiles.drain() {
            for subscription in tile.take_subscriptions() {
                host.unsubscribe(subscription);
            }
            host.unmount(tile.node());
            nodes.push(tile.node());
        }
        self.by_id.clear();
        self.by_node.clear();
        nodes
    }
}
