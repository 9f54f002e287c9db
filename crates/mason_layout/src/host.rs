//! Tile hosts
//!
//! A [`TileHost`] is the rendering surface tiles are projected onto: it owns
//! the container, builds tile structure from blueprints, routes pointer and
//! resize events back to the engine, and controls video playback.
//!
//! [`HeadlessHost`] is an in-memory host used by the CLI and tests.

use crate::motion::Viewport;
use crate::tile::TileBlueprint;
use mason_animation::{AnimationScheduler, PropertyMap, Target};
use mason_core::events::{Event, EventDispatcher, EventType, NodeId, SubscriptionId, VIEWPORT};
use mason_core::events::event_types::RESIZE;
use std::collections::BTreeMap;
use thiserror::Error;

/// Media playback errors. Hover handlers swallow these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The host refused to start playback (e.g. autoplay policy)
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// The node has no playable media
    #[error("node {0} has no playable media")]
    NoMedia(NodeId),
}

/// Rendering surface for a masonry container
pub trait TileHost {
    /// Whether the container is attached and usable
    fn is_attached(&self) -> bool;

    /// Node id of the container itself
    fn container_node(&self) -> NodeId;

    /// Clear the container and apply [`CONTAINER_STYLE`]
    fn prepare_container(&mut self);

    /// Current measured width of the container
    fn container_width(&self) -> f32;

    fn viewport(&self) -> Viewport;

    fn set_container_height(&mut self, height: f32);

    /// Build a tile from `blueprint` inside the container
    fn mount(&mut self, blueprint: &TileBlueprint) -> NodeId;

    fn unmount(&mut self, node: NodeId);

    /// Deliver `event_type` events on `node` to the engine
    fn subscribe(&mut self, node: NodeId, event_type: EventType) -> SubscriptionId;

    fn unsubscribe(&mut self, subscription: SubscriptionId);

    /// Write rendered property values to a tile layer
    fn render(&mut self, target: Target, values: &PropertyMap);

    fn play_video(&mut self, node: NodeId) -> Result<(), MediaError>;

    fn pause_video(&mut self, node: NodeId);

    /// Seek video playback back to the start
    fn rewind_video(&mut self, node: NodeId);

    /// Open a link in a new browsing context
    fn open_link(&mut self, url: &str);
}

/// Push every changed value from `scheduler` to `host`. Returns how many
/// targets were written.
pub fn present<H: TileHost + ?Sized>(scheduler: &mut AnimationScheduler, host: &mut H) -> usize {
    let changed = scheduler.drain_dirty();
    for (target, values) in &changed {
        host.render(*target, values);
    }
    changed.len()
}

/// Inline style a prepared container carries
pub const CONTAINER_STYLE: &str = "position: relative; width: 100%;";

const HEADLESS_CONTAINER: NodeId = 1;

/// Playback state of a headless video
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VideoState {
    pub playing: bool,
    pub current_time: f32,
}

/// A tile node on the headless surface
#[derive(Clone, Debug)]
pub struct HeadlessNode {
    pub blueprint: TileBlueprint,
    /// Rendered values per layer
    pub layers: BTreeMap<u8, PropertyMap>,
    pub video: Option<VideoState>,
}

impl HeadlessNode {
    pub fn layer(&self, layer: u8) -> Option<&PropertyMap> {
        self.layers.get(&layer)
    }
}

/// In-memory host surface
pub struct HeadlessHost {
    attached: bool,
    container_style: Option<&'static str>,
    container_width: f32,
    container_height: f32,
    viewport: Viewport,
    nodes: BTreeMap<NodeId, HeadlessNode>,
    next_node: NodeId,
    dispatcher: EventDispatcher,
    autoplay_allowed: bool,
    opened_links: Vec<String>,
}

impl HeadlessHost {
    /// A surface whose container spans the full viewport width
    pub fn new(viewport: Viewport) -> Self {
        Self::with_container(viewport.width, viewport)
    }

    pub fn with_container(container_width: f32, viewport: Viewport) -> Self {
        Self {
            attached: true,
            container_style: None,
            container_width,
            container_height: 0.0,
            viewport,
            nodes: BTreeMap::new(),
            next_node: HEADLESS_CONTAINER + 1,
            dispatcher: EventDispatcher::new(),
            autoplay_allowed: true,
            opened_links: Vec::new(),
        }
    }

    /// A surface whose container is not part of any document
    pub fn detached(viewport: Viewport) -> Self {
        Self {
            attached: false,
            ..Self::new(viewport)
        }
    }

    /// Refuse video playback, as a browser autoplay policy would
    pub fn block_autoplay(&mut self) {
        self.autoplay_allowed = false;
    }

    /// Resize the container. Returns the event to deliver if the container
    /// size is observed.
    pub fn resize_container(&mut self, width: f32) -> Option<Event> {
        self.container_width = width;
        self.dispatcher
            .is_subscribed(HEADLESS_CONTAINER, RESIZE)
            .then(|| Event::resize(HEADLESS_CONTAINER, width, self.container_height))
    }

    /// Resize the viewport, with the container following its width. Returns
    /// the event to deliver if the viewport size is observed.
    pub fn resize_viewport(&mut self, viewport: Viewport) -> Option<Event> {
        self.viewport = viewport;
        self.container_width = viewport.width;
        self.dispatcher
            .is_subscribed(VIEWPORT, RESIZE)
            .then(|| Event::resize(VIEWPORT, viewport.width, viewport.height))
    }

    /// Whether a pointer or resize event on `node` would reach the engine
    pub fn routes(&self, node: NodeId, event_type: EventType) -> bool {
        self.dispatcher.is_subscribed(node, event_type)
    }

    pub fn subscription_count(&self) -> usize {
        self.dispatcher.len()
    }

    pub fn is_prepared(&self) -> bool {
        self.container_style.is_some()
    }

    pub fn container_style(&self) -> Option<&'static str> {
        self.container_style
    }

    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn node(&self, node: NodeId) -> Option<&HeadlessNode> {
        self.nodes.get(&node)
    }

    /// Find a tile by its document id
    pub fn find(&self, dom_id: &str) -> Option<(NodeId, &HeadlessNode)> {
        self.nodes
            .iter()
            .find(|(_, node)| node.blueprint.dom_id == dom_id)
            .map(|(id, node)| (*id, node))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &HeadlessNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn opened_links(&self) -> &[String] {
        &self.opened_links
    }

    fn video_mut(&mut self, node: NodeId) -> Option<&mut VideoState> {
        self.nodes.get_mut(&node).and_then(|n| n.video.as_mut())
    }
}

impl TileHost for HeadlessHost {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn container_node(&self) -> NodeId {
        HEADLESS_CONTAINER
    }

    fn prepare_container(&mut self) {
        self.nodes.clear();
        self.dispatcher.clear();
        self.container_style = Some(CONTAINER_STYLE);
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_container_height(&mut self, height: f32) {
        self.container_height = height;
    }

    fn mount(&mut self, blueprint: &TileBlueprint) -> NodeId {
        let id = self.next_node;
        self.next_node += 1;
        self.nodes.insert(
            id,
            HeadlessNode {
                blueprint: blueprint.clone(),
                layers: BTreeMap::new(),
                video: blueprint.is_video().then(VideoState::default),
            },
        );
        id
    }

    fn unmount(&mut self, node: NodeId) {
        self.nodes.remove(&node);
        self.dispatcher.unsubscribe_target(node);
    }

    fn subscribe(&mut self, node: NodeId, event_type: EventType) -> SubscriptionId {
        self.dispatcher.subscribe(node, event_type)
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.dispatcher.unsubscribe(subscription);
    }

    fn render(&mut self, target: Target, values: &PropertyMap) {
        if let Some(node) = self.nodes.get_mut(&target.node) {
            node.layers.entry(target.layer).or_default().merge(values);
        }
    }

    fn play_video(&mut self, node: NodeId) -> Result<(), MediaError> {
        let allowed = self.autoplay_allowed;
        let video = self.video_mut(node).ok_or(MediaError::NoMedia(node))?;
        if !allowed {
            return Err(MediaError::PlaybackRejected(
                "autoplay is not allowed".to_string(),
            ));
        }
        video.playing = true;
        Ok(())
    }

    fn pause_video(&mut self, node: NodeId) {
        if let Some(video) = self.video_mut(node) {
            video.playing = false;
        }
    }

    fn rewind_video(&mut self, node: NodeId) {
        if let Some(video) = self.video_mut(node) {
            video.current_time = 0.0;
        }
    }

    fn open_link(&mut self, url: &str) {
        self.opened_links.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::item::Item;
    use mason_animation::{Animator, Easing, Property, TweenOptions};
    use mason_core::events::event_types::POINTER_ENTER;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 800.0)
    }

    fn blueprint(item: Item) -> TileBlueprint {
        TileBlueprint::for_item(&item, &LayoutConfig::default())
    }

    #[test]
    fn test_mount_and_find() {
        let mut host = HeadlessHost::new(viewport());
        let blueprint = blueprint(Item::video("v", "/v.mp4"));
        let node = host.mount(&blueprint);

        let (found, tile) = host.find("masonry-item-v").unwrap();
        assert_eq!(found, node);
        assert_eq!(tile.video, Some(VideoState::default()));
        assert_ne!(node, host.container_node());
    }

    #[test]
    fn test_resize_events_only_when_observed() {
        let mut host = HeadlessHost::new(viewport());
        assert!(host.resize_container(900.0).is_none());

        host.subscribe(host.container_node(), RESIZE);
        let event = host.resize_container(700.0).unwrap();
        assert_eq!(event.width(), Some(700.0));
        assert_eq!(host.container_width(), 700.0);

        host.subscribe(VIEWPORT, RESIZE);
        let event = host.resize_viewport(Viewport::new(640.0, 480.0)).unwrap();
        assert_eq!(event.target, VIEWPORT);
        assert_eq!(host.container_width(), 640.0);
    }

    #[test]
    fn test_blocked_autoplay() {
        let mut host = HeadlessHost::new(viewport());
        let blueprint = blueprint(Item::video("v", "/v.mp4"));
        let node = host.mount(&blueprint);
        host.block_autoplay();

        assert!(matches!(host.play_video(node), Err(MediaError::PlaybackRejected(_))));
        assert_eq!(host.play_video(999), Err(MediaError::NoMedia(999)));
    }

    #[test]
    fn test_unmount_drops_subscriptions() {
        let mut host = HeadlessHost::new(viewport());
        let blueprint = blueprint(Item::image("a", "/a.jpg"));
        let node = host.mount(&blueprint);
        host.subscribe(node, POINTER_ENTER);
        assert!(host.routes(node, POINTER_ENTER));

        host.unmount(node);
        assert!(!host.routes(node, POINTER_ENTER));
        assert_eq!(host.node_count(), 0);
    }

    #[test]
    fn test_present_writes_scheduler_output() {
        let mut host = HeadlessHost::new(viewport());
        let blueprint = blueprint(Item::image("a", "/a.jpg"));
        let node = host.mount(&blueprint);

        let mut scheduler = AnimationScheduler::new();
        scheduler.set_immediate(Target::root(node), &PropertyMap::rect(0.0, 0.0, 300.0, 200.0));
        scheduler.animate(
            Target::root(node),
            None,
            &PropertyMap::position(100.0, 0.0),
            TweenOptions::new(1.0, Easing::Linear),
        );
        assert_eq!(present(&mut scheduler, &mut host), 1);

        scheduler.tick(0.5);
        present(&mut scheduler, &mut host);
        let root = host.node(node).unwrap().layer(0).unwrap();
        assert_eq!(root.get(Property::X), Some(50.0));
        assert_eq!(root.get(Property::Width), Some(300.0));
    }
}
