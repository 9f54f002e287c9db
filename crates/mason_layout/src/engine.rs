//! Masonry engine
//!
//! Owns the item list, the tile registry and the resize bridge for one
//! container, and drives every layout pass:
//!
//! ```text
//! resize ──► resolve columns ──► compute_layout ──► reconcile ──► animate
//! ```
//!
//! Engine lifecycle:
//!
//! ```text
//! Uninitialized ──Start──► LayingOut ──Settle──► Ready ──Dispose──► Disposed
//!       │                      ▲                   │
//!       Fail                   └──────Resize───────┘
//!       ▼
//!     Failed
//! ```

use crate::config::{LayoutConfig, PartialLayoutConfig};
use crate::error::{LayoutError, Result};
use crate::geometry::{compute_layout, resolve_column_count, Layout};
use crate::host::{present, TileHost};
use crate::item::{Item, ItemId, ItemSet};
use crate::motion::{self, CAPTION_FADE_DURATION, TINT_FADE_DURATION};
use crate::registry::{TileKey, TileRegistry};
use crate::resize::{PendingResize, ResizeBridge};
use crate::tile::{HoverState, TileElement};
use mason_animation::{
    AnimationScheduler, Animator, Easing, PropertyMap, StaggeredTween, TweenOptions,
};
use mason_core::events::event_types::{CLICK, POINTER_ENTER, POINTER_LEAVE};
use mason_core::{Event, EventType, StateMachine};

/// Lifecycle state of a [`MasonryEngine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    LayingOut,
    Ready,
    /// Container or configuration was invalid; permanent
    Failed,
    /// Torn down; every event is ignored
    Disposed,
}

/// Events driving the engine lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start,
    Fail,
    Settle,
    Resize,
    Dispose,
}

fn lifecycle_machine() -> StateMachine<EngineState, LifecycleEvent> {
    use EngineState::*;
    use LifecycleEvent::*;

    StateMachine::builder(Uninitialized)
        .on(Uninitialized, Start, LayingOut)
        .on(Uninitialized, Fail, Failed)
        .on(LayingOut, Settle, Ready)
        .on(Ready, Resize, LayingOut)
        .on(Ready, Dispose, Disposed)
        .history_limit(16)
        .build()
}

/// Responsive masonry layout for one container
///
/// Construction never fails: an invalid container or configuration leaves the
/// engine in [`EngineState::Failed`] with the cause in [`MasonryEngine::error`].
pub struct MasonryEngine<H: TileHost, A: Animator> {
    host: Option<H>,
    animator: A,
    items: ItemSet,
    config: LayoutConfig,
    easing: Easing,
    lifecycle: StateMachine<EngineState, LifecycleEvent>,
    registry: TileRegistry,
    resize: ResizeBridge,
    /// Result of the most recent pass, kept for inspection
    layout: Option<Layout>,
    columns: usize,
    passes: usize,
    error: Option<LayoutError>,
}

impl<H: TileHost, A: Animator> MasonryEngine<H, A> {
    /// Validate `container` and `config`, prepare the container and run the
    /// first layout pass
    pub fn new(
        container: Option<H>,
        items: Vec<Item>,
        config: PartialLayoutConfig,
        animator: A,
    ) -> Self {
        let mut engine = Self {
            host: container,
            animator,
            items: ItemSet::new(items),
            config: LayoutConfig::default(),
            easing: motion::ENTRANCE_EASING,
            lifecycle: lifecycle_machine(),
            registry: TileRegistry::new(),
            resize: ResizeBridge::default(),
            layout: None,
            columns: 0,
            passes: 0,
            error: None,
        };

        if let Err(err) = engine.initialize(&config) {
            tracing::error!("masonry: initialization failed: {}", err);
            engine.lifecycle.send(LifecycleEvent::Fail);
            engine.error = Some(err);
        }

        engine
    }

    fn initialize(&mut self, partial: &PartialLayoutConfig) -> Result<()> {
        let host = self.host.as_mut().ok_or(LayoutError::MissingContainer)?;
        if !host.is_attached() {
            return Err(LayoutError::DetachedContainer);
        }

        let config = partial.resolve()?;
        self.easing = Easing::from_name(&config.easing)?;
        self.config = config;

        host.prepare_container();
        self.resize = ResizeBridge::attach(host);
        let width = host.container_width();

        tracing::debug!(
            "masonry: initializing with {} items, container width {}",
            self.items.len(),
            width
        );

        self.lifecycle.send(LifecycleEvent::Start);
        self.run_pass(width);
        self.lifecycle.send(LifecycleEvent::Settle);
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.lifecycle.current_state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_in(EngineState::Ready)
    }

    /// Why the engine failed, if it did
    pub fn error(&self) -> Option<&LayoutError> {
        self.error.as_ref()
    }

    /// Recent lifecycle transitions, oldest first
    pub fn lifecycle_history(&self) -> &[(EngineState, LifecycleEvent, EngineState)] {
        self.lifecycle.history()
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state() {
            EngineState::Ready => Ok(()),
            state => Err(LayoutError::NotReady(state)),
        }
    }

    /// Relayout for a new container width right away
    pub fn on_resize(&mut self, container_width: f32) -> Result<()> {
        self.ensure_ready()?;
        self.relayout(container_width);
        Ok(())
    }

    /// Apply the most recent coalesced resize, if any. Returns true when a
    /// layout pass ran.
    pub fn frame(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let width = match self.resize.take() {
            Some(PendingResize::Measured(width)) => width,
            Some(PendingResize::Remeasure) => match self.host.as_ref() {
                Some(host) => host.container_width(),
                None => return false,
            },
            None => return false,
        };
        self.relayout(width);
        true
    }

    /// Handle an event delivered by the host. Returns true when the engine
    /// acted on it.
    ///
    /// Resize events are only recorded; [`MasonryEngine::frame`] applies them.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.is_ready() {
            return false;
        }
        if self.resize.observe(event) {
            return true;
        }

        let Some(key) = self.registry.key_for_node(event.target) else {
            return false;
        };
        match event.event_type {
            POINTER_ENTER | POINTER_LEAVE => self.hover(key, event.event_type),
            CLICK => self.click(key),
            _ => false,
        }
    }

    fn relayout(&mut self, container_width: f32) {
        self.lifecycle.send(LifecycleEvent::Resize);
        self.run_pass(container_width);
        self.lifecycle.send(LifecycleEvent::Settle);
    }

    fn run_pass(&mut self, container_width: f32) {
        let Some(host) = self.host.as_mut() else {
            return;
        };

        let viewport = host.viewport();
        let columns = resolve_column_count(viewport.width);
        let layout = compute_layout(
            self.items.as_slice(),
            container_width,
            columns,
            self.config.column_gap_px,
        );
        host.set_container_height(layout.container_height);

        let reconciliation = self
            .registry
            .reconcile(host, &layout.items, &self.items, &self.config);

        let mut entrances = Vec::with_capacity(reconciliation.created.len());
        for placement in &reconciliation.created {
            let placed = &layout.items[placement.slot];
            let Some(tile) = self.registry.get_mut(placement.key) else {
                continue;
            };
            tile.set_placement(placed);

            self.animator
                .set_immediate(tile.root(), &motion::placement(placed));
            self.animator
                .set_immediate(tile.caption(), &PropertyMap::opacity(0.0));
            if let Some(tint) = tile.tint() {
                self.animator.set_immediate(tint, &PropertyMap::opacity(0.0));
            }

            let (from, to) = motion::entrance(&self.config, placed, viewport);
            entrances.push(StaggeredTween {
                target: tile.root(),
                from: Some(from),
                to,
            });
        }
        self.animator
            .animate_staggered(&entrances, motion::entrance_options(&self.config));

        let reposition = TweenOptions::new(self.config.transition_duration, self.easing);
        for placement in &reconciliation.existing {
            let placed = &layout.items[placement.slot];
            let Some(tile) = self.registry.get_mut(placement.key) else {
                continue;
            };
            tile.set_placement(placed);
            self.animator
                .animate(tile.root(), None, &motion::placement(placed), reposition);
        }

        tracing::debug!(
            "masonry: pass {} placed {} items in {} columns ({} new), height {}",
            self.passes + 1,
            layout.items.len(),
            columns,
            reconciliation.created.len(),
            layout.container_height
        );

        self.columns = columns;
        self.layout = Some(layout);
        self.passes += 1;
    }

    fn hover(&mut self, key: TileKey, event_type: EventType) -> bool {
        let Some(tile) = self.registry.get_mut(key) else {
            return false;
        };
        let Some(state) = tile.pointer(event_type) else {
            return false;
        };
        let hovered = state == HoverState::Hovered;

        if let Some((to, options)) = motion::hover_scale(&self.config, hovered) {
            self.animator.animate(tile.root(), None, &to, options);
        }
        let (to, options) = motion::overlay_fade(hovered, CAPTION_FADE_DURATION);
        self.animator.animate(tile.caption(), None, &to, options);
        if let Some(tint) = tile.tint() {
            let (to, options) = motion::overlay_fade(hovered, TINT_FADE_DURATION);
            self.animator.animate(tint, None, &to, options);
        }

        if tile.is_video() {
            if let Some(host) = self.host.as_mut() {
                let node = tile.node();
                if hovered {
                    host.rewind_video(node);
                    if let Err(err) = host.play_video(node) {
                        tracing::debug!("masonry: preview of `{}` not started: {}", tile.id(), err);
                    }
                } else {
                    host.pause_video(node);
                    host.rewind_video(node);
                }
            }
        }

        true
    }

    fn click(&mut self, key: TileKey) -> bool {
        let (Some(tile), Some(host)) = (self.registry.get(key), self.host.as_mut()) else {
            return false;
        };
        match tile.link() {
            Some(url) => {
                host.open_link(url);
                true
            }
            None => false,
        }
    }

    /// Release every subscription and tile. The engine ignores all further
    /// events.
    pub fn teardown(&mut self) {
        if !self.is_ready() {
            return;
        }
        if let Some(host) = self.host.as_mut() {
            self.resize.detach(host);
            for node in self.registry.drain(host) {
                self.animator.release(node);
            }
        }
        self.lifecycle.send(LifecycleEvent::Dispose);
        tracing::debug!("masonry: engine disposed after {} passes", self.passes);
    }

    /// Layout computed by the most recent pass
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Column count of the most recent pass
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of completed layout passes
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Number of resize notifications superseded before a frame applied them
    pub fn coalesced_resizes(&self) -> usize {
        self.resize.coalesced()
    }

    pub fn tile_count(&self) -> usize {
        self.registry.len()
    }

    pub fn tile(&self, id: &ItemId) -> Option<&TileElement> {
        self.registry
            .key_for_id(id)
            .and_then(|key| self.registry.get(key))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TileElement> {
        self.registry.iter().map(|(_, tile)| tile)
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }
}

impl<H: TileHost> MasonryEngine<H, AnimationScheduler> {
    /// Run one frame: apply any pending resize, advance animations by `dt`
    /// seconds and write the changed values to the host. Returns the number of
    /// targets written.
    pub fn tick(&mut self, dt: f32) -> usize {
        self.frame();
        self.animator.tick(dt);
        match self.host.as_mut() {
            Some(host) => present(&mut self.animator, host),
            None => 0,
        }
    }

    /// Like [`MasonryEngine::tick`], timed from a frame timestamp in
    /// milliseconds
    pub fn tick_at(&mut self, now_ms: f64) -> usize {
        self.frame();
        self.animator.tick_at(now_ms);
        match self.host.as_mut() {
            Some(host) => present(&mut self.animator, host),
            None => 0,
        }
    }
}
