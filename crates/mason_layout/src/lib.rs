//! Mason Layout Engine
//!
//! Responsive masonry layout: items are packed into balanced columns whose
//! count follows the viewport width, re-flowed whenever the container resizes,
//! and animated through an injected [`Animator`](mason_animation::Animator).
//!
//! # Features
//!
//! - **Geometry**: fixed breakpoints and greedy shortest-column packing
//! - **Tile registry**: one tile per item id, created once and reused
//! - **Engine**: lifecycle state machine, entrance / reposition / hover motion
//! - **Hosts**: a [`TileHost`] trait for rendering surfaces, with an in-memory
//!   [`HeadlessHost`]
//!
//! # Example
//!
//! ```rust
//! use mason_animation::RecordingAnimator;
//! use mason_layout::{HeadlessHost, Item, MasonryEngine, PartialLayoutConfig, Viewport};
//!
//! let host = HeadlessHost::new(Viewport::new(1280.0, 800.0));
//! let items = vec![
//!     Item::image("a", "/a.jpg").with_height(400.0),
//!     Item::video("b", "/b.mp4"),
//! ];
//! let engine = MasonryEngine::new(
//!     Some(host),
//!     items,
//!     PartialLayoutConfig::default(),
//!     RecordingAnimator::new(),
//! );
//!
//! assert!(engine.is_ready());
//! assert_eq!(engine.columns(), 3);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod host;
pub mod item;
pub mod motion;
pub mod registry;
pub mod resize;
pub mod tile;

pub use config::{EntranceDirection, LayoutConfig, PartialLayoutConfig};
pub use engine::{EngineState, LifecycleEvent, MasonryEngine};
pub use error::{LayoutError, Result};
pub use geometry::{compute_layout, resolve_column_count, GridItem, Layout};
pub use host::{present, HeadlessHost, MediaError, TileHost};
pub use item::{Item, ItemId, ItemSet, MediaKind};
pub use motion::Viewport;
pub use registry::{Placement, Reconciliation, TileKey, TileRegistry};
pub use resize::{PendingResize, ResizeBridge};
pub use tile::{HoverState, TileBlueprint, TileElement, TileMedia};
