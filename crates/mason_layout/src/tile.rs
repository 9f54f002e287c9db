//! Tiles
//!
//! A tile is the host-side element that represents one item. Its structure is
//! described by a [`TileBlueprint`] the host builds once; the engine keeps a
//! [`TileElement`] per tile with its node, subscriptions and hover state.

use crate::config::LayoutConfig;
use crate::geometry::GridItem;
use crate::item::{Item, ItemId, MediaKind};
use mason_animation::Target;
use mason_core::events::event_types::{POINTER_ENTER, POINTER_LEAVE};
use mason_core::{EventType, NodeId, StateMachine, SubscriptionId};
use smallvec::SmallVec;

/// Layer of the caption overlay inside a tile
pub const CAPTION_LAYER: u8 = 1;
/// Layer of the hover tint overlay inside an image tile
pub const TINT_LAYER: u8 = 2;

/// Class list every tile root carries
pub const TILE_CLASS: &str = "masonry-item glass-card";
/// Inline style of every tile root; position and size are animated
pub const TILE_STYLE: &str = "position: absolute; padding: 0; overflow: hidden; cursor: pointer;";

/// Media content of a tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileMedia {
    /// Cover-sized, centred background image
    Image { source: String },
    /// Video filling the tile, previewed on hover
    Video {
        source: String,
        muted: bool,
        looped: bool,
        inline: bool,
    },
}

/// Structure of a tile for the host to build
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBlueprint {
    /// Document id of the tile root
    pub dom_id: String,
    pub class_name: &'static str,
    pub style: &'static str,
    pub media: TileMedia,
    /// Caption overlay text; empty when the item has no title
    pub caption: String,
    /// Whether a tint overlay is layered over the media
    pub tint_overlay: bool,
}

impl TileBlueprint {
    pub fn for_item(item: &Item, config: &LayoutConfig) -> Self {
        let media = match item.media_kind {
            MediaKind::Image => TileMedia::Image {
                source: item.source.clone(),
            },
            MediaKind::Video => TileMedia::Video {
                source: item.source.clone(),
                muted: true,
                looped: true,
                inline: true,
            },
        };

        Self {
            dom_id: format!("masonry-item-{}", item.id),
            class_name: TILE_CLASS,
            style: TILE_STYLE,
            tint_overlay: item.media_kind == MediaKind::Image
                && config.color_shift_on_hover_enabled,
            caption: item.title.clone().unwrap_or_default(),
            media,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.media, TileMedia::Video { .. })
    }
}

/// Pointer interaction state of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverState {
    Idle,
    Hovered,
}

fn hover_machine() -> StateMachine<HoverState, EventType> {
    StateMachine::builder(HoverState::Idle)
        .on(HoverState::Idle, POINTER_ENTER, HoverState::Hovered)
        .on(HoverState::Hovered, POINTER_LEAVE, HoverState::Idle)
        .history_limit(0)
        .build()
}

/// An owned, mounted tile
pub struct TileElement {
    id: ItemId,
    node: NodeId,
    media_kind: MediaKind,
    link: Option<String>,
    tint_overlay: bool,
    hover: StateMachine<HoverState, EventType>,
    subscriptions: SmallVec<[SubscriptionId; 3]>,
    placement: Option<GridItem>,
}

impl TileElement {
    pub(crate) fn new(
        item: &Item,
        node: NodeId,
        blueprint: &TileBlueprint,
        subscriptions: SmallVec<[SubscriptionId; 3]>,
    ) -> Self {
        Self {
            id: item.id.clone(),
            node,
            media_kind: item.media_kind,
            link: item.link.clone(),
            tint_overlay: blueprint.tint_overlay,
            hover: hover_machine(),
            subscriptions,
            placement: None,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    pub fn is_video(&self) -> bool {
        self.media_kind == MediaKind::Video
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover.current_state()
    }

    /// Most recent placement the tile was sent to
    pub fn placement(&self) -> Option<&GridItem> {
        self.placement.as_ref()
    }

    pub fn root(&self) -> Target {
        Target::root(self.node)
    }

    pub fn caption(&self) -> Target {
        Target::layer(self.node, CAPTION_LAYER)
    }

    pub fn tint(&self) -> Option<Target> {
        self.tint_overlay
            .then(|| Target::layer(self.node, TINT_LAYER))
    }

    pub(crate) fn set_placement(&mut self, placed: &GridItem) {
        self.placement = Some(placed.clone());
    }

    /// Feed a pointer event to the hover machine; returns the new state if it
    /// changed
    pub(crate) fn pointer(&mut self, event_type: EventType) -> Option<HoverState> {
        self.hover.send(event_type)
    }

    pub(crate) fn take_subscriptions(&mut self) -> SmallVec<[SubscriptionId; 3]> {
        std::mem::take(&mut self.subscriptions)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_blueprint() {
        let item = Item::video("reel", "/reel.mp4").with_title("Showreel");
        let blueprint = TileBlueprint::for_item(&item, &LayoutConfig::default());

        assert_eq!(blueprint.dom_id, "masonry-item-reel");
        assert_eq!(blueprint.class_name, TILE_CLASS);
        assert!(blueprint.style.contains("position: absolute"));
        assert_eq!(blueprint.caption, "Showreel");
        assert!(blueprint.is_video());
        assert!(!blueprint.tint_overlay);
        assert_eq!(
            blueprint.media,
            TileMedia::Video {
                source: "/reel.mp4".to_string(),
                muted: true,
                looped: true,
                inline: true,
            }
        );
    }

    #[test]
    fn test_tint_only_for_images_with_color_shift() {
        let config = LayoutConfig {
            color_shift_on_hover_enabled: true,
            ..Default::default()
        };
        let image = TileBlueprint::for_item(&Item::image("a", "/a.jpg"), &config);
        let video = TileBlueprint::for_item(&Item::video("b", "/b.mp4"), &config);
        assert!(image.tint_overlay);
        assert!(!video.tint_overlay);
        assert_eq!(image.caption, "");

        let plain = TileBlueprint::for_item(&Item::image("a", "/a.jpg"), &LayoutConfig::default());
        assert!(!plain.tint_overlay);
    }

    #[test]
    fn test_hover_state_transitions() {
        let item = Item::image("a", "/a.jpg");
        let blueprint = TileBlueprint::for_item(&item, &LayoutConfig::default());
        let mut tile = TileElement::new(&item, 9, &blueprint, SmallVec::new());

        assert_eq!(tile.hover_state(), HoverState::Idle);
        assert_eq!(tile.pointer(POINTER_LEAVE), None);
        assert_eq!(tile.pointer(POINTER_ENTER), Some(HoverState::Hovered));
        assert_eq!(tile.pointer(POINTER_ENTER), None);
        assert_eq!(tile.pointer(POINTER_LEAVE), Some(HoverState::Idle));
        assert_eq!(tile.root(), Target::root(9));
        assert_eq!(tile.caption(), Target::layer(9, CAPTION_LAYER));
        assert_eq!(tile.tint(), None);
    }
}
