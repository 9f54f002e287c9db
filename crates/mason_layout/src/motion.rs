//! Tile motion
//!
//! Property maps and timings for the animations the engine plays on tiles:
//! - Entrance: from an offset (and optionally blurred, always transparent) to
//!   the computed position, staggered by creation index
//! - Reposition: to the new position and size after a relayout
//! - Hover: scale down and reveal the overlays, and back

use crate::config::{EntranceDirection, LayoutConfig};
use crate::geometry::GridItem;
use mason_animation::{Easing, PropertyMap, TweenOptions};

/// Seconds an entrance animation takes
pub const ENTRANCE_DURATION: f32 = 1.2;
/// `power3.out`
pub const ENTRANCE_EASING: Easing = Easing::EaseOutQuart;
/// Blur radius tiles start from when entrance blur is enabled
pub const ENTRANCE_BLUR_PX: f32 = 10.0;

pub const HOVER_SCALE_DURATION: f32 = 0.4;
/// `power2.out`
pub const HOVER_SCALE_EASING: Easing = Easing::EaseOutCubic;
pub const CAPTION_FADE_DURATION: f32 = 0.3;
pub const TINT_FADE_DURATION: f32 = 0.4;
/// Easing for overlay fades
pub const FADE_EASING: Easing = Easing::EaseOutQuad;

/// Size of the visible viewport, in logical pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl EntranceDirection {
    /// Properties a tile starts its entrance from, given its final placement
    pub fn start_offset(self, placed: &GridItem, viewport: Viewport) -> PropertyMap {
        let mut from = PropertyMap::opacity(0.0);
        match self {
            EntranceDirection::Bottom => from.y = Some(viewport.height + 100.0),
            EntranceDirection::Top => from.y = Some(-200.0),
            EntranceDirection::Left => from.x = Some(-200.0),
            EntranceDirection::Right => from.x = Some(viewport.width + 200.0),
            EntranceDirection::Fade => from.y = Some(placed.y + 100.0),
        }
        from
    }
}

/// Start and end properties of a tile's entrance animation
pub fn entrance(
    config: &LayoutConfig,
    placed: &GridItem,
    viewport: Viewport,
) -> (PropertyMap, PropertyMap) {
    let mut from = config.entrance_direction.start_offset(placed, viewport);
    if config.blur_on_entrance_enabled {
        from = from.with_blur(ENTRANCE_BLUR_PX);
    }
    let to = PropertyMap::position(placed.x, placed.y)
        .with_opacity(1.0)
        .with_blur(0.0);
    (from, to)
}

/// Timing of the entrance animations of one pass, staggered by creation index
pub fn entrance_options(config: &LayoutConfig) -> TweenOptions {
    TweenOptions::new(ENTRANCE_DURATION, ENTRANCE_EASING)
        .with_stagger(config.stagger_seconds)
}

/// Final position and size of a tile
pub fn placement(placed: &GridItem) -> PropertyMap {
    PropertyMap::rect(placed.x, placed.y, placed.w, placed.h)
}

/// Hover scale tween, if hover scaling is enabled
pub fn hover_scale(config: &LayoutConfig, hovered: bool) -> Option<(PropertyMap, TweenOptions)> {
    if !config.hover_scale_enabled {
        return None;
    }
    let scale = if hovered { config.hover_scale_factor } else { 1.0 };
    Some((
        PropertyMap::scale(scale),
        TweenOptions::new(HOVER_SCALE_DURATION, HOVER_SCALE_EASING),
    ))
}

/// Overlay fade for the caption and tint layers
pub fn overlay_fade(hovered: bool, duration: f32) -> (PropertyMap, TweenOptions) {
    let opacity = if hovered { 1.0 } else { 0.0 };
    (
        PropertyMap::opacity(opacity),
        TweenOptions::new(duration, FADE_EASING),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mason_animation::Property;

    fn placed() -> GridItem {
        GridItem {
            id: "a".into(),
            x: 327.0,
            y: 175.5,
            w: 303.0,
            h: 227.25,
        }
    }

    #[test]
    fn test_entrance_offsets() {
        let viewport = Viewport::new(1280.0, 800.0);
        let cases = [
            (EntranceDirection::Bottom, Property::Y, 900.0),
            (EntranceDirection::Top, Property::Y, -200.0),
            (EntranceDirection::Left, Property::X, -200.0),
            (EntranceDirection::Right, Property::X, 1480.0),
            (EntranceDirection::Fade, Property::Y, 275.5),
        ];
        for (direction, property, expected) in cases {
            let from = direction.start_offset(&placed(), viewport);
            assert_eq!(from.get(property), Some(expected), "{direction:?}");
            assert_eq!(from.get(Property::Opacity), Some(0.0));
        }
    }

    #[test]
    fn test_entrance_blur_is_optional() {
        let mut config = LayoutConfig::default();
        let (from, to) = entrance(&config, &placed(), Viewport::new(1280.0, 800.0));
        assert_eq!(from.get(Property::Blur), Some(ENTRANCE_BLUR_PX));
        assert_eq!(to, PropertyMap::position(327.0, 175.5).with_opacity(1.0).with_blur(0.0));

        config.blur_on_entrance_enabled = false;
        let (from, _) = entrance(&config, &placed(), Viewport::new(1280.0, 800.0));
        assert_eq!(from.get(Property::Blur), None);
    }

    #[test]
    fn test_entrance_stagger() {
        let mut config = LayoutConfig::default();
        config.stagger_seconds = 0.2;
        let options = entrance_options(&config);
        assert_eq!(options.delay, 0.0);
        assert_eq!(options.stagger, 0.2);
        assert_eq!(options.duration, ENTRANCE_DURATION);
        assert_eq!(options.easing, ENTRANCE_EASING);
    }

    #[test]
    fn test_hover_scale_respects_config() {
        let mut config = LayoutConfig::default();
        let (to, options) = hover_scale(&config, true).unwrap();
        assert_eq!(to.get(Property::Scale), Some(0.95));
        assert_eq!(options.duration, HOVER_SCALE_DURATION);
        assert_eq!(hover_scale(&config, false).unwrap().0.get(Property::Scale), Some(1.0));

        config.hover_scale_enabled = false;
        assert!(hover_scale(&config, true).is_none());
    }
}
