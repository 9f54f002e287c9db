//! Gallery items
//!
//! Items are the caller-supplied input of the engine. Field names on the wire
//! follow the gallery markup: `id`, `type`, `src`, `title`, `height`, `url`.

use crate::error::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative height used when an item does not carry a usable one
pub const DEFAULT_RELATIVE_HEIGHT: f32 = 300.0;

/// Stable identity of an item across layout passes
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id given to an item that arrived without one
    pub fn fallback(index: usize) -> Self {
        Self(format!("item-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// One gallery entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(rename = "type", default)]
    pub media_kind: MediaKind,
    #[serde(rename = "src")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Height relative to a 400px wide reference column
    #[serde(rename = "height", default = "default_relative_height")]
    pub relative_height: f32,
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn default_relative_height() -> f32 {
    DEFAULT_RELATIVE_HEIGHT
}

impl Item {
    pub fn new(id: impl Into<ItemId>, media_kind: MediaKind, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_kind,
            source: source.into(),
            title: None,
            relative_height: DEFAULT_RELATIVE_HEIGHT,
            link: None,
        }
    }

    pub fn image(id: impl Into<ItemId>, source: impl Into<String>) -> Self {
        Self::new(id, MediaKind::Image, source)
    }

    pub fn video(id: impl Into<ItemId>, source: impl Into<String>) -> Self {
        Self::new(id, MediaKind::Video, source)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_height(mut self, relative_height: f32) -> Self {
        self.relative_height = relative_height;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Relative height used for packing; non-positive or non-finite values
    /// fall back to the default
    pub fn effective_height(&self) -> f32 {
        if self.relative_height.is_finite() && self.relative_height > 0.0 {
            self.relative_height
        } else {
            DEFAULT_RELATIVE_HEIGHT
        }
    }
}

/// The engine's item list: ids filled in and unique, input order kept
#[derive(Clone, Debug, Default)]
pub struct ItemSet {
    items: Vec<Item>,
    index: FxHashMap<ItemId, usize>,
}

impl ItemSet {
    /// Normalize `items`: empty ids become `item-{index}` (position in the
    /// input), and later duplicates of an id are dropped.
    pub fn new(items: Vec<Item>) -> Self {
        let mut set = Self {
            items: Vec::with_capacity(items.len()),
            index: FxHashMap::default(),
        };

        for (position, mut item) in items.into_iter().enumerate() {
            if item.id.is_empty() {
                item.id = ItemId::fallback(position);
            }
            if set.index.contains_key(&item.id) {
                tracing::warn!("masonry: dropping duplicate item id `{}`", item.id);
                continue;
            }
            set.index.insert(item.id.clone(), set.items.len());
            set.items.push(item);
        }

        set
    }

    /// Parse a JSON array of items
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Ok(Self::new(items))
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let set = ItemSet::from_json(
            r#"[
                {"id": "hero", "type": "video", "src": "/clips/hero.mp4", "title": "Launch", "height": 420, "url": "https://example.com"},
                {"id": "still", "src": "/img/still.jpg"}
            ]"#,
        )
        .unwrap();

        let hero = set.get(&ItemId::from("hero")).unwrap();
        assert_eq!(hero.media_kind, MediaKind::Video);
        assert_eq!(hero.relative_height, 420.0);
        assert_eq!(hero.title.as_deref(), Some("Launch"));
        assert_eq!(hero.link.as_deref(), Some("https://example.com"));

        let still = set.get(&ItemId::from("still")).unwrap();
        assert_eq!(still.media_kind, MediaKind::Image);
        assert_eq!(still.relative_height, DEFAULT_RELATIVE_HEIGHT);
        assert_eq!(still.title, None);
    }

    #[test]
    fn test_missing_ids_get_positional_fallback() {
        let set = ItemSet::new(vec![
            Item::image("", "/a.jpg"),
            Item::image("b", "/b.jpg"),
            Item::image("", "/c.jpg"),
        ]);
        let ids: Vec<&str> = set.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["item-0", "b", "item-2"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let set = ItemSet::new(vec![
            Item::image("a", "/first.jpg"),
            Item::image("b", "/b.jpg"),
            Item::image("a", "/second.jpg"),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&ItemId::from("a")).unwrap().source, "/first.jpg");
    }

    #[test]
    fn test_effective_height_falls_back() {
        assert_eq!(Item::image("a", "x").with_height(0.0).effective_height(), 300.0);
        assert_eq!(Item::image("a", "x").with_height(-10.0).effective_height(), 300.0);
        assert_eq!(Item::image("a", "x").with_height(f32::NAN).effective_height(), 300.0);
        assert_eq!(Item::image("a", "x").with_height(250.0).effective_height(), 250.0);
    }
}
