//! Masonry geometry
//!
//! Column count from the viewport width, and greedy shortest-column packing of
//! items into columns of equal width.
//!
//! Tile heights scale with the column width against a 400px reference column
//! (`relative_height / 400 * column_width`); the media's own aspect ratio is
//! not consulted.

use crate::item::{Item, ItemId};
use serde::Serialize;

/// Column width that `Item::relative_height` is expressed against
pub const REFERENCE_COLUMN_WIDTH: f32 = 400.0;

/// Minimum viewport widths and their column counts, widest first
pub const BREAKPOINTS: [(f32, usize); 3] = [(1500.0, 4), (1000.0, 3), (600.0, 2)];

/// Number of columns for a viewport of `viewport_width` logical pixels
pub fn resolve_column_count(viewport_width: f32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min_width, _)| viewport_width >= *min_width)
        .map_or(1, |(_, columns)| *columns)
}

/// Width of one column, clamped to zero when the gaps alone exceed the
/// container. The flag reports whether clamping happened.
pub fn column_width(container_width: f32, column_count: usize, gap: f32) -> (f32, bool) {
    let columns = column_count.max(1) as f32;
    let container_width = if container_width.is_finite() {
        container_width
    } else {
        0.0
    };
    let width = (container_width - gap * (columns - 1.0)) / columns;
    if width < 0.0 {
        (0.0, true)
    } else {
        (width, false)
    }
}

/// Placement of one item, in container-local pixels
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridItem {
    pub id: ItemId,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Result of one packing pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    /// One entry per input item, in input order
    pub items: Vec<GridItem>,
    pub columns: usize,
    pub column_width: f32,
    /// Final height of each column, trailing gap included
    pub column_heights: Vec<f32>,
    pub container_height: f32,
    /// The container was narrower than its gaps; columns have zero width
    pub degenerate: bool,
}

impl Layout {
    pub fn get(&self, id: &ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// Index of the shortest column; ties go to the lowest index
fn shortest_column(heights: &[f32]) -> usize {
    let mut index = 0;
    let mut best = heights.first().copied().unwrap_or(0.0);
    for (i, height) in heights.iter().enumerate().skip(1) {
        if *height < best {
            best = *height;
            index = i;
        }
    }
    index
}

/// Pack `items` into `column_count` columns of a `container_width` wide
/// container separated by `gap` pixels.
///
/// Items are placed in input order, each into the currently shortest column.
/// A column count of zero is treated as one.
pub fn compute_layout(
    items: &[Item],
    container_width: f32,
    column_count: usize,
    gap: f32,
) -> Layout {
    let columns = column_count.max(1);
    let (column_width, degenerate) = column_width(container_width, columns, gap);
    if degenerate {
        tracing::debug!(
            "masonry: container width {} cannot fit {} gaps of {}px, collapsing columns",
            container_width,
            columns - 1,
            gap
        );
    }

    let mut column_heights = vec![0.0_f32; columns];
    let grid_items = items
        .iter()
        .map(|item| {
            let column = shortest_column(&column_heights);
            let x = column as f32 * (column_width + gap);
            let y = column_heights[column];
            let h = item.effective_height() / REFERENCE_COLUMN_WIDTH * column_width;

            column_heights[column] += h + gap;

            GridItem {
                id: item.id.clone(),
                x,
                y,
                w: column_width,
                h,
            }
        })
        .collect();

    let container_height = column_heights.iter().copied().fold(0.0_f32, f32::max);

    Layout {
        items: grid_items,
        columns,
        column_width,
        column_heights,
        container_height,
        degenerate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(heights: &[(&str, f32)]) -> Vec<Item> {
        heights
            .iter()
            .map(|(id, height)| Item::image(*id, format!("/{id}.jpg")).with_height(*height))
            .collect()
    }

    #[test]
    fn test_breakpoint_boundaries() {
        assert_eq!(resolve_column_count(599.0), 1);
        assert_eq!(resolve_column_count(600.0), 2);
        assert_eq!(resolve_column_count(999.0), 2);
        assert_eq!(resolve_column_count(1000.0), 3);
        assert_eq!(resolve_column_count(1499.0), 3);
        assert_eq!(resolve_column_count(1500.0), 4);
        assert_eq!(resolve_column_count(3840.0), 4);
        assert_eq!(resolve_column_count(0.0), 1);
    }

    #[test]
    fn test_two_column_scenario() {
        let items = items(&[("a", 400.0), ("b", 200.0), ("c", 300.0)]);
        let layout = compute_layout(&items, 630.0, 2, 24.0);

        assert_eq!(layout.column_width, 303.0);
        assert_eq!(
            layout.items,
            vec![
                GridItem {
                    id: "a".into(),
                    x: 0.0,
                    y: 0.0,
                    w: 303.0,
                    h: 303.0,
                },
                GridItem {
                    id: "b".into(),
                    x: 327.0,
                    y: 0.0,
                    w: 303.0,
                    h: 151.5,
                },
                GridItem {
                    id: "c".into(),
                    x: 327.0,
                    y: 175.5,
                    w: 303.0,
                    h: 227.25,
                },
            ]
        );
        assert_eq!(layout.column_heights, vec![327.0, 426.75]);
        assert_eq!(layout.container_height, 426.75);
        assert!(!layout.degenerate);
    }

    #[test]
    fn test_tie_breaks_to_lowest_column() {
        // After "a" and "b" both columns are 100 + gap tall
        let items = items(&[("a", 400.0), ("b", 400.0), ("c", 400.0)]);
        let layout = compute_layout(&items, 200.0, 2, 0.0);

        assert_eq!(layout.column_width, 100.0);
        let xs: Vec<f32> = layout.items.iter().map(|item| item.x).collect();
        assert_eq!(xs, vec![0.0, 100.0, 0.0]);
        assert_eq!(layout.items[2].y, 100.0);
    }

    #[test]
    fn test_container_height_is_tallest_column() {
        let items = items(&[
            ("a", 120.0),
            ("b", 480.0),
            ("c", 300.0),
            ("d", 260.0),
            ("e", 90.0),
            ("f", 610.0),
            ("g", 300.0),
        ]);
        for columns in 1..=5 {
            let layout = compute_layout(&items, 1180.0, columns, 16.0);
            let tallest = layout.column_heights.iter().copied().fold(0.0, f32::max);
            assert_eq!(layout.container_height, tallest);
            assert!(layout.column_heights.iter().all(|h| *h >= 0.0));
            assert_eq!(layout.column_heights.len(), columns);
        }
    }

    #[test]
    fn test_deterministic_and_width_stable() {
        let items = items(&[("a", 350.0), ("b", 210.0), ("c", 480.0), ("d", 300.0)]);
        let first = compute_layout(&items, 1240.0, 3, 24.0);
        let again = compute_layout(&items, 1240.0, 3, 24.0);
        assert_eq!(first, again);

        let narrow = compute_layout(&items, 700.0, 2, 24.0);
        assert_ne!(narrow.items, first.items);
        let back = compute_layout(&items, 1240.0, 3, 24.0);
        assert_eq!(back.items, first.items);
    }

    #[test]
    fn test_input_order_drives_placement() {
        let forward = compute_layout(&items(&[("a", 400.0), ("b", 100.0)]), 424.0, 2, 24.0);
        let reversed = compute_layout(&items(&[("b", 100.0), ("a", 400.0)]), 424.0, 2, 24.0);
        assert_eq!(forward.get(&"a".into()).unwrap().x, 0.0);
        assert_eq!(reversed.get(&"a".into()).unwrap().x, 224.0);
    }

    #[test]
    fn test_degenerate_width_clamps_to_zero() {
        let items = items(&[("a", 300.0), ("b", 300.0)]);
        let layout = compute_layout(&items, 40.0, 4, 24.0);

        assert!(layout.degenerate);
        assert_eq!(layout.column_width, 0.0);
        assert!(layout.items.iter().all(|item| item.w == 0.0 && item.h == 0.0));
        // Only gaps stack up
        assert_eq!(layout.items[1].x, 24.0);
        assert_eq!(layout.container_height, 24.0);
    }

    #[test]
    fn test_zero_columns_and_empty_items() {
        let layout = compute_layout(&items(&[("a", 400.0)]), 300.0, 0, 24.0);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.items[0].w, 300.0);

        let empty = compute_layout(&[], 1200.0, 3, 24.0);
        assert!(empty.items.is_empty());
        assert_eq!(empty.container_height, 0.0);
    }

    #[test]
    fn test_default_height_used_for_missing_weight() {
        let layout = compute_layout(&items(&[("a", 0.0)]), 400.0, 1, 0.0);
        assert_eq!(layout.items[0].h, 300.0);
    }
}
