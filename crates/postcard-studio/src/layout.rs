//! Collage layout
//!
//! Arranges the gallery on the postcard: the card's aspect ratio comes from the
//! chosen size and orientation, the grid shape from the number of photos.

use postcard_core::{AssetId, ImageAsset, Orientation, PostcardSize};
use serde::Serialize;

/// Grid shape for a given photo count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridShape {
    /// Nothing to show yet
    Empty,
    Grid { columns: u8, rows: u8 },
}

impl GridShape {
    pub fn for_count(count: usize, orientation: Orientation) -> Self {
        let (columns, rows) = match count {
            0 => return GridShape::Empty,
            1 => (1, 1),
            2 => match orientation {
                Orientation::Landscape => (2, 1),
                Orientation::Portrait => (1, 2),
            },
            3 | 4 => (2, 2),
            _ => (3, 2),
        };
        GridShape::Grid { columns, rows }
    }
}

/// One photo's place in the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutCell {
    pub id: AssetId,
    pub name: String,
    pub row_span: u8,
    pub col_span: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollageLayout {
    pub size: PostcardSize,
    pub orientation: Orientation,
    /// width / height of the card as displayed
    pub aspect_ratio: f64,
    pub grid: GridShape,
    /// Cells in gallery order
    pub cells: Vec<LayoutCell>,
}

impl CollageLayout {
    pub fn compute(size: PostcardSize, orientation: Orientation, assets: &[ImageAsset]) -> Self {
        let ratio = size.config().ratio;
        let aspect_ratio = match orientation {
            Orientation::Landscape => 1.0 / ratio,
            Orientation::Portrait => ratio,
        };

        let feature_first = assets.len() == 3;
        let cells = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| {
                let (row_span, col_span) = match (feature_first && index == 0, orientation) {
                    (true, Orientation::Landscape) => (2, 1),
                    (true, Orientation::Portrait) => (1, 2),
                    (false, _) => (1, 1),
                };
                LayoutCell {
                    id: asset.id,
                    name: asset.name.clone(),
                    row_span,
                    col_span,
                }
            })
            .collect();

        Self {
            size,
            orientation,
            aspect_ratio,
            grid: GridShape::for_count(assets.len(), orientation),
            cells,
        }
    }

    /// Number of cells the grid offers (0 for an empty card)
    pub fn capacity(&self) -> usize {
        match self.grid {
            GridShape::Empty => 0,
            GridShape::Grid { columns, rows } => columns as usize * rows as usize,
        }
    }

    /// Photos beyond the grid's capacity are not shown on the card
    pub fn visible_cells(&self) -> &[LayoutCell] {
        let occupied_by_first = self
            .cells
            .first()
            .map(|c| (c.row_span as usize * c.col_span as usize).saturating_sub(1))
            .unwrap_or(0);
        let visible = self.capacity().saturating_sub(occupied_by_first);
        &self.cells[..self.cells.len().min(visible)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(n: usize) -> Vec<ImageAsset> {
        (0..n).map(|i| ImageAsset::placeholder(format!("{}.png", i))).collect()
    }

    #[test]
    fn test_aspect_ratio_follows_orientation() {
        let landscape = CollageLayout::compute(PostcardSize::Size4x6, Orientation::Landscape, &[]);
        assert!((landscape.aspect_ratio - 1.5).abs() < 1e-9);

        let portrait = CollageLayout::compute(PostcardSize::Size4x6, Orientation::Portrait, &[]);
        assert!((portrait.aspect_ratio - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(portrait.grid, GridShape::Empty);
        assert_eq!(portrait.capacity(), 0);
    }

    #[test]
    fn test_grid_shapes() {
        use Orientation::*;
        assert_eq!(GridShape::for_count(1, Landscape), GridShape::Grid { columns: 1, rows: 1 });
        assert_eq!(GridShape::for_count(2, Landscape), GridShape::Grid { columns: 2, rows: 1 });
        assert_eq!(GridShape::for_count(2, Portrait), GridShape::Grid { columns: 1, rows: 2 });
        assert_eq!(GridShape::for_count(3, Portrait), GridShape::Grid { columns: 2, rows: 2 });
        assert_eq!(GridShape::for_count(4, Landscape), GridShape::Grid { columns: 2, rows: 2 });
        assert_eq!(GridShape::for_count(9, Landscape), GridShape::Grid { columns: 3, rows: 2 });
    }

    #[test]
    fn test_three_photos_feature_the_first() {
        let photos = assets(3);
        let landscape = CollageLayout::compute(PostcardSize::Size5x7, Orientation::Landscape, &photos);
        assert_eq!((landscape.cells[0].row_span, landscape.cells[0].col_span), (2, 1));
        assert_eq!((landscape.cells[1].row_span, landscape.cells[1].col_span), (1, 1));
        assert_eq!(landscape.visible_cells().len(), 3);

        let portrait = CollageLayout::compute(PostcardSize::Size5x7, Orientation::Portrait, &photos);
        assert_eq!((portrait.cells[0].row_span, portrait.cells[0].col_span), (1, 2));
    }

    #[test]
    fn test_cells_keep_gallery_order() {
        let photos = assets(4);
        let layout = CollageLayout::compute(PostcardSize::Size6x9, Orientation::Landscape, &photos);
        let ids: Vec<_> = layout.cells.iter().map(|c| c.id).collect();
        let expected: Vec<_> = photos.iter().map(|a| a.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_overflow_is_hidden() {
        let layout = CollageLayout::compute(PostcardSize::Size6x11, Orientation::Landscape, &assets(8));
        assert_eq!(layout.cells.len(), 8);
        assert_eq!(layout.visible_cells().len(), 6);
    }
}
