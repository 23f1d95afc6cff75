//! An isometric diamond tile map: a rectangular grid of tile indices
//! projected onto screen diamonds, with a keyboard-steerable cursor
//! whose tile is drawn with a highlight cell from the tileset.

use crate::sprites::{SheetRegion, Transform};
use ultraviolet::Vec2;

/// A single row of `count` diamond cells in a tileset texture, plus
/// the index of the cell used to highlight the cursor's tile.
#[derive(Clone, Copy, Debug)]
pub struct Tileset {
    tile_w: u16,
    tile_h: u16,
    count: u8,
    highlight: u8,
}

impl Tileset {
    pub fn new(tile_w: u16, tile_h: u16, count: u8, highlight: u8) -> Self {
        assert!(count > 0, "A tileset needs at least one tile");
        assert!(
            highlight < count,
            "Highlight tile must be one of the tileset's tiles"
        );
        Self {
            tile_w,
            tile_h,
            count,
            highlight,
        }
    }
    /// The sheet cell for the given tile index.
    pub fn region(&self, index: u8) -> SheetRegion {
        assert!(index < self.count, "Tile index out of range");
        SheetRegion::new(index as u16 * self.tile_w, 0, 0, self.tile_w, self.tile_h)
    }
    pub fn highlight_region(&self) -> SheetRegion {
        self.region(self.highlight)
    }
    pub fn tile_size(&self) -> (u16, u16) {
        (self.tile_w, self.tile_h)
    }
    pub fn tile_count(&self) -> u8 {
        self.count
    }
}

/// A `width` by `height` grid of tile indices with a world-space
/// origin for tile (0, 0).  Grid i grows toward the lower right of
/// the diamond, j toward the lower left.
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Box<[u8]>,
    tileset: Tileset,
    origin: Vec2,
}

impl TileMap {
    pub fn new(
        width: usize,
        height: usize,
        tiles: impl IntoIterator<Item = u8>,
        tileset: Tileset,
        origin: Vec2,
    ) -> Self {
        let tiles: Vec<u8> = tiles.into_iter().collect();
        assert_eq!(
            tiles.len(),
            width * height,
            "Not the right number of tiles for the given width and height"
        );
        assert!(
            tiles.iter().all(|&t| t < tileset.tile_count()),
            "Map references a tile the tileset doesn't have"
        );
        Self {
            width,
            height,
            tiles: tiles.into_boxed_slice(),
            tileset,
            origin,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }
    pub fn get(&self, i: usize, j: usize) -> Option<u8> {
        if i < self.width && j < self.height {
            self.tiles.get(j * self.width + i).copied()
        } else {
            None
        }
    }
    pub fn set(&mut self, i: usize, j: usize, tile: u8) {
        assert!(tile < self.tileset.tile_count(), "Tile index out of range");
        if i < self.width && j < self.height {
            self.tiles[j * self.width + i] = tile;
        }
    }
    /// Project grid coordinates onto the screen diamond: moving in i
    /// steps half a tile right and down, moving in j half a tile left
    /// and down.
    pub fn grid_to_screen(&self, i: usize, j: usize) -> Vec2 {
        let (tw, th) = self.tileset.tile_size();
        Vec2::new(
            (i as f32 - j as f32) * tw as f32 / 2.0 + self.origin.x,
            self.origin.y - (i as f32 + j as f32) * th as f32 / 2.0,
        )
    }
    /// How many sprites [`TileMap::fill`] writes: one per tile.
    pub fn sprite_count(&self) -> usize {
        self.width * self.height
    }
    /// Write one sprite per tile into a sprite group's slices.  The
    /// cursor's tile uses the tileset's highlight cell.  Rows nearer
    /// the viewer (larger `i + j`) get smaller depths so they paint
    /// over the rows behind them.
    pub fn fill(&self, cursor: &Cursor, trfs: &mut [Transform], uvs: &mut [SheetRegion]) {
        assert!(
            trfs.len() >= self.sprite_count() && uvs.len() >= self.sprite_count(),
            "Sprite group is too small for this map"
        );
        let (tw, th) = self.tileset.tile_size();
        let rear = (self.width + self.height) as u16;
        for j in 0..self.height {
            for i in 0..self.width {
                let idx = j * self.width + i;
                let pos = self.grid_to_screen(i, j);
                trfs[idx] = Transform {
                    w: tw,
                    h: th,
                    x: pos.x,
                    y: pos.y,
                    rot: 0.0,
                };
                let region = if cursor.i == i && cursor.j == j {
                    self.tileset.highlight_region()
                } else {
                    self.tileset.region(self.tiles[idx])
                };
                uvs[idx] = region.with_depth(rear - (i + j) as u16);
            }
        }
    }
}

/// The selected grid cell.  Steps clamp each axis independently, so a
/// diagonal step at the map's edge still moves along the free axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub i: usize,
    pub j: usize,
}

impl Cursor {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
    pub fn step(&mut self, di: i32, dj: i32, map: &TileMap) {
        self.i = (self.i as i32 + di).clamp(0, map.width() as i32 - 1) as usize;
        self.j = (self.j as i32 + dj).clamp(0, map.height() as i32 - 1) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> TileMap {
        TileMap::new(
            3,
            3,
            [1, 4, 4, 1, 1, 4, 4, 4, 1],
            Tileset::new(128, 64, 7, 6),
            Vec2::new(400.0, 100.0),
        )
    }

    #[test]
    fn projection_steps_half_a_tile() {
        let map = diamond();
        assert_eq!(map.grid_to_screen(0, 0), Vec2::new(400.0, 100.0));
        assert_eq!(map.grid_to_screen(1, 0), Vec2::new(464.0, 68.0));
        assert_eq!(map.grid_to_screen(0, 1), Vec2::new(336.0, 68.0));
        // same row of the diamond: same y, a full tile apart in x
        assert_eq!(map.grid_to_screen(2, 0), Vec2::new(528.0, 36.0));
        assert_eq!(map.grid_to_screen(1, 1), Vec2::new(400.0, 36.0));
    }

    #[test]
    fn cursor_clamps_on_both_axes() {
        let map = diamond();
        let mut cursor = Cursor::new(1, 1);
        cursor.step(1, 1, &map);
        assert_eq!(cursor, Cursor::new(2, 2));
        cursor.step(1, 1, &map);
        assert_eq!(cursor, Cursor::new(2, 2));
        // a diagonal at the edge still moves along the free axis
        cursor.step(-1, 1, &map);
        assert_eq!(cursor, Cursor::new(1, 2));
        cursor.step(-5, -5, &map);
        assert_eq!(cursor, Cursor::new(0, 0));
    }

    #[test]
    fn fill_highlights_the_cursor_tile() {
        let map = diamond();
        let mut trfs = vec![Transform::default(); map.sprite_count()];
        let mut uvs = vec![SheetRegion::default(); map.sprite_count()];
        map.fill(&Cursor::new(1, 1), &mut trfs, &mut uvs);
        let highlight = map.tileset().highlight_region();
        assert_eq!((uvs[4].x, uvs[4].y), (highlight.x, highlight.y));
        // a non-cursor tile shows its map index
        assert_eq!(uvs[1].x, 4 * 128);
    }

    #[test]
    fn nearer_rows_paint_over_farther_ones() {
        let map = diamond();
        let mut trfs = vec![Transform::default(); map.sprite_count()];
        let mut uvs = vec![SheetRegion::default(); map.sprite_count()];
        map.fill(&Cursor::new(0, 0), &mut trfs, &mut uvs);
        // depth strictly decreases as i + j grows
        assert!(uvs[0].depth > uvs[1].depth);
        assert!(uvs[1].depth > uvs[4].depth);
        assert!(uvs[4].depth > uvs[8].depth);
    }

    #[test]
    #[should_panic(expected = "Not the right number of tiles")]
    fn wrong_tile_count_is_rejected() {
        TileMap::new(
            3,
            3,
            [1, 2, 3],
            Tileset::new(128, 64, 7, 6),
            Vec2::zero(),
        );
    }
}
