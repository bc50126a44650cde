//! # Collision Gate
//!
//! Approves or rejects a proposed hitbox position. A move is legal when the
//! hitbox stands on walkable pixels at all nine sample points and does not
//! overlap any building footprint.

use crate::game::{PixelRect, WalkabilityOracle};

/// The nine points of a rectangle checked for walkability: centre, four
/// corners, four edge midpoints. Right and bottom samples are inset by one
/// pixel so every point lies inside the rectangle.
pub fn sample_points(rect: &PixelRect) -> [(i32, i32); 9] {
    let (left, top) = (rect.left(), rect.top());
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    let (cx, cy) = (rect.center_x(), rect.center_y());
    [
        (cx, cy),
        (left, top),
        (right, top),
        (left, bottom),
        (right, bottom),
        (cx, top),
        (cx, bottom),
        (left, cy),
        (right, cy),
    ]
}

/// Movement legality check over the walkability oracle and static colliders.
#[derive(Debug, Clone, Copy)]
pub struct CollisionGate<'a> {
    oracle: WalkabilityOracle<'a>,
    colliders: &'a [PixelRect],
}

impl<'a> CollisionGate<'a> {
    pub fn new(oracle: WalkabilityOracle<'a>, colliders: &'a [PixelRect]) -> Self {
        Self { oracle, colliders }
    }

    /// Whether every sample point of `candidate` is walkable.
    pub fn can_move(&self, candidate: &PixelRect) -> bool {
        sample_points(candidate)
            .iter()
            .all(|&(x, y)| self.oracle.is_walkable(x, y))
    }

    /// Whether `candidate` overlaps any building collider.
    pub fn collides_with_building(&self, candidate: &PixelRect) -> bool {
        self.colliders
            .iter()
            .any(|collider| candidate.intersects(collider))
    }

    /// Whether the actor may occupy `candidate`.
    ///
    /// The whole displacement is judged at once: there is no per-axis
    /// sliding, so a diagonal move into a corner is fully blocked.
    pub fn approves(&self, candidate: &PixelRect) -> bool {
        self.can_move(candidate) && !self.collides_with_building(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::walkability::tests::solid_image;
    use crate::game::{MacroTable, TileCatalog, TileMap};

    const DIRT: (u8, u8, u8) = (140, 110, 60);
    const GRASS: (u8, u8, u8) = (30, 160, 40);

    /// 3x3 map of 64 pixel tiles: a dirt cross on grass, with tile 9 left
    /// without an image in the bottom-right corner.
    fn fixture() -> (TileMap, TileCatalog) {
        let map =
            TileMap::from_template(&["2 1 2", "1 1 1", "2 1 9"], &MacroTable::new(), 2, 64).unwrap();
        let mut tiles = TileCatalog::new();
        tiles.insert(1, solid_image(16, DIRT));
        tiles.insert(2, solid_image(16, GRASS));
        (map, tiles)
    }

    #[test]
    fn test_sample_points_stay_inside() {
        let rect = PixelRect::new(10, 20, 8, 4);
        let points = sample_points(&rect);
        assert_eq!(points[0], (14, 22));
        assert!(points.contains(&(17, 23)));
        for (x, y) in points {
            assert!(rect.contains_point(x, y), "({}, {}) outside {:?}", x, y, rect);
        }
    }

    #[test]
    fn test_hitbox_inside_path_is_accepted() {
        let (map, tiles) = fixture();
        let oracle = WalkabilityOracle::new(&map, &tiles);
        let gate = CollisionGate::new(oracle, &[]);
        // spans the centre tile and the path tile to its right
        assert!(gate.approves(&PixelRect::new(70, 80, 100, 20)));
    }

    #[test]
    fn test_single_grass_sample_rejects_move() {
        let (map, tiles) = fixture();
        let oracle = WalkabilityOracle::new(&map, &tiles);
        let gate = CollisionGate::new(oracle, &[]);
        // top-left corner pokes into the grass tile at (0, 0)
        assert!(!gate.can_move(&PixelRect::new(63, 63, 20, 20)));
        assert!(gate.can_move(&PixelRect::new(64, 63, 20, 20)));
    }

    #[test]
    fn test_unregistered_tile_rejects_move() {
        let (map, tiles) = fixture();
        let oracle = WalkabilityOracle::new(&map, &tiles);
        let gate = CollisionGate::new(oracle, &[]);
        // bottom-right corner lands on tile 9 which has no image
        assert!(!gate.can_move(&PixelRect::new(100, 100, 30, 30)));
    }

    #[test]
    fn test_leaving_the_map_is_rejected() {
        let (map, tiles) = fixture();
        let oracle = WalkabilityOracle::new(&map, &tiles);
        let gate = CollisionGate::new(oracle, &[]);
        assert!(!gate.can_move(&PixelRect::new(80, -1, 20, 20)));
    }

    #[test]
    fn test_building_collider_blocks_walkable_move() {
        let (map, tiles) = fixture();
        let oracle = WalkabilityOracle::new(&map, &tiles);
        let colliders = [PixelRect::new(90, 90, 10, 10)];
        let gate = CollisionGate::new(oracle, &colliders);
        let candidate = PixelRect::new(70, 80, 30, 20);
        assert!(gate.can_move(&candidate));
        assert!(gate.collides_with_building(&candidate));
        assert!(!gate.approves(&candidate));
        // touching the collider edge is not an overlap
        assert!(gate.approves(&PixelRect::new(70, 70, 20, 20)));
    }
}
