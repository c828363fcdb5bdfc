//! Axis-aligned rectangles in world units
//!
//! Placeables are positioned by their center, like sprites, so a rectangle is
//! stored as center + size and the edges are derived. Y grows upwards: `top`
//! is the larger y value.

use serde::{Deserialize, Serialize};

/// Center-anchored axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn new(center: [f32; 2], size: [f32; 2]) -> Self {
        Self { center, size }
    }

    pub fn left(&self) -> f32 {
        self.center[0] - self.size[0] * 0.5
    }

    pub fn right(&self) -> f32 {
        self.center[0] + self.size[0] * 0.5
    }

    pub fn top(&self) -> f32 {
        self.center[1] + self.size[1] * 0.5
    }

    pub fn bottom(&self) -> f32 {
        self.center[1] - self.size[1] * 0.5
    }

    /// The same rectangle moved by `offset`
    pub fn translated(&self, offset: [f32; 2]) -> Self {
        Self {
            center: [self.center[0] + offset[0], self.center[1] + offset[1]],
            size: self.size,
        }
    }

    /// Width and height of the intersection with `other`. Either component
    /// is zero or negative when the rectangles are apart on that axis.
    pub fn intersection_extent(&self, other: &Rect) -> [f32; 2] {
        let width = self.right().min(other.right()) - self.left().max(other.left());
        let height = self.top().min(other.top()) - self.bottom().max(other.bottom());
        [width, height]
    }

    /// True when the intersection, shrunk by `margin` on every side, still
    /// has positive area. Touching or slightly overlapping neighbours (tiling
    /// seams) therefore do not count as a collision.
    pub fn overlaps_with_margin(&self, other: &Rect, margin: f32) -> bool {
        let [width, height] = self.intersection_extent(other);
        width - 2.0 * margin > 0.0 && height - 2.0 * margin > 0.0
    }

    /// True when `child` lies entirely inside `self` (edges may coincide)
    pub fn contains_rect(&self, child: &Rect) -> bool {
        self.left() <= child.left()
            && self.right() >= child.right()
            && self.top() >= child.top()
            && self.bottom() <= child.bottom()
    }

    /// True when the point lies inside or on the edge of the rectangle
    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        point[0] >= self.left()
            && point[0] <= self.right()
            && point[1] >= self.bottom()
            && point[1] <= self.top()
    }
}

/// Snap a coordinate down to the half-unit grid (`floor(v * 2) / 2`)
pub fn snap_to_half_unit(value: f32) -> f32 {
    (value * 2.0).floor() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new([1.0, 2.0], [4.0, 2.0]);
        assert_eq!(rect.left(), -1.0);
        assert_eq!(rect.right(), 3.0);
        assert_eq!(rect.top(), 3.0);
        assert_eq!(rect.bottom(), 1.0);
    }

    #[test]
    fn test_adjacent_rects_do_not_overlap() {
        let a = Rect::new([0.0, 0.0], [2.0, 2.0]);
        let b = Rect::new([2.0, 0.0], [2.0, 2.0]);
        assert!(!a.overlaps_with_margin(&b, 0.03));

        // a seam smaller than the margin is tolerated
        let c = Rect::new([1.98, 0.0], [2.0, 2.0]);
        assert!(!a.overlaps_with_margin(&c, 0.03));

        let d = Rect::new([1.5, 0.0], [2.0, 2.0]);
        assert!(a.overlaps_with_margin(&d, 0.03));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rect::new([0.0, 0.0], [4.0, 4.0]),
            Rect::new([3.0, 3.0], [4.0, 4.0]),
            Rect::new([0.0, 0.0], [0.05, 0.05]),
            Rect::new([-10.0, 0.0], [1.0, 30.0]),
            Rect::new([1.97, 0.0], [0.1, 0.1]),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.overlaps_with_margin(b, 0.03), b.overlaps_with_margin(a, 0.03));
            }
        }
    }

    #[test]
    fn test_contains_rect() {
        let room = Rect::new([0.0, 0.0], [4.0, 4.0]);
        assert!(room.contains_rect(&Rect::new([0.0, 0.0], [1.0, 1.0])));
        assert!(room.contains_rect(&Rect::new([1.5, -1.5], [1.0, 1.0])));
        assert!(!room.contains_rect(&Rect::new([2.0, 2.0], [1.0, 1.0])));
        assert!(!room.contains_rect(&Rect::new([0.0, 0.0], [5.0, 1.0])));
    }

    #[test]
    fn test_snap_to_half_unit() {
        assert_eq!(snap_to_half_unit(1.23), 1.0);
        assert_eq!(snap_to_half_unit(4.77), 4.5);
        assert_eq!(snap_to_half_unit(-0.2), -0.5);
        assert_eq!(snap_to_half_unit(2.5), 2.5);
    }
}
