// Axis-aligned box tests shared by entity blocking and projectile hits.

/// Axis-aligned box with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized box, used for projectile hit tests.
    pub fn point(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Returns true when `a` and `b` come within `margin` of each other on both axes.
///
/// The margin is applied once per pair, so two boxes separated by less than
/// `margin` still count as touching. Symmetric in its arguments.
pub fn overlaps(a: &Rect, b: &Rect, margin: f32) -> bool {
    a.x < b.x + b.width + margin
        && a.x + a.width > b.x - margin
        && a.y < b.y + b.height + margin
        && a.y + a.height > b.y - margin
}

/// Point-in-inflated-box test; the degenerate case of [`overlaps`].
pub fn contains_point(rect: &Rect, x: f32, y: f32, margin: f32) -> bool {
    overlaps(&Rect::point(x, y), rect, margin)
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: f32 = 5.0;

    #[test]
    fn boxes_within_margin_are_touching() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        // 4 units of visible gap: still inside the 5 unit slack.
        let b = Rect::new(44.0, 0.0, 40.0, 40.0);
        assert!(overlaps(&a, &b, MARGIN));
    }

    #[test]
    fn boxes_beyond_margin_are_apart() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(45.0, 0.0, 40.0, 40.0);
        assert!(!overlaps(&a, &b, MARGIN));

        let below = Rect::new(0.0, 45.0, 40.0, 40.0);
        assert!(!overlaps(&a, &below, MARGIN));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (Rect::new(0.0, 0.0, 40.0, 40.0), Rect::new(44.0, 10.0, 40.0, 40.0)),
            (Rect::new(0.0, 0.0, 40.0, 40.0), Rect::new(45.0, 0.0, 40.0, 40.0)),
            (Rect::new(100.0, 100.0, 40.0, 40.0), Rect::new(60.0, 139.0, 10.0, 10.0)),
            (Rect::new(10.0, 10.0, 0.0, 0.0), Rect::new(0.0, 0.0, 40.0, 40.0)),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b, MARGIN), overlaps(&b, &a, MARGIN));
        }
    }

    #[test]
    fn point_hits_inflated_box() {
        let target = Rect::new(600.0, 0.0, 40.0, 40.0);
        assert!(contains_point(&target, 596.0, 20.0, MARGIN));
        assert!(!contains_point(&target, 595.0, 20.0, MARGIN));
        assert!(contains_point(&target, 644.0, 44.0, MARGIN));
        assert!(!contains_point(&target, 645.0, 20.0, MARGIN));
    }

    #[test]
    fn distance_between_centers() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0).center();
        let b = Rect::new(30.0, 40.0, 40.0, 40.0).center();
        assert_eq!(distance(a, b), 50.0);
    }
}
