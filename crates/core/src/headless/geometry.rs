use crate::host::{ObserveOptions, RootMargin};

/// Axis-aligned rectangle in document coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Grows the rect by the margin; negative margins shrink it.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        Rect::new(
            self.x - margin.left,
            self.y - margin.top,
            self.width + margin.left + margin.right,
            self.height + margin.top + margin.bottom,
        )
    }
}

/// Share of `target` visible inside `root`, in `[0, 1]`.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    let area = target.area();
    if area <= 0.0 {
        return 0.0;
    }
    target
        .intersect(root)
        .map(|i| (i.area() / area).min(1.0))
        .unwrap_or(0.0)
}

pub fn is_intersecting(ratio: f64, options: &ObserveOptions) -> bool {
    ratio > 0.0 && ratio >= options.threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_bottom_margin_shrinks_the_viewport() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let shrunk = viewport.expand(&RootMargin::bottom(-50.0));
        assert_eq!(shrunk.bottom(), 750.0);
        assert_eq!(shrunk.y, 0.0);
    }

    #[test]
    fn ratio_is_overlap_over_target_area() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let half_in = Rect::new(0.0, 50.0, 100.0, 100.0);
        assert!((intersection_ratio(&half_in, &root) - 0.5).abs() < 1e-9);

        let outside = Rect::new(0.0, 200.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&outside, &root), 0.0);

        let empty = Rect::new(0.0, 10.0, 0.0, 0.0);
        assert_eq!(intersection_ratio(&empty, &root), 0.0);
    }

    #[test]
    fn threshold_gates_intersection() {
        let opts = ObserveOptions {
            threshold: 0.1,
            root_margin: RootMargin::default(),
        };
        assert!(!is_intersecting(0.05, &opts));
        assert!(is_intersecting(0.1, &opts));
        assert!(!is_intersecting(0.0, &ObserveOptions::default()));
        assert!(is_intersecting(0.01, &ObserveOptions::default()));
    }
}
