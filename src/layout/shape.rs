use kurbo::{BezPath, Point};

/// The five fixed vertical breakpoints shared by the three panels.
///
/// Panel `i` spans `(BREAKPOINTS[i], BREAKPOINTS[i + 2])`, so adjacent panels
/// share their boundary at y = 0.3 and y = 0.7.
pub const BREAKPOINTS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

/// Geometry strategy for the triangular panel outline.
///
/// Both strategies consume the same `(x, y1, y2)` parameters; the banner
/// variant selects [`PanelPathStrategy::Rotated`] and everything else in the
/// draw routine stays unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelPathStrategy {
    /// Poster geometry: two vertices on the vertical edge at `x`, apex on the
    /// opposite edge at `1 - x`, vertically centered between `y1` and `y2`.
    Pointed,
    /// Banner geometry: the same triangle with the axis roles swapped and the
    /// anchor side mirrored.
    Rotated,
}

impl PanelPathStrategy {
    /// Closed triangular outline for one panel, in normalized coordinates.
    ///
    /// `x` is 0 for a left-anchored (right-pointing) panel and 1 for a
    /// right-anchored (left-pointing) one; `y1 < y2` are the panel's edge
    /// breakpoints.
    pub fn panel_path(self, x: f64, y1: f64, y2: f64) -> BezPath {
        let mid = (y1 + y2) / 2.0;
        let (a, b, c) = match self {
            PanelPathStrategy::Pointed => {
                (Point::new(x, y1), Point::new(1.0 - x, mid), Point::new(x, y2))
            }
            PanelPathStrategy::Rotated => (
                Point::new(y1, 1.0 - x),
                Point::new(mid, x),
                Point::new(y2, 1.0 - x),
            ),
        };

        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
        path
    }

    /// Reference point a clipped backdrop image is translated to before
    /// painting: the panel's top corner on its anchor edge.
    pub fn image_origin(self, y1: f64) -> Point {
        match self {
            PanelPathStrategy::Pointed => Point::new(0.0, y1),
            PanelPathStrategy::Rotated => Point::new(y1, 0.0),
        }
    }
}
