use cgmath::Vector2;
use euclid::{Point2D, Rect, Size2D};

/// Control point offset ratio for approximating a 90° circular arc with a
/// cubic Bézier curve.
const PATH_KAPPA: f32 = 0.552284;

/// A path drawing command.
///
/// Each command consumes a fixed number of points from the point stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCommand {
    /// Jump to a point, starting a new contour (analogous to SVG M).
    MoveTo,
    /// Straight line to a point (analogous to SVG L).
    LineTo,
    /// Cubic Bézier curve with two control points (analogous to SVG C).
    CubicTo,
    /// Close the current contour (analogous to SVG Z).
    Close,
}

impl PathCommand {
    /// Returns the number of points this command consumes.
    pub fn point_count(self) -> usize {
        match self {
            PathCommand::MoveTo | PathCommand::LineTo => 1,
            PathCommand::CubicTo => 3,
            PathCommand::Close => 0,
        }
    }
}

/// Two-dimensional path storage: a command stream plus its point stream.
///
/// Reading the commands in order, each consumes its [PathCommand::point_count]
/// points; the total consumed always equals the length of the point stream.
/// A path with no commands is valid and has no bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    cmds: Vec<PathCommand>,
    pts: Vec<Vector2<f32>>,
}

impl PathData {
    /// Creates a new empty path.
    pub fn new() -> PathData {
        PathData {
            cmds: Vec::new(),
            pts: Vec::new(),
        }
    }

    /// Returns the command stream.
    pub fn commands(&self) -> &[PathCommand] {
        &self.cmds
    }

    /// Returns the point stream.
    pub fn points(&self) -> &[Vector2<f32>] {
        &self.pts
    }

    /// Clears all commands and points.
    pub fn reset(&mut self) {
        self.cmds.clear();
        self.pts.clear();
    }

    /// Reserves capacity for additional commands and points.
    ///
    /// This is a performance hint for batched appends, never a correctness
    /// requirement.
    pub fn grow(&mut self, cmd_count: usize, pt_count: usize) {
        self.cmds.reserve(cmd_count);
        self.pts.reserve(pt_count);
    }

    /// Starts a new contour at the given point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cmds.push(PathCommand::MoveTo);
        self.pts.push(Vector2::new(x, y));
    }

    /// Draws a straight line to the given point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.cmds.push(PathCommand::LineTo);
        self.pts.push(Vector2::new(x, y));
    }

    /// Draws a cubic Bézier curve through two control points to an end point.
    pub fn cubic_to(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) {
        self.cmds.push(PathCommand::CubicTo);
        self.pts.push(Vector2::new(cx1, cy1));
        self.pts.push(Vector2::new(cx2, cy2));
        self.pts.push(Vector2::new(x, y));
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        self.cmds.push(PathCommand::Close);
    }

    /// Bulk-appends matching command and point streams. Returns false and
    /// leaves the path untouched if the point total implied by `cmds` does
    /// not equal `pts.len()`.
    pub fn append(&mut self, cmds: &[PathCommand], pts: &[Vector2<f32>]) -> bool {
        let implied: usize = cmds.iter().map(|c| c.point_count()).sum();
        if implied != pts.len() {
            return false;
        }
        self.cmds.extend_from_slice(cmds);
        self.pts.extend_from_slice(pts);
        true
    }

    /// Computes the axis-aligned bounding box over all points, or `None` if
    /// the path has no points.
    ///
    /// An empty path is distinct from a path whose box has zero size.
    pub fn bounds(&self) -> Option<Rect<f32>> {
        let first = *self.pts.first()?;
        let (mut min, mut max) = (first, first);
        for p in &self.pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(
            Point2D::new(min.x, min.y),
            Size2D::new(max.x - min.x, max.y - min.y),
        ))
    }

    /// Appends an ellipse centered on (cx, cy), approximated by four cubic
    /// arcs starting at the top and proceeding clockwise.
    pub fn append_circle(&mut self, cx: f32, cy: f32, radius_w: f32, radius_h: f32) {
        let half_kappa_w = radius_w * PATH_KAPPA;
        let half_kappa_h = radius_h * PATH_KAPPA;

        self.grow(6, 13);
        self.move_to(cx, cy - radius_h);
        self.cubic_to(
            cx + half_kappa_w,
            cy - radius_h,
            cx + radius_w,
            cy - half_kappa_h,
            cx + radius_w,
            cy,
        );
        self.cubic_to(
            cx + radius_w,
            cy + half_kappa_h,
            cx + half_kappa_w,
            cy + radius_h,
            cx,
            cy + radius_h,
        );
        self.cubic_to(
            cx - half_kappa_w,
            cy + radius_h,
            cx - radius_w,
            cy + half_kappa_h,
            cx - radius_w,
            cy,
        );
        self.cubic_to(
            cx - radius_w,
            cy - half_kappa_h,
            cx - half_kappa_w,
            cy - radius_h,
            cx,
            cy - radius_h,
        );
        self.close();
    }

    /// Appends a rectangle with optionally rounded corners, traversed
    /// clockwise from the top-left.
    ///
    /// The corner radius is silently capped at half the smaller side. A
    /// radius that exactly inscribes a circle degenerates to
    /// [PathData::append_circle] instead of emitting eight zero-length edges.
    pub fn append_rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner_radius: f32) {
        // cap the radius at half the smaller side
        let min = if w < h { w } else { h } * 0.5;
        let corner_radius = if corner_radius > min {
            debug!(target: "urchin", "corner radius {} capped at {}", corner_radius, min);
            min
        } else {
            corner_radius
        };

        if corner_radius == 0. {
            // the fourth edge is implied by the close
            self.grow(5, 4);
            self.move_to(x, y);
            self.line_to(x + w, y);
            self.line_to(x + w, y + h);
            self.line_to(x, y + h);
            self.close();
        } else if w == h && corner_radius * 2. == w {
            self.append_circle(x + w * 0.5, y + h * 0.5, corner_radius, corner_radius);
        } else {
            // corner control offset is radius/2 rather than κ·radius; changing
            // it would change how every rounded corner renders
            let half_radius = corner_radius * 0.5;

            self.grow(10, 17);
            self.move_to(x + corner_radius, y);
            self.line_to(x + w - corner_radius, y);
            self.cubic_to(
                x + w - corner_radius + half_radius,
                y,
                x + w,
                y + corner_radius - half_radius,
                x + w,
                y + corner_radius,
            );
            self.line_to(x + w, y + h - corner_radius);
            self.cubic_to(
                x + w,
                y + h - corner_radius + half_radius,
                x + w - corner_radius + half_radius,
                y + h,
                x + w - corner_radius,
                y + h,
            );
            self.line_to(x + corner_radius, y + h);
            self.cubic_to(
                x + corner_radius - half_radius,
                y + h,
                x,
                y + h - corner_radius + half_radius,
                x,
                y + h - corner_radius,
            );
            self.line_to(x, y + corner_radius);
            self.cubic_to(
                x,
                y + corner_radius - half_radius,
                x + corner_radius - half_radius,
                y,
                x + corner_radius,
                y,
            );
            self.close();
        }
    }

    /// Checks the command/point arity invariant. Used in tests.
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.cmds.iter().map(|c| c.point_count()).sum::<usize>() == self.pts.len()
    }
}

#[test]
fn incremental_construction() {
    let mut path = PathData::new();
    path.move_to(0., 0.);
    path.line_to(10., 0.);
    path.cubic_to(12., 0., 14., 2., 14., 4.);
    path.close();

    assert_eq!(
        path.commands(),
        &[
            PathCommand::MoveTo,
            PathCommand::LineTo,
            PathCommand::CubicTo,
            PathCommand::Close,
        ]
    );
    assert_eq!(path.points().len(), 5);
    assert!(path.is_consistent());
}

#[test]
fn bulk_append() {
    let mut path = PathData::new();
    let cmds = [PathCommand::MoveTo, PathCommand::LineTo, PathCommand::Close];
    let pts = [Vector2::new(1., 2.), Vector2::new(3., 4.)];
    assert!(path.append(&cmds, &pts));
    assert_eq!(path.commands().len(), 3);
    assert_eq!(path.points().len(), 2);
    assert!(path.is_consistent());
}

#[test]
fn bulk_append_arity_mismatch() {
    let mut path = PathData::new();
    path.move_to(5., 5.);

    // two commands implying one point, but two points supplied
    let cmds = [PathCommand::LineTo, PathCommand::Close];
    let pts = [Vector2::new(1., 2.), Vector2::new(3., 4.)];
    assert!(!path.append(&cmds, &pts));

    // the failed append must not have touched the path
    assert_eq!(path.commands(), &[PathCommand::MoveTo]);
    assert_eq!(path.points(), &[Vector2::new(5., 5.)]);
    assert!(path.is_consistent());
}

#[test]
fn empty_path_has_no_bounds() {
    let path = PathData::new();
    assert_eq!(path.bounds(), None);
}

#[test]
fn reset_clears_bounds() {
    let mut path = PathData::new();
    path.append_rect(0., 0., 4., 4., 0.);
    assert!(path.bounds().is_some());

    path.reset();
    assert!(path.commands().is_empty());
    assert!(path.points().is_empty());
    assert_eq!(path.bounds(), None);
}

#[test]
fn circle_bounds() {
    let mut path = PathData::new();
    path.append_circle(10., 10., 5., 5.);

    // one move, four arcs, one close
    assert_eq!(path.commands().len(), 6);
    assert_eq!(path.points().len(), 13);
    assert!(path.is_consistent());

    let bounds = path.bounds().unwrap();
    assert_eq!(bounds, Rect::new(Point2D::new(5., 5.), Size2D::new(10., 10.)));
}

#[test]
fn rect_bounds() {
    let mut path = PathData::new();
    path.append_rect(2., 3., 8., 5., 0.);

    assert_eq!(path.commands().len(), 5);
    assert_eq!(path.points().len(), 4);

    let bounds = path.bounds().unwrap();
    assert_eq!(bounds, Rect::new(Point2D::new(2., 3.), Size2D::new(8., 5.)));
}

#[test]
fn rounded_rect_stream_size() {
    let mut path = PathData::new();
    path.append_rect(0., 0., 20., 10., 2.);

    assert_eq!(path.commands().len(), 10);
    assert_eq!(path.points().len(), 17);
    assert!(path.is_consistent());
}

#[test]
fn corner_radius_capping_is_idempotent() {
    let mut capped = PathData::new();
    capped.append_rect(0., 0., 20., 10., 100.);

    let mut exact = PathData::new();
    exact.append_rect(0., 0., 20., 10., 5.);

    assert_eq!(capped, exact);
}

#[test]
fn rounded_rect_degenerates_to_circle() {
    let mut rect = PathData::new();
    rect.append_rect(0., 0., 10., 10., 5.);

    let mut circle = PathData::new();
    circle.append_circle(5., 5., 5., 5.);

    assert_eq!(rect.commands(), circle.commands());
    assert_eq!(rect.points(), circle.points());
}
