//! Snap point layout and resolution.

/// Gap kept between the screen bottom and a closed sheet.
pub const CLOSED_MARGIN: f64 = 20.0;

/// Fraction of the sheet height left hidden when partially open.
pub const PARTIAL_FRACTION: f64 = 0.2;

/// Milliseconds of release velocity added to the drag when projecting a flick.
pub const VELOCITY_PROJECTION_MS: f64 = 60.0;

/// Named resting positions of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapPoint {
    /// Fully open, offset 0.
    Full,
    /// Partially open.
    Partial,
    /// Off-screen.
    Closed,
}

impl SnapPoint {
    /// Evaluation order used to break ties.
    pub const ORDER: [SnapPoint; 3] = [SnapPoint::Full, SnapPoint::Partial, SnapPoint::Closed];
}

/// Offsets of the three snap points for a given sheet height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoints {
    pub full: f64,
    pub partial: f64,
    pub closed: f64,
}

impl SnapPoints {
    /// Layout for a sheet filling the viewport below `top_inset`.
    pub fn for_viewport(viewport_height: f64, top_inset: f64) -> Self {
        Self::for_sheet_height(viewport_height - top_inset)
    }

    /// Layout for a sheet of `sheet_height` pixels. Negative heights count as 0.
    pub fn for_sheet_height(sheet_height: f64) -> Self {
        let height = sheet_height.max(0.0);
        Self {
            full: 0.0,
            partial: height * PARTIAL_FRACTION,
            closed: height + CLOSED_MARGIN,
        }
    }

    pub fn offset(&self, point: SnapPoint) -> f64 {
        match point {
            SnapPoint::Full => self.full,
            SnapPoint::Partial => self.partial,
            SnapPoint::Closed => self.closed,
        }
    }

    /// Clamp a candidate offset to the draggable range.
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.max(self.full).min(self.closed)
    }
}

/// Where a drag would land once its release velocity is taken into account.
///
/// `velocity` is in pixels per millisecond.
pub fn project(baseline: f64, delta: f64, velocity: f64) -> f64 {
    baseline + delta + velocity * VELOCITY_PROJECTION_MS
}

/// Pick the snap point closest to `projected`.
///
/// Candidates are evaluated in [`SnapPoint::ORDER`]; a later candidate only
/// wins when it is strictly closer, so ties go to the first one.
pub fn resolve(projected: f64, points: &SnapPoints) -> SnapPoint {
    let mut best = SnapPoint::ORDER[0];
    let mut best_distance = (points.offset(best) - projected).abs();
    for candidate in &SnapPoint::ORDER[1..] {
        let distance = (points.offset(*candidate) - projected).abs();
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    best
}
