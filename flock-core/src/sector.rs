use crate::vec2::Vec2;

pub type Radians = f64;

const TAU: f64 = 2.0 * core::f64::consts::PI;

/// A circular sector, used as an agent's cone of vision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSector {
    pub center: Vec2,
    pub heading: Radians,
    pub width: Radians,
    pub radius: f64,
}

impl CircleSector {
    pub fn new(center: Vec2, heading: Radians, width: Radians, radius: f64) -> Self {
        Self {
            center,
            heading,
            width,
            radius,
        }
    }

    /// True when `point` lies within the sector, edges included.
    ///
    /// The test measures the point's angular offset from the sector's start
    /// edge modulo a full turn, which keeps sectors straddling the zero
    /// angle intact.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.center.distance(&point) > self.radius {
            return false;
        }

        let point_angle = normalize_angle((point - self.center).direction());
        let start_angle = self.heading - self.width / 2.0;
        normalize_angle(point_angle - start_angle) <= self.width
    }
}

/// Wraps an angle into [0, 2*pi)
fn normalize_angle(angle: Radians) -> Radians {
    let wrapped = angle % TAU;
    if wrapped < 0.0 {
        wrapped + TAU
    } else {
        wrapped
    }
}
