use crate::sector::CircleSector;
use crate::vec2::Vec2;
use core::f64::consts::PI;

/// Number of distinct visual tags handed out at spawn. The rendering
/// collaborator maps each tag to a display color.
pub const VISUAL_TAG_COUNT: u8 = 6;

/// Angular width of a boid's cone of vision
pub const VISION_CONE_WIDTH: f64 = PI / 3.0;

/// Opaque per-agent display tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualTag(pub u8);

/// A single boid entity.
///
/// Value semantics: each tick derives a new generation of boids from the
/// previous one; no boid holds a reference to another. `id` is the identity
/// used to exclude a boid from its own neighbor set; two boids may
/// otherwise share identical state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub vision_radius: f64,
    pub tag: VisualTag,
}

impl Boid {
    pub fn new(
        id: usize,
        position: Vec2,
        velocity: Vec2,
        vision_radius: f64,
        tag: VisualTag,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vec2::zero(),
            vision_radius,
            tag,
        }
    }

    /// The sector this boid can currently see, derived from its heading
    pub fn vision(&self) -> CircleSector {
        CircleSector::new(
            self.position,
            self.velocity.direction(),
            VISION_CONE_WIDTH,
            self.vision_radius,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boid_creation() {
        let boid = Boid::new(
            7,
            Vec2::new(10.0, 20.0),
            Vec2::new(1.0, 1.0),
            50.0,
            VisualTag(3),
        );

        assert_eq!(boid.id, 7);
        assert_eq!(boid.position, Vec2::new(10.0, 20.0));
        assert_eq!(boid.velocity, Vec2::new(1.0, 1.0));
        assert_eq!(boid.acceleration, Vec2::zero());
        assert_eq!(boid.vision_radius, 50.0);
        assert_eq!(boid.tag, VisualTag(3));
    }

    #[test]
    fn test_vision_tracks_position_and_heading() {
        let boid = Boid::new(0, Vec2::new(5.0, 5.0), Vec2::new(0.0, 2.0), 40.0, VisualTag(0));
        let vision = boid.vision();

        assert_eq!(vision.center, boid.position);
        assert_eq!(vision.heading, boid.velocity.direction());
        assert_eq!(vision.width, VISION_CONE_WIDTH);
        assert_eq!(vision.radius, 40.0);
    }
}
