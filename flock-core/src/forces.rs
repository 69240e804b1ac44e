use crate::boid::Boid;
use crate::spatial::NeighborFinder;
use crate::vec2::Vec2;
use core::f64::consts::FRAC_PI_2;

/// A steering vector produced by one generator, before the simulator
/// clamps and weights it
pub type Force = Vec2;

/// Parameters shared by every force generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceConfiguration {
    pub max_speed: f64,
}

impl Default for ForceConfiguration {
    fn default() -> Self {
        Self { max_speed: 300.0 }
    }
}

/// Steers toward the average velocity of visible neighbors
pub fn alignment(
    boid: &Boid,
    neighbors: &(impl NeighborFinder + ?Sized),
    configuration: &ForceConfiguration,
) -> Force {
    let mut average_velocity = Vec2::zero();
    let mut count = 0;
    for other in neighbors.query(boid.vision_radius, boid.position) {
        if other.id == boid.id {
            continue;
        }
        average_velocity += other.velocity;
        count += 1;
    }

    let mut steering = average_velocity;
    if count > 0 {
        steering /= count as f64;
        steering.set_magnitude(configuration.max_speed);
        steering -= boid.velocity;
    }
    steering
}

/// Steers toward the centroid of visible neighbors
pub fn cohesion(
    boid: &Boid,
    neighbors: &(impl NeighborFinder + ?Sized),
    configuration: &ForceConfiguration,
) -> Force {
    let mut average_position = Vec2::zero();
    let mut count = 0;
    for other in neighbors.query(boid.vision_radius, boid.position) {
        if other.id == boid.id {
            continue;
        }
        average_position += other.position;
        count += 1;
    }

    let mut steering = average_position;
    if count > 0 {
        steering /= count as f64;
        steering -= boid.position;
        steering.set_magnitude(configuration.max_speed);
        steering -= boid.velocity;
    }
    steering
}

/// Steers away from visible neighbors, weighting closer ones more via
/// inverse-square falloff
pub fn separation(
    boid: &Boid,
    neighbors: &(impl NeighborFinder + ?Sized),
    configuration: &ForceConfiguration,
) -> Force {
    let mut steering = Vec2::zero();
    let mut count = 0;
    for other in neighbors.query(boid.vision_radius, boid.position) {
        if other.id == boid.id {
            continue;
        }
        let distance = boid.position.distance(&other.position);
        debug_assert!(
            distance <= boid.vision_radius,
            "neighbor query returned a boid outside its radius"
        );
        if distance > boid.vision_radius {
            continue;
        }

        let mut difference = boid.position - other.position;
        // a coincident neighbor contributes the raw (zero) difference
        // instead of dividing by zero
        if distance * distance != 0.0 {
            difference /= distance * distance;
        }
        steering += difference;
        count += 1;
    }

    if count > 0 {
        steering /= count as f64;
        steering.set_magnitude(configuration.max_speed);
        steering -= boid.velocity;
    }
    steering
}

/// Steers toward an externally supplied compass heading, when one is
/// available. Degrees, compass convention: 0 is north, 90 is east.
pub fn external_heading(
    boid: &Boid,
    heading_degrees: Option<f64>,
    configuration: &ForceConfiguration,
) -> Force {
    let Some(degrees) = heading_degrees else {
        return Vec2::zero();
    };

    // Phase-shift so compass north lands on angle zero: 0 north, pi/2
    // east, pi south, 3*pi/2 west.
    let radians = degrees.to_radians() - FRAC_PI_2;
    // The canvas faces the user, so its east is the compass's west;
    // reflect across the y axis by negating x.
    let mut steering = Vec2::new(-radians.cos(), radians.sin());
    steering.set_magnitude(configuration.max_speed);
    steering - boid.velocity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::VisualTag;

    const EPSILON: f64 = 1e-9;

    fn boid(id: usize, position: Vec2, velocity: Vec2) -> Boid {
        Boid::new(id, position, velocity, 50.0, VisualTag(0))
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).magnitude() < EPSILON
    }

    #[test]
    fn test_isolated_boid_feels_no_flocking_force() {
        let lone = boid(0, Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0));
        let snapshot = [lone];
        let configuration = ForceConfiguration::default();

        assert_eq!(alignment(&lone, &snapshot[..], &configuration), Vec2::zero());
        assert_eq!(cohesion(&lone, &snapshot[..], &configuration), Vec2::zero());
        assert_eq!(separation(&lone, &snapshot[..], &configuration), Vec2::zero());
    }

    #[test]
    fn test_alignment_matches_neighbor_velocity() {
        let acting = boid(0, Vec2::zero(), Vec2::new(10.0, 0.0));
        let neighbor = boid(1, Vec2::new(10.0, 0.0), Vec2::new(0.0, 20.0));
        let snapshot = [acting, neighbor];
        let configuration = ForceConfiguration::default();

        let steering = alignment(&acting, &snapshot[..], &configuration);

        // neighbor average (0, 20) rescaled to max speed, minus own velocity
        assert!(close(steering, Vec2::new(-10.0, 300.0)));
    }

    #[test]
    fn test_cohesion_points_at_the_centroid() {
        let acting = boid(0, Vec2::zero(), Vec2::zero());
        let neighbor = boid(1, Vec2::new(30.0, 40.0), Vec2::zero());
        let snapshot = [acting, neighbor];
        let configuration = ForceConfiguration::default();

        let steering = cohesion(&acting, &snapshot[..], &configuration);

        // (30, 40) has magnitude 50, rescaled to 300
        assert!(close(steering, Vec2::new(180.0, 240.0)));
    }

    #[test]
    fn test_separation_pushes_away_from_the_closer_neighbor() {
        let acting = boid(0, Vec2::zero(), Vec2::zero());
        let near = boid(1, Vec2::new(10.0, 0.0), Vec2::zero());
        let far = boid(2, Vec2::new(-40.0, 0.0), Vec2::zero());
        let snapshot = [acting, near, far];
        let configuration = ForceConfiguration::default();

        let steering = separation(&acting, &snapshot[..], &configuration);

        // (-10/100) + (40/1600) < 0: the near neighbor dominates
        assert!(steering.x < 0.0);
        assert!((steering.magnitude() - configuration.max_speed).abs() < EPSILON);
    }

    #[test]
    fn test_separation_survives_a_coincident_neighbor() {
        let acting = boid(0, Vec2::new(50.0, 50.0), Vec2::new(5.0, 0.0));
        let coincident = boid(1, Vec2::new(50.0, 50.0), Vec2::zero());
        let snapshot = [acting, coincident];
        let configuration = ForceConfiguration::default();

        let steering = separation(&acting, &snapshot[..], &configuration);

        assert!(steering.x.is_finite() && steering.y.is_finite());
        // zero contribution rescales to zero; only the velocity correction
        // remains
        assert!(close(steering, Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_self_is_excluded_by_identity_not_value() {
        // the neighbor is state-identical to the acting boid; only the id
        // differs, and it must still count as a neighbor
        let acting = boid(0, Vec2::new(50.0, 50.0), Vec2::new(10.0, 0.0));
        let twin = boid(1, Vec2::new(50.0, 50.0), Vec2::new(10.0, 0.0));
        let snapshot = [acting, twin];
        let configuration = ForceConfiguration::default();

        let steering = alignment(&acting, &snapshot[..], &configuration);

        // twin's velocity (10, 0) rescaled to 300, minus own (10, 0)
        assert!(close(steering, Vec2::new(290.0, 0.0)));
    }

    #[test]
    fn test_external_heading_absent_means_no_force() {
        let acting = boid(0, Vec2::zero(), Vec2::new(5.0, 5.0));
        let configuration = ForceConfiguration::default();
        assert_eq!(external_heading(&acting, None, &configuration), Vec2::zero());
    }

    #[test]
    fn test_external_heading_north_points_up_the_canvas() {
        let acting = boid(0, Vec2::zero(), Vec2::zero());
        let configuration = ForceConfiguration::default();

        let steering = external_heading(&acting, Some(0.0), &configuration);

        // canvas y grows downward, so north is negative y
        assert!(close(steering, Vec2::new(0.0, -300.0)));
    }

    #[test]
    fn test_external_heading_east_reflects_to_canvas_west() {
        let acting = boid(0, Vec2::zero(), Vec2::zero());
        let configuration = ForceConfiguration::default();

        let steering = external_heading(&acting, Some(90.0), &configuration);

        assert!(close(steering, Vec2::new(-300.0, 0.0)));
    }

    #[test]
    fn test_external_heading_subtracts_current_velocity() {
        let acting = boid(0, Vec2::zero(), Vec2::new(40.0, -30.0));
        let configuration = ForceConfiguration::default();

        let steering = external_heading(&acting, Some(180.0), &configuration);

        // south is positive y on the canvas
        assert!(close(steering, Vec2::new(-40.0, 330.0)));
    }
}
