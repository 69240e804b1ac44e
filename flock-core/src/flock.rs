use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boid::{Boid, VisualTag, VISUAL_TAG_COUNT};
use crate::forces::{self, Force, ForceConfiguration};
use crate::spatial::{NeighborFinder, QuadTree, Region, Size, SpatialHash, QUAD_TREE_CAPACITY};
use crate::vec2::Vec2;

/// Which spatial index backs the per-tick neighbor queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexKind {
    /// Uniform 20x20 grid hash
    Grid,
    /// Adaptive quad tree, the faster of the two in practice
    #[default]
    QuadTree,
}

/// Simulation parameters. `agent_count` and `seed` take effect at
/// initialization only; everything else may change between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    pub agent_count: usize,
    pub vision_radius: f64,
    pub max_speed: f64,
    pub max_force: f64,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    pub heading_weight: f64,
    pub heading_force_enabled: bool,
    pub index: IndexKind,
    pub seed: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            agent_count: 30,
            vision_radius: 50.0,
            max_speed: 300.0,
            max_force: 20.0,
            alignment_weight: 0.25,
            cohesion_weight: 0.25,
            separation_weight: 0.25,
            heading_weight: 0.05,
            heading_force_enabled: false,
            index: IndexKind::QuadTree,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TickContext {
    time: f64,
    canvas: Size,
}

/// The flock simulator.
///
/// Uninitialized until the first `tick`, which seeds the agents from the
/// configured seed; every later `tick` advances the simulation by the
/// elapsed driver time.
#[derive(Debug, Clone)]
pub struct Flock {
    pub boids: Vec<Boid>,
    pub config: FlockConfig,
    context: Option<TickContext>,
}

impl Flock {
    pub fn new(config: FlockConfig) -> Self {
        Self {
            boids: Vec::new(),
            config,
            context: None,
        }
    }

    /// Advances the simulation to `time` (driver seconds).
    ///
    /// The first call seeds the flock and performs no integration. A
    /// non-monotonic `time` yields `dt = 0`: forces are still computed and
    /// folded into velocity, but no position changes.
    pub fn tick(&mut self, time: f64, canvas: Size, heading_degrees: Option<f64>) {
        if let Some(previous) = self.context {
            let dt = (time - previous.time).max(0.0);
            self.physics(dt, canvas, heading_degrees);
        } else {
            self.initialize(canvas);
        }
        self.context = Some(TickContext { time, canvas });
    }

    fn initialize(&mut self, canvas: Size) {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let vision_radius = self.config.vision_radius;
        // Initial speed is half of max: sample vx, then solve
        // speed^2 = vx^2 + vy^2 for the non-negative vy.
        let speed = self.config.max_speed / 2.0;
        self.boids = (0..self.config.agent_count)
            .map(|id| {
                let position = Vec2::new(
                    rng.gen_range(0.0..=canvas.width),
                    rng.gen_range(0.0..=canvas.height),
                );
                let vx = rng.gen_range(-speed..=speed);
                let vy = (speed * speed - vx * vx).sqrt();
                let tag = VisualTag(rng.gen_range(0..VISUAL_TAG_COUNT));
                Boid::new(id, position, Vec2::new(vx, vy), vision_radius, tag)
            })
            .collect();
    }

    fn physics(&mut self, dt: f64, canvas: Size, heading_degrees: Option<f64>) {
        // All force evaluation reads from this frozen snapshot; no boid
        // observes another boid's same-tick update.
        let snapshot = self.boids.clone();
        let index = self.build_index(&snapshot, canvas);
        let finder = index.as_ref();
        let configuration = ForceConfiguration {
            max_speed: self.config.max_speed,
        };
        let max_force = self.config.max_force;

        let generators: [(Box<dyn Fn(&Boid) -> Force + '_>, f64); 4] = [
            (
                Box::new(|boid: &Boid| forces::alignment(boid, finder, &configuration)),
                self.config.alignment_weight,
            ),
            (
                Box::new(|boid: &Boid| forces::cohesion(boid, finder, &configuration)),
                self.config.cohesion_weight,
            ),
            (
                Box::new(|boid: &Boid| forces::separation(boid, finder, &configuration)),
                self.config.separation_weight,
            ),
            (
                Box::new(|boid: &Boid| forces::external_heading(boid, heading_degrees, &configuration)),
                if self.config.heading_force_enabled {
                    self.config.heading_weight
                } else {
                    0.0
                },
            ),
        ];

        for boid in self.boids.iter_mut() {
            boid.acceleration = Vec2::zero();
            for (generator, importance) in &generators {
                let force = generator(&*boid);
                // clamp before weighting, so the weights keep their ratios
                boid.acceleration += force.limit(max_force) * *importance;
            }
        }

        for boid in self.boids.iter_mut() {
            // toroidal wrap of last tick's overshoot, then integrate
            if boid.position.x > canvas.width {
                boid.position.x = 0.0;
            } else if boid.position.x < 0.0 {
                boid.position.x = canvas.width;
            }
            if boid.position.y > canvas.height {
                boid.position.y = 0.0;
            } else if boid.position.y < 0.0 {
                boid.position.y = canvas.height;
            }

            boid.velocity += boid.acceleration;
            boid.velocity = boid.velocity.limit(self.config.max_speed);
            boid.position += boid.velocity * dt;
        }
    }

    fn build_index(&self, snapshot: &[Boid], canvas: Size) -> Box<dyn NeighborFinder> {
        match self.config.index {
            IndexKind::Grid => Box::new(SpatialHash::new(snapshot, |boid: &Boid| boid.position)),
            IndexKind::QuadTree => Box::new(QuadTree::with_elements(
                snapshot_region(snapshot, canvas),
                QUAD_TREE_CAPACITY,
                snapshot,
                |boid: &Boid| boid.position,
            )),
        }
    }
}

/// The snapshot is taken before the wrap pass, so a position may overshoot
/// the canvas by one frame of travel. Grow the tree region to cover every
/// agent.
fn snapshot_region(snapshot: &[Boid], canvas: Size) -> Region {
    let mut min_x: f64 = 0.0;
    let mut min_y: f64 = 0.0;
    let mut max_x = canvas.width;
    let mut max_y = canvas.height;
    for boid in snapshot {
        min_x = min_x.min(boid.position.x);
        min_y = min_y.min(boid.position.y);
        max_x = max_x.max(boid.position.x);
        max_y = max_y.max(boid.position.y);
    }
    Region::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
