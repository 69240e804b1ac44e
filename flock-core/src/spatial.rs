use std::collections::HashMap;

use crate::boid::Boid;
use crate::vec2::Vec2;

/// A canvas extent in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in world units, edges included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Answers "which boids are within `radius` of `position`" over the tick's
/// frozen snapshot. The simulator picks the backing structure per its
/// configured index kind.
pub trait NeighborFinder {
    fn query(&self, radius: f64, position: Vec2) -> Vec<Boid>;
}

/// Linear scan over the raw snapshot. Also the oracle the indexed
/// structures are tested against.
impl NeighborFinder for [Boid] {
    fn query(&self, radius: f64, position: Vec2) -> Vec<Boid> {
        self.iter()
            .filter(|other| position.distance(&other.position) <= radius)
            .copied()
            .collect()
    }
}

/// Uniform-grid index with fixed 20x20 cells, keyed by the floor of the
/// position over the cell size.
///
/// Bucket lookups dominate query time at high agent counts; measured
/// against the quad tree this one loses, so it is the non-default choice.
pub struct SpatialHash<E> {
    cell_size: Size,
    store: HashMap<(i64, i64), Vec<E>>,
    position_of: fn(&E) -> Vec2,
}

impl<E: Copy> SpatialHash<E> {
    pub fn new(elements: &[E], position_of: fn(&E) -> Vec2) -> Self {
        let mut hash = Self {
            cell_size: Size::new(20.0, 20.0),
            store: HashMap::new(),
            position_of,
        };
        for element in elements {
            hash.insert(*element);
        }
        hash
    }

    pub fn insert(&mut self, element: E) {
        let cell = self.cell((self.position_of)(&element));
        self.store.entry(cell).or_default().push(element);
    }

    pub fn query(&self, radius: f64, position: Vec2) -> Vec<E> {
        let min = self.cell(Vec2::new(position.x - radius, position.y - radius));
        let max = self.cell(Vec2::new(position.x + radius, position.y + radius));

        let mut results = Vec::new();
        for cell_x in min.0..=max.0 {
            for cell_y in min.1..=max.1 {
                let Some(elements) = self.store.get(&(cell_x, cell_y)) else {
                    continue;
                };
                results.extend(
                    elements
                        .iter()
                        .filter(|element| {
                            position.distance(&(self.position_of)(element)) <= radius
                        })
                        .copied(),
                );
            }
        }
        results
    }

    fn cell(&self, position: Vec2) -> (i64, i64) {
        (
            (position.x / self.cell_size.width).floor() as i64,
            (position.y / self.cell_size.height).floor() as i64,
        )
    }
}

impl NeighborFinder for SpatialHash<Boid> {
    fn query(&self, radius: f64, position: Vec2) -> Vec<Boid> {
        SpatialHash::query(self, radius, position)
    }
}

/// Leaf capacity the simulator uses when building its per-tick tree
pub const QUAD_TREE_CAPACITY: usize = 4;

/// A leaf this small absorbs elements past capacity instead of subdividing,
/// which keeps coincident points from recursing without bound.
const MIN_SUBDIVISION_DIMENSION: f64 = 1e-6;

/// Region-bounded quad tree. Leaves hold up to `capacity` elements and
/// subdivide into four equal quadrants when one more arrives; interior
/// nodes hold nothing directly.
pub struct QuadTree<E> {
    region: Region,
    capacity: usize,
    position_of: fn(&E) -> Vec2,
    contents: Contents<E>,
}

enum Contents<E> {
    Undivided(Vec<E>),
    Divided {
        ne: Box<QuadTree<E>>,
        nw: Box<QuadTree<E>>,
        se: Box<QuadTree<E>>,
        sw: Box<QuadTree<E>>,
    },
}

impl<E: Copy> QuadTree<E> {
    pub fn new(region: Region, capacity: usize, position_of: fn(&E) -> Vec2) -> Self {
        Self {
            region,
            capacity,
            position_of,
            contents: Contents::Undivided(Vec::new()),
        }
    }

    pub fn with_elements(
        region: Region,
        capacity: usize,
        elements: &[E],
        position_of: fn(&E) -> Vec2,
    ) -> Self {
        let mut tree = Self::new(region, capacity, position_of);
        for element in elements {
            tree.insert(*element);
        }
        tree
    }

    /// Inserts into exactly one leaf. Returns false when the element lies
    /// outside this node's region.
    pub fn insert(&mut self, element: E) -> bool {
        let position = (self.position_of)(&element);
        if !self.region.contains(position) {
            return false;
        }

        match &mut self.contents {
            Contents::Undivided(elements) => {
                if elements.len() < self.capacity
                    || self.region.width / 2.0 < MIN_SUBDIVISION_DIMENSION
                {
                    elements.push(element);
                } else {
                    self.subdivide(element);
                }
                true
            }
            // An element on a shared child edge goes to the first child
            // whose region contains it, never to more than one.
            Contents::Divided { ne, nw, se, sw } => {
                ne.insert(element)
                    || nw.insert(element)
                    || se.insert(element)
                    || sw.insert(element)
            }
        }
    }

    pub fn query(&self, radius: f64, position: Vec2) -> Vec<E> {
        match &self.contents {
            Contents::Undivided(elements) => elements
                .iter()
                .filter(|element| position.distance(&(self.position_of)(element)) <= radius)
                .copied()
                .collect(),
            Contents::Divided { ne, nw, se, sw } => {
                let mut results = ne.query(radius, position);
                results.extend(nw.query(radius, position));
                results.extend(se.query(radius, position));
                results.extend(sw.query(radius, position));
                results
            }
        }
    }

    fn subdivide(&mut self, new_element: E) {
        let elements = match core::mem::replace(&mut self.contents, Contents::Undivided(Vec::new()))
        {
            Contents::Undivided(elements) => elements,
            Contents::Divided { .. } => unreachable!("subdivide called on an interior node"),
        };

        // Quadrant max edges are computed from the parent's max edges so a
        // point on the parent boundary always lands in some child.
        let mid_x = self.region.x + self.region.width / 2.0;
        let mid_y = self.region.y + self.region.height / 2.0;
        let max_x = self.region.x + self.region.width;
        let max_y = self.region.y + self.region.height;

        let nw = Region::new(self.region.x, self.region.y, mid_x - self.region.x, mid_y - self.region.y);
        let ne = Region::new(mid_x, self.region.y, max_x - mid_x, mid_y - self.region.y);
        let sw = Region::new(self.region.x, mid_y, mid_x - self.region.x, max_y - mid_y);
        let se = Region::new(mid_x, mid_y, max_x - mid_x, max_y - mid_y);

        self.contents = Contents::Divided {
            ne: Box::new(QuadTree::new(ne, self.capacity, self.position_of)),
            nw: Box::new(QuadTree::new(nw, self.capacity, self.position_of)),
            se: Box::new(QuadTree::new(se, self.capacity, self.position_of)),
            sw: Box::new(QuadTree::new(sw, self.capacity, self.position_of)),
        };

        for element in elements {
            self.insert(element);
        }
        self.insert(new_element);
    }
}

impl NeighborFinder for QuadTree<Boid> {
    fn query(&self, radius: f64, position: Vec2) -> Vec<Boid> {
        QuadTree::query(self, radius, position)
    }
}
