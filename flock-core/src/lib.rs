#![cfg_attr(not(feature = "std"), no_std)]

mod boid;
mod sector;
mod vec2;

#[cfg(feature = "std")]
mod flock;
#[cfg(feature = "std")]
mod forces;
#[cfg(feature = "std")]
mod spatial;

pub use boid::{Boid, VisualTag, VISION_CONE_WIDTH, VISUAL_TAG_COUNT};
pub use sector::{CircleSector, Radians};
pub use vec2::Vec2;

#[cfg(feature = "std")]
pub use flock::{Flock, FlockConfig, IndexKind};
#[cfg(feature = "std")]
pub use forces::{
    alignment, cohesion, external_heading, separation, Force, ForceConfiguration,
};
#[cfg(feature = "std")]
pub use spatial::{
    NeighborFinder, QuadTree, Region, Size, SpatialHash, QUAD_TREE_CAPACITY,
};
