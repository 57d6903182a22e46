//! Brushforge - procedural floor brushwork for GoldSrc-style maps
//!
//! A level starts as an abstract graph of locations joined by paths
//! ([`layout`]). The [`generation`] stage grows convex floor brushes along
//! every path, using ray-march [`trace`]s against the brushes placed so far
//! to keep new solids from overlapping old ones. The result is written out
//! as a Valve-220 `.map` file by [`mapfile`].

pub mod core;
pub mod math;
pub mod brush;
pub mod trace;
pub mod layout;
pub mod generation;
pub mod config;
pub mod mapfile;
