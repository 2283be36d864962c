//! FxHash-backed collection aliases used throughout the engine.

use std::hash::BuildHasherDefault;

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Build-hasher for containers that take an explicit hasher parameter.
pub type FxBuildHasher = BuildHasherDefault<rustc_hash::FxHasher>;
