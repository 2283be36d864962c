//! Call-graph reachability: the concurrent visited set and the closure explorer.

pub mod explorer;
pub mod set;

pub use explorer::CallGraphExplorer;
pub use set::{FrozenReachability, ReachabilitySet};
