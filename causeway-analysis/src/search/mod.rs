//! Graph search over the signed graph: backward reachability from a target
//! and shortest-first simple path enumeration.

pub mod enumeration;
pub mod reachability;

pub use enumeration::{PathEnumerator, PathIter};
pub use reachability::{find_sources, SourceFinder};
