mod group;
mod table;

pub use group::*;
pub use table::*;
