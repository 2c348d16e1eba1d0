mod collection;
mod power;
mod team;

pub use collection::*;
pub use power::*;
pub use team::*;
