mod confederation;
mod loader;
mod settings;
mod team;

pub use confederation::*;
pub use loader::*;
pub use settings::*;
pub use team::*;
