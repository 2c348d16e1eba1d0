mod generators;
mod loaders;
mod store;

pub use generators::*;
pub use loaders::*;
pub use store::*;
