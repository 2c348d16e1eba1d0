mod confederation;
mod distributor;
mod format;
mod playoff;
mod qualifiers;

pub use confederation::*;
pub use distributor::*;
pub use format::*;
pub use playoff::*;
pub use qualifiers::*;
