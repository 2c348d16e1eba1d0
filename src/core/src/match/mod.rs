mod outcomes;
mod penalties;
mod result;
mod simulator;
mod weighting;

pub use outcomes::*;
pub use penalties::*;
pub use result::*;
pub use simulator::*;
pub use weighting::*;
