mod calendar;
mod fixture;
mod round_robin;

pub use calendar::*;
pub use fixture::*;
pub use round_robin::*;
