mod bracket;
mod knockout_match;
mod manager;
mod round;
mod seeding;

pub use bracket::*;
pub use knockout_match::*;
pub use manager::*;
pub use round::*;
pub use seeding::*;
