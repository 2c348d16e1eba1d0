pub mod confederation;
pub mod error;
pub mod forecast;
pub mod group;
pub mod knockout;
pub mod r#match;
pub mod schedule;
pub mod settings;
pub mod shared;
pub mod team;
pub mod tournament;
pub mod utils;

pub use confederation::*;
pub use error::*;
pub use forecast::*;
pub use group::*;
pub use knockout::*;
pub use r#match::*;
pub use schedule::*;
pub use settings::*;
pub use shared::*;
pub use team::*;
pub use tournament::*;
pub use utils::*;
