mod listener;
mod report;
mod repository;
mod service;
mod tournament;

pub use listener::*;
pub use report::*;
pub use repository::*;
pub use service::*;
pub use tournament::*;

#[cfg(test)]
pub(crate) use tournament::tests::fixture_data;
