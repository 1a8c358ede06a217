pub mod connector;
pub mod error;
