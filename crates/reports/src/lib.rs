pub mod catalog;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;
