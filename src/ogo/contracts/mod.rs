//! Contract module

mod api;
mod models;

pub use models::{Contract, ContractHolder};
