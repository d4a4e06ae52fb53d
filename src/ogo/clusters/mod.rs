//! Cluster module

mod api;
mod models;

pub use models::{Cluster, ClusterMembership};
