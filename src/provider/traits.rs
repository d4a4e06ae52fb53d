//! Traits implemented by managed resources and data sources

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::Schema;
use crate::ogo::OgoClient;

/// Resource with a full create/read/update/delete lifecycle
pub trait ManagedResource: Sized + Send + Sync {
    /// Plan/state model, in attribute names
    type Model: Serialize + DeserializeOwned + Send;

    const TYPE_NAME: &'static str;

    fn new(client: Arc<OgoClient>) -> Self;

    fn schema() -> Schema;

    /// State holding only the import identifier
    fn import_model(id: &str) -> Self::Model;

    fn create(&self, plan: Self::Model)
        -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;

    fn read(&self, state: Self::Model)
        -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;

    fn update(&self, plan: Self::Model)
        -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;

    fn delete(&self, state: Self::Model) -> impl Future<Output = Result<(), Diagnostics>> + Send;

    /// Import an existing remote object by identifier, then refresh it
    fn import_state(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send {
        let state = Self::import_model(id);
        self.read(state)
    }

    /// Validate a raw configuration and decode it into a model
    fn plan(config: Value) -> Result<Self::Model, Diagnostics> {
        let prepared = Self::schema().prepare(config)?;
        serde_json::from_value(prepared)
            .map_err(|e| Diagnostics::error("Invalid configuration", e.to_string()))
    }
}

/// Read-only listing of remote objects
pub trait DataSource: Sized + Send + Sync {
    type Model: Serialize + Send;

    const TYPE_NAME: &'static str;

    fn new(client: Arc<OgoClient>) -> Self;

    fn schema() -> Schema;

    fn read(&self) -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;
}
