//! Common traits for Ogo resources

/// Common trait for remote resources that have an identifier and a name
pub trait OgoResource {
    /// Get the resource identifier
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or identifier
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Trait for list responses that wrap their items in an envelope
pub trait PagedResponse<T> {
    /// Consume self and return the items
    fn into_items(self) -> Vec<T>;

    /// Total number of items reported by the server
    fn total(&self) -> Option<u64>;
}
