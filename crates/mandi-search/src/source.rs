use async_trait::async_trait;
use mandi_core::Place;

/// Anything that can answer a free-text place query.
///
/// Implementations never fail: unreachable or misbehaving backends yield an
/// empty list.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Vec<Place>;
}
