pub mod adapters;
pub mod fallback;
pub mod fetcher;
pub mod normalize;
pub mod selectors;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use store::{DomainStore, SubscriptionId};
