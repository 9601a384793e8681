pub mod bootstrap;
pub mod cache;
pub mod invalidation;
pub mod materializer;
pub mod ports;
pub mod resolver;

pub use bootstrap::{BootstrapLoader, BootstrapReport, BootstrapSource};
pub use cache::RecordCache;
pub use invalidation::InvalidationProcessor;
pub use resolver::QueryResolver;
