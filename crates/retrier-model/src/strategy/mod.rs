mod backoff;
pub use backoff::BackoffStrategy;

mod topology;
pub use topology::Topology;
