//! Mapping from the declarative model into runtime policy values.
mod policy;

pub use policy::{to_options, to_policy};
