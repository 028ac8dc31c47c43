pub mod error;
pub mod map;
pub mod policy;
pub mod run;
pub mod sink;
pub mod step;

pub use error::{BoxError, RetryError, StepError};
pub use policy::{Opt, Policy, Sentinel};
pub use sink::{AttemptRecord, AttemptSink, NoOpSink, SinkHandle, TracingSink};
pub use step::Step;

pub mod prelude {
    pub use crate::error::{BoxError, RetryError, StepError};
    pub use crate::policy::{Policy, option};
    pub use crate::step::Step;
    pub use retrier_model::{BackoffStrategy, Topology};
}
