mod flag;
pub use flag::Flag;

/// Human-readable step name used for error attribution and logs.
pub type StepName = String;

/// Raw delay in milliseconds.
///
/// Signed: values come from untrusted config and are clamped by the policy engine, never rejected here.
pub type DelayMs = i64;
