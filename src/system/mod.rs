/// Runtime capability probe.
pub mod probe;
