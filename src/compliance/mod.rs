/// License graph model, propagation policy and resolution services
///
/// Everything under this module is free of I/O: records arrive through the
/// outbound ports and results are plain values.
pub mod domain;
pub mod policies;
pub mod services;
