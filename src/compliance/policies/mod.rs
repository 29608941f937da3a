pub mod edge_policy;

pub use edge_policy::{EdgePolicy, Propagation};
