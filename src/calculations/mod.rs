pub mod backward_pass;
pub mod critical_path;
pub mod forward_pass;

pub use backward_pass::{BackwardPass, LateTimes};
pub use critical_path::FLOAT_EPSILON;
pub use forward_pass::{EarlyTimes, ForwardPass};
