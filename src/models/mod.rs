pub mod holiday;
pub mod leave;
pub mod work;

pub use holiday::Holiday;
pub use leave::{LeaveRange, LeaveReason, LeaveRecord};
pub use work::WorkRecord;
