pub mod holiday;
pub mod leave;
pub mod list;
pub mod period;
pub mod range;
pub mod selection;
pub mod summary;
pub mod timeline;
pub mod work;
