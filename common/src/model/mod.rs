pub mod period;
pub mod requisition;
pub mod setting;
pub mod template;
pub mod user;
