pub mod forms;
pub mod handlers;
