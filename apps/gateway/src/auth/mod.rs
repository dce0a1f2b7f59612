pub mod forms;
pub mod gate;
pub mod handlers;
pub mod session;
