mod cache_control;
mod input_message;
mod request;
mod tool;

pub use cache_control::*;
pub use input_message::*;
pub use request::*;
pub use tool::*;
