mod message;
mod request;
mod tool;

pub use message::*;
pub use request::*;
pub use tool::*;
