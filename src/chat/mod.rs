pub mod responder;
pub mod session;
pub mod types;
