pub mod account;
pub mod apply_application;

pub use account::*;
pub use apply_application::*;
