pub mod application;
pub mod client_context;
pub mod manifest;
pub mod scope;
