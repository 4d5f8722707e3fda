pub mod account_details;
pub mod apply_application;
