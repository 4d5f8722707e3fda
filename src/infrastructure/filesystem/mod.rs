pub mod manifest_store;
pub mod settings_store;
