/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - HTTP access to the GitOps and NG REST APIs
/// - File system operations (manifests, settings)
/// - Terminal input
pub mod filesystem;
pub mod http;
pub mod terminal;

// Re-export commonly used types
pub use filesystem::{manifest_store::ManifestStore, settings_store::SettingsStore};
pub use http::{api_client::GitOpsApi, api_client::HttpApiClient, response::ResponseBody};
pub use terminal::prompt::{ConsolePrompt, InputPrompt};
