pub mod settings;

pub use settings::{AuthConfig, ServerConfig, Settings, UpstreamConfig};
