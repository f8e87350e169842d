pub mod auth;
pub mod client;
pub mod config;
pub mod conversions;
pub mod credentials;
pub mod mapping;
pub mod pipeline;

pub use auth::CLOUD_PLATFORM_SCOPE;
pub use client::SpeechClient;
pub use config::GoogleConfig;
pub use credentials::ServiceAccountCredentials;
pub use pipeline::transcribe_audio;
