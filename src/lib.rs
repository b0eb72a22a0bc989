pub mod archive;
pub mod commands;
pub mod download;
pub mod error;
pub mod http;
pub mod platform;
pub mod runtime;
pub mod scheme;
pub mod version;
