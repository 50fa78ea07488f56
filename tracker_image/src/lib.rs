pub(crate) mod builder;
pub(crate) mod config;
pub(crate) mod docker;
pub(crate) mod process;
pub(crate) mod version;

pub mod cli;

pub(crate) type Result<T, E = Box<dyn std::error::Error + Send + Sync + 'static>> =
    std::result::Result<T, E>;
