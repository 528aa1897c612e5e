pub mod config;
pub mod error;
pub mod toolkit;

pub use config::{FsConfig, FsConfigBuilder, ASCII_SAMPLE_SIZE, BUFFER_SIZE};
pub use error::{FsError, Result};
pub use toolkit::{FsUtils, FsUtilsBuilder};
