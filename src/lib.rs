pub mod core;
pub mod io;
pub mod utils;

pub use crate::core::{FsConfig, FsConfigBuilder, FsError, FsUtils, FsUtilsBuilder, Result, BUFFER_SIZE};

pub use crate::io::{
    readlines, with_sink, with_source, Delimiter, LineReader, Sink, SinkGuard, Source, SourceGuard,
    WriteMode,
};

pub use crate::utils::{
    chardet, check_ascii, checksum, checksum_named, hash_bytes, is_ascii, line_count, makedir,
    makedir_with, md5sum, sha256sum, absolute_path, Algorithm, AsciiCheck, EncodingGuess,
};

pub mod prelude {
    pub use crate::core::{FsUtils, Result};
    pub use crate::io::{readlines, with_source, Delimiter, LineReader};
    pub use crate::utils::{checksum, is_ascii, line_count, makedir, Algorithm};
}
