pub mod count;
pub mod encoding;
pub mod hash;
pub mod path;

pub use count::line_count;
pub use encoding::{
    chardet, check_ascii, detect_encoding, is_ascii, AsciiCheck, EncodingGuess,
};
pub use hash::{checksum, checksum_named, hash_bytes, md5sum, sha256sum, Algorithm};
pub use path::{absolute_path, makedir, makedir_with, normalize_path};
