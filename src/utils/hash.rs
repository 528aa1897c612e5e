use crate::core::config::FsConfig;
use crate::core::error::{FsError, Result};
use crate::io::source::{with_source, Source};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha256,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
        }
    }

    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Md5 => 32,
            Algorithm::Sha256 => 64,
        }
    }
}

impl FromStr for Algorithm {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Algorithm::Md5),
            "sha256" => Ok(Algorithm::Sha256),
            _ => Err(FsError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn checksum<'a, S: Into<Source<'a>>>(src: S, algorithm: Algorithm) -> Result<String> {
    checksum_with(src, algorithm, &FsConfig::default())
}

pub fn checksum_named<'a, S: Into<Source<'a>>>(src: S, algorithm: &str) -> Result<String> {
    checksum(src, algorithm.parse()?)
}

pub fn md5sum<'a, S: Into<Source<'a>>>(src: S) -> Result<String> {
    checksum(src, Algorithm::Md5)
}

pub fn sha256sum<'a, S: Into<Source<'a>>>(src: S) -> Result<String> {
    checksum(src, Algorithm::Sha256)
}

pub(crate) fn checksum_with<'a, S: Into<Source<'a>>>(
    src: S,
    algorithm: Algorithm,
    config: &FsConfig,
) -> Result<String> {
    with_source(src, |reader| match algorithm {
        Algorithm::Md5 => digest_reader::<Md5, _>(reader, config.buffer_size),
        Algorithm::Sha256 => digest_reader::<Sha256, _>(reader, config.buffer_size),
    })
}

fn digest_reader<D: Digest, R: Read + ?Sized>(reader: &mut R, buffer_size: usize) -> Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let count = reader.read(&mut buffer)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    Ok(hex::encode(hasher.finalize()))
}

pub fn hash_bytes(data: &[u8], algorithm: Algorithm) -> String {
    match algorithm {
        Algorithm::Md5 => hex::encode(Md5::digest(data)),
        Algorithm::Sha256 => hex::encode(Sha256::digest(data)),
    }
}
