use crate::core::config::FsConfig;
use crate::core::error::Result;
use crate::io::source::{with_source, Source};
use std::io::Read;

pub fn line_count<'a, S: Into<Source<'a>>>(src: S) -> Result<u64> {
    line_count_with(src, &FsConfig::default())
}

pub(crate) fn line_count_with<'a, S: Into<Source<'a>>>(src: S, config: &FsConfig) -> Result<u64> {
    with_source(src, |reader| {
        let mut buffer = vec![0u8; config.buffer_size.max(1)];
        let mut count = 0u64;
        let mut last = None;

        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            count += buffer[..read].iter().filter(|&&b| b == b'\n').count() as u64;
            last = Some(buffer[read - 1]);
        }

        if matches!(last, Some(byte) if byte != b'\n') {
            count += 1;
        }
        Ok(count)
    })
}
