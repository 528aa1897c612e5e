use crate::core::config::FsConfig;
use crate::core::error::Result;
use crate::io::source::{with_source, Source};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingGuess {
    pub encoding: &'static Encoding,
    pub from_bom: bool,
}

impl EncodingGuess {
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsciiCheck {
    Ascii { inspected: u64 },
    NonAscii { offset: u64, byte: u8 },
}

impl AsciiCheck {
    pub fn is_ascii(&self) -> bool {
        matches!(self, AsciiCheck::Ascii { .. })
    }
}

pub fn detect_encoding(data: &[u8]) -> EncodingGuess {
    if let Some((encoding, _)) = Encoding::for_bom(data) {
        return EncodingGuess {
            encoding,
            from_bom: true,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    EncodingGuess {
        encoding: detector.guess(None, true),
        from_bom: false,
    }
}

pub fn chardet<'a, S: Into<Source<'a>>>(src: S) -> Result<EncodingGuess> {
    chardet_with(src, &FsConfig::default())
}

pub(crate) fn chardet_with<'a, S: Into<Source<'a>>>(src: S, config: &FsConfig) -> Result<EncodingGuess> {
    with_source(src, |reader| {
        // BOMs are up to 3 bytes and a short first read must not hide one.
        let mut prefix = [0u8; 3];
        let mut filled = 0;
        while filled < prefix.len() {
            let read = reader.read(&mut prefix[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        if let Some((encoding, _)) = Encoding::for_bom(&prefix[..filled]) {
            return Ok(EncodingGuess {
                encoding,
                from_bom: true,
            });
        }

        let mut detector = EncodingDetector::new();
        detector.feed(&prefix[..filled], false);

        let mut buffer = vec![0u8; config.buffer_size.max(1)];
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            detector.feed(&buffer[..read], false);
        }

        detector.feed(&[], true);
        Ok(EncodingGuess {
            encoding: detector.guess(None, true),
            from_bom: false,
        })
    })
}

// Only the first `ascii_sample_size` bytes are inspected.
pub fn is_ascii<'a, S: Into<Source<'a>>>(src: S) -> Result<bool> {
    Ok(check_ascii(src)?.is_ascii())
}

pub fn check_ascii<'a, S: Into<Source<'a>>>(src: S) -> Result<AsciiCheck> {
    check_ascii_with(src, &FsConfig::default())
}

pub(crate) fn check_ascii_with<'a, S: Into<Source<'a>>>(src: S, config: &FsConfig) -> Result<AsciiCheck> {
    with_source(src, |reader| {
        let limit = config.ascii_sample_size.unwrap_or(u64::MAX);
        let mut sample = reader.take(limit);
        let mut buffer = vec![0u8; config.buffer_size.max(1)];
        let mut inspected = 0u64;

        loop {
            let read = sample.read(&mut buffer)?;
            if read == 0 {
                return Ok(AsciiCheck::Ascii { inspected });
            }

            let data = &buffer[..read];
            if let Some(idx) = data.iter().position(|b| !b.is_ascii()) {
                let offset = inspected + idx as u64;
                let byte = data[idx];
                if config.report_non_ascii {
                    log::warn!(
                        "not ascii text: {:#04x} at {} / {:#x}, possibly {}",
                        byte,
                        offset,
                        offset,
                        detect_encoding(data).name()
                    );
                }
                return Ok(AsciiCheck::NonAscii { offset, byte });
            }
            inspected += read as u64;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FsError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    fn quiet(sample: Option<u64>, buffer_size: usize) -> FsConfig {
        FsConfig {
            buffer_size,
            ascii_sample_size: sample,
            report_non_ascii: false,
            ..FsConfig::default()
        }
    }

    #[test]
    fn test_is_ascii_file() {
        let temp_dir = TempDir::new().unwrap();
        let ascii = temp_dir.path().join("ascii.txt");
        let utf8 = temp_dir.path().join("utf8.txt");
        fs::write(&ascii, "abc\r\n\tdef\n").unwrap();
        fs::write(&utf8, "abc\u{00d6}").unwrap();

        assert!(is_ascii(&ascii).unwrap());
        assert!(!is_ascii(&utf8).unwrap());
    }

    #[test]
    fn test_reports_first_offending_byte() {
        let mut cursor = Cursor::new(b"0123456\xC3\x96".to_vec());
        let check = check_ascii_with(&mut cursor, &quiet(None, 3)).unwrap();
        assert_eq!(check, AsciiCheck::NonAscii { offset: 7, byte: 0xC3 });
    }

    #[test]
    fn test_sample_is_bounded() {
        let mut content = vec![b'a'; 100];
        content.push(0xFF);

        let mut cursor = Cursor::new(content.clone());
        let check = check_ascii_with(&mut cursor, &quiet(Some(100), 16)).unwrap();
        assert_eq!(check, AsciiCheck::Ascii { inspected: 100 });

        let mut cursor = Cursor::new(content);
        assert!(!check_ascii_with(&mut cursor, &quiet(None, 16)).unwrap().is_ascii());
    }

    #[test]
    fn test_empty_is_ascii() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(is_ascii(&mut cursor).unwrap());
    }

    #[test]
    fn test_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(is_ascii(&missing), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(detect_encoding("abc\u{00d6}".as_bytes()).encoding, encoding_rs::UTF_8);

        let guess = detect_encoding(&[0xFF, 0xFE, b'a', 0x00]);
        assert!(guess.from_bom);
        assert_eq!(guess.encoding, encoding_rs::UTF_16LE);
    }

    #[test]
    fn test_chardet_streams_whole_content() {
        let mut content = vec![b'x'; 64];
        content.extend_from_slice("caf\u{00e9}".as_bytes());
        let config = FsConfig {
            buffer_size: 8,
            ..FsConfig::default()
        };

        let guess = chardet_with(&mut Cursor::new(content), &config).unwrap();
        assert_eq!(guess.name(), "UTF-8");
        assert!(!guess.from_bom);
    }

    #[test]
    fn test_chardet_sees_bom_through_short_reads() {
        let mut content = vec![0xFF, 0xFE];
        for unit in "hello".encode_utf16() {
            content.extend_from_slice(&unit.to_le_bytes());
        }

        let whole = chardet(&mut Cursor::new(content.clone())).unwrap();
        let trickled = chardet(&mut Trickle(Cursor::new(content))).unwrap();

        assert_eq!(whole, trickled);
        assert_eq!(trickled.encoding, encoding_rs::UTF_16LE);
        assert!(trickled.from_bom);
    }

    #[test]
    fn test_chardet_short_input_without_bom() {
        let guess = chardet(&mut Trickle(Cursor::new(b"ab".to_vec()))).unwrap();
        assert!(!guess.from_bom);
    }
}
