use crate::core::config::BUFFER_SIZE;
use crate::core::error::{FsError, Result};
use crate::io::source::{Source, SourceGuard};
use encoding_rs::Encoding;
use regex::bytes::Regex;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

#[derive(Debug, Clone)]
pub enum Delimiter {
    Bytes(Vec<u8>),
    Regex(Regex),
}

impl Delimiter {
    pub fn newline() -> Self {
        Delimiter::Bytes(vec![b'\n'])
    }

    pub fn literal<B: AsRef<[u8]>>(delimiter: B) -> Result<Self> {
        let delimiter = Delimiter::Bytes(delimiter.as_ref().to_vec());
        delimiter.validate()?;
        Ok(delimiter)
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        let delimiter = Delimiter::Regex(Regex::new(pattern)?);
        delimiter.validate()?;
        Ok(delimiter)
    }

    fn validate(&self) -> Result<()> {
        match self {
            Delimiter::Bytes(bytes) if bytes.is_empty() => Err(FsError::InvalidDelimiter(
                "delimiter must not be empty".to_string(),
            )),
            Delimiter::Regex(re) if re.is_match(b"") => Err(FsError::InvalidDelimiter(format!(
                "pattern `{}` matches the empty string",
                re.as_str()
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::newline()
    }
}

// The chunk after the last delimiter is only produced when non-empty;
// adjacent delimiters still produce an empty chunk between them.
pub struct LineReader<R> {
    reader: R,
    delimiter: Delimiter,
    buffer_size: usize,
    buf: Vec<u8>,
    pos: usize,
    eof: bool,
    consumed: u64,
    encoding: Option<&'static Encoding>,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R, delimiter: Delimiter) -> Result<Self> {
        delimiter.validate()?;
        Ok(Self {
            reader,
            delimiter,
            buffer_size: BUFFER_SIZE,
            buf: Vec::new(),
            pos: 0,
            eof: false,
            consumed: 0,
            encoding: None,
        })
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    // Text chunks are decoded with `encoding`, replacing malformed sequences,
    // instead of being checked as strict UTF-8.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> Result<()> {
        delimiter.validate()?;
        self.delimiter = delimiter;
        Ok(())
    }

    pub fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        match self.locate()? {
            Some((end, next)) => {
                let chunk = self.buf[self.pos..end].to_vec();
                self.pos = next;
                Ok(Some(chunk))
            }
            None => Ok(None),
        }
    }

    pub fn peek_chunk(&mut self) -> Result<Option<&[u8]>> {
        match self.locate()? {
            Some((end, _)) => Ok(Some(&self.buf[self.pos..end])),
            None => Ok(None),
        }
    }

    pub fn peek(&mut self, size: usize) -> Result<&[u8]> {
        while self.buf.len() - self.pos < size && !self.eof {
            self.fill()?;
        }
        let end = (self.pos + size).min(self.buf.len());
        Ok(&self.buf[self.pos..end])
    }

    pub fn chunks(&mut self) -> Chunks<'_, R> {
        Chunks { inner: self }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn locate(&mut self) -> Result<Option<(usize, usize)>> {
        // Relative to `pos`, which survives the compaction done by `fill`.
        let mut search_from = 0;
        loop {
            let start = self.pos + search_from;
            match &self.delimiter {
                Delimiter::Bytes(needle) => {
                    if let Some(idx) = find_bytes(&self.buf[start..], needle) {
                        let found = start + idx;
                        return Ok(Some((found, found + needle.len())));
                    }
                    let pending = self.buf.len() - self.pos;
                    search_from = pending.saturating_sub(needle.len() - 1);
                }
                Delimiter::Regex(re) => match find_regex(re, &self.buf, start) {
                    // A match touching the end of the buffer could grow with more data.
                    Some((m_start, m_end)) if m_end < self.buf.len() || self.eof => {
                        return Ok(Some((m_start, m_end)));
                    }
                    Some((m_start, _)) => search_from = m_start - self.pos,
                    None => search_from = 0,
                },
            }

            if self.eof {
                if self.pos < self.buf.len() {
                    let end = self.buf.len();
                    return Ok(Some((end, end)));
                }
                return Ok(None);
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> Result<usize> {
        if self.pos > 0 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }

        let len = self.buf.len();
        self.buf.resize(len + self.buffer_size, 0);
        let read = loop {
            match self.reader.read(&mut self.buf[len..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(len);
                    return Err(e.into());
                }
            }
        };
        self.buf.truncate(len + read);

        if read == 0 {
            self.eof = true;
        }
        self.consumed += read as u64;
        Ok(read)
    }
}

impl<R: Read + Seek> LineReader<R> {
    // Rewinds to where the reader stood when this LineReader was created.
    pub fn reset(&mut self, delimiter: Option<Delimiter>) -> Result<()> {
        if let Some(delimiter) = delimiter {
            self.set_delimiter(delimiter)?;
        }

        let back = i64::try_from(self.consumed)
            .map_err(|_| FsError::Io(std::io::Error::from(ErrorKind::InvalidInput)))?;
        self.reader.seek(SeekFrom::Current(-back))?;

        self.buf.clear();
        self.pos = 0;
        self.eof = false;
        self.consumed = 0;
        Ok(())
    }
}

impl LineReader<File> {
    pub fn open<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FsError::from_io(e, path))?;
        Self::new(file, delimiter)
    }
}

impl<'a> LineReader<SourceGuard<'a>> {
    pub fn from_source<S: Into<Source<'a>>>(src: S, delimiter: Delimiter) -> Result<Self> {
        Self::new(src.into().open()?, delimiter)
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let encoding = self.encoding;
        self.next_chunk()
            .transpose()
            .map(|chunk| -> Result<String> {
                let chunk = chunk?;
                match encoding {
                    Some(encoding) => Ok(encoding
                        .decode_without_bom_handling(&chunk)
                        .0
                        .into_owned()),
                    None => Ok(String::from_utf8(chunk)?),
                }
            })
    }
}

pub struct Chunks<'r, R> {
    inner: &'r mut LineReader<R>,
}

impl<R: Read> Iterator for Chunks<'_, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_chunk().transpose()
    }
}

pub fn readlines<'a, S>(src: S, delimiter: Option<Delimiter>) -> Result<LineReader<SourceGuard<'a>>>
where
    S: Into<Source<'a>>,
{
    LineReader::from_source(src, delimiter.unwrap_or_default())
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if let [byte] = needle {
        return haystack.iter().position(|b| b == byte);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_regex(re: &Regex, haystack: &[u8], mut start: usize) -> Option<(usize, usize)> {
    while start <= haystack.len() {
        let m = re.find_at(haystack, start)?;
        if !m.is_empty() {
            return Some((m.start(), m.end()));
        }
        start = m.end() + 1;
    }
    None
}
