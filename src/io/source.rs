use crate::core::error::{FsError, Result};
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub enum Source<'a> {
    Path(Cow<'a, Path>),
    Reader(&'a mut dyn Read),
}

impl<'a> Source<'a> {
    pub fn is_path(&self) -> bool {
        matches!(self, Source::Path(_))
    }

    pub fn open(self) -> Result<SourceGuard<'a>> {
        let handle = match self {
            Source::Path(path) => {
                let file = File::open(path.as_ref()).map_err(|e| FsError::from_io(e, &path))?;
                log::debug!("opened {} for reading", path.display());
                Handle::Managed {
                    file,
                    path: path.into_owned(),
                }
            }
            Source::Reader(reader) => Handle::Borrowed(reader),
        };
        Ok(SourceGuard { handle })
    }
}

impl<'a> From<&'a Path> for Source<'a> {
    fn from(path: &'a Path) -> Self {
        Source::Path(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a PathBuf> for Source<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Source::Path(Cow::Borrowed(path.as_path()))
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Source::Path(Cow::Owned(path))
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(path: &'a str) -> Self {
        Source::Path(Cow::Borrowed(Path::new(path)))
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(path: &'a String) -> Self {
        Source::Path(Cow::Borrowed(Path::new(path.as_str())))
    }
}

impl From<String> for Source<'_> {
    fn from(path: String) -> Self {
        Source::Path(Cow::Owned(PathBuf::from(path)))
    }
}

impl<'a, R: Read + 'a> From<&'a mut R> for Source<'a> {
    fn from(reader: &'a mut R) -> Self {
        Source::Reader(reader)
    }
}

enum Handle<'a, W: ?Sized> {
    Managed { file: File, path: PathBuf },
    Borrowed(&'a mut W),
}

impl<W: ?Sized> Handle<'_, W> {
    fn path(&self) -> Option<&Path> {
        match self {
            Handle::Managed { path, .. } => Some(path),
            Handle::Borrowed(_) => None,
        }
    }
}

pub struct SourceGuard<'a> {
    handle: Handle<'a, dyn Read + 'a>,
}

impl SourceGuard<'_> {
    pub fn is_managed(&self) -> bool {
        matches!(self.handle, Handle::Managed { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        self.handle.path()
    }
}

impl Read for SourceGuard<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.handle {
            Handle::Managed { file, .. } => file.read(buf),
            Handle::Borrowed(reader) => reader.read(buf),
        }
    }
}

impl Drop for SourceGuard<'_> {
    fn drop(&mut self) {
        if let Some(path) = self.handle.path() {
            log::trace!("closing {}", path.display());
        }
    }
}

pub fn with_source<'a, S, F, T>(src: S, f: F) -> Result<T>
where
    S: Into<Source<'a>>,
    F: FnOnce(&mut SourceGuard<'a>) -> Result<T>,
{
    let mut guard = src.into().open()?;
    f(&mut guard)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
    CreateNew,
}

impl WriteMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            WriteMode::Truncate => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
            WriteMode::CreateNew => options.write(true).create_new(true),
        };
        options
    }
}

pub enum Sink<'a> {
    Path(Cow<'a, Path>),
    Writer(&'a mut dyn Write),
}

impl<'a> Sink<'a> {
    pub fn open(self, mode: WriteMode) -> Result<SinkGuard<'a>> {
        let handle = match self {
            Sink::Path(path) => {
                let file = mode
                    .options()
                    .open(path.as_ref())
                    .map_err(|e| FsError::from_io(e, &path))?;
                log::debug!("opened {} for writing ({:?})", path.display(), mode);
                Handle::Managed {
                    file,
                    path: path.into_owned(),
                }
            }
            Sink::Writer(writer) => Handle::Borrowed(writer),
        };
        Ok(SinkGuard { handle })
    }
}

impl<'a> From<&'a Path> for Sink<'a> {
    fn from(path: &'a Path) -> Self {
        Sink::Path(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a PathBuf> for Sink<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Sink::Path(Cow::Borrowed(path.as_path()))
    }
}

impl From<PathBuf> for Sink<'_> {
    fn from(path: PathBuf) -> Self {
        Sink::Path(Cow::Owned(path))
    }
}

impl<'a> From<&'a str> for Sink<'a> {
    fn from(path: &'a str) -> Self {
        Sink::Path(Cow::Borrowed(Path::new(path)))
    }
}

impl<'a, W: Write + 'a> From<&'a mut W> for Sink<'a> {
    fn from(writer: &'a mut W) -> Self {
        Sink::Writer(writer)
    }
}

pub struct SinkGuard<'a> {
    handle: Handle<'a, dyn Write + 'a>,
}

impl SinkGuard<'_> {
    pub fn is_managed(&self) -> bool {
        matches!(self.handle, Handle::Managed { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        self.handle.path()
    }
}

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.handle {
            Handle::Managed { file, .. } => file.write(buf),
            Handle::Borrowed(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.handle {
            Handle::Managed { file, .. } => file.flush(),
            Handle::Borrowed(writer) => writer.flush(),
        }
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if let Some(path) = self.handle.path() {
            log::trace!("closing {}", path.display());
        }
    }
}

pub fn with_sink<'a, S, F, T>(sink: S, mode: WriteMode, f: F) -> Result<T>
where
    S: Into<Sink<'a>>,
    F: FnOnce(&mut SinkGuard<'a>) -> Result<T>,
{
    let mut guard = sink.into().open(mode)?;
    let out = f(&mut guard)?;
    guard.flush()?;
    Ok(out)
}
