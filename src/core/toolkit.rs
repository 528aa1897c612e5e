use crate::core::config::{FsConfig, FsConfigBuilder};
use crate::core::error::Result;
use crate::io::lines::{Delimiter, LineReader};
use crate::io::source::{Source, SourceGuard};
use crate::utils::count::line_count_with;
use crate::utils::encoding::{check_ascii_with, chardet_with, AsciiCheck, EncodingGuess};
use crate::utils::hash::{checksum_with, Algorithm};
use crate::utils::path::makedir;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct FsUtils {
    config: FsConfig,
}

impl FsUtils {
    pub fn new(config: FsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> FsUtilsBuilder {
        FsUtilsBuilder::new()
    }

    pub fn get_config(&self) -> &FsConfig {
        &self.config
    }

    pub fn checksum<'a, S: Into<Source<'a>>>(&self, src: S, algorithm: Algorithm) -> Result<String> {
        checksum_with(src, algorithm, &self.config)
    }

    pub fn line_count<'a, S: Into<Source<'a>>>(&self, src: S) -> Result<u64> {
        line_count_with(src, &self.config)
    }

    pub fn is_ascii<'a, S: Into<Source<'a>>>(&self, src: S) -> Result<bool> {
        Ok(self.check_ascii(src)?.is_ascii())
    }

    pub fn check_ascii<'a, S: Into<Source<'a>>>(&self, src: S) -> Result<AsciiCheck> {
        check_ascii_with(src, &self.config)
    }

    pub fn chardet<'a, S: Into<Source<'a>>>(&self, src: S) -> Result<EncodingGuess> {
        chardet_with(src, &self.config)
    }

    pub fn readlines<'a, S: Into<Source<'a>>>(
        &self,
        src: S,
        delimiter: Option<Delimiter>,
    ) -> Result<LineReader<SourceGuard<'a>>> {
        let reader = LineReader::from_source(src, delimiter.unwrap_or_default())?
            .with_buffer_size(self.config.buffer_size);
        Ok(match self.config.text_encoding()? {
            Some(encoding) => reader.with_encoding(encoding),
            None => reader,
        })
    }

    pub fn makedir<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        makedir(path)
    }
}

pub struct FsUtilsBuilder {
    config_builder: FsConfigBuilder,
}

impl FsUtilsBuilder {
    pub fn new() -> Self {
        Self {
            config_builder: FsConfigBuilder::new(),
        }
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config_builder = self.config_builder.buffer_size(size);
        self
    }

    pub fn ascii_sample_size(mut self, size: u64) -> Self {
        self.config_builder = self.config_builder.ascii_sample_size(size);
        self
    }

    pub fn inspect_whole_file(mut self) -> Self {
        self.config_builder = self.config_builder.inspect_whole_file();
        self
    }

    pub fn report_non_ascii(mut self, report: bool) -> Self {
        self.config_builder = self.config_builder.report_non_ascii(report);
        self
    }

    pub fn encoding<S: Into<String>>(mut self, label: S) -> Self {
        self.config_builder = self.config_builder.encoding(label);
        self
    }

    pub fn build(self) -> Result<FsUtils> {
        FsUtils::new(self.config_builder.build())
    }
}

impl Default for FsUtilsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FsError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let utils = FsUtils::builder()
            .buffer_size(8)
            .ascii_sample_size(4)
            .report_non_ascii(false)
            .build()
            .unwrap();

        assert_eq!(utils.get_config().buffer_size, 8);
        assert_eq!(utils.get_config().ascii_sample_size, Some(4));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        assert!(matches!(
            FsUtils::builder().buffer_size(0).build(),
            Err(FsError::Configuration(_))
        ));
    }

    #[test]
    fn test_helpers_honour_config() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("mixed.txt");
        fs::write(&file_path, "abcd\u{00e9}\nx").unwrap();

        let sampled = FsUtils::builder().ascii_sample_size(4).build().unwrap();
        assert!(sampled.is_ascii(&file_path).unwrap());

        let thorough = FsUtils::builder()
            .inspect_whole_file()
            .report_non_ascii(false)
            .build()
            .unwrap();
        assert!(!thorough.is_ascii(&file_path).unwrap());
        assert_eq!(thorough.line_count(&file_path).unwrap(), 2);

        let lines: Vec<String> = thorough
            .readlines(&file_path, None)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["abcd\u{00e9}", "x"]);
    }

    #[test]
    fn test_readlines_in_configured_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("cp1252.txt");
        fs::write(&file_path, b"caf\xE9\nna\xEFve\n").unwrap();

        let utils = FsUtils::builder().encoding("windows-1252").build().unwrap();
        let lines: Vec<String> = utils
            .readlines(&file_path, None)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["caf\u{00e9}", "na\u{00ef}ve"]);

        assert!(matches!(
            FsUtils::builder().encoding("no-such-codec").build(),
            Err(FsError::Configuration(_))
        ));
    }

    #[test]
    fn test_makedir_and_checksum() {
        let temp_dir = TempDir::new().unwrap();
        let utils = FsUtils::builder().buffer_size(2).build().unwrap();

        let dir = utils.makedir(temp_dir.path().join("out").join("sums")).unwrap();
        let file_path = dir.join("abc.txt");
        fs::write(&file_path, "abc").unwrap();

        assert_eq!(
            utils.checksum(&file_path, Algorithm::Md5).unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }
}
