use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::severity::{parse_threshold, Severity};

/// バッファサイズの上限(バイト)。これを超える値は切り詰められる。
pub const MAX_BUFF_SIZE: usize = 512 * 1024;

/// ロガーの設定
///
/// ロガーの作成後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// ログファイルを作成するディレクトリ。
    pub directory: PathBuf,
    /// `<stem>.<extension>`形式のログファイル名。
    pub file_name: String,
    /// ローテーションするファイルサイズ(バイト)。
    pub max_file_size: u64,
    /// ファイルへ書き出すバッファサイズ(バイト)。
    pub max_buffer_size: usize,
    /// 残す最大バックアップファイル数。
    pub max_backups: u32,
    /// 出力する最も詳細な重要度。`None`の場合は出力しない。
    #[serde(deserialize_with = "deserialize_threshold")]
    pub threshold: Option<Severity>,
    /// ログ行を標準出力にも出力するか。
    pub echo_to_stdout: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "app.log".to_string(),
            max_file_size: 10 * 1024 * 1024,
            max_buffer_size: 64 * 1024,
            max_backups: 5,
            threshold: Some(Severity::Info),
            echo_to_stdout: false,
        }
    }
}

impl LoggerConfig {
    /// 既定値で`LoggerConfig`を作成する。
    ///
    /// # 引数
    ///
    /// * directory: ログファイルを作成するディレクトリ。
    /// * file_name: ログファイル名。
    pub fn new(directory: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_max_buffer_size(mut self, max_buffer_size: usize) -> Self {
        self.max_buffer_size = max_buffer_size;
        self
    }

    pub fn with_max_backups(mut self, max_backups: u32) -> Self {
        self.max_backups = max_backups;
        self
    }

    pub fn with_threshold(mut self, threshold: Option<Severity>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_echo_to_stdout(mut self, echo_to_stdout: bool) -> Self {
        self.echo_to_stdout = echo_to_stdout;
        self
    }

    /// 実際に使用するバッファサイズを返却する。
    ///
    /// バッファサイズは`MAX_BUFF_SIZE`で切り詰められる。切り詰めた結果がファイルサイズを
    /// 超える場合、バッファリングは無効(0)になり、すべてのログが即座に書き出される。
    pub fn effective_buffer_size(&self) -> usize {
        let clamped = self.max_buffer_size.min(MAX_BUFF_SIZE);
        if clamped as u64 > self.max_file_size {
            0
        } else {
            clamped
        }
    }
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_threshold(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
