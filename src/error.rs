use std::{io, path::PathBuf};

use thiserror::Error;

/// クレート内で使用する`Result`型。
pub type Result<T> = std::result::Result<T, Error>;

/// ロガーで発生するエラー。
///
/// どのエラーも回復可能であり、プロセスを停止させる理由にはならない。
#[derive(Debug, Error)]
pub enum Error {
    /// ログファイルを開けなかった。バッファの内容は保持される。
    #[error("unable to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ログファイルへの書き込みに失敗した。バッファの内容は保持される。
    #[error("unable to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 書き込み後のファイルサイズを取得できなかった。
    #[error("unable to read metadata of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ローテーション中のファイル名変更に失敗した。
    #[error("unable to rotate {from} to {to}: {source}")]
    Rotate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ローテーション中のファイル削除に失敗した。
    #[error("unable to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// ログディレクトリを作成できなかった。
    #[error("unable to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid log file name: {0:?}")]
    InvalidFileName(String),

    #[error("unknown severity: {0:?}")]
    ParseSeverity(String),
}
