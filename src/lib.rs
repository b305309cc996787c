//! Buffered Rolling File Appender
//!
//! ----------------------------------------------------------------------------
//!
//! このクレートには、`BRFAppender(Buffered Rolling File Appender)`構造体が
//! 含まれており、この構造体は、ログを記録することを目的としている。
//! `BRFAppender`は、整形したログ行をメモリ上のバッファに蓄積し、以下いずれかの条件で
//! バッファの内容をファイルに書き出す。
//!
//! - バッファのサイズが指定されたサイズを超えたとき
//! - `Fatal`、`Error`、`Warn`のログを記録したとき
//! - 明示的に書き出しを指示したとき、または破棄されるとき
//!
//! 書き出し後のファイルサイズが指定されたサイズに達した場合、`BRFAppender`は、
//! ファイルを`<stem>.<n>.<extension>`のバックアップファイルに切り替える。
//! バックアップファイルは番号が大きいほど新しく、最大ファイル数を超える場合は、
//! 最も古い1番のファイルから削除する。
//!
//! `BRFLayer`を使用すると、`tracing`のイベントを`BRFAppender`に記録できる。

pub mod appenders;
pub mod buffer;
pub mod config;
pub mod entry;
pub mod error;
pub mod layer;
mod macros;
pub mod rotation;
pub mod severity;

pub use appenders::BRFAppender;
pub use config::{LoggerConfig, MAX_BUFF_SIZE};
pub use entry::LogEntry;
pub use error::{Error, Result};
pub use layer::BRFLayer;
pub use rotation::{Rotation, Rotator};
pub use severity::Severity;

/// クレートのバージョン。
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
