use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::Error;

/// ログの重要度
///
/// 重要度が高い順に並んでおり、`Fatal < Error < ... < Trace`となる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Error,
    Warn,
    Info,
    Stamp,
    Trace,
}

impl Severity {
    /// ログ行に出力する、5文字幅のラベルを返却する。
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => " WARN",
            Severity::Info => " INFO",
            Severity::Stamp => "STAMP",
            Severity::Trace => "TRACE",
        }
    }

    /// バッファの充填量に関係なく、即座にファイルへ書き出すべき重要度であるか確認する。
    pub const fn is_urgent(self) -> bool {
        matches!(self, Severity::Fatal | Severity::Error | Severity::Warn)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().trim_start())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "stamp" => Ok(Severity::Stamp),
            "trace" => Ok(Severity::Trace),
            _ => Err(Error::ParseSeverity(s.to_string())),
        }
    }
}

/// 閾値を表す文字列を解析する。
///
/// `off`または`none`は、ログの出力を無効にする閾値(`None`)となる。
pub fn parse_threshold(s: &str) -> Result<Option<Severity>, Error> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Ok(None),
        _ => s.parse().map(Some),
    }
}

/// ログを受け付けるか判定する。
///
/// # 引数
///
/// * severity: ログの重要度。
/// * threshold: 出力する最も詳細な重要度。`None`の場合はすべて拒否する。
///
/// # 戻り値
///
/// 受け付ける場合は`true`。
pub fn accept(severity: Severity, threshold: Option<Severity>) -> bool {
    threshold.map_or(false, |threshold| severity <= threshold)
}
