use std::thread;

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::severity::Severity;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:6]");

/// 1件のログ
///
/// ログ行に整形された後は破棄される。
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: Severity,
    pub timestamp: OffsetDateTime,
    pub thread: String,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl LogEntry {
    /// 現在の日時とスレッドで`LogEntry`を作成する。
    ///
    /// ローカルのオフセットを決定できない場合は、UTCの日時を使用する。
    pub fn capture(
        severity: Severity,
        file: impl Into<String>,
        line: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            timestamp: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            thread: current_thread_tag(),
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// ログ行に整形する。
    ///
    /// ログ行は`DATE TIME THREAD-ID SEVERITY [FILE:LINE] MESSAGE`に改行を付加したものとなる。
    pub fn format_line(&self) -> String {
        let date = self
            .timestamp
            .format(DATE_FORMAT)
            .expect("Unable to format OffsetDateTime; this is a bug in buffered-rolling-file-appender");
        let time = self
            .timestamp
            .format(TIME_FORMAT)
            .expect("Unable to format OffsetDateTime; this is a bug in buffered-rolling-file-appender");

        format!(
            "{} {} {} {} [{}:{}] {}\n",
            date,
            time,
            self.thread,
            self.severity.label(),
            self.file,
            self.line,
            self.message
        )
    }
}

/// 現在のスレッドの識別子を16進数で返却する。
fn current_thread_tag() -> String {
    let id = format!("{:?}", thread::current().id());
    let digits = id.trim_start_matches("ThreadId(").trim_end_matches(')');

    match digits.parse::<u64>() {
        Ok(n) => format!("{:x}", n),
        Err(_) => digits.to_string(),
    }
}
