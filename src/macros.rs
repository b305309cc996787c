/// 呼び出し元のファイル名と行番号を付けてログを記録する。
///
/// メッセージは`format!`と同じ引数で指定し、ログを出力する場合にのみ整形される。
/// 書き出しの失敗は呼び出し元には返却しない。
///
/// ```no_run
/// use buffered_rolling_file_appender::{log_at, BRFAppender, LoggerConfig, Severity};
///
/// let appender = BRFAppender::new(LoggerConfig::new("logs", "app.log")).unwrap();
/// log_at!(appender, Severity::Info, "started with {} workers", 4);
/// ```
#[macro_export]
macro_rules! log_at {
    ($appender:expr, $severity:expr, $($arg:tt)+) => {{
        let _ = $appender.log_with($severity, file!(), line!(), || format!($($arg)+));
    }};
}

#[macro_export]
macro_rules! log_fatal {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Fatal, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_stamp {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Stamp, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($appender:expr, $($arg:tt)+) => {
        $crate::log_at!($appender, $crate::Severity::Trace, $($arg)+)
    };
}
