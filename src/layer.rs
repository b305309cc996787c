use std::{
    fmt::{self, Write as _},
    sync::Arc,
};

use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{layer::Context, Layer};

use crate::{appenders::BRFAppender, severity::Severity};

/// `tracing`のイベントを`BRFAppender`に記録するレイヤー
///
/// このクレート自身が発行するイベントは、ロックの再入を避けるために記録しない。
#[derive(Debug, Clone)]
pub struct BRFLayer {
    appender: Arc<BRFAppender>,
}

impl BRFLayer {
    pub fn new(appender: Arc<BRFAppender>) -> Self {
        Self { appender }
    }

    pub fn appender(&self) -> &Arc<BRFAppender> {
        &self.appender
    }
}

/// `tracing`のレベルを重要度に変換する。`DEBUG`は`Stamp`となる。
pub fn severity_of(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warn,
        Level::INFO => Severity::Info,
        Level::DEBUG => Severity::Stamp,
        _ => Severity::Trace,
    }
}

impl<S: Subscriber> Layer<S> for BRFLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let severity = severity_of(metadata.level());
        let file = metadata.file().unwrap_or_else(|| metadata.target());
        let line = metadata.line().unwrap_or(0);

        // 失敗はappender側で報告済み
        let _ = self.appender.log_with(severity, file, line, || {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            visitor.finish()
        });
    }
}

fn is_own_target(target: &str) -> bool {
    let own = module_path!().split("::").next().unwrap_or_default();
    target.split("::").next() == Some(own)
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.record_debug(field, &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
            return;
        }
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={:?}", field.name(), value);
    }
}
