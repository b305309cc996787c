use std::{
    fmt::Display,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
    buffer::LineBuffer,
    config::LoggerConfig,
    entry::LogEntry,
    error::{Error, Result},
    rotation::{Rotation, Rotator},
    severity::{self, Severity},
};

/// Buffered Rolling File Appender
///
/// ログ行をメモリ上のバッファに蓄積し、条件を満たしたときにファイルへ書き出す。
/// 書き出し後のファイルサイズが上限に達した場合は、ファイルをバックアップファイルに
/// 切り替える。
///
/// 1つの`BRFAppender`に対する操作は、すべて1つのロックで直列化される。そのため、
/// 複数のスレッドから同時に呼び出しても、ログ行が途中で混ざることはない。
#[derive(Debug)]
pub struct BRFAppender {
    threshold: Option<Severity>,
    echo_to_stdout: bool,
    closed: bool,
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    buffer: LineBuffer,
    rotator: Rotator,
}

impl BRFAppender {
    /// `BRFAppender`を作成する。
    ///
    /// ログディレクトリが存在しない場合は作成する。
    ///
    /// # 引数
    ///
    /// * config: ロガーの設定。
    ///
    /// # 戻り値
    ///
    /// `BRFAppender`インスタンス。
    pub fn new(config: LoggerConfig) -> Result<Self> {
        let rotator = Rotator::new(
            &config.directory,
            &config.file_name,
            config.max_file_size,
            config.max_backups,
        )?;
        fs::create_dir_all(&config.directory).map_err(|source| Error::CreateDir {
            path: config.directory.clone(),
            source,
        })?;

        Ok(Self {
            threshold: config.threshold,
            echo_to_stdout: config.echo_to_stdout,
            closed: false,
            state: Mutex::new(State {
                buffer: LineBuffer::with_capacity(config.effective_buffer_size()),
                rotator,
            }),
        })
    }

    pub fn threshold(&self) -> Option<Severity> {
        self.threshold
    }

    /// 指定された重要度のログを出力するか確認する。
    pub fn enabled(&self, severity: Severity) -> bool {
        severity::accept(severity, self.threshold)
    }

    /// ログを記録する。
    ///
    /// 閾値より詳細なログは何もせずに破棄する。書き出しやローテーションに失敗した場合は
    /// エラーを返却するが、書き出せなかったログ行はバッファに残り、次の書き出しで再試行される。
    pub fn submit(&self, entry: &LogEntry) -> Result<()> {
        if !self.enabled(entry.severity) {
            return Ok(());
        }
        self.append_line(entry.severity, || entry.format_line())
    }

    /// メッセージを指定してログを記録する。
    pub fn log(
        &self,
        severity: Severity,
        file: &str,
        line: u32,
        message: impl Display,
    ) -> Result<()> {
        self.log_with(severity, file, line, || message.to_string())
    }

    /// ログを記録する。メッセージは、ログを出力する場合にのみ作成される。
    pub fn log_with<F>(&self, severity: Severity, file: &str, line: u32, message: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if !self.enabled(severity) {
            return Ok(());
        }
        let message = message();
        // 日時はロック内で取得し、ファイル内の行の順序と一致させる
        self.append_line(severity, || {
            LogEntry::capture(severity, file, line, message).format_line()
        })
    }

    /// バッファの内容を、書き出し条件に関係なくファイルへ書き出す。
    ///
    /// バッファが空の場合は、ファイルへの書き込みもローテーションも行わない。
    pub fn flush(&self) -> Result<()> {
        let result = self.lock().write_out();
        report(&result);
        result
    }

    /// バッファの内容を書き出して、`BRFAppender`を破棄する。
    ///
    /// 書き出しに失敗した場合はエラーを返却する。破棄時にもう一度だけ書き出しを試みるが、
    /// その失敗は報告しない。
    pub fn close(mut self) -> Result<()> {
        let result = self.flush();
        self.closed = true;
        result
    }

    /// バッファに蓄積されているバイト数を返却する。
    pub fn buffered_len(&self) -> usize {
        self.lock().buffer.len()
    }

    pub fn active_path(&self) -> PathBuf {
        self.lock().rotator.active_path()
    }

    pub fn backup_path(&self, slot: u32) -> PathBuf {
        self.lock().rotator.backup_path(slot)
    }

    /// 存在するバックアップファイルを、番号の昇順で返却する。
    pub fn backups(&self) -> io::Result<Vec<(u32, PathBuf)>> {
        self.lock().rotator.backups()
    }

    /// ロックを取得して、ログ行をバッファに追加する。
    fn append_line<F>(&self, severity: Severity, line: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        let result = {
            let mut state = self.lock();
            let line = line();
            if self.echo_to_stdout {
                print!("{}", line);
            }
            state.buffer.append(&line);
            if state.buffer.flush_required(severity) {
                state.write_out()
            } else {
                Ok(())
            }
        };

        report(&result);
        result
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // ロガーの失敗で呼び出し元を停止させない
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BRFAppender {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        let result = state.write_out();
        if !self.closed {
            report(&result);
        }
    }
}

impl State {
    /// バッファの内容をファイルへ追記し、必要であればローテーションする。
    fn write_out(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let path = self.rotator.active_path();
        let mut file = create_writer(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;

        let pending = self.buffer.drain();
        if let Err(source) = file.write_all(&pending).and_then(|_| file.flush()) {
            self.buffer.restore(pending);
            return Err(Error::Write { path, source });
        }

        let current_size = file
            .metadata()
            .map_err(|source| Error::Metadata {
                path: path.clone(),
                source,
            })?
            .len();
        drop(file);

        match self.rotator.rotate_if_needed(current_size)? {
            Rotation::NotNeeded => {}
            rotation => {
                tracing::debug!(?rotation, size = current_size, "rotated {}", path.display())
            }
        }

        Ok(())
    }
}

/// ライターを作成する。
///
/// ログディレクトリが削除されていた場合は、作成し直してから再度開く。
fn create_writer(path: &Path) -> io::Result<File> {
    let mut open_options = OpenOptions::new();
    open_options.append(true).create(true);

    let new_file = open_options.open(path);
    if new_file.is_err() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
            return open_options.open(path);
        }
    }

    new_file
}

/// 書き出しの失敗を運用者に知らせる。ロックを解放してから呼び出すこと。
fn report(result: &Result<()>) {
    match result {
        Ok(()) => {}
        Err(err @ (Error::Rotate { .. } | Error::Remove { .. })) => {
            tracing::warn!(error = %err, "log rotation skipped")
        }
        Err(err) => tracing::error!(error = %err, "unable to flush buffered log lines"),
    }
}
