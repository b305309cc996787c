use crate::severity::Severity;

/// ファイルへ書き出す前のログ行を蓄積するバッファ
///
/// 行は常に丸ごと追加され、途中で分割されることはない。
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// `LineBuffer`を作成する。
    ///
    /// # 引数
    ///
    /// * capacity: 書き出しを要求するまでに蓄積できるバイト数。0の場合は、追加のたびに書き出しを要求する。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, line: &str) {
        self.bytes.extend_from_slice(line.as_bytes());
    }

    /// ファイルへの書き出しが必要か確認する。
    ///
    /// バッファサイズが容量を超えた場合、または直前に追加した行の重要度が
    /// `Fatal`、`Error`、`Warn`のいずれかの場合に書き出しが必要となる。
    pub fn flush_required(&self, severity: Severity) -> bool {
        self.capacity == 0 || self.bytes.len() > self.capacity || severity.is_urgent()
    }

    /// バッファの内容をすべて取り出し、バッファを空にする。
    pub fn drain(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.bytes, Vec::with_capacity(self.capacity))
    }

    /// 書き出しに失敗した内容を、バッファの先頭に戻す。
    pub fn restore(&mut self, mut pending: Vec<u8>) {
        pending.append(&mut self.bytes);
        self.bytes = pending;
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
