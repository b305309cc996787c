use std::{
    fs, io,
    path::{Path, PathBuf},
};

use regex::Regex;

use crate::error::{Error, Result};

/// ローテーションの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// ファイルサイズが上限に達していないため、ローテーションしなかった。
    NotNeeded,
    /// 現在のファイルを指定された番号のバックアップファイルに切り替えた。
    Retired(u32),
    /// バックアップファイルを残さない設定のため、現在のファイルを削除した。
    Discarded,
}

/// ファイルサイズに基づいて、ログファイルをバックアップファイルに切り替える。
///
/// バックアップファイルは`<stem>.<n>.<extension>`(`n`は`1..=max_backups`)と命名され、
/// 番号が大きいほど新しい。バックアップファイルが上限に達している場合は、最も古い1番の
/// ファイルを破棄して、番号を1つずつ繰り下げる。
#[derive(Debug)]
pub struct Rotator {
    directory: PathBuf,
    file_name: String,
    stem: String,
    extension: Option<String>,
    max_file_size: u64,
    max_backups: u32,
    backup_pattern: Regex,
}

impl Rotator {
    /// `Rotator`を作成する。
    ///
    /// # 引数
    ///
    /// * directory: ログファイルを作成するディレクトリ。
    /// * file_name: `<stem>.<extension>`形式のログファイル名。最初の`.`で分割する。
    /// * max_file_size: ローテーションするファイルサイズ(バイト)。
    /// * max_backups: 残す最大バックアップファイル数。
    ///
    /// # 戻り値
    ///
    /// `Rotator`インスタンス。ファイル名が不正な場合はエラー。
    pub fn new(
        directory: impl AsRef<Path>,
        file_name: &str,
        max_file_size: u64,
        max_backups: u32,
    ) -> Result<Self> {
        let (stem, extension) = split_file_name(file_name)?;
        let pattern = match &extension {
            Some(extension) => format!(
                r"^{}\.(\d+)\.{}$",
                regex::escape(&stem),
                regex::escape(extension)
            ),
            None => format!(r"^{}\.(\d+)$", regex::escape(&stem)),
        };
        let backup_pattern = Regex::new(&pattern).expect(
            "Unable to build the backup file pattern; this is a bug in buffered-rolling-file-appender",
        );

        Ok(Self {
            directory: directory.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
            stem,
            extension,
            max_file_size,
            max_backups,
            backup_pattern,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn backup_path(&self, slot: u32) -> PathBuf {
        let file_name = match &self.extension {
            Some(extension) => format!("{}.{}.{}", self.stem, slot, extension),
            None => format!("{}.{}", self.stem, slot),
        };
        self.directory.join(file_name)
    }

    /// 書き出し後のファイルサイズが上限以上であれば、ローテーションする。
    ///
    /// ファイル名の変更に失敗した場合は再試行せず、エラーを返却する。現在のファイルは
    /// そのまま残るため、次に成功するまで上限を超えて書き込まれる。
    pub fn rotate_if_needed(&self, current_size: u64) -> Result<Rotation> {
        if current_size < self.max_file_size {
            return Ok(Rotation::NotNeeded);
        }
        self.rotate()
    }

    fn rotate(&self) -> Result<Rotation> {
        let active = self.active_path();

        if self.max_backups == 0 {
            fs::remove_file(&active).map_err(|source| Error::Remove {
                path: active,
                source,
            })?;
            return Ok(Rotation::Discarded);
        }

        let start = if self.backup_path(self.max_backups).exists() {
            self.shift_backups()?;
            self.max_backups
        } else {
            1
        };

        let slot = (start..=self.max_backups)
            .find(|&slot| !self.backup_path(slot).exists())
            // 空きがなければ最新の番号を上書きする
            .unwrap_or(self.max_backups);
        let target = self.backup_path(slot);
        fs::rename(&active, &target).map_err(|source| Error::Rotate {
            from: active,
            to: target,
            source,
        })?;

        Ok(Rotation::Retired(slot))
    }

    /// 2番以降のファイルを1つずつ繰り下げる。最も古い1番のファイルは、2番のファイルで
    /// 上書きされて破棄される。
    ///
    /// バックアップファイルが1つだけの場合は何もせず、現在のファイルで1番を上書きする。
    fn shift_backups(&self) -> Result<()> {
        for slot in 2..=self.max_backups {
            let from = self.backup_path(slot);
            let to = self.backup_path(slot - 1);
            match fs::rename(&from, &to) {
                Ok(()) => {}
                // 欠番
                Err(source) if source.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(Error::Rotate { from, to, source }),
            }
        }

        Ok(())
    }

    /// ディレクトリに存在するバックアップファイルを、番号の昇順で返却する。
    pub fn backups(&self) -> io::Result<Vec<(u32, PathBuf)>> {
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let slot = self
                .backup_pattern
                .captures(file_name)
                .and_then(|captures| captures[1].parse::<u32>().ok());
            if let Some(slot) = slot {
                backups.push((slot, entry.path()));
            }
        }
        backups.sort_by_key(|(slot, _)| *slot);

        Ok(backups)
    }
}

/// ファイル名を最初の`.`で語幹と拡張子に分割する。
fn split_file_name(file_name: &str) -> Result<(String, Option<String>)> {
    if file_name.contains(['/', '\\']) {
        return Err(Error::InvalidFileName(file_name.to_string()));
    }

    let (stem, extension) = match file_name.split_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (file_name, None),
    };
    if stem.is_empty() {
        return Err(Error::InvalidFileName(file_name.to_string()));
    }

    Ok((
        stem.to_string(),
        extension.filter(|e| !e.is_empty()).map(str::to_string),
    ))
}
