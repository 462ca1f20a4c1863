use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde_json::Value;

use crate::models::RecordId;

/// The files a record can own inside the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFile {
    Report,
    Config,
}

impl RecordFile {
    fn suffix(self) -> &'static str {
        match self {
            RecordFile::Report => ".json",
            RecordFile::Config => "_config.zip",
        }
    }
}

/// Flat-directory persistence for benchmark records.
///
/// Every record is `<id>.json` plus an optional `<id>_config.zip`. The most
/// recent upload is mirrored under the `latest` alias. Nothing here locks:
/// concurrent uploads race on the alias and the last writer wins.
#[derive(Debug, Clone)]
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: &RecordId, file: RecordFile) -> PathBuf {
        self.root.join(format!("{}{}", id.as_str(), file.suffix()))
    }

    /// Write `contents` as `file` of record `id`, and again under the
    /// `latest` alias when `mirror_latest` is set. No rollback: if the mirror
    /// write fails the record itself stays on disk.
    pub async fn write(
        &self,
        id: &RecordId,
        file: RecordFile,
        contents: &[u8],
        mirror_latest: bool,
    ) -> io::Result<()> {
        tokio::fs::write(self.path_for(id, file), contents).await?;

        if mirror_latest && !id.is_latest() {
            tokio::fs::write(self.path_for(&RecordId::latest(), file), contents).await?;
        }

        Ok(())
    }

    /// Store a report pretty-printed with two-space indentation.
    pub async fn save_report(&self, id: &RecordId, report: &Value) -> io::Result<()> {
        let mut pretty = serde_json::to_vec_pretty(report)?;
        pretty.push(b'\n');
        self.write(id, RecordFile::Report, &pretty, true).await
    }

    /// Store a configuration archive byte-for-byte.
    pub async fn save_config(&self, id: &RecordId, archive: &[u8]) -> io::Result<()> {
        self.write(id, RecordFile::Config, archive, true).await
    }

    /// Drop the `latest` alias of `file`, so the alias never pairs the newest
    /// report with an older record's archive. A missing alias is fine.
    pub async fn clear_latest(&self, file: RecordFile) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(&RecordId::latest(), file)).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    pub async fn load_report(&self, id: &RecordId) -> io::Result<Option<Value>> {
        let Some(raw) = self.read(id, RecordFile::Report).await? else {
            return Ok(None);
        };
        let report = serde_json::from_slice(&raw)?;
        Ok(Some(report))
    }

    pub async fn load_config(&self, id: &RecordId) -> io::Result<Option<Bytes>> {
        Ok(self.read(id, RecordFile::Config).await?.map(Bytes::from))
    }

    /// Whether a configuration archive sits next to the record.
    pub async fn has_config(&self, id: &RecordId) -> io::Result<bool> {
        tokio::fs::try_exists(self.path_for(id, RecordFile::Config)).await
    }

    async fn read(&self, id: &RecordId, file: RecordFile) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(id, file)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
