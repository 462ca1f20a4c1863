use serde::Serialize;
use uuid::Uuid;

/// Identifier of a stored benchmark record. Doubles as the file name stem
/// inside the data directory, so only a conservative character set is
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub const LATEST: &'static str = "latest";
    pub const GENERATED_LEN: usize = 12;
    const MAX_LEN: usize = 64;

    /// Fresh identifier: the trailing characters of a random v4 UUID.
    /// Uniqueness is probabilistic and not checked against the store.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().hyphenated().to_string();
        RecordId(uuid[uuid.len() - Self::GENERATED_LEN..].to_string())
    }

    pub fn latest() -> Self {
        RecordId(Self::LATEST.to_string())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        valid.then(|| RecordId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_latest(&self) -> bool {
        self.0 == Self::LATEST
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub id: RecordId,
    /// Same value as `id`, kept for clients of the older response shape.
    pub uuid: RecordId,
    pub link: String,
}
