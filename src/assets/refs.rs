use crate::foundation::error::{ReelError, ReelResult};

/// What an asset file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Still image drawn by image nodes.
    Image,
    /// Audio file referenced by audio tracks.
    Audio,
}

/// Static asset referenced by a relative path; the host resolves and decodes it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssetRef {
    /// Asset kind.
    pub kind: AssetKind,
    /// Composition-relative source path.
    pub source: String,
}

impl AssetRef {
    /// Image asset at `source`.
    pub fn image(source: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Image,
            source: source.into(),
        }
    }

    /// Audio asset at `source`.
    pub fn audio(source: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Audio,
            source: source.into(),
        }
    }

    pub(crate) fn validate(&self, key: &str) -> ReelResult<()> {
        normalize_rel_path(&self.source)
            .map(|_| ())
            .map_err(|e| e.context(format!("asset '{key}'")))
    }
}

/// Normalize and validate composition-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths,
/// drive prefixes or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(ReelError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') || s.split('/').next().is_some_and(|p| p.ends_with(':')) {
        return Err(ReelError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation("asset path must contain a file name"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/refs.rs"]
mod tests;
