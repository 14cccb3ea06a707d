//! Error kinds raised while loading scenes, material libraries and images.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which attribute pool a face reference points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Vertex,
    TexCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttributeKind::Vertex => "vertex",
            AttributeKind::TexCoord => "texcoord",
            AttributeKind::Normal => "normal",
        })
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    #[error("image header truncated after {actual} bytes")]
    TruncatedImageHeader { actual: usize },

    #[error("image payload truncated: expected {expected} bytes, got {actual}")]
    TruncatedImagePayload { expected: usize, actual: usize },

    #[error("line {line}: {kind} index {index} out of range (pool has {len})")]
    DanglingIndexReference {
        line: usize,
        kind: AttributeKind,
        index: i64,
        len: usize,
    },

    #[error("line {line}: malformed number '{token}' in '{directive}'")]
    MalformedNumericField {
        line: usize,
        directive: String,
        token: String,
    },

    #[error("scene has no vertices; bounds are undefined")]
    EmptyVertexPool,

    #[error("texture upload failed: {0}")]
    DeviceUpload(String),

    #[error("mesh has too many vertices for 32-bit indices ({0})")]
    MeshTooLarge(usize),
}

impl AssetError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AssetError::SourceUnreadable {
            path: path.into(),
            source,
        }
    }
}

pub type AssetResult<T> = Result<T, AssetError>;
