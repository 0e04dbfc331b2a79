use crate::codec::RecordKind;

use serde_path_to_error::Segment;
use thiserror::Error;

use std::fmt;

/// Why a document could not be decoded. Decoding stops at the first problem, so there is only ever
/// one of these per call.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required field is absent.
    #[error("missing field `{field}` in {record} at {path}")]
    MissingField {
        record: RecordKind,
        field: String,
        path: FieldPath,
    },
    /// A field is present but holds the wrong JSON type (or an unusable value).
    #[error("type mismatch at {path}: {detail}")]
    TypeMismatch { path: FieldPath, detail: String },
    /// An object or array was expected and something else was found, or vice versa.
    #[error("shape mismatch at {path}: {detail}")]
    ShapeMismatch { path: FieldPath, detail: String },
    /// The input is not JSON at all.
    #[error("malformed JSON input: {err}")]
    MalformedInput {
        line: usize,
        column: usize,
        #[source]
        err: serde_json::Error,
    },
    #[error("unable to read input: {err}")]
    Io {
        #[from]
        err: std::io::Error,
    },
}

impl DecodeError {
    /// The location of the offending field, if the error came from schema decoding.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            DecodeError::MissingField { path, .. }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::ShapeMismatch { path, .. } => Some(path),
            DecodeError::MalformedInput { .. } | DecodeError::Io { .. } => None,
        }
    }

    pub(crate) fn malformed(err: serde_json::Error) -> DecodeError {
        DecodeError::MalformedInput {
            line: err.line(),
            column: err.column(),
            err,
        }
    }

    /// Sort a typed-decoding failure into one of the structured kinds.
    ///
    /// serde reports every schema problem through the same error type, so the kind is recovered
    /// from the message produced by serde's `missing_field`, `invalid_type`, `invalid_length` and
    /// `invalid_value` constructors.
    pub(crate) fn classify(
        root: RecordKind,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> DecodeError {
        let record = root.descend(err.path().iter());
        let path = FieldPath::from_segments(err.path().iter());
        DecodeError::from_message(record, path, err.into_inner().to_string())
    }

    fn from_message(record: RecordKind, path: FieldPath, message: String) -> DecodeError {
        if let Some(field) = quoted_field(&message, "missing field `") {
            return DecodeError::MissingField {
                record,
                path: path.child(&field),
                field,
            };
        }
        if let Some(field) = quoted_field(&message, "duplicate field `") {
            return DecodeError::TypeMismatch {
                path: path.child(&field),
                detail: format!("field `{field}` appears more than once in {record}"),
            };
        }

        let found_expected = ["invalid type: ", "invalid length ", "invalid value: "]
            .iter()
            .find_map(|prefix| message.strip_prefix(prefix))
            .and_then(|rest| rest.rsplit_once(", expected "));
        match found_expected {
            Some((found, expected)) if is_shape(found, expected) => DecodeError::ShapeMismatch {
                path,
                detail: format!("expected {expected}, found {found}"),
            },
            Some((found, expected)) => DecodeError::TypeMismatch {
                path,
                detail: format!("expected {expected}, found {found}"),
            },
            None => DecodeError::TypeMismatch {
                path,
                detail: message,
            },
        }
    }
}

fn quoted_field(message: &str, prefix: &str) -> Option<String> {
    message
        .strip_prefix(prefix)
        .and_then(|rest| rest.split('`').next())
        .map(str::to_string)
}

fn is_shape(found: &str, expected: &str) -> bool {
    matches!(found, "map" | "sequence")
        || expected.starts_with("struct ")
        || expected.starts_with("a sequence")
        || expected.starts_with("a map")
}

/// Dotted location of a field inside a document, such as `hourly.data[3].time`. The document root
/// is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    fn from_segments<'a>(segments: impl Iterator<Item = &'a Segment>) -> FieldPath {
        let mut path = FieldPath::default();
        for segment in segments {
            match segment {
                Segment::Seq { index } => path = path.index(*index),
                Segment::Map { key } => path = path.child(key),
                Segment::Enum { variant } => path = path.child(variant),
                Segment::Unknown => path = path.child("?"),
            }
        }
        path
    }

    pub(crate) fn index(&self, index: usize) -> FieldPath {
        FieldPath(format!("{}[{index}]", self.0))
    }

    pub(crate) fn child(&self, key: &str) -> FieldPath {
        if self.0.is_empty() {
            FieldPath(key.to_string())
        } else {
            FieldPath(format!("{}.{key}", self.0))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unable to serialize response: {err}")]
    Json {
        #[from]
        err: serde_json::Error,
    },
    #[error("unable to write output: {err}")]
    Io {
        #[from]
        err: std::io::Error,
    },
}

/// Failures producing or reading the compressed MessagePack form of a record.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("unable to compress or decompress data: {err}")]
    Compression {
        #[from]
        err: std::io::Error,
    },
    #[error("unable to serialize data: {err}")]
    Serialize {
        #[from]
        err: rmp_serde::encode::Error,
    },
    #[error("unable to deserialize data: {err}")]
    Deserialize {
        #[from]
        err: rmp_serde::decode::Error,
    },
}
