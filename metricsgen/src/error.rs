use thiserror::Error;

/// Per-container failures.
///
/// One container's error never aborts the corpus: callers skip the offending
/// container and keep synthesizing the rest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// The factory marker takes (namespace, account).
    #[error("factory marker on `{container}` takes (namespace, account) but has {found} argument(s)")]
    MalformedMarker { container: String, found: usize },

    /// Two declarations derive the same field name, so one initializer would
    /// silently overwrite the other.
    #[error(
        "metrics `{first}` and `{second}` in `{container}` both derive the field name `{field}`"
    )]
    FieldCollision {
        container: String,
        field: String,
        first: String,
        second: String,
    },
}
