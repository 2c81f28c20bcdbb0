use thiserror::Error;

/// Errors that can occur while mounting a view into a host document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// The host has no `window` or no `document`.
    #[error("no document is available to mount into")]
    NoDocument,

    /// No element in the document has the requested id.
    #[error("mount target `#{id}` not found in the document")]
    MissingTarget { id: String },
}
