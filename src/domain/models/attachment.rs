use std::path::PathBuf;

/// A pending file attachment. Exists only between attachment and a successful
/// send or explicit removal, and is never persisted. Content is read at
/// submission time so a read fault aborts the turn before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl Attachment {
    pub fn new(name: &str, size: u64, path: PathBuf) -> Attachment {
        return Attachment {
            name: name.to_string(),
            size,
            path,
        };
    }
}
