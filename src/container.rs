/// The document element that a tree of math belongs to.
///
/// Nodes only ever hold a weak reference to their container. It is used to stamp
/// compiled values with the document's level and version, and plays no part in
/// traversal.
pub trait MathContainer {
    fn level(&self) -> u32;
    fn version(&self) -> u32;
}

/// A container with a fixed level and version, for trees which are not attached to a
/// larger document.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct DocumentVersion {
    pub level: u32,
    pub version: u32,
}

impl DocumentVersion {
    pub fn new(level: u32, version: u32) -> DocumentVersion {
        DocumentVersion { level, version }
    }
}

impl MathContainer for DocumentVersion {
    fn level(&self) -> u32 {
        self.level
    }

    fn version(&self) -> u32 {
        self.version
    }
}
