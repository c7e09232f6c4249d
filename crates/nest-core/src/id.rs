//! Node identifiers.
//!
//! Ids are strings on the wire and in fixtures, but the engine compares and
//! hashes them constantly during hit testing, so they are interned once
//! into a process-wide table and passed around as a 4-byte key.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Suffix source for generated ids, shared by every prefix.
static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Interned node name. Serializes as the plain string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct NodeId(Spur);

impl NodeId {
    pub fn intern(name: &str) -> Self {
        Self(NAMES.get_or_intern(name))
    }

    pub fn as_str(&self) -> &'static str {
        NAMES.resolve(&self.0)
    }

    /// Id for a node made by `Scene::create_node`: `node_0`, `node_1`, ...
    pub fn fresh() -> Self {
        Self::with_prefix("node")
    }

    /// `<prefix>_<n>` for the next `n` whose name nobody has interned yet,
    /// so a generated id never collides with a hand-written one.
    pub fn with_prefix(prefix: &str) -> Self {
        let name = std::iter::repeat_with(|| NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed))
            .map(|n| format!("{prefix}_{n}"))
            .find(|name| !NAMES.contains(name))
            .unwrap_or_default();
        Self::intern(&name)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NodeId {
    fn from(name: &str) -> Self {
        Self::intern(name)
    }
}

impl From<String> for NodeId {
    fn from(name: String) -> Self {
        Self::intern(&name)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.as_str().to_owned()
    }
}
