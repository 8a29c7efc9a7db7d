//! Node identifier derivation.
//!
//! Node ids are derived from the visible label: lower-cased, with every
//! whitespace character and every hyphen removed. Labels that normalize to
//! nothing (such as `---`) receive a fallback token instead, so every node
//! carries a non-empty id.
//!
//! Derived ids are not unique: two labels that normalize identically share an
//! id. Fallback tokens, on the other hand, never collide with a derived id or
//! with each other within one [`FallbackAllocator`]. Both strategies are
//! deterministic, so extracting the same document twice yields the same ids.

use std::collections::HashSet;

use log::trace;
use serde::Deserialize;
use uuid::Uuid;

/// Length of the hashed fallback token.
pub const FALLBACK_TOKEN_LEN: usize = 8;

/// Namespace for name-based fallback token UUIDs.
const TOKEN_NAMESPACE: Uuid = Uuid::from_u128(0x5f0e_2a41_9c3b_4d6e_8a17_b2c4_d9e6_f013);

/// Derives a node id from a label.
///
/// Returns `None` when nothing survives normalization.
///
/// # Examples
///
/// ```
/// use svgraph_core::identifier::derive_id;
///
/// assert_eq!(derive_id("Load Balancer").as_deref(), Some("loadbalancer"));
/// assert_eq!(derive_id("Read-Replica").as_deref(), Some("readreplica"));
/// assert_eq!(derive_id("---"), None);
/// ```
pub fn derive_id(label: &str) -> Option<String> {
    let id: String = label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();

    (!id.is_empty()).then_some(id)
}

/// Strategy used for nodes whose label yields no derived id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackIds {
    /// An 8-character lowercase hex token taken from a v5 UUID of the node
    /// position and label. Looks random, but is stable across runs.
    #[default]
    #[serde(alias = "random")]
    Hashed,

    /// `node-<n>`, where `n` is the 1-based position of the node.
    ///
    /// Derived ids never contain `-`, so these cannot collide with them.
    Ordinal,
}

/// Issues fallback ids that are distinct from a reserved set.
///
/// # Examples
///
/// ```
/// use svgraph_core::identifier::{FallbackAllocator, FallbackIds};
///
/// let mut ids = FallbackAllocator::new(FallbackIds::Ordinal, ["client".to_string()]);
/// assert_eq!(ids.allocate(3, "---"), "node-3");
/// ```
#[derive(Debug)]
pub struct FallbackAllocator {
    strategy: FallbackIds,
    taken: HashSet<String>,
}

impl FallbackAllocator {
    /// Creates an allocator that never hands out any of `reserved`.
    ///
    /// # Arguments
    ///
    /// * `strategy` - How tokens are generated.
    /// * `reserved` - Ids already in use, typically every derived id of the document.
    pub fn new(strategy: FallbackIds, reserved: impl IntoIterator<Item = String>) -> Self {
        Self {
            strategy,
            taken: reserved.into_iter().collect(),
        }
    }

    /// Returns a fresh id for the node at 1-based position `ordinal`.
    ///
    /// The same `ordinal` and `label` against the same reserved set always
    /// produce the same id.
    pub fn allocate(&mut self, ordinal: usize, label: &str) -> String {
        match self.strategy {
            FallbackIds::Ordinal => {
                let id = format!("node-{ordinal}");
                self.taken.insert(id.clone());
                id
            }
            FallbackIds::Hashed => {
                let mut attempt = 0u32;
                loop {
                    let token = hashed_token(ordinal, label, attempt);
                    if self.taken.insert(token.clone()) {
                        return token;
                    }
                    trace!(token = token.as_str(), attempt; "Fallback token collided, rehashing");
                    attempt = attempt.wrapping_add(1);
                }
            }
        }
    }
}

fn hashed_token(ordinal: usize, label: &str, attempt: u32) -> String {
    let name = format!("{ordinal}\u{0}{label}\u{0}{attempt}");
    let mut token = Uuid::new_v5(&TOKEN_NAMESPACE, name.as_bytes())
        .simple()
        .to_string();
    token.truncate(FALLBACK_TOKEN_LEN);
    token
}
