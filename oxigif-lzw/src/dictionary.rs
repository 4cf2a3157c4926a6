//! Incremental, resettable trie mapping (prefix code, symbol) to codes.

use crate::config::{LzwConfig, MAX_DICT_LEN};
use crate::error::Result;

/// Upper bound on overflow map slots: a node only claims a slot for its
/// second child, so at most half the code space can ever need one.
const MAX_MAP_SLOTS: usize = MAX_DICT_LEN as usize / 2 + 1;

/// One sparse trie node, addressed by its own code.
///
/// Holds a single child inline; a second child claims an overflow map slot
/// and later children go straight into that map. The inline pair stays valid
/// after the map is claimed, so lookups check it first.
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    /// 1-based overflow map slot, 0 if none claimed.
    map: u16,
    /// Symbol of the inline child.
    symbol: u8,
    /// Code of the inline child, 0 if the node has no children.
    child: u16,
}

/// LZW dictionary: two-tier trie over (prefix code, next symbol) pairs.
///
/// Literal prefixes (codes below the initial dictionary size) are looked up
/// through a dense `init_dict_len x init_dict_len` table, since every literal
/// code is a valid prefix. Learned prefixes go through a sparse node arena
/// with per-node inline children and a shared overflow map pool. All storage
/// is index-addressed and allocated once per encode context; a reset only
/// zeroes tables and cursors.
#[derive(Debug)]
pub struct LzwDictionary {
    config: LzwConfig,
    /// Dense child table for literal prefixes: `[prefix * init_dict_len + symbol]`.
    dense: Vec<u16>,
    /// Sparse nodes for learned prefixes, indexed by prefix code.
    nodes: Vec<Node>,
    /// Overflow map pool: `MAX_MAP_SLOTS` slots of `init_dict_len` children.
    pool: Vec<u16>,
    /// Next unclaimed pool slot, 1-based. Slots are zeroed when claimed, so
    /// the pool itself does not need clearing on reset.
    next_slot: u16,
    /// Next code to assign.
    next_code: u16,
}

impl LzwDictionary {
    /// Allocate the trie arenas for `config` and reset them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LzwError::Allocation`] if the tables cannot be
    /// allocated.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let init = usize::from(config.init_dict_len());
        let mut dict = Self {
            config,
            dense: try_zeroed(init * init)?,
            nodes: {
                let mut nodes = Vec::new();
                nodes.try_reserve_exact(MAX_DICT_LEN as usize)?;
                nodes.resize(MAX_DICT_LEN as usize, Node::default());
                nodes
            },
            pool: try_zeroed(MAX_MAP_SLOTS * init)?,
            next_slot: 1,
            next_code: config.first_code(),
        };
        dict.reset();
        Ok(dict)
    }

    /// Discard all learned entries and revert to the literal-only state.
    ///
    /// O(capacity): zeroes the dense and node tables and rewinds the pool
    /// cursor. The next assignable code becomes `first_code()`.
    pub fn reset(&mut self) {
        self.dense.fill(0);
        self.nodes.fill(Node::default());
        self.next_slot = 1;
        self.next_code = self.config.first_code();
    }

    /// Code for the string `prefix` extended by `symbol`, if known.
    pub fn lookup(&self, prefix: u16, symbol: u8) -> Option<u16> {
        let init = usize::from(self.config.init_dict_len());
        if usize::from(prefix) < init {
            let code = self.dense[usize::from(prefix) * init + usize::from(symbol)];
            return (code != 0).then_some(code);
        }
        let node = self.nodes[usize::from(prefix)];
        if node.child != 0 && node.symbol == symbol {
            return Some(node.child);
        }
        if node.map != 0 {
            let code = self.pool[(usize::from(node.map) - 1) * init + usize::from(symbol)];
            if code != 0 {
                return Some(code);
            }
        }
        None
    }

    /// Record `prefix` extended by `symbol` under the next free code.
    ///
    /// Does nothing when the dictionary is at capacity; the caller decides
    /// when to [`reset`](Self::reset).
    pub fn insert(&mut self, prefix: u16, symbol: u8) {
        if self.is_full() {
            return;
        }
        let code = self.next_code;
        let init = usize::from(self.config.init_dict_len());
        if usize::from(prefix) < init {
            self.dense[usize::from(prefix) * init + usize::from(symbol)] = code;
        } else {
            let node = self.nodes[usize::from(prefix)];
            if node.map != 0 {
                self.pool[(usize::from(node.map) - 1) * init + usize::from(symbol)] = code;
            } else if node.child != 0 {
                // Second child: claim an overflow slot, zero it, keep the
                // first child inline.
                let base = (usize::from(self.next_slot) - 1) * init;
                self.pool[base..base + init].fill(0);
                self.pool[base + usize::from(symbol)] = code;
                self.nodes[usize::from(prefix)].map = self.next_slot;
                self.next_slot += 1;
            } else {
                let node = &mut self.nodes[usize::from(prefix)];
                node.symbol = symbol;
                node.child = code;
            }
        }
        self.next_code += 1;
    }

    /// Whether the whole 12-bit code space has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code >= MAX_DICT_LEN
    }

    /// The code the next insertion will receive.
    #[cfg(test)]
    pub fn next_code(&self) -> u16 {
        self.next_code
    }
}

/// Allocate a zero-filled `Vec<u16>` without aborting on OOM.
fn try_zeroed(len: usize) -> Result<Vec<u16>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)?;
    v.resize(len, 0);
    Ok(v)
}
