//! Minimal block representation shared across crates that need to reference
//! blocks during transaction execution without depending on the ledger
//! crate's full `Block`/`BlockHeader` types (which would create a dependency
//! cycle with `neo-smart-contract`).
//!
//! The ledger crate's `Block` remains the canonical on-chain representation;
//! this type carries just enough header data for native contract
//! OnPersist/PostPersist hooks and fee accounting during execution.

use crate::{CoreError, Transaction, UInt160, UInt256};
use sha2::{Digest, Sha256};

/// Block header fields and transactions as seen by the application engine
/// while persisting a block.
#[derive(Debug, Clone)]
pub struct Block {
    /// Block height.
    pub index: u32,
    /// Block timestamp (milliseconds since epoch).
    pub timestamp: u64,
    /// Index of the validator that produced this block within the committee.
    pub primary_index: u8,
    /// Multi-signature address of the committee that will sign the next block.
    pub next_consensus: UInt160,
    /// Hash of the previous block.
    pub previous_hash: UInt256,
    /// Merkle root of `transactions`.
    pub merkle_root: UInt256,
    /// Transactions included in this block.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a new block DTO.
    pub fn new(
        index: u32,
        timestamp: u64,
        primary_index: u8,
        next_consensus: UInt160,
        previous_hash: UInt256,
        merkle_root: UInt256,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            index,
            timestamp,
            primary_index,
            next_consensus,
            previous_hash,
            merkle_root,
            transactions,
        }
    }

    /// Gets the block index (height).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Gets the block timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Computes a hash identifying this block from its header fields.
    pub fn hash(&self) -> Result<UInt256, CoreError> {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_le_bytes());
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update([self.primary_index]);
        hasher.update(self.next_consensus.as_bytes());
        hasher.update(self.previous_hash.as_bytes());
        hasher.update(self.merkle_root.as_bytes());
        let digest = hasher.finalize();
        UInt256::from_bytes(&digest)
    }
}
