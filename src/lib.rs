// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.

//! Facade crate re-exporting the subsystems that make up the Neo N3 core:
//! the VM, the application engine and native contracts, the ledger and
//! block-processing pipeline, and the versioned persistence layer.
//!
//! External collaborators (RPC, CLI, wallets) are not part of this crate;
//! they consume these re-exports as a library.

pub use neo_config as config;
pub use neo_cryptography as cryptography;
pub use neo_ledger as ledger;
pub use neo_network as network;
pub use neo_persistence as persistence;
pub use neo_smart_contract as smart_contract;
pub use neo_vm as vm;

pub use neo_core::{ProtocolSettings, UInt160, UInt256};
pub use neo_ledger::Blockchain;
