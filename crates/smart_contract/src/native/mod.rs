//! Native contracts module.
//!
//! This module provides the built-in native contracts for the Neo blockchain,
//! including NEO, GAS, Policy, and other system contracts.

pub mod crypto_lib;
pub mod gas_token;
pub mod native_contract;
pub mod neo_token;
pub mod oracle_contract;
pub mod policy_contract;
pub mod role_management;
pub mod std_lib;

pub use crypto_lib::CryptoLib;
pub use gas_token::GasToken;
pub use native_contract::{NativeContract, NativeMethod};
pub use neo_token::NeoToken;
pub use oracle_contract::{OracleContract, OracleRequest, OracleResponse};
pub use policy_contract::PolicyContract;
pub use role_management::{Role, RoleManagement};
pub use std_lib::StdLib;

use neo_core::UInt160;
use std::collections::HashMap;

/// Registry for native contracts.
pub struct NativeRegistry {
    contracts: HashMap<UInt160, Box<dyn NativeContract>>,
}

impl NativeRegistry {
    /// Creates a new native contract registry.
    pub fn new() -> Self {
        let mut registry = Self {
            contracts: HashMap::new(),
        };

        // Register standard native contracts
        registry.register_standard_contracts();

        registry
    }

    /// Registers a native contract.
    pub fn register(&mut self, contract: Box<dyn NativeContract>) {
        self.contracts.insert(contract.hash(), contract);
    }

    /// Gets a native contract by hash.
    pub fn get(&self, hash: &UInt160) -> Option<&dyn NativeContract> {
        self.contracts.get(hash).map(|c| c.as_ref())
    }

    /// Checks if a contract hash is a native contract.
    pub fn is_native(&self, hash: &UInt160) -> bool {
        self.contracts.contains_key(hash)
    }

    /// Gets all native contract hashes.
    pub fn all_hashes(&self) -> Vec<UInt160> {
        self.contracts.keys().copied().collect()
    }

    /// Iterates over all registered contracts mutably.
    pub fn contracts_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn NativeContract>> {
        self.contracts.values_mut()
    }

    /// Removes a native contract from the registry so it can be invoked with
    /// a mutable borrow of the engine that owns this registry, then put back
    /// with [`NativeRegistry::restore`].
    pub fn take(&mut self, hash: &UInt160) -> Option<Box<dyn NativeContract>> {
        self.contracts.remove(hash)
    }

    /// Puts a contract previously removed with [`NativeRegistry::take`] back
    /// into the registry.
    pub fn restore(&mut self, contract: Box<dyn NativeContract>) {
        self.contracts.insert(contract.hash(), contract);
    }

    /// Registers standard Neo native contracts.
    fn register_standard_contracts(&mut self) {
        // Register NEO token contract
        self.register(Box::new(NeoToken::new()));

        // Register GAS token contract
        self.register(Box::new(GasToken::new()));

        // Register Policy contract
        self.register(Box::new(PolicyContract::new()));

        // Register RoleManagement contract
        self.register(Box::new(RoleManagement::new()));

        // Register StdLib contract
        self.register(Box::new(StdLib::new()));

        // Register CryptoLib contract
        self.register(Box::new(CryptoLib::new()));

        // Register Oracle contract
        self.register(Box::new(OracleContract::new()));
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
