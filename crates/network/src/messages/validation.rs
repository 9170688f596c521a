//! Neo N3 Message Validation
//!
//! This module provides comprehensive validation for all Neo N3 protocol messages,
//! ensuring strict compliance with the Neo N3 protocol specification.

use crate::messages::protocol::NetworkAddress;
use crate::{NetworkError, NetworkMessage, NetworkResult as Result, ProtocolMessage};
use neo_core::{Transaction, UInt160, UInt256};
use neo_ledger::{Block, BlockHeader};
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Maximum message size allowed (16MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Maximum number of inventory items in a single message
pub const MAX_INVENTORY_ITEMS: usize = 1000;

/// Maximum number of headers in a single message
pub const MAX_HEADERS_PER_MESSAGE: usize = 2000;

/// Maximum number of addresses in addr message
pub const MAX_ADDRESSES_PER_MESSAGE: usize = 1000;

/// Maximum user agent length
pub const MAX_USER_AGENT_LENGTH: usize = 1024;

/// Minimum supported protocol version
pub const MIN_PROTOCOL_VERSION: u32 = 0;

/// Maximum supported protocol version
pub const MAX_PROTOCOL_VERSION: u32 = 1;

/// Future timestamp tolerance (15 seconds)
pub const FUTURE_TIMESTAMP_TOLERANCE: u64 = 15000;

/// Message validator that enforces Neo N3 protocol rules
pub struct MessageValidator {
    /// Network magic number for validation
    magic: u32,
    /// Maximum message size
    max_message_size: usize,
    /// Current blockchain height (for validation context)
    current_height: u32,
}

impl MessageValidator {
    /// Creates a new message validator
    pub fn new(magic: u32, current_height: u32) -> Self {
        Self {
            magic,
            max_message_size: MAX_MESSAGE_SIZE,
            current_height,
        }
    }

    /// Updates the current blockchain height for validation context
    pub fn update_height(&mut self, height: u32) {
        self.current_height = height;
    }

    /// Validates a complete network message
    pub fn validate_message(&self, message: &NetworkMessage) -> Result<()> {
        // 1. Validate message header
        self.validate_message_header(message)?;

        // 2. Validate payload size
        if message.serialized_size() > self.max_message_size {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Message size {} exceeds maximum {}",
                    message.serialized_size(),
                    self.max_message_size
                ),
            });
        }

        // 3. Validate magic number
        if message.header.magic != self.magic {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Invalid magic number: expected {:#x}, got {:#x}",
                    self.magic, message.header.magic
                ),
            });
        }

        // 4. Validate specific payload
        self.validate_payload(&message.payload)?;

        debug!("Message validation passed for {:?}", message.payload);
        Ok(())
    }

    /// Validates message header fields
    fn validate_message_header(&self, message: &NetworkMessage) -> Result<()> {
        // Check if command is recognized
        let command_str = message.header.command.to_string();
        if command_str.is_empty() || command_str.len() > 12 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Invalid command: '{}'", command_str),
            });
        }

        // Validate checksum - it's always present in Neo N3
        let payload_bytes = self.serialize_payload(&message.payload)?;
        let calculated_checksum = Self::calculate_checksum(&payload_bytes);
        if message.header.checksum != calculated_checksum {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Checksum mismatch: expected {:#x}, calculated {:#x}",
                    calculated_checksum, message.header.checksum
                ),
            });
        }

        Ok(())
    }

    /// Helper method to serialize payload for checksum calculation
    fn serialize_payload(&self, payload: &ProtocolMessage) -> Result<Vec<u8>> {
        payload
            .to_bytes()
            .map_err(|e| NetworkError::MessageSerialization {
                message_type: "ProtocolMessage".to_string(),
                reason: e.to_string(),
            })
    }

    /// Calculates checksum for payload (SHA256(SHA256(payload))) - matches MessageHeader implementation
    fn calculate_checksum(payload: &[u8]) -> u32 {
        use sha2::{Digest, Sha256};
        let first_hash = Sha256::digest(payload);
        let second_hash = Sha256::digest(&first_hash);
        u32::from_le_bytes([
            second_hash[0],
            second_hash[1],
            second_hash[2],
            second_hash[3],
        ])
    }

    /// Helper method to check if an IP address is private
    fn is_private_ip(ip: &std::net::IpAddr) -> bool {
        match ip {
            std::net::IpAddr::V4(ipv4) => {
                // RFC 1918 private address ranges
                ipv4.octets()[0] == 10
                    || (ipv4.octets()[0] == 172 && ipv4.octets()[1] >= 16 && ipv4.octets()[1] <= 31)
                    || (ipv4.octets()[0] == 192 && ipv4.octets()[1] == 168)
            }
            std::net::IpAddr::V6(ipv6) => {
                // RFC 4193 private address range (fc00::/7)
                ipv6.segments()[0] & 0xfe00 == 0xfc00
            }
        }
    }

    /// Validates protocol message payload based on type
    fn validate_payload(&self, payload: &ProtocolMessage) -> Result<()> {
        match payload {
            ProtocolMessage::Version {
                version,
                services,
                timestamp,
                port,
                nonce,
                user_agent,
                start_height,
                relay,
            } => self.validate_version_message(
                *version,
                *services,
                *timestamp,
                *port,
                *nonce,
                user_agent,
                *start_height,
                *relay,
            ),

            ProtocolMessage::Verack => {
                // Verack has no payload to validate
                Ok(())
            }

            ProtocolMessage::GetAddr => {
                // GetAddr has no payload to validate
                Ok(())
            }

            ProtocolMessage::Addr { addresses } => self.validate_addr_message(addresses),

            ProtocolMessage::Ping { nonce } => self.validate_ping_message(*nonce),

            ProtocolMessage::Pong { nonce } => self.validate_pong_message(*nonce),

            ProtocolMessage::GetHeaders {
                hash_start,
                hash_stop,
            } => self.validate_get_headers_message(hash_start, hash_stop),

            ProtocolMessage::Headers { headers } => self.validate_headers_message(headers),

            ProtocolMessage::GetBlocks {
                hash_start,
                hash_stop,
            } => self.validate_get_blocks_message(hash_start, hash_stop),

            ProtocolMessage::GetBlockByIndex { index_start, count } => {
                self.validate_get_block_by_index_message(*index_start, *count)
            }

            ProtocolMessage::Tx { transaction } => self.validate_transaction_message(transaction),

            ProtocolMessage::Block { block } => self.validate_block_message(block),

            ProtocolMessage::Inv { inventory } => self.validate_inventory_message(inventory, "inv"),

            ProtocolMessage::GetData { inventory } => {
                self.validate_inventory_message(inventory, "getdata")
            }

            ProtocolMessage::NotFound { inventory } => {
                self.validate_inventory_message(inventory, "notfound")
            }

            ProtocolMessage::Mempool => {
                // Mempool has no payload to validate
                Ok(())
            }

            _ => {
                warn!("Unknown message type received");
                Ok(()) // Allow unknown messages for forward compatibility
            }
        }
    }

    /// Validates version message (matches C# Neo protocol validation exactly)
    fn validate_version_message(
        &self,
        version: u32,
        services: u64,
        timestamp: u64,
        port: u16,
        nonce: u32,
        user_agent: &str,
        start_height: u32,
        relay: bool,
    ) -> Result<()> {
        // 1. Validate protocol version
        if version < MIN_PROTOCOL_VERSION || version > MAX_PROTOCOL_VERSION {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Unsupported protocol version: {}", version),
            });
        }

        // 2. Validate services field (should be valid bitmask)
        // Services field is a bitmask, all values are technically valid

        // 3. Validate timestamp (not too far in future)
        let current_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        if timestamp > current_time + FUTURE_TIMESTAMP_TOLERANCE {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Version timestamp too far in future: {} vs {}",
                    timestamp, current_time
                ),
            });
        }

        // 4. Validate port (non-zero for valid peers)
        if port == 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Version message has invalid port 0".to_string(),
            });
        }

        // 5. Validate user agent length
        if user_agent.len() > MAX_USER_AGENT_LENGTH {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "User agent too long: {} characters (max {})",
                    user_agent.len(),
                    MAX_USER_AGENT_LENGTH
                ),
            });
        }

        // 6. Validate user agent contains only printable ASCII
        if !user_agent.chars().all(|c| c.is_ascii() && !c.is_control()) {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "User agent contains invalid characters".to_string(),
            });
        }

        // 7. Validate start height is reasonable
        if start_height > self.current_height + 1000000 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Start height {} seems unreasonably high (current: {})",
                    start_height, self.current_height
                ),
            });
        }

        // 8. Validate nonce is non-zero
        if nonce == 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Version nonce cannot be zero".to_string(),
            });
        }

        debug!(
            "Version message validation passed: version={}, start_height={}, user_agent='{}'",
            version, start_height, user_agent
        );
        Ok(())
    }

    /// Validates addr message
    fn validate_addr_message(&self, addresses: &[NetworkAddress]) -> Result<()> {
        if addresses.len() > MAX_ADDRESSES_PER_MESSAGE {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Too many addresses in addr message: {} (max {})",
                    addresses.len(),
                    MAX_ADDRESSES_PER_MESSAGE
                ),
            });
        }

        // Validate each address
        for addr in addresses {
            let socket_addr = addr.address;

            // Check for valid port
            if socket_addr.port() == 0 {
                return Err(NetworkError::InvalidMessage {
                    peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                    message_type: "unknown".to_string(),
                    reason: format!("Invalid address with port 0: {}", socket_addr),
                });
            }

            // Check for localhost/private addresses in mainnet context
            if self.magic == 0x334f454e {
                // MainNet magic
                if socket_addr.ip().is_loopback() || Self::is_private_ip(&socket_addr.ip()) {
                    return Err(NetworkError::InvalidMessage {
                        peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                        message_type: "unknown".to_string(),
                        reason: format!(
                            "Private/loopback address not allowed in mainnet: {}",
                            socket_addr
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Validates ping message
    fn validate_ping_message(&self, nonce: u32) -> Result<()> {
        if nonce == 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Ping nonce cannot be zero".to_string(),
            });
        }
        Ok(())
    }

    /// Validates pong message
    fn validate_pong_message(&self, nonce: u32) -> Result<()> {
        if nonce == 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Pong nonce cannot be zero".to_string(),
            });
        }
        Ok(())
    }

    /// Validates get headers message
    fn validate_get_headers_message(
        &self,
        hash_start: &[UInt256],
        hash_stop: &UInt256,
    ) -> Result<()> {
        if hash_start.is_empty() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "GetHeaders must have at least one start hash".to_string(),
            });
        }

        if hash_start.len() > 100 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Too many start hashes in GetHeaders: {} (max 100)",
                    hash_start.len()
                ),
            });
        }

        // Validate that hashes are not all zero (except for genesis requests)
        let all_zero = hash_start.iter().all(|h| h.is_zero());
        if all_zero && !hash_stop.is_zero() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Invalid GetHeaders: all start hashes are zero but stop hash is not"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Validates headers message
    fn validate_headers_message(&self, headers: &[BlockHeader]) -> Result<()> {
        if headers.len() > MAX_HEADERS_PER_MESSAGE {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Too many headers: {} (max {})",
                    headers.len(),
                    MAX_HEADERS_PER_MESSAGE
                ),
            });
        }

        // Validate each header
        for (i, header) in headers.iter().enumerate() {
            self.validate_block_header(header)
                .map_err(|e| NetworkError::InvalidMessage {
                    peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                    message_type: "unknown".to_string(),
                    reason: format!("Invalid header at index {}: {}", i, e),
                })?;
        }

        // Validate headers are in sequential order
        for i in 1..headers.len() {
            if headers[i].index != headers[i - 1].index + 1 {
                return Err(NetworkError::InvalidMessage {
                    peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                    message_type: "unknown".to_string(),
                    reason: format!(
                        "Headers not in sequential order: {} followed by {}",
                        headers[i - 1].index,
                        headers[i].index
                    ),
                });
            }

            if headers[i].previous_hash != headers[i - 1].hash() {
                return Err(NetworkError::InvalidMessage {
                    peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                    message_type: "unknown".to_string(),
                    reason: format!(
                        "Header chain broken at index {}: previous hash mismatch",
                        headers[i].index
                    ),
                });
            }
        }

        Ok(())
    }

    /// Validates get blocks message
    fn validate_get_blocks_message(
        &self,
        hash_start: &[UInt256],
        hash_stop: &UInt256,
    ) -> Result<()> {
        // Same validation as get headers
        self.validate_get_headers_message(hash_start, hash_stop)
    }

    /// Validates get block by index message
    fn validate_get_block_by_index_message(&self, index_start: u32, count: u16) -> Result<()> {
        if count == 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "GetBlockByIndex count cannot be zero".to_string(),
            });
        }

        if count > 500 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("GetBlockByIndex count too large: {} (max 500)", count),
            });
        }

        // Check for reasonable index range
        if index_start > self.current_height + 1000000 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "GetBlockByIndex start index {} seems unreasonably high (current height: {})",
                    index_start, self.current_height
                ),
            });
        }

        Ok(())
    }

    /// Validates transaction message
    fn validate_transaction_message(&self, transaction: &Transaction) -> Result<()> {
        // 1. Validate transaction size
        let tx_size = transaction.size();
        if tx_size > 102400 {
            // 100KB max transaction size
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Transaction size {} exceeds maximum 102400 bytes", tx_size),
            });
        }

        // 2. Validate transaction version
        if transaction.version() != 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Invalid transaction version: {}", transaction.version()),
            });
        }

        // 3. Validate fees are non-negative
        if transaction.system_fee() < 0 || transaction.network_fee() < 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Transaction fees cannot be negative".to_string(),
            });
        }

        // 4. Validate script is not empty
        if transaction.script().is_empty() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Transaction script cannot be empty".to_string(),
            });
        }

        // 5. Validate valid until block
        if transaction.valid_until_block() <= self.current_height {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Transaction expired: valid until {}, current height {}",
                    transaction.valid_until_block(),
                    self.current_height
                ),
            });
        }

        // 6. Validate witnesses exist
        if transaction.witnesses().is_empty() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Transaction must have at least one witness".to_string(),
            });
        }

        debug!("Transaction message validation passed");
        Ok(())
    }

    /// Validates block message
    fn validate_block_message(&self, block: &Block) -> Result<()> {
        // 1. Validate block header
        self.validate_block_header(&block.header)?;

        // 2. Validate block has transactions
        if block.transactions.is_empty() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Block cannot have zero transactions".to_string(),
            });
        }

        // 3. Validate block size
        let block_size = block.size();
        if block_size > 1_048_576 {
            // 1MB max block size
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Block size {} exceeds maximum 1MB", block_size),
            });
        }

        // 4. Validate each transaction
        for (i, tx) in block.transactions.iter().enumerate() {
            self.validate_transaction_message(tx)
                .map_err(|e| NetworkError::InvalidMessage {
                    peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                    message_type: "unknown".to_string(),
                    reason: format!("Invalid transaction {} in block: {}", i, e),
                })?;
        }

        // 5. Validate merkle root
        let calculated_merkle = block.calculate_merkle_root();
        if calculated_merkle != block.header.merkle_root {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Block merkle root mismatch".to_string(),
            });
        }

        debug!(
            "Block message validation passed for block {}",
            block.index()
        );
        Ok(())
    }

    /// Validates inventory message (inv, getdata, notfound)
    fn validate_inventory_message(
        &self,
        inventory: &[crate::InventoryItem],
        msg_type: &str,
    ) -> Result<()> {
        if inventory.len() > MAX_INVENTORY_ITEMS {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Too many inventory items in {}: {} (max {})",
                    msg_type,
                    inventory.len(),
                    MAX_INVENTORY_ITEMS
                ),
            });
        }

        // Validate each inventory item
        for (i, item) in inventory.iter().enumerate() {
            // Check for valid inventory type
            match item.item_type {
                crate::InventoryType::Transaction => {
                    // Hash should not be zero for transaction
                    if item.hash.is_zero() {
                        return Err(NetworkError::InvalidMessage {
                            peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                            message_type: "unknown".to_string(),
                            reason: format!(
                                "Invalid zero hash for transaction inventory item at index {}",
                                i
                            ),
                        });
                    }
                }
                crate::InventoryType::Block => {
                    // Hash should not be zero for block
                    if item.hash.is_zero() {
                        return Err(NetworkError::InvalidMessage {
                            peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                            message_type: "unknown".to_string(),
                            reason: format!(
                                "Invalid zero hash for block inventory item at index {}",
                                i
                            ),
                        });
                    }
                }
                crate::InventoryType::Consensus => {
                    // Hash should not be zero for consensus
                    if item.hash.is_zero() {
                        return Err(NetworkError::InvalidMessage {
                            peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                            message_type: "unknown".to_string(),
                            reason: format!(
                                "Invalid zero hash for consensus inventory item at index {}",
                                i
                            ),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Validates a block header (comprehensive validation matching C# Neo)
    fn validate_block_header(&self, header: &BlockHeader) -> Result<()> {
        // 1. Validate timestamp
        let current_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        if header.timestamp > current_time + FUTURE_TIMESTAMP_TOLERANCE {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!(
                    "Block timestamp too far in future: {} vs {}",
                    header.timestamp, current_time
                ),
            });
        }

        // 2. Validate merkle root is not zero
        if header.merkle_root.is_zero() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Block merkle root cannot be zero".to_string(),
            });
        }

        // 3. Validate next consensus is not zero
        if header.next_consensus.is_zero() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Block next consensus cannot be zero".to_string(),
            });
        }

        // 4. Validate witnesses exist
        if header.witnesses.is_empty() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Block header must have at least one witness".to_string(),
            });
        }

        // 5. Validate version
        if header.version != 0 {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: format!("Invalid block version: {}", header.version),
            });
        }

        // 6. For non-genesis blocks, validate previous hash
        if header.index > 0 && header.previous_hash.is_zero() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Non-genesis block cannot have zero previous hash".to_string(),
            });
        }

        // 7. For genesis block, validate previous hash is zero
        if header.index == 0 && !header.previous_hash.is_zero() {
            return Err(NetworkError::InvalidMessage {
                peer: std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
                message_type: "unknown".to_string(),
                reason: "Genesis block must have zero previous hash".to_string(),
            });
        }

        Ok(())
    }
}
