//! Script module for the Neo Virtual Machine.
//!
//! A `Script` is an immutable byte sequence executed by the VM. Its identity
//! is content-addressed: the script hash is `RIPEMD160(SHA256(bytes))`, the
//! same UInt160 derivation used for contract script hashes. Instruction
//! boundaries are cached lazily the first time each position is parsed so
//! that jump targets can be validated without rescanning the whole script.

use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::op_code::OpCode;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;

/// An immutable VM bytecode script with a lazily computed instruction cache.
pub struct Script {
    value: Vec<u8>,
    strict: bool,
    instructions: Mutex<HashMap<usize, Instruction>>,
}

impl Script {
    /// Creates a script from raw bytes.
    ///
    /// When `strict` is true every opcode in the script is validated eagerly
    /// (including that jump/call targets land on instruction boundaries);
    /// this matches the reference VM's strict-mode constructor used when
    /// loading externally supplied scripts (e.g. witness verification
    /// scripts). Non-strict scripts are validated lazily, instruction by
    /// instruction, as execution reaches them.
    pub fn new(value: Vec<u8>, strict: bool) -> VmResult<Self> {
        let script = Self {
            value,
            strict,
            instructions: Mutex::new(HashMap::new()),
        };

        if strict {
            script.validate_strict()?;
        }

        Ok(script)
    }

    /// Creates a script without eager validation. Equivalent to
    /// `Script::new(value, false)`, which never fails.
    pub fn new_relaxed(value: Vec<u8>) -> Self {
        Self::new(value, false).expect("non-strict script construction cannot fail")
    }

    fn validate_strict(&self) -> VmResult<()> {
        let mut position = 0usize;
        while position < self.value.len() {
            let instruction = Instruction::parse(&self.value, position)?;
            position += instruction.size();
        }
        Ok(())
    }

    /// Returns the script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns a copy of the script bytes.
    pub fn to_array(&self) -> Vec<u8> {
        self.value.clone()
    }

    /// Returns the script length in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether this script was constructed in strict (pre-validated) mode.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns the instruction starting at `position`, parsing and caching
    /// it on first access.
    pub fn get_instruction(&self, position: usize) -> VmResult<Instruction> {
        if position >= self.value.len() {
            return Err(VmError::InvalidScript {
                reason: format!(
                    "instruction pointer {position} out of bounds for script of length {}",
                    self.value.len()
                ),
            });
        }

        let mut cache = self
            .instructions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(instruction) = cache.get(&position) {
            return Ok(instruction.clone());
        }

        let instruction = Instruction::parse(&self.value, position)?;
        cache.insert(position, instruction.clone());
        Ok(instruction)
    }

    /// Returns true if `position` lands exactly on a parsed instruction
    /// boundary reachable from position 0 by walking instruction sizes.
    /// Used to reject jump/call targets that land mid-instruction.
    pub fn is_instruction_boundary(&self, position: usize) -> bool {
        if position == self.value.len() {
            // One-past-the-end is a valid target for e.g. a trailing RET.
            return true;
        }
        if position > self.value.len() {
            return false;
        }

        let mut cursor = 0usize;
        while cursor < position {
            match self.get_instruction(cursor) {
                Ok(instruction) => cursor += instruction.size(),
                Err(_) => return false,
            }
        }
        cursor == position
    }

    /// Computes the UInt160 script hash: `RIPEMD160(SHA256(bytes))`.
    pub fn script_hash(&self) -> [u8; 20] {
        let sha256 = Sha256::digest(&self.value);
        let ripemd = Ripemd160::digest(sha256);
        let mut result = [0u8; 20];
        result.copy_from_slice(&ripemd);
        result
    }

    /// Returns the opcode at `position` without building a full
    /// `Instruction`, useful for quick dispatch checks.
    pub fn opcode_at(&self, position: usize) -> VmResult<OpCode> {
        if position >= self.value.len() {
            return Err(VmError::InvalidScript {
                reason: "position out of bounds".to_string(),
            });
        }
        OpCode::try_from(self.value[position])
            .map_err(|_| VmError::InvalidOpCode { opcode: self.value[position] })
    }
}

impl Clone for Script {
    fn clone(&self) -> Self {
        // The instruction cache is a pure memoization of `value`; a clone
        // starts with an empty cache rather than copying it, which is both
        // cheaper and avoids sharing the lock across independent scripts.
        Self {
            value: self.value.clone(),
            strict: self.strict,
            instructions: Mutex::new(HashMap::new()),
        }
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("len", &self.value.len())
            .field("strict", &self.strict)
            .finish()
    }
}

impl PartialEq for Script {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Script {}

impl From<Vec<u8>> for Script {
    fn from(value: Vec<u8>) -> Self {
        Self::new_relaxed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_relaxed_accepts_any_bytes() {
        let script = Script::new_relaxed(vec![0x51, 0x52, 0x9f]); // PUSH1 PUSH2 ADD
        assert_eq!(script.len(), 3);
        assert_eq!(script.as_bytes(), &[0x51, 0x52, 0x9f]);
    }

    #[test]
    fn strict_mode_rejects_invalid_opcode() {
        let result = Script::new(vec![0xff], true);
        assert!(result.is_err());
    }

    #[test]
    fn strict_mode_accepts_valid_script() {
        let result = Script::new(vec![0x51, 0x52, 0x9f], true);
        assert!(result.is_ok());
    }

    #[test]
    fn script_hash_is_deterministic() {
        let a = Script::new_relaxed(vec![0x51]);
        let b = Script::new_relaxed(vec![0x51]);
        assert_eq!(a.script_hash(), b.script_hash());

        let c = Script::new_relaxed(vec![0x52]);
        assert_ne!(a.script_hash(), c.script_hash());
    }

    #[test]
    fn get_instruction_caches_result() {
        let script = Script::new_relaxed(vec![0x51, 0x9f]);
        let first = script.get_instruction(0).unwrap();
        let second = script.get_instruction(0).unwrap();
        assert_eq!(first.opcode(), second.opcode());
    }

    #[test]
    fn instruction_pointer_out_of_bounds_faults() {
        let script = Script::new_relaxed(vec![0x51]);
        assert!(script.get_instruction(5).is_err());
    }

    #[test]
    fn clone_preserves_bytes() {
        let script = Script::new_relaxed(vec![0x51, 0x52]);
        let clone = script.clone();
        assert_eq!(script.to_array(), clone.to_array());
    }
}
