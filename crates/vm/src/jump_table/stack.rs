//! Stack manipulation operations for the Neo Virtual Machine.
//!
//! This module provides the handlers for the opcodes that rearrange items
//! on the evaluation stack without otherwise transforming them (DUP, SWAP,
//! PICK, ROLL, the REVERSE family, ...).

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use num_traits::ToPrimitive;

/// Registers the stack manipulation handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::DEPTH, depth);
    jump_table.register(OpCode::DROP, drop_item);
    jump_table.register(OpCode::NIP, nip);
    jump_table.register(OpCode::XDROP, xdrop);
    jump_table.register(OpCode::CLEAR, clear);
    jump_table.register(OpCode::DUP, dup);
    jump_table.register(OpCode::OVER, over);
    jump_table.register(OpCode::PICK, pick);
    jump_table.register(OpCode::TUCK, tuck);
    jump_table.register(OpCode::SWAP, swap);
    jump_table.register(OpCode::ROT, rot);
    jump_table.register(OpCode::ROLL, roll);
    jump_table.register(OpCode::REVERSE3, reverse3);
    jump_table.register(OpCode::REVERSE4, reverse4);
    jump_table.register(OpCode::REVERSEN, reversen);
}

/// Implements the DEPTH operation: pushes the number of items on the stack.
fn depth(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let depth = context.evaluation_stack().len() as i64;
    context.push(crate::stack_item::StackItem::from_int(depth))?;

    Ok(())
}

/// Implements the DROP operation: removes the top stack item.
fn drop_item(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.pop()?;

    Ok(())
}

/// Implements the NIP operation: removes the second-to-top stack item.
fn nip(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let index = stack
        .len()
        .checked_sub(2)
        .ok_or_else(|| VmError::stack_underflow_msg(2, stack.len()))?;
    stack.remove(index)?;

    Ok(())
}

/// Implements the XDROP operation: pops n, then removes the item n back from the top.
fn xdrop(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid XDROP index"))?;

    let stack = context.evaluation_stack_mut();
    let index = stack
        .len()
        .checked_sub(n + 1)
        .ok_or_else(|| VmError::stack_underflow_msg(n + 1, stack.len()))?;
    stack.remove(index)?;

    Ok(())
}

/// Implements the CLEAR operation: empties the evaluation stack.
fn clear(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.evaluation_stack_mut().clear();

    Ok(())
}

/// Implements the DUP operation: duplicates the top stack item.
fn dup(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let item = context.evaluation_stack().peek(0)?.clone();
    context.push(item)?;

    Ok(())
}

/// Implements the OVER operation: copies the second-to-top item to the top.
fn over(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let item = context.evaluation_stack().peek(1)?.clone();
    context.push(item)?;

    Ok(())
}

/// Implements the PICK operation: pops n, then copies the item n back to the top.
fn pick(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_isize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid PICK index"))?;
    if n < 0 {
        return Err(VmError::invalid_operation_msg("PICK index out of range"));
    }

    let item = context.evaluation_stack().peek(n)?.clone();
    context.push(item)?;

    Ok(())
}

/// Implements the TUCK operation: inserts a copy of the top item before the
/// second-to-top item.
fn tuck(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let top = stack.peek(0)?.clone();
    let index = stack
        .len()
        .checked_sub(2)
        .ok_or_else(|| VmError::stack_underflow_msg(2, stack.len()))?;
    stack.insert(index, top)?;

    Ok(())
}

/// Implements the SWAP operation: swaps the top two stack items.
fn swap(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 2 {
        return Err(VmError::stack_underflow_msg(2, len));
    }
    stack.swap(len - 1, len - 2)?;

    Ok(())
}

/// Implements the ROT operation: rotates the top three items to the left.
fn rot(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let stack = context.evaluation_stack_mut();
    let len = stack.len();
    if len < 3 {
        return Err(VmError::stack_underflow_msg(3, len));
    }
    // [.., a, b, c] -> [.., b, c, a]; a rotation of the top three is a swap
    // of the bottom two of that triple.
    stack.swap(len - 3, len - 2)?;
    stack.swap(len - 2, len - 1)?;

    Ok(())
}

/// Implements the ROLL operation: pops n, then moves the item n back to the top.
fn roll(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid ROLL index"))?;

    let stack = context.evaluation_stack_mut();
    if n == 0 {
        return Ok(());
    }
    let index = stack
        .len()
        .checked_sub(n + 1)
        .ok_or_else(|| VmError::stack_underflow_msg(n + 1, stack.len()))?;
    let item = stack.remove(index)?;
    stack.push(item);

    Ok(())
}

/// Implements the REVERSE3 operation: reverses the top three stack items.
fn reverse3(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.evaluation_stack_mut().reverse(3)?;

    Ok(())
}

/// Implements the REVERSE4 operation: reverses the top four stack items.
fn reverse4(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    context.evaluation_stack_mut().reverse(4)?;

    Ok(())
}

/// Implements the REVERSEN operation: pops n, then reverses the top n items.
fn reversen(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    let n = context
        .pop()?
        .as_int()?
        .to_usize()
        .ok_or_else(|| VmError::invalid_operation_msg("Invalid REVERSEN count"))?;

    context.evaluation_stack_mut().reverse(n)?;

    Ok(())
}
