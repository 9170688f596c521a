//! Control flow opcode tests
//!
//! Tests for control flow operations like JMP, CALL, TRY, THROW, RET, etc.

use crate::csharp_tests::{resolve_test_dir, JsonTestRunner};

/// Test OpCodes Control category (matches C# TestOpCodesControl)
#[test]
fn test_opcodes_control() {
    if let Some(test_path) = resolve_test_dir("OpCodes/Control") {
        let mut runner = JsonTestRunner::new();
        runner
            .test_json_directory(test_path.to_str().expect("valid UTF-8 path"))
            .unwrap();
    } else {
        eprintln!("C# test directory not found: OpCodes/Control");
    }
}
