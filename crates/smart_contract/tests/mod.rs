//! Smart contract test modules

// Test modules converted from C# Neo unit tests
mod contract_manifest_tests;
mod contract_parameter_tests;
mod contract_permission_tests;
mod contract_state_tests;
mod native_contract_tests;
mod neo_token_comprehensive_tests;
