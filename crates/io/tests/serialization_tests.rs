//! Serialization C# Compatibility Tests
//!
//! These tests ensure full compatibility with C# Neo's ISerializable functionality.
//! Tests are based on the C# Neo.IO.ISerializable test suite.

use neo_io::serializable::helper::get_var_size;
use neo_io::{BinaryWriter, MemoryReader, Result, Serializable};

#[cfg(test)]
mod serialization_tests {
    use super::*;

    /// Test structure that implements Serializable (matches C# ISerializable pattern exactly)
    #[derive(Debug, Clone, PartialEq)]
    struct TestSerializable {
        pub value1: i32,
        pub value2: String,
        pub value3: bool,
        pub bytes: Vec<u8>,
    }

    impl Serializable for TestSerializable {
        fn size(&self) -> usize {
            4 + get_var_size(self.value2.len() as u64)
                + self.value2.len()
                + 1
                + get_var_size(self.bytes.len() as u64)
                + self.bytes.len()
        }

        fn serialize(&self, writer: &mut BinaryWriter) -> Result<()> {
            writer.write_i32(self.value1)?;
            writer.write_var_string(&self.value2)?;
            writer.write_bool(self.value3)?;
            writer.write_var_bytes(&self.bytes)?;
            Ok(())
        }

        fn deserialize(reader: &mut MemoryReader) -> Result<Self> {
            let value1 = reader.read_int32()?;
            let value2 = reader.read_var_string(1000)?;
            let value3 = reader.read_boolean()?;
            let bytes = reader.read_var_bytes(100000)?;

            Ok(TestSerializable {
                value1,
                value2,
                value3,
                bytes,
            })
        }
    }

    /// Test basic serialization/deserialization round-trip (matches C# ISerializable behavior exactly)
    #[test]
    fn test_serialization_round_trip_compatibility() {
        let original = TestSerializable {
            value1: 12345,
            value2: "Hello Neo".to_string(),
            value3: true,
            bytes: vec![0x01, 0x02, 0x03, 0x04, 0x05],
        };

        let mut writer = BinaryWriter::new();
        original.serialize(&mut writer).unwrap();
        let serialized = writer.to_bytes();

        let mut reader = MemoryReader::new(&serialized);
        let deserialized = TestSerializable::deserialize(&mut reader).unwrap();

        assert_eq!(original, deserialized);
    }

    /// Test serialization of negative and boundary integer values
    #[test]
    fn test_serialization_boundary_values() {
        let cases = vec![
            TestSerializable {
                value1: i32::MIN,
                value2: String::new(),
                value3: false,
                bytes: vec![],
            },
            TestSerializable {
                value1: i32::MAX,
                value2: "x".repeat(500),
                value3: true,
                bytes: vec![0xFF; 256],
            },
            TestSerializable {
                value1: 0,
                value2: "neo".to_string(),
                value3: false,
                bytes: vec![0x00],
            },
        ];

        for original in cases {
            let mut writer = BinaryWriter::new();
            original.serialize(&mut writer).unwrap();
            let serialized = writer.to_bytes();

            let mut reader = MemoryReader::new(&serialized);
            let deserialized = TestSerializable::deserialize(&mut reader).unwrap();

            assert_eq!(original, deserialized);
            assert_eq!(serialized.len(), original.size());
        }
    }

    /// Test that `size()` matches the actual number of bytes written
    #[test]
    fn test_size_matches_serialized_length() {
        let original = TestSerializable {
            value1: -42,
            value2: "size check".to_string(),
            value3: true,
            bytes: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };

        let mut writer = BinaryWriter::new();
        original.serialize(&mut writer).unwrap();
        let serialized = writer.to_bytes();

        assert_eq!(serialized.len(), original.size());
    }

    /// Test deserializing a truncated buffer fails instead of panicking
    #[test]
    fn test_deserialize_truncated_buffer_fails() {
        let original = TestSerializable {
            value1: 7,
            value2: "truncate me".to_string(),
            value3: true,
            bytes: vec![9, 9, 9],
        };

        let mut writer = BinaryWriter::new();
        original.serialize(&mut writer).unwrap();
        let serialized = writer.to_bytes();

        let truncated = &serialized[..serialized.len() - 2];
        let mut reader = MemoryReader::new(truncated);
        assert!(TestSerializable::deserialize(&mut reader).is_err());
    }
}
