use std::{error::Error, fmt::Display, fs};

use clap_num::maybe_hex;
use famicore_mmu::{bank::RamBank, Mmu};
use serde::Deserialize;

/// Describes the banks to register into the MMU. Banks are registered in
/// listed order, so overlap resolution follows file order.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryMap {
    pub banks: Vec<BankConfig>,
}

/// One RAM bank entry. Numeric fields are strings in decimal or `0x` hex.
#[derive(Debug, Clone, Deserialize)]
pub struct BankConfig {
    pub start: String,
    pub end: String,

    /// Backing size in bytes; the full range length if not given. A smaller
    /// size mirrors the storage across the range.
    pub size: Option<String>,
}

impl MemoryMap {
    pub fn build(&self) -> Result<Mmu, MapError> {
        let mut mmu = Mmu::new();
        for bank in &self.banks {
            let start = parse_addr("start", &bank.start)?;
            let end = parse_addr("end", &bank.end)?;
            if start > end {
                return Err(MapError::InvertedRange { start, end });
            }

            let size = match &bank.size {
                Some(size) => maybe_hex::<u32>(size)
                    .map_err(|_| MapError::InvalidNumber { field: "size", value: size.clone() })?
                    as usize,
                None => (end - start) as usize + 1,
            };
            if size == 0 {
                return Err(MapError::ZeroSize);
            }

            mmu.add_mem_bank(Box::new(RamBank::new(start, end, size)));
        }
        Ok(mmu)
    }
}

fn parse_addr(field: &'static str, value: &str) -> Result<u16, MapError> {
    maybe_hex(value).map_err(|_| MapError::InvalidNumber { field, value: value.to_string() })
}

/// Loads and builds a memory map from a JSON file.
pub fn load(path: &str) -> Result<Mmu, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    let map: MemoryMap = serde_json::from_str(&json)?;
    Ok(map.build()?)
}

/// The default map: one flat RAM bank covering the whole address space.
pub fn flat() -> Mmu {
    let mut mmu = Mmu::new();
    mmu.add_mem_bank(Box::new(RamBank::flat(0x0000, 0xFFFF)));
    mmu
}

#[derive(Debug, Clone)]
pub enum MapError {
    InvalidNumber { field: &'static str, value: String },
    InvertedRange { start: u16, end: u16 },
    ZeroSize,
}

impl Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::InvalidNumber { field, value } => write!(f, "invalid {field} '{value}'"),
            MapError::InvertedRange { start, end } =>
                write!(f, "bank range [0x{start:0>4X}, 0x{end:0>4X}] is inverted"),
            MapError::ZeroSize => write!(f, "bank backing size must not be zero"),
        }
    }
}
impl Error for MapError {}

#[cfg(test)]
mod test {
    use famicore_mmu::MmuError;

    use super::*;

    fn parse(json: &str) -> MemoryMap {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_banks_register_in_file_order() {
        // First bank mirrors 2 KiB over the same range the second covers
        // flat; the first one must win every access.
        let mut mmu = parse(r#"{
            "banks": [
                { "start": "0x0000", "end": "0x1FFF", "size": "0x800" },
                { "start": "0x0000", "end": "0x1FFF" }
            ]
        }"#).build().unwrap();

        mmu.write_byte(0x0000, 0x42).unwrap();
        assert_eq!(Ok(0x42), mmu.read_byte(0x0800));
    }

    #[test]
    fn test_size_defaults_to_range_length() {
        let mut mmu = parse(r#"{
            "banks": [ { "start": "0x0000", "end": "0x0FFF" } ]
        }"#).build().unwrap();

        mmu.write_byte(0x0FFF, 0xAA).unwrap();
        assert_eq!(Ok(0xAA), mmu.read_byte(0x0FFF));
        assert_eq!(Err(MmuError::UnmappedAddress(0x1000)), mmu.read_byte(0x1000));
    }

    #[test]
    fn test_hex_and_decimal_numbers() {
        let mut mmu = parse(r#"{
            "banks": [ { "start": "0x2000", "end": "16383" } ]
        }"#).build().unwrap();

        mmu.write_byte(0x3FFF, 0x01).unwrap();
        assert_eq!(Ok(0x01), mmu.read_byte(0x3FFF));
        assert_eq!(Err(MmuError::UnmappedAddress(0x1FFF)), mmu.read_byte(0x1FFF));
    }

    #[test]
    fn test_invalid_number_rejected() {
        let map = parse(r#"{
            "banks": [ { "start": "banana", "end": "0x1FFF" } ]
        }"#);

        let Err(error) = map.build() else { panic!("expected build to fail") };
        assert_eq!("invalid start 'banana'", error.to_string());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let map = parse(r#"{
            "banks": [ { "start": "0x2000", "end": "0x1FFF" } ]
        }"#);

        assert!(matches!(map.build(), Err(MapError::InvertedRange { .. })));
    }

    #[test]
    fn test_zero_size_rejected() {
        let map = parse(r#"{
            "banks": [ { "start": "0x0000", "end": "0x1FFF", "size": "0" } ]
        }"#);

        assert!(matches!(map.build(), Err(MapError::ZeroSize)));
    }
}
