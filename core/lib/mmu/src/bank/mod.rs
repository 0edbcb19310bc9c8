mod ram;

pub use ram::*;

/// Capability contract for one region of the 16-bit address space.
///
/// A bank's membership is arbitrary - it does not have to be contiguous. The
/// membership test must be cheap and side-effect free; reads and writes may
/// have side effects (mapped I/O registers, for example).
pub trait MemBank {
    fn is_address_in_range(&self, addr: u16) -> bool;
    fn read_byte(&self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8);
}
