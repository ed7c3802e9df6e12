//! Memory access interface.

/// Byte-addressable memory as seen from the CPU.
///
/// Implementors handle address decoding and routing; the CPU assumes every
/// access succeeds. All 16-bit accesses are little-endian.
pub trait Memory {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Read a 16-bit word with normal address arithmetic.
    ///
    /// Used for absolute operands and the interrupt vectors.
    fn read16(&mut self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word whose high byte wraps within the page.
    ///
    /// If `address` is `$xxFF`, the high byte comes from `$xx00` instead of
    /// the next page. The 6502's indirect addressing modes fetch pointers
    /// this way, and software depends on the bug.
    fn read16_wrapped(&mut self, address: u16) -> u16 {
        let low = self.read(address);
        let high_addr = (address & 0xFF00) | (address.wrapping_add(1) & 0x00FF);
        let high = self.read(high_addr);
        u16::from_le_bytes([low, high])
    }

    /// Write a 16-bit word with normal address arithmetic.
    fn write16(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(address, low);
        self.write(address.wrapping_add(1), high);
    }
}
