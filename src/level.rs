/// Where one mip level's images live inside the texture data.
///
/// Offsets are relative to the start of the data buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct Level {
    pub byte_offset: u64,
    pub byte_length: u64,
    pub uncompressed_byte_length: u64
}

impl Level {
    pub fn end(&self) -> Option<u64> {
        self.byte_offset.checked_add(self.byte_length)
    }
}
