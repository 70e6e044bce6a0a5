use log::trace;

use crate::error::KtxError;
use crate::header::Header;
use crate::level::Level;
use crate::vk_format::FormatSize;

fn too_large() -> KtxError {
    KtxError::InvalidValue("texture size overflows 64 bits".into())
}

/// Size of `base` at mip `level`, never below 1.
pub fn level_dimension(base: u32, level: u32) -> u32 {
    base.checked_shr(level).unwrap_or(0).max(1)
}

pub fn level_dimensions(header: &Header, level: u32) -> [u32; 3] {
    [
        level_dimension(header.base_width(), level),
        level_dimension(header.base_height(), level),
        level_dimension(header.base_depth(), level),
    ]
}

/// Bytes of one image (one layer, one face) at `level`, including every depth slice.
///
/// Dimensions are rounded up to whole blocks; images are tightly packed.
pub fn image_size(header: &Header, format: &FormatSize, level: u32) -> Result<u64, KtxError> {
    let [width, height, depth] = level_dimensions(header, level);
    let blocks_x = width.div_ceil(format.block_width) as u64;
    let blocks_y = height.div_ceil(format.block_height) as u64;
    let blocks_z = depth.div_ceil(format.block_depth) as u64;
    blocks_x
        .checked_mul(blocks_y)
        .and_then(|n| n.checked_mul(blocks_z))
        .and_then(|n| n.checked_mul(format.block_size_bytes as u64))
        .ok_or_else(too_large)
}

/// Bytes of one array layer at `level`: every face of it.
pub fn layer_size(header: &Header, format: &FormatSize, level: u32) -> Result<u64, KtxError> {
    image_size(header, format, level)?
        .checked_mul(header.num_faces() as u64)
        .ok_or_else(too_large)
}

pub fn level_size(header: &Header, format: &FormatSize, level: u32) -> Result<u64, KtxError> {
    layer_size(header, format, level)?
        .checked_mul(header.num_layers() as u64)
        .ok_or_else(too_large)
}

// lcm(n, 4)
fn lcm4(n: u64) -> u64 {
    match n % 4 {
        0 => n,
        2 => n * 2,
        _ => n * 4,
    }
}

/// Alignment of each level's first byte. Supercompressed levels are unaligned.
pub fn required_level_alignment(header: &Header, format: &FormatSize) -> u64 {
    if header.supercompression_scheme.is_active() {
        1
    } else {
        lcm4(format.block_size_bytes.max(1) as u64)
    }
}

pub fn pad(value: u64, alignment: u64) -> Option<u64> {
    value.div_ceil(alignment).checked_mul(alignment)
}

/// Lays the levels out the KTX2 way: smallest level first, each level start
/// padded to the required alignment. Returns the level index (level 0 first)
/// and the total data size.
pub fn layout_levels(header: &Header, format: &FormatSize) -> Result<(Vec<Level>, u64), KtxError> {
    let num_levels = header.num_levels();
    let alignment = required_level_alignment(header, format);
    let mut levels = vec![Level::default(); num_levels as usize];
    let mut offset = 0u64;
    for level in (0..num_levels).rev() {
        offset = pad(offset, alignment).ok_or_else(too_large)?;
        let size = level_size(header, format, level)?;
        trace!("level {} at {} ({} bytes)", level, offset, size);
        levels[level as usize] = Level {
            byte_offset: offset,
            byte_length: size,
            uncompressed_byte_length: size,
        };
        offset = offset.checked_add(size).ok_or_else(too_large)?;
    }
    Ok((levels, offset))
}
