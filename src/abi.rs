//! Fixed-layout snapshot of a texture's metadata for hosts that read native
//! memory through an address + length bridge.

use std::io::{self, Write};
use std::mem::size_of;

use byteorder::{LittleEndian, WriteBytesExt};
use field_offset::{FieldOffset, offset_of};

use crate::texture::TextureKtx2;

/// Texture metadata as 64 little-endian bytes without padding.
/// Flags are 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct TextureInfo {
    pub data_size: u64,
    pub base_width: u32,
    pub base_height: u32,
    pub base_depth: u32,
    pub num_levels: u32,
    pub num_layers: u32,
    pub num_faces: u32,
    pub num_dimensions: u32,
    pub is_array: u32,
    pub is_cubemap: u32,
    pub is_compressed: u32,
    pub vk_format: u32,
    pub supercompression_scheme: u32,
    pub type_size: u32,
    pub generate_mipmaps: u32,
}

pub const TEXTURE_INFO_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
}

fn field<U>(name: &'static str, offset: FieldOffset<TextureInfo, U>) -> FieldLayout {
    FieldLayout {
        name,
        offset: offset.get_byte_offset(),
        size: size_of::<U>(),
    }
}

impl TextureInfo {
    /// All zeros when there is no texture.
    pub fn from_texture(texture: Option<&TextureKtx2>) -> Self {
        let Some(t) = texture else {
            return TextureInfo::default();
        };
        TextureInfo {
            data_size: t.data_size() as u64,
            base_width: t.base_width(),
            base_height: t.base_height(),
            base_depth: t.base_depth(),
            num_levels: t.num_levels(),
            num_layers: t.num_layers(),
            num_faces: t.num_faces(),
            num_dimensions: t.num_dimensions(),
            is_array: t.is_array() as u32,
            is_cubemap: t.is_cubemap() as u32,
            is_compressed: t.is_compressed() as u32,
            vk_format: t.vk_format() as u32,
            supercompression_scheme: t.supercompression_scheme() as u32,
            type_size: t.header().type_size,
            generate_mipmaps: t.generate_mipmaps() as u32,
        }
    }

    /// Byte offset and width of every field, in declaration order.
    pub fn field_layout() -> Vec<FieldLayout> {
        vec![
            field("data_size", offset_of!(TextureInfo => data_size)),
            field("base_width", offset_of!(TextureInfo => base_width)),
            field("base_height", offset_of!(TextureInfo => base_height)),
            field("base_depth", offset_of!(TextureInfo => base_depth)),
            field("num_levels", offset_of!(TextureInfo => num_levels)),
            field("num_layers", offset_of!(TextureInfo => num_layers)),
            field("num_faces", offset_of!(TextureInfo => num_faces)),
            field("num_dimensions", offset_of!(TextureInfo => num_dimensions)),
            field("is_array", offset_of!(TextureInfo => is_array)),
            field("is_cubemap", offset_of!(TextureInfo => is_cubemap)),
            field("is_compressed", offset_of!(TextureInfo => is_compressed)),
            field("vk_format", offset_of!(TextureInfo => vk_format)),
            field("supercompression_scheme", offset_of!(TextureInfo => supercompression_scheme)),
            field("type_size", offset_of!(TextureInfo => type_size)),
            field("generate_mipmaps", offset_of!(TextureInfo => generate_mipmaps)),
        ]
    }

    pub fn write_le<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_u64::<LittleEndian>(self.data_size)?;
        for value in [
            self.base_width,
            self.base_height,
            self.base_depth,
            self.num_levels,
            self.num_layers,
            self.num_faces,
            self.num_dimensions,
            self.is_array,
            self.is_cubemap,
            self.is_compressed,
            self.vk_format,
            self.supercompression_scheme,
            self.type_size,
            self.generate_mipmaps,
        ] {
            out.write_u32::<LittleEndian>(value)?;
        }
        Ok(())
    }

    pub fn to_le_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(TEXTURE_INFO_SIZE);
        self.write_le(&mut out)?;
        Ok(out)
    }
}
