//! Host-facing accessors over a possibly missing texture.
//!
//! A missing texture reads as 0, `false` or a null pointer; addressing calls
//! report [`KtxError::NullHandle`]. Flags are returned as 0/1 integers.

use std::ptr;

use crate::error::KtxError;
use crate::texture::TextureKtx2;

pub fn data(texture: Option<&TextureKtx2>) -> *const u8 {
    texture.map_or(ptr::null(), |t| t.data().as_ptr())
}

pub fn data_size(texture: Option<&TextureKtx2>) -> usize {
    texture.map_or(0, TextureKtx2::data_size)
}

pub fn base_width(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::base_width)
}

pub fn base_height(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::base_height)
}

pub fn base_depth(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::base_depth)
}

pub fn num_levels(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::num_levels)
}

pub fn num_layers(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::num_layers)
}

pub fn num_faces(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::num_faces)
}

pub fn num_dimensions(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, TextureKtx2::num_dimensions)
}

pub fn is_array(texture: Option<&TextureKtx2>) -> u32 {
    texture.is_some_and(TextureKtx2::is_array) as u32
}

pub fn is_cubemap(texture: Option<&TextureKtx2>) -> u32 {
    texture.is_some_and(TextureKtx2::is_cubemap) as u32
}

pub fn is_compressed(texture: Option<&TextureKtx2>) -> u32 {
    texture.is_some_and(TextureKtx2::is_compressed) as u32
}

pub fn vk_format(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, |t| t.vk_format() as u32)
}

pub fn supercompression_scheme(texture: Option<&TextureKtx2>) -> u32 {
    texture.map_or(0, |t| t.supercompression_scheme() as u32)
}

pub fn image_offset(
    texture: Option<&TextureKtx2>,
    level: u32,
    layer: u32,
    face_slice: u32,
) -> Result<u64, KtxError> {
    texture
        .ok_or(KtxError::NullHandle)?
        .get_image_offset(level, layer, face_slice)
}

pub fn image_size(texture: Option<&TextureKtx2>, level: u32) -> Result<u64, KtxError> {
    texture.ok_or(KtxError::NullHandle)?.get_image_size(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureCreateInfo;
    use crate::vk_format::VkFormat;

    #[test]
    fn missing_texture_reads_as_zero() {
        assert!(data(None).is_null());
        assert_eq!(data_size(None), 0);
        assert_eq!(base_width(None), 0);
        assert_eq!(base_height(None), 0);
        assert_eq!(base_depth(None), 0);
        assert_eq!(num_levels(None), 0);
        assert_eq!(num_layers(None), 0);
        assert_eq!(num_faces(None), 0);
        assert_eq!(num_dimensions(None), 0);
        assert_eq!(is_array(None), 0);
        assert_eq!(is_cubemap(None), 0);
        assert_eq!(is_compressed(None), 0);
        assert_eq!(vk_format(None), 0);
        assert_eq!(supercompression_scheme(None), 0);
        assert_eq!(image_offset(None, 0, 0, 0), Err(KtxError::NullHandle));
        assert_eq!(image_size(None, 0), Err(KtxError::NullHandle));
    }

    #[test]
    fn present_texture_passes_through() {
        let info = TextureCreateInfo {
            num_faces: 6,
            ..TextureCreateInfo::new_2d(4, 4, VkFormat::BC3_SRGB_BLOCK)
        };
        let tex = TextureKtx2::new(&info).unwrap();
        let t = Some(&tex);
        assert_eq!(data(t), tex.data().as_ptr());
        assert_eq!(data_size(t), 96);
        assert_eq!(base_width(t), 4);
        assert_eq!(base_depth(t), 1);
        assert_eq!(num_faces(t), 6);
        assert_eq!(num_dimensions(t), 2);
        assert_eq!(is_cubemap(t), 1);
        assert_eq!(is_array(t), 0);
        assert_eq!(is_compressed(t), 1);
        assert_eq!(vk_format(t), 138);
        assert_eq!(image_size(t, 0), Ok(16));
        assert_eq!(image_offset(t, 0, 0, 5), Ok(80));
        assert_eq!(
            image_offset(t, 0, 0, 6),
            Err(KtxError::InvalidFace { face_slice: 6, num_faces: 6 })
        );
    }
}
