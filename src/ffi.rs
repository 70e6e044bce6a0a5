//! C ABI exports for hosts that can only pass handles and receive scalars.
//!
//! Every function accepts a null texture and answers with the zero value of
//! its return type, or [`ErrorCode::NullHandle`] where a status is returned.

use log::trace;

use crate::abi::TextureInfo;
use crate::error::ErrorCode;
use crate::host;
use crate::texture::TextureKtx2;

/// # Safety
/// `texture` must be null or point to a live `TextureKtx2` for `'a`.
unsafe fn texture_ref<'a>(texture: *const TextureKtx2) -> Option<&'a TextureKtx2> {
    let t = unsafe { texture.as_ref() };
    if t.is_none() {
        trace!("null texture handle");
    }
    t
}

macro_rules! export_scalar {
    ($($(#[$meta:meta])* $export:ident => $host:ident -> $ty:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Safety
            /// `texture` must be null or point to a live `TextureKtx2`.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $export(texture: *const TextureKtx2) -> $ty {
                host::$host(unsafe { texture_ref(texture) })
            }
        )*
    };
}

export_scalar! {
    /// Start of the image data, null for a null texture.
    ktx_get_data => data -> *const u8;
    /// Length of the image data in bytes.
    ktx_get_data_size => data_size -> usize;
    /// Width of level 0.
    ktx_get_base_width => base_width -> u32;
    /// Height of level 0, 1 for 1D textures.
    ktx_get_base_height => base_height -> u32;
    /// Depth of level 0, 1 for 1D and 2D textures.
    ktx_get_base_depth => base_depth -> u32;
    ktx_get_num_levels => num_levels -> u32;
    ktx_get_num_layers => num_layers -> u32;
    /// 6 for cubemaps, 1 otherwise.
    ktx_get_num_faces => num_faces -> u32;
    ktx_get_num_dimensions => num_dimensions -> u32;
    ktx_get_is_array => is_array -> u32;
    ktx_get_is_cubemap => is_cubemap -> u32;
    ktx_get_is_compressed => is_compressed -> u32;
    /// `VkFormat` value.
    ktx_get_vk_format => vk_format -> u32;
    ktx_get_supercompression_scheme => supercompression_scheme -> u32;
}

/// Writes the offset of an image within the data to `offset`.
///
/// # Safety
/// `texture` must be null or point to a live `TextureKtx2`; `offset` must be
/// null or valid for a `u64` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktx_get_image_offset(
    texture: *const TextureKtx2,
    level: u32,
    layer: u32,
    face_slice: u32,
    offset: *mut u64,
) -> ErrorCode {
    let texture = unsafe { texture_ref(texture) };
    if texture.is_some() && offset.is_null() {
        return ErrorCode::InvalidValue;
    }
    match host::image_offset(texture, level, layer, face_slice) {
        Ok(value) => {
            unsafe { offset.write(value) };
            ErrorCode::Success
        }
        Err(err) => ErrorCode::from(&err),
    }
}

/// Size of one image at `level`; 0 for a null texture or an invalid level.
///
/// # Safety
/// `texture` must be null or point to a live `TextureKtx2`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktx_get_image_size(texture: *const TextureKtx2, level: u32) -> u64 {
    host::image_size(unsafe { texture_ref(texture) }, level).unwrap_or(0)
}

/// Fills `info` with a metadata snapshot, all zeros for a null texture.
///
/// # Safety
/// `texture` must be null or point to a live `TextureKtx2`; `info` must be
/// null or valid for a `TextureInfo` write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktx_get_texture_info(
    texture: *const TextureKtx2,
    info: *mut TextureInfo,
) -> ErrorCode {
    if info.is_null() {
        return ErrorCode::InvalidValue;
    }
    let texture = unsafe { texture_ref(texture) };
    unsafe { info.write(TextureInfo::from_texture(texture)) };
    match texture {
        Some(_) => ErrorCode::Success,
        None => ErrorCode::NullHandle,
    }
}
