#![allow(non_camel_case_types)]

use crate::dfd::BasicDataFormatDescriptor;
use crate::error::KtxError;

/// Size of one texel block of a format.
///
/// Uncompressed formats are 1x1x1 blocks of `block_size_bytes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSize {
    pub block_width: u32,
    pub block_height: u32,
    pub block_depth: u32,
    pub block_size_bytes: u32,
    /// KTX2 `typeSize`: component width in bytes, 1 for block compressed formats.
    pub type_size: u32,
    pub compressed: bool,
}

impl FormatSize {
    pub const fn texel(bytes: u32, type_size: u32) -> Self {
        FormatSize {
            block_width: 1,
            block_height: 1,
            block_depth: 1,
            block_size_bytes: bytes,
            type_size,
            compressed: false,
        }
    }

    pub const fn block(width: u32, height: u32, bytes: u32) -> Self {
        FormatSize {
            block_width: width,
            block_height: height,
            block_depth: 1,
            block_size_bytes: bytes,
            type_size: 1,
            compressed: true,
        }
    }

    /// Looks the format up in the format table, falling back to the data
    /// format descriptor for `VK_FORMAT_UNDEFINED` payloads.
    pub fn resolve(
        format: VkFormat,
        dfd: Option<&BasicDataFormatDescriptor>,
    ) -> Result<FormatSize, KtxError> {
        if let Some(size) = format.format_size() {
            return Ok(size);
        }
        match dfd {
            Some(dfd) => dfd.format_size(),
            None => Err(KtxError::UnsupportedFormat(format!(
                "{:?} needs a data format descriptor to be sized",
                format
            ))),
        }
    }
}

const UNSIZED: Option<FormatSize> = None;

const fn texel(bytes: u32, type_size: u32) -> Option<FormatSize> {
    Some(FormatSize::texel(bytes, type_size))
}

const fn block(width: u32, height: u32, bytes: u32) -> Option<FormatSize> {
    Some(FormatSize::block(width, height, bytes))
}

macro_rules! vk_formats {
    ($($name:ident = $value:literal => $size:expr,)*) => {
        /// Pixel formats, numbered as `VkFormat`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum VkFormat {
            $($name = $value,)*
        }

        impl VkFormat {
            pub const fn from_raw(raw: u32) -> Option<VkFormat> {
                match raw {
                    $($value => Some(VkFormat::$name),)*
                    _ => None,
                }
            }

            pub const fn format_size(self) -> Option<FormatSize> {
                match self {
                    $(VkFormat::$name => $size,)*
                }
            }
        }
    };
}

vk_formats! {
    UNDEFINED = 0 => UNSIZED,
    R5G6B5_UNORM_PACK16 = 4 => texel(2, 2),
    R8_UNORM = 9 => texel(1, 1),
    R8_SRGB = 15 => texel(1, 1),
    R8G8_UNORM = 16 => texel(2, 1),
    R8G8_SRGB = 22 => texel(2, 1),
    R8G8B8_UNORM = 23 => texel(3, 1),
    R8G8B8_SRGB = 29 => texel(3, 1),
    R8G8B8A8_UNORM = 37 => texel(4, 1),
    R8G8B8A8_UINT = 41 => texel(4, 1),
    R8G8B8A8_SRGB = 43 => texel(4, 1),
    B8G8R8A8_UNORM = 44 => texel(4, 1),
    B8G8R8A8_SRGB = 50 => texel(4, 1),
    A2B10G10R10_UNORM_PACK32 = 64 => texel(4, 4),
    R16_UNORM = 70 => texel(2, 2),
    R16_SFLOAT = 76 => texel(2, 2),
    R16G16_SFLOAT = 83 => texel(4, 2),
    R16G16B16A16_UNORM = 91 => texel(8, 2),
    R16G16B16A16_SFLOAT = 97 => texel(8, 2),
    R32_UINT = 98 => texel(4, 4),
    R32_SFLOAT = 100 => texel(4, 4),
    R32G32_SFLOAT = 103 => texel(8, 4),
    R32G32B32_SFLOAT = 106 => texel(12, 4),
    R32G32B32A32_SFLOAT = 109 => texel(16, 4),
    B10G11R11_UFLOAT_PACK32 = 122 => texel(4, 4),
    E5B9G9R9_UFLOAT_PACK32 = 123 => texel(4, 4),
    D16_UNORM = 124 => texel(2, 2),
    D32_SFLOAT = 126 => texel(4, 4),
    BC1_RGB_UNORM_BLOCK = 131 => block(4, 4, 8),
    BC1_RGB_SRGB_BLOCK = 132 => block(4, 4, 8),
    BC1_RGBA_UNORM_BLOCK = 133 => block(4, 4, 8),
    BC1_RGBA_SRGB_BLOCK = 134 => block(4, 4, 8),
    BC2_UNORM_BLOCK = 135 => block(4, 4, 16),
    BC2_SRGB_BLOCK = 136 => block(4, 4, 16),
    BC3_UNORM_BLOCK = 137 => block(4, 4, 16),
    BC3_SRGB_BLOCK = 138 => block(4, 4, 16),
    BC4_UNORM_BLOCK = 139 => block(4, 4, 8),
    BC4_SNORM_BLOCK = 140 => block(4, 4, 8),
    BC5_UNORM_BLOCK = 141 => block(4, 4, 16),
    BC5_SNORM_BLOCK = 142 => block(4, 4, 16),
    BC6H_UFLOAT_BLOCK = 143 => block(4, 4, 16),
    BC6H_SFLOAT_BLOCK = 144 => block(4, 4, 16),
    BC7_UNORM_BLOCK = 145 => block(4, 4, 16),
    BC7_SRGB_BLOCK = 146 => block(4, 4, 16),
    ETC2_R8G8B8_UNORM_BLOCK = 147 => block(4, 4, 8),
    ETC2_R8G8B8_SRGB_BLOCK = 148 => block(4, 4, 8),
    ETC2_R8G8B8A1_UNORM_BLOCK = 149 => block(4, 4, 8),
    ETC2_R8G8B8A1_SRGB_BLOCK = 150 => block(4, 4, 8),
    ETC2_R8G8B8A8_UNORM_BLOCK = 151 => block(4, 4, 16),
    ETC2_R8G8B8A8_SRGB_BLOCK = 152 => block(4, 4, 16),
    EAC_R11_UNORM_BLOCK = 153 => block(4, 4, 8),
    EAC_R11_SNORM_BLOCK = 154 => block(4, 4, 8),
    EAC_R11G11_UNORM_BLOCK = 155 => block(4, 4, 16),
    EAC_R11G11_SNORM_BLOCK = 156 => block(4, 4, 16),
    ASTC_4x4_UNORM_BLOCK = 157 => block(4, 4, 16),
    ASTC_4x4_SRGB_BLOCK = 158 => block(4, 4, 16),
    ASTC_5x4_UNORM_BLOCK = 159 => block(5, 4, 16),
    ASTC_5x4_SRGB_BLOCK = 160 => block(5, 4, 16),
    ASTC_5x5_UNORM_BLOCK = 161 => block(5, 5, 16),
    ASTC_5x5_SRGB_BLOCK = 162 => block(5, 5, 16),
    ASTC_6x5_UNORM_BLOCK = 163 => block(6, 5, 16),
    ASTC_6x5_SRGB_BLOCK = 164 => block(6, 5, 16),
    ASTC_6x6_UNORM_BLOCK = 165 => block(6, 6, 16),
    ASTC_6x6_SRGB_BLOCK = 166 => block(6, 6, 16),
    ASTC_8x5_UNORM_BLOCK = 167 => block(8, 5, 16),
    ASTC_8x5_SRGB_BLOCK = 168 => block(8, 5, 16),
    ASTC_8x6_UNORM_BLOCK = 169 => block(8, 6, 16),
    ASTC_8x6_SRGB_BLOCK = 170 => block(8, 6, 16),
    ASTC_8x8_UNORM_BLOCK = 171 => block(8, 8, 16),
    ASTC_8x8_SRGB_BLOCK = 172 => block(8, 8, 16),
    ASTC_10x5_UNORM_BLOCK = 173 => block(10, 5, 16),
    ASTC_10x5_SRGB_BLOCK = 174 => block(10, 5, 16),
    ASTC_10x6_UNORM_BLOCK = 175 => block(10, 6, 16),
    ASTC_10x6_SRGB_BLOCK = 176 => block(10, 6, 16),
    ASTC_10x8_UNORM_BLOCK = 177 => block(10, 8, 16),
    ASTC_10x8_SRGB_BLOCK = 178 => block(10, 8, 16),
    ASTC_10x10_UNORM_BLOCK = 179 => block(10, 10, 16),
    ASTC_10x10_SRGB_BLOCK = 180 => block(10, 10, 16),
    ASTC_12x10_UNORM_BLOCK = 181 => block(12, 10, 16),
    ASTC_12x10_SRGB_BLOCK = 182 => block(12, 10, 16),
    ASTC_12x12_UNORM_BLOCK = 183 => block(12, 12, 16),
    ASTC_12x12_SRGB_BLOCK = 184 => block(12, 12, 16),
}

/// KTX2 header `typeSize` for a format. `UNDEFINED` payloads report 1.
pub fn get_format_type_size_bytes(format: VkFormat) -> u32 {
    format.format_size().map_or(1, |size| size.type_size)
}
