use crate::error::KtxError;
use crate::vk_format::{VkFormat, get_format_type_size_bytes};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SupercompressionScheme {
    None = 0,
    BasisLZ = 1,
    Zstandard = 2,
    Zlib = 3,
}

impl SupercompressionScheme {
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(SupercompressionScheme::None),
            1 => Some(SupercompressionScheme::BasisLZ),
            2 => Some(SupercompressionScheme::Zstandard),
            3 => Some(SupercompressionScheme::Zlib),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self != SupercompressionScheme::None
    }
}

/// KTX2 header values as stored in the container.
///
/// Unused dimensions, a non-array layer count and an unspecified level count are 0,
/// exactly as in the file; the accessors below report the normalized values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct Header {
    pub vk_format: VkFormat,
    pub type_size: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub layer_count: u32,
    pub face_count: u32,
    pub level_count: u32,
    pub supercompression_scheme: SupercompressionScheme,
}

impl Header {
    pub fn num_dimensions(&self) -> u32 {
        if self.pixel_height == 0 {
            1
        } else if self.pixel_depth == 0 {
            2
        } else {
            3
        }
    }

    pub fn base_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn base_height(&self) -> u32 {
        self.pixel_height.max(1)
    }

    pub fn base_depth(&self) -> u32 {
        self.pixel_depth.max(1)
    }

    pub fn num_levels(&self) -> u32 {
        self.level_count.max(1)
    }

    pub fn num_layers(&self) -> u32 {
        self.layer_count.max(1)
    }

    pub fn num_faces(&self) -> u32 {
        self.face_count
    }

    pub fn is_array(&self) -> bool {
        self.layer_count > 0
    }

    pub fn is_cubemap(&self) -> bool {
        self.face_count == 6
    }

    /// A level count of 0 asks the consumer to generate the mip chain.
    pub fn generate_mipmaps(&self) -> bool {
        self.level_count == 0
    }

    pub fn validate(&self) -> Result<(), KtxError> {
        if self.pixel_width == 0 {
            return Err(KtxError::InvalidValue("pixel width is 0".into()));
        }
        if self.pixel_depth > 0 && self.pixel_height == 0 {
            return Err(KtxError::InvalidValue("3D texture with a pixel height of 0".into()));
        }
        if self.face_count != 1 && self.face_count != 6 {
            return Err(KtxError::InvalidValue(format!(
                "face count must be 1 or 6, got {}",
                self.face_count
            )));
        }
        if self.is_cubemap() && (self.num_dimensions() != 2 || self.pixel_width != self.pixel_height) {
            return Err(KtxError::InvalidValue(
                "cubemap faces must be square 2D images".into(),
            ));
        }

        let max_dim = self.base_width().max(self.base_height()).max(self.base_depth());
        let max_levels = 32 - max_dim.leading_zeros();
        if self.num_levels() > max_levels {
            return Err(KtxError::InvalidValue(format!(
                "{} levels requested, a {} texel texture has at most {}",
                self.num_levels(),
                max_dim,
                max_levels
            )));
        }

        if self.supercompression_scheme == SupercompressionScheme::BasisLZ
            && self.vk_format != VkFormat::UNDEFINED
        {
            return Err(KtxError::UnsupportedFormat(format!(
                "BasisLZ payloads must use VK_FORMAT_UNDEFINED, got {:?}",
                self.vk_format
            )));
        }
        let expected = get_format_type_size_bytes(self.vk_format);
        if self.type_size != expected {
            return Err(KtxError::InvalidValue(format!(
                "type size {} does not match {:?} ({})",
                self.type_size, self.vk_format, expected
            )));
        }
        Ok(())
    }
}
