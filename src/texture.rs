use anyhow::Context;
use log::debug;

use crate::dfd::BasicDataFormatDescriptor;
use crate::error::KtxError;
use crate::header::{Header, SupercompressionScheme};
use crate::index::Index;
use crate::layout;
use crate::level::Level;
use crate::vk_format::{FormatSize, VkFormat, get_format_type_size_bytes};

/// Parameters for allocating a new texture.
#[derive(Clone, Debug)]
pub struct TextureCreateInfo {
    pub vk_format: VkFormat,
    /// Required when `vk_format` is `UNDEFINED`.
    pub dfd: Option<BasicDataFormatDescriptor>,
    pub base_width: u32,
    pub base_height: u32,
    pub base_depth: u32,
    pub num_dimensions: u32,
    pub num_levels: u32,
    pub num_layers: u32,
    pub num_faces: u32,
    pub is_array: bool,
    pub generate_mipmaps: bool,
}

impl TextureCreateInfo {
    /// A single-level, single-image 2D texture.
    pub fn new_2d(width: u32, height: u32, vk_format: VkFormat) -> Self {
        TextureCreateInfo {
            vk_format,
            dfd: None,
            base_width: width,
            base_height: height,
            base_depth: 1,
            num_dimensions: 2,
            num_levels: 1,
            num_layers: 1,
            num_faces: 1,
            is_array: false,
            generate_mipmaps: false,
        }
    }

    fn to_header(&self) -> Result<Header, KtxError> {
        if self.num_dimensions == 0 || self.num_dimensions > 3 {
            return Err(KtxError::InvalidValue(format!(
                "{} dimensions",
                self.num_dimensions
            )));
        }
        if self.num_dimensions < 2 && self.base_height != 1 {
            return Err(KtxError::InvalidValue("1D texture with a height other than 1".into()));
        }
        if self.num_dimensions < 3 && self.base_depth != 1 {
            return Err(KtxError::InvalidValue("depth given for a texture without 3 dimensions".into()));
        }
        if self.base_height == 0 || self.base_depth == 0 {
            return Err(KtxError::InvalidValue("zero sized texture".into()));
        }
        if self.num_levels == 0 || self.num_layers == 0 {
            return Err(KtxError::InvalidValue("level and layer counts must be at least 1".into()));
        }
        if !self.is_array && self.num_layers != 1 {
            return Err(KtxError::InvalidValue("layers given for a texture that is not an array".into()));
        }
        if self.generate_mipmaps && self.num_levels != 1 {
            return Err(KtxError::InvalidValue("generate_mipmaps with more than one level".into()));
        }

        Ok(Header {
            vk_format: self.vk_format,
            type_size: get_format_type_size_bytes(self.vk_format),
            pixel_width: self.base_width,
            pixel_height: if self.num_dimensions > 1 { self.base_height } else { 0 },
            pixel_depth: if self.num_dimensions > 2 { self.base_depth } else { 0 },
            layer_count: if self.is_array { self.num_layers } else { 0 },
            face_count: self.num_faces,
            level_count: if self.generate_mipmaps { 0 } else { self.num_levels },
            supercompression_scheme: SupercompressionScheme::None,
        })
    }
}

/// An in-memory KTX2 texture: metadata, level index and one contiguous data buffer.
pub struct TextureKtx2 {
    header: Header,
    format_size: FormatSize,
    dfd: Option<BasicDataFormatDescriptor>,
    index: Index,

    // Mip Level Array
    data: Vec<u8>
}

impl std::fmt::Debug for TextureKtx2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureKtx2")
            .field("header", &self.header)
            .field("levels", &self.index.levels)
            .field("data_size", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl TextureKtx2 {

    /// Allocates zeroed storage for every image described by `info`.
    ///
    /// Levels are stored the way KTX2 files store them, smallest level first,
    /// so with more than one level the base level does not start at offset 0
    /// and offsets shrink as the level grows. Use [`TextureKtx2::from_parts`]
    /// to address a buffer that stores level 0 first.
    pub fn new(info: &TextureCreateInfo) -> Result<Self, KtxError> {
        let header = info.to_header()?;
        header.validate()?;
        let format_size = FormatSize::resolve(header.vk_format, info.dfd.as_ref())?;
        let (levels, data_size) = layout::layout_levels(&header, &format_size)?;
        let data_size = usize::try_from(data_size)
            .map_err(|_| KtxError::InvalidValue("texture does not fit in memory".into()))?;

        debug!(
            "allocated {:?} texture {}x{}x{}, {} levels, {} layers, {} faces, {} bytes",
            header.vk_format,
            header.base_width(),
            header.base_height(),
            header.base_depth(),
            header.num_levels(),
            header.num_layers(),
            header.num_faces(),
            data_size
        );

        Ok(TextureKtx2 {
            header,
            format_size,
            dfd: info.dfd.clone(),
            index: Index::new(levels),
            data: vec![0u8; data_size],
        })
    }

    /// Takes over a loaded texture. `levels` holds one entry per level, level 0 first,
    /// with offsets relative to the start of `data`.
    pub fn from_parts(
        header: Header,
        dfd: Option<BasicDataFormatDescriptor>,
        levels: Vec<Level>,
        data: Vec<u8>,
    ) -> anyhow::Result<Self> {
        header.validate().context("invalid KTX2 header")?;
        let format_size = FormatSize::resolve(header.vk_format, dfd.as_ref())
            .context("cannot size texture format")?;

        if levels.len() != header.num_levels() as usize {
            return Err(KtxError::InvalidValue(format!(
                "level index has {} entries for {} levels",
                levels.len(),
                header.num_levels()
            )))
            .context("invalid level index");
        }
        let index = Index::new(levels);
        index
            .validate(data.len() as u64)
            .context("invalid level index")?;

        let alignment = layout::required_level_alignment(&header, &format_size);
        for (i, level) in index.levels.iter().enumerate() {
            let expected = layout::level_size(&header, &format_size, i as u32)?;
            match header.supercompression_scheme {
                SupercompressionScheme::None => {
                    if level.byte_length != expected || level.uncompressed_byte_length != expected {
                        return Err(KtxError::InvalidValue(format!(
                            "level {} holds {} bytes, expected {}",
                            i, level.byte_length, expected
                        )))
                        .context("invalid level index");
                    }
                }
                // BasisLZ inflates through the global data, not per level.
                SupercompressionScheme::BasisLZ => {
                    if level.uncompressed_byte_length != 0 {
                        return Err(KtxError::InvalidValue(format!(
                            "BasisLZ level {} records {} uncompressed bytes, expected 0",
                            i, level.uncompressed_byte_length
                        )))
                        .context("invalid level index");
                    }
                }
                SupercompressionScheme::Zstandard | SupercompressionScheme::Zlib => {
                    if level.uncompressed_byte_length != expected {
                        return Err(KtxError::InvalidValue(format!(
                            "level {} inflates to {} bytes, expected {}",
                            i, level.uncompressed_byte_length, expected
                        )))
                        .context("invalid level index");
                    }
                }
            }
            if level.byte_offset % alignment != 0 {
                return Err(KtxError::InvalidValue(format!(
                    "level {} offset {} is not {}-byte aligned",
                    i, level.byte_offset, alignment
                )))
                .context("invalid level index");
            }
        }

        debug!(
            "loaded {:?} texture {}x{}x{}, {} levels, {:?} supercompression, {} bytes",
            header.vk_format,
            header.base_width(),
            header.base_height(),
            header.base_depth(),
            header.num_levels(),
            header.supercompression_scheme,
            data.len()
        );

        Ok(TextureKtx2 {
            header,
            format_size,
            dfd,
            index,
            data,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn dfd(&self) -> Option<&BasicDataFormatDescriptor> {
        self.dfd.as_ref()
    }

    pub fn format_size(&self) -> &FormatSize {
        &self.format_size
    }

    pub fn levels(&self) -> &[Level] {
        &self.index.levels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn base_width(&self) -> u32 {
        self.header.base_width()
    }

    pub fn base_height(&self) -> u32 {
        self.header.base_height()
    }

    pub fn base_depth(&self) -> u32 {
        self.header.base_depth()
    }

    pub fn num_levels(&self) -> u32 {
        self.header.num_levels()
    }

    pub fn num_layers(&self) -> u32 {
        self.header.num_layers()
    }

    pub fn num_faces(&self) -> u32 {
        self.header.num_faces()
    }

    pub fn num_dimensions(&self) -> u32 {
        self.header.num_dimensions()
    }

    pub fn is_array(&self) -> bool {
        self.header.is_array()
    }

    pub fn is_cubemap(&self) -> bool {
        self.header.is_cubemap()
    }

    pub fn is_compressed(&self) -> bool {
        self.format_size.compressed
    }

    pub fn generate_mipmaps(&self) -> bool {
        self.header.generate_mipmaps()
    }

    pub fn vk_format(&self) -> VkFormat {
        self.header.vk_format
    }

    pub fn supercompression_scheme(&self) -> SupercompressionScheme {
        self.header.supercompression_scheme
    }

    fn check_level(&self, level: u32) -> Result<&Level, KtxError> {
        self.index.level(level).ok_or(KtxError::InvalidLevel {
            level,
            num_levels: self.num_levels(),
        })
    }

    fn check_image(&self, level: u32, layer: u32, face_slice: u32) -> Result<&Level, KtxError> {
        let entry = self.check_level(level)?;
        if layer >= self.num_layers() {
            return Err(KtxError::InvalidLayer {
                layer,
                num_layers: self.num_layers(),
            });
        }
        if face_slice >= self.num_faces() {
            return Err(KtxError::InvalidFace {
                face_slice,
                num_faces: self.num_faces(),
            });
        }
        Ok(entry)
    }

    fn unsupported_supercompressed(&self, what: &str) -> KtxError {
        KtxError::UnsupportedFormat(format!(
            "{} of {:?} supercompressed levels with more than one image",
            what,
            self.supercompression_scheme()
        ))
    }

    /// Width, height and depth of `level`.
    pub fn level_dimensions(&self, level: u32) -> Result<[u32; 3], KtxError> {
        self.check_level(level)?;
        Ok(layout::level_dimensions(&self.header, level))
    }

    pub fn level_offset(&self, level: u32) -> Result<u64, KtxError> {
        Ok(self.check_level(level)?.byte_offset)
    }

    /// Stored bytes of `level`, as recorded in the level index.
    pub fn level_size(&self, level: u32) -> Result<u64, KtxError> {
        Ok(self.check_level(level)?.byte_length)
    }

    pub fn uncompressed_level_size(&self, level: u32) -> Result<u64, KtxError> {
        Ok(self.check_level(level)?.uncompressed_byte_length)
    }

    /// Size of one image at `level` as given by its dimensions and format,
    /// ignoring any supercompression.
    pub fn nominal_image_size(&self, level: u32) -> Result<u64, KtxError> {
        self.check_level(level)?;
        layout::image_size(&self.header, &self.format_size, level)
    }

    /// Bytes of one image (one layer, one face) at `level`.
    ///
    /// For supercompressed textures this is the stored length from the level
    /// index, which is only defined when the level holds a single image.
    pub fn get_image_size(&self, level: u32) -> Result<u64, KtxError> {
        let entry = self.check_level(level)?;
        if self.supercompression_scheme().is_active() {
            if self.num_layers() as u64 * self.num_faces() as u64 != 1 {
                return Err(self.unsupported_supercompressed("image size"));
            }
            return Ok(entry.byte_length);
        }
        layout::image_size(&self.header, &self.format_size, level)
    }

    /// Offset from the start of `data` of the first byte of an image.
    ///
    /// Within a level, layers are stored one after another and each layer
    /// holds its faces in order.
    pub fn get_image_offset(&self, level: u32, layer: u32, face_slice: u32) -> Result<u64, KtxError> {
        let entry = self.check_image(level, layer, face_slice)?;
        if self.supercompression_scheme().is_active() {
            if layer != 0 || face_slice != 0 {
                return Err(self.unsupported_supercompressed("image offset"));
            }
            return Ok(entry.byte_offset);
        }

        let image_size = layout::image_size(&self.header, &self.format_size, level)?;
        let layer_size = image_size * self.num_faces() as u64;
        Ok(entry.byte_offset + layer as u64 * layer_size + face_slice as u64 * image_size)
    }

    fn image_range(&self, level: u32, layer: u32, face_slice: u32) -> Result<std::ops::Range<usize>, KtxError> {
        let offset = self.get_image_offset(level, layer, face_slice)?;
        let size = self.get_image_size(level)?;
        // Both are bounded by a validated level index, hence by data.len().
        let start = offset as usize;
        Ok(start..start + size as usize)
    }

    /// Bytes of one image.
    pub fn image(&self, level: u32, layer: u32, face_slice: u32) -> Result<&[u8], KtxError> {
        let range = self.image_range(level, layer, face_slice)?;
        Ok(&self.data[range])
    }

    /// Copies `src` into an image of an uncompressed-storage texture.
    pub fn set_image_from_memory(
        &mut self,
        level: u32,
        layer: u32,
        face_slice: u32,
        src: &[u8],
    ) -> Result<(), KtxError> {
        if self.supercompression_scheme().is_active() {
            return Err(KtxError::UnsupportedFormat(
                "cannot write images of a supercompressed texture".into(),
            ));
        }
        let range = self.image_range(level, layer, face_slice)?;
        if src.len() != range.len() {
            return Err(KtxError::InvalidValue(format!(
                "image at level {} is {} bytes, got {}",
                level,
                range.len(),
                src.len()
            )));
        }
        self.data[range].copy_from_slice(src);
        Ok(())
    }
}
