use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::KtxError;
use crate::vk_format::FormatSize;

pub const KHR_DF_MODEL_RGBSDA: u8 = 1;
pub const KHR_DF_MODEL_ETC1S: u8 = 163;
pub const KHR_DF_MODEL_UASTC: u8 = 166;

const BASIC_BLOCK_HEADER_BYTES: u32 = 24;
const SAMPLE_BYTES: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct DFDSampleType {
    pub row_0: u32,
    pub row_1: u32,
    pub row_2: u32,
    pub row_3: u32,
}

impl DFDSampleType {
    /// Number of bits covered by this sample.
    pub fn bit_length(&self) -> u32 {
        ((self.row_0 >> 16) & 0xFF) + 1
    }
}

/// Basic descriptor block of a Khronos data format descriptor.
///
/// Rows are the raw little-endian words of the block header; samples follow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct BasicDataFormatDescriptor {
    pub row_0: u32,
    pub row_1: u32,
    pub row_2: u32,
    pub row_3: u32,
    pub row_4: u32,
    pub row_5: u32,
    pub samples: Vec<DFDSampleType>
}

impl BasicDataFormatDescriptor {
    /// Reads the first descriptor block of a DFD, starting at its `dfdTotalSize` word.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KtxError> {
        let truncated = |_| KtxError::InvalidValue("data format descriptor is truncated".into());
        let mut rdr = Cursor::new(bytes);

        let total_size = rdr.read_u32::<LittleEndian>().map_err(truncated)?;
        if total_size as usize > bytes.len() {
            return Err(KtxError::InvalidValue(format!(
                "data format descriptor claims {} bytes, {} available",
                total_size,
                bytes.len()
            )));
        }

        let mut dfd = BasicDataFormatDescriptor {
            row_0: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            row_1: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            row_2: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            row_3: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            row_4: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            row_5: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            samples: vec![],
        };

        let block_size = dfd.descriptor_block_size();
        if block_size < BASIC_BLOCK_HEADER_BYTES || (block_size - BASIC_BLOCK_HEADER_BYTES) % SAMPLE_BYTES != 0 {
            return Err(KtxError::InvalidValue(format!(
                "invalid basic descriptor block size {}",
                block_size
            )));
        }
        for _ in 0..(block_size - BASIC_BLOCK_HEADER_BYTES) / SAMPLE_BYTES {
            dfd.samples.push(DFDSampleType {
                row_0: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
                row_1: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
                row_2: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
                row_3: rdr.read_u32::<LittleEndian>().map_err(truncated)?,
            });
        }
        Ok(dfd)
    }

    pub fn descriptor_block_size(&self) -> u32 {
        self.row_1 >> 16
    }

    pub fn color_model(&self) -> u8 {
        (self.row_2 & 0xFF) as u8
    }

    /// Texel block dimensions, stored minus one in the descriptor.
    pub fn texel_block_dimensions(&self) -> [u32; 3] {
        [
            (self.row_3 & 0xFF) + 1,
            ((self.row_3 >> 8) & 0xFF) + 1,
            ((self.row_3 >> 16) & 0xFF) + 1,
        ]
    }

    pub fn bytes_plane0(&self) -> u32 {
        self.row_4 & 0xFF
    }

    /// Block layout described by this descriptor.
    ///
    /// BasisLZ descriptors carry no plane size; ETC1S blocks are 8 bytes and UASTC blocks 16.
    pub fn format_size(&self) -> Result<FormatSize, KtxError> {
        match self.color_model() {
            KHR_DF_MODEL_ETC1S => return Ok(FormatSize::block(4, 4, 8)),
            KHR_DF_MODEL_UASTC => return Ok(FormatSize::block(4, 4, 16)),
            _ => {}
        }

        let bytes = self.bytes_plane0();
        if bytes == 0 {
            return Err(KtxError::UnsupportedFormat(format!(
                "color model {} has no bytesPlane0",
                self.color_model()
            )));
        }
        let [width, height, depth] = self.texel_block_dimensions();
        if width == 1 && height == 1 && depth == 1 {
            let type_size = self
                .samples
                .first()
                .map_or(1, |sample| sample.bit_length().div_ceil(8));
            Ok(FormatSize::texel(bytes, type_size))
        } else {
            Ok(FormatSize {
                block_depth: depth,
                ..FormatSize::block(width, height, bytes)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use byteorder::WriteBytesExt;

    use super::*;

    fn r16_sfloat() -> BasicDataFormatDescriptor {
        BasicDataFormatDescriptor {
            row_0: 0,
            row_1: 2 << 0 | 40 << 16,
            row_2: (KHR_DF_MODEL_RGBSDA as u32) | 1 << 8 | 1 << 16,
            row_3: 0,
            row_4: 2,
            row_5: 0,
            samples: vec![DFDSampleType {
                row_0: 0 << 0 | 15 << 16 | 0b11000000 << 24,
                row_1: 0,
                row_2: 0xBF800000,
                row_3: 0x3F800000,
            }],
        }
    }

    fn to_bytes(dfd: &BasicDataFormatDescriptor) -> Vec<u8> {
        let mut out = vec![];
        out.write_u32::<LittleEndian>(4 + dfd.descriptor_block_size()).unwrap();
        for row in [dfd.row_0, dfd.row_1, dfd.row_2, dfd.row_3, dfd.row_4, dfd.row_5] {
            out.write_u32::<LittleEndian>(row).unwrap();
        }
        for sample in &dfd.samples {
            for row in [sample.row_0, sample.row_1, sample.row_2, sample.row_3] {
                out.write_u32::<LittleEndian>(row).unwrap();
            }
        }
        out
    }

    #[test]
    fn parses_single_sample_block() {
        let dfd = r16_sfloat();
        let bytes = to_bytes(&dfd);
        assert_eq!(bytes.len(), 44);
        assert_eq!(BasicDataFormatDescriptor::from_bytes(&bytes).unwrap(), dfd);
    }

    #[test]
    fn truncated_block_is_rejected() {
        let bytes = to_bytes(&r16_sfloat());
        let err = BasicDataFormatDescriptor::from_bytes(&bytes[..30]).unwrap_err();
        assert!(matches!(err, KtxError::InvalidValue(_)));
    }

    #[test]
    fn texel_format_size() {
        let size = r16_sfloat().format_size().unwrap();
        assert_eq!(size, FormatSize::texel(2, 2));
    }

    #[test]
    fn basis_models() {
        let mut dfd = r16_sfloat();
        dfd.row_2 = KHR_DF_MODEL_ETC1S as u32;
        dfd.row_4 = 0;
        assert_eq!(dfd.format_size().unwrap(), FormatSize::block(4, 4, 8));

        dfd.row_2 = KHR_DF_MODEL_UASTC as u32;
        assert_eq!(dfd.format_size().unwrap(), FormatSize::block(4, 4, 16));
    }

    #[test]
    fn block_dimensions_from_descriptor() {
        let mut dfd = r16_sfloat();
        dfd.row_2 = 162;
        dfd.row_3 = 5 | 4 << 8;
        dfd.row_4 = 16;
        let size = dfd.format_size().unwrap();
        assert!(size.compressed);
        assert_eq!((size.block_width, size.block_height, size.block_depth), (6, 5, 1));
        assert_eq!(size.block_size_bytes, 16);
    }

    #[test]
    fn missing_plane_size() {
        let mut dfd = r16_sfloat();
        dfd.row_4 = 0;
        assert!(matches!(dfd.format_size(), Err(KtxError::UnsupportedFormat(_))));
    }
}
