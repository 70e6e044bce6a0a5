pub mod vk_format;
pub mod header;
pub mod index;
pub mod level;
pub mod dfd;
pub mod error;
pub(crate) mod layout;

pub mod texture;

pub mod host;
pub mod abi;
#[cfg(feature = "ffi")]
pub mod ffi;

pub use error::{ErrorCode, KtxError};
pub use texture::{TextureCreateInfo, TextureKtx2};

#[cfg(test)]
mod tests {
    use crate::header::Header;
    use crate::level::Level;
    use crate::texture::{TextureCreateInfo, TextureKtx2};
    use crate::vk_format::VkFormat;
    use crate::KtxError;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn containers() -> Vec<TextureCreateInfo> {
        vec![
            TextureCreateInfo::new_2d(4, 4, VkFormat::R8G8B8A8_UNORM),
            TextureCreateInfo {
                num_levels: 4,
                ..TextureCreateInfo::new_2d(13, 7, VkFormat::R8G8B8_SRGB)
            },
            TextureCreateInfo {
                num_levels: 5,
                num_faces: 6,
                ..TextureCreateInfo::new_2d(16, 16, VkFormat::BC7_UNORM_BLOCK)
            },
            TextureCreateInfo {
                num_levels: 3,
                num_faces: 6,
                num_layers: 3,
                is_array: true,
                ..TextureCreateInfo::new_2d(8, 8, VkFormat::R16_SFLOAT)
            },
            TextureCreateInfo {
                num_levels: 2,
                num_layers: 4,
                is_array: true,
                ..TextureCreateInfo::new_2d(10, 6, VkFormat::ASTC_6x5_SRGB_BLOCK)
            },
            TextureCreateInfo {
                num_dimensions: 3,
                base_depth: 4,
                num_levels: 3,
                ..TextureCreateInfo::new_2d(8, 4, VkFormat::R32G32B32A32_SFLOAT)
            },
            TextureCreateInfo {
                num_dimensions: 1,
                base_height: 1,
                num_levels: 6,
                ..TextureCreateInfo::new_2d(32, 1, VkFormat::R8_UNORM)
            },
        ]
    }

    fn coordinates(tex: &TextureKtx2) -> Vec<(u32, u32, u32)> {
        let mut coords = vec![];
        for level in 0..tex.num_levels() {
            for layer in 0..tex.num_layers() {
                for face in 0..tex.num_faces() {
                    coords.push((level, layer, face));
                }
            }
        }
        coords
    }

    #[test]
    fn it_works() {
        init();
        let tex = TextureKtx2::new(&TextureCreateInfo::new_2d(4, 4, VkFormat::R8G8B8A8_UNORM)).unwrap();
        assert_eq!(tex.get_image_size(0), Ok(64));
        assert_eq!(tex.get_image_offset(0, 0, 0), Ok(0));

        let cube = TextureKtx2::new(&TextureCreateInfo {
            num_faces: 6,
            ..TextureCreateInfo::new_2d(4, 4, VkFormat::R8G8B8A8_UNORM)
        })
        .unwrap();
        assert_eq!(cube.get_image_offset(0, 0, 3), Ok(192));
    }

    #[test]
    fn images_fit_inside_data() {
        init();
        for info in containers() {
            let tex = TextureKtx2::new(&info).unwrap();
            for (level, layer, face) in coordinates(&tex) {
                let size = tex.get_image_size(level).unwrap();
                let offset = tex.get_image_offset(level, layer, face).unwrap();
                assert!(size > 0);
                assert!(offset + size <= tex.data_size() as u64, "{:?} {:?}", info.vk_format, (level, layer, face));
            }
        }
    }

    #[test]
    fn images_never_overlap() {
        init();
        for info in containers() {
            let tex = TextureKtx2::new(&info).unwrap();
            let mut ranges: Vec<(u64, u64)> = coordinates(&tex)
                .into_iter()
                .map(|(level, layer, face)| {
                    let offset = tex.get_image_offset(level, layer, face).unwrap();
                    (offset, offset + tex.get_image_size(level).unwrap())
                })
                .collect();
            ranges.sort();
            for pair in ranges.windows(2) {
                assert!(pair[0].1 <= pair[1].0, "{:?}: {:?}", info.vk_format, pair);
            }
        }
    }

    #[test]
    fn offsets_increase_with_face_then_layer() {
        init();
        for info in containers() {
            let tex = TextureKtx2::new(&info).unwrap();
            for level in 0..tex.num_levels() {
                let offsets: Vec<u64> = coordinates(&tex)
                    .into_iter()
                    .filter(|(l, _, _)| *l == level)
                    .map(|(l, layer, face)| tex.get_image_offset(l, layer, face).unwrap())
                    .collect();
                assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn levels_are_aligned() {
        for info in containers() {
            let tex = TextureKtx2::new(&info).unwrap();
            let block = tex.format_size().block_size_bytes as u64;
            for level in 0..tex.num_levels() {
                let offset = tex.level_offset(level).unwrap();
                assert_eq!(offset % 4, 0);
                assert_eq!(offset % block, 0);
            }
        }
    }

    // Level index a loader could hand over with level 0 stored first.
    fn base_first(tex: &TextureKtx2) -> Vec<Level> {
        let alignment = tex.format_size().block_size_bytes.max(4) as u64;
        let mut offset = 0u64;
        let mut levels = vec![];
        for level in tex.levels() {
            offset = offset.div_ceil(alignment) * alignment;
            levels.push(Level { byte_offset: offset, ..*level });
            offset += level.byte_length;
        }
        levels
    }

    #[test]
    fn base_first_index_orders_by_level() {
        init();
        let info = TextureCreateInfo {
            num_levels: 3,
            num_faces: 6,
            num_layers: 2,
            is_array: true,
            ..TextureCreateInfo::new_2d(8, 8, VkFormat::R8G8B8A8_UNORM)
        };
        let tex = TextureKtx2::new(&info).unwrap();
        let header: Header = *tex.header();
        let loaded = TextureKtx2::from_parts(header, None, base_first(&tex), tex.data().to_vec()).unwrap();

        assert_eq!(loaded.get_image_offset(0, 0, 0), Ok(0));
        let offsets: Vec<u64> = coordinates(&loaded)
            .into_iter()
            .map(|(level, layer, face)| loaded.get_image_offset(level, layer, face).unwrap())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        for (level, layer, face) in coordinates(&loaded) {
            let end = loaded.get_image_offset(level, layer, face).unwrap() + loaded.get_image_size(level).unwrap();
            assert!(end <= loaded.data_size() as u64);
        }
    }

    #[test]
    fn invalid_coordinates_are_reported_not_clamped() {
        for info in containers() {
            let tex = TextureKtx2::new(&info).unwrap();
            let (levels, layers, faces) = (tex.num_levels(), tex.num_layers(), tex.num_faces());
            assert!(matches!(tex.get_image_size(levels), Err(KtxError::InvalidLevel { .. })));
            assert!(matches!(tex.get_image_offset(levels, 0, 0), Err(KtxError::InvalidLevel { .. })));
            assert!(matches!(tex.get_image_offset(0, layers, 0), Err(KtxError::InvalidLayer { .. })));
            assert!(matches!(tex.get_image_offset(0, 0, faces), Err(KtxError::InvalidFace { .. })));
        }
    }

    #[test]
    fn textures_are_shared_across_threads() {
        let info = TextureCreateInfo {
            num_levels: 4,
            num_faces: 6,
            ..TextureCreateInfo::new_2d(8, 8, VkFormat::BC1_RGBA_UNORM_BLOCK)
        };
        let tex = TextureKtx2::new(&info).unwrap();
        let expected: Vec<u64> = (0..6).map(|f| tex.get_image_offset(0, 0, f).unwrap()).collect();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let offsets: Vec<u64> = (0..6).map(|f| tex.get_image_offset(0, 0, f).unwrap()).collect();
                    assert_eq!(offsets, expected);
                });
            }
        });
    }
}
