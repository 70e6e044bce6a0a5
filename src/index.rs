use log::warn;

use crate::error::KtxError;
use crate::level::Level;

/// Level index, one entry per mip level, level 0 first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    pub levels: Vec<Level>
}

impl Index {
    pub fn new(levels: Vec<Level>) -> Self {
        Index { levels }
    }

    pub fn level(&self, level: u32) -> Option<&Level> {
        self.levels.get(level as usize)
    }

    /// Checks that every level is non-empty, lies inside a buffer of
    /// `data_size` bytes and shares no byte with another level.
    pub fn validate(&self, data_size: u64) -> Result<(), KtxError> {
        for (i, level) in self.levels.iter().enumerate() {
            if level.byte_length == 0 {
                warn!("level {} is empty", i);
                return Err(KtxError::InvalidValue(format!("level {} holds no bytes", i)));
            }
            match level.end() {
                Some(end) if end <= data_size => {}
                _ => {
                    warn!(
                        "level {} spans {}+{} bytes, data holds {}",
                        i, level.byte_offset, level.byte_length, data_size
                    );
                    return Err(KtxError::InvalidValue(format!(
                        "level {} extends past the end of the data",
                        i
                    )));
                }
            }
        }

        let mut ranges: Vec<(u64, u64, usize)> = self
            .levels
            .iter()
            .enumerate()
            .map(|(i, level)| (level.byte_offset, level.byte_offset + level.byte_length, i))
            .collect();
        ranges.sort();
        for pair in ranges.windows(2) {
            let (_, end, first) = pair[0];
            let (start, _, second) = pair[1];
            if start < end {
                warn!("levels {} and {} overlap", first, second);
                return Err(KtxError::InvalidValue(format!(
                    "levels {} and {} overlap",
                    first, second
                )));
            }
        }
        Ok(())
    }
}
