use crate::error::{CommitMapError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLDS: [u32; 5] = [0, 5, 10, 15, 20];
pub const DEFAULT_NORMALIZED_LEVELS: usize = 5;

/// Ascending inclusive upper bounds; a count above the last bound lands in the
/// open-ended top level. The first bound is always 0 so level 0 means no commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thresholds {
    upper_bounds: Vec<u32>,
}

impl Thresholds {
    pub fn new(upper_bounds: Vec<u32>) -> Result<Self> {
        match upper_bounds.first() {
            None => {
                return Err(CommitMapError::InvalidThresholds(
                    "at least one bound is required".to_string(),
                ))
            }
            Some(&first) if first != 0 => {
                return Err(CommitMapError::InvalidThresholds(format!(
                    "first bound must be 0, got {first}"
                )))
            }
            Some(_) => {}
        }
        if let Some(pair) = upper_bounds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CommitMapError::InvalidThresholds(format!(
                "bounds must be strictly ascending ({} then {})",
                pair[0], pair[1]
            )));
        }
        if upper_bounds.last() == Some(&u32::MAX) {
            return Err(CommitMapError::InvalidThresholds(format!(
                "bounds must stay below {}, the open-ended top bucket needs room",
                u32::MAX
            )));
        }
        Ok(Self { upper_bounds })
    }

    pub fn upper_bounds(&self) -> &[u32] {
        &self.upper_bounds
    }

    pub fn levels(&self) -> usize {
        self.upper_bounds.len() + 1
    }

    pub fn level(&self, count: u32) -> usize {
        self.upper_bounds.partition_point(|&bound| bound < count)
    }

    /// Human label for a level, e.g. `0`, `1-5`, `21+`.
    pub fn label(&self, level: usize) -> String {
        let bounds = &self.upper_bounds;
        match level {
            0 => "0".to_string(),
            l if l < bounds.len() => {
                let low = bounds[l - 1].saturating_add(1);
                let high = bounds[l];
                if low == high {
                    format!("{low}")
                } else {
                    format!("{low}-{high}")
                }
            }
            _ => format!("{}+", bounds[bounds.len() - 1].saturating_add(1)),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            upper_bounds: DEFAULT_THRESHOLDS.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    #[default]
    Fixed,
    Normalized,
}

/// How a day's total becomes an intensity level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shading {
    Fixed(Thresholds),
    /// Level scales with the busiest day of the run; any commit is at least level 1.
    Normalized { levels: usize },
}

impl Default for Shading {
    fn default() -> Self {
        Shading::Fixed(Thresholds::default())
    }
}

impl Shading {
    pub fn mode(&self) -> ShadingMode {
        match self {
            Shading::Fixed(_) => ShadingMode::Fixed,
            Shading::Normalized { .. } => ShadingMode::Normalized,
        }
    }

    pub fn levels(&self) -> usize {
        match self {
            Shading::Fixed(thresholds) => thresholds.levels(),
            Shading::Normalized { levels } => (*levels).max(2),
        }
    }

    /// `max` is the busiest day total in view; it only matters for normalized shading.
    pub fn classify(&self, count: u32, max: u32) -> usize {
        match self {
            Shading::Fixed(thresholds) => thresholds.level(count),
            Shading::Normalized { .. } => {
                if count == 0 {
                    return 0;
                }
                let top = (self.levels() - 1) as u64;
                let max = max.max(count) as u64;
                let scaled = (count as u64 * top).div_ceil(max);
                scaled.clamp(1, top) as usize
            }
        }
    }

    pub fn label(&self, level: usize) -> String {
        match self {
            Shading::Fixed(thresholds) => thresholds.label(level),
            Shading::Normalized { .. } => {
                if level == 0 {
                    "0".to_string()
                } else {
                    format!("≤{}%", level * 100 / (self.levels() - 1))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buckets() {
        let t = Thresholds::default();
        assert_eq!(t.levels(), 6);
        assert_eq!(t.level(0), 0);
        assert_eq!(t.level(1), 1);
        assert_eq!(t.level(5), 1);
        assert_eq!(t.level(6), 2);
        assert_eq!(t.level(10), 2);
        assert_eq!(t.level(15), 3);
        assert_eq!(t.level(20), 4);
        assert_eq!(t.level(21), 5);
        assert_eq!(t.level(u32::MAX), 5);
    }

    #[test]
    fn labels() {
        let t = Thresholds::default();
        let labels: Vec<String> = (0..t.levels()).map(|l| t.label(l)).collect();
        assert_eq!(labels, vec!["0", "1-5", "6-10", "11-15", "16-20", "21+"]);

        let tight = Thresholds::new(vec![0, 1, 3]).unwrap();
        assert_eq!(tight.label(1), "1");
        assert_eq!(tight.label(2), "2-3");
        assert_eq!(tight.label(3), "4+");
    }

    #[test]
    fn adjustable_table() {
        let t = Thresholds::new(vec![0, 5, 10, 15]).unwrap();
        assert_eq!(t.levels(), 5);
        assert_eq!(t.level(16), 4);
        assert_eq!(t.level(100), 4);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Thresholds::new(vec![]).is_err());
        assert!(Thresholds::new(vec![1, 5]).is_err());
        assert!(Thresholds::new(vec![0, 5, 5]).is_err());
        assert!(Thresholds::new(vec![0, 10, 5]).is_err());
    }

    #[test]
    fn largest_bound_leaves_room_for_top_bucket() {
        assert!(Thresholds::new(vec![0, u32::MAX]).is_err());

        let widest = Thresholds::new(vec![0, u32::MAX - 1]).unwrap();
        assert_eq!(widest.label(1), format!("1-{}", u32::MAX - 1));
        assert_eq!(widest.label(2), format!("{}+", u32::MAX));
        assert_eq!(widest.level(u32::MAX), 2);
    }

    #[test]
    fn fixed_and_normalized_are_monotonic() {
        let shadings = [
            Shading::default(),
            Shading::Normalized {
                levels: DEFAULT_NORMALIZED_LEVELS,
            },
        ];
        for shading in &shadings {
            let mut previous = 0;
            for count in 0..=60 {
                let level = shading.classify(count, 40);
                assert!(level >= previous, "{shading:?} dropped at {count}");
                assert!(level < shading.levels());
                previous = level;
            }
        }
    }

    #[test]
    fn normalized_scales_to_max() {
        let shading = Shading::Normalized { levels: 5 };
        assert_eq!(shading.classify(0, 40), 0);
        assert_eq!(shading.classify(1, 40), 1);
        assert_eq!(shading.classify(20, 40), 2);
        assert_eq!(shading.classify(40, 40), 4);
        assert_eq!(shading.classify(7, 0), 4);
    }
}
