//! Data every session starts with.

use crate::models::RegionRecord;

pub fn initial_regions() -> Vec<RegionRecord> {
    vec![
        RegionRecord::new(1, "California", "USA", 1_000_000),
        RegionRecord::new(2, "New York", "USA", 800_000),
        RegionRecord::new(3, "Ontario", "Canada", 500_000),
        RegionRecord::new(4, "England", "United Kingdom", 2_000_000),
    ]
}
