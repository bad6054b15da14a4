//! Region directory lookup.

use std::collections::HashMap;

use common::RegionId;
use serde::{Deserialize, Serialize};

/// A canonical administrative subdivision (state/province) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    /// Short code, e.g. "TX".
    pub code: String,
    /// Canonical display name, e.g. "Texas".
    pub name: String,
    /// ISO country the region belongs to.
    pub country_id: String,
}

/// Resolves region identifiers to canonical directory records.
///
/// Resolution is a pure function of the identifier; implementations may
/// cache or hold the whole directory in memory.
pub trait RegionDirectory: Send + Sync {
    /// Looks up a region by its directory identifier.
    fn resolve(&self, id: RegionId) -> Option<Region>;
}

/// Region directory backed by a static in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticRegionDirectory {
    regions: HashMap<RegionId, Region>,
}

impl StaticRegionDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from a list of region records.
    pub fn with_regions(regions: impl IntoIterator<Item = Region>) -> Self {
        Self {
            regions: regions.into_iter().map(|r| (r.id, r)).collect(),
        }
    }

    /// Adds a region record to the directory.
    pub fn insert(&mut self, region: Region) {
        self.regions.insert(region.id, region);
    }

    /// Returns the number of directory entries.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the directory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl RegionDirectory for StaticRegionDirectory {
    fn resolve(&self, id: RegionId) -> Option<Region> {
        self.regions.get(&id).cloned()
    }
}
