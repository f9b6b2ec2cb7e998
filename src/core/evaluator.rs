//! Region evaluation
//!
//! Queries a density source once per region and collects the results in
//! input order for downstream rendering.

use crate::core::density::DensitySource;
use crate::core::error::{DensityError, DensityResult};
use crate::core::region::Region;
use indexmap::IndexMap;
use log::{debug, warn};

/// Ordered mapping from region name to density sequence
pub type DensityMap = IndexMap<String, Vec<f64>>;

/// Evaluation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Replace NaN with 0.0 in every returned sequence
    pub zero_missing: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { zero_missing: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionEvaluator {
    config: EvaluatorConfig,
}

impl RegionEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Evaluate every region against `source`.
    ///
    /// The first failing region aborts the whole evaluation; the error names
    /// that region. A repeated name keeps its first position in the output
    /// and takes the later sequence.
    pub fn evaluate<S: DensitySource + ?Sized>(
        &self,
        source: &mut S,
        regions: &[Region],
    ) -> DensityResult<DensityMap> {
        let mut densities = DensityMap::with_capacity(regions.len());

        for region in regions {
            let values = source
                .density(region, self.config.zero_missing)
                .map_err(|e| DensityError::Region {
                    region: region.name.clone(),
                    source: Box::new(e),
                })?;
            debug!("{}: {} values", region.name, values.len());

            if densities.insert(region.name.clone(), values).is_some() {
                warn!("Duplicate region name {}, keeping the last sequence", region.name);
            }
        }

        Ok(densities)
    }
}
