use crate::region::Region;
use crate::utils::bbox::BoundingBox;
use anyhow::Result;

/// Single object tracker under evaluation
///
/// Errors returned by the tracker are propagated to the caller of the evaluation unchanged.
///
pub trait Tracker<I> {
    /// Name under which the results are stored, defaults to the implementing type name
    ///
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }

    /// Loads the initialization frame and the ground truth location of the tracked object
    ///
    fn init_frame(&mut self, image: &I, ground_truth: &BoundingBox) -> Result<()>;

    /// Returns the estimated location of the tracked object on the image
    ///
    fn estimate(&mut self, image: &I) -> Result<Region>;
}
