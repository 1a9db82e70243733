//! Region and facility data.
//!
//! ## Records
//! - `RawRegion`: a region as supplied by the dataset (center and facilities optional)
//! - `Region`: a normalized region (center and facility collection always present)
//! - `Facility`: a point of interest owned by one region and one category
//!
//! ## Pipeline
//! ```text
//! regions.json ─► RawRegion ─► normalize() ─► Region ─► derived lists ─► detail views
//!                                  │
//!                                  └─ placeholder synthesis when facilities are absent
//! ```
//!
//! `RegionStore` normalizes each record on first access and caches the result.

mod dataset;
mod derived;
pub mod links;
mod normalize;
mod region;

pub use dataset::{parse_regions, DatasetError, RegionStore};
pub use derived::{
    categories_of, category_label, facilities_in_view, filter_by_query, flatten_facilities,
    total_facilities, CategoryKind, Named, TaggedFacility,
};
pub use normalize::{normalize, slug, synthesize_facilities, FALLBACK_CENTER};
pub use region::{CategorizedFacilities, Facility, FacilityRef, Point, RawRegion, Region};
