//! `catref-core`: partner catalog reconciliation core.
//!
//! Pure domain crate: typed rows, canonical unit conversion, packaging
//! tier selection, and output record assembly. No IO or network.

pub mod index;
pub mod model;
pub mod record;
pub mod tiers;
pub mod units;

pub use model::{CodeMapping, FabdisWorkbook, LogisticsLine, MediaRecord, ProductRecord};
pub use record::build_record;
pub use tiers::{select_tiers, NoPackagingData, TierSelection};
pub use units::Measure;
