pub mod bucketed_scale;
pub mod domain;
pub mod record;
pub mod scale;
pub mod scale_factory;
pub mod types;

pub use bucketed_scale::{
    BucketCounts, BucketStackScale, BucketedScale, N_BUCKETS, bucket_for_normalized, bucket_index,
};
pub use domain::Domain;
pub use record::{NumericColumn, TrackRecord, derive_view};
pub use scale::{LinearScale, Scale, TickValues, linspace};
pub use scale_factory::{AxisScale, ScalePair, SelectedColumns, build_scales};
pub use types::{ChartMode, PixelRanges, Viewport};
