mod analytics;
mod comparison;
mod price_series;

pub use analytics::{DifferenceSeries, IndexedPoint, NormalizedSeries, SeriesMetrics};
pub use comparison::{ComparisonMeta, ComparisonResult, TickerReport};
pub use price_series::{PricePoint, PriceSeries};
