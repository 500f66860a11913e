use chrono::{DateTime, Utc};

/// A raw daily bar as returned by a provider, before normalization.
///
/// Field types deliberately stay provider-shaped: the timestamp may carry a
/// time-of-day component and the volume may be absent or NaN. The normalizer
/// in `market_data_model` owns the coercion into a canonical `Bar`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}
