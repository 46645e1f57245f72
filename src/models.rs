use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day (or one hour of a day) of aggregated sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    pub date: NaiveDate,
    /// 0 = Sunday.
    pub day_of_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    pub revenue: f64,
    pub orders: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayOfWeekStats {
    pub avg_revenue: f64,
    pub avg_orders: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_revenue: f64,
    pub predicted_orders: u32,
    pub confidence: Confidence,
    pub based_on: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyOrders {
    pub hour: Option<u8>,
    pub orders: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakHour {
    pub hour: u8,
    pub expected_orders: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub observations: Vec<HistoricalObservation>,
}

#[derive(Debug, Deserialize)]
pub struct ObservationRequest {
    pub date: NaiveDate,
    pub day_of_week: Option<u8>,
    pub hour: Option<u8>,
    pub revenue: f64,
    pub orders: u32,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub start: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct RemainingQuery {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub orders: u32,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub prediction: PredictionResult,
    pub confidence_label: &'static str,
    pub confidence_percentage: u8,
}

impl PredictionResponse {
    pub fn new(date: NaiveDate, prediction: PredictionResult) -> Self {
        Self {
            date,
            confidence_label: prediction.confidence.label(),
            confidence_percentage: prediction.confidence.percentage(),
            prediction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub start_date: NaiveDate,
    pub days: Vec<PredictionResponse>,
}

#[derive(Debug, Serialize)]
pub struct PeakHoursResponse {
    pub samples: usize,
    pub peak_hours: Vec<PeakHour>,
}
