pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prediction;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use config::Config;
pub use prediction::{
    confidence_label, confidence_percentage, predict_for_date, predict_remaining_today,
    predict_remaining_today_at, predict_week,
};
pub use state::AppState;
pub use stats::{day_of_week_averages, predict_peak_hours, trend_multiplier};
pub use storage::load_data;
