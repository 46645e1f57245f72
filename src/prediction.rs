use crate::models::{Confidence, HistoricalObservation, PredictionResult};
use crate::stats::{day_of_week_averages, trend_multiplier};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};

const WEEKDAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

/// Share of a day's sales expected in each hour, peaking at lunch and dinner.
const HOURLY_WEIGHTS: [f64; 24] = [
    0.01, 0.01, 0.01, 0.01, 0.01, 0.02, // 00-05
    0.02, 0.03, 0.04, 0.05, 0.06, // 06-10
    0.08, 0.10, 0.09, 0.07, // 11-14
    0.05, 0.05, 0.06, 0.08, 0.09, 0.08, // 15-20
    0.06, 0.04, 0.02, // 21-23
];

const LAST_HOUR: u32 = 23;

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::Low => "Baixa confiança",
            Confidence::Medium => "Média confiança",
            Confidence::High => "Alta confiança",
        }
    }

    pub fn percentage(self) -> u8 {
        match self {
            Confidence::Low => 40,
            Confidence::Medium => 70,
            Confidence::High => 90,
        }
    }
}

pub fn confidence_label(confidence: Confidence) -> &'static str {
    confidence.label()
}

pub fn confidence_percentage(confidence: Confidence) -> u8 {
    confidence.percentage()
}

/// Confidence from the total sample size and the samples for the target weekday.
pub fn determine_confidence(total: usize, weekday_count: usize) -> Confidence {
    if total < 7 || weekday_count < 2 {
        Confidence::Low
    } else if total < 21 || weekday_count < 3 {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

/// Forecast for `target` from the average of its weekday, scaled by the
/// recent trend.
pub fn predict_for_date(data: &[HistoricalObservation], target: NaiveDate) -> PredictionResult {
    if data.is_empty() {
        return PredictionResult {
            predicted_revenue: 0.0,
            predicted_orders: 0,
            confidence: Confidence::Low,
            based_on: "Sem dados históricos".to_string(),
        };
    }

    let weekday = target.weekday().num_days_from_sunday() as usize;
    let day = day_of_week_averages(data)[weekday];
    let trend = trend_multiplier(data);

    PredictionResult {
        predicted_revenue: day.avg_revenue * trend,
        predicted_orders: round_orders(day.avg_orders * trend),
        confidence: determine_confidence(data.len(), day.count),
        based_on: format!(
            "{} {}{} anteriores",
            day.count,
            WEEKDAY_NAMES[weekday],
            if day.count != 1 { "s" } else { "" }
        ),
    }
}

pub fn predict_remaining_today(
    data: &[HistoricalObservation],
    current_revenue: f64,
    current_orders: u32,
) -> PredictionResult {
    predict_remaining_today_at(data, current_revenue, current_orders, Local::now().naive_local())
}

/// End-of-day projection: actuals so far plus the share of the full-day
/// forecast that the hourly weights leave for the rest of the day.
pub fn predict_remaining_today_at(
    data: &[HistoricalObservation],
    current_revenue: f64,
    current_orders: u32,
    now: NaiveDateTime,
) -> PredictionResult {
    let hour = now.hour();

    if hour >= LAST_HOUR || data.is_empty() {
        return PredictionResult {
            predicted_revenue: current_revenue,
            predicted_orders: current_orders,
            confidence: Confidence::High,
            based_on: "Dia finalizado".to_string(),
        };
    }

    let full_day = predict_for_date(data, now.date());
    let remaining = remaining_fraction(hour);

    PredictionResult {
        predicted_revenue: current_revenue + full_day.predicted_revenue * remaining,
        predicted_orders: current_orders
            .saturating_add(round_orders(f64::from(full_day.predicted_orders) * remaining)),
        confidence: full_day.confidence,
        based_on: format!("Tendência + {}h restantes", 24 - hour),
    }
}

/// Seven consecutive daily forecasts starting at `start`. The sequence is
/// cut short only when it would run past the last representable date.
pub fn predict_week(data: &[HistoricalObservation], start: NaiveDate) -> Vec<PredictionResult> {
    week_dates(start)
        .map(|date| predict_for_date(data, date))
        .collect()
}

/// Up to seven consecutive dates from `start`, ending early at `NaiveDate::MAX`.
pub fn week_dates(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..7).map_while(move |offset| start.checked_add_signed(Duration::days(offset)))
}

// The weights add up to slightly more than 1, so late hours can overshoot.
fn remaining_fraction(hour: u32) -> f64 {
    let elapsed: f64 = HOURLY_WEIGHTS.iter().take(hour as usize).sum();
    (1.0 - elapsed).clamp(0.0, 1.0)
}

fn round_orders(value: f64) -> u32 {
    value.max(0.0).round() as u32
}
