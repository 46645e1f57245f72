use crate::errors::AppError;
use crate::models::{
    HistoricalObservation, HourlyOrders, ObservationRequest, PeakHoursResponse,
    PredictionResponse, RemainingQuery, WeekQuery, WeekResponse,
};
use crate::prediction::{predict_for_date, predict_remaining_today, predict_week, week_dates};
use crate::state::AppState;
use crate::stats::predict_peak_hours;
use crate::storage::persist_data;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::{debug, info};

pub async fn list_observations(State(state): State<AppState>) -> Json<Vec<HistoricalObservation>> {
    Json(state.observations().await)
}

pub async fn record_observation(
    State(state): State<AppState>,
    Json(payload): Json<ObservationRequest>,
) -> Result<(StatusCode, Json<HistoricalObservation>), AppError> {
    let observation = validate_observation(payload)?;

    let mut data = state.data.lock().await;
    data.observations.push(observation.clone());
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.observations.pop();
        return Err(err);
    }

    info!(
        date = %observation.date,
        revenue = observation.revenue,
        orders = observation.orders,
        "recorded observation"
    );
    Ok((StatusCode::CREATED, Json(observation)))
}

pub async fn predict_today(State(state): State<AppState>) -> Json<PredictionResponse> {
    let date = today();
    let data = state.data.lock().await;
    Json(PredictionResponse::new(date, predict_for_date(&data.observations, date)))
}

pub async fn predict_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<PredictionResponse>, AppError> {
    let date = parse_date(&date)?;
    let data = state.data.lock().await;
    Ok(Json(PredictionResponse::new(date, predict_for_date(&data.observations, date))))
}

pub async fn predict_next_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekResponse>, AppError> {
    let start = query.start.unwrap_or_else(today);
    if start.checked_add_signed(Duration::days(6)).is_none() {
        return Err(AppError::bad_request(format!(
            "start {start} leaves no room for a full week"
        )));
    }

    let data = state.data.lock().await;
    let days = week_dates(start)
        .zip(predict_week(&data.observations, start))
        .map(|(date, prediction)| PredictionResponse::new(date, prediction))
        .collect();

    Ok(Json(WeekResponse {
        start_date: start,
        days,
    }))
}

pub async fn predict_remaining(
    State(state): State<AppState>,
    Query(query): Query<RemainingQuery>,
) -> Result<Json<PredictionResponse>, AppError> {
    if !query.revenue.is_finite() || query.revenue < 0.0 {
        return Err(AppError::bad_request("revenue must be a non-negative number"));
    }

    let data = state.data.lock().await;
    let prediction = predict_remaining_today(&data.observations, query.revenue, query.orders);
    debug!(based_on = %prediction.based_on, "remaining-day prediction");
    Ok(Json(PredictionResponse::new(today(), prediction)))
}

pub async fn peak_hours(State(state): State<AppState>) -> Json<PeakHoursResponse> {
    let data = state.data.lock().await;
    let hourly: Vec<HourlyOrders> = data
        .observations
        .iter()
        .filter(|observation| observation.hour.is_some())
        .map(|observation| HourlyOrders {
            hour: observation.hour,
            orders: observation.orders,
        })
        .collect();

    Json(PeakHoursResponse {
        samples: hourly.len(),
        peak_hours: predict_peak_hours(&hourly),
    })
}

fn validate_observation(request: ObservationRequest) -> Result<HistoricalObservation, AppError> {
    let weekday = request.date.weekday().num_days_from_sunday() as u8;
    let day_of_week = request.day_of_week.unwrap_or(weekday);

    if day_of_week > 6 {
        return Err(AppError::bad_request("day_of_week must be between 0 and 6"));
    }
    if day_of_week != weekday {
        return Err(AppError::bad_request(format!(
            "day_of_week {day_of_week} does not match {} (expected {weekday})",
            request.date
        )));
    }
    if matches!(request.hour, Some(hour) if hour > 23) {
        return Err(AppError::bad_request("hour must be between 0 and 23"));
    }
    if !request.revenue.is_finite() || request.revenue < 0.0 {
        return Err(AppError::bad_request("revenue must be a non-negative number"));
    }

    Ok(HistoricalObservation {
        date: request.date,
        day_of_week,
        hour: request.hour,
        revenue: request.revenue,
        orders: request.orders,
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD")))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppData;

    fn request(date: NaiveDate) -> ObservationRequest {
        ObservationRequest {
            date,
            day_of_week: None,
            hour: None,
            revenue: 120.0,
            orders: 6,
        }
    }

    #[test]
    fn weekday_is_derived_from_date() {
        // Saturday
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let observation = validate_observation(request(date)).unwrap();
        assert_eq!(observation.day_of_week, 6);
    }

    #[test]
    fn rejects_inconsistent_weekday() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let err = validate_observation(ObservationRequest {
            day_of_week: Some(2),
            ..request(date)
        })
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = validate_observation(ObservationRequest {
            day_of_week: Some(7),
            ..request(date)
        })
        .unwrap_err();
        assert!(err.message.contains("between 0 and 6"));
    }

    #[test]
    fn rejects_bad_hour_and_revenue() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(validate_observation(ObservationRequest { hour: Some(24), ..request(date) }).is_err());
        assert!(validate_observation(ObservationRequest { revenue: -1.0, ..request(date) }).is_err());
        assert!(validate_observation(ObservationRequest { revenue: f64::NAN, ..request(date) }).is_err());
        assert!(validate_observation(ObservationRequest { hour: Some(23), ..request(date) }).is_ok());
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_date("2026-02-07").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()
        );
        assert!(parse_date("07/02/2026").is_err());
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        // a directory cannot be written as a file
        let state = AppState::new(std::env::temp_dir(), AppData::default());
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let err = record_observation(State(state.clone()), Json(request(date)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.observations().await.is_empty());
    }

    #[tokio::test]
    async fn week_near_last_date_is_rejected() {
        let state = AppState::new(std::env::temp_dir(), AppData::default());

        let err = predict_next_week(
            State(state.clone()),
            Query(WeekQuery {
                start: Some(NaiveDate::MAX - Duration::days(3)),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let Json(week) = predict_next_week(
            State(state),
            Query(WeekQuery {
                start: Some(NaiveDate::MAX - Duration::days(6)),
            }),
        )
        .await
        .unwrap();
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[6].date, NaiveDate::MAX);
    }
}
