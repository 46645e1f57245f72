use crate::models::{DayOfWeekStats, HistoricalObservation, HourlyOrders, PeakHour};

const TREND_WINDOW: usize = 7;
const TREND_MIN: f64 = 0.7;
const TREND_MAX: f64 = 1.3;
const PEAK_HOUR_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total_revenue: f64,
    total_orders: f64,
    count: usize,
}

/// Per-weekday averages indexed by `day_of_week` (0 = Sunday).
///
/// A weekday without observations averages to 0 with a count of 0.
pub fn day_of_week_averages(data: &[HistoricalObservation]) -> [DayOfWeekStats; 7] {
    let mut accumulators = [Accumulator::default(); 7];

    for observation in data {
        let Some(acc) = accumulators.get_mut(usize::from(observation.day_of_week)) else {
            continue;
        };
        acc.total_revenue += observation.revenue;
        acc.total_orders += f64::from(observation.orders);
        acc.count += 1;
    }

    accumulators.map(|acc| {
        if acc.count == 0 {
            return DayOfWeekStats::default();
        }
        let denom = acc.count as f64;
        DayOfWeekStats {
            avg_revenue: acc.total_revenue / denom,
            avg_orders: acc.total_orders / denom,
            count: acc.count,
        }
    })
}

/// Ratio of the latest week's revenue to the week before it, clamped to
/// `[0.7, 1.3]`. Returns 1 when there are fewer than two weeks of data or
/// the previous week had no revenue.
pub fn trend_multiplier(data: &[HistoricalObservation]) -> f64 {
    if data.len() < TREND_WINDOW * 2 {
        return 1.0;
    }

    let mut sorted: Vec<&HistoricalObservation> = data.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let recent_sum: f64 = sorted[..TREND_WINDOW].iter().map(|o| o.revenue).sum();
    let previous_sum: f64 = sorted[TREND_WINDOW..TREND_WINDOW * 2]
        .iter()
        .map(|o| o.revenue)
        .sum();

    let recent_avg = recent_sum / TREND_WINDOW as f64;
    let previous_avg = previous_sum / TREND_WINDOW as f64;

    if previous_avg == 0.0 {
        return 1.0;
    }

    (recent_avg / previous_avg).clamp(TREND_MIN, TREND_MAX)
}

/// Top five hours of the day by average order count.
///
/// Records without an hour are skipped. Equal averages keep ascending hour
/// order.
pub fn predict_peak_hours(data: &[HourlyOrders]) -> Vec<PeakHour> {
    let mut totals = [(0u64, 0u64); 24];

    for record in data {
        let Some(hour) = record.hour else {
            continue;
        };
        if let Some((total, count)) = totals.get_mut(usize::from(hour)) {
            *total = total.saturating_add(u64::from(record.orders));
            *count += 1;
        }
    }

    let mut ranked: Vec<PeakHour> = totals
        .iter()
        .enumerate()
        .map(|(hour, &(total, count))| PeakHour {
            hour: hour as u8,
            expected_orders: if count > 0 {
                (total as f64 / count as f64).round() as u32
            } else {
                0
            },
        })
        .collect();

    ranked.sort_by(|a, b| b.expected_orders.cmp(&a.expected_orders));
    ranked.truncate(PEAK_HOUR_COUNT);
    ranked
}
