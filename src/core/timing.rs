use std::cmp::Ordering;

use crate::models::Stop;

/// Key for stops without a usable time; sorts after every valid key
pub const TIME_KEY_MAX: u32 = u32::MAX;

/// Shown in place of a blank start or end time
pub const TIME_PLACEHOLDER: &str = "--:--";

const UNNAMED_STOP: &str = "未命名景點";
const MEAL_CATEGORY: &str = "用餐";

/// Minutes since midnight for an `HH:MM` string
///
/// Blank input, the `--:--` placeholder, anything that is not exactly two
/// integer parts, and out-of-range hours or minutes all map to [`TIME_KEY_MAX`].
pub fn time_key(hhmm: Option<&str>) -> u32 {
    let t = hhmm.unwrap_or_default().trim();
    if t.is_empty() || t == TIME_PLACEHOLDER {
        return TIME_KEY_MAX;
    }

    let mut parts = t.split(':');
    let (Some(hour), Some(minute), None) = (parts.next(), parts.next(), parts.next()) else {
        return TIME_KEY_MAX;
    };

    match (hour.parse::<i32>(), minute.parse::<i32>()) {
        (Ok(h), Ok(m)) if (0..=23).contains(&h) && (0..=59).contains(&m) => (h * 60 + m) as u32,
        _ => TIME_KEY_MAX,
    }
}

/// Itinerary order: start time, then end time, then name
pub fn compare_stops(a: &Stop, b: &Stop) -> Ordering {
    time_key(Some(a.start_time.as_str()))
        .cmp(&time_key(Some(b.start_time.as_str())))
        .then_with(|| time_key(Some(a.end_time.as_str())).cmp(&time_key(Some(b.end_time.as_str()))))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort a day's stops in place into itinerary order
///
/// Stable; stops with missing or invalid times land after every timed stop.
pub fn sort_stops(stops: &mut [Stop]) {
    stops.sort_by(compare_stops);
}

impl Stop {
    /// Start and end on two lines, blanks shown as `--:--`
    pub fn time_range_label(&self) -> String {
        format!(
            "{}\n{}",
            or_placeholder(&self.start_time),
            or_placeholder(&self.end_time)
        )
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_STOP
        } else {
            &self.name
        }
    }

    pub fn is_meal(&self) -> bool {
        self.category.contains(MEAL_CATEGORY)
    }
}

#[inline]
fn or_placeholder(time: &str) -> &str {
    if time.trim().is_empty() {
        TIME_PLACEHOLDER
    } else {
        time
    }
}
