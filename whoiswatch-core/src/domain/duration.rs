use chrono::{DateTime, TimeDelta, Utc};

/// Renders the time between `now` and `target` in whole days and hours,
/// e.g. `367d 3h remaining` or `3h ago`. Days are left out when zero and
/// both units are truncated, never rounded.
pub fn format_expiration(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target - now;
    let expired = delta < TimeDelta::zero();

    let total_hours = delta.abs().num_hours();
    let days = total_hours / 24;
    let hours = total_hours % 24;

    let amount = if days > 0 {
        format!("{}d {}h", days, hours)
    } else {
        format!("{}h", hours)
    };

    if expired {
        format!("{} ago", amount)
    } else {
        format!("{} remaining", amount)
    }
}
