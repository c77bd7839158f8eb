use super::ScheduleError;
use crate::model::schedule::ServiceCategory;

/// Derives how many service-day variants a stop table encodes from its cell
/// counts. Minute cells are laid out in repeating groups of one per variant
/// under every hour row, so the ratio must divide exactly and land in 1..=3.
pub fn resolve_service_category(
    hour_cells: usize,
    minute_cells: usize,
) -> Result<ServiceCategory, ScheduleError> {
    let mismatch = ScheduleError::InvalidDayRatio {
        hour_cells,
        minute_cells,
    };

    if hour_cells == 0 || minute_cells % hour_cells != 0 {
        return Err(mismatch);
    }

    match minute_cells / hour_cells {
        1 => Ok(ServiceCategory::Weekday),
        2 => Ok(ServiceCategory::WeekdaySaturday),
        3 => Ok(ServiceCategory::AllWeek),
        _ => Err(mismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ratios_resolve() {
        assert_eq!(
            resolve_service_category(18, 18).unwrap(),
            ServiceCategory::Weekday
        );
        assert_eq!(
            resolve_service_category(18, 36).unwrap(),
            ServiceCategory::WeekdaySaturday
        );
        assert_eq!(
            resolve_service_category(18, 54).unwrap(),
            ServiceCategory::AllWeek
        );
    }

    #[test]
    fn fractional_ratio_is_rejected() {
        // 6 / 4 = 1.5 day variants makes no sense
        assert!(resolve_service_category(4, 6).is_err());
    }

    #[test]
    fn ratio_above_three_is_rejected() {
        assert!(resolve_service_category(4, 16).is_err());
    }

    #[test]
    fn degenerate_tables_are_rejected() {
        assert!(resolve_service_category(0, 12).is_err());
        assert!(resolve_service_category(4, 0).is_err());
    }
}
