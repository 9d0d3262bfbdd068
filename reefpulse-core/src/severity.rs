use reefpulse_schemas::parameter::{Direction, IdealRange, ParameterKind, Severity};

/// Span used in place of a zero-width range (ammonia and nitrite are 0-0). A guard
/// against dividing by zero, not a value derived from water chemistry.
pub const ZERO_WIDTH_SPAN: f64 = 1.0;

/// Deviation, as a fraction of the range span, beyond which a reading is critical.
pub const CRITICAL_FRACTION: f64 = 0.5;

/// Deviation, as a fraction of the range span, beyond which a reading is a warning.
pub const WARNING_FRACTION: f64 = 0.2;

/// Classifies how far `value` sits outside `range` on the `direction` side.
///
/// Callers guarantee `value` lies outside `range` on that side. Any detectable ammonia or
/// nitrite is critical no matter how close it is to the bound.
pub fn classify(
    kind: ParameterKind,
    value: f64,
    range: &IdealRange,
    direction: Direction,
) -> Severity {
    if kind.is_zero_tolerance() && value > 0.0 {
        return Severity::Critical;
    }

    let width = range.max - range.min;
    let span = if width == 0.0 { ZERO_WIDTH_SPAN } else { width };
    let distance = match direction {
        Direction::Low => range.min - value,
        Direction::High => value - range.max,
    };
    let fraction = distance / span;

    if fraction > CRITICAL_FRACTION {
        Severity::Critical
    } else if fraction > WARNING_FRACTION {
        Severity::Warning
    } else {
        Severity::Attention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::base_range;

    fn range(min: f64, max: f64) -> IdealRange {
        IdealRange {
            min,
            max,
            unit: "ppm".to_string(),
            label: "Test".to_string(),
        }
    }

    #[test]
    fn tiers_follow_distance_fraction() {
        let r = range(0.0, 100.0);
        assert_eq!(classify(ParameterKind::Calcium, 160.0, &r, Direction::High), Severity::Critical);
        assert_eq!(classify(ParameterKind::Calcium, 130.0, &r, Direction::High), Severity::Warning);
        assert_eq!(classify(ParameterKind::Calcium, 150.0, &r, Direction::High), Severity::Warning);
        assert_eq!(classify(ParameterKind::Calcium, 110.0, &r, Direction::High), Severity::Attention);
        assert_eq!(classify(ParameterKind::Calcium, -40.0, &r, Direction::Low), Severity::Warning);
        assert_eq!(classify(ParameterKind::Calcium, -51.0, &r, Direction::Low), Severity::Critical);
    }

    #[test]
    fn calcium_low_bands() {
        let r = base_range(ParameterKind::Calcium); // 380-450, span 70
        assert_eq!(classify(ParameterKind::Calcium, 370.0, &r, Direction::Low), Severity::Attention);
        assert_eq!(classify(ParameterKind::Calcium, 360.0, &r, Direction::Low), Severity::Warning);
        assert_eq!(classify(ParameterKind::Calcium, 300.0, &r, Direction::Low), Severity::Critical);
    }

    #[test]
    fn trace_ammonia_and_nitrite_are_always_critical() {
        for kind in [ParameterKind::Ammonia, ParameterKind::Nitrite] {
            let r = base_range(kind);
            assert_eq!(classify(kind, 0.01, &r, Direction::High), Severity::Critical);
            assert_eq!(classify(kind, 0.25, &r, Direction::High), Severity::Critical);
        }
    }

    #[test]
    fn zero_width_range_does_not_divide_by_zero() {
        let r = range(0.0, 0.0);
        // Without the zero-tolerance rule a 0-0 range uses a span of one.
        assert_eq!(classify(ParameterKind::Nitrate, 0.1, &r, Direction::High), Severity::Attention);
        assert_eq!(classify(ParameterKind::Nitrate, 0.3, &r, Direction::High), Severity::Warning);
        assert_eq!(classify(ParameterKind::Nitrate, 0.6, &r, Direction::High), Severity::Critical);
    }

    #[test]
    fn narrow_ranges_use_their_own_span() {
        let r = base_range(ParameterKind::Salinity); // 1.024-1.026
        assert_eq!(classify(ParameterKind::Salinity, 1.0262, &r, Direction::High), Severity::Attention);
        assert_eq!(classify(ParameterKind::Salinity, 1.030, &r, Direction::High), Severity::Critical);
    }
}
