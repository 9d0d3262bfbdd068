//! Turns a set of readings into a prioritized list of issues.

use crate::{reference::EffectiveRanges, severity::classify};
use log::debug;
use reefpulse_schemas::{
    diagnosis::{Issue, ReadingStatus},
    parameter::{Direction, IdealRange, ParameterKind, Severity},
    reading::{parse_reading_value, Readings},
    tank::{usable_gallons, TankProfile},
};

/// Finds every reading outside its effective range, most dangerous first.
///
/// Ranges come from the base table with the profile's coral preset overlaid. Issues of
/// equal severity keep canonical parameter order.
pub fn diagnose(readings: &Readings, profile: &TankProfile) -> Vec<Issue> {
    let ranges = EffectiveRanges::for_coral(profile.coral_type);

    let mut issues: Vec<Issue> = readings
        .iter()
        .filter_map(|(kind, value)| {
            let range = ranges.get(kind);
            let direction = out_of_range_direction(value, range)?;
            Some(Issue {
                kind,
                direction,
                value,
                range: range.clone(),
                severity: classify(kind, value, range, direction),
                quick_fix: quick_fix_recommendation(kind, value, range, profile.tank_gallons),
            })
        })
        .collect();

    // Stable, so ties keep encounter order.
    issues.sort_by_key(|issue| issue.severity);
    issues
}

/// Like [`diagnose`], for untyped form or file input. Unknown keys and blank or
/// unparsable values are skipped.
pub fn diagnose_raw<I, K, V>(raw: I, profile: &TankProfile) -> Vec<Issue>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut readings = Readings::new();
    let mut skipped = 0usize;
    for (key, value) in raw {
        match (
            ParameterKind::from_key(key.as_ref()),
            parse_reading_value(value.as_ref()),
        ) {
            (Some(kind), Some(value)) => readings.insert(kind, value),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("Skipped {skipped} blank, unknown or unparsable field(s)");
    }
    diagnose(&readings, profile)
}

fn out_of_range_direction(value: f64, range: &IdealRange) -> Option<Direction> {
    if value < range.min {
        Some(Direction::Low)
    } else if value > range.max {
        Some(Direction::High)
    } else {
        None
    }
}

/// Dashboard status for a single reading: in range, or critical vs. anything milder.
pub fn reading_status(kind: ParameterKind, value: f64, range: &IdealRange) -> ReadingStatus {
    match out_of_range_direction(value, range) {
        None => ReadingStatus::Ok,
        Some(direction) => match classify(kind, value, range, direction) {
            Severity::Critical => ReadingStatus::Critical,
            Severity::Warning | Severity::Attention => ReadingStatus::Warning,
        },
    }
}

/// Short, kind-specific advice for an out-of-range reading, or `None` when there is no
/// quick fix for it. Advisory text only.
pub fn quick_fix_recommendation(
    kind: ParameterKind,
    value: f64,
    range: &IdealRange,
    tank_gallons: f64,
) -> Option<String> {
    let gallons = usable_gallons(tank_gallons);

    match kind {
        ParameterKind::Calcium if value < range.min => {
            let teaspoons = ((range.min - value) / 19.0) * (gallons / 50.0);
            Some(format!(
                "Add ~{teaspoons:.1} tsp calcium chloride to raise from {value} to ~{} ppm. Max 20 ppm/day.",
                range.min
            ))
        }
        ParameterKind::Alkalinity if value < range.min => {
            let teaspoons = (range.min - value) * (gallons / 40.0);
            Some(format!(
                "Add ~{teaspoons:.1} tsp soda ash to raise from {value} to ~{} dKH. Max 1.4 dKH/day.",
                range.min
            ))
        }
        ParameterKind::Alkalinity if value > range.max => Some(format!(
            "Perform a {}% water change. Retest after 24 hours.",
            alkalinity_water_change_percent(value, range.max)
        )),
        ParameterKind::Magnesium if value < range.min => {
            let batches = (range.min - value) / 100.0 * (gallons / 50.0);
            Some(format!(
                "Add ~{:.1} tsp mag chloride + {:.1} tsp mag sulfate. Max 100 ppm/day.",
                batches * 6.0,
                batches * 4.0
            ))
        }
        ParameterKind::Nitrate if value > range.max => Some(format!(
            "Perform a {}% water change.",
            nitrate_water_change_percent(value, range.max)
        )),
        ParameterKind::Phosphate if value > range.max => {
            Some("Run GFO in a reactor or media bag. Max 0.03 ppm reduction/day.".to_string())
        }
        ParameterKind::Ammonia if value > 0.0 => {
            Some("URGENT: Dose Seachem Prime (5ml/50gal) + 25-50% water change NOW.".to_string())
        }
        ParameterKind::Nitrite if value > 0.0 => {
            Some("URGENT: Dose Seachem Prime + 25% water change. Add bottled bacteria.".to_string())
        }
        _ => None,
    }
}

/// Heuristic water change for high alkalinity: relative excess plus 10 points, capped at
/// 30%. Not derived from a dilution model.
pub fn alkalinity_water_change_percent(value: f64, max: f64) -> i64 {
    ((value - max) / max * 100.0 + 10.0).round().min(30.0) as i64
}

/// Heuristic water change for high nitrate: share of the reading above the bound plus 10
/// points, capped at 50%.
pub fn nitrate_water_change_percent(value: f64, max: f64) -> i64 {
    ((value - max) / value * 100.0 + 10.0).round().min(50.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::base_range;
    use reefpulse_schemas::coral::CoralType;

    fn profile(coral: Option<CoralType>) -> TankProfile {
        TankProfile::new(50.0, coral)
    }

    #[test]
    fn in_range_and_blank_readings_produce_no_issues() {
        let issues = diagnose_raw(
            [("calcium", "420"), ("alkalinity", ""), ("ph", "n/a"), ("salinity", "1.025")],
            &profile(None),
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn coral_preset_shifts_calcium_range() {
        let readings = Readings::new().with(ParameterKind::Calcium, 410.0);

        let sps = diagnose(&readings, &profile(Some(CoralType::Sps)));
        assert_eq!(sps.len(), 1);
        assert_eq!(sps[0].kind, ParameterKind::Calcium);
        assert_eq!(sps[0].direction, Direction::Low);
        assert_eq!(sps[0].range.min, 420.0);

        assert!(diagnose(&readings, &profile(None)).is_empty());
    }

    #[test]
    fn issues_are_sorted_by_severity_then_parameter_order() {
        let readings = Readings::new()
            .with(ParameterKind::Nitrate, 11.0) // attention
            .with(ParameterKind::Alkalinity, 6.5) // warning: 1.0 / 3.5
            .with(ParameterKind::Calcium, 440.0) // in range
            .with(ParameterKind::Phosphate, 0.2) // critical: 0.1 / 0.1
            .with(ParameterKind::Ammonia, 0.25); // critical

        let issues = diagnose(&readings, &profile(None));
        let order: Vec<(ParameterKind, Severity)> =
            issues.iter().map(|i| (i.kind, i.severity)).collect();
        assert_eq!(
            order,
            vec![
                (ParameterKind::Phosphate, Severity::Critical),
                (ParameterKind::Ammonia, Severity::Critical),
                (ParameterKind::Alkalinity, Severity::Warning),
                (ParameterKind::Nitrate, Severity::Attention),
            ]
        );
    }

    #[test]
    fn diagnosis_is_deterministic() {
        let readings = Readings::from_raw([
            ("nitrate", "25"),
            ("temperature", "83"),
            ("magnesium", "1100"),
            ("nitrite", "0.5"),
        ]);
        let p = profile(Some(CoralType::Lps));
        assert_eq!(diagnose(&readings, &p), diagnose(&readings, &p));
    }

    #[test]
    fn issues_carry_quick_fixes() {
        let readings = Readings::new().with(ParameterKind::Calcium, 380.0);
        let issues = diagnose(&readings, &TankProfile::new(100.0, Some(CoralType::Sps)));
        assert_eq!(
            issues[0].quick_fix.as_deref(),
            Some("Add ~4.2 tsp calcium chloride to raise from 380 to ~420 ppm. Max 20 ppm/day.")
        );
    }

    #[test]
    fn alkalinity_water_change_is_capped() {
        let range = base_range(ParameterKind::Alkalinity); // max 11
        assert_eq!(alkalinity_water_change_percent(12.1, range.max), 20);
        assert_eq!(alkalinity_water_change_percent(20.0, range.max), 30);
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Alkalinity, 12.1, &range, 50.0).as_deref(),
            Some("Perform a 20% water change. Retest after 24 hours.")
        );
    }

    #[test]
    fn quick_fix_texts() {
        let mag = base_range(ParameterKind::Magnesium);
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Magnesium, 1150.0, &mag, 50.0).as_deref(),
            Some("Add ~6.0 tsp mag chloride + 4.0 tsp mag sulfate. Max 100 ppm/day.")
        );

        let alk = base_range(ParameterKind::Alkalinity);
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Alkalinity, 6.5, &alk, 80.0).as_deref(),
            Some("Add ~2.0 tsp soda ash to raise from 6.5 to ~7.5 dKH. Max 1.4 dKH/day.")
        );

        let nitrate = base_range(ParameterKind::Nitrate);
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Nitrate, 20.0, &nitrate, 50.0).as_deref(),
            Some("Perform a 50% water change.")
        );

        let temp = base_range(ParameterKind::Temperature);
        assert_eq!(quick_fix_recommendation(ParameterKind::Temperature, 84.0, &temp, 50.0), None);
    }

    #[test]
    fn unusable_tank_volume_falls_back_to_fifty_gallons() {
        let calcium = base_range(ParameterKind::Calcium);
        let with_default = quick_fix_recommendation(ParameterKind::Calcium, 342.0, &calcium, 50.0);
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Calcium, 342.0, &calcium, 0.0),
            with_default
        );
        assert_eq!(
            quick_fix_recommendation(ParameterKind::Calcium, 342.0, &calcium, f64::NAN),
            with_default
        );
    }

    #[test]
    fn reading_status_collapses_mild_tiers() {
        let calcium = base_range(ParameterKind::Calcium);
        assert_eq!(reading_status(ParameterKind::Calcium, 400.0, &calcium), ReadingStatus::Ok);
        assert_eq!(reading_status(ParameterKind::Calcium, 375.0, &calcium), ReadingStatus::Warning);
        assert_eq!(reading_status(ParameterKind::Calcium, 300.0, &calcium), ReadingStatus::Critical);
    }
}
