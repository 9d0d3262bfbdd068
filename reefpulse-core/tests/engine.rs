use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use reefpulse_core::{
    diagnosis::{diagnose, diagnose_raw},
    dosing::{plan, plan_from_input, schedule, MAX_PLAN_DAYS},
    history::{History, HISTORY_CAPACITY},
    import::read_entries,
    reference::{base_range, dosing_methods, EffectiveRanges, DOSABLE_KINDS},
    severity::classify,
    units::{convert, to_standard_units},
};
use reefpulse_schemas::{
    coral::CoralType,
    dosing::{DoseUnit, DosingMethod},
    parameter::{Direction, ParameterKind, Severity},
    reading::{Readings, TestEntry},
    tank::TankProfile,
};

fn no_preset(gallons: f64) -> TankProfile {
    TankProfile::new(gallons, None)
}

fn expected_severity(fraction: f64) -> Severity {
    if fraction > 0.5 {
        Severity::Critical
    } else if fraction > 0.2 {
        Severity::Warning
    } else {
        Severity::Attention
    }
}

#[test]
fn classify_tiers_follow_distance_over_span() {
    let fractions = [0.01, 0.1, 0.2, 0.21, 0.35, 0.5, 0.51, 0.9, 3.0];

    for kind in ParameterKind::ALL.into_iter().filter(|k| !k.is_zero_tolerance()) {
        let range = base_range(kind);
        let span = range.max - range.min;
        for fraction in fractions {
            let low = range.min - fraction * span;
            let high = range.max + fraction * span;

            // Recompute from the value so rounding in the offset does not matter.
            let low_fraction = (range.min - low) / span;
            let high_fraction = (high - range.max) / span;

            assert_eq!(
                classify(kind, low, &range, Direction::Low),
                expected_severity(low_fraction),
                "{kind} low at {fraction}"
            );
            assert_eq!(
                classify(kind, high, &range, Direction::High),
                expected_severity(high_fraction),
                "{kind} high at {fraction}"
            );
        }
    }
}

#[test]
fn any_ammonia_or_nitrite_is_critical() {
    for kind in [ParameterKind::Ammonia, ParameterKind::Nitrite] {
        let range = base_range(kind);
        for value in [0.0001, 0.01, 0.25, 5.0] {
            assert_eq!(classify(kind, value, &range, Direction::High), Severity::Critical);
        }
    }
}

#[test]
fn blank_invalid_or_in_range_readings_produce_no_issue() {
    let raw = [
        ("calcium", ""),
        ("alkalinity", "   "),
        ("magnesium", "lots"),
        ("ph", "8.1"),
        ("temperature", "78"),
        ("salinity", "1.025"),
        ("nitrate", "5"),
        ("kh", "12"),
    ];
    assert!(diagnose_raw(raw, &no_preset(50.0)).is_empty());
}

#[test]
fn issues_are_ordered_most_dangerous_first() {
    let readings = Readings::new()
        .with(ParameterKind::Temperature, 80.5) // attention
        .with(ParameterKind::Calcium, 360.0) // warning
        .with(ParameterKind::Nitrate, 40.0) // critical
        .with(ParameterKind::Ph, 8.45) // attention
        .with(ParameterKind::Nitrite, 0.1); // critical

    let issues = diagnose(&readings, &no_preset(50.0));
    let severities: Vec<_> = issues.iter().map(|i| i.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Critical,
            Severity::Critical,
            Severity::Warning,
            Severity::Attention,
            Severity::Attention,
        ]
    );
    assert!(severities.windows(2).all(|w| w[0] <= w[1]));

    // Ties keep canonical parameter order.
    let kinds: Vec<_> = issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ParameterKind::Nitrate,
            ParameterKind::Nitrite,
            ParameterKind::Calcium,
            ParameterKind::Ph,
            ParameterKind::Temperature,
        ]
    );
}

#[test]
fn sps_preset_tightens_calcium_only_where_named() {
    let readings = Readings::new().with(ParameterKind::Calcium, 410.0);

    let sps = diagnose(&readings, &TankProfile::new(50.0, Some(CoralType::Sps)));
    assert_eq!(sps.len(), 1);
    assert_eq!(sps[0].kind, ParameterKind::Calcium);
    assert_eq!(sps[0].direction, Direction::Low);
    assert_eq!((sps[0].range.min, sps[0].range.max), (420.0, 460.0));

    assert!(diagnose(&readings, &no_preset(50.0)).is_empty());

    let ranges = EffectiveRanges::for_coral(Some(CoralType::Sps));
    for kind in [
        ParameterKind::Ph,
        ParameterKind::Salinity,
        ParameterKind::Temperature,
        ParameterKind::Ammonia,
        ParameterKind::Nitrite,
    ] {
        assert_eq!(ranges.get(kind), &base_range(kind));
    }
}

#[test]
fn diagnosis_is_repeatable() {
    let raw = [("alkalinity", "6.2"), ("phosphate", "0.3"), ("ammonia", "0.5")];
    let profile = TankProfile::new(75.0, Some(CoralType::Lps));
    assert_eq!(diagnose_raw(raw, &profile), diagnose_raw(raw, &profile));
}

#[test]
fn alkalinity_plan_spreads_deficit_over_two_days() {
    let method = DosingMethod {
        name: "Soda Ash".to_string(),
        units_per_dose: 1.0,
        standard_amount_gallons: 40.0,
        max_change_per_day: 1.4,
        grams_per_std_amount: None,
        ml_per_dose: None,
        is_drip_method: false,
        amount_description: "1 tsp".to_string(),
        note: String::new(),
    };

    let plan = plan(ParameterKind::Alkalinity, 8.0, 9.5, &method, 40.0).unwrap();
    assert_relative_eq!(plan.deficit, 1.5);
    assert_eq!(plan.days_needed, 2);
    assert_relative_eq!(plan.per_day_change, 0.75);
    assert_relative_eq!(plan.total_dose, 1.5);
    assert_eq!(plan.unit, "dKH");

    let days: Vec<_> = schedule(&plan).collect();
    assert_eq!(days.len(), 2);
    assert!(days[1].is_last);
    assert!(days.iter().all(|d| d.projected_value <= plan.target));
}

#[test]
fn daily_change_ceiling_holds_or_no_plan_is_made() {
    for kind in DOSABLE_KINDS {
        for method in dosing_methods(kind) {
            for target in [1.0, 50.0, 2_000.0, 1e6, 1e12, f64::MAX] {
                match plan(kind, 0.0, target, &method, 50.0) {
                    Some(plan) => {
                        assert!(plan.days_needed <= MAX_PLAN_DAYS);
                        assert!(plan.per_day_change <= method.max_change_per_day);
                    }
                    None => assert!(target / method.max_change_per_day > f64::from(MAX_PLAN_DAYS)),
                }
            }
        }
    }
}

#[test]
fn lowering_a_parameter_is_not_planned() {
    for method in dosing_methods(ParameterKind::Calcium) {
        assert!(plan(ParameterKind::Calcium, 450.0, 400.0, &method, 50.0).is_none());
    }
    assert!(plan_from_input(ParameterKind::Calcium, "450", "400", 0, 50.0).is_none());
    assert!(plan_from_input(ParameterKind::Calcium, "", "400", 0, 50.0).is_none());
}

#[test]
fn every_catalogued_plan_takes_at_least_one_day() {
    for kind in DOSABLE_KINDS {
        let range = base_range(kind);
        for method in dosing_methods(kind) {
            let plan = plan(kind, range.min, range.min + 0.001, &method, 50.0).unwrap();
            assert!(plan.days_needed >= 1);
            assert!(plan.per_day_change <= method.max_change_per_day);
        }
    }
}

#[test]
fn ml_conversion_inverts() {
    for kind in DOSABLE_KINDS {
        for method in dosing_methods(kind) {
            for dose in [0.004, 0.37, 2.5, 41.0] {
                let ml = convert(dose, Some(&method), Some(DoseUnit::Ml));
                assert_eq!(ml.label, "ml");
                let back = to_standard_units(ml.value, Some(&method), Some(DoseUnit::Ml));
                assert_relative_eq!(back, dose, max_relative = 1e-12);
            }
        }
    }
}

#[test]
fn history_keeps_the_hundred_most_recent_entries() {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
    let profile = TankProfile::default();
    let mut history = History::new();

    for n in 0..=100 {
        let entry = TestEntry::new(
            start + Duration::hours(n),
            Readings::new().with(ParameterKind::Alkalinity, 8.0),
            &profile,
        );
        history.record(entry);
        assert!(history.len() <= HISTORY_CAPACITY);
    }

    assert_eq!(history.len(), HISTORY_CAPACITY);
    let expected: Vec<_> = (1..=100).rev().map(|n| start + Duration::hours(n)).collect();
    let kept: Vec<_> = history.entries().iter().map(|e| e.date).collect();
    assert_eq!(kept, expected);
}

#[test]
fn imported_rows_are_diagnosed_like_manual_entries() {
    let profile = TankProfile::new(50.0, Some(CoralType::Mixed));
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let csv = "date,alkalinity,calcium\n2026-02-20 09:00,6.5,395\n";

    let imported = read_entries("import.csv", csv.as_bytes(), &profile, now).unwrap();
    let manual = Readings::new()
        .with(ParameterKind::Alkalinity, 6.5)
        .with(ParameterKind::Calcium, 395.0);

    assert_eq!(
        diagnose(&imported[0].readings, &imported[0].profile()),
        diagnose(&manual, &profile)
    );

    let mut history = History::new();
    history.merge(imported);
    assert_eq!(history.len(), 1);
}
