//! Conversion of doses into display units, and the display format for amounts.

use reefpulse_schemas::dosing::{ConvertedDose, DoseUnit, DosingMethod};

pub const ML_PER_TSP: f64 = 4.93;
pub const ML_PER_TBSP: f64 = 14.79;
pub const TSP_PER_TBSP: f64 = 3.0;

/// Approximate density of liquid supplements in g/ml. A heuristic, not a measured value.
pub const LIQUID_GRAMS_PER_ML: f64 = 1.05;

/// Grams per teaspoon assumed for powders without a measured figure. A heuristic, not a
/// measured value.
pub const FALLBACK_GRAMS_PER_TSP: f64 = 4.0;

/// Converts a dose in `method`'s standard units into `unit`.
///
/// Liquid methods (with `ml_per_dose`) go through millilitres first; everything else is
/// measured in teaspoons. A missing method or unit passes the value through with the
/// standard unit's label.
pub fn convert(dose: f64, method: Option<&DosingMethod>, unit: Option<DoseUnit>) -> ConvertedDose {
    let Some(method) = method else {
        return converted(dose, DoseUnit::Tsp);
    };

    if let Some(ml_per_dose) = method.ml_per_dose {
        let ml = dose * ml_per_dose;
        return match unit {
            Some(DoseUnit::Tsp) => converted(ml / ML_PER_TSP, DoseUnit::Tsp),
            Some(DoseUnit::Tbsp) => converted(ml / ML_PER_TBSP, DoseUnit::Tbsp),
            Some(DoseUnit::G) => converted(ml * LIQUID_GRAMS_PER_ML, DoseUnit::G),
            Some(DoseUnit::Ml) | None => converted(ml, DoseUnit::Ml),
        };
    }

    match unit {
        Some(DoseUnit::Tbsp) => converted(dose / TSP_PER_TBSP, DoseUnit::Tbsp),
        Some(DoseUnit::Ml) => converted(dose * ML_PER_TSP, DoseUnit::Ml),
        Some(DoseUnit::G) => converted(dose * grams_per_tsp(method), DoseUnit::G),
        Some(DoseUnit::Tsp) | None => converted(dose, DoseUnit::Tsp),
    }
}

/// The inverse of [`convert`]: recovers the standard-unit dose from a displayed amount.
pub fn to_standard_units(value: f64, method: Option<&DosingMethod>, unit: Option<DoseUnit>) -> f64 {
    let Some(method) = method else {
        return value;
    };

    if let Some(ml_per_dose) = method.ml_per_dose {
        let ml = match unit {
            Some(DoseUnit::Tsp) => value * ML_PER_TSP,
            Some(DoseUnit::Tbsp) => value * ML_PER_TBSP,
            Some(DoseUnit::G) => value / LIQUID_GRAMS_PER_ML,
            Some(DoseUnit::Ml) | None => value,
        };
        return ml / ml_per_dose;
    }

    match unit {
        Some(DoseUnit::Tbsp) => value * TSP_PER_TBSP,
        Some(DoseUnit::Ml) => value / ML_PER_TSP,
        Some(DoseUnit::G) => value / grams_per_tsp(method),
        Some(DoseUnit::Tsp) | None => value,
    }
}

fn grams_per_tsp(method: &DosingMethod) -> f64 {
    method.grams_per_std_amount.unwrap_or(FALLBACK_GRAMS_PER_TSP)
}

fn converted(value: f64, unit: DoseUnit) -> ConvertedDose {
    ConvertedDose {
        value,
        label: unit.label().to_string(),
    }
}

/// Formats an amount with precision that shrinks as the value grows:
/// 3 decimals below 0.01, 2 below 1, 1 below 10, whole numbers otherwise.
pub fn format_amount(value: f64, label: &str) -> String {
    if value < 0.01 {
        format!("{value:.3} {label}")
    } else if value < 1.0 {
        format!("{value:.2} {label}")
    } else if value < 10.0 {
        format!("{value:.1} {label}")
    } else {
        format!("{} {label}", value.round() as i64)
    }
}

/// Converts and formats a standard-unit dose for display.
pub fn format_dose(dose: f64, method: Option<&DosingMethod>, unit: Option<DoseUnit>) -> String {
    let c = convert(dose, method, unit);
    format_amount(c.value, &c.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::dosing_methods;
    use approx::assert_relative_eq;
    use reefpulse_schemas::parameter::ParameterKind;

    fn soda_ash() -> DosingMethod {
        dosing_methods(ParameterKind::Alkalinity).remove(0)
    }

    fn magnesion() -> DosingMethod {
        dosing_methods(ParameterKind::Magnesium).remove(1)
    }

    #[test]
    fn powder_conversions() {
        let m = soda_ash();
        assert_relative_eq!(convert(3.0, Some(&m), Some(DoseUnit::Tbsp)).value, 1.0);
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::Ml)).value, 9.86);
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::G)).value, 7.6);
        assert_eq!(convert(2.0, Some(&m), Some(DoseUnit::G)).label, "g");
    }

    #[test]
    fn powder_without_known_weight_uses_fallback_grams() {
        let mut m = soda_ash();
        m.grams_per_std_amount = None;
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::G)).value, 8.0);
    }

    #[test]
    fn liquid_conversions_go_through_millilitres() {
        let m = magnesion();
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::Ml)).value, 10.0);
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::Tsp)).value, 10.0 / 4.93);
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::Tbsp)).value, 10.0 / 14.79);
        assert_relative_eq!(convert(2.0, Some(&m), Some(DoseUnit::G)).value, 10.5);
    }

    #[test]
    fn missing_method_or_unit_passes_through() {
        let c = convert(1.25, None, Some(DoseUnit::G));
        assert_eq!(c, ConvertedDose { value: 1.25, label: "tsp".to_string() });

        let c = convert(1.25, Some(&soda_ash()), None);
        assert_eq!(c, ConvertedDose { value: 1.25, label: "tsp".to_string() });
    }

    #[test]
    fn millilitre_round_trip_recovers_dose() {
        for method in [soda_ash(), magnesion()] {
            for dose in [0.004, 0.37, 2.5, 41.0] {
                let ml = convert(dose, Some(&method), Some(DoseUnit::Ml)).value;
                let back = to_standard_units(ml, Some(&method), Some(DoseUnit::Ml));
                assert_relative_eq!(back, dose, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn display_precision_depends_on_magnitude() {
        assert_eq!(format_amount(0.0042, "tsp"), "0.004 tsp");
        assert_eq!(format_amount(0.456, "tsp"), "0.46 tsp");
        assert_eq!(format_amount(3.14, "g"), "3.1 g");
        assert_eq!(format_amount(12.6, "ml"), "13 ml");
        assert_eq!(format_dose(3.0, Some(&soda_ash()), Some(DoseUnit::Tbsp)), "1.0 tbsp");
    }
}
