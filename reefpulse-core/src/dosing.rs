//! Multi-day dosing plans that respect a method's safe daily change.

use crate::reference::{base_range, dosing_method};
use log::debug;
use reefpulse_schemas::{
    dosing::{DosingMethod, DosingPlan, ScheduleDay},
    parameter::ParameterKind,
    reading::parse_reading_value,
    tank::usable_gallons,
};

/// Longest plan the calculator produces. Larger corrections are not dosing problems.
pub const MAX_PLAN_DAYS: u32 = 365;

/// Plans how to raise `kind` from `current` to `target` with `method` in a tank of
/// `tank_gallons`.
///
/// Returns `None` when either value is not a finite number, when `target` is not above
/// `current` (lowering a parameter is handled with water changes, not by dosing), or when
/// the change would take more than [`MAX_PLAN_DAYS`]. An unusable tank volume is taken as
/// 50 gallons.
///
/// The method's reference dose scales linearly with the deficit and the tank volume. The
/// deficit is spread evenly over the minimum number of days that keeps each day's change
/// within `method.max_change_per_day`.
pub fn plan(
    kind: ParameterKind,
    current: f64,
    target: f64,
    method: &DosingMethod,
    tank_gallons: f64,
) -> Option<DosingPlan> {
    if !current.is_finite() || !target.is_finite() {
        debug!("Dosing request for {kind} has a non-numeric current or target value");
        return None;
    }
    if target <= current {
        debug!("Dosing request for {kind}: target {target} is not above current {current}");
        return None;
    }
    if method.units_per_dose <= 0.0
        || method.standard_amount_gallons <= 0.0
        || method.max_change_per_day <= 0.0
    {
        debug!("Dosing method '{}' has non-positive reference values", method.name);
        return None;
    }

    let deficit = target - current;
    let days = (deficit / method.max_change_per_day).ceil().max(1.0);
    if days > f64::from(MAX_PLAN_DAYS) {
        debug!(
            "Dosing request for {kind}: raising by {deficit} would take more than {MAX_PLAN_DAYS} days"
        );
        return None;
    }
    let days_needed = days as u32;

    let volume_factor = usable_gallons(tank_gallons) / method.standard_amount_gallons;
    let total_dose = (deficit / method.units_per_dose) * volume_factor;
    let per_day_change = deficit / f64::from(days_needed);
    let doses_per_day = (per_day_change / method.units_per_dose) * volume_factor;

    Some(DosingPlan {
        kind,
        current,
        target,
        deficit,
        method: method.clone(),
        total_dose,
        days_needed,
        per_day_change,
        doses_per_day,
        unit: base_range(kind).unit,
    })
}

/// Plans from raw calculator input: text values, a method index into the reference
/// catalogue (out-of-range indices select the first method) and the tank volume.
pub fn plan_from_input(
    kind: ParameterKind,
    current: &str,
    target: &str,
    method_index: usize,
    tank_gallons: f64,
) -> Option<DosingPlan> {
    let current = parse_reading_value(current)?;
    let target = parse_reading_value(target)?;
    let method = dosing_method(kind, method_index)?;
    plan(kind, current, target, &method, tank_gallons)
}

/// The day-by-day view of a plan, produced lazily. Each day receives the same dose; the
/// projected value is clamped so it never passes the target.
pub fn schedule(plan: &DosingPlan) -> impl Iterator<Item = ScheduleDay> + '_ {
    (1..=plan.days_needed).map(move |day| ScheduleDay {
        day,
        dose: plan.doses_per_day,
        projected_value: (plan.current + plan.per_day_change * f64::from(day)).min(plan.target),
        is_last: day == plan.days_needed,
    })
}
