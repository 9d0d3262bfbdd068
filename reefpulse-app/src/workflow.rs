use crate::{config::Settings, store::Store};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use reefpulse_core::{
    diagnosis::{diagnose, reading_status},
    dosing::{plan_from_input, schedule, MAX_PLAN_DAYS},
    export::{write_template, HistoryExporter},
    history::History,
    import::{parse_test_date, read_entries_from_path},
    reference::{
        base_range, coral_preset, dosing_methods, products, remedy_steps, EffectiveRanges,
        DOSABLE_KINDS,
    },
    units::format_dose,
};
use reefpulse_schemas::{
    coral::CoralType,
    diagnosis::{Issue, ReadingStatus},
    dosing::DoseUnit,
    file_formats::TankState,
    parameter::{IdealRange, ParameterKind},
    reading::{Readings, TestEntry},
    tank::TankProfile,
};
use std::{fs, path::Path};

/// Days of a dosing schedule printed before the rest is summarized.
const SCHEDULE_PREVIEW_DAYS: usize = 7;

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The loaded profile and history for one command invocation.
pub struct Session {
    settings: Settings,
    store: Store,
    profile: TankProfile,
    history: History,
}

impl Session {
    /// Loads the saved state, filling anything missing from the settings.
    pub fn open(settings: Settings) -> Self {
        let store = Store::new(settings.data_file.clone());
        let state = store.load();
        let defaults = settings.default_profile();

        let profile = TankProfile::new(
            state.tank_gallons.unwrap_or(defaults.tank_gallons),
            state.coral_type.or(defaults.coral_type),
        );
        let history =
            History::from_entries(state.history.unwrap_or_default(), settings.history_capacity);

        Self {
            settings,
            store,
            profile,
            history,
        }
    }

    fn persist(&self) {
        self.store.save(&TankState {
            tank_gallons: Some(self.profile.tank_gallons),
            coral_type: self.profile.coral_type,
            history: Some(self.history.entries().to_vec()),
        });
    }

    pub fn update_profile(&mut self, gallons: Option<f64>, coral: Option<&str>) -> Result<()> {
        if let Some(gallons) = gallons {
            if !gallons.is_finite() || gallons <= 0.0 {
                bail!("Tank volume must be a positive number of gallons, got {gallons}");
            }
            self.profile.tank_gallons = gallons;
        }
        if let Some(raw) = coral {
            let coral = CoralType::from_key(raw).with_context(|| {
                format!("Unknown coral type '{raw}'; expected one of: sps, lps, mixed, softie")
            })?;
            self.profile.coral_type = Some(coral);
        }
        if gallons.is_some() || coral.is_some() {
            self.persist();
            info!("Tank profile saved to '{}'", self.store.path().display());
        }

        println!("\n--- [Tank Profile] ---");
        println!("Volume:     {} gallons", self.profile.tank_gallons);
        println!("Coral type: {}", coral_label(self.profile.coral_type));
        println!("\nIdeal ranges:");
        for (_, range) in EffectiveRanges::for_coral(self.profile.coral_type).iter() {
            println!("  {:<24} {}", range.label, format_range(range));
        }
        Ok(())
    }

    pub fn record_test(&mut self, pairs: &[(String, String)], date: Option<&str>) -> Result<()> {
        let date = match date {
            Some(raw) => parse_test_date(raw)
                .with_context(|| format!("Unrecognized test date '{raw}'"))?,
            None => Utc::now(),
        };

        let readings = Readings::from_raw(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if readings.is_empty() {
            bail!("No usable readings given. Use parameter=value pairs, e.g. alkalinity=8.2");
        }
        let ignored = pairs.len().saturating_sub(readings.len());
        if ignored > 0 {
            warn!("Ignored {ignored} blank, unknown or repeated reading(s)");
        }

        let issues = diagnose(&readings, &self.profile);
        self.history.record(TestEntry::new(date, readings, &self.profile));
        self.persist();

        print_diagnosis_report(&issues, &self.profile);
        Ok(())
    }

    pub fn print_status(&self, now: DateTime<Utc>) {
        println!("\n--- [Tank Status] ---");
        println!(
            "Tank: {} gallons, {}",
            self.profile.tank_gallons,
            coral_label(self.profile.coral_type)
        );

        let Some(latest) = self.history.latest() else {
            println!("No tests recorded yet. Record one with `reefpulse test`.");
            return;
        };

        let days = self.history.days_since_last_test(now).unwrap_or_default();
        println!(
            "Last test:  {} ({} day(s) ago)",
            latest.date.format(DATE_DISPLAY_FORMAT),
            days
        );
        if self.history.is_overdue(now, self.settings.overdue_after_days) {
            println!(
                "Testing is overdue: test at least every {} days to catch swings early.",
                self.settings.overdue_after_days
            );
        }

        let ranges = EffectiveRanges::for_coral(self.profile.coral_type);
        println!();
        for (kind, value) in latest.readings.iter() {
            let range = ranges.get(kind);
            println!(
                "  {:<24} {:>12}  {:<8}  ideal {}",
                range.label,
                format_reading(value, &range.unit),
                status_label(reading_status(kind, value, range)),
                format_range(range)
            );
        }
    }

    pub fn print_dosing_plan(
        &self,
        parameter: &str,
        current: &str,
        target: &str,
        method_number: usize,
        unit: Option<&str>,
    ) -> Result<()> {
        let kind = ParameterKind::from_key(parameter)
            .filter(|kind| DOSABLE_KINDS.contains(kind))
            .with_context(|| {
                format!("'{parameter}' cannot be dosed; choose calcium, alkalinity or magnesium")
            })?;
        let unit = match unit {
            Some(raw) => DoseUnit::from_key(raw)
                .with_context(|| format!("Unknown dose unit '{raw}'; expected tsp, tbsp, ml or g"))?,
            None => self.settings.dose_unit,
        };
        let range = base_range(kind);

        println!("\n--- [Dosing Calculator] {} ---", range.label);
        println!("Tank: {} gallons. Doses in {}.", self.profile.effective_gallons(), unit.full_label());
        println!("\nMethods:");
        for (i, method) in dosing_methods(kind).iter().enumerate() {
            println!(
                "  {}. {}: {} per {} gal raises {} {}",
                i + 1,
                method.name,
                method.amount_description,
                method.standard_amount_gallons,
                method.units_per_dose,
                range.unit
            );
        }

        let Some(plan) = plan_from_input(
            kind,
            current,
            target,
            method_number.saturating_sub(1),
            self.profile.effective_gallons(),
        ) else {
            println!(
                "\nEnter a current value and a higher target reachable within {MAX_PLAN_DAYS} days. \
                 To lower {}, use water changes instead.",
                range.label
            );
            return Ok(());
        };

        let method = &plan.method;
        println!("\nUsing {}", method.name);
        println!(
            "  Raise from {} to {} {} (deficit {})",
            plan.current,
            plan.target,
            plan.unit,
            format_projection(kind, plan.deficit)
        );
        println!("  Total dose:   {}", format_dose(plan.total_dose, Some(method), Some(unit)));
        println!("  Days needed:  {}", plan.days_needed);
        println!(
            "  Per day:      {} (about {} {}/day)",
            format_dose(plan.doses_per_day, Some(method), Some(unit)),
            format_projection(kind, plan.per_day_change),
            plan.unit
        );
        if method.is_drip_method {
            println!("  Dosed as a slow drip through the top-off; adjust the drip rate to match.");
        }
        println!("  Note: {}", method.note);

        println!("\nSchedule:");
        for day in schedule(&plan).take(SCHEDULE_PREVIEW_DAYS) {
            println!(
                "  Day {}: {} {} -> ~{} {}{}",
                day.day,
                format_dose(day.dose, Some(method), Some(unit)),
                method.short_name(),
                format_projection(kind, day.projected_value),
                plan.unit,
                if day.is_last { " (retest)" } else { "" }
            );
        }
        let remaining = (plan.days_needed as usize).saturating_sub(SCHEDULE_PREVIEW_DAYS);
        if remaining > 0 {
            println!("  ...and {remaining} more day(s)");
        }
        Ok(())
    }

    pub fn print_history(&self, limit: usize) {
        let shown = limit.min(self.history.len());
        println!(
            "\n--- [Test History] {} of {} test(s) ---",
            shown,
            self.history.len()
        );
        for entry in self.history.entries().iter().take(limit) {
            let issues = diagnose(&entry.readings, &entry.profile());
            let readings: Vec<String> = entry
                .readings
                .iter()
                .map(|(kind, value)| format!("{kind}={value}"))
                .collect();
            println!(
                "{}  {}  [{} issue(s)]",
                entry.date.format(DATE_DISPLAY_FORMAT),
                readings.join(", "),
                issues.len()
            );
        }
    }

    pub fn print_trend(&self, parameter: &str) -> Result<()> {
        let Some(kind) = ParameterKind::from_key(parameter) else {
            let recorded: Vec<&str> = self
                .history
                .recorded_kinds()
                .iter()
                .map(|kind| kind.as_str())
                .collect();
            bail!(
                "Unknown parameter '{parameter}'. Recorded parameters: {}",
                recorded.join(", ")
            );
        };

        let ranges = EffectiveRanges::for_coral(self.profile.coral_type);
        let range = ranges.get(kind);
        println!("\n--- [Trend] {} (ideal {}) ---", range.label, format_range(range));

        let series = self.history.parameter_series(kind);
        if series.is_empty() {
            println!("No {} readings recorded yet.", range.label);
            return Ok(());
        }

        let mut previous: Option<f64> = None;
        for point in &series {
            let change = previous
                .map(|p| format!("{:+.2}", point.value - p))
                .unwrap_or_default();
            println!(
                "  {}  {:>12}  {:<8}  {}",
                point.date.format(DATE_DISPLAY_FORMAT),
                format_reading(point.value, &range.unit),
                status_label(reading_status(kind, point.value, range)),
                change
            );
            previous = Some(point.value);
        }
        Ok(())
    }

    pub fn clear_history(&mut self) {
        let removed = self.history.len();
        self.history.clear();
        self.persist();
        println!("Removed {removed} test(s) from the history.");
    }

    pub fn import_csv(&mut self, path: &Path) -> Result<()> {
        let entries = read_entries_from_path(path, &self.profile, Utc::now())
            .with_context(|| format!("Failed to import tests from {}", path.display()))?;

        println!("\n--- [Import] {} ---", path.display());
        for entry in &entries {
            let issues = diagnose(&entry.readings, &entry.profile());
            println!(
                "  {}  {} reading(s), {} issue(s)",
                entry.date.format(DATE_DISPLAY_FORMAT),
                entry.readings.len(),
                issues.len()
            );
        }

        let imported = entries.len();
        self.history.merge(entries);
        self.persist();
        info!("Imported {imported} test(s) from '{}'", path.display());
        println!(
            "Imported {imported} test(s). History holds {} of at most {}.",
            self.history.len(),
            self.history.capacity()
        );
        Ok(())
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut exporter = HistoryExporter::create(path)?;
        exporter.write_header()?;
        for entry in self.history.entries() {
            exporter.write_entry(entry)?;
        }
        exporter.into_inner()?;
        println!("Exported {} test(s) to '{}'", self.history.len(), path.display());
        Ok(())
    }
}

pub fn write_template_file(path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_template(&path.display().to_string(), file)?;
    println!(
        "Wrote CSV template to '{}'. Add one row per test, then run `reefpulse import`.",
        path.display()
    );
    Ok(())
}

pub fn print_presets() {
    println!("\n--- [Coral Presets] ---");
    for coral in CoralType::ALL {
        let preset = coral_preset(coral);
        println!("\n{} ({}): {}", preset.label, coral, preset.description);
        for (kind, adjustment) in &preset.adjustments {
            let base = base_range(*kind);
            let adjusted = base.adjusted(adjustment);
            println!(
                "  {:<24} {} (base {})",
                base.label,
                format_range(&adjusted),
                format_range(&base)
            );
        }
    }
}

fn print_diagnosis_report(issues: &[Issue], profile: &TankProfile) {
    println!(
        "\n--- [Diagnosis] {} gallons, {} ---",
        profile.tank_gallons,
        coral_label(profile.coral_type)
    );
    if issues.is_empty() {
        println!("All parameters are within the ideal range.");
        return;
    }

    for issue in issues {
        println!(
            "\n[{}] {} is {}: {} (ideal {})",
            issue.severity.as_str().to_uppercase(),
            issue.range.label,
            issue.direction,
            format_reading(issue.value, &issue.range.unit),
            format_range(&issue.range)
        );
        if let Some(fix) = &issue.quick_fix {
            println!("  Quick fix: {fix}");
        }

        let steps = remedy_steps(issue.kind, issue.direction);
        if !steps.is_empty() {
            println!("  Steps:");
            for (i, step) in steps.iter().enumerate() {
                println!("    {}. {}: {}", i + 1, step.step, step.detail);
            }
        }

        let products = products(issue.kind, issue.direction);
        if !products.is_empty() {
            println!("  Suggested:");
            for product in products {
                match product.url {
                    Some(url) => println!("    - {}: {} <{url}>", product.name, product.note),
                    None => println!("    - {}: {}", product.name, product.note),
                }
            }
        }
    }
}

fn coral_label(coral: Option<CoralType>) -> String {
    coral
        .map(|c| coral_preset(c).label)
        .unwrap_or_else(|| "no coral preset".to_string())
}

fn status_label(status: ReadingStatus) -> &'static str {
    match status {
        ReadingStatus::Ok => "OK",
        ReadingStatus::Warning => "WARNING",
        ReadingStatus::Critical => "CRITICAL",
    }
}

fn format_reading(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    }
}

fn format_range(range: &IdealRange) -> String {
    let bounds = format!("{}-{}", range.min, range.max);
    if range.unit.is_empty() {
        bounds
    } else {
        format!("{bounds} {}", range.unit)
    }
}

/// Alkalinity moves in tenths of a dKH; the other dosable parameters in whole ppm.
fn format_projection(kind: ParameterKind, value: f64) -> String {
    match kind {
        ParameterKind::Alkalinity => format!("{value:.1}"),
        _ => format!("{value:.0}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_use_parameter_precision() {
        assert_eq!(format_projection(ParameterKind::Alkalinity, 8.76), "8.8");
        assert_eq!(format_projection(ParameterKind::Calcium, 426.6), "427");
        assert_eq!(format_projection(ParameterKind::Magnesium, 1283.3), "1283");
    }

    #[test]
    fn ranges_omit_empty_units() {
        assert_eq!(format_range(&base_range(ParameterKind::Ph)), "7.8-8.4");
        assert_eq!(format_range(&base_range(ParameterKind::Calcium)), "380-450 ppm");
        assert_eq!(format_reading(8.1, ""), "8.1");
    }

    #[test]
    fn missing_preset_has_a_label() {
        assert_eq!(coral_label(Some(CoralType::Sps)), "SPS Dominant");
        assert_eq!(coral_label(None), "no coral preset");
    }
}
