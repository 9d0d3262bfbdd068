//! Static reference tables: ideal ranges, coral presets, remedy steps, product suggestions
//! and dosing methods.

use reefpulse_schemas::{
    coral::{CoralPreset, CoralType},
    dosing::DosingMethod,
    parameter::{Direction, IdealRange, ParameterKind, RangeAdjustment},
};
use serde::Serialize;

/// The base ideal range of a parameter, before any coral preset is applied.
pub fn base_range(kind: ParameterKind) -> IdealRange {
    let (min, max, unit, label) = match kind {
        ParameterKind::Nitrate => (0.0, 10.0, "ppm", "Nitrate (NO\u{2083})"),
        ParameterKind::Ph => (7.8, 8.4, "", "pH"),
        ParameterKind::Alkalinity => (7.5, 11.0, "dKH", "Alkalinity"),
        ParameterKind::Calcium => (380.0, 450.0, "ppm", "Calcium"),
        ParameterKind::Phosphate => (0.0, 0.1, "ppm", "Phosphate (PO\u{2084})"),
        ParameterKind::Salinity => (1.024, 1.026, "sg", "Salinity"),
        ParameterKind::Temperature => (76.0, 80.0, "\u{b0}F", "Temperature"),
        ParameterKind::Magnesium => (1250.0, 1400.0, "ppm", "Magnesium"),
        ParameterKind::Ammonia => (0.0, 0.0, "ppm", "Ammonia (NH\u{2083})"),
        ParameterKind::Nitrite => (0.0, 0.0, "ppm", "Nitrite (NO\u{2082})"),
    };
    IdealRange {
        min,
        max,
        unit: unit.to_string(),
        label: label.to_string(),
    }
}

const SPS_ADJUSTMENTS: &[(ParameterKind, f64, f64)] = &[
    (ParameterKind::Calcium, 420.0, 460.0),
    (ParameterKind::Alkalinity, 8.0, 9.5),
    (ParameterKind::Magnesium, 1300.0, 1400.0),
    (ParameterKind::Nitrate, 0.5, 5.0),
    (ParameterKind::Phosphate, 0.01, 0.05),
];

const LPS_ADJUSTMENTS: &[(ParameterKind, f64, f64)] = &[
    (ParameterKind::Calcium, 380.0, 440.0),
    (ParameterKind::Alkalinity, 7.5, 10.0),
    (ParameterKind::Nitrate, 2.0, 15.0),
    (ParameterKind::Phosphate, 0.02, 0.1),
];

const MIXED_ADJUSTMENTS: &[(ParameterKind, f64, f64)] = &[
    (ParameterKind::Calcium, 400.0, 450.0),
    (ParameterKind::Alkalinity, 8.0, 10.0),
];

const SOFTIE_ADJUSTMENTS: &[(ParameterKind, f64, f64)] = &[
    (ParameterKind::Nitrate, 0.0, 20.0),
    (ParameterKind::Phosphate, 0.0, 0.15),
];

/// The range overrides for a coral type.
pub fn coral_preset(coral: CoralType) -> CoralPreset {
    let (label, description, adjustments) = match coral {
        CoralType::Sps => ("SPS Dominant", "Acropora, Montipora, Stylophora", SPS_ADJUSTMENTS),
        CoralType::Lps => ("LPS Dominant", "Hammer, Torch, Frogspawn, Brain", LPS_ADJUSTMENTS),
        CoralType::Mixed => ("Mixed Reef", "Variety of SPS, LPS, and Softies", MIXED_ADJUSTMENTS),
        CoralType::Softie => (
            "Softies / FOWLR",
            "Mushrooms, Zoas, Leathers, Fish Only",
            SOFTIE_ADJUSTMENTS,
        ),
    };

    CoralPreset {
        label: label.to_string(),
        description: description.to_string(),
        adjustments: adjustments
            .iter()
            .map(|&(kind, min, max)| (kind, RangeAdjustment { min, max }))
            .collect(),
    }
}

/// The range in effect for every parameter once a coral preset has been applied.
///
/// A total table: every [`ParameterKind`] has exactly one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRanges {
    ranges: [IdealRange; ParameterKind::COUNT],
}

impl EffectiveRanges {
    /// Base ranges with `coral`'s adjustments overlaid kind by kind.
    pub fn for_coral(coral: Option<CoralType>) -> Self {
        let preset = coral.map(coral_preset);
        let ranges = ParameterKind::ALL.map(|kind| {
            let base = base_range(kind);
            match preset.as_ref().and_then(|p| p.adjustments.get(&kind)) {
                Some(adjustment) => base.adjusted(adjustment),
                None => base,
            }
        });
        Self { ranges }
    }

    pub fn get(&self, kind: ParameterKind) -> &IdealRange {
        &self.ranges[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, &IdealRange)> {
        ParameterKind::ALL.into_iter().zip(self.ranges.iter())
    }
}

/// One step of the guidance for resolving an issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemedyStep {
    pub step: &'static str,
    pub detail: &'static str,
}

/// A product or action suggested for an issue. `url` is absent for non-product actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Product {
    pub name: &'static str,
    pub url: Option<&'static str>,
    pub note: &'static str,
}

const fn step(step: &'static str, detail: &'static str) -> RemedyStep {
    RemedyStep { step, detail }
}

const fn product(name: &'static str, url: Option<&'static str>, note: &'static str) -> Product {
    Product { name, url, note }
}

const CALCIUM_LOW_STEPS: &[RemedyStep] = &[
    step("Test magnesium first", "If magnesium is below 1250 ppm, correct it before adjusting calcium - low mag makes calcium unstable."),
    step("Calculate your dose", "Use calcium chloride (CaCl2). Approximately 1 tsp per 50 gallons raises calcium ~19 ppm."),
    step("Dissolve in RODI water", "Mix your dose into a cup of RODI water. Never add powder directly to the tank."),
    step("Dose slowly to high-flow area", "Pour near a powerhead or return pump. Never raise more than 20 ppm per day."),
    step("Retest after 24 hours", "Wait a full day, then retest. Repeat dosing if still low. Consider a 2-part dosing system."),
];

const CALCIUM_HIGH_STEPS: &[RemedyStep] = &[
    step("Stop all calcium supplementation", "Pause 2-part, kalkwasser, or calcium reactor immediately."),
    step("Perform a water change", "A 15-20% water change with properly mixed NSW will help dilute excess calcium."),
    step("Check alkalinity balance", "High calcium often pairs with low alkalinity. The two are inversely related."),
    step("Retest in 48 hours", "Calcium will naturally be consumed by corals. Resume dosing at a lower rate once stable."),
];

const ALKALINITY_LOW_STEPS: &[RemedyStep] = &[
    step("Prepare soda ash solution", "Dissolve ~1 tsp of soda ash per cup of RODI water. Raises alk ~1 dKH per 40 gallons."),
    step("Calculate your dose", "Determine the deficit. Never raise alkalinity more than 1.4 dKH in a single day."),
    step("Drip or pour into high-flow area", "Add slowly near a powerhead. Rapid alk swings are more dangerous than the low level itself."),
    step("Retest after 12-24 hours", "Alkalinity is consumed quickly by SPS corals. If it drops fast, increase daily dosing."),
    step("Set up automated dosing", "If alk drops daily, invest in a dosing pump for consistent 2-part delivery."),
];

const ALKALINITY_HIGH_STEPS: &[RemedyStep] = &[
    step("Stop alkalinity supplementation", "Pause 2-part dosing, kalkwasser, or any alk supplement immediately."),
    step("Perform a water change", "Do a 15-25% water change with properly mixed saltwater to dilute."),
    step("Watch corals for stress", "High alk can burn SPS tissue. Look for tissue recession, bleaching, or RTN."),
    step("Retest in 24 hours", "Resume dosing at a reduced rate once alk returns to range."),
];

const MAGNESIUM_LOW_STEPS: &[RemedyStep] = &[
    step("Prioritize magnesium correction", "Low magnesium destabilizes both calcium and alkalinity. Fix mag FIRST."),
    step("Mix magnesium supplement", "Use 3 parts magnesium chloride + 2 parts magnesium sulfate dissolved in RODI water."),
    step("Dose slowly - max 100 ppm/day", "Large mag swings are stressful. Spread dosing over multiple days if deficit is large."),
    step("Retest after 24 hours", "Once magnesium is stable at 1300+ ppm, calcium and alkalinity should stabilize more easily."),
];

const MAGNESIUM_HIGH_STEPS: &[RemedyStep] = &[
    step("Stop magnesium supplementation", "Pause any mag dosing immediately."),
    step("Perform water changes", "Standard NSW sits around 1280-1350 ppm mag. Water changes will gradually dilute excess."),
    step("Retest in 48 hours", "Magnesium is consumed slowly, so patience is key."),
];

const NITRATE_HIGH_STEPS: &[RemedyStep] = &[
    step("Perform a water change", "An immediate 20-30% water change will dilute nitrate."),
    step("Reduce feeding", "Cut feeding amount in half and remove uneaten food within 5 minutes."),
    step("Clean mechanical filtration", "Rinse filter socks, sponges, and clean your skimmer cup. Trapped detritus is a nitrate factory."),
    step("Add biological filtration", "Consider adding bio media (Seachem Matrix, MarinePure) to your sump."),
    step("Consider carbon dosing", "NOPOX or vodka dosing feeds bacteria that consume nitrate. Start at half dose."),
];

const PHOSPHATE_HIGH_STEPS: &[RemedyStep] = &[
    step("Do NOT drop phosphate rapidly", "Fast phosphate reduction shocks corals. Target no more than 0.03 ppm reduction per day."),
    step("Run GFO in a reactor or bag", "Start with a small amount of granular ferric oxide. Replace every 2-4 weeks."),
    step("Check and clean filtration", "Dirty filter socks, skimmer, and detritus in sump all leach phosphate."),
    step("Reduce feeding", "Most phosphate enters via food. Cut back and use low-phosphate foods."),
    step("Retest weekly", "Track the downward trend. Slow and steady wins."),
];

const AMMONIA_HIGH_STEPS: &[RemedyStep] = &[
    step("EMERGENCY: Dose Seachem Prime NOW", "5ml per 50 gallons detoxifies ammonia for 24-48 hours."),
    step("Perform a 25-50% water change", "Immediately dilute ammonia with properly mixed saltwater."),
    step("Find the source", "Check for dead fish, invertebrates, uneaten food, or dead animals hidden in rockwork."),
    step("Add bottled bacteria", "Fritz TurboStart 900 or Seachem Stability will accelerate biological filtration."),
    step("Retest every 12 hours", "Continue dosing Prime and water changes until ammonia reads 0."),
];

const NITRITE_HIGH_STEPS: &[RemedyStep] = &[
    step("Dose Seachem Prime immediately", "Prime detoxifies nitrite. Dose 5ml per 50 gallons."),
    step("Perform a 25% water change", "Dilute nitrite levels with clean saltwater."),
    step("Add nitrifying bacteria", "Fritz TurboStart 900 is the fastest. Dose into the sump or near biological media."),
    step("Check for disruption", "Did you recently clean all filter media, add medication, or have a power outage?"),
    step("Retest daily", "Continue Prime until nitrite reads 0."),
];

const PH_LOW_STEPS: &[RemedyStep] = &[
    step("Open a window near your tank", "The #1 cause of low pH is elevated indoor CO2. Ventilation often fixes it immediately."),
    step("Check alkalinity", "Low alkalinity directly causes low pH. Correct alk first and pH may follow."),
    step("Run a CO2 scrubber", "Attach a CO2 scrubber to your protein skimmer's air intake."),
    step("Consider kalkwasser", "Kalkwasser in your ATO raises pH while supplementing calcium and alkalinity."),
    step("Grow macro algae (refugium)", "Chaeto in a refugium with reverse light cycle consumes CO2 at night, stabilizing pH."),
];

const PH_HIGH_STEPS: &[RemedyStep] = &[
    step("Check kalkwasser dosing", "If using kalk, reduce concentration or slow drip rate."),
    step("Verify test accuracy", "pH probes drift over time. Calibrate or cross-check with a fresh test kit."),
    step("Slight elevation is OK", "pH 8.4-8.5 is safe. Only act if consistently above 8.5."),
    step("Reduce aeration if extreme", "Temporarily reduce protein skimmer air intake."),
];

const TEMPERATURE_HIGH_STEPS: &[RemedyStep] = &[
    step("Point a fan across the water surface", "Evaporative cooling can drop temperature 2-4F."),
    step("Reduce lighting period", "Shift light schedule so peak intensity avoids the hottest part of the day."),
    step("Float ice packs (short-term only)", "Sealed ice packs in the sump can help in emergencies."),
    step("Install a temperature controller", "An Inkbird dual-stage controller can automate fans/chiller and heater."),
    step("Consider a chiller for chronic issues", "If your tank consistently overheats, a chiller is the permanent fix."),
];

const TEMPERATURE_LOW_STEPS: &[RemedyStep] = &[
    step("Check your heater", "Verify it is plugged in, set correctly, and indicator light is on."),
    step("Verify heater capacity", "You need approximately 3-5 watts per gallon."),
    step("Use a temperature controller", "An Inkbird controller adds a safety layer."),
    step("Consider a backup heater", "Two smaller heaters are safer than one large one."),
];

const SALINITY_LOW_STEPS: &[RemedyStep] = &[
    step("Check your ATO system", "Too much freshwater dosing is the most common cause."),
    step("Top off with saltwater temporarily", "Use mixed saltwater for top-offs until salinity recovers."),
    step("Raise slowly - max 0.001 sg/day", "Rapid salinity changes stress fish and corals."),
    step("Calibrate your refractometer", "Use calibration fluid (not RODI water)."),
];

const SALINITY_HIGH_STEPS: &[RemedyStep] = &[
    step("Top off with RODI freshwater", "Add fresh RODI water to dilute. Likely an evaporation/ATO issue."),
    step("Check for ATO failure", "Inspect float switch, pump, and reservoir."),
    step("Lower slowly - max 0.001 sg/day", "Rapid drops stress livestock just as much as rapid increases."),
    step("Recalibrate your refractometer", "Use 35 ppt calibration fluid to verify readings."),
];

/// Resolution steps for an issue, in the order they should be carried out.
/// Empty when no guidance exists for the combination.
pub fn remedy_steps(kind: ParameterKind, direction: Direction) -> &'static [RemedyStep] {
    use Direction::{High, Low};
    use ParameterKind::*;

    match (kind, direction) {
        (Calcium, Low) => CALCIUM_LOW_STEPS,
        (Calcium, High) => CALCIUM_HIGH_STEPS,
        (Alkalinity, Low) => ALKALINITY_LOW_STEPS,
        (Alkalinity, High) => ALKALINITY_HIGH_STEPS,
        (Magnesium, Low) => MAGNESIUM_LOW_STEPS,
        (Magnesium, High) => MAGNESIUM_HIGH_STEPS,
        (Nitrate, High) => NITRATE_HIGH_STEPS,
        (Phosphate, High) => PHOSPHATE_HIGH_STEPS,
        (Ammonia, High) => AMMONIA_HIGH_STEPS,
        (Nitrite, High) => NITRITE_HIGH_STEPS,
        (Ph, Low) => PH_LOW_STEPS,
        (Ph, High) => PH_HIGH_STEPS,
        (Temperature, High) => TEMPERATURE_HIGH_STEPS,
        (Temperature, Low) => TEMPERATURE_LOW_STEPS,
        (Salinity, Low) => SALINITY_LOW_STEPS,
        (Salinity, High) => SALINITY_HIGH_STEPS,
        _ => &[],
    }
}

const CALCIUM_LOW_PRODUCTS: &[Product] = &[
    product("BRS Calcium Chloride", Some("https://www.bulkreefsupply.com/calcium-chloride.html"), "Most cost-effective for 2-part dosing"),
    product("Fritz RPM Calcium", Some("https://fritzaquatics.com"), "Pre-mixed solution, easy to use"),
];

const ALKALINITY_LOW_PRODUCTS: &[Product] = &[
    product("BRS Soda Ash", Some("https://www.bulkreefsupply.com/soda-ash.html"), "Best value for raising alkalinity"),
    product("ESV B-Ionic Alkalinity", Some("https://www.esv-aquatics.com"), "Balanced 2-part supplement"),
];

const ALKALINITY_HIGH_PRODUCTS: &[Product] = &[
    product("Perform water change", None, "Dilute with NSW to gradually lower"),
];

const MAGNESIUM_LOW_PRODUCTS: &[Product] = &[
    product("BRS Magnesium Chloride + Sulfate", Some("https://www.bulkreefsupply.com/magnesium.html"), "DIY recipe - most cost-effective"),
    product("Brightwell Aquatics Magnesion", Some("https://brightwellaquatics.com"), "Pre-mixed convenience"),
];

const NITRATE_HIGH_PRODUCTS: &[Product] = &[
    product("Seachem Matrix Bio Media", Some("https://www.seachem.com/matrix.php"), "Excellent bio filtration media"),
    product("NOPOX / Vodka Dosing", Some("https://www.bulkreefsupply.com/nopox.html"), "Carbon dosing to feed bacteria"),
    product("Reduce feeding", None, "Cut back feedings and clean mechanical filtration"),
];

const PHOSPHATE_HIGH_PRODUCTS: &[Product] = &[
    product("BRS GFO (Granular Ferric Oxide)", Some("https://www.bulkreefsupply.com/brs-gfo.html"), "Gold standard phosphate removal"),
    product("Fauna Marin Phosphate Reduction", Some("https://faunamarin.com"), "Biological phosphate control"),
];

const AMMONIA_HIGH_PRODUCTS: &[Product] = &[
    product("Seachem Prime", Some("https://www.seachem.com/prime.php"), "Emergency ammonia detoxifier"),
    product("Fritz TurboStart 900", Some("https://fritzaquatics.com"), "Live nitrifying bacteria - fast cycle"),
];

const NITRITE_HIGH_PRODUCTS: &[Product] = &[
    product("Fritz TurboStart 900", Some("https://fritzaquatics.com"), "Accelerate the nitrogen cycle"),
    product("Seachem Stability", Some("https://www.seachem.com/stability.php"), "Daily bacterial supplement"),
];

const PH_LOW_PRODUCTS: &[Product] = &[
    product("Open windows / Increase ventilation", None, "Indoor CO2 buildup is the #1 cause of low pH"),
    product("BRS CO2 Scrubber", Some("https://www.bulkreefsupply.com/co2-scrubber.html"), "Scrubs CO2 from skimmer air intake"),
    product("Kalkwasser (Kalk Reactor)", Some("https://www.bulkreefsupply.com/kalkwasser.html"), "Raises pH and supplements calcium/alk"),
];

const TEMPERATURE_HIGH_PRODUCTS: &[Product] = &[
    product("Inkbird Temperature Controller", Some("https://www.amazon.com/Inkbird-Temperature-Controller"), "Automate heater/fan with dual-stage controller"),
    product("Add a fan to sump", None, "Evaporative cooling can drop temp 2-4F"),
];

const TEMPERATURE_LOW_PRODUCTS: &[Product] = &[
    product("Eheim Jager Heater", Some("https://www.amazon.com/Eheim-Jager-Aquarium-Thermostat-Heater"), "Most reliable heater on the market"),
    product("Inkbird Temperature Controller", Some("https://www.amazon.com/Inkbird-Temperature-Controller"), "Prevents heater malfunction disasters"),
];

/// Products or actions suggested for an issue; empty when none are listed.
pub fn products(kind: ParameterKind, direction: Direction) -> &'static [Product] {
    use Direction::{High, Low};
    use ParameterKind::*;

    match (kind, direction) {
        (Calcium, Low) => CALCIUM_LOW_PRODUCTS,
        (Alkalinity, Low) => ALKALINITY_LOW_PRODUCTS,
        (Alkalinity, High) => ALKALINITY_HIGH_PRODUCTS,
        (Magnesium, Low) => MAGNESIUM_LOW_PRODUCTS,
        (Nitrate, High) => NITRATE_HIGH_PRODUCTS,
        (Phosphate, High) => PHOSPHATE_HIGH_PRODUCTS,
        (Ammonia, High) => AMMONIA_HIGH_PRODUCTS,
        (Nitrite, High) => NITRITE_HIGH_PRODUCTS,
        (Ph, Low) => PH_LOW_PRODUCTS,
        (Temperature, High) => TEMPERATURE_HIGH_PRODUCTS,
        (Temperature, Low) => TEMPERATURE_LOW_PRODUCTS,
        _ => &[],
    }
}

/// Parameters the dosing calculator can raise.
pub const DOSABLE_KINDS: [ParameterKind; 3] = [
    ParameterKind::Calcium,
    ParameterKind::Alkalinity,
    ParameterKind::Magnesium,
];

struct MethodSpec {
    name: &'static str,
    units_per_dose: f64,
    amount_description: &'static str,
    standard_amount_gallons: f64,
    max_change_per_day: f64,
    grams_per_std_amount: Option<f64>,
    ml_per_dose: Option<f64>,
    is_drip_method: bool,
    note: &'static str,
}

impl MethodSpec {
    fn to_method(&self) -> DosingMethod {
        DosingMethod {
            name: self.name.to_string(),
            units_per_dose: self.units_per_dose,
            standard_amount_gallons: self.standard_amount_gallons,
            max_change_per_day: self.max_change_per_day,
            grams_per_std_amount: self.grams_per_std_amount,
            ml_per_dose: self.ml_per_dose,
            is_drip_method: self.is_drip_method,
            amount_description: self.amount_description.to_string(),
            note: self.note.to_string(),
        }
    }
}

const CALCIUM_METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "Calcium Chloride (CaCl2)",
        units_per_dose: 19.0,
        amount_description: "1 tsp",
        standard_amount_gallons: 50.0,
        max_change_per_day: 20.0,
        grams_per_std_amount: Some(3.7),
        ml_per_dose: None,
        is_drip_method: false,
        note: "Most common 2-part method. Dissolve in RODI water before adding.",
    },
    MethodSpec {
        name: "Kalkwasser (Ca(OH)2)",
        units_per_dose: 2.0,
        amount_description: "1/4 tsp per gallon ATO",
        standard_amount_gallons: 1.0,
        max_change_per_day: 20.0,
        grams_per_std_amount: Some(2.3),
        ml_per_dose: None,
        is_drip_method: true,
        note: "Slow drip via ATO. Also raises pH and alkalinity. Best for maintenance, not large corrections.",
    },
];

const ALKALINITY_METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "Soda Ash (Na2CO3)",
        units_per_dose: 1.0,
        amount_description: "1 tsp",
        standard_amount_gallons: 40.0,
        max_change_per_day: 1.4,
        grams_per_std_amount: Some(3.8),
        ml_per_dose: None,
        is_drip_method: false,
        note: "Standard 2-part method. Preferred over baking soda for reef tanks.",
    },
    MethodSpec {
        name: "Baking Soda (NaHCO3)",
        units_per_dose: 0.7,
        amount_description: "1 tsp",
        standard_amount_gallons: 40.0,
        max_change_per_day: 1.4,
        grams_per_std_amount: Some(4.6),
        ml_per_dose: None,
        is_drip_method: false,
        note: "Cheaper but slightly less effective. Can depress pH if overdosed.",
    },
];

const MAGNESIUM_METHODS: &[MethodSpec] = &[
    MethodSpec {
        name: "DIY Mag Mix (MgCl2 + MgSO4)",
        units_per_dose: 100.0,
        amount_description: "6 tsp MgCl2 + 4 tsp MgSO4",
        standard_amount_gallons: 50.0,
        max_change_per_day: 100.0,
        grams_per_std_amount: Some(3.9),
        ml_per_dose: None,
        is_drip_method: false,
        note: "Most cost-effective. Use 3:2 ratio of magnesium chloride to magnesium sulfate.",
    },
    MethodSpec {
        name: "Brightwell Magnesion",
        units_per_dose: 8.0,
        amount_description: "5 ml",
        standard_amount_gallons: 20.0,
        max_change_per_day: 100.0,
        grams_per_std_amount: None,
        ml_per_dose: Some(5.0),
        is_drip_method: false,
        note: "Pre-mixed convenience. Great for small adjustments.",
    },
];

/// Supplement methods available for raising `kind`; empty for parameters that are not
/// corrected by dosing.
pub fn dosing_methods(kind: ParameterKind) -> Vec<DosingMethod> {
    let specs: &[MethodSpec] = match kind {
        ParameterKind::Calcium => CALCIUM_METHODS,
        ParameterKind::Alkalinity => ALKALINITY_METHODS,
        ParameterKind::Magnesium => MAGNESIUM_METHODS,
        _ => &[],
    };
    specs.iter().map(MethodSpec::to_method).collect()
}

/// The method at `index` for `kind`, falling back to the first method when the index is
/// out of range. `None` only when `kind` has no dosing methods at all.
pub fn dosing_method(kind: ParameterKind, index: usize) -> Option<DosingMethod> {
    let mut methods = dosing_methods(kind);
    if index < methods.len() {
        Some(methods.swap_remove(index))
    } else {
        methods.into_iter().next()
    }
}
