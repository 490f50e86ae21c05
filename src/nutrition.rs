//! Daily target derivation: BMR, TDEE, target calories and the
//! protein/fat/carbohydrate gram split.
//!
//! Basal metabolic rate uses the National Institute of Health and Nutrition
//! equation (Ganpule et al. 2007). Every stage is a pure function; rounding
//! happens once at the end of each stage, never on intermediates.

use crate::models::{ActivityLevel, Gender, Goal, Profile};

/// Hard lower bound for the daily calorie target, kcal.
pub const MIN_TARGET_CALORIES: i64 = 1200;

/// Share of target calories allotted to fat.
const FAT_CALORIE_SHARE: f64 = 0.25;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_CARB: f64 = 4.0;

/// Target macro split in grams per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PfcGrams {
    pub protein: i64,
    pub fat: i64,
    pub carb: i64,
}

/// Each macro's share of total energy, as integer percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PfcRatios {
    pub p: i64,
    pub f: i64,
    pub c: i64,
}

/// Everything derived from a profile, in one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Targets {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub target_p: i64,
    pub target_f: i64,
    pub target_c: i64,
}

/// Basal metabolic rate in kcal/day (Ganpule et al. 2007).
pub fn calc_bmr(weight_kg: f64, height_cm: f64, age: i64, gender: Gender) -> i64 {
    let base = 0.0481 * weight_kg + 0.0234 * height_cm - 0.0138 * age as f64;
    let constant = match gender {
        Gender::Male => 0.4235,
        Gender::Female => 0.9708,
    };
    // The equation yields MJ/day; 1 kcal = 4.186 kJ.
    ((base - constant) * 1000.0 / 4.186).round() as i64
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
pub fn calc_tdee(bmr: i64, activity_level: ActivityLevel) -> i64 {
    (bmr as f64 * activity_level.factor()).round() as i64
}

/// Daily calorie target: TDEE plus the goal adjustment, clamped to a
/// 1200 kcal floor.
pub fn calc_target_calories(tdee: i64, goal: Goal) -> i64 {
    (tdee + goal.calorie_adjust()).max(MIN_TARGET_CALORIES)
}

/// Target macro grams for a calorie target.
///
/// Protein scales with bodyweight, fat takes a fixed quarter of the calorie
/// budget, and carbohydrate absorbs whatever energy remains (never below
/// zero, even when protein and fat alone exceed the target).
pub fn calc_target_pfc(target_calories: i64, weight_kg: f64, goal: Goal) -> PfcGrams {
    let protein = (weight_kg * goal.protein_per_kg()).round() as i64;
    let fat = (target_calories as f64 * FAT_CALORIE_SHARE / KCAL_PER_G_FAT).round() as i64;

    let remainder = target_calories as f64
        - protein as f64 * KCAL_PER_G_PROTEIN
        - fat as f64 * KCAL_PER_G_FAT;
    let carb = ((remainder / KCAL_PER_G_CARB).round() as i64).max(0);

    PfcGrams { protein, fat, carb }
}

/// Energy share of each macro as integer percentages. A zero-energy triple
/// yields all zeros rather than dividing by zero.
pub fn calc_pfc_ratios(protein: i64, fat: i64, carb: i64) -> PfcRatios {
    let p_kcal = protein as f64 * KCAL_PER_G_PROTEIN;
    let f_kcal = fat as f64 * KCAL_PER_G_FAT;
    let c_kcal = carb as f64 * KCAL_PER_G_CARB;
    let total = p_kcal + f_kcal + c_kcal;

    if total == 0.0 {
        return PfcRatios { p: 0, f: 0, c: 0 };
    }

    PfcRatios {
        p: (p_kcal / total * 100.0).round() as i64,
        f: (f_kcal / total * 100.0).round() as i64,
        c: (c_kcal / total * 100.0).round() as i64,
    }
}

/// Runs the whole pipeline for a profile.
pub fn calc_all(profile: &Profile) -> Targets {
    let bmr = calc_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    );
    let tdee = calc_tdee(bmr, profile.activity_level);
    let target_calories = calc_target_calories(tdee, profile.goal);
    let pfc = calc_target_pfc(target_calories, profile.weight_kg, profile.goal);

    Targets {
        bmr,
        tdee,
        target_calories,
        target_p: pfc.protein,
        target_f: pfc.fat,
        target_c: pfc.carb,
    }
}
