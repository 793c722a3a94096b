//! Body Mass Index calculation.

/// BMI from weight in kg and height in cm, rounded to one decimal place.
///
/// Returns `None` for zero height or non-finite input.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !weight_kg.is_finite() || !height_cm.is_finite() || height_cm == 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    bmi.is_finite().then(|| round_to_tenth(bmi))
}

/// Round to one decimal place from the exact binary value, ties to even.
///
/// `24.95` is stored as `24.9499...` and rounds to `24.9`; scaling by ten first
/// would round the product up to `249.5` and give `25.0`.
pub fn round_to_tenth(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.1}", value).parse().unwrap_or(value)
}
