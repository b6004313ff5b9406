use crate::eval::FunctionRegistry;
use tally_macros::tally_fn;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("abs", abs);
    registry.register("sqrt", sqrt);
    registry.register("floor", floor);
    registry.register("ceil", ceil);
    registry.register("round", round);
    registry.register("round_to", round_to);
    registry.register("exp", exp);
    registry.register("ln", ln);
    registry.register("log10", log10);
    registry.register("pow", pow);
    registry.register("hypot", hypot);
    registry.register("sin", sin);
    registry.register("cos", cos);
    registry.register("tan", tan);
}

#[tally_fn]
pub fn abs(x: f64) -> Result<f64, String> {
    Ok(x.abs())
}

#[tally_fn]
pub fn sqrt(x: f64) -> Result<f64, String> {
    if x < 0.0 {
        return Err(format!("Cannot take the square root of {}", x));
    }
    Ok(x.sqrt())
}

#[tally_fn]
pub fn floor(x: f64) -> Result<f64, String> {
    Ok(x.floor())
}

#[tally_fn]
pub fn ceil(x: f64) -> Result<f64, String> {
    Ok(x.ceil())
}

#[tally_fn]
pub fn round(x: f64) -> Result<f64, String> {
    Ok(x.round())
}

/// Rounds `x` to `digits` decimal places.
#[tally_fn]
pub fn round_to(x: f64, digits: i64) -> Result<f64, String> {
    if !(0..=15).contains(&digits) {
        return Err(format!("round_to supports 0 to 15 digits, got {}", digits));
    }
    let scale = 10f64.powi(digits as i32);
    Ok((x * scale).round() / scale)
}

#[tally_fn]
pub fn exp(x: f64) -> Result<f64, String> {
    Ok(x.exp())
}

// Non-positive input yields NaN or -inf, which the evaluator rejects.
#[tally_fn]
pub fn ln(x: f64) -> Result<f64, String> {
    Ok(x.ln())
}

#[tally_fn]
pub fn log10(x: f64) -> Result<f64, String> {
    Ok(x.log10())
}

#[tally_fn]
pub fn pow(base: f64, exponent: f64) -> Result<f64, String> {
    Ok(base.powf(exponent))
}

#[tally_fn]
pub fn hypot(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.hypot(b))
}

#[tally_fn]
pub fn sin(x: f64) -> Result<f64, String> {
    Ok(x.sin())
}

#[tally_fn]
pub fn cos(x: f64) -> Result<f64, String> {
    Ok(x.cos())
}

#[tally_fn]
pub fn tan(x: f64) -> Result<f64, String> {
    Ok(x.tan())
}
