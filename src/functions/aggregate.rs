use crate::eval::FunctionRegistry;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("sum", sum);
    registry.register("avg", avg);
    registry.register("min", min);
    registry.register("max", max);
    registry.register("count", count);
}

pub fn sum(args: &[f64]) -> Result<f64, String> {
    Ok(args.iter().sum())
}

pub fn avg(args: &[f64]) -> Result<f64, String> {
    if args.is_empty() {
        return Err("avg requires at least one argument".to_string());
    }
    Ok(args.iter().sum::<f64>() / args.len() as f64)
}

pub fn min(args: &[f64]) -> Result<f64, String> {
    args.iter()
        .copied()
        .reduce(f64::min)
        .ok_or_else(|| "min requires at least one argument".to_string())
}

pub fn max(args: &[f64]) -> Result<f64, String> {
    args.iter()
        .copied()
        .reduce(f64::max)
        .ok_or_else(|| "max requires at least one argument".to_string())
}

pub fn count(args: &[f64]) -> Result<f64, String> {
    Ok(args.len() as f64)
}
