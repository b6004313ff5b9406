use tally_macros::tally_fn;
use tally_rs::{ErrorKind, Evaluator};

#[tally_fn]
fn clamp(value: f64, low: f64, high: f64) -> Result<f64, String> {
    if low > high {
        return Err(format!("empty range [{}, {}]", low, high));
    }
    Ok(value.max(low).min(high))
}

#[tally_fn]
fn lerp(a: f64, b: f64, t: f64) -> Result<f64, String> {
    Ok(a + (b - a) * t)
}

fn main() {
    pretty_env_logger::init();

    let mut evaluator = Evaluator::new();
    evaluator.register_function("clamp", clamp);
    evaluator.register_function("lerp", lerp);
    evaluator.register_function("product", |args| Ok(args.iter().product()));

    for expression in [
        "clamp(lerp(0, 100, 1.5), 0, 100)",
        "product(2, 3, clamp(9, 0, 4))",
        "clamp(1, 5, 0)",
        "lerp(1, 2)",
        "median(1, 2, 3)",
    ] {
        match evaluator.evaluate(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) if err.kind == ErrorKind::FunctionNotFound => {
                println!("{} -> not registered: {:?}", expression, err.token)
            }
            Err(err) => println!("{} -> error: {}", expression, err),
        }
    }
}
