use log::debug;
use tally_rs::Evaluator;

fn main() {
    pretty_env_logger::init();

    let mut evaluator = Evaluator::with_builtins();
    let tokens = evaluator
        .tokenize("price() * (1 + rate() / 100)")
        .expect("Failed to tokenize");
    debug!("tokens: {tokens:?}");

    for (price, rate) in [(120.0, 5.0), (80.0, 12.5), (99.99, 0.0)] {
        evaluator.register_function("price", move |_| Ok(price));
        evaluator.register_function("rate", move |_| Ok(rate));

        match evaluator.evaluate_tokens(&tokens) {
            Ok(result) => println!("price {} at {}% -> {}", price, rate, result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
