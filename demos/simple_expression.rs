use tally_rs::{evaluate_expression, Evaluator};

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3 * 4",
        "2 * 3 % 4",
        "(1.5 + 2.5) / 0.5",
        "max(1, sqrt(81), avg(4, 6)) - 2",
        "10 / 0",
        "1 + 2)",
        "sum(1, , 2)",
    ];

    for expression in expressions {
        match evaluate_expression(expression) {
            Ok(result) => println!("{} = {}", expression, result),
            Err(err) => println!("{} -> error: {}", expression, err),
        }
    }

    let evaluator = Evaluator::with_builtins();
    match evaluator.to_postfix("hypot(3, 4) * 2 % 3") {
        Ok(postfix) => println!("postfix: {}", tally_rs::token::render_tokens(&postfix)),
        Err(err) => println!("error: {}", err),
    }
}
