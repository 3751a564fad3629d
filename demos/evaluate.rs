use calcspan_rs::{Environment, Error, Evaluator, Tokenizer};
use log::debug;
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("Usage: evaluate \"<expression>\"");
    ExitCode::FAILURE
}

fn run(expression: &str) -> Result<f64, Error> {
    let environment = Environment::with_builtins();
    debug!("limits: {:?}", environment.limits());

    let tokens = Tokenizer::new(environment.limits()).tokenize(expression)?;
    println!("{}", tokens);

    let result = Evaluator::new(environment.variables(), environment.functions())
        .with_limits(environment.limits())
        .evaluate(tokens)?;
    Ok(result)
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let expression = match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => return usage(),
        [expression] => expression,
        _ => return usage(),
    };

    match run(expression) {
        Ok(result) => {
            println!("Result: {:.6}", result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
