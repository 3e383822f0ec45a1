use clap::{Args, Parser as ClapParser, Subcommand};
use numint::Rule;
use numint::cli::{
    self, CheckOptions, CliError, CompareOptions, EvaluateOptions, IntegrateOptions, Partition,
};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "numint")]
#[command(about = "numint - Numerical integration of single-variable formulas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct PartitionArgs {
    /// Number of subintervals
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    subintervals: Option<i64>,

    /// Step size; the number of subintervals is round((b - a) / step)
    #[arg(short, long)]
    step: Option<f64>,
}

impl PartitionArgs {
    fn partition(&self) -> Result<Partition, CliError> {
        match (self.subintervals, self.step) {
            (Some(n), _) => Ok(Partition::Count(n)),
            (None, Some(h)) => Ok(Partition::Step(h)),
            (None, None) => Err(CliError::NoPartition),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a formula over [a, b] with one composite rule
    Integrate {
        /// The formula in x (reads from stdin if not provided)
        #[arg(allow_hyphen_values = true)]
        expression: Option<String>,

        /// Quadrature rule
        #[arg(short, long, value_enum, default_value_t = Rule::Simpson)]
        rule: Rule,

        /// Lower bound
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        lower: f64,

        /// Upper bound
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        upper: f64,

        #[command(flatten)]
        partition: PartitionArgs,

        /// Add 1 to an odd subinterval count for Simpson's rule instead of failing
        #[arg(long)]
        adjust_odd: bool,

        /// Decimals in the printed result
        #[arg(short, long, default_value_t = 8)]
        precision: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Evaluate samples in parallel (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Run all three rules on the same problem
    Compare {
        /// The formula in x (reads from stdin if not provided)
        #[arg(allow_hyphen_values = true)]
        expression: Option<String>,

        /// Lower bound
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        lower: f64,

        /// Upper bound
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        upper: f64,

        #[command(flatten)]
        partition: PartitionArgs,

        /// Known value of the integral, to report errors against
        #[arg(long, allow_hyphen_values = true)]
        exact: Option<f64>,

        /// Decimals in the printed results
        #[arg(short, long, default_value_t = 8)]
        precision: usize,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,

        /// Evaluate samples in parallel (needs the `parallel` feature)
        #[arg(long)]
        parallel: bool,
    },

    /// Evaluate a formula at one or more points
    Eval {
        /// The formula in x (reads from stdin if not provided)
        #[arg(allow_hyphen_values = true)]
        expression: Option<String>,

        /// Value of x; repeat for several points
        #[arg(long = "at", required = true, allow_hyphen_values = true)]
        points: Vec<f64>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a formula without evaluating it
    Check {
        /// The formula in x (reads from stdin if not provided)
        #[arg(allow_hyphen_values = true)]
        expression: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive calculator menu
    Menu,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Integrate {
            expression,
            rule,
            lower,
            upper,
            partition,
            adjust_odd,
            precision,
            json,
            parallel,
        } => partition.partition().and_then(|partition| {
            run_integrate(
                IntegrateOptions {
                    expression: read_expression(expression)?,
                    rule,
                    lower,
                    upper,
                    partition,
                    adjust_odd,
                    parallel,
                },
                precision,
                json,
            )
        }),
        Commands::Compare {
            expression,
            lower,
            upper,
            partition,
            exact,
            precision,
            json,
            parallel,
        } => partition.partition().and_then(|partition| {
            let options = CompareOptions {
                expression: read_expression(expression)?,
                lower,
                upper,
                partition,
                exact,
                parallel,
            };
            let report = cli::execute_compare(&options)?;
            if json {
                print_json(&report.to_json())
            } else {
                println!("{}", report.render(precision));
                Ok(())
            }
        }),
        Commands::Eval {
            expression,
            points,
            json,
        } => read_expression(expression).and_then(|expression| {
            let points = cli::execute_evaluate(&EvaluateOptions { expression, points })?;
            if json {
                let values: Vec<serde_json::Value> = points.iter().map(|p| p.to_json()).collect();
                print_json(&serde_json::Value::Array(values))
            } else {
                for point in points {
                    println!("f({}) = {}", point.x, point.value);
                }
                Ok(())
            }
        }),
        Commands::Check { expression, json } => read_expression(expression).and_then(|expression| {
            let result = cli::execute_check(&CheckOptions { expression })?;
            if json {
                print_json(&result.to_json())
            } else {
                println!("Syntax is valid: {}", result.normalized);
                Ok(())
            }
        }),
        Commands::Menu => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout().lock();
            cli::run_menu(&mut input, &mut output)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Takes the formula from the argument, or from piped stdin.
fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer.trim().to_string())
        }
        None => Err(CliError::NoExpression),
    }
}

fn run_integrate(options: IntegrateOptions, precision: usize, json: bool) -> Result<(), CliError> {
    let report = cli::execute_integrate(&options)?;

    if json {
        return print_json(&report.to_json());
    }

    if let Some(n) = report.adjusted_from {
        eprintln!(
            "Warning: n should be even for Simpson's rule. Adding 1 to make it even ({} -> {}).",
            n, report.subintervals
        );
    }
    println!("{}", report.render(precision));
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
