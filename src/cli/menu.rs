//! Interactive calculator menu
//!
//! Line-oriented prompt loop over any reader and writer, so it runs the same
//! against a terminal and against a buffer in tests.

use std::io::{BufRead, Write};

use crate::Rule;

use super::{CliError, IntegrateOptions, Partition, execute_integrate};

const INVALID_NUMBER: &str = "Invalid input. Please enter valid numbers.";

/// Reads one trimmed line after printing `text`; `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>, CliError> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Runs the menu until the user picks `0` or input runs out.
///
/// An odd count for Simpson's rule is bumped to the next even one with a
/// warning, as the calculator always did.
pub fn run_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<(), CliError> {
    writeln!(output, "Numerical Integration Calculator")?;
    writeln!(output, "Choose a method:")?;
    writeln!(output, "1- Composite Midpoint Rule")?;
    writeln!(output, "2- Composite Trapezoidal Rule")?;
    writeln!(output, "3- Composite Simpson's Rule")?;

    loop {
        let Some(choice) = prompt(input, output, "\nEnter your choice (1-3, 0 to exit): ")? else {
            break;
        };

        let rule = match choice.as_str() {
            "0" => break,
            "1" => Rule::Midpoint,
            "2" => Rule::Trapezoidal,
            "3" => Rule::Simpson,
            _ => {
                writeln!(output, "Invalid choice. Please enter 1, 2, or 3.")?;
                continue;
            }
        };

        let Some(lower) = prompt(input, output, "Enter lower bound (a): ")? else {
            break;
        };
        let Ok(lower) = lower.parse::<f64>() else {
            writeln!(output, "{}", INVALID_NUMBER)?;
            continue;
        };

        let Some(upper) = prompt(input, output, "Enter upper bound (b): ")? else {
            break;
        };
        let Ok(upper) = upper.parse::<f64>() else {
            writeln!(output, "{}", INVALID_NUMBER)?;
            continue;
        };
        if upper <= lower {
            writeln!(output, "Error: b must be greater than a")?;
            continue;
        }

        let Some(n) = prompt(input, output, "Enter number of subintervals (n): ")? else {
            break;
        };
        let Ok(mut n) = n.parse::<i64>() else {
            writeln!(output, "{}", INVALID_NUMBER)?;
            continue;
        };
        if n <= 0 {
            writeln!(output, "Error: n must be positive")?;
            continue;
        }
        if rule.requires_even_count() && n % 2 != 0 {
            writeln!(
                output,
                "Warning: n should be even for Simpson's rule. Adding 1 to make it even."
            )?;
            n = n.saturating_add(1);
        }

        let Some(expression) = prompt(input, output, "Enter function (e.g., 'x^2', 'sin(x)', 'exp(-x)'): ")?
        else {
            break;
        };

        let options = IntegrateOptions {
            expression,
            rule,
            lower,
            upper,
            partition: Partition::Count(n),
            adjust_odd: false,
            parallel: false,
        };

        match execute_integrate(&options) {
            Ok(report) => writeln!(output, "\n{}", report.render(8))?,
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    Ok(())
}
