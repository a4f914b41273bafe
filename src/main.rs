use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use anyhow::Result;

use handheld::{default_input, load_input, ALL_SOLUTIONS};

fn main() -> Result<()> {
    env_logger::init();

    // An explicit path replaces inputs/<day>.txt for every day.
    let input_override = std::env::args().nth(1);

    let mut total = Duration::default();
    for &(n, day) in ALL_SOLUTIONS {
        let input = match &input_override {
            Some(path) => load_input(path)?,
            None => default_input(n)?,
        };
        total += execute_day(n, day, &input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day<S: Display, T: Display>(
    n: usize,
    f: fn(&str) -> Result<(S, T)>,
    input: &str,
) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (part1, part2) = f(input)?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
