//! Input parsing and range validation for the session.
//!
//! The parse functions are pure predicates, testable without a terminal.
//! The prompt functions wrap them in the interactive retry loop: on a bad
//! entry the error is shown and the prompt repeats.

use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

use apportion_core::{Category, MAX_CATEGORIES};

/// Parses the category count, bounded to `[1, MAX_CATEGORIES]`.
pub fn parse_category_count(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| "enter a whole number".to_string())?;
    if (1..=MAX_CATEGORIES).contains(&n) {
        Ok(n)
    } else {
        Err(format!("enter a number between 1 and {MAX_CATEGORIES}"))
    }
}

/// Parses a strictly positive currency amount.
pub fn parse_positive_amount(s: &str) -> Result<f64, String> {
    let v = parse_number(s)?;
    if v <= 0.0 {
        return Err("the value must be positive".to_string());
    }
    Ok(v)
}

/// Parses a ratio factor: any finite real, zero and negative included.
pub fn parse_factor(s: &str) -> Result<f64, String> {
    parse_number(s)
}

/// Parses a percentage in `[0, 100]`.
pub fn parse_percentage(s: &str) -> Result<f64, String> {
    let v = parse_number(s)?;
    if !(0.0..=100.0).contains(&v) {
        return Err("enter a percentage between 0 and 100".to_string());
    }
    Ok(v)
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| "enter a number, e.g. 10 or 10.5".to_string())?;
    if !v.is_finite() {
        return Err("enter a finite number".to_string());
    }
    Ok(v)
}

/// Prompts until `parse` accepts the entry.
pub fn prompt_parsed<T>(
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T> {
    loop {
        let raw: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(message) => println!("{}", format!("Error: {message}").red()),
        }
    }
}

/// Prompts for the name of the category at `index` (0-based); a blank entry
/// falls back to the default name.
pub fn prompt_category(index: usize) -> Result<Category> {
    let raw: String = Input::new()
        .with_prompt(format!("Category {} name (blank for default)", index + 1))
        .allow_empty(true)
        .interact_text()?;
    Ok(Category::from_input(&raw, index))
}
