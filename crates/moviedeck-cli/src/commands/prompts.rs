use catalog_core::validate_rating;
use color_eyre::Result;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Prompt for a string; `default` pre-fills the answer. Empty input is allowed.
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default_value) = default.filter(|d| !d.is_empty()) {
        input = input.default(default_value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt until the answer passes `validate`
pub fn prompt_validated<F>(prompt: &str, default: Option<&str>, validate: F) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<(), String>,
{
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|value: &String| validate(value));
    if let Some(default_value) = default.filter(|d| !d.is_empty()) {
        input = input.default(default_value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

pub fn prompt_rating(default: Option<&str>) -> Result<String> {
    prompt_validated("Rating (0-10)", default, |value| {
        validate_rating(value).map(|_| ()).map_err(|e| e.to_string())
    })
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `options`, starting on `default` when it is one of them
pub fn prompt_choice(prompt: &str, options: &[&str], default: Option<&str>) -> Result<String> {
    let start = default
        .and_then(|d| options.iter().position(|o| o.eq_ignore_ascii_case(d)))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(start)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;
    Ok(options[index].to_string())
}

/// Multi-select over `options` with `selected` pre-checked
pub fn prompt_multi(prompt: &str, options: &[String], selected: &[String]) -> Result<Vec<String>> {
    let checked: Vec<bool> = options.iter().map(|o| selected.contains(o)).collect();
    let picked = MultiSelect::new()
        .with_prompt(prompt)
        .items(options)
        .defaults(&checked)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;
    Ok(picked.into_iter().map(|i| options[i].clone()).collect())
}
