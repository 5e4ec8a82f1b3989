use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::collector::validate_entry;
use crate::error::{FootprintError, Result};
use crate::models::{ActivityCategory, CropActivity, RawActivity, normalize_crop};

/// Minimum similarity for a typed crop name to be offered as a match.
const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Find known crops resembling `input`, best match first.
pub fn fuzzy_crop_matches<'a>(input: &str, crops: &'a [String]) -> Vec<&'a str> {
    let input = normalize_crop(input);

    let mut candidates: Vec<(&str, f64)> = crops
        .iter()
        .map(|c| (c.as_str(), jaro_winkler(c, &input)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(c, _)| c).collect()
}

/// Prompt for a crop type from the known list, with fuzzy matching.
///
/// If the table has no crops, any non-empty code is accepted.
pub fn prompt_crop(crops: &[String]) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt("Crop type")
            .interact_text()?;

        let input = normalize_crop(&input);
        if input.is_empty() {
            continue;
        }

        if crops.is_empty() || crops.contains(&input) {
            return Ok(input);
        }

        let candidates = fuzzy_crop_matches(&input, crops);

        if candidates.is_empty() {
            println!("No crop matching '{}'. Known crops: {}", input, crops.join(", "));
            continue;
        }

        if candidates.len() == 1 {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", candidates[0]))
                .default(true)
                .interact()?;

            if confirm {
                return Ok(candidates[0].to_string());
            }
            continue;
        }

        let mut options: Vec<&str> = candidates.iter().take(5).copied().collect();
        let shown = options.len();
        options.push("None of these");

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < shown {
            return Ok(options[selection].to_string());
        }
    }
}

/// Prompt for a non-negative quantity, re-asking until it parses.
fn prompt_quantity(category: ActivityCategory) -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("Quantity of {}", category.label().to_lowercase()))
            .interact_text()?;

        match input.trim().parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("'{}' is not a number", input.trim()),
        }
    }
}

/// Prompt for one activity entry for `crop`. Returns `None` when the user is done.
pub fn prompt_activity(crop: &str) -> Result<Option<RawActivity>> {
    let mut options: Vec<String> = ActivityCategory::ALL
        .iter()
        .map(|c| format!("{} ({})", c.label(), c.expected_unit()))
        .collect();
    options.push("Done".to_string());

    let selection = Select::new()
        .with_prompt(format!("Add an activity for {}", crop))
        .items(&options)
        .default(0)
        .interact()?;

    let Some(category) = ActivityCategory::ALL.get(selection).copied() else {
        return Ok(None);
    };

    let quantity = prompt_quantity(category)?;

    let unit: String = Input::new()
        .with_prompt("Unit")
        .default(category.expected_unit().to_string())
        .interact_text()?;

    Ok(Some(RawActivity {
        crop: crop.to_string(),
        activity: category.code().to_string(),
        quantity,
        unit,
    }))
}

/// Collect validated activities for one crop.
///
/// Invalid entries are reported and dropped so the user can enter them again.
pub fn collect_crop_activities(crop: &str) -> Result<Vec<CropActivity>> {
    let mut activities = Vec::new();
    let mut index = 0;

    while let Some(raw) = prompt_activity(crop)? {
        match validate_entry(index, &raw) {
            Ok(activity) => {
                println!(
                    "Added: {} {} {}",
                    activity.category(),
                    activity.quantity(),
                    activity.unit()
                );
                activities.push(activity);
            }
            Err(FootprintError::InvalidActivityInput { reason, .. }) => {
                println!("Rejected: {}", reason);
            }
            Err(e) => return Err(e),
        }
        index += 1;
    }

    Ok(activities)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for the report destination.
pub fn prompt_output_path(default: &str) -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("Save report to (.csv or .xlsx)")
        .default(default.to_string())
        .interact_text()?;

    Ok(PathBuf::from(input.trim()))
}
