pub mod prompts;
pub mod render;

pub use prompts::{
    collect_crop_activities, fuzzy_crop_matches, prompt_activity, prompt_crop,
    prompt_output_path, prompt_yes_no,
};
pub use render::{display_factors, display_footprint, display_rejections, display_results};
