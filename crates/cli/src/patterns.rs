//! `variantgrid pattern ...`: run the auto-fill generators directly.
//!
//! Useful for checking what a fill-down or duplicate will produce before
//! committing a template to grid.toml.

use chrono::NaiveDateTime;
use variantgrid_engine::pattern::{
    apply_template, apply_template_with, detect_pattern, generate_short_uuid, increment_value,
    PatternKind, TemplateOptions,
};

use crate::CliError;

/// `count` successive increments of `value`, offsets 1..=count.
pub fn increments(value: &str, count: u64) -> Vec<String> {
    (1..=count).map(|offset| increment_value(value, offset)).collect()
}

pub fn uuids(prefix: Option<&str>, count: u64) -> Vec<String> {
    (0..count).map(|_| generate_short_uuid(prefix)).collect()
}

/// Expand `template` for row indices `0..count`.
pub fn templates(
    template: &str,
    start_from: u64,
    count: u64,
    now: Option<NaiveDateTime>,
) -> Result<Vec<String>, CliError> {
    if template.trim().is_empty() {
        return Err(CliError::args("template must not be empty"));
    }
    let options = TemplateOptions { start_from };
    let mut rng = rand::thread_rng();
    Ok((0..count)
        .map(|index| match now {
            Some(now) => apply_template_with(template, index, &options, now, &mut rng),
            None => apply_template(template, index, &options),
        })
        .collect())
}

pub fn detect(value: &str) -> &'static str {
    match detect_pattern(value) {
        PatternKind::Increment => "increment",
        PatternKind::Uuid => "uuid",
    }
}
