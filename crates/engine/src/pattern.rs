//! Unique-value generation for identity columns (SKU, barcode).
//!
//! Three strategies:
//! - increment: `SKU-001` + 2 → `SKU-003` (width of the digit run is kept)
//! - uuid: 8 random characters from `[A-Z0-9]`, optionally prefixed
//! - template: `{N}`/`{NUM}`, `{UUID}`, `{DATE}`, `{TIME}`, `{RAND}` placeholders
//!
//! Randomness is `rand`'s non-cryptographic generator: good enough to avoid
//! accidental collisions within one editing session, nothing more.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use variantgrid_config::{BarcodeFill, PatternSpec};

pub const SHORT_UUID_LEN: usize = 8;
const RAND_LEN: usize = 4;
const TEMPLATE_NUM_WIDTH: usize = 3;
const TOKEN_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

static UUID_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{8,}$").expect("valid uuid regex"));

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{(NUM|N|UUID|DATE|TIME|RAND)\}").expect("valid placeholder regex")
});

// ============================================================================
// Detection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Increment,
    Uuid,
}

/// Classify a source value when no explicit pattern is configured.
pub fn detect_pattern(value: &str) -> PatternKind {
    if split_trailing_digits(value).is_none() && UUID_LIKE.is_match(value) {
        PatternKind::Uuid
    } else {
        PatternKind::Increment
    }
}

// ============================================================================
// Increment
// ============================================================================

/// Split off the trailing ASCII digit run: `"PROD-A-10"` → `("PROD-A-", "10")`.
pub fn split_trailing_digits(value: &str) -> Option<(&str, &str)> {
    let digits = value.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    Some(value.split_at(value.len() - digits))
}

/// Add `offset` to the trailing number of `value`, keeping its zero padding.
/// Values without a trailing number get `-{offset}` appended.
pub fn increment_value(value: &str, offset: u64) -> String {
    match split_trailing_digits(value) {
        Some((prefix, digits)) => format!("{prefix}{}", add_to_digits(digits, offset)),
        None => format!("{value}-{offset}"),
    }
}

/// Decimal addition on the digit string itself, so runs longer than any
/// integer type (long barcodes) never overflow.
fn add_to_digits(digits: &str, offset: u64) -> String {
    let mut out: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    let mut carry = offset as u128;
    for d in out.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let total = *d as u128 + carry;
        *d = (total % 10) as u8;
        carry = total / 10;
    }
    let mut result = if carry > 0 { carry.to_string() } else { String::new() };
    result.extend(out.into_iter().map(|d| (b'0' + d) as char));
    result
}

// ============================================================================
// Random tokens
// ============================================================================

pub fn random_token<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

pub fn generate_short_uuid_with<R: Rng + ?Sized>(rng: &mut R, prefix: Option<&str>) -> String {
    format!("{}{}", prefix.unwrap_or(""), random_token(rng, SHORT_UUID_LEN))
}

pub fn generate_short_uuid(prefix: Option<&str>) -> String {
    generate_short_uuid_with(&mut rand::thread_rng(), prefix)
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Base for `{N}`; the row index is added to it, saturating at `u64::MAX`.
    pub start_from: u64,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self { start_from: 1 }
    }
}

/// Substitute placeholders (case-insensitive) for the row at `index`.
pub fn apply_template_with<R: Rng + ?Sized>(
    template: &str,
    index: u64,
    options: &TemplateOptions,
    now: NaiveDateTime,
    rng: &mut R,
) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            match caps[1].to_ascii_uppercase().as_str() {
                "N" | "NUM" => format!(
                    "{:0width$}",
                    options.start_from.saturating_add(index),
                    width = TEMPLATE_NUM_WIDTH
                ),
                "UUID" => random_token(rng, SHORT_UUID_LEN),
                "DATE" => now.format("%Y%m%d").to_string(),
                "TIME" => now.format("%H%M%S").to_string(),
                "RAND" => random_token(rng, RAND_LEN),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

pub fn apply_template(template: &str, index: u64, options: &TemplateOptions) -> String {
    apply_template_with(
        template,
        index,
        options,
        chrono::Local::now().naive_local(),
        &mut rand::thread_rng(),
    )
}

// ============================================================================
// Identity-column generation
// ============================================================================

/// Where a generated value is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Distance from the source row (1 for the first copy).
    pub offset: u64,
    /// Destination row index, used as the template row number.
    pub row_index: u64,
}

/// Derive a new SKU from `source` with the configured pattern, or the one
/// detected from `source` when none is configured.
pub fn next_sku<R: Rng + ?Sized>(
    source: &str,
    slot: Slot,
    explicit: Option<&PatternSpec>,
    now: NaiveDateTime,
    rng: &mut R,
) -> String {
    match explicit {
        Some(PatternSpec::Increment) => increment_value(source, slot.offset),
        Some(PatternSpec::Uuid { prefix }) => generate_short_uuid_with(rng, prefix.as_deref()),
        Some(PatternSpec::Template { template, start_from }) => apply_template_with(
            template,
            slot.row_index,
            &TemplateOptions { start_from: *start_from },
            now,
            rng,
        ),
        None => match detect_pattern(source) {
            PatternKind::Uuid => generate_short_uuid_with(rng, None),
            PatternKind::Increment => increment_value(source, slot.offset),
        },
    }
}

/// Derive a new barcode for fill-down.
pub fn next_barcode<R: Rng + ?Sized>(
    source: &str,
    offset: u64,
    mode: BarcodeFill,
    rng: &mut R,
) -> String {
    match mode {
        BarcodeFill::Increment => increment_value(source, offset),
        BarcodeFill::Uuid => generate_short_uuid_with(rng, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    fn is_token(s: &str, len: usize) -> bool {
        s.len() == len && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    #[test]
    fn increment_examples() {
        assert_eq!(increment_value("SKU-001", 1), "SKU-002");
        assert_eq!(increment_value("PROD-A-10", 1), "PROD-A-11");
        assert_eq!(increment_value("abc", 1), "abc-1");
        assert_eq!(increment_value("abc", 3), "abc-3");
    }

    #[test]
    fn increment_keeps_padding_and_grows_on_overflow() {
        assert_eq!(increment_value("SKU-009", 1), "SKU-010");
        assert_eq!(increment_value("SKU-099", 3), "SKU-102");
        assert_eq!(increment_value("SKU-999", 1), "SKU-1000");
        assert_eq!(increment_value("V_7", 12), "V_19");
        assert_eq!(increment_value("TEE10", 5), "TEE15");
    }

    #[test]
    fn increment_handles_long_digit_runs() {
        assert_eq!(
            increment_value("00000000000000000000000000000000000000000099", 1),
            "00000000000000000000000000000000000000000100"
        );
        assert_eq!(increment_value("4006381333931", 1), "4006381333932");
    }

    #[test]
    fn trailing_digit_split() {
        assert_eq!(split_trailing_digits("SKU-001"), Some(("SKU-", "001")));
        assert_eq!(split_trailing_digits("42"), Some(("", "42")));
        assert_eq!(split_trailing_digits("größe-3"), Some(("größe-", "3")));
        assert_eq!(split_trailing_digits("A1B"), None);
        assert_eq!(split_trailing_digits(""), None);
    }

    #[test]
    fn short_uuid_shape() {
        let mut rng = rng();
        for _ in 0..50 {
            assert!(is_token(&generate_short_uuid_with(&mut rng, None), 8));
        }
        let prefixed = generate_short_uuid_with(&mut rng, Some("X-"));
        assert!(prefixed.starts_with("X-"));
        assert!(is_token(&prefixed[2..], 8));
        assert!(is_token(&generate_short_uuid(None), 8));
    }

    #[test]
    fn template_number_padding() {
        let opts = TemplateOptions { start_from: 5 };
        assert_eq!(apply_template_with("SKU-{N}", 2, &opts, noon(), &mut rng()), "SKU-007");
        assert_eq!(apply_template("SKU-{N}", 2, &opts), "SKU-007");
        assert_eq!(
            apply_template_with("{num}", 1200, &opts, noon(), &mut rng()),
            "1205"
        );
    }

    #[test]
    fn template_number_saturates() {
        let opts = TemplateOptions { start_from: u64::MAX };
        assert_eq!(
            apply_template_with("SKU-{N}", 1, &opts, noon(), &mut rng()),
            format!("SKU-{}", u64::MAX)
        );
    }

    #[test]
    fn template_date_time_and_tokens() {
        let out = apply_template_with(
            "{DATE}-{time}-{Rand}-{UUID}",
            0,
            &TemplateOptions::default(),
            noon(),
            &mut rng(),
        );
        let parts: Vec<&str> = out.split('-').collect();
        assert_eq!(parts[0], "20260309");
        assert_eq!(parts[1], "140509");
        assert!(is_token(parts[2], 4));
        assert!(is_token(parts[3], 8));
    }

    #[test]
    fn template_leaves_unknown_braces() {
        let out = apply_template_with("{SIZE}-{N}", 0, &TemplateOptions::default(), noon(), &mut rng());
        assert_eq!(out, "{SIZE}-001");
    }

    #[test]
    fn detection() {
        assert_eq!(detect_pattern("ABCDEFGH"), PatternKind::Uuid);
        assert_eq!(detect_pattern("K3X9ZQWPLM"), PatternKind::Uuid);
        assert_eq!(detect_pattern("ABCDEFG1"), PatternKind::Increment);
        assert_eq!(detect_pattern("ABCDEFG"), PatternKind::Increment);
        assert_eq!(detect_pattern("abcdefgh"), PatternKind::Increment);
        assert_eq!(detect_pattern("SKU-001"), PatternKind::Increment);
    }

    #[test]
    fn next_sku_detects_per_value() {
        let slot = Slot { offset: 2, row_index: 9 };
        assert_eq!(next_sku("SKU-001", slot, None, noon(), &mut rng()), "SKU-003");
        let fresh = next_sku("ABCDEFGH", slot, None, noon(), &mut rng());
        assert!(is_token(&fresh, 8));
    }

    #[test]
    fn next_sku_honors_explicit_pattern() {
        let slot = Slot { offset: 1, row_index: 4 };
        let template = PatternSpec::Template { template: "TEE-{N}".into(), start_from: 10 };
        assert_eq!(next_sku("ignored", slot, Some(&template), noon(), &mut rng()), "TEE-014");

        let uuid = PatternSpec::Uuid { prefix: Some("V-".into()) };
        let out = next_sku("SKU-001", slot, Some(&uuid), noon(), &mut rng());
        assert!(out.starts_with("V-") && is_token(&out[2..], 8));

        assert_eq!(
            next_sku("ABCDEFGH", slot, Some(&PatternSpec::Increment), noon(), &mut rng()),
            "ABCDEFGH-1"
        );
    }

    #[test]
    fn barcode_modes() {
        assert_eq!(
            next_barcode("4006381333931", 2, BarcodeFill::Increment, &mut rng()),
            "4006381333933"
        );
        assert!(is_token(&next_barcode("4006381333931", 2, BarcodeFill::Uuid, &mut rng()), 8));
    }
}
