use uuid::Uuid;

/// Length of the canonical hyphenated key form.
pub const KEY_LEN: usize = 36;

/// Shape-only check for the 36-character hyphenated key form.
///
/// This exists so callers can decide which way to point a lookup; the store
/// itself never validates keys. Note that some grids hand out keys that are
/// not variant-4 compliant (a handful of "special" residents predate the
/// convention), so this deliberately accepts any hex digits in the variant
/// positions.
pub fn is_valid_key(input: &str) -> bool {
    input.len() == KEY_LEN && Uuid::try_parse(input).is_ok()
}
