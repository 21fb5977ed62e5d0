pub const COMPLETED: &str = "Fait";

pub const REFUSED_COLOR: &str = "#ef4444";
pub const ABSENT_COLOR: &str = "#f97316";
pub const NOT_NEEDED_COLOR: &str = "#6b7280";
pub const POSTPONED_COLOR: &str = "#eab308";

const PALETTE: [&str; 4] = ["#8b5cf6", "#ec4899", "#10b981", "#3b82f6"];

/// Deterministic color for a status label.
///
/// Known outcomes get fixed colors; anything else is hashed onto a four-color palette.
pub fn status_color(status: &str) -> &'static str {
    let lower = status.to_lowercase();
    if lower.contains("refus") {
        return REFUSED_COLOR;
    }
    if lower.contains("absent") {
        return ABSENT_COLOR;
    }
    if lower.contains("non nécessaire") {
        return NOT_NEEDED_COLOR;
    }
    if lower.contains("report") {
        return POSTPONED_COLOR;
    }
    if status.is_empty() {
        return PALETTE[0];
    }
    PALETTE[palette_index(status)]
}

// h = c + ((int32(h) << 5) - h) over UTF-16 units; h stays an f64 and may leave i32 range.
fn palette_index(status: &str) -> usize {
    let mut hash = 0f64;
    for unit in status.encode_utf16() {
        let shifted = to_int32(hash).wrapping_shl(5) as f64;
        hash = f64::from(unit) + (shifted - hash);
    }
    (hash.abs() % PALETTE.len() as f64) as usize
}

fn to_int32(value: f64) -> i32 {
    // The hash stays far below 2^53, so truncation to i64 is exact before wrapping.
    value.trunc() as i64 as i32
}

pub fn is_completed(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case(COMPLETED)
}

pub fn is_refusal(status: &str) -> bool {
    status.to_lowercase().contains("refus")
}

pub fn is_tablet(source: &str) -> bool {
    source.to_lowercase().contains("tablette")
}
