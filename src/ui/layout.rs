pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 18;
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the current-conditions panel; detail cards need room for three
/// lines plus borders.
#[must_use]
pub fn current_height(total: u16) -> u16 {
    match total {
        0..=23 => 8,
        24..=35 => 10,
        _ => 12,
    }
}

/// Detail cards side by side when wide enough, otherwise one summary line.
#[must_use]
pub fn cards_side_by_side(width: u16) -> bool {
    width >= 54
}
