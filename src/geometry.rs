//! Logical-to-physical coordinate mapping
//!
//! Everything above this module draws on a 320x240 landscape canvas. The
//! panel itself is a 240x320 portrait device, so each logical pixel is
//! rotated 90° clockwise before it is written:
//!
//! ```text
//! x_physical = y_logical
//! y_physical = PHYSICAL_HEIGHT - 1 - x_logical
//! ```

pub const LOGICAL_WIDTH: i32 = 320;
pub const LOGICAL_HEIGHT: i32 = 240;
pub const PHYSICAL_WIDTH: u16 = 240;
pub const PHYSICAL_HEIGHT: u16 = 320;

/// Whether a logical coordinate lies on the landscape canvas.
pub fn in_logical_bounds(x: i32, y: i32) -> bool {
    (0..LOGICAL_WIDTH).contains(&x) && (0..LOGICAL_HEIGHT).contains(&y)
}

/// Map a logical coordinate onto a physical panel of the given size.
///
/// Returns `None` when the point falls off either canvas; callers treat that
/// as a silent no-op.
pub fn to_physical_on(x: i32, y: i32, width: u16, height: u16) -> Option<(u16, u16)> {
    if !in_logical_bounds(x, y) {
        return None;
    }
    let x_phys = y;
    let y_phys = i32::from(height) - 1 - x;
    if x_phys < 0 || y_phys < 0 || x_phys >= i32::from(width) || y_phys >= i32::from(height) {
        return None;
    }
    Some((x_phys as u16, y_phys as u16))
}

/// Map a logical coordinate onto the standard 240x320 panel.
pub fn to_physical(x: i32, y: i32) -> Option<(u16, u16)> {
    to_physical_on(x, y, PHYSICAL_WIDTH, PHYSICAL_HEIGHT)
}

/// Inverse of [`to_physical_on`] for a panel `height` pixels tall.
pub fn to_logical_on(x_phys: u16, y_phys: u16, height: u16) -> (i32, i32) {
    (
        i32::from(height) - 1 - i32::from(y_phys),
        i32::from(x_phys),
    )
}

/// Inverse of [`to_physical`].
pub fn to_logical(x_phys: u16, y_phys: u16) -> (i32, i32) {
    to_logical_on(x_phys, y_phys, PHYSICAL_HEIGHT)
}
