//! Pure dimension math for image normalization.
//!
//! Nothing in here touches pixels or the filesystem.

/// Shrink `source` so it fits inside `bounds` while keeping its aspect ratio.
///
/// Never upscales: a source that already fits on both axes is returned as is.
/// The constrained axis takes the bound exactly; the free axis is rounded to
/// whichever of floor/ceil keeps the aspect ratio closest to the source, and
/// never drops below one pixel.
///
/// ```
/// # use vitrine::imaging::fit_within;
/// assert_eq!(fit_within((900, 600), (300, 300)), (300, 200));
/// assert_eq!(fit_within((200, 200), (450, 350)), (200, 200));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 || (src_w <= max_w && src_h <= max_h) {
        return source;
    }

    let aspect = src_w as f64 / src_h as f64;
    let max_w_f = max_w as f64;
    let max_h_f = max_h as f64;

    if max_w_f / max_h_f >= aspect {
        // Height-bound
        let w = round_aspect(max_h_f * aspect, |n| (aspect - n / max_h_f).abs());
        (w, max_h)
    } else {
        // Width-bound
        let h = round_aspect(max_w_f / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - max_w_f / n).abs()
            }
        });
        (max_w, h)
    }
}

fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = value.floor();
    let ceil = value.ceil();
    // ties go to floor
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// Top-left offset that centers `inner` on `canvas`, using floor division.
///
/// Odd leftover space puts the extra pixel on the right/bottom side.
pub fn centered_offset(canvas: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(inner.0) / 2,
        canvas.1.saturating_sub(inner.1) / 2,
    )
}
