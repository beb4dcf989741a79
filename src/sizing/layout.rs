use serde::Serialize;
use tracing::{debug, warn};

use super::array::ArrayConfiguration;

/// How the project's panels are split into equal-length strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringLayout {
    /// Panels in each string.
    pub series_per_string: u32,
    /// Strings connected in parallel.
    pub parallel_strings: u32,
    /// Panels actually wired, `series_per_string * parallel_strings`.
    pub wired_panels: u32,
    /// Every panel is wired within the array's series and parallel bounds.
    pub fits: bool,
}

/// Splits `panel_count` panels into strings of `min_series..=max_series`
/// panels with at most `max_parallel` strings.
///
/// Picks the layout wiring the most panels, then the fewest strings. When
/// no layout wires all of them `fits` is false and the result is the
/// largest partial layout, or all zeros if not even one string can be built.
pub fn compute_string_layout(panel_count: u32, array: &ArrayConfiguration) -> StringLayout {
    let min_series = array.min_series.max(1);
    let max_strings = array.max_parallel.min(panel_count);

    let mut best = StringLayout {
        series_per_string: 0,
        parallel_strings: 0,
        wired_panels: 0,
        fits: false,
    };
    for parallel in 1..=max_strings {
        let series = array.max_series.min(panel_count / parallel);
        if series < min_series {
            continue;
        }
        let wired = series * parallel;
        if wired > best.wired_panels {
            best = StringLayout {
                series_per_string: series,
                parallel_strings: parallel,
                wired_panels: wired,
                fits: false,
            };
        }
        if wired == panel_count {
            break;
        }
    }
    best.fits = panel_count > 0 && best.wired_panels == panel_count;

    debug!(?best, panel_count, "string layout");
    if !best.fits {
        warn!(
            panel_count,
            wired = best.wired_panels,
            "panels cannot all be wired within the series and parallel bounds"
        );
    }
    best
}
