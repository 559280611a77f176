//! Nearest-sample intersection search between constraint requirements.
//!
//! Both searches work on the discrete sweep, so the reported wing loading is accurate to
//! within one sweep step of the true crossing.

use serde::Serialize;

use crate::sweep::nearest_index;

/// Joint design point of two requirements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignPoint {
    /// Wing loading (kg/m²).
    pub wing_loading: f64,
    /// Power loading (W/kg).
    pub power_loading: f64,
    /// Sweep index the power loading was read at.
    pub sweep_index: usize,
}

/// Sample where two curves on the same sweep come closest; reports the midpoint power
/// loading there. The first index wins on ties.
///
/// `None` when the sweep is empty or either curve has a different length.
pub fn intersect_curves(
    wing_loading: &[f64],
    first: &[f64],
    second: &[f64],
) -> Option<DesignPoint> {
    if wing_loading.is_empty()
        || first.len() != wing_loading.len()
        || second.len() != wing_loading.len()
    {
        return None;
    }

    let mut index = 0;
    let mut best_gap = f64::INFINITY;
    for (i, (a, b)) in first.iter().zip(second).enumerate() {
        let gap = (a - b).abs();
        if gap < best_gap {
            index = i;
            best_gap = gap;
        }
    }

    Some(DesignPoint {
        wing_loading: wing_loading[index],
        power_loading: 0.5 * (first[index] + second[index]),
        sweep_index: index,
    })
}

/// Pair a scalar wing-loading limit with a curve: the curve is read at the sample nearest
/// the limit, while the reported wing loading is the limit itself.
///
/// `None` when the sweep is empty or the curve has a different length.
pub fn snap_to_limit(wing_loading: &[f64], curve: &[f64], limit: f64) -> Option<DesignPoint> {
    if wing_loading.is_empty() || curve.len() != wing_loading.len() {
        return None;
    }
    let index = nearest_index(wing_loading, limit);
    Some(DesignPoint {
        wing_loading: limit,
        power_loading: curve[index],
        sweep_index: index,
    })
}
