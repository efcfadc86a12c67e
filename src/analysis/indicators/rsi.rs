// Relative Strength Index with Wilder smoothing.
//
// Up/down moves are smoothed with an EMA of alpha = 1/window seeded at the
// first row (whose move counts as 0). Output starts at index window-1.

use {
    super::ema::{ema, wilder_alpha},
    crate::config::RsiParams,
};

pub fn rsi(closes: &[f64], params: &RsiParams) -> Vec<Option<f64>> {
    if params.window == 0 {
        return vec![None; closes.len()];
    }

    let mut ups = Vec::with_capacity(closes.len());
    let mut downs = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        let delta = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        ups.push(Some(delta.max(0.0)));
        downs.push(Some((-delta).max(0.0)));
    }

    let alpha = wilder_alpha(params.window);
    let avg_up = ema(&ups, alpha, params.window);
    let avg_down = ema(&downs, alpha, params.window);

    avg_up
        .iter()
        .zip(&avg_down)
        .map(|(up, down)| {
            let (up, down) = ((*up)?, (*down)?);
            if down == 0.0 {
                return Some(100.0);
            }
            let value = 100.0 - 100.0 / (1.0 + up / down);
            value.is_finite().then_some(value)
        })
        .collect()
}
