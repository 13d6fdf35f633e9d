//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI output
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for a `rows` x `cols` pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows = rows, cols = cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_feed(&viewmodel, &state.theme, cols, rows);
}
