use crate::error::{BufferError, Result};
use crate::model::{Dashboard, DashboardLayout, LayoutId, Widget, WidgetLayout};
use crate::payload::{WidgetPosition, WidgetSize};

/// Where a widget goes and what it looked like where it came from.
#[derive(Debug, Clone, Copy)]
pub struct PlacementRequest<'a> {
    pub state: &'a str,
    pub layout: LayoutId,
    pub original_columns: u32,
    pub original_size: WidgetSize,
    /// `None`, or a position with a negative coordinate, lets the placement pick the cell.
    pub position: Option<WidgetPosition>,
}

pub trait LayoutPlacement {
    /// Inserts `widget` into the dashboard and into the requested layout, in place.
    fn place(
        &self,
        dashboard: &mut Dashboard,
        widget: &Widget,
        request: &PlacementRequest<'_>,
    ) -> Result<()>;
}

/// Grid placement in the dashboard's column model.
///
/// The footprint is scaled by `target columns / original columns`, where both sides count
/// the columns of every layout in the state. Without an explicit cell the widget goes to
/// column 0 below the lowest widget of the layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct GridPlacement;

impl LayoutPlacement for GridPlacement {
    fn place(
        &self,
        dashboard: &mut Dashboard,
        widget: &Widget,
        request: &PlacementRequest<'_>,
    ) -> Result<()> {
        let state = dashboard
            .configuration
            .states
            .get_mut(request.state)
            .ok_or_else(|| BufferError::StateNotFound(request.state.to_string()))?;
        let target_columns = state.combined_columns(request.layout);
        let size = scale_size(request.original_size, request.original_columns, target_columns);

        let layout = state
            .layouts
            .get_mut(&request.layout)
            .ok_or_else(|| BufferError::LayoutNotFound {
                state: request.state.to_string(),
                layout: request.layout,
            })?;
        let (row, col) = match request.position.and_then(|p| p.cell()) {
            Some(cell) => cell,
            None => (next_free_row(layout), 0),
        };

        tracing::debug!(
            widget = %widget.id,
            state = request.state,
            layout = %request.layout,
            row,
            col,
            size_x = size.size_x,
            size_y = size.size_y,
            "Placing widget"
        );
        layout.widgets.insert(
            widget.id.clone(),
            WidgetLayout {
                size_x: size.size_x,
                size_y: size.size_y,
                row: Some(row),
                col: Some(col),
                ..Default::default()
            },
        );
        dashboard
            .configuration
            .widgets
            .insert(widget.id.clone(), widget.clone());
        Ok(())
    }
}

fn scale_size(size: WidgetSize, original_columns: u32, target_columns: u32) -> WidgetSize {
    if original_columns == 0 || original_columns == target_columns {
        return size;
    }
    let ratio = f64::from(target_columns) / f64::from(original_columns);
    let scale = |value: u32| ((f64::from(value) * ratio).round() as u32).max(1);
    WidgetSize {
        size_x: scale(size.size_x),
        size_y: scale(size.size_y),
    }
}

fn next_free_row(layout: &DashboardLayout) -> u32 {
    layout
        .widgets
        .values()
        .map(|w| w.row.unwrap_or(0).saturating_add(w.size_y))
        .max()
        .unwrap_or(0)
}
