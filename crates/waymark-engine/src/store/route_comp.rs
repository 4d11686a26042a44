// Imports
use super::AnnotationStore;
use crate::WidgetFlags;
use crate::items::Route;
use std::sync::Arc;
use tracing::debug;

/// Systems that are related to finished routes and the in-progress route buffer.
impl AnnotationStore {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The points of the in-progress route.
    pub fn current_route(&self) -> &[na::Vector2<f64>] {
        &self.current_route
    }

    /// Insert a finished route.
    ///
    /// Routes with fewer than [Route::MIN_POINTS] points are discarded as a silent no-op, the same
    /// guard the finish path applies.
    pub fn insert_route(&mut self, route: Route) -> WidgetFlags {
        if route.points.len() < Route::MIN_POINTS {
            debug!(
                "Not inserting route with fewer than {} points.",
                Route::MIN_POINTS
            );
            return WidgetFlags::default();
        }

        let mut widget_flags = self.save_checkpoint();
        Arc::make_mut(&mut self.routes).push(route);

        widget_flags.redraw = true;
        widget_flags.store_modified = true;
        widget_flags
    }

    /// Append a point to the in-progress route. Not history-tracked.
    pub fn add_to_current_route(&mut self, point: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.current_route.push(point);

        widget_flags.redraw = true;
        widget_flags
    }

    /// Finish the in-progress route.
    ///
    /// With more than one buffered point this materializes a route with a freshly generated id and
    /// records one history entry. With one or zero points the buffer is discarded without touching
    /// the document or the history.
    pub fn finish_current_route(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        widget_flags.redraw = true;

        if self.current_route.len() < Route::MIN_POINTS {
            if !self.current_route.is_empty() {
                debug!("Discarding in-progress route with a single point.");
            }
            self.current_route.clear();
            return widget_flags;
        }

        let points = std::mem::take(&mut self.current_route);
        widget_flags | self.insert_route(Route::new(points))
    }

    /// Discard the in-progress route. Not history-tracked.
    pub fn clear_current_route(&mut self) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.current_route.clear();

        widget_flags.redraw = true;
        widget_flags
    }
}
