// Imports
use crate::WidgetFlags;

/// The camera of the viewport.
///
/// It is the sole converter between logical coordinates (geographic or planar units, depending on
/// the map base) and surface coordinates (pixels on the rendered viewport). Items only ever store
/// logical coordinates; the overlay projects them through the camera on every redraw, and pointer
/// positions travel the inverse direction.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The offset in surface coordinates.
    offset: na::Vector2<f64>,
    /// The dimensions in surface coordinates.
    size: na::Vector2<f64>,
    /// The camera zoom, origin at (0.0, 0.0).
    zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: na::Vector2::zeros(),
            size: na::vector![800.0, 600.0],
            zoom: Self::ZOOM_DEFAULT,
        }
    }
}

impl Camera {
    pub const ZOOM_MIN: f64 = 0.2;
    pub const ZOOM_MAX: f64 = 6.0;
    pub const ZOOM_DEFAULT: f64 = 1.0;

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        self
    }

    pub fn with_offset(mut self, offset: na::Vector2<f64>) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_size(mut self, size: na::Vector2<f64>) -> Self {
        self.size = size;
        self
    }

    /// The current viewport offset in surface coordinate space.
    pub fn offset(&self) -> na::Vector2<f64> {
        self.offset
    }

    pub fn set_offset(&mut self, offset: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.offset = offset;

        widget_flags.update_view = true;
        widget_flags.redraw = true;
        widget_flags
    }

    /// The current viewport size in surface coordinate space.
    pub fn size(&self) -> na::Vector2<f64> {
        self.size
    }

    pub fn set_size(&mut self, size: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.size = size;

        widget_flags.update_view = true;
        widget_flags.redraw = true;
        widget_flags
    }

    /// The camera zoom.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom, clamped to [[Self::ZOOM_MIN], [Self::ZOOM_MAX]].
    pub fn zoom_to(&mut self, zoom: f64) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);

        widget_flags.zoomed = true;
        widget_flags.redraw = true;
        widget_flags
    }

    /// The current viewport center in logical coordinate space.
    pub fn viewport_center(&self) -> na::Vector2<f64> {
        (self.offset + self.size * 0.5) / self.zoom
    }

    /// Set the viewport center.
    ///
    /// `center` must be in logical coordinate space.
    pub fn set_viewport_center(&mut self, center: na::Vector2<f64>) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.offset = center * self.zoom - self.size * 0.5;

        widget_flags.update_view = true;
        widget_flags.redraw = true;
        widget_flags
    }

    /// The transform from logical coords to surface coords.
    ///
    /// To get the inverse, call `.inverse()`.
    pub fn transform(&self) -> na::Affine2<f64> {
        na::try_convert(
            // LHS is applied onto RHS, so the order is scaling by zoom -> translation by offset
            na::Translation2::from(-self.offset).to_homogeneous()
                * na::Scale2::from(na::Vector2::from_element(self.zoom)).to_homogeneous(),
        )
        .unwrap()
    }

    /// Project a logical coordinate to its current surface position.
    pub fn project(&self, coord: na::Vector2<f64>) -> na::Vector2<f64> {
        coord * self.zoom - self.offset
    }

    /// Convert a surface position back to a logical coordinate.
    pub fn unproject(&self, pixel: na::Vector2<f64>) -> na::Vector2<f64> {
        (pixel + self.offset) / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transform_vec() {
        let offset = na::vector![4.0, 2.0];
        let zoom = 1.5;
        let camera = Camera::default().with_zoom(zoom).with_offset(offset);

        // Point in logical coordinates
        let p0 = na::point![10.0, 2.0];

        // first zoom, then translate
        assert_relative_eq!(
            camera.transform().transform_point(&p0).coords,
            (p0.coords * zoom) - offset
        );
        assert_relative_eq!(camera.project(p0.coords), (p0.coords * zoom) - offset);
    }

    #[test]
    fn project_unproject_roundtrip() {
        let camera = Camera::default()
            .with_zoom(2.5)
            .with_offset(na::vector![-120.0, 43.0]);

        let coord = na::vector![13.4, -52.1];
        assert_relative_eq!(camera.unproject(camera.project(coord)), coord);

        let pixel = na::vector![401.0, 224.5];
        assert_relative_eq!(camera.project(camera.unproject(pixel)), pixel);
    }

    #[test]
    fn viewport_center_roundtrip() {
        let mut camera = Camera::default()
            .with_zoom(2.0)
            .with_size(na::vector![640.0, 480.0]);

        let center = na::vector![31.0, -7.5];
        let _ = camera.set_viewport_center(center);
        assert_relative_eq!(camera.viewport_center(), center);
    }

    #[test]
    fn zoom_clamped() {
        let mut camera = Camera::default();
        let _ = camera.zoom_to(100.0);
        assert_relative_eq!(camera.zoom(), Camera::ZOOM_MAX);
        let _ = camera.zoom_to(0.0);
        assert_relative_eq!(camera.zoom(), Camera::ZOOM_MIN);
    }
}
