// Modules
pub mod snapshot;

// Re-exports
pub use snapshot::MapSnapshot;
pub use snapshot::ViewSettings;

// Imports
use crate::document::Document;
use crate::gateway::{GatewayError, MapGateway, MapRecord, NewMapRecord};
use crate::items::{ItemKind, Label, LabelUpdate, Marker, MarkerKind, MarkerUpdate, Route};
use crate::items::{SCALE_MAX, SCALE_MIN};
use crate::store::AnnotationStore;
use crate::tools::{ToolHolder, ToolStyle, ToolsConfig};
use crate::{Camera, WidgetFlags};
use futures::channel::oneshot;
use tracing::error;
use waymark_compose::Color;
use waymark_compose::eventresult::EventPropagation;
use waymark_compose::pointerevent::{KeyboardKey, PointerEvent};

/// An immutable view into the engine, excluding the toolholder.
#[derive(Debug)]
pub struct EngineView<'a> {
    pub tools_config: &'a ToolsConfig,
    pub document: &'a Document,
    pub store: &'a AnnotationStore,
    pub camera: &'a Camera,
}

/// A mutable view into the engine, excluding the toolholder.
#[derive(Debug)]
pub struct EngineViewMut<'a> {
    pub tools_config: &'a mut ToolsConfig,
    pub document: &'a mut Document,
    pub store: &'a mut AnnotationStore,
    pub camera: &'a mut Camera,
}

impl EngineViewMut<'_> {
    // Converts itself to the immutable view.
    pub(crate) fn as_im<'m>(&'m self) -> EngineView<'m> {
        EngineView::<'m> {
            tools_config: self.tools_config,
            document: self.document,
            store: self.store,
            camera: self.camera,
        }
    }
}

/// The engine: the complete editing session of one map.
///
/// It owns the document settings, the annotation store with its history, the camera and the tools,
/// and is driven synchronously by the embedding viewport's events. Every state-changing call
/// returns [WidgetFlags] telling the embedder what to refresh.
#[derive(Debug)]
pub struct Engine {
    pub document: Document,
    pub store: AnnotationStore,
    pub camera: Camera,
    pub tools_config: ToolsConfig,
    pub toolholder: ToolHolder,

    /// Whether the chrome-less preview is active. Escape leaves it.
    preview_active: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            document: Document::default(),
            store: AnnotationStore::default(),
            camera: Camera::default(),
            tools_config: ToolsConfig::default(),
            toolholder: ToolHolder::default(),

            preview_active: false,
        }
    }
}

impl Engine {
    /// The increment of one inline-editor size step.
    pub const SIZE_STEP: f64 = 0.1;

    #[allow(unused)]
    pub(crate) fn view(&self) -> EngineView {
        EngineView {
            tools_config: &self.tools_config,
            document: &self.document,
            store: &self.store,
            camera: &self.camera,
        }
    }

    #[allow(unused)]
    pub(crate) fn view_mut(&mut self) -> EngineViewMut {
        EngineViewMut {
            tools_config: &mut self.tools_config,
            document: &mut self.document,
            store: &mut self.store,
            camera: &mut self.camera,
        }
    }

    /// Handle a pointer event coming from the embedding viewport.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> (EventPropagation, WidgetFlags) {
        if self.preview_active {
            if let PointerEvent::KeyPressed {
                keyboard_key: KeyboardKey::Escape,
                ..
            } = &event
            {
                return (EventPropagation::Stop, self.set_preview_active(false));
            }
        }

        let mut engine_view = EngineViewMut {
            tools_config: &mut self.tools_config,
            document: &mut self.document,
            store: &mut self.store,
            camera: &mut self.camera,
        };
        self.toolholder.handle_pointer_event(event, &mut engine_view)
    }

    /// The current tool style.
    pub fn tool_style(&self) -> ToolStyle {
        self.toolholder.style()
    }

    /// Change the active tool.
    pub fn change_tool_style(&mut self, style: ToolStyle) -> WidgetFlags {
        let mut engine_view = EngineViewMut {
            tools_config: &mut self.tools_config,
            document: &mut self.document,
            store: &mut self.store,
            camera: &mut self.camera,
        };
        self.toolholder.change_style(style, &mut engine_view)
    }

    /// Arm the marker tool with the given kind. The next viewport click places one such marker.
    pub fn select_marker_tool(&mut self, kind: MarkerKind) -> WidgetFlags {
        self.tools_config.marker_tool.kind = kind;
        self.change_tool_style(ToolStyle::Marker)
    }

    /// Finish the in-progress route and return to the select tool (the toolbar's "Done").
    pub fn finish_current_route(&mut self) -> WidgetFlags {
        self.store.finish_current_route() | self.change_tool_style(ToolStyle::Select)
    }

    /// Undo the latest changes.
    pub fn undo(&mut self) -> WidgetFlags {
        self.store.undo()
    }

    /// Redo the latest changes.
    pub fn redo(&mut self) -> WidgetFlags {
        self.store.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Empty the document as one undoable step.
    pub fn clear_all(&mut self) -> WidgetFlags {
        self.store.clear_all()
    }

    /// Mirror a view change (pan/zoom) of the embedding viewport into the camera.
    ///
    /// No document mutation; the returned redraw makes the overlay re-project every item.
    pub fn sync_view(&mut self, center: na::Vector2<f64>, zoom: f64) -> WidgetFlags {
        self.camera.zoom_to(zoom) | self.camera.set_viewport_center(center)
    }

    /// Mirror a resize of the rendered surface into the camera.
    pub fn set_surface_size(&mut self, size: na::Vector2<f64>) -> WidgetFlags {
        self.camera.set_size(size)
    }

    /// Set the color of the selected item. One of the swatches of
    /// [waymark_compose::color::SWATCHES] in the stock UI.
    pub fn change_selected_color(&mut self, color: Color) -> WidgetFlags {
        let Some(item) = self.store.selection().cloned() else {
            return WidgetFlags::default();
        };

        match item.kind {
            ItemKind::Marker => self.store.update_marker(
                &item.id,
                MarkerUpdate {
                    color: Some(color),
                    ..Default::default()
                },
            ),
            ItemKind::Label => self.store.update_label(
                &item.id,
                LabelUpdate {
                    color: Some(color),
                    ..Default::default()
                },
            ),
        }
    }

    /// Adjust the scale of the selected item by the given delta, clamped to
    /// [[SCALE_MIN], [SCALE_MAX]].
    pub fn nudge_selected_size(&mut self, delta: f64) -> WidgetFlags {
        let Some(item) = self.store.selection().cloned() else {
            return WidgetFlags::default();
        };

        match item.kind {
            ItemKind::Marker => {
                let Some(size) = self.store.marker(&item.id).map(|marker| marker.size) else {
                    return WidgetFlags::default();
                };
                self.store.update_marker(
                    &item.id,
                    MarkerUpdate {
                        size: Some((size + delta).clamp(SCALE_MIN, SCALE_MAX)),
                        ..Default::default()
                    },
                )
            }
            ItemKind::Label => {
                let Some(size) = self.store.label(&item.id).map(|label| label.size) else {
                    return WidgetFlags::default();
                };
                self.store.update_label(
                    &item.id,
                    LabelUpdate {
                        size: Some((size + delta).clamp(SCALE_MIN, SCALE_MAX)),
                        ..Default::default()
                    },
                )
            }
        }
    }

    /// Set the text of the selected item (the marker caption, or the label text).
    pub fn set_selected_text(&mut self, text: impl Into<String>) -> WidgetFlags {
        let Some(item) = self.store.selection().cloned() else {
            return WidgetFlags::default();
        };

        match item.kind {
            ItemKind::Marker => self.store.update_marker(
                &item.id,
                MarkerUpdate {
                    text: Some(text.into()),
                    ..Default::default()
                },
            ),
            ItemKind::Label => self.store.update_label(
                &item.id,
                LabelUpdate {
                    text: Some(text.into()),
                    ..Default::default()
                },
            ),
        }
    }

    /// Delete the selected item. Clears the selection as a side effect of the deletion.
    pub fn delete_selected(&mut self) -> WidgetFlags {
        let Some(item) = self.store.selection().cloned() else {
            return WidgetFlags::default();
        };
        self.store.delete_item(&item)
    }

    /// Set the canvas background color. View state, not history-tracked.
    pub fn set_background_color(&mut self, color: Color) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        self.document.background.color = color;
        widget_flags.redraw = true;
        widget_flags
    }

    pub fn preview_active(&self) -> bool {
        self.preview_active
    }

    pub fn set_preview_active(&mut self, active: bool) -> WidgetFlags {
        let mut widget_flags = WidgetFlags::default();
        if self.preview_active != active {
            self.preview_active = active;
            widget_flags.refresh_ui = true;
        }
        widget_flags
    }

    /// Serialize the current map into a new record and hand it to the gateway.
    ///
    /// Routes, markers, labels and view settings become independent flat JSON text blobs. Faults
    /// are caught at this boundary, logged, and surfaced as [GatewayError] values; a failing save
    /// never touches in-memory state.
    pub fn save_map(
        &self,
        gateway: &mut dyn MapGateway,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<oneshot::Receiver<Result<String, GatewayError>>, GatewayError> {
        let ser_err = |e: serde_json::Error| {
            error!("Serializing map data for saving failed, Err: {e:?}");
            GatewayError::from(e)
        };

        let snapshot = self.take_snapshot();
        let record = NewMapRecord {
            user_id: user_id.into(),
            name: name.into(),
            route_data: serde_json::to_string(&snapshot.routes).map_err(ser_err)?,
            marker_data: serde_json::to_string(&snapshot.markers).map_err(ser_err)?,
            label_data: serde_json::to_string(&snapshot.labels).map_err(ser_err)?,
            settings_data: serde_json::to_string(&snapshot.view).map_err(ser_err)?,
        };

        Ok(gateway.create_map(record))
    }

    /// Import a fetched map record, replacing the current document, view and history.
    ///
    /// All blobs are parsed before anything is imported, so a corrupt record leaves the current
    /// state untouched.
    pub fn load_map_record(&mut self, record: MapRecord) -> Result<WidgetFlags, GatewayError> {
        let de_err = |e: serde_json::Error| {
            error!("Parsing a fetched map record failed, Err: {e:?}");
            GatewayError::from(e)
        };

        let routes: Vec<Route> = serde_json::from_str(&record.route_data).map_err(de_err)?;
        let markers: Vec<Marker> = serde_json::from_str(&record.marker_data).map_err(de_err)?;
        let labels: Vec<Label> = serde_json::from_str(&record.label_data).map_err(de_err)?;
        let view: ViewSettings = serde_json::from_str(&record.settings_data).map_err(de_err)?;

        Ok(self.load_snapshot(MapSnapshot {
            name: record.name,
            routes,
            markers,
            labels,
            view,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;
    use waymark_compose::pointerevent::ModifierKey;

    fn down(position: na::Vector2<f64>) -> PointerEvent {
        PointerEvent::Down {
            position,
            modifier_keys: HashSet::<ModifierKey>::new(),
        }
    }

    fn key(keyboard_key: KeyboardKey) -> PointerEvent {
        PointerEvent::KeyPressed {
            keyboard_key,
            modifier_keys: HashSet::new(),
        }
    }

    #[test]
    fn marker_tool_is_single_shot() {
        let mut engine = Engine::default();

        let _ = engine.select_marker_tool(MarkerKind::School);
        assert_eq!(engine.tool_style(), ToolStyle::Marker);

        let position = na::vector![120.0, 80.0];
        let _ = engine.handle_pointer_event(PointerEvent::Click { position });

        // one click places one marker, then the mode reverts
        assert_eq!(engine.tool_style(), ToolStyle::Select);
        assert_eq!(engine.store.markers().len(), 1);

        let marker = &engine.store.markers()[0];
        assert_eq!(marker.kind, MarkerKind::School);
        assert_relative_eq!(marker.position, engine.camera.unproject(position));

        // a second click in select mode places nothing
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![300.0, 300.0],
        });
        assert_eq!(engine.store.markers().len(), 1);
    }

    #[test]
    fn label_placement_selects_the_new_label() {
        let mut engine = Engine::default();

        let _ = engine.change_tool_style(ToolStyle::Label);
        let (_, widget_flags) = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![40.0, 40.0],
        });

        assert_eq!(engine.tool_style(), ToolStyle::Select);
        assert_eq!(engine.store.labels().len(), 1);
        assert_eq!(engine.store.labels()[0].text, "Text");
        assert_eq!(
            engine.store.selection().map(|sel| sel.id.as_str()),
            Some(engine.store.labels()[0].id.as_str())
        );
        assert_eq!(widget_flags.focus_text_input, Some(true));
    }

    #[test]
    fn route_clicks_append_and_double_click_finishes() {
        let mut engine = Engine::default();

        let _ = engine.change_tool_style(ToolStyle::Route);
        for position in [
            na::vector![0.0, 0.0],
            na::vector![50.0, 10.0],
            na::vector![90.0, 60.0],
        ] {
            let _ = engine.handle_pointer_event(PointerEvent::Click { position });
        }
        assert_eq!(engine.store.current_route().len(), 3);
        assert!(engine.store.routes().is_empty());

        let _ = engine.handle_pointer_event(PointerEvent::DoubleClick {
            position: na::vector![90.0, 60.0],
        });

        assert_eq!(engine.tool_style(), ToolStyle::Select);
        assert_eq!(engine.store.routes().len(), 1);
        assert_eq!(engine.store.routes()[0].points.len(), 3);
        assert!(engine.store.current_route().is_empty());
    }

    #[test]
    fn switching_tools_keeps_the_route_preview() {
        let mut engine = Engine::default();

        let _ = engine.change_tool_style(ToolStyle::Route);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![10.0, 10.0],
        });
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![20.0, 10.0],
        });

        let _ = engine.change_tool_style(ToolStyle::Select);
        assert_eq!(engine.store.current_route().len(), 2);
    }

    #[test]
    fn escape_discards_the_route_preview() {
        let mut engine = Engine::default();

        let _ = engine.change_tool_style(ToolStyle::Route);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![10.0, 10.0],
        });
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![20.0, 10.0],
        });

        let _ = engine.handle_pointer_event(key(KeyboardKey::Escape));

        assert_eq!(engine.tool_style(), ToolStyle::Select);
        assert!(engine.store.current_route().is_empty());
        assert!(engine.store.routes().is_empty());
        assert!(!engine.store.can_undo());
    }

    #[test]
    fn dragging_records_one_entry_and_suppresses_the_click() {
        let mut engine = Engine::default();

        let _ = engine.select_marker_tool(MarkerKind::Default);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![100.0, 100.0],
        });
        assert_eq!(engine.store.undo_depth(), 1);

        let anchor = engine.camera.project(engine.store.markers()[0].position);
        let (_, widget_flags) = engine.handle_pointer_event(down(anchor));
        assert_eq!(widget_flags.enable_view_pan, Some(false));
        assert!(engine.store.selection().is_some());

        for i in 1..=30 {
            let _ = engine.handle_pointer_event(PointerEvent::Move {
                position: anchor + na::vector![f64::from(i), 0.0],
            });
        }
        let (_, widget_flags) = engine.handle_pointer_event(PointerEvent::Up {
            position: anchor + na::vector![30.0, 0.0],
        });
        assert_eq!(widget_flags.enable_view_pan, Some(true));

        // the whole gesture is one history entry
        assert_eq!(engine.store.undo_depth(), 2);
        assert_relative_eq!(
            engine.store.markers()[0].position,
            engine.camera.unproject(anchor + na::vector![30.0, 0.0])
        );

        // the synthesized click after the release must not clear the fresh selection
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: anchor + na::vector![30.0, 0.0],
        });
        assert!(engine.store.selection().is_some());

        // but a later background click does
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![500.0, 500.0],
        });
        assert!(engine.store.selection().is_none());

        let _ = engine.undo();
        assert_relative_eq!(
            engine.store.markers()[0].position,
            engine.camera.unproject(na::vector![100.0, 100.0])
        );
    }

    #[test]
    fn delete_key_removes_the_selected_item() {
        let mut engine = Engine::default();

        let _ = engine.select_marker_tool(MarkerKind::Cafe);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![60.0, 60.0],
        });

        let anchor = engine.camera.project(engine.store.markers()[0].position);
        let _ = engine.handle_pointer_event(down(anchor));
        let _ = engine.handle_pointer_event(PointerEvent::Up { position: anchor });
        let _ = engine.handle_pointer_event(PointerEvent::Click { position: anchor });
        assert!(engine.store.selection().is_some());

        let _ = engine.handle_pointer_event(key(KeyboardKey::Delete));
        assert!(engine.store.markers().is_empty());
        assert!(engine.store.selection().is_none());
    }

    #[test]
    fn inline_editor_clamps_the_size() {
        let mut engine = Engine::default();

        let _ = engine.select_marker_tool(MarkerKind::Park);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![10.0, 10.0],
        });
        let marker_id = engine.store.markers()[0].id.clone();
        let _ = engine
            .store
            .set_selection(Some(crate::items::ItemRef::marker(marker_id.clone())));

        for _ in 0..40 {
            let _ = engine.nudge_selected_size(Engine::SIZE_STEP);
        }
        assert_relative_eq!(engine.store.marker(&marker_id).unwrap().size, SCALE_MAX);

        for _ in 0..80 {
            let _ = engine.nudge_selected_size(-Engine::SIZE_STEP);
        }
        assert_relative_eq!(engine.store.marker(&marker_id).unwrap().size, SCALE_MIN);
    }

    #[test]
    fn inline_editor_edits_the_selected_label() {
        let mut engine = Engine::default();

        let _ = engine.change_tool_style(ToolStyle::Label);
        let _ = engine.handle_pointer_event(PointerEvent::Click {
            position: na::vector![25.0, 25.0],
        });

        // the fresh label is already selected
        let _ = engine.set_selected_text("Ferry terminal");
        let _ = engine.change_selected_color(waymark_compose::color::SWATCH_GREEN);

        let label = &engine.store.labels()[0];
        assert_eq!(label.text, "Ferry terminal");
        assert_eq!(label.color, waymark_compose::color::SWATCH_GREEN);

        // text and color edits are individually undoable
        let _ = engine.undo();
        assert_eq!(engine.store.labels()[0].color, Color::BLACK);
        let _ = engine.undo();
        assert_eq!(engine.store.labels()[0].text, "Text");

        let _ = engine.delete_selected();
        assert!(engine.store.labels().is_empty());
        assert!(engine.store.selection().is_none());
    }

    #[test]
    fn preview_mode_consumes_escape() {
        let mut engine = Engine::default();

        let _ = engine.set_preview_active(true);
        let (propagation, widget_flags) = engine.handle_pointer_event(key(KeyboardKey::Escape));

        assert!(!engine.preview_active());
        assert_eq!(propagation, EventPropagation::Stop);
        assert!(widget_flags.refresh_ui);
    }
}
