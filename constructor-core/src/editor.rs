//! Interaction state machine for the constructor canvas.
//!
//! Direct manipulation runs through a single [`EditorMode`] enum, so the
//! "at most one active mode" invariant is structural: the editor is either
//! idle, dragging one element, resizing one element, or inline-editing one
//! element - never two of those at once.

use crate::event::{TouchInput, TouchPhase};
use crate::geometry::{self, Point, MAX_ZOOM, MIN_ZOOM};
use crate::{ConstructorError, ConstructorResult, ElementId, ElementKind, Scene};

/// Captured state at the moment a resize gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    /// Pointer position at press time, canvas space.
    pub pointer: Point,
    /// Element width at press time.
    pub width: f32,
    /// Element height at press time.
    pub height: f32,
    /// Font size at press time (text-capable elements).
    pub font_size: f32,
}

/// The mutually exclusive interaction modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorMode {
    /// Nothing in flight.
    Idle,
    /// An element follows the pointer.
    Dragging {
        /// The element being dragged.
        id: ElementId,
        /// Offset from the element origin to the grab point.
        grab_offset: Point,
    },
    /// The resize handle is being dragged.
    Resizing {
        /// The element being resized.
        id: ElementId,
        /// Geometry captured at press time.
        start: ResizeStart,
    },
    /// An in-place text editor is open on the element.
    InlineEditing {
        /// The element being edited.
        id: ElementId,
    },
}

/// Outcome of toggling screen mode on an image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenModeChange {
    /// The toggle took effect immediately.
    Applied,
    /// Enabling requires the compositing filter to run first; call
    /// [`Editor::commit_processed`] with the filter output to finish.
    NeedsProcessing,
}

/// Book-keeping for an in-flight two-finger gesture.
#[derive(Debug, Clone, Copy)]
struct PinchState {
    start_distance: f32,
    start_zoom: f32,
    last_centroid: Point,
}

/// The constructor editor: a scene plus interaction state.
#[derive(Debug)]
pub struct Editor {
    /// The scene being edited.
    pub scene: Scene,
    mode: EditorMode,
    selected: Option<ElementId>,
    rotate_mode: bool,
    pinch: Option<PinchState>,
}

impl Editor {
    /// Wrap a scene for editing.
    #[must_use]
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            mode: EditorMode::Idle,
            selected: None,
            rotate_mode: false,
            pinch: None,
        }
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Currently selected element, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Whether the resize handle currently rotates instead of resizing.
    #[must_use]
    pub fn rotate_mode(&self) -> bool {
        self.rotate_mode
    }

    /// Whether an inline text edit is open.
    #[must_use]
    pub fn is_inline_editing(&self) -> bool {
        matches!(self.mode, EditorMode::InlineEditing { .. })
    }

    /// Consume the editor, yielding the scene.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select an element. An open inline edit on another element is
    /// committed first.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn select(&mut self, id: ElementId) -> ConstructorResult<()> {
        if self.scene.element(id).is_none() {
            return Err(ConstructorError::ElementNotFound(id.to_string()));
        }
        if let EditorMode::InlineEditing { id: editing } = self.mode {
            if editing != id {
                self.commit_inline_edit();
            }
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Drop the selection, committing any open inline edit.
    pub fn deselect(&mut self) {
        self.commit_inline_edit();
        self.selected = None;
        self.mode = EditorMode::Idle;
    }

    // -----------------------------------------------------------------------
    // Pointer gestures (canvas-space coordinates)
    // -----------------------------------------------------------------------

    /// Pointer press on an element body: select it and begin a drag.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn press_element(&mut self, id: ElementId, pointer: Point) -> ConstructorResult<()> {
        self.select(id)?;
        let element = self
            .scene
            .element(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        let grab_offset = Point::new(
            pointer.x - element.transform.x,
            pointer.y - element.transform.y,
        );
        self.mode = EditorMode::Dragging { id, grab_offset };
        Ok(())
    }

    /// Pointer press on empty canvas: close any inline edit and deselect.
    pub fn press_canvas(&mut self) {
        self.deselect();
    }

    /// Pointer press on the resize handle of an element.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn press_handle(&mut self, id: ElementId, pointer: Point) -> ConstructorResult<()> {
        self.select(id)?;
        let element = self
            .scene
            .element(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        let start = ResizeStart {
            pointer,
            width: element.transform.width,
            height: element.transform.height,
            font_size: element.kind.text().map_or(24.0, |t| t.font_size),
        };
        self.mode = EditorMode::Resizing { id, start };
        Ok(())
    }

    /// Pointer movement. A no-op unless a drag or resize is in flight; a
    /// stale mode whose element has vanished resets to idle instead of
    /// erroring.
    pub fn pointer_move(&mut self, pointer: Point) {
        match self.mode {
            EditorMode::Dragging { id, grab_offset } => self.drag_to(id, pointer, grab_offset),
            EditorMode::Resizing { id, start } => {
                if self.rotate_mode {
                    self.rotate_to(id, pointer);
                } else {
                    self.resize_to(id, pointer, start);
                }
            }
            EditorMode::Idle | EditorMode::InlineEditing { .. } => {}
        }
    }

    /// Pointer release or leave: drags and resizes never outlive the
    /// pointer. Inline editing is unaffected - it closes on blur or on
    /// selecting elsewhere.
    pub fn release(&mut self) {
        if matches!(
            self.mode,
            EditorMode::Dragging { .. } | EditorMode::Resizing { .. }
        ) {
            self.mode = EditorMode::Idle;
        }
    }

    fn drag_to(&mut self, id: ElementId, pointer: Point, grab_offset: Point) {
        let (canvas_w, canvas_h) = (self.scene.canvas_width, self.scene.canvas_height);
        let Some(element) = self.scene.element_mut(id) else {
            self.mode = EditorMode::Idle;
            return;
        };
        let clamped = geometry::clamp_position(
            pointer.x - grab_offset.x,
            pointer.y - grab_offset.y,
            &element.transform,
            canvas_w,
            canvas_h,
        );
        element.transform.x = clamped.x;
        element.transform.y = clamped.y;
    }

    fn resize_to(&mut self, id: ElementId, pointer: Point, start: ResizeStart) {
        let Some(element) = self.scene.element_mut(id) else {
            self.mode = EditorMode::Idle;
            return;
        };
        let (new_width, new_height) = geometry::resize_box(
            start.width,
            start.height,
            pointer.x - start.pointer.x,
            pointer.y - start.pointer.y,
        );
        element.transform.width = new_width;
        element.transform.height = new_height;
        if let Some(text) = element.kind.text_mut() {
            text.font_size =
                geometry::scaled_font_size(start.font_size, start.width, start.height, new_width, new_height);
        }
    }

    fn rotate_to(&mut self, id: ElementId, pointer: Point) {
        let Some(element) = self.scene.element_mut(id) else {
            self.mode = EditorMode::Idle;
            return;
        };
        let (cx, cy) = element.transform.center();
        element.transform.rotation =
            geometry::pointer_angle(Point::new(cx, cy), pointer).clamp(-180.0, 180.0);
    }

    // -----------------------------------------------------------------------
    // Rotation and inline editing
    // -----------------------------------------------------------------------

    /// Toggle the rotate sub-mode of the resize handle (double-click on the
    /// handle). While set, dragging the handle rotates instead of resizing.
    pub fn toggle_rotate_mode(&mut self) {
        self.rotate_mode = !self.rotate_mode;
        tracing::debug!(rotate_mode = self.rotate_mode, "rotate mode toggled");
    }

    /// Set rotation from the properties panel slider, clamped to
    /// [-180, 180] degrees. Requires a selection.
    pub fn set_rotation(&mut self, degrees: f32) {
        let Some(id) = self.selected else { return };
        if let Some(element) = self.scene.element_mut(id) {
            element.transform.rotation = degrees.clamp(-180.0, 180.0);
        }
    }

    /// Set the enlarged-initial scale on the selected name block from the
    /// properties panel, clamped to [1.0, 2.0]. 1.0 turns the effect off.
    /// Only name blocks carry the effect; for other elements this is a
    /// no-op.
    pub fn set_initial_scale(&mut self, scale: f32) {
        let Some(id) = self.selected else { return };
        let Some(element) = self.scene.element_mut(id) else {
            return;
        };
        if !matches!(element.kind, ElementKind::Fio(_)) {
            return;
        }
        if let Some(text) = element.kind.text_mut() {
            text.initial_scale = scale.clamp(1.0, 2.0);
        }
    }

    /// Double-click on an element: open inline text editing if the element
    /// is text-capable; otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn begin_inline_edit(&mut self, id: ElementId) -> ConstructorResult<()> {
        let element = self
            .scene
            .element(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        if !element.kind.is_text_capable() {
            return Ok(());
        }
        self.select(id)?;
        self.mode = EditorMode::InlineEditing { id };
        Ok(())
    }

    /// Live content update while the inline editor is open. No-op when no
    /// edit is in flight.
    pub fn inline_text_change(&mut self, content: &str) {
        let EditorMode::InlineEditing { id } = self.mode else {
            return;
        };
        let Some(element) = self.scene.element_mut(id) else {
            self.mode = EditorMode::Idle;
            return;
        };
        if let Some(text) = element.kind.text_mut() {
            text.content = content.to_string();
        }
    }

    /// Commit and close the inline editor (blur or click elsewhere).
    pub fn commit_inline_edit(&mut self) {
        if matches!(self.mode, EditorMode::InlineEditing { .. }) {
            self.mode = EditorMode::Idle;
        }
    }

    // -----------------------------------------------------------------------
    // Element lifecycle
    // -----------------------------------------------------------------------

    /// Delete an element, clearing selection and any in-flight mode that
    /// referenced it.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn delete_element(&mut self, id: ElementId) -> ConstructorResult<()> {
        self.scene.remove_element(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        let mode_refers = match self.mode {
            EditorMode::Dragging { id: m, .. }
            | EditorMode::Resizing { id: m, .. }
            | EditorMode::InlineEditing { id: m } => m == id,
            EditorMode::Idle => false,
        };
        if mode_refers {
            self.mode = EditorMode::Idle;
        }
        Ok(())
    }

    /// Empty the scene and reset all interaction state.
    pub fn clear_scene(&mut self) {
        self.scene.clear();
        self.selected = None;
        self.mode = EditorMode::Idle;
    }

    // -----------------------------------------------------------------------
    // Screen mode
    // -----------------------------------------------------------------------

    /// Toggle the screen compositing mode on an image element.
    ///
    /// Disabling clears the cached `processed_src`. Enabling with a cache
    /// present applies immediately; without one the caller must run the
    /// compositing filter and finish via [`Editor::commit_processed`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] for an unknown id and
    /// [`ConstructorError::InvalidOperation`] for a non-image element.
    pub fn set_screen_mode(
        &mut self,
        id: ElementId,
        enabled: bool,
    ) -> ConstructorResult<ScreenModeChange> {
        let element = self
            .scene
            .element_mut(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        let image = element.kind.image_mut().ok_or_else(|| {
            ConstructorError::InvalidOperation("screen mode requires an image element".to_string())
        })?;
        if enabled {
            if image.processed_src.is_some() {
                image.screen_mode = true;
                Ok(ScreenModeChange::Applied)
            } else {
                Ok(ScreenModeChange::NeedsProcessing)
            }
        } else {
            image.screen_mode = false;
            image.processed_src = None;
            Ok(ScreenModeChange::Applied)
        }
    }

    /// Store the compositing filter output and switch the element to it.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] for an unknown id and
    /// [`ConstructorError::InvalidOperation`] for a non-image element.
    pub fn commit_processed(
        &mut self,
        id: ElementId,
        processed_src: impl Into<String>,
    ) -> ConstructorResult<()> {
        let element = self
            .scene
            .element_mut(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        let image = element.kind.image_mut().ok_or_else(|| {
            ConstructorError::InvalidOperation("screen mode requires an image element".to_string())
        })?;
        image.processed_src = Some(processed_src.into());
        image.screen_mode = true;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // View and touch gestures (screen-space coordinates)
    // -----------------------------------------------------------------------

    /// Reset zoom and pan (double-click on empty canvas).
    pub fn reset_view(&mut self) {
        self.scene.zoom = 1.0;
        self.scene.pan_x = 0.0;
        self.scene.pan_y = 0.0;
    }

    /// Feed a touch event to the two-finger gesture recognizer. Returns
    /// `true` when the event was consumed as a pinch/pan; single-touch
    /// events return `false` and should be routed through the pointer path.
    pub fn touch_gesture(&mut self, input: &TouchInput) -> bool {
        match input.phase {
            TouchPhase::Start if input.is_two_finger() => {
                let (a, b) = (input.touches[0].position(), input.touches[1].position());
                // A second finger cancels any in-flight drag or resize.
                self.release();
                self.pinch = Some(PinchState {
                    start_distance: geometry::touch_distance(a, b).max(f32::EPSILON),
                    start_zoom: self.scene.zoom,
                    last_centroid: geometry::touch_centroid(a, b),
                });
                tracing::debug!("pinch gesture started");
                true
            }
            TouchPhase::Move if input.is_two_finger() => {
                let Some(pinch) = self.pinch.as_mut() else {
                    return false;
                };
                let (a, b) = (input.touches[0].position(), input.touches[1].position());
                let distance = geometry::touch_distance(a, b);
                self.scene.zoom =
                    (pinch.start_zoom * distance / pinch.start_distance).clamp(MIN_ZOOM, MAX_ZOOM);
                let centroid = geometry::touch_centroid(a, b);
                self.scene.pan_x += centroid.x - pinch.last_centroid.x;
                self.scene.pan_y += centroid.y - pinch.last_centroid.y;
                pinch.last_centroid = centroid;
                true
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let was_pinching = self.pinch.take().is_some();
                self.release();
                was_pinching
            }
            TouchPhase::Start | TouchPhase::Move => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TouchPoint;
    use crate::{Element, Scene, Transform};

    fn editor_with_element(transform: Transform) -> (Editor, ElementId) {
        let mut scene = Scene::new("monument.jpg");
        let element = Element::text().with_transform(transform);
        let id = scene.add_element(element);
        (Editor::new(scene), id)
    }

    #[test]
    fn drag_moves_exactly_by_pointer_delta() {
        // Element at (50,50) 100x100, grab at (60,60), move by (30,20).
        let (mut editor, id) = editor_with_element(Transform::at(50.0, 50.0, 100.0, 100.0));
        editor.press_element(id, Point::new(60.0, 60.0)).expect("press");
        editor.pointer_move(Point::new(90.0, 80.0));

        let t = editor.scene.element(id).expect("exists").transform;
        assert!((t.x - 80.0).abs() < f32::EPSILON);
        assert!((t.y - 70.0).abs() < f32::EPSILON);
    }

    #[test]
    fn drag_clamps_to_canvas_bounds() {
        let (mut editor, id) = editor_with_element(Transform::at(50.0, 50.0, 100.0, 100.0));
        editor.press_element(id, Point::new(50.0, 50.0)).expect("press");
        editor.pointer_move(Point::new(-500.0, 10_000.0));

        let t = editor.scene.element(id).expect("exists").transform;
        let scene = &editor.scene;
        assert!(t.x >= 0.0 && t.y >= 0.0);
        assert!(t.x + t.width <= scene.canvas_width);
        assert!(t.y + t.height <= scene.canvas_height);
    }

    #[test]
    fn resize_scales_font_with_larger_ratio() {
        // Width 100 -> 200 (2x), height unchanged: fontSize 24 -> 48.
        let (mut editor, id) = editor_with_element(Transform::at(10.0, 10.0, 100.0, 100.0));
        editor
            .press_handle(id, Point::new(110.0, 110.0))
            .expect("press handle");
        editor.pointer_move(Point::new(210.0, 110.0));

        let element = editor.scene.element(id).expect("exists");
        assert!((element.transform.width - 200.0).abs() < f32::EPSILON);
        assert!((element.transform.height - 100.0).abs() < f32::EPSILON);
        let text = element.kind.text().expect("text attrs");
        assert!((text.font_size - 48.0).abs() < f32::EPSILON);
    }

    #[test]
    fn only_one_mode_at_a_time() {
        let (mut editor, id) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        editor.press_element(id, Point::new(10.0, 10.0)).expect("press");
        assert!(matches!(editor.mode(), EditorMode::Dragging { .. }));

        editor.press_handle(id, Point::new(100.0, 100.0)).expect("handle");
        assert!(matches!(editor.mode(), EditorMode::Resizing { .. }));

        editor.release();
        assert!(matches!(editor.mode(), EditorMode::Idle));
    }

    #[test]
    fn move_without_gesture_is_noop() {
        let (mut editor, id) = editor_with_element(Transform::at(50.0, 50.0, 100.0, 100.0));
        editor.pointer_move(Point::new(999.0, 999.0));
        let t = editor.scene.element(id).expect("exists").transform;
        assert!((t.x - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn stale_drag_resets_to_idle() {
        let (mut editor, id) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        editor.press_element(id, Point::new(10.0, 10.0)).expect("press");
        editor.scene.remove_element(id).expect("remove behind the editor's back");
        editor.pointer_move(Point::new(50.0, 50.0));
        assert!(matches!(editor.mode(), EditorMode::Idle));
    }

    #[test]
    fn rotate_mode_turns_handle_drag_into_rotation() {
        let (mut editor, id) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        editor.toggle_rotate_mode();
        editor.press_handle(id, Point::new(100.0, 100.0)).expect("handle");
        // Pointer directly right of the element center (50,50): angle 0.
        editor.pointer_move(Point::new(150.0, 50.0));
        let t = editor.scene.element(id).expect("exists").transform;
        assert!(t.rotation.abs() < 1e-4);
        // Directly below: angle 90.
        editor.pointer_move(Point::new(50.0, 150.0));
        let t = editor.scene.element(id).expect("exists").transform;
        assert!((t.rotation - 90.0).abs() < 1e-4);
        // Size untouched while rotating.
        assert!((t.width - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rotation_slider_clamps() {
        let (mut editor, id) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        editor.select(id).expect("select");
        editor.set_rotation(400.0);
        let t = editor.scene.element(id).expect("exists").transform;
        assert!((t.rotation - 180.0).abs() < f32::EPSILON);
    }

    #[test]
    fn initial_scale_applies_only_to_name_blocks() {
        let mut scene = Scene::new("monument.jpg");
        let fio = scene
            .add_fio("Иванов", "Иван", "Иванович", crate::FontSpec::default())
            .expect("fio");
        let plain = scene.add_text();
        let mut editor = Editor::new(scene);

        editor.select(fio).expect("select");
        editor.set_initial_scale(1.4);
        let text = editor.scene.element(fio).expect("exists").kind.text().expect("text");
        assert!((text.initial_scale - 1.4).abs() < f32::EPSILON);

        // Clamped to at most 2.0, and 1.0 switches the effect off.
        editor.set_initial_scale(5.0);
        let text = editor.scene.element(fio).expect("exists").kind.text().expect("text");
        assert!((text.initial_scale - 2.0).abs() < f32::EPSILON);
        editor.set_initial_scale(1.0);
        let text = editor.scene.element(fio).expect("exists").kind.text().expect("text");
        assert!((text.initial_scale - 1.0).abs() < f32::EPSILON);

        // Plain text never carries the effect.
        editor.select(plain).expect("select");
        editor.set_initial_scale(1.4);
        let text = editor.scene.element(plain).expect("exists").kind.text().expect("text");
        assert!((text.initial_scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn inline_edit_only_on_text_capable() {
        let mut scene = Scene::new("monument.jpg");
        let photo = scene.add_element(Element::photo("photo.png"));
        let mut editor = Editor::new(scene);

        editor.begin_inline_edit(photo).expect("no error");
        assert!(!editor.is_inline_editing());
    }

    #[test]
    fn selecting_elsewhere_commits_inline_edit() {
        let mut scene = Scene::new("monument.jpg");
        let first = scene.add_text();
        let second = scene.add_text();
        let mut editor = Editor::new(scene);

        editor.begin_inline_edit(first).expect("edit");
        editor.inline_text_change("Помним, любим");
        assert!(editor.is_inline_editing());

        editor.select(second).expect("select");
        assert!(!editor.is_inline_editing());

        let text = editor
            .scene
            .element(first)
            .expect("exists")
            .kind
            .text()
            .expect("text");
        assert_eq!(text.content, "Помним, любим");
    }

    #[test]
    fn delete_clears_selection_and_mode() {
        let (mut editor, id) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        editor.press_element(id, Point::new(10.0, 10.0)).expect("press");
        editor.delete_element(id).expect("delete");
        assert!(editor.selected().is_none());
        assert!(matches!(editor.mode(), EditorMode::Idle));
        assert!(editor.scene.is_empty());
    }

    #[test]
    fn pinch_zooms_and_pans() {
        let (mut editor, _) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        let start = TouchInput::new(
            TouchPhase::Start,
            vec![
                TouchPoint { id: 0, x: 100.0, y: 100.0 },
                TouchPoint { id: 1, x: 200.0, y: 100.0 },
            ],
        );
        assert!(editor.touch_gesture(&start));

        // Fingers spread to double the distance and drift 10px right.
        let moved = TouchInput::new(
            TouchPhase::Move,
            vec![
                TouchPoint { id: 0, x: 60.0, y: 100.0 },
                TouchPoint { id: 1, x: 260.0, y: 100.0 },
            ],
        );
        assert!(editor.touch_gesture(&moved));
        assert!((editor.scene.zoom - 2.0).abs() < 1e-4);
        assert!((editor.scene.pan_x - 10.0).abs() < 1e-4);

        let end = TouchInput::new(TouchPhase::End, vec![]);
        editor.touch_gesture(&end);
        editor.reset_view();
        assert!((editor.scene.zoom - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn single_touch_is_not_a_gesture() {
        let (mut editor, _) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        let one = TouchInput::new(
            TouchPhase::Start,
            vec![TouchPoint { id: 0, x: 10.0, y: 10.0 }],
        );
        assert!(!editor.touch_gesture(&one));
    }

    #[test]
    fn pinch_zoom_clamps_to_bounds() {
        let (mut editor, _) = editor_with_element(Transform::at(0.0, 0.0, 100.0, 100.0));
        let start = TouchInput::new(
            TouchPhase::Start,
            vec![
                TouchPoint { id: 0, x: 100.0, y: 100.0 },
                TouchPoint { id: 1, x: 110.0, y: 100.0 },
            ],
        );
        editor.touch_gesture(&start);
        let spread = TouchInput::new(
            TouchPhase::Move,
            vec![
                TouchPoint { id: 0, x: 0.0, y: 100.0 },
                TouchPoint { id: 1, x: 500.0, y: 100.0 },
            ],
        );
        editor.touch_gesture(&spread);
        assert!((editor.scene.zoom - MAX_ZOOM).abs() < f32::EPSILON);
    }

    #[test]
    fn screen_mode_protocol() {
        let mut scene = Scene::new("monument.jpg");
        let photo = scene.add_element(Element::photo("photo.png"));
        let mut editor = Editor::new(scene);

        // First enable: no cache yet, processing requested.
        let change = editor.set_screen_mode(photo, true).expect("toggle");
        assert_eq!(change, ScreenModeChange::NeedsProcessing);
        let attrs = editor.scene.element(photo).expect("e").kind.image().expect("img");
        assert!(!attrs.screen_mode);

        editor
            .commit_processed(photo, "data:image/png;base64,BBBB")
            .expect("commit");
        let attrs = editor.scene.element(photo).expect("e").kind.image().expect("img");
        assert!(attrs.screen_mode);
        assert!(attrs.processed_src.is_some());

        // Off clears the cache; on again needs reprocessing.
        editor.set_screen_mode(photo, false).expect("off");
        let attrs = editor.scene.element(photo).expect("e").kind.image().expect("img");
        assert!(attrs.processed_src.is_none());
        let change = editor.set_screen_mode(photo, true).expect("on again");
        assert_eq!(change, ScreenModeChange::NeedsProcessing);
    }

    #[test]
    fn screen_mode_rejects_text_elements() {
        let mut scene = Scene::new("monument.jpg");
        let text = scene.add_text();
        let mut editor = Editor::new(scene);
        let result = editor.set_screen_mode(text, true);
        assert!(matches!(result, Err(ConstructorError::InvalidOperation(_))));
    }
}
