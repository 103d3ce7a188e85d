//! The board controller: owns the scene, history, active session, and
//! persistence, and turns normalized input events into mutations.
//!
//! All mutation is synchronous inside `handle_input`; the host drives the
//! autosave clock through `tick` and reads render state between events.

use crate::geometry::{LINE_HEIGHT_FACTOR, TextMeasurer, screen_to_world, world_to_screen};
use crate::history::History;
use crate::input::{InputEvent, Key, KeyInput, PointerInput, PointerPhase};
use crate::objects::{
    BoardShape, DrawObject, ObjectId, PathStroke, StrokeMode, TextLabel,
};
use crate::scene::{Scene, Tool};
use crate::session::{
    DragSession, DrawSession, PanSession, Session, ShapeSession, TextCommit, TextEditMode,
    TextEditSession,
};
use crate::status::StatusMessage;
use crate::storage::{
    Autosave, KeyValueStore, ResetReason, StoreError, board_key, decode_document, encode_document,
};
use kurbo::{Point, Rect, Size, Vec2};
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Why the board could not be attached to its host page.
#[derive(Debug, Error)]
pub enum MountError {
    /// No board container or board id on the page; stay silent and do
    /// nothing.
    #[error("no board container on this page")]
    NotMounted,
    /// The host could not hand us a 2D drawing surface. The board is
    /// non-functional but the surrounding page keeps working.
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,
}

/// Owned state for one mounted board.
pub struct Board<S: KeyValueStore> {
    key: String,
    scene: Scene,
    history: History,
    session: Session,
    selection: Option<ObjectId>,
    viewport: Size,
    autosave: Autosave,
    store: S,
    status: Option<StatusMessage>,
    measurer: Option<Box<dyn TextMeasurer>>,
    dirty: bool,
    present_mode: bool,
}

impl<S: KeyValueStore> Board<S> {
    /// Attach to a board, loading any previously saved document.
    ///
    /// `board_id` comes from the host page; absence means this page has no
    /// board and mounting is a silent no-op for the caller to swallow.
    pub fn mount(board_id: Option<&str>, viewport: Size, store: S) -> Result<Self, MountError> {
        let board_id = match board_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(MountError::NotMounted),
        };
        let key = board_key(board_id);

        let mut status = None;
        let scene = match store.get(&key) {
            Ok(Some(raw)) => {
                let (scene, report) = decode_document(&raw);
                status = match report.reset {
                    Some(ResetReason::Corrupt) => Some(StatusMessage::warning(
                        "Saved board could not be read; starting empty",
                    )),
                    Some(ResetReason::VersionMismatch(v)) => Some(StatusMessage::warning(
                        format!("Saved board uses unsupported format {v}; starting empty"),
                    )),
                    None if report.dropped > 0 => Some(StatusMessage::warning(format!(
                        "{} saved object(s) could not be restored",
                        report.dropped
                    ))),
                    None => None,
                };
                scene
            }
            Ok(None) => Scene::new(),
            Err(err) => {
                log::warn!("board load failed: {err}");
                status = Some(StatusMessage::warning(
                    "Saved board could not be loaded; starting empty",
                ));
                Scene::new()
            }
        };

        Ok(Self {
            key,
            scene,
            history: History::new(),
            session: Session::Idle,
            selection: None,
            viewport,
            autosave: Autosave::new(),
            store,
            status,
            measurer: None,
            dirty: true,
            present_mode: false,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn present_mode(&self) -> bool {
        self.present_mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of undoable snapshots.
    pub fn history_depth(&self) -> usize {
        self.history.past_len()
    }

    pub fn save_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Text measurement source for hit tests; typically the render surface.
    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = Some(measurer);
        self.dirty = true;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.dirty = true;
    }

    pub fn toggle_present_mode(&mut self) {
        self.present_mode = !self.present_mode;
        self.dirty = true;
    }

    /// Take the pending user-facing message, if any.
    pub fn take_status(&mut self) -> Option<StatusMessage> {
        self.status.take()
    }

    /// Whether a redraw is needed; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Switch tools. An open text edit is committed first so the buffered
    /// content is never lost to a toolbar click.
    pub fn set_tool(&mut self, tool: Tool, now: Instant) {
        self.commit_text_edit(now);
        self.scene.view.tool = tool;
        self.dirty = true;
        self.autosave.schedule(now);
    }

    pub fn set_color(&mut self, color: crate::objects::Rgba, now: Instant) {
        self.scene.view.color = color;
        if let Session::EditingText(edit) = &mut self.session {
            edit.color = color;
        }
        self.autosave.schedule(now);
    }

    pub fn set_stroke_width(&mut self, width: f64, now: Instant) {
        self.scene.view.stroke_width = width.max(0.5);
        self.autosave.schedule(now);
    }

    /// Mirror the host's overlay input into the open text edit.
    pub fn set_text_buffer(&mut self, text: &str) {
        if let Session::EditingText(edit) = &mut self.session {
            edit.buffer = text.to_string();
        }
    }

    /// Screen rect where the host should place its text overlay input:
    /// anchored at the edit point, sized from the viewport, clamped to it.
    pub fn text_overlay_rect(&self) -> Option<Rect> {
        let Session::EditingText(edit) = &self.session else {
            return None;
        };
        let anchor = match &edit.mode {
            TextEditMode::New { anchor } => *anchor,
            TextEditMode::Edit { target, .. } => self
                .scene
                .get(*target)
                .and_then(DrawObject::anchor)
                .unwrap_or(Point::ZERO),
        };
        let origin = world_to_screen(anchor, self.scene.view.pan);
        let width = (self.viewport.width * 0.3).max(140.0).min(self.viewport.width);
        let height = (edit.font_size * LINE_HEIGHT_FACTOR + 16.0)
            .max(44.0)
            .min(self.viewport.height);
        let x = origin.x.clamp(0.0, (self.viewport.width - width).max(0.0));
        let y = origin.y.clamp(0.0, (self.viewport.height - height).max(0.0));
        Some(Rect::new(x, y, x + width, y + height))
    }

    /// Single entry point for all normalized host events.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer, now),
            InputEvent::Key(key) => self.handle_key(key, now),
        }
    }

    /// Drive the autosave clock; fires at most one save per quiet burst.
    pub fn tick(&mut self, now: Instant) {
        if self.autosave.take_due(now) {
            self.save_now();
        }
    }

    /// Write immediately if a save is pending (page-unload path).
    pub fn flush_save(&mut self) {
        if self.autosave.take_pending() {
            self.save_now();
        }
    }

    pub fn undo(&mut self, now: Instant) {
        if self.session.is_active() {
            return;
        }
        if self.history.undo(&mut self.scene.objects) {
            self.revalidate_selection();
            self.mark_mutated(now);
        }
    }

    pub fn redo(&mut self, now: Instant) {
        if self.session.is_active() {
            return;
        }
        if self.history.redo(&mut self.scene.objects) {
            self.revalidate_selection();
            self.mark_mutated(now);
        }
    }

    pub fn delete_selected(&mut self, now: Instant) {
        let Some(id) = self.selection else { return };
        if !self.scene.contains(id) {
            self.selection = None;
            return;
        }
        self.history.commit(&self.scene.objects);
        self.scene.remove(id);
        self.selection = None;
        self.mark_mutated(now);
    }

    fn handle_pointer(&mut self, pointer: PointerInput, now: Instant) {
        match pointer.phase {
            PointerPhase::Down => self.pointer_down(pointer, now),
            PointerPhase::Move => self.pointer_move(pointer, now),
            // Cancel ends the gesture exactly like Up; partial work stands.
            PointerPhase::Up | PointerPhase::Cancel => self.pointer_up(pointer, now),
        }
    }

    fn pointer_down(&mut self, pointer: PointerInput, now: Instant) {
        if !pointer.primary {
            return;
        }
        // A pointer-down interrupts an open text edit by committing it,
        // then starts the new gesture normally.
        if matches!(self.session, Session::EditingText(_)) {
            self.commit_text_edit(now);
        }
        if self.session.is_active() {
            return;
        }

        let pan = self.scene.view.pan;
        let world = screen_to_world(pointer.position, pan);
        let measurer = self.measurer.as_deref();

        match self.scene.view.tool {
            Tool::Text => {
                let hit = self.scene.text_at(world, measurer).map(|o| o.id());
                match hit.and_then(|id| self.scene.get(id)) {
                    Some(DrawObject::Text(label)) => {
                        self.selection = Some(label.id);
                        self.session = Session::EditingText(TextEditSession {
                            pointer: pointer.id,
                            mode: TextEditMode::Edit {
                                target: label.id,
                                original: label.content.clone(),
                            },
                            buffer: label.content.clone(),
                            color: label.color,
                            font_size: label.font_size,
                        });
                    }
                    _ => {
                        self.selection = None;
                        self.session = Session::EditingText(TextEditSession {
                            pointer: pointer.id,
                            mode: TextEditMode::New { anchor: world },
                            buffer: String::new(),
                            color: self.scene.view.color,
                            font_size: crate::objects::DEFAULT_FONT_SIZE,
                        });
                    }
                }
            }
            Tool::Pan => match self.scene.movable_at(world, measurer) {
                Some(object) => {
                    let id = object.id();
                    let origin = object.anchor().unwrap_or(world);
                    self.selection = Some(id);
                    self.session =
                        Session::Dragging(DragSession::new(pointer.id, id, world, origin));
                }
                None => {
                    self.selection = None;
                    self.session = Session::Panning(PanSession {
                        pointer: pointer.id,
                        last_screen: pointer.position,
                    });
                }
            },
            Tool::Rect => {
                self.selection = None;
                self.session = Session::ShapeDrawing(ShapeSession::new(
                    pointer.id,
                    crate::objects::ShapeKind::Rect,
                    world,
                ));
            }
            Tool::Circle => {
                self.selection = None;
                self.session = Session::ShapeDrawing(ShapeSession::new(
                    pointer.id,
                    crate::objects::ShapeKind::Circle,
                    world,
                ));
            }
            Tool::Pen | Tool::Eraser => {
                let erase = self.scene.view.tool == Tool::Eraser;
                self.selection = None;
                self.session = Session::Drawing(DrawSession::new(pointer.id, erase, world));
            }
        }
        self.dirty = true;
    }

    fn pointer_move(&mut self, pointer: PointerInput, now: Instant) {
        if self.session.owner() != Some(pointer.id) {
            return;
        }
        let pan = self.scene.view.pan;
        let world = screen_to_world(pointer.position, pan);

        match &mut self.session {
            Session::Drawing(draw) => {
                if draw.record(world) {
                    self.dirty = true;
                }
            }
            Session::ShapeDrawing(shape) => {
                shape.current = world;
                self.dirty = true;
            }
            Session::Dragging(drag) => {
                // No mutation and no history until the gesture is clearly a
                // drag; the snapshot then captures the pre-drag positions.
                if !drag.committed && drag.crosses_threshold(world) {
                    self.history.commit(&self.scene.objects);
                    drag.committed = true;
                }
                if drag.committed {
                    let target = drag.origin + drag.delta(world);
                    if let Some(object) = self.scene.get_mut(drag.target) {
                        object.set_anchor(target);
                    }
                    self.dirty = true;
                    self.autosave.schedule(now);
                }
            }
            Session::Panning(panning) => {
                let delta = Vec2::new(
                    pointer.position.x - panning.last_screen.x,
                    pointer.position.y - panning.last_screen.y,
                );
                panning.last_screen = pointer.position;
                self.scene.view.pan += delta;
                self.dirty = true;
                self.autosave.schedule(now);
            }
            Session::Idle | Session::EditingText(_) => {}
        }
    }

    fn pointer_up(&mut self, pointer: PointerInput, now: Instant) {
        // Text edits close from the keyboard, not from pointer release.
        if matches!(self.session, Session::EditingText(_)) {
            return;
        }
        if self.session.owner() != Some(pointer.id) {
            return;
        }

        let session = std::mem::take(&mut self.session);
        match session {
            Session::Drawing(draw) => {
                let erase = draw.erase;
                if let Some(points) = draw.finish() {
                    let stroke = PathStroke::new(
                        points,
                        self.scene.view.color,
                        self.scene.view.stroke_width,
                        if erase { StrokeMode::Erase } else { StrokeMode::Draw },
                    );
                    self.history.commit(&self.scene.objects);
                    self.scene.push(DrawObject::Path(stroke));
                    self.mark_mutated(now);
                }
            }
            Session::ShapeDrawing(shape) => {
                if shape.meets_minimum() {
                    let board_shape = BoardShape::from_corners(
                        shape.start,
                        shape.current,
                        shape.kind,
                        self.scene.view.color,
                        self.scene.view.stroke_width,
                    );
                    self.history.commit(&self.scene.objects);
                    self.selection = Some(board_shape.id);
                    self.scene.push(DrawObject::Shape(board_shape));
                    self.mark_mutated(now);
                }
            }
            Session::Dragging(_) | Session::Panning(_) => {}
            Session::Idle | Session::EditingText(_) => {}
        }
        self.dirty = true;
    }

    fn handle_key(&mut self, key: KeyInput, now: Instant) {
        match key.key {
            Key::Escape => {
                if matches!(self.session, Session::EditingText(_)) {
                    self.session = Session::Idle;
                    self.dirty = true;
                }
            }
            Key::Enter => self.commit_text_edit(now),
            Key::Delete | Key::Backspace => {
                // While an edit is open these keys belong to the overlay
                // input, not to the selection.
                if !self.session.is_active() {
                    self.delete_selected(now);
                }
            }
            Key::Z if key.modifiers.action() => {
                if key.modifiers.shift {
                    self.redo(now);
                } else {
                    self.undo(now);
                }
            }
            Key::Z => {}
        }
    }

    /// Apply the text-commit rules to an open edit and close it.
    fn commit_text_edit(&mut self, now: Instant) {
        if !matches!(self.session, Session::EditingText(_)) {
            return;
        }
        let Session::EditingText(edit) = std::mem::take(&mut self.session) else {
            return;
        };
        self.dirty = true;

        match edit.commit() {
            TextCommit::Discard => {}
            TextCommit::Create { anchor, content } => {
                let label = TextLabel::new(anchor, content, edit.color, edit.font_size);
                self.history.commit(&self.scene.objects);
                self.selection = Some(label.id);
                self.scene.push(DrawObject::Text(label));
                self.mark_mutated(now);
            }
            TextCommit::Delete { target } => {
                self.history.commit(&self.scene.objects);
                self.scene.remove(target);
                self.selection = None;
                self.mark_mutated(now);
            }
            TextCommit::Update { target, content } => {
                self.history.commit(&self.scene.objects);
                if let Some(DrawObject::Text(label)) = self.scene.get_mut(target) {
                    label.apply_edit(content, edit.color, edit.font_size);
                }
                self.mark_mutated(now);
            }
        }
    }

    fn revalidate_selection(&mut self) {
        self.selection = self
            .selection
            .filter(|id| self.scene.get(*id).is_some_and(DrawObject::is_movable));
    }

    fn mark_mutated(&mut self, now: Instant) {
        self.dirty = true;
        self.autosave.schedule(now);
    }

    fn save_now(&mut self) {
        let updated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let raw = match encode_document(&self.scene, updated_at) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("board encode failed: {err}");
                self.status = Some(StatusMessage::error("Board could not be saved"));
                return;
            }
        };
        match self.store.set(&self.key, &raw) {
            Ok(()) => log::debug!("board saved ({} bytes)", raw.len()),
            Err(StoreError::QuotaExceeded) => {
                log::warn!("board save hit storage quota");
                self.status = Some(StatusMessage::warning(
                    "Board could not be saved: storage is full",
                ));
            }
            Err(StoreError::Backend(msg)) => {
                log::warn!("board save failed: {msg}");
                self.status = Some(StatusMessage::error("Board could not be saved"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, PointerKind};
    use crate::objects::Rgba;
    use crate::storage::{MemoryStore, SAVE_DEBOUNCE};
    use std::time::Duration;

    fn board() -> Board<MemoryStore> {
        Board::mount(Some("test"), Size::new(800.0, 600.0), MemoryStore::new())
            .expect("mount")
    }

    fn t0() -> Instant {
        Instant::now()
    }

    fn pointer(id: i64, phase: PointerPhase, x: f64, y: f64) -> InputEvent {
        InputEvent::Pointer(PointerInput {
            id,
            kind: PointerKind::Mouse,
            primary: true,
            phase,
            position: Point::new(x, y),
        })
    }

    fn key(k: Key, modifiers: Modifiers) -> InputEvent {
        InputEvent::Key(KeyInput { key: k, modifiers })
    }

    fn draw_rect<S: KeyValueStore>(board: &mut Board<S>, now: Instant, x0: f64, y0: f64, x1: f64, y1: f64) {
        board.set_tool(Tool::Rect, now);
        board.handle_input(pointer(1, PointerPhase::Down, x0, y0), now);
        board.handle_input(pointer(1, PointerPhase::Move, x1, y1), now);
        board.handle_input(pointer(1, PointerPhase::Up, x1, y1), now);
    }

    #[test]
    fn test_mount_requires_board_id() {
        let err = Board::mount(None, Size::new(100.0, 100.0), MemoryStore::new());
        assert!(matches!(err, Err(MountError::NotMounted)));
        let err = Board::mount(Some("  "), Size::new(100.0, 100.0), MemoryStore::new());
        assert!(matches!(err, Err(MountError::NotMounted)));
    }

    #[test]
    fn test_freehand_sampling_records_two_points() {
        let mut board = board();
        let now = t0();
        board.handle_input(pointer(1, PointerPhase::Down, 0.0, 0.0), now);
        // 0.3 from start: below the sampling threshold, skipped.
        board.handle_input(pointer(1, PointerPhase::Move, 0.3, 0.0), now);
        // 0.5 from the last recorded point: kept.
        board.handle_input(pointer(1, PointerPhase::Move, 0.5, 0.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 0.5, 0.0), now);

        assert_eq!(board.scene().len(), 1);
        match &board.scene().objects[0] {
            DrawObject::Path(path) => {
                assert_eq!(path.points, vec![Point::ZERO, Point::new(0.5, 0.0)]);
                assert_eq!(path.mode, StrokeMode::Draw);
            }
            other => panic!("expected path, got {other:?}"),
        }
        assert!(board.save_pending());
    }

    #[test]
    fn test_rectangle_drag_creates_selected_shape() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 100.0, 50.0);

        assert_eq!(board.scene().len(), 1);
        match &board.scene().objects[0] {
            DrawObject::Shape(shape) => {
                assert_eq!(shape.origin, Point::ZERO);
                assert_eq!(shape.width, 100.0);
                assert_eq!(shape.height, 50.0);
                assert_eq!(board.selection(), Some(shape.id));
            }
            other => panic!("expected shape, got {other:?}"),
        }
    }

    #[test]
    fn test_tiny_shape_is_discarded() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Rect, now);
        // Drain the save scheduled by the tool change itself.
        board.tick(now + SAVE_DEBOUNCE);

        board.handle_input(pointer(1, PointerPhase::Down, 10.0, 10.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 13.0, 100.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 13.0, 100.0), now);

        assert!(board.scene().is_empty());
        assert!(!board.can_undo());
        assert!(!board.save_pending());
    }

    #[test]
    fn test_drag_click_without_movement_is_a_noop() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 10.0, 10.0, 60.0, 60.0);
        board.tick(now + SAVE_DEBOUNCE);
        assert!(!board.save_pending());

        board.set_tool(Tool::Pan, now);
        board.tick(now + 2 * SAVE_DEBOUNCE);
        let depth_before = board.history_depth();

        board.handle_input(pointer(1, PointerPhase::Down, 30.0, 30.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 30.0, 30.0), now);

        assert_eq!(board.history_depth(), depth_before);
        assert!(!board.save_pending());
        match &board.scene().objects[0] {
            DrawObject::Shape(shape) => assert_eq!(shape.origin, Point::new(10.0, 10.0)),
            other => panic!("expected shape, got {other:?}"),
        }
        // The click still selected it.
        assert!(board.selection().is_some());
    }

    #[test]
    fn test_drag_past_threshold_moves_and_commits_once() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 10.0, 10.0, 60.0, 60.0);

        board.set_tool(Tool::Pan, now);
        board.handle_input(pointer(1, PointerPhase::Down, 30.0, 30.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 45.0, 30.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 50.0, 35.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 50.0, 35.0), now);

        match &board.scene().objects[0] {
            DrawObject::Shape(shape) => assert_eq!(shape.origin, Point::new(30.0, 15.0)),
            other => panic!("expected shape, got {other:?}"),
        }
        // One snapshot for the shape, one for the drag.
        board.undo(now);
        match &board.scene().objects[0] {
            DrawObject::Shape(shape) => assert_eq!(shape.origin, Point::new(10.0, 10.0)),
            other => panic!("expected shape, got {other:?}"),
        }
    }

    #[test]
    fn test_pan_moves_view_not_objects() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 10.0, 10.0, 60.0, 60.0);

        board.set_tool(Tool::Pan, now);
        board.handle_input(pointer(1, PointerPhase::Down, 500.0, 500.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 520.0, 470.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 520.0, 470.0), now);

        assert_eq!(board.scene().view.pan, Vec2::new(20.0, -30.0));
        match &board.scene().objects[0] {
            DrawObject::Shape(shape) => assert_eq!(shape.origin, Point::new(10.0, 10.0)),
            other => panic!("expected shape, got {other:?}"),
        }
        assert!(board.save_pending());
        // Panning leaves no undo entry.
        board.undo(now);
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_hit_test_respects_pan() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 10.0, 10.0, 60.0, 60.0);

        board.set_tool(Tool::Pan, now);
        board.handle_input(pointer(1, PointerPhase::Down, 500.0, 500.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 600.0, 500.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 600.0, 500.0), now);

        // Shape world (10..60) now sits at screen x 110..160.
        board.handle_input(pointer(1, PointerPhase::Down, 130.0, 30.0), now);
        assert!(matches!(board.session(), Session::Dragging(_)));
        board.handle_input(pointer(1, PointerPhase::Up, 130.0, 30.0), now);
    }

    #[test]
    fn test_text_new_commit_appends_and_selects() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        assert!(matches!(board.session(), Session::EditingText(_)));
        board.set_text_buffer("  homework due friday  ");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);

        assert_eq!(board.scene().len(), 1);
        match &board.scene().objects[0] {
            DrawObject::Text(label) => {
                assert_eq!(label.content, "homework due friday");
                assert_eq!(label.anchor, Point::new(40.0, 40.0));
                assert_eq!(board.selection(), Some(label.id));
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert!(board.can_undo());
    }

    #[test]
    fn test_text_new_empty_discards() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        board.set_text_buffer("   ");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);

        assert!(board.scene().is_empty());
        assert!(!board.can_undo());
        assert!(matches!(board.session(), Session::Idle));
    }

    #[test]
    fn test_text_edit_unchanged_is_noop() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        board.set_text_buffer("hello");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);
        board.tick(now + SAVE_DEBOUNCE);
        let depth = board.history_depth();

        // Reopen and commit the same trimmed content.
        board.handle_input(pointer(1, PointerPhase::Down, 42.0, 44.0), now);
        assert!(matches!(board.session(), Session::EditingText(_)));
        board.set_text_buffer(" hello ");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);

        assert_eq!(board.history_depth(), depth);
        assert!(!board.save_pending());
    }

    #[test]
    fn test_text_edit_emptied_deletes_and_clears_selection() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        board.set_text_buffer("hello");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);

        board.handle_input(pointer(1, PointerPhase::Down, 42.0, 44.0), now);
        board.set_text_buffer("");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);

        assert!(board.scene().is_empty());
        assert_eq!(board.selection(), None);
    }

    #[test]
    fn test_escape_cancels_text_edit() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        board.set_text_buffer("discard me");
        board.handle_input(key(Key::Escape, Modifiers::default()), now);

        assert!(board.scene().is_empty());
        assert!(matches!(board.session(), Session::Idle));
    }

    #[test]
    fn test_pointer_down_commits_open_text_edit() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 40.0, 40.0), now);
        board.set_text_buffer("keep me");

        board.set_tool(Tool::Pen, now);
        // set_tool already committed; a down with an edit still open would
        // commit too, so either path lands the label before drawing starts.
        board.handle_input(pointer(1, PointerPhase::Down, 200.0, 200.0), now);

        assert_eq!(board.scene().len(), 1);
        assert!(matches!(board.session(), Session::Drawing(_)));
        board.handle_input(pointer(1, PointerPhase::Up, 200.0, 200.0), now);
    }

    #[test]
    fn test_undo_after_delete_restores_same_id() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 10.0, 10.0, 60.0, 60.0);
        let id = board.scene().objects[0].id();

        board.delete_selected(now);
        assert!(board.scene().is_empty());
        board.undo(now);
        assert_eq!(board.scene().objects[0].id(), id);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);
        board.undo(now);
        assert!(board.can_redo());
        draw_rect(&mut board, now, 100.0, 100.0, 150.0, 150.0);
        assert!(!board.can_redo());
    }

    #[test]
    fn test_undo_redo_keyboard_shortcuts() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);

        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        board.handle_input(key(Key::Z, ctrl), now);
        assert!(board.scene().is_empty());

        let ctrl_shift = Modifiers { ctrl: true, shift: true, ..Modifiers::default() };
        board.handle_input(key(Key::Z, ctrl_shift), now);
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_second_pointer_is_ignored_during_gesture() {
        let mut board = board();
        let now = t0();
        board.handle_input(pointer(1, PointerPhase::Down, 0.0, 0.0), now);
        board.handle_input(pointer(2, PointerPhase::Move, 50.0, 50.0), now);
        board.handle_input(pointer(2, PointerPhase::Up, 50.0, 50.0), now);
        assert!(matches!(board.session(), Session::Drawing(_)));
        board.handle_input(pointer(1, PointerPhase::Up, 0.0, 0.0), now);
        assert!(matches!(board.session(), Session::Idle));
    }

    #[test]
    fn test_non_primary_pointer_cannot_open_session() {
        let mut board = board();
        let now = t0();
        board.handle_input(
            InputEvent::Pointer(PointerInput {
                id: 3,
                kind: PointerKind::Touch,
                primary: false,
                phase: PointerPhase::Down,
                position: Point::new(10.0, 10.0),
            }),
            now,
        );
        assert!(matches!(board.session(), Session::Idle));
    }

    #[test]
    fn test_cancel_behaves_like_up() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Rect, now);
        board.handle_input(pointer(1, PointerPhase::Down, 0.0, 0.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 80.0, 40.0), now);
        board.handle_input(pointer(1, PointerPhase::Cancel, 80.0, 40.0), now);
        assert_eq!(board.scene().len(), 1);
    }

    #[test]
    fn test_save_fires_once_after_debounce() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);

        board.tick(now + Duration::from_millis(100));
        assert!(board.save_pending());
        board.tick(now + SAVE_DEBOUNCE);
        assert!(!board.save_pending());

        // Saved document rehydrates into an equal scene.
        let raw = board.store.get("classnote.board.test").unwrap().expect("saved");
        let (loaded, report) = decode_document(&raw);
        assert_eq!(report, Default::default());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.objects[0].id(), board.scene().objects[0].id());
    }

    #[test]
    fn test_flush_save_writes_immediately() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);
        board.flush_save();
        assert!(!board.save_pending());
        assert!(board.store.get("classnote.board.test").unwrap().is_some());
    }

    #[test]
    fn test_quota_exceeded_keeps_scene_and_warns() {
        let mut board =
            Board::mount(Some("test"), Size::new(800.0, 600.0), MemoryStore::with_quota(10))
                .expect("mount");
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);
        board.flush_save();

        assert_eq!(board.scene().len(), 1);
        let status = board.take_status().expect("warning status");
        assert_eq!(status.severity, crate::status::Severity::Warning);
    }

    #[test]
    fn test_mount_reloads_saved_board() {
        let mut store = MemoryStore::new();
        let id;
        {
            let mut board =
                Board::mount(Some("b1"), Size::new(800.0, 600.0), &mut store).expect("mount");
            let now = t0();
            draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);
            id = board.scene().objects[0].id();
            board.flush_save();
        }
        let board = Board::mount(Some("b1"), Size::new(800.0, 600.0), &mut store).expect("mount");
        assert_eq!(board.scene().len(), 1);
        assert_eq!(board.scene().objects[0].id(), id);
    }

    #[test]
    fn test_text_overlay_rect_clamped_to_viewport() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 790.0, 590.0), now);
        let rect = board.text_overlay_rect().expect("overlay rect");
        assert!(rect.x1 <= 800.0);
        assert!(rect.y1 <= 600.0);
        assert!(rect.x0 >= 0.0);
        assert!(rect.y0 >= 0.0);
        board.handle_input(key(Key::Escape, Modifiers::default()), now);
    }

    #[test]
    fn test_undo_revalidates_selection() {
        let mut board = board();
        let now = t0();
        draw_rect(&mut board, now, 0.0, 0.0, 50.0, 50.0);
        assert!(board.selection().is_some());
        board.undo(now);
        assert_eq!(board.selection(), None);
    }

    #[test]
    fn test_erase_strokes_keep_erase_mode() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Eraser, now);
        board.handle_input(pointer(1, PointerPhase::Down, 0.0, 0.0), now);
        board.handle_input(pointer(1, PointerPhase::Move, 20.0, 0.0), now);
        board.handle_input(pointer(1, PointerPhase::Up, 20.0, 0.0), now);
        match &board.scene().objects[0] {
            DrawObject::Path(path) => assert_eq!(path.mode, StrokeMode::Erase),
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn test_set_color_updates_view_and_open_edit() {
        let mut board = board();
        let now = t0();
        board.set_tool(Tool::Text, now);
        board.handle_input(pointer(1, PointerPhase::Down, 10.0, 10.0), now);
        let red = Rgba::new(220, 40, 40, 255);
        board.set_color(red, now);
        board.set_text_buffer("red note");
        board.handle_input(key(Key::Enter, Modifiers::default()), now);
        match &board.scene().objects[0] {
            DrawObject::Text(label) => assert_eq!(label.color, red),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
