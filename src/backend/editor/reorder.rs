// src/backend/editor/reorder.rs
// Turns a drag (pointer or keyboard) over a rendered list into one move.

use crate::editor::collection::{ItemKey, OrderedCollection};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// On-screen rectangle of one rendered item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemBounds {
    pub key: ItemKey,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ItemBounds {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.left + self.width && p.y >= self.top && p.y <= self.top + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyboardStep {
    Up,
    Down,
}

/// The single reorder a completed gesture produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInstruction {
    pub key: ItemKey,
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    Moved(MoveInstruction),
    /// Escape, a release outside the list, or no gesture in progress.
    Cancelled,
    /// Items were inserted or removed while dragging.
    Aborted,
}

#[derive(Clone, Debug)]
struct Drag {
    collection_id: u64,
    key: ItemKey,
    origin: usize,
    target: Option<usize>,
    len: usize,
    // Empty for keyboard drags.
    layout: Vec<ItemBounds>,
    start: Point,
    offset: Point,
    structure_version: u64,
}

impl Drag {
    fn still_valid_for<T>(&self, collection: &OrderedCollection<T>) -> bool {
        self.collection_id == collection.id() && self.structure_version == collection.structure_version()
    }
}

#[derive(Clone, Debug, Default)]
enum GestureState {
    #[default]
    Idle,
    Dragging(Drag),
}

/// Per-list gesture state machine: `Idle -> Dragging -> Idle`.
///
/// Nothing touches the collection until `finish`, which issues at most one
/// `move_to`. The gesture is bound to the collection it started on; observing
/// or finishing it against another collection aborts it.
#[derive(Clone, Debug, Default)]
pub struct ReorderGesture {
    state: GestureState,
}

impl ReorderGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn dragged_key(&self) -> Option<ItemKey> {
        match &self.state {
            GestureState::Dragging(drag) => Some(drag.key),
            GestureState::Idle => None,
        }
    }

    /// Position the item would land on if dropped now.
    pub fn target_position(&self) -> Option<usize> {
        match &self.state {
            GestureState::Dragging(drag) => drag.target,
            GestureState::Idle => None,
        }
    }

    /// Transient offset of the dragged item from where the pointer went down.
    pub fn visual_offset(&self) -> Point {
        match &self.state {
            GestureState::Dragging(drag) => drag.offset,
            GestureState::Idle => Point::default(),
        }
    }

    /// Starts a pointer drag on the item under `point`.
    ///
    /// `layout` must list the rendered items in position order; a layout that
    /// does not match the collection is stale and starts nothing.
    pub fn pointer_down<T>(
        &mut self,
        collection: &OrderedCollection<T>,
        layout: Vec<ItemBounds>,
        point: Point,
    ) -> Option<ItemKey> {
        if self.is_dragging() {
            return None;
        }
        let rendered: Vec<ItemKey> = layout.iter().map(|b| b.key).collect();
        if rendered != collection.keys() {
            log::debug!("ignoring drag start on a stale layout");
            return None;
        }
        let origin = layout.iter().position(|b| b.contains(point))?;
        let key = layout[origin].key;
        self.state = GestureState::Dragging(Drag {
            collection_id: collection.id(),
            key,
            origin,
            target: Some(origin),
            len: layout.len(),
            layout,
            start: point,
            offset: Point::default(),
            structure_version: collection.structure_version(),
        });
        Some(key)
    }

    /// Starts a keyboard drag on the focused item.
    pub fn pick_up<T>(&mut self, collection: &OrderedCollection<T>, key: ItemKey) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(origin) = collection.position_of(key) else {
            return false;
        };
        self.state = GestureState::Dragging(Drag {
            collection_id: collection.id(),
            key,
            origin,
            target: Some(origin),
            len: collection.len(),
            layout: Vec::new(),
            start: Point::default(),
            offset: Point::default(),
            structure_version: collection.structure_version(),
        });
        true
    }

    /// Tracks the pointer. The target becomes the item whose center is
    /// nearest, or none when the pointer leaves the list's bounding box.
    pub fn pointer_move(&mut self, point: Point) {
        let GestureState::Dragging(drag) = &mut self.state else {
            return;
        };
        if drag.layout.is_empty() {
            return;
        }
        drag.offset = Point::new(point.x - drag.start.x, point.y - drag.start.y);
        drag.target = if within_list(&drag.layout, point) {
            nearest_center(&drag.layout, point)
        } else {
            None
        };
    }

    /// Moves the keyboard target one slot, clamped to the list.
    pub fn step(&mut self, step: KeyboardStep) {
        let GestureState::Dragging(drag) = &mut self.state else {
            return;
        };
        let current = drag.target.unwrap_or(drag.origin);
        drag.target = Some(match step {
            KeyboardStep::Up => current.saturating_sub(1),
            KeyboardStep::Down => (current + 1).min(drag.len.saturating_sub(1)),
        });
    }

    /// Aborts the drag if the collection gained or lost items since it began.
    /// Returns true when an abort happened.
    pub fn observe<T>(&mut self, collection: &OrderedCollection<T>) -> bool {
        let stale = matches!(&self.state, GestureState::Dragging(drag) if !drag.still_valid_for(collection));
        if stale {
            self.state = GestureState::Idle;
        }
        stale
    }

    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Ends the gesture (pointer release or key confirm), issuing exactly one
    /// move when the drop is valid.
    pub fn finish<T>(&mut self, collection: &mut OrderedCollection<T>) -> GestureOutcome {
        let GestureState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return GestureOutcome::Cancelled;
        };
        if !drag.still_valid_for(collection) {
            log::warn!("drag of {} aborted: list changed during the gesture", drag.key);
            return GestureOutcome::Aborted;
        }
        let Some(target) = drag.target else {
            return GestureOutcome::Cancelled;
        };
        match collection.move_to(drag.key, target) {
            Some(to) => GestureOutcome::Moved(MoveInstruction {
                key: drag.key,
                from: drag.origin,
                to,
            }),
            None => GestureOutcome::Aborted,
        }
    }
}

fn within_list(layout: &[ItemBounds], p: Point) -> bool {
    let left = layout.iter().map(|b| b.left).fold(f64::INFINITY, f64::min);
    let top = layout.iter().map(|b| b.top).fold(f64::INFINITY, f64::min);
    let right = layout.iter().map(|b| b.left + b.width).fold(f64::NEG_INFINITY, f64::max);
    let bottom = layout.iter().map(|b| b.top + b.height).fold(f64::NEG_INFINITY, f64::max);
    p.x >= left && p.x <= right && p.y >= top && p.y <= bottom
}

// Ties go to the earlier position.
fn nearest_center(layout: &[ItemBounds], p: Point) -> Option<usize> {
    layout
        .iter()
        .enumerate()
        .map(|(i, b)| (i, b.center().distance_squared(p)))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}
