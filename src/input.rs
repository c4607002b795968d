use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer events in canvas coordinates (origin at the canvas' top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved over the canvas, with or without the button held
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown { position }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position } => *position,
        }
    }
}

/// The parts of one frame's pointer state the canvas cares about
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Pointer position in screen coordinates, if the pointer is over the window
    pub hover_pos: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    /// The canvas is the topmost widget under the pointer (no popup or panel covers it)
    pub canvas_hovered: bool,
}

impl PointerSnapshot {
    pub fn from_context(ctx: &Context, canvas_hovered: bool) -> Self {
        ctx.input(|input| Self {
            hover_pos: input.pointer.hover_pos(),
            pressed: input.pointer.button_pressed(PointerButton::Primary),
            released: input.pointer.button_released(PointerButton::Primary),
            canvas_hovered,
        })
    }
}

/// Handles converting raw egui input into canvas InputEvents
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if the toolbar changed height)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process raw egui input and generate InputEvents.
    /// `canvas_hovered` comes from the canvas widget's response.
    pub fn process_input(&mut self, ctx: &Context, canvas_hovered: bool) -> Vec<InputEvent> {
        self.translate(PointerSnapshot::from_context(ctx, canvas_hovered))
    }

    /// Turn one frame of pointer state into events, in down, move, up order.
    /// Down only fires when the canvas itself is hovered and move only over the
    /// canvas rect. A press does not also move, so a click draws nothing.
    /// Up fires anywhere so a stroke cannot get stuck when the button is
    /// released outside.
    pub fn translate(&mut self, snapshot: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let Some(pos) = snapshot.hover_pos else {
            self.last_pointer_pos = None;
            if snapshot.released {
                events.push(InputEvent::PointerUp { position: Pos2::ZERO });
            }
            return events;
        };

        let in_canvas = self.canvas_rect.contains(pos);
        let position = self.to_canvas(pos);

        let pressed = snapshot.pressed && in_canvas && snapshot.canvas_hovered;
        if pressed {
            events.push(InputEvent::PointerDown { position });
        } else if Some(pos) != self.last_pointer_pos && in_canvas {
            events.push(InputEvent::PointerMove { position });
        }
        if snapshot.released {
            events.push(InputEvent::PointerUp { position });
        }

        self.last_pointer_pos = Some(pos);
        events
    }
}
