mod renderthing;

use std::{cell::RefCell, rc::Rc, time::Instant};

use anyhow::Context;
use libca::pos::Position;
use renderthing::{
    frame::RenderFrame,
    window::{run_window, RendererWindowConfig},
};
use tracing::{debug, error, info};
use winit::{
    dpi::PhysicalPosition,
    event::{KeyEvent, MouseButton, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::{config::ClientConfig, State};

const BACKGROUND_COLOR: [u8; 4] = [10, 10, 10, 255];

pub fn run(state: State, config: &ClientConfig) -> anyhow::Result<()> {
    let width = window_side(state.simulation.width(), config.cell_side)
        .context("Window width doesn't fit in u32")?;
    let height = window_side(state.simulation.height(), config.cell_side)
        .context("Window height doesn't fit in u32")?;

    let renderer_state = RendererState {
        global_state: state,
        cell_side: config.cell_side,
        mouse_tile_pos: None,
        mouse_pressed: false,
    };

    // Both callbacks live on the event loop thread and never run at the same time.
    let renderer_state_rc = Rc::new(RefCell::new(renderer_state));
    let draw_state_rc = renderer_state_rc.clone();
    let event_state_rc = renderer_state_rc.clone();

    info!("starting renderer, space toggles, s steps, c clears, r reseeds");

    run_window(RendererWindowConfig {
        title: config.title.clone(),
        width,
        height,
        target_fps: config.target_fps,
        draw_callback: Box::new(move |frame| {
            draw(&mut draw_state_rc.borrow_mut(), frame);
        }),
        event_callback: Some(Box::new(move |event| {
            on_event(&mut event_state_rc.borrow_mut(), event);
        })),
    })
}

fn window_side(cells: usize, cell_side: u32) -> Option<u32> {
    u32::try_from(cells).ok()?.checked_mul(cell_side)
}

fn draw(state: &mut RendererState, mut frame: RenderFrame) {
    let global_state = &mut state.global_state;

    if global_state.ticker.poll(Instant::now()) {
        global_state.simulation.step();
    }

    let simulation = &global_state.simulation;

    // Cells follow the physical frame size.
    let cell_side = (frame.width / simulation.width() as u32)
        .min(frame.height / simulation.height() as u32)
        .max(1);
    state.cell_side = cell_side;

    frame.fill(BACKGROUND_COLOR);

    for instruction in simulation.paint(cell_side) {
        frame.draw_instruction(&instruction);
    }
}

fn on_event(state: &mut RendererState, event: &WindowEvent) {
    let click = match event {
        WindowEvent::MouseInput {
            state: mouse_state,
            button,
            ..
        } => {
            if *button == MouseButton::Left {
                state.mouse_pressed = mouse_state.is_pressed();
                state.mouse_pressed
            } else {
                false
            }
        }
        WindowEvent::CursorMoved { position, .. } => state.move_cursor(*position),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key,
                    state: key_state,
                    repeat: false,
                    ..
                },
            ..
        } if key_state.is_pressed() => {
            on_key(&mut state.global_state, logical_key);
            false
        }
        _ => false,
    };

    if click {
        if let Some(mouse_tile_pos) = state.mouse_tile_pos {
            state.global_state.simulation.toggle(mouse_tile_pos);
        }
    }
}

fn on_key(state: &mut State, key: &Key) {
    match key {
        Key::Named(NamedKey::Space) => {
            state.ticker.toggle();
            info!(running = state.ticker.is_running(), "toggled animation");
        }
        Key::Named(NamedKey::ArrowRight) => state.simulation.step(),
        Key::Character(c) => match c.as_str() {
            "s" | "S" => state.simulation.step(),
            "c" | "C" => state.simulation.clear(),
            "r" | "R" => match state.simulation.reseed(state.seed) {
                Ok(()) => state.simulation.present(),
                Err(e) => error!("Couldn't reseed: {e}"),
            },
            _ => {}
        },
        _ => {}
    }

    debug!(tick = state.simulation.tick(), "handled key");
}

struct RendererState {
    global_state: State,
    cell_side: u32,
    mouse_tile_pos: Option<Position>,
    mouse_pressed: bool,
}

impl RendererState {
    /// Tracks the tile under the cursor. Returns true when a held button enters a new tile.
    fn move_cursor(&mut self, position: PhysicalPosition<f64>) -> bool {
        let mouse_pos = position.cast::<u32>();

        let tile_pos = Position {
            x: (mouse_pos.x / self.cell_side) as usize,
            y: (mouse_pos.y / self.cell_side) as usize,
        };

        let prev_tile_pos = self.mouse_tile_pos.replace(tile_pos);

        self.mouse_pressed && prev_tile_pos != Some(tile_pos)
    }
}
