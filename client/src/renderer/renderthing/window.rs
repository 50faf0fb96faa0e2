use std::{sync::Arc, time::Duration};

use anyhow::Context;
use pixels::{wgpu::TextureFormat, Pixels, PixelsBuilder, SurfaceTexture};
use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

/// Opens the window and blocks until it is closed.
pub fn run_window(config: RendererWindowConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Creating event loop")?;
    let mut window = RendererWindow::new(config);

    event_loop
        .run_app(&mut window)
        .context("Running event loop")?;

    info!(frames = window.frames_drawn, "event loop finished");
    Ok(())
}

struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    frames_drawn: u64,
}

impl RendererWindow {
    fn new(config: RendererWindowConfig) -> Self {
        let sleeper = {
            let target_frame_time = Duration::from_micros(1_000_000 / config.target_fps.max(1));
            Sleeper::new(target_frame_time)
        };

        Self {
            config,
            resumed_window: None,
            sleeper,
            frames_drawn: 0,
        }
    }
}

pub struct RendererWindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u64,
    pub draw_callback: Box<dyn FnMut(RenderFrame)>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent)>>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        let window_size = LogicalSize::new(self.config.width, self.config.height);
        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(window_size)
                .with_resizable(true),
        ) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Couldn't create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let pixels = {
            let window_size = window.inner_size();

            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, window.clone());

            PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
                .texture_format(TextureFormat::Rgba8UnormSrgb)
                .build()
        };

        let pixels = match pixels {
            Ok(pixels) => pixels,
            Err(e) => {
                error!("Couldn't create pixels buffer: {e}");
                event_loop.exit();
                return;
            }
        };

        info!(
            width = self.config.width,
            height = self.config.height,
            "window opened"
        );
        window.request_redraw();

        self.resumed_window = Some(ResumedWindow { window, pixels });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow { window, pixels }) = self.resumed_window.as_mut() else {
            return;
        };

        match event {
            WindowEvent::RedrawRequested => {
                let PhysicalSize { width, height } = window.inner_size();

                let next_frame = RenderFrame {
                    width,
                    height,
                    buffer: pixels.frame_mut(),
                };

                (self.config.draw_callback)(next_frame);
                self.frames_drawn += 1;

                if let Err(e) = pixels.render() {
                    error!("Rendering with pixels failed: {e}");
                    event_loop.exit();
                    return;
                }

                // FIXME: Sleeping here stalls the whole event loop, so resizes feel sluggish.
                self.sleeper.sleep();
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if width > 0 && height > 0 {
                    if let Err(e) = pixels.resize_surface(width, height) {
                        error!("Couldn't resize surface: {e}");
                    }
                    if let Err(e) = pixels.resize_buffer(width, height) {
                        error!("Couldn't resize buffer: {e}");
                    }
                }
                window.request_redraw();
            }
            WindowEvent::CloseRequested => {
                info!("window closed");
                event_loop.exit();
            }
            _ => {}
        }

        if let Some(event_callback) = &mut self.config.event_callback {
            event_callback(&event);
        }
    }
}
