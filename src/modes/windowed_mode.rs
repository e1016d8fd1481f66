use softbuffer::{Context, Surface};

use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Theme, Window, WindowId, WindowLevel},
};

use std::{
    num::NonZeroU32,
    sync::mpsc::{self, SyncSender},
    thread,
    time::Duration,
};

use crate::{data::*, error::AppError};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    prog: Program,
    window: Option<&'static Window>,
    surface: Option<WindowSurface>,
    exit_sender: Option<SyncSender<()>>,
    final_buffer_size: PhysicalSize<u32>,
    error: Option<AppError>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so a second
        // resume must not create another one.
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if let Some(err) = self.window.as_ref().and_then(|w| w.drag_window().err()) {
                    warn!("error dragging window: {err}");
                }
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
                    return;
                };

                self.final_buffer_size = PhysicalSize::new(width, height);

                if let Err(e) = surface.resize(w, h) {
                    self.fail(event_loop, e.into());
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                if let Key::Named(NamedKey::Escape) = event.logical_key {
                    event_loop.exit();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(window) = self.window else {
                    return;
                };

                self.prog.update();
                self.prog.render();

                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                match surface.buffer_mut() {
                    Ok(mut buffer) => {
                        self.prog.pix.scale_to(
                            self.prog.scale() as usize,
                            &mut buffer,
                            self.final_buffer_size.width as usize,
                        );

                        window.pre_present_notify();
                        if let Err(e) = buffer.present() {
                            warn!("failing to present buffer to the window: {e}");
                        }
                    }

                    Err(e) => warn!("unable to get the window buffer: {e}"),
                }
            }

            _ => {}
        }
    }
}

impl WindowState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        self.prog.print_startup_info();

        let scale = self.prog.scale() as u32;
        let win_size = PhysicalSize::<u32>::new(
            self.prog.pix.width() as u32 * scale,
            self.prog.pix.height() as u32 * scale,
        );

        let window_attributes = Window::default_attributes()
            .with_title("bubblefield")
            .with_inner_size(win_size)
            .with_window_level(WindowLevel::Normal)
            .with_transparent(false)
            .with_resizable(false)
            .with_theme(Some(Theme::Dark));

        let window: &'static Window =
            Box::leak(Box::new(event_loop.create_window(window_attributes)?));
        self.window = Some(window);

        // Some window managers ignore the resizable hint.
        window.set_min_inner_size(Some(win_size));
        window.set_max_inner_size(Some(win_size));

        let size = window.inner_size();
        self.final_buffer_size = size;

        let context = Context::new(window)?;
        let mut surface = Surface::new(&context, window)?;

        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface.resize(w, h)?;
        }

        self.surface = Some(surface);

        if self.prog.get_rr_mode() != RefreshRateMode::Specified {
            Self::check_refresh_rate(window, &mut self.prog);
        }

        let (exit_send, exit_recv) = mpsc::sync_channel(1);
        self.exit_sender = Some(exit_send);

        let interval = self.prog.get_rr_interval();

        // Thread to control requesting redraws.
        thread::Builder::new()
            .name("redraw".into())
            .spawn(move || redraw_loop(window, interval, exit_recv))?;

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: AppError) {
        error!("{e}");
        self.error.get_or_insert(e);
        event_loop.exit();
    }

    fn check_refresh_rate(window: &Window, prog: &mut Program) {
        let Some(Some(mut milli_hz)) = window
            .current_monitor()
            .map(|m| m.refresh_rate_millihertz())
        else {
            warn!(
                "unable to query the monitor's refresh rate, staying at {}hz",
                prog.get_milli_hz() as f32 / 1000.0
            );
            return;
        };

        if milli_hz == prog.get_milli_hz() {
            return;
        }

        info!(
            "detected refresh rate {}hz, run with --fps to lock it",
            milli_hz as f32 / 1000.0
        );

        if milli_hz > CAP_MILLI_HZ {
            milli_hz = CAP_MILLI_HZ;
            info!("refresh rate capped to {}hz", CAP_MILLI_HZ / 1000);
        }

        prog.change_fps_frac(milli_hz);
    }
}

fn redraw_loop(window: &'static Window, interval: Duration, exit_recv: mpsc::Receiver<()>) {
    loop {
        match exit_recv.recv_timeout(interval) {
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            _ => break,
        }

        if !window.is_minimized().unwrap_or(false) {
            window.request_redraw();
        }
    }
}

pub fn winit_main(prog: Program) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        final_buffer_size: PhysicalSize::<u32>::new(0, 0),
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    let result = event_loop.run_app(&mut state);

    if let Some(sender) = state.exit_sender.take() {
        let _ = sender.send(());
    }

    result?;

    match state.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
