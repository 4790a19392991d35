use std::collections::VecDeque;

use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{DisplayInit, Gpu};
use crate::error::FatalError;
use crate::frame::{LoopDriver, Pump};
use crate::input::{Event, EventDispatch, Key, Reaction};
use crate::time::FrameClock;

/// Window/runtime configuration. The window is created once, non-resizable,
/// at a fixed physical resolution.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: PhysicalSize<u32>,
    pub display: DisplayInit,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tiamat".to_string(),
            size: PhysicalSize::new(800, 600),
            display: DisplayInit::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the loop to completion.
    ///
    /// Returns `Ok(())` on a quit-triggered shutdown and the first fatal
    /// error otherwise. Resources are released in reverse-acquisition order
    /// as the handler state drops.
    pub fn run<A>(
        config: RuntimeConfig,
        dispatch: EventDispatch,
        driver: LoopDriver,
        app: A,
    ) -> Result<(), FatalError>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new()
            .map_err(|e| FatalError::resource("creating event loop", e))?;

        let mut state = RuntimeState::new(config, dispatch, driver, app);

        event_loop
            .run_app(&mut state)
            .map_err(|e| FatalError::resource("running event loop", e))?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// The surface borrows the window; tying both into one entry keeps that
// borrow sound without a static window.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    dispatch: EventDispatch,
    driver: LoopDriver,
    pending: VecDeque<Event>,
    clock: FrameClock,

    entry: Option<WindowEntry>,
    fatal: Option<FatalError>,
    exit_requested: bool,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, dispatch: EventDispatch, driver: LoopDriver, app: A) -> Self {
        Self {
            config,
            app,
            dispatch,
            driver,
            pending: VecDeque::new(),
            clock: FrameClock::new(),
            entry: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn abort(&mut self, event_loop: &ActiveEventLoop, err: FatalError) {
        log::error!("fatal: {err}");
        self.fatal = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<(), FatalError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| FatalError::resource("creating window", e))?;

        let display = self.config.display.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, display)),
        }
        .try_build()?;

        self.entry = Some(entry);
        Ok(())
    }

    /// Pumps the driver until it either renders one frame or shuts down.
    /// Exactly one pending event is drained per pump.
    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        let mut failure: Option<FatalError> = None;
        let mut shutdown = false;

        // Split borrows: the pump needs driver/queue/dispatch while the
        // frame context borrows the gpu out of the ouroboros entry.
        {
            let RuntimeState {
                app,
                dispatch,
                driver,
                pending,
                clock,
                entry,
                ..
            } = self;

            let Some(entry) = entry.as_ref() else { return };

            loop {
                match driver.pump(pending, dispatch) {
                    Pump::Handled(Reaction::RequestClose) => {
                        // The exit key asks the window layer to close; the
                        // layer's policy here is to honor it as a quit.
                        log::info!("close requested via exit key");
                        pending.push_back(Event::Quit);
                    }
                    Pump::Handled(Reaction::None) => {}

                    Pump::Render(plan) => {
                        let time = clock.tick();
                        if time.frame_index % 600 == 0 {
                            log::trace!("frame {} dt {:.4}s", time.frame_index, time.dt);
                        }

                        let mut ctx = FrameCtx {
                            gpu: entry.borrow_gpu(),
                            plan: &plan,
                            time,
                        };

                        match app.on_frame(&mut ctx) {
                            Ok(AppControl::Continue) => {
                                driver.finish_frame();
                                entry.borrow_window().request_redraw();
                            }
                            Ok(AppControl::Exit) => {
                                driver.finish_frame();
                                pending.push_back(Event::Quit);
                                entry.borrow_window().request_redraw();
                            }
                            Err(err) => {
                                failure = Some(err);
                            }
                        }
                        break;
                    }

                    Pump::Shutdown => {
                        shutdown = true;
                        break;
                    }
                }
            }
        }

        if let Some(err) = failure {
            self.abort(event_loop, err);
        } else if shutdown {
            self.exit_requested = true;
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(err) = self.create_window_entry(event_loop) {
            self.abort(event_loop, err);
            return;
        }

        // Split borrows: `on_ready` must not capture `self` inside the
        // ouroboros accessor.
        let ready = match (&mut self.app, self.entry.as_ref()) {
            (app, Some(entry)) => {
                let result = app.on_ready(entry.borrow_gpu());
                if result.is_ok() {
                    entry.borrow_window().request_redraw();
                }
                result
            }
            _ => Ok(()),
        };

        if let Err(err) = ready {
            self.abort(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw: presentation's sync interval is the only
        // frame pacing.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = self.entry.as_ref() {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.pending.push_back(Event::Quit);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    self.pending
                        .push_back(Event::KeyDown(map_key(event.physical_key)));
                }
            }

            WindowEvent::Focused(_) => {
                self.pending.push_back(Event::Other);
            }

            WindowEvent::RedrawRequested => {
                self.drive_frame(event_loop);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            other => Key::Unknown(other as u32),
        },
        // No stable numeric for unidentified platform keys.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
