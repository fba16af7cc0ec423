use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{should_exit, App, AppControl, FrameCtx, WindowCtx};
use crate::device::{GlContext, GlInit, InitError};
use crate::input::{InputEvent, InputState, Key, KeyState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gl: GlInit,

    /// Latch key presses until the frame loop has polled them.
    pub sticky_keys: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trine".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            gl: GlInit::default(),
            sticky_keys: true,
        }
    }
}

/// Runtime context passed to the application.
///
/// Requests are applied after the current frame has been presented.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit_requested: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs the frame loop until it exits.
    ///
    /// Initialization failures (windowing system, window, context, loader,
    /// `App::on_start`) are returned as errors.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().map_err(|e| InitError::Platform(e.to_string()))?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.into_result()
    }
}

struct WindowEntry {
    context: GlContext,
    input: InputState,
    clock: FrameClock,
    close_requested: bool,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    finished: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            entry: None,
            failure: None,
            finished: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let context = GlContext::new(event_loop, attrs, &self.config.gl)?;

        self.app
            .on_start(context.gl(), WindowCtx { window: context.window() })
            .context("application failed to start")?;

        let mut entry = WindowEntry {
            context,
            input: InputState::new(self.config.sticky_keys),
            clock: FrameClock::new(),
            close_requested: false,
        };

        // Exclude setup time (shader compilation, uploads) from the first delta.
        entry.clock.reset();
        entry.context.window().request_redraw();

        self.entry = Some(entry);
        Ok(())
    }

    /// Whether `resumed` should bring up the window and context.
    fn can_start(&self) -> bool {
        self.entry.is_none() && !self.finished
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.record_failure(err);
        self.shutdown(event_loop);
    }

    /// Keeps the first failure; later ones are only logged.
    fn record_failure(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.teardown();
        event_loop.exit();
    }

    /// Runs `App::on_exit` while the context is still alive, then drops it.
    ///
    /// `on_exit` only runs if `on_start` succeeded, since that is what
    /// installs the window entry.
    fn teardown(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.app.on_exit(entry.context.gl());
            log::info!("shutting down");
        }

        self.finished = true;
    }

    fn into_result(mut self) -> Result<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn render_frame(&mut self) -> Result<()> {
        let Some(entry) = self.entry.as_mut() else {
            return Ok(());
        };

        let time = entry.clock.tick();
        let mut runtime = RuntimeCtx::default();

        let control = {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: entry.context.window(),
                },
                gl: entry.context.gl(),
                input: &entry.input,
                time,
                runtime: &mut runtime,
            };

            self.app.on_frame(&mut ctx)
        };

        entry
            .context
            .present()
            .context("failed to present frame")?;

        if control == AppControl::Exit || runtime.exit_requested() {
            entry.close_requested = true;
        }

        Ok(())
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.can_start() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        // All pending events have been applied: this is the loop's exit check.
        if should_exit(&mut entry.input, entry.close_requested) {
            self.shutdown(event_loop);
            return;
        }

        // Continuous redraw; vsync in `present` paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        entry.context.window().request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if entry.context.window().id() != window_id {
            return;
        }

        if let Some(ev) = translate_input_event(&event) {
            entry.input.apply_event(&ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            entry.close_requested = true;
        }

        match event {
            WindowEvent::CloseRequested => {
                entry.close_requested = true;
            }

            WindowEvent::Resized(new_size) => {
                entry.context.resize(new_size);
                entry.context.window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.context.window().inner_size();
                entry.context.resize(new_size);
            }

            // Covers both our own redraw requests and OS refreshes (expose,
            // un-minimize): either way a full frame is rendered and presented.
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render_frame() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}

fn translate_input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
            })
        }

        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::Tab => Key::Tab,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use winit::keyboard::NativeKeyCode;

    /// App whose start always fails; counts `on_exit` calls.
    struct FailingApp {
        exits: Rc<Cell<u32>>,
    }

    impl App for FailingApp {
        fn on_start(&mut self, _gl: &glow::Context, _window: WindowCtx<'_>) -> Result<()> {
            anyhow::bail!("shader directory missing")
        }

        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_>) -> AppControl {
            AppControl::Continue
        }

        fn on_exit(&mut self, _gl: &glow::Context) {
            self.exits.set(self.exits.get() + 1);
        }
    }

    fn failing_state() -> (AppState<FailingApp>, Rc<Cell<u32>>) {
        let exits = Rc::new(Cell::new(0));
        let app = FailingApp {
            exits: Rc::clone(&exits),
        };
        (AppState::new(RuntimeConfig::default(), app), exits)
    }

    #[test]
    fn fresh_state_can_start_and_succeeds() {
        let (state, _) = failing_state();
        assert!(state.can_start());
        assert!(state.into_result().is_ok());
    }

    #[test]
    fn start_failure_is_returned_without_running_on_exit() {
        let (mut state, exits) = failing_state();

        state.record_failure(
            anyhow::Error::from(InitError::Loader {
                symbol: "glCreateShader".to_string(),
            })
            .context("application failed to start"),
        );
        state.teardown();

        assert_eq!(exits.get(), 0);
        assert!(!state.can_start());

        let err = state.into_result().unwrap_err();
        assert_eq!(err.to_string(), "application failed to start");
        assert!(format!("{err:#}").contains("glCreateShader"));
    }

    #[test]
    fn first_failure_wins() {
        let (mut state, _) = failing_state();

        state.record_failure(anyhow::anyhow!("window creation failed"));
        state.record_failure(anyhow::anyhow!("present failed"));
        state.teardown();

        let err = state.into_result().unwrap_err();
        assert_eq!(err.to_string(), "window creation failed");
    }

    #[test]
    fn escape_maps_to_escape() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }

    #[test]
    fn unnamed_keys_keep_their_code() {
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::KeyQ)),
            Key::Unknown(KeyCode::KeyQ as u32)
        );
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Unknown(0)
        );
    }

    #[test]
    fn default_config_requests_core_33() {
        let config = RuntimeConfig::default();
        assert_eq!(config.gl.version, (3, 3));
        assert!(config.sticky_keys);
        assert_eq!(config.initial_size, LogicalSize::new(1024.0, 768.0));
    }

    #[test]
    fn runtime_ctx_records_exit() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.exit_requested());
        ctx.exit();
        assert!(ctx.exit_requested());
    }
}
