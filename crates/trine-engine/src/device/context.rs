use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};

use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{probe_loader, GlInit, InitError};

/// Owns the window together with its current GL context.
///
/// This is the low-level rendering context:
/// - creates the window and picks a framebuffer config
/// - creates a core-profile context of the requested version and makes it current
/// - verifies the function loader and wraps it in a `glow::Context`
/// - presents frames and keeps the surface sized to the window
///
/// Field order is drop order: GL objects go before the surface, the surface
/// before the context, the context before the window.
pub struct GlContext {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlContext {
    /// Opens a window and makes a GL context current on it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<Self, InitError> {
        let (major, minor) = init.version;
        let wanted_samples = init.samples;

        // MSAA stays out of the template: the template is a hard filter, while
        // the sample count is only a preference resolved by the picker.
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        // The picker cannot return an error, so an empty candidate list
        // unwinds out of it with a marker payload that is turned into an
        // `InitError` here. `resume_unwind` skips the panic hook.
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            DisplayBuilder::new()
                .with_window_attributes(Some(attributes))
                .build(event_loop, template, |configs| {
                    match pick_closest(wanted_samples, configs, |c| c.num_samples()) {
                        Some(config) => config,
                        None => panic::resume_unwind(Box::new(NoMatchingConfig)),
                    }
                })
        }));

        let (window, config) = match built {
            Ok(result) => result.map_err(|e| InitError::Window(e.to_string()))?,
            Err(payload) if payload.is::<NoMatchingConfig>() => {
                return Err(InitError::Window(
                    "no framebuffer config matches the request".to_string(),
                ));
            }
            Err(payload) => panic::resume_unwind(payload),
        };

        let window = window
            .ok_or_else(|| InitError::Window("display builder returned no window".to_string()))?;

        log::debug!(
            "picked framebuffer config: {} samples, depth {}",
            config.num_samples(),
            config.depth_size()
        );

        let context_error = |reason: String| InitError::Context { major, minor, reason };

        let raw_window_handle = window.window_handle().ok().map(|h| h.as_raw());
        let display = config.display();

        // Core profile excludes the fixed-function API. On macOS it also implies
        // the forward-compatible flag the platform insists on.
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_window_handle);

        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .map_err(|e| context_error(e.to_string()))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| context_error(e.to_string()))?;

        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .map_err(|e| context_error(e.to_string()))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| context_error(e.to_string()))?;

        probe_loader(|symbol| display.get_proc_address(symbol))?;

        let gl = unsafe { glow::Context::from_loader_function_cstr(|symbol| display.get_proc_address(symbol)) };

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        log::info!("OpenGL {version} on {renderer}");

        if wanted_samples > 0 && config.num_samples() == 0 {
            log::warn!("{wanted_samples}x multisampling unavailable; rendering without MSAA");
        }

        Ok(Self {
            gl,
            surface,
            context,
            window,
        })
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Swaps the back buffer to the screen. Blocks when vsync is on.
    pub fn present(&self) -> glutin::error::Result<()> {
        self.window.pre_present_notify();
        self.surface.swap_buffers(&self.context)
    }

    /// Resizes the surface and the GL viewport.
    ///
    /// A 0x0 size (minimized window) is ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, w, h);
        unsafe {
            self.gl.viewport(0, 0, w.get() as i32, h.get() as i32);
        }
    }
}

/// Unwind payload raised by the config picker when glutin hands it nothing.
struct NoMatchingConfig;

/// Picks the candidate whose sample count is closest to `wanted`.
///
/// Ties keep the earlier candidate, so the driver's ordering decides.
fn pick_closest<T>(
    wanted: u8,
    candidates: impl Iterator<Item = T>,
    samples: impl Fn(&T) -> u8,
) -> Option<T> {
    candidates.reduce(|best, candidate| {
        if samples(&candidate).abs_diff(wanted) < samples(&best).abs_diff(wanted) {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(wanted: u8, counts: &[u8]) -> Option<u8> {
        pick_closest(wanted, counts.iter().copied(), |&n| n)
    }

    #[test]
    fn exact_sample_match_wins() {
        assert_eq!(pick(4, &[0, 8, 4, 2]), Some(4));
    }

    #[test]
    fn falls_back_below_requested_count() {
        assert_eq!(pick(4, &[0, 2]), Some(2));
        assert_eq!(pick(4, &[0]), Some(0));
    }

    #[test]
    fn ties_keep_first_config() {
        assert_eq!(pick(4, &[2, 6]), Some(2));
        assert_eq!(pick(4, &[6, 2]), Some(6));
    }

    #[test]
    fn zero_prefers_single_sampled() {
        assert_eq!(pick(0, &[4, 0, 2]), Some(0));
        assert_eq!(pick(0, &[8, 2]), Some(2));
    }

    #[test]
    fn no_candidates_picks_nothing() {
        assert_eq!(pick(4, &[]), None);
    }

    #[test]
    fn empty_picker_unwind_is_recognizable() {
        let caught = panic::catch_unwind(|| -> u8 {
            match pick(4, &[]) {
                Some(n) => n,
                None => panic::resume_unwind(Box::new(NoMatchingConfig)),
            }
        });

        assert!(caught.unwrap_err().is::<NoMatchingConfig>());
    }
}
