/// Failure while bringing up the window, the GL context or the function loader.
///
/// Every variant is fatal: the runtime stops and `Runtime::run` returns the
/// error, so the process exits with a nonzero status.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The windowing library could not be initialized.
    #[error("failed to initialize the windowing system: {0}")]
    Platform(String),

    /// No window (or no matching GL framebuffer config) could be created.
    #[error("failed to create/open window: {0}")]
    Window(String),

    /// Context creation, surface creation or make-current failed.
    #[error("failed to create OpenGL {major}.{minor} core context: {reason}")]
    Context { major: u8, minor: u8, reason: String },

    /// A required GL entry point did not resolve.
    #[error("failed to initialize the OpenGL function loader: `{symbol}` is unavailable")]
    Loader { symbol: String },
}
