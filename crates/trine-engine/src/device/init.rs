/// Parameters for the GL context request.
///
/// The defaults mirror a conventional desktop setup: a 3.3 core profile with
/// 4x multisampling and vsync.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested context version as `(major, minor)`.
    pub version: (u8, u8),

    /// Preferred multisample count for the default framebuffer. `0` asks for
    /// no MSAA.
    ///
    /// A hint, not a requirement: among the configs the platform offers, the
    /// one with the closest count is picked, possibly one without MSAA.
    pub samples: u8,

    /// Synchronize presentation with the display refresh.
    pub vsync: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            samples: 4,
            vsync: true,
        }
    }
}
