use std::ffi::{c_void, CStr};

use super::InitError;

/// Entry points the engine calls directly. If any of these is missing the
/// driver cannot run the shader/buffer path at all.
pub const REQUIRED_SYMBOLS: &[&CStr] = &[
    c"glGetString",
    c"glClear",
    c"glCreateShader",
    c"glCompileShader",
    c"glCreateProgram",
    c"glLinkProgram",
    c"glGenVertexArrays",
    c"glGenBuffers",
    c"glBufferData",
    c"glDrawArrays",
];

/// Verifies that every required GL entry point resolves.
///
/// `resolve` is normally `GlDisplay::get_proc_address`. Fails iff it returns
/// a null pointer for some symbol.
pub fn probe_loader<F>(mut resolve: F) -> Result<(), InitError>
where
    F: FnMut(&CStr) -> *const c_void,
{
    for symbol in REQUIRED_SYMBOLS {
        if resolve(*symbol).is_null() {
            return Err(InitError::Loader {
                symbol: symbol.to_string_lossy().into_owned(),
            });
        }
        log::trace!("resolved {}", symbol.to_string_lossy());
    }

    log::debug!("GL loader resolved {} entry points", REQUIRED_SYMBOLS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_null() -> *const c_void {
        std::ptr::NonNull::<u8>::dangling().as_ptr() as *const c_void
    }

    #[test]
    fn succeeds_when_everything_resolves() {
        let mut seen = Vec::new();
        let res = probe_loader(|name| {
            seen.push(name.to_owned());
            non_null()
        });

        assert!(res.is_ok());
        assert_eq!(seen.len(), REQUIRED_SYMBOLS.len());
    }

    #[test]
    fn fails_on_first_missing_symbol() {
        let res = probe_loader(|name| {
            if name == c"glGenVertexArrays" {
                std::ptr::null()
            } else {
                non_null()
            }
        });

        match res {
            Err(InitError::Loader { symbol }) => assert_eq!(symbol, "glGenVertexArrays"),
            other => panic!("expected loader error, got {other:?}"),
        }
    }

    #[test]
    fn fails_when_nothing_resolves() {
        let res = probe_loader(|_| std::ptr::null());
        assert!(matches!(res, Err(InitError::Loader { .. })));
    }
}
