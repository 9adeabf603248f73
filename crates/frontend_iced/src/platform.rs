//! Windowing backend selection on Linux.

/// Overrides the automatically chosen backend (`x11` or `wayland`).
#[cfg(target_os = "linux")]
const BACKEND_ENV: &str = "LUCIEN_BACKEND";

/// Picks a winit backend from an explicit request, else from the running session.
///
/// Returns `None` when winit should be left to decide.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn choose_backend(requested: Option<&str>, has_wayland: bool, has_x11: bool) -> Option<&'static str> {
	match requested.map(str::to_ascii_lowercase).as_deref() {
		Some("wayland") => return Some("wayland"),
		Some("x11") => return Some("x11"),
		_ => {}
	}

	if has_wayland {
		Some("wayland")
	} else if has_x11 {
		Some("x11")
	} else {
		None
	}
}

#[cfg(target_os = "linux")]
pub(crate) fn configure_linux_backend() {
	if std::env::var_os("WINIT_UNIX_BACKEND").is_some() {
		return;
	}

	let requested = std::env::var(BACKEND_ENV).ok();
	let backend = choose_backend(
		requested.as_deref(),
		std::env::var_os("WAYLAND_DISPLAY").is_some(),
		std::env::var_os("DISPLAY").is_some(),
	);

	if let Some(backend) = backend {
		tracing::debug!(backend, "selected winit backend");
		unsafe {
			// SAFETY: Called from `run` before iced starts its event loop or any
			// other thread, so nothing reads the environment concurrently.
			std::env::set_var("WINIT_UNIX_BACKEND", backend);
		}
	}
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn configure_linux_backend() {}
