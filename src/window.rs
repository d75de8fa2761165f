// SPDX-License-Identifier: LGPL-3.0-or-later OR MPL-2.0
// This file is a part of `glow-basics`.
//
// `glow-basics` is free software: you can redistribute it and/or modify it under the terms of
// either:
//
// * GNU Lesser General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
// * Mozilla Public License as published by the Mozilla Foundation, version 2.
//
// `glow-basics` is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Lesser General Public License or the Mozilla Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License and the Mozilla
// Public License along with `glow-basics`. If not, see <https://www.gnu.org/licenses/> or
// <https://www.mozilla.org/en-US/MPL/2.0/>.

//! glutin + winit glue: window, GL context and surface creation.

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};

use raw_window_handle::HasRawWindowHandle;

use std::error::Error;
use std::num::NonZeroU32;

use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

/// A window with a current GL context and surface.
///
/// Everything here is process-wide init/use/terminate state; it is created
/// once in `main` and lives until the event loop tears the process down.
pub struct WindowContext {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    display: Display,
}

impl WindowContext {
    /// Build the window, pick a config, and make a GL context current on it.
    ///
    /// Failure here is fatal; callers propagate it out of `main`.
    pub fn new(
        event_loop: &EventLoop<()>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Self, Box<dyn Error>> {
        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height));

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let (window, gl_config) = display_builder.build(
            event_loop,
            ConfigTemplateBuilder::new().with_alpha_size(8),
            |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            },
        )?;
        let window = window.ok_or("no window was created for the display")?;

        // Ask for 3.3 core first, then whatever GLES the driver offers.
        let window_handle = window.raw_window_handle();
        let context_attributes = [
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
                .build(Some(window_handle)),
            ContextAttributesBuilder::new()
                .with_context_api(ContextApi::Gles(None))
                .build(Some(window_handle)),
        ];

        let display = gl_config.display();
        let context = context_attributes
            .iter()
            .find_map(|attributes| unsafe { display.create_context(&gl_config, attributes).ok() })
            .ok_or("could not create a GL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let surface = unsafe { display.create_window_surface(&gl_config, &attrs)? };
        let context = context.make_current(&surface)?;

        if let Err(e) =
            surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
        {
            tracing::warn!("failed to enable vsync: {e:?}");
        }

        Ok(Self {
            window,
            surface,
            context,
            display,
        })
    }

    /// Build a [`glow`] context over the current GL context.
    ///
    /// Driver debug messages are forwarded to `tracing` where the platform
    /// supports the debug-output extension.
    pub fn create_glow_context(&self) -> glow::Context {
        let mut context = unsafe {
            glow::Context::from_loader_function_cstr(|s| {
                self.display.get_proc_address(s) as *const _
            })
        };

        #[cfg(not(target_vendor = "apple"))]
        unsafe {
            use glow::HasContext;

            context.enable(glow::DEBUG_OUTPUT);
            context.debug_message_callback(debug_message_callback);
        }

        context
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resize the GL surface. Required on EGL platforms like Wayland; a
    /// no-op elsewhere, but wise to call for portability.
    pub fn resize(&self, width: NonZeroU32, height: NonZeroU32) {
        self.surface.resize(&self.context, width, height);
    }

    pub fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}

#[cfg(not(target_vendor = "apple"))]
fn debug_message_callback(source: u32, ty: u32, id: u32, severity: u32, message: &str) {
    let source = match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        glow::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    };

    let ty = match ty {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        glow::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    };

    match severity {
        glow::DEBUG_SEVERITY_HIGH => {
            tracing::error!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_MEDIUM => {
            tracing::warn!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_LOW => {
            tracing::info!("{ty}-{id} ({source}): {message}");
        }
        glow::DEBUG_SEVERITY_NOTIFICATION => {
            tracing::debug!("{ty}-{id} ({source}): {message}");
        }
        _ => (),
    };
}
