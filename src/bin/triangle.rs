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

//! Draws a triangle in direct vertex order.
//!
//! Near-duplicate of the `quad` binary; the only difference is that the shape
//! is three vertices drawn without an index buffer.

use std::env;
use std::error::Error;
use std::num::NonZeroU32;

use glow_basics::{Renderer, ShaderSource, WindowContext};

use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;

const VERTICES: [f32; 6] = [
    -0.5, -0.5, // 0
    0.5, -0.5, // 1
    0.0, 0.5, // 2
];

const DEFAULT_SHADER_PATH: &str = "resources/shaders/basic.shader";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let event_loop = EventLoop::new();
    let window = WindowContext::new(&event_loop, "triangle", 640, 480)?;

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SHADER_PATH.into());
    let source = ShaderSource::from_path(&path)?;
    let renderer = Renderer::new(window.create_glow_context(), &source, &VERTICES, None)?;

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => control_flow.set_exit(),
                WindowEvent::Resized(size) => {
                    if let (Some(width), Some(height)) =
                        (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                    {
                        window.resize(width, height);
                        renderer.resize(size.width, size.height);
                    }
                }
                _ => (),
            },
            Event::MainEventsCleared => window.window().request_redraw(),
            Event::RedrawRequested(_) => {
                renderer.frame();
                if let Err(e) = window.swap_buffers() {
                    tracing::error!("failed to present frame: {e}");
                }
            }
            _ => (),
        }
    })
}
