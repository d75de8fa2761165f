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

//! The GPU half of the draw loop.

use glow::HasContext;

use crate::mesh::Mesh;
use crate::program::{check_gl_error, compile_program, CallOnDrop, GlError};
use crate::source::ShaderSource;

const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.12, 1.0];

/// Owns the GL context, the linked program and the uploaded shape, and draws
/// the shape with exactly one draw call per frame.
///
/// The context must be current when the renderer is created and stay current
/// for every other call, including the final drop.
pub struct Renderer<H: HasContext> {
    program: H::Program,
    mesh: Mesh<H>,
    context: H,
}

impl<H: HasContext> Renderer<H> {
    /// Compile `source` into a program and upload the shape described by
    /// `vertices` (pairs of 2D coordinates) and, optionally, `indices`.
    pub fn new(
        context: H,
        source: &ShaderSource,
        vertices: &[f32],
        indices: Option<&[u32]>,
    ) -> Result<Self, GlError> {
        let version = context.version();
        tracing::info!(
            "OpenGL{} {}.{}",
            if version.is_embedded { " ES" } else { "" },
            version.major,
            version.minor
        );

        let has_supported_version = if version.is_embedded {
            version.major >= 3
        } else {
            version.major >= 4 || (version.major == 3 && version.minor >= 3)
        };
        if !has_supported_version {
            return Err(GlError::Other(
                "OpenGL 3.3 (or 3.0 ES) or higher is required".into(),
            ));
        }

        let program = compile_program(&context, source)?;
        let mesh = match Mesh::new(&context, program, vertices, indices) {
            Ok(mesh) => mesh,
            Err(e) => {
                unsafe { context.delete_program(program) };
                return Err(e);
            }
        };

        Ok(Renderer {
            program,
            mesh,
            context,
        })
    }

    /// Clear the color buffer and draw the shape.
    pub fn frame(&self) {
        unsafe {
            let [r, g, b, a] = CLEAR_COLOR;
            self.context.clear_color(r, g, b, a);
            self.context.clear(glow::COLOR_BUFFER_BIT);

            self.context.use_program(Some(self.program));
            let _unbind_program = CallOnDrop(|| self.context.use_program(None));

            self.mesh.draw(&self.context);
        }

        check_gl_error(&self.context);
    }

    /// Match the viewport to a new surface size.
    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            self.context.viewport(0, 0, width as i32, height as i32);
        }
    }
}

impl<H: HasContext> Drop for Renderer<H> {
    fn drop(&mut self) {
        self.mesh.destroy(&self.context);
        unsafe {
            self.context.delete_program(self.program);
        }
    }
}
