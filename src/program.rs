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

//! Compiling and linking GL shader programs.

use std::mem;

use glow::HasContext;
use thiserror::Error;

use crate::source::{ShaderSource, Stage};

/// An error raised while talking to the GL driver.
#[derive(Debug, Error)]
pub enum GlError {
    /// A stage failed to compile; carries the driver's full info log.
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: Stage, log: String },

    /// The linked program could not be produced from two compiled stages.
    #[error("failed to link shader program: {0}")]
    Link(String),

    /// The uploaded geometry does not describe a drawable shape.
    #[error("invalid geometry: {0}")]
    Geometry(String),

    #[error("gl error: {0}")]
    Other(String),
}

impl From<String> for GlError {
    fn from(s: String) -> Self {
        GlError::Other(s)
    }
}

pub(crate) trait ResultExt<T, E> {
    fn gl_err(self) -> Result<T, GlError>;
}

impl<T, E: Into<GlError>> ResultExt<T, E> for Result<T, E> {
    fn gl_err(self) -> Result<T, GlError> {
        self.map_err(Into::into)
    }
}

/// Runs a closure when dropped.
pub(crate) struct CallOnDrop<F: FnMut()>(pub(crate) F);

impl<F: FnMut()> Drop for CallOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

/// Compile both stages of `source` and link them into one program.
///
/// If either stage fails to compile the whole operation fails with that
/// stage's diagnostic; no link is attempted. The per-stage shader objects are
/// released once linked (or on any error path), so the returned program is
/// the only GL object the caller owns.
pub fn compile_program<H: HasContext + ?Sized>(
    context: &H,
    source: &ShaderSource,
) -> Result<H::Program, GlError> {
    unsafe {
        let vertex_shader = compile_shader(context, Stage::Vertex, &source.vertex)?;
        let _delete_vertex = CallOnDrop(|| context.delete_shader(vertex_shader));
        let fragment_shader = compile_shader(context, Stage::Fragment, &source.fragment)?;
        let _delete_fragment = CallOnDrop(|| context.delete_shader(fragment_shader));

        let program = context.create_program().gl_err()?;
        let _delete_program = CallOnDrop(|| context.delete_program(program));

        context.attach_shader(program, vertex_shader);
        context.attach_shader(program, fragment_shader);
        let _detach_shaders = CallOnDrop(|| {
            context.detach_shader(program, vertex_shader);
            context.detach_shader(program, fragment_shader);
        });
        context.link_program(program);

        if !context.get_program_link_status(program) {
            return Err(GlError::Link(context.get_program_info_log(program)));
        }

        // The validation result is advisory; link status is the gating check.
        context.validate_program(program);
        let log = context.get_program_info_log(program);
        if !log.trim().is_empty() {
            tracing::warn!("program validation log: {log}");
        }

        mem::forget(_delete_program);
        Ok(program)
    }
}

unsafe fn compile_shader<H: HasContext + ?Sized>(
    context: &H,
    stage: Stage,
    source: &str,
) -> Result<H::Shader, GlError> {
    let shader_type = match stage {
        Stage::Vertex => glow::VERTEX_SHADER,
        Stage::Fragment => glow::FRAGMENT_SHADER,
    };

    let shader = context.create_shader(shader_type).gl_err()?;
    let _delete_shader = CallOnDrop(|| context.delete_shader(shader));

    context.shader_source(shader, source);
    context.compile_shader(shader);

    if !context.get_shader_compile_status(shader) {
        let log = context.get_shader_info_log(shader);
        tracing::error!("failed to compile {stage} shader:\n{log}");
        return Err(GlError::Compile { stage, log });
    }

    mem::forget(_delete_shader);
    Ok(shader)
}

/// Poll for a pending GL error and report it.
pub(crate) fn check_gl_error<H: HasContext + ?Sized>(context: &H) {
    let err = unsafe { context.get_error() };

    if err != glow::NO_ERROR {
        let error_str = match err {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
            _ => "Unknown GL error",
        };

        tracing::error!("GL error: {}", error_str);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_names_the_stage() {
        let err = GlError::Compile {
            stage: Stage::Fragment,
            log: "0:3(1): error: syntax error".into(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("syntax error"));
    }

    #[test]
    fn test_object_creation_errors_convert() {
        let result: Result<(), String> = Err("driver said no".into());
        assert!(matches!(result.gl_err(), Err(GlError::Other(_))));
    }
}
