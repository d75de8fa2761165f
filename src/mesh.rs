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

//! Static geometry, uploaded once and drawn every frame.

use std::mem;

use glow::HasContext;

use crate::program::{check_gl_error, CallOnDrop, GlError, ResultExt};

/// Floats per vertex; positions are plain 2D coordinates.
const VERTEX_SIZE: i32 = 2;

/// A 2D shape resident on the GPU.
///
/// Owns the vertex buffer, the optional index buffer and the vertex array
/// object. The handles are plain data; the context that created them has to
/// call [`Mesh::destroy`] before it goes away.
pub(crate) struct Mesh<H: HasContext + ?Sized> {
    vao: H::VertexArray,
    vbo: H::Buffer,
    ebo: Option<H::Buffer>,
    count: i32,
}

impl<H: HasContext + ?Sized> Mesh<H> {
    /// Upload `vertices` (and `indices`, for indexed drawing) with a single
    /// `STATIC_DRAW` write each.
    ///
    /// The `aPosition` attribute of `program` is wired to the vertex buffer,
    /// so the program must already be linked.
    pub(crate) fn new(
        context: &H,
        program: H::Program,
        vertices: &[f32],
        indices: Option<&[u32]>,
    ) -> Result<Self, GlError> {
        let count = draw_count(vertices, indices)?;

        unsafe {
            let vao = context.create_vertex_array().gl_err()?;
            let vbo = context.create_buffer().gl_err()?;

            context.bind_vertex_array(Some(vao));
            let _unbind_vao = CallOnDrop(|| context.bind_vertex_array(None));

            context.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            context.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            // The element binding is captured by the VAO.
            let ebo = match indices {
                Some(indices) => {
                    let ebo = context.create_buffer().gl_err()?;
                    context.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    context.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            let location = context
                .get_attrib_location(program, "aPosition")
                .ok_or_else(|| {
                    GlError::Other("failed to get attribute location for aPosition".into())
                })?;
            context.enable_vertex_attrib_array(location);
            context.vertex_attrib_pointer_f32(
                location,
                VERTEX_SIZE,
                glow::FLOAT,
                false,
                VERTEX_SIZE * mem::size_of::<f32>() as i32,
                0,
            );

            check_gl_error(context);

            Ok(Mesh {
                vao,
                vbo,
                ebo,
                count,
            })
        }
    }

    /// Issue the one draw call covering the whole shape.
    pub(crate) fn draw(&self, context: &H) {
        unsafe {
            context.bind_vertex_array(Some(self.vao));
            let _unbind_vao = CallOnDrop(|| context.bind_vertex_array(None));

            match self.ebo {
                Some(_) => {
                    context.draw_elements(glow::TRIANGLES, self.count, glow::UNSIGNED_INT, 0)
                }
                None => context.draw_arrays(glow::TRIANGLES, 0, self.count),
            }
        }
    }

    pub(crate) fn destroy(&self, context: &H) {
        unsafe {
            context.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                context.delete_buffer(ebo);
            }
            context.delete_vertex_array(self.vao);
        }
    }
}

/// Check the shape description and work out how many elements one draw call
/// covers: indices when drawing indexed, vertices otherwise.
fn draw_count(vertices: &[f32], indices: Option<&[u32]>) -> Result<i32, GlError> {
    if vertices.len() % VERTEX_SIZE as usize != 0 {
        return Err(GlError::Geometry(format!(
            "vertex data length {} is not a multiple of {}",
            vertices.len(),
            VERTEX_SIZE
        )));
    }

    let vertex_count = (vertices.len() / VERTEX_SIZE as usize) as u32;
    match indices {
        Some(indices) => {
            if let Some(&out_of_range) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(GlError::Geometry(format!(
                    "index {out_of_range} out of range for {vertex_count} vertices"
                )));
            }
            Ok(indices.len() as i32)
        }
        None => Ok(vertex_count as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_for_direct_draw() {
        assert_eq!(draw_count(&[0.0; 6], None).unwrap(), 3);
    }

    #[test]
    fn test_count_for_indexed_draw() {
        assert_eq!(draw_count(&[0.0; 8], Some(&[0, 1, 2, 2, 3, 0])).unwrap(), 6);
    }

    #[test]
    fn test_odd_vertex_data_rejected() {
        assert!(matches!(
            draw_count(&[0.0; 5], None),
            Err(GlError::Geometry(_))
        ));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        assert!(matches!(
            draw_count(&[0.0; 6], Some(&[0, 1, 3])),
            Err(GlError::Geometry(_))
        ));
    }
}
