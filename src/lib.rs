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

//! Minimal [`glow`] demos built around a one-file shader format.
//!
//! A `.shader` file carries both stages of a GL program, separated by
//! `#shader vertex` and `#shader fragment` directive lines. [`ShaderSource`]
//! splits such a file into its two blocks, [`compile_program`] turns the pair
//! into a linked program, and [`Renderer`] draws a static 2D shape with one
//! draw call per frame. [`WindowContext`] is the glutin/winit plumbing that
//! the two demo binaries share.
//!
//! [`glow`]: https://crates.io/crates/glow

mod mesh;
mod program;
mod renderer;
mod source;
mod window;

pub use program::{compile_program, GlError};
pub use renderer::Renderer;
pub use source::{ParseError, ShaderSource, Stage};
pub use window::WindowContext;
