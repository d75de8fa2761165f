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

//! Splitting a combined shader file into per-stage sources.
//!
//! The file format is a plain text file where a line containing `#shader`
//! switches the stage that the following lines belong to:
//!
//! ```text
//! #shader vertex
//! ...vertex source...
//! #shader fragment
//! ...fragment source...
//! ```
//!
//! The two sections may appear in either order. Directive lines never end up
//! in the output blocks; lines before the first directive are dropped with a
//! warning.

use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// One stage of a shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Vertex = 0,
    Fragment = 1,
}

impl Stage {
    fn as_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

/// An error produced while splitting a shader file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read shader file: {0}")]
    Io(#[from] std::io::Error),

    #[error("no `#shader` directive in input")]
    NoDirectives,

    #[error("no `#shader {0}` section in input")]
    MissingStage(Stage),
}

/// The vertex and fragment source blocks extracted from one combined file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    /// Read and split the shader file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Split `input` into its vertex and fragment blocks.
    ///
    /// Both stage directives must appear somewhere in the input; an input
    /// with no directives at all, or with only one of the two stages, is an
    /// error rather than a pair of silently empty blocks.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut blocks = [String::new(), String::new()];
        let mut seen = [false, false];
        let mut stage = None;

        for line in input.lines() {
            if line.contains("#shader") {
                // Keyword is matched as a substring; anything else on the
                // directive line is ignored.
                let next = if line.contains("vertex") {
                    Stage::Vertex
                } else if line.contains("fragment") {
                    Stage::Fragment
                } else {
                    tracing::warn!("ignoring `#shader` directive with unknown stage: {line:?}");
                    continue;
                };

                seen[next.as_index()] = true;
                stage = Some(next);
            } else {
                match stage {
                    Some(stage) => {
                        let block = &mut blocks[stage.as_index()];
                        block.push_str(line);
                        block.push('\n');
                    }
                    None if line.trim().is_empty() => {}
                    None => {
                        tracing::warn!("dropping line before first `#shader` directive: {line:?}");
                    }
                }
            }
        }

        match seen {
            [false, false] => Err(ParseError::NoDirectives),
            [false, true] => Err(ParseError::MissingStage(Stage::Vertex)),
            [true, false] => Err(ParseError::MissingStage(Stage::Fragment)),
            [true, true] => {
                let [vertex, fragment] = blocks;
                Ok(ShaderSource { vertex, fragment })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC: &str = "#shader vertex\nA\n#shader fragment\nB\nC\n";

    #[test]
    fn test_split_vertex_then_fragment() {
        let source = ShaderSource::parse(BASIC).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\nC\n");
    }

    #[test]
    fn test_split_fragment_then_vertex() {
        let source = ShaderSource::parse("#shader fragment\nB\nC\n#shader vertex\nA\n").unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\nC\n");
    }

    #[test]
    fn test_directive_lines_never_in_output() {
        let source = ShaderSource::parse(BASIC).unwrap();
        assert!(!source.vertex.contains("#shader"));
        assert!(!source.fragment.contains("#shader"));
    }

    #[test]
    fn test_unknown_stage_directive_keeps_current_stage() {
        let with = "#shader vertex\nA\n#shader geometry\nB\n#shader fragment\nC\n";
        let without = "#shader vertex\nA\nB\n#shader fragment\nC\n";
        assert_eq!(
            ShaderSource::parse(with).unwrap(),
            ShaderSource::parse(without).unwrap()
        );
    }

    #[test]
    fn test_extra_directive_line_content_ignored() {
        let source =
            ShaderSource::parse("#shader vertex (main pass)\nA\n#shader fragment\nB\n").unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_lines_before_first_directive_dropped() {
        let plain = ShaderSource::parse(BASIC).unwrap();
        let with_preamble =
            ShaderSource::parse("stray line\n\n#shader vertex\nA\n#shader fragment\nB\nC\n")
                .unwrap();
        assert_eq!(plain, with_preamble);
    }

    #[test]
    fn test_no_directives() {
        assert!(matches!(
            ShaderSource::parse("void main() {}\n"),
            Err(ParseError::NoDirectives)
        ));
    }

    #[test]
    fn test_missing_fragment_section() {
        assert!(matches!(
            ShaderSource::parse("#shader vertex\nA\n"),
            Err(ParseError::MissingStage(Stage::Fragment))
        ));
    }

    #[test]
    fn test_missing_vertex_section() {
        assert!(matches!(
            ShaderSource::parse("#shader fragment\nB\n"),
            Err(ParseError::MissingStage(Stage::Vertex))
        ));
    }

    #[test]
    fn test_empty_section_is_allowed() {
        let source = ShaderSource::parse("#shader vertex\n#shader fragment\nB\n").unwrap();
        assert_eq!(source.vertex, "");
        assert_eq!(source.fragment, "B\n");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BASIC.as_bytes()).unwrap();
        let source = ShaderSource::from_path(file.path()).unwrap();
        assert_eq!(source.vertex, "A\n");
        assert_eq!(source.fragment, "B\nC\n");
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(matches!(
            ShaderSource::from_path("does/not/exist.shader"),
            Err(ParseError::Io(_))
        ));
    }
}
