//! Style tag resolution. The analyzer only produces [`StyleTag`]s; a renderer
//! decides what they look like on the way out.

use crate::{Block, StyleTag};
use nu_ansi_term::{Color, Style};
use std::io::{self, Write};

pub trait Renderer {
    fn paint(&self, block: &Block) -> String;

    fn emit(&self, out: &mut dyn Write, block: &Block) -> io::Result<()> {
        writeln!(out, "{}", self.paint(block))
    }

    fn emit_all(&self, out: &mut dyn Write, blocks: &[Block]) -> io::Result<()> {
        for block in blocks {
            self.emit(out, block)?;
        }
        Ok(())
    }
}

/// Terminal colors via `nu-ansi-term`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer;

impl AnsiRenderer {
    fn style_for(tag: StyleTag) -> Style {
        match tag {
            StyleTag::Info => Color::Cyan.normal(),
            StyleTag::Success => Color::Green.bold(),
            StyleTag::Failure => Color::Red.normal(),
            StyleTag::Warning => Color::Yellow.bold(),
            StyleTag::Dim => Style::new().dimmed(),
            StyleTag::None => Style::new(),
        }
    }
}

impl Renderer for AnsiRenderer {
    fn paint(&self, block: &Block) -> String {
        // keep leading blank lines outside the escape sequence
        let body = block.text.trim_start_matches('\n');
        let lead = &block.text[..block.text.len() - body.len()];
        if body.is_empty() || block.style == StyleTag::None {
            return block.text.clone();
        }
        format!("{}{}", lead, Self::style_for(block.style).paint(body))
    }
}

/// No escape codes at all; used for `NO_COLOR`, pipes and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn paint(&self, block: &Block) -> String {
        block.text.clone()
    }
}

/// Picks the ANSI renderer unless color is disabled.
pub fn renderer_for(color: bool) -> Box<dyn Renderer> {
    if color {
        Box::new(AnsiRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}
