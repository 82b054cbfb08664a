//! Terminal rendering of the display buckets.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};

/// Eighth-block glyphs, from 1/8 to a full cell.
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// How the buckets are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Solid bars with a partial block on top
    #[default]
    Bars,
    /// Thin vertical lines with gaps in between
    Lines,
}

impl RenderStyle {
    pub fn next(self) -> Self {
        match self {
            RenderStyle::Bars => RenderStyle::Lines,
            RenderStyle::Lines => RenderStyle::Bars,
        }
    }
}

/// Draws a bucket array as a left-to-right spectrum, low frequencies first.
#[derive(Debug, Clone)]
pub struct SpectrumRenderer {
    pub style: RenderStyle,
    /// Colour each column by its position in the spectrum
    pub rainbow: bool,
}

impl SpectrumRenderer {
    pub fn new(style: RenderStyle, rainbow: bool) -> Self {
        Self { style, rainbow }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, title: &str, bins: &[f32]) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let inner = block.inner(area);
        f.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 || bins.is_empty() {
            return;
        }

        let columns = column_levels(bins, inner.width as usize);
        let height = inner.height as usize;

        let lines: Vec<Line> = (0..height)
            .map(|row| {
                let row_from_bottom = height - row - 1;
                let spans: Vec<Span> = columns
                    .iter()
                    .enumerate()
                    .map(|(x, &(bin, level))| {
                        let glyph = self.glyph(x, level, row_from_bottom, height);
                        let color = if self.rainbow {
                            hue_color(bin as f32 / bins.len() as f32)
                        } else {
                            Color::White
                        };
                        Span::styled(glyph.to_string(), Style::default().fg(color))
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        f.render_widget(Paragraph::new(lines), inner);
    }

    fn glyph(&self, column: usize, level: f32, row_from_bottom: usize, height: usize) -> char {
        match self.style {
            RenderStyle::Bars => cell_glyph(level, row_from_bottom, height),
            RenderStyle::Lines if column % 2 == 1 => ' ',
            RenderStyle::Lines => match cell_glyph(level, row_from_bottom, height) {
                ' ' => ' ',
                '█' => '┃',
                _ => '╻',
            },
        }
    }
}

impl Default for SpectrumRenderer {
    fn default() -> Self {
        Self::new(RenderStyle::default(), true)
    }
}

/// Spread `bins` across `width` columns.
///
/// Each column reports the first bucket it covers and the loudest level among
/// the buckets it covers, so no bucket disappears when the area is narrow.
pub fn column_levels(bins: &[f32], width: usize) -> Vec<(usize, f32)> {
    let count = bins.len();
    (0..width)
        .map(|x| {
            let start = x * count / width;
            let end = ((x + 1) * count / width).max(start + 1).min(count);
            let level = bins[start..end].iter().copied().fold(0.0f32, f32::max);
            (start, level.clamp(0.0, 1.0))
        })
        .collect()
}

/// Glyph for one cell of a bar of `level` (0..=1) in a column `height` cells tall.
pub fn cell_glyph(level: f32, row_from_bottom: usize, height: usize) -> char {
    let filled = level * height as f32;
    let above = filled - row_from_bottom as f32;
    if above >= 1.0 {
        '█'
    } else if above > 0.0 {
        let eighths = ((above * 8.0).ceil() as usize).clamp(1, 8);
        BLOCKS[eighths - 1]
    } else {
        ' '
    }
}

/// Fully saturated colour at `hue` in `[0, 1)` around the colour wheel.
pub fn hue_color(hue: f32) -> Color {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |v: f32| (v * 255.0).round() as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_stretch_narrow_spectrum() {
        let columns = column_levels(&[0.1, 0.9], 4);
        assert_eq!(columns, vec![(0, 0.1), (0, 0.1), (1, 0.9), (1, 0.9)]);
    }

    #[test]
    fn test_columns_keep_loudest_when_squeezed() {
        let bins = [0.1, 0.8, 0.2, 0.3, 0.0, 0.4];
        let columns = column_levels(&bins, 3);
        assert_eq!(columns, vec![(0, 0.8), (2, 0.3), (4, 0.4)]);
    }

    #[test]
    fn test_cell_glyph() {
        assert_eq!(cell_glyph(1.0, 3, 4), '█');
        assert_eq!(cell_glyph(0.0, 0, 4), ' ');
        // 0.5 of 4 rows: two full, nothing above
        assert_eq!(cell_glyph(0.5, 1, 4), '█');
        assert_eq!(cell_glyph(0.5, 2, 4), ' ');
        // 0.5625 of 4 rows leaves a quarter cell on row 2
        assert_eq!(cell_glyph(0.5625, 2, 4), '▂');
    }

    #[test]
    fn test_hue_color() {
        assert_eq!(hue_color(0.0), Color::Rgb(255, 0, 0));
        assert_eq!(hue_color(1.0 / 3.0), Color::Rgb(0, 255, 0));
        assert_eq!(hue_color(2.0 / 3.0), Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_style_cycles() {
        assert_eq!(RenderStyle::Bars.next(), RenderStyle::Lines);
        assert_eq!(RenderStyle::Lines.next(), RenderStyle::Bars);
    }
}
