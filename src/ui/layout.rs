//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A column of the upper part of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Files,
    Player,
}

/// Visibility state for UI sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionVisibility {
    pub files: bool,
    pub player: bool,
    pub visualizer: bool,
    /// Visualizer takes the whole screen
    pub fullscreen: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            files: true,
            player: true,
            visualizer: true,
            fullscreen: false,
        }
    }
}

impl SectionVisibility {
    /// Toggle a section by number (1-3).
    pub fn toggle(&mut self, section: usize) {
        match section {
            1 => self.files = !self.files,
            2 => self.player = !self.player,
            3 => self.visualizer = !self.visualizer,
            _ => {}
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        if self.fullscreen {
            self.visualizer = true;
        }
    }
}

/// Computed layout areas for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLayout {
    /// Upper columns, in display order
    pub columns: Vec<(Section, Rect)>,
    /// Bottom visualizer area (if visible)
    pub visualizer_area: Option<Rect>,
}

/// Compute the layout based on total area and section visibility.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    if visibility.fullscreen {
        return ComputedLayout {
            columns: Vec::new(),
            visualizer_area: Some(area),
        };
    }

    let mut sections = Vec::new();
    if visibility.files {
        sections.push((Section::Files, 35u16));
    }
    if visibility.player {
        sections.push((Section::Player, 65u16));
    }

    // The visualizer gets the lower 40%, or everything if nothing else shows.
    let (main_area, visualizer_area) = match (visibility.visualizer, sections.is_empty()) {
        (true, true) => (None, Some(area)),
        (true, false) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            (Some(rows[0]), Some(rows[1]))
        }
        (false, _) => (Some(area), None),
    };

    let columns = match main_area {
        Some(main) if !sections.is_empty() => {
            let sum: u16 = sections.iter().map(|(_, w)| *w).sum();
            let constraints: Vec<Constraint> = sections
                .iter()
                .map(|(_, w)| Constraint::Ratio(*w as u32, sum as u32))
                .collect();
            let rects = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(main);
            sections
                .iter()
                .zip(rects.iter())
                .map(|((s, _), r)| (*s, *r))
                .collect()
        }
        _ => Vec::new(),
    };

    ComputedLayout {
        columns,
        visualizer_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 50,
    };

    #[test]
    fn test_default_layout() {
        let layout = compute_layout(AREA, &SectionVisibility::default());
        let sections: Vec<Section> = layout.columns.iter().map(|(s, _)| *s).collect();
        assert_eq!(sections, vec![Section::Files, Section::Player]);
        let vis = layout.visualizer_area.unwrap();
        assert_eq!(vis.height, 20);
        assert_eq!(vis.y + vis.height, AREA.height);
    }

    #[test]
    fn test_fullscreen_visualizer() {
        let mut visibility = SectionVisibility::default();
        visibility.visualizer = false;
        visibility.toggle_fullscreen();
        let layout = compute_layout(AREA, &visibility);
        assert!(layout.columns.is_empty());
        assert_eq!(layout.visualizer_area, Some(AREA));
    }

    #[test]
    fn test_hidden_visualizer() {
        let mut visibility = SectionVisibility::default();
        visibility.toggle(3);
        let layout = compute_layout(AREA, &visibility);
        assert_eq!(layout.visualizer_area, None);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.columns[0].1.height, AREA.height);
    }

    #[test]
    fn test_only_visualizer_left() {
        let mut visibility = SectionVisibility::default();
        visibility.toggle(1);
        visibility.toggle(2);
        let layout = compute_layout(AREA, &visibility);
        assert!(layout.columns.is_empty());
        assert_eq!(layout.visualizer_area, Some(AREA));
    }
}
