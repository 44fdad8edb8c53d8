//! # View Events
//!
//! Tell the renderer which parts of the dashboard need redrawing.

use super::types::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Everything needs redrawing
    FullRedrawRequired,

    /// A single area needs redrawing
    SectionRedrawRequired { section: Section },
}

impl ViewEvent {
    pub fn section(section: Section) -> Self {
        ViewEvent::SectionRedrawRequired { section }
    }
}

/// Collapse a batch of view events into the sections to draw, in order
pub fn sections_to_redraw(events: &[ViewEvent]) -> Vec<Section> {
    if events.contains(&ViewEvent::FullRedrawRequired) {
        return Section::ALL.to_vec();
    }
    let mut sections: Vec<Section> = events
        .iter()
        .filter_map(|event| match event {
            ViewEvent::SectionRedrawRequired { section } => Some(*section),
            ViewEvent::FullRedrawRequired => None,
        })
        .collect();
    sections.sort();
    sections.dedup();
    sections
}
