pub const NAVBAR_SCROLL_THRESHOLD_PX: f64 = 50.0;
pub const REVEAL_MARGIN_PX: f64 = 150.0;
pub const SECTION_WINDOW_LEAD_PX: f64 = 100.0;
pub const HERO_CONTENT_DRIFT_RATE: f64 = 0.3;
pub const HERO_CONTENT_FADE_LIMIT: f64 = 0.5;
pub const HERO_BACKDROP_SCALE_RATE: f64 = 0.000_5;
pub const HERO_BACKDROP_ROTATE_RATE: f64 = 0.01;

pub fn navbar_scrolled(scroll_offset: f64) -> bool {
    scroll_offset > NAVBAR_SCROLL_THRESHOLD_PX
}

pub fn reveal_due(element_top: f64, viewport_height: f64) -> bool {
    element_top < viewport_height - REVEAL_MARGIN_PX
}

#[derive(Clone, Copy, Debug)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

// Activation windows may overlap when sections sit flush against each
// other; the last matching section in document order wins.
pub fn active_section(scroll_offset: f64, sections: &[SectionBounds]) -> Option<usize> {
    let mut active = None;

    for (index, section) in sections.iter().enumerate() {
        let window_start = section.top - SECTION_WINDOW_LEAD_PX;

        if scroll_offset > window_start && scroll_offset <= window_start + section.height {
            active = Some(index);
        }
    }

    active
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxFrame {
    pub content_drift_px: f64,
    pub content_opacity: f64,
    pub backdrop_scale: f64,
    pub backdrop_rotate_deg: f64,
}

pub fn hero_parallax(scroll_offset: f64, hero_height: f64) -> Option<ParallaxFrame> {
    if hero_height <= 0.0 || scroll_offset >= hero_height {
        return None;
    }

    Some(ParallaxFrame {
        content_drift_px: scroll_offset * HERO_CONTENT_DRIFT_RATE,
        content_opacity: 1.0 - (scroll_offset / hero_height) * HERO_CONTENT_FADE_LIMIT,
        backdrop_scale: 1.0 + scroll_offset * HERO_BACKDROP_SCALE_RATE,
        backdrop_rotate_deg: scroll_offset * HERO_BACKDROP_ROTATE_RATE,
    })
}

#[derive(Default)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_marked_only_past_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.1));
        assert!(navbar_scrolled(400.0));
    }

    #[test]
    fn reveal_cutoff_sits_above_viewport_bottom() {
        assert!(reveal_due(569.9, 720.0));
        assert!(!reveal_due(570.0, 720.0));
        assert!(!reveal_due(900.0, 720.0));
    }

    #[test]
    fn section_window_contains_offset() {
        let sections = [SectionBounds {
            top: 500.0,
            height: 300.0,
        }];

        assert_eq!(active_section(450.0, &sections), Some(0));
        assert_eq!(active_section(700.0, &sections), Some(0));
        assert_eq!(active_section(400.0, &sections), None);
        assert_eq!(active_section(700.1, &sections), None);
    }

    #[test]
    fn last_matching_section_wins_on_overlap() {
        let sections = [
            SectionBounds {
                top: 100.0,
                height: 400.0,
            },
            SectionBounds {
                top: 400.0,
                height: 300.0,
            },
        ];

        assert_eq!(active_section(450.0, &sections), Some(1));
        assert_eq!(active_section(150.0, &sections), Some(0));
    }

    #[test]
    fn gaps_between_sections_match_nothing() {
        let sections = [
            SectionBounds {
                top: 200.0,
                height: 100.0,
            },
            SectionBounds {
                top: 900.0,
                height: 100.0,
            },
        ];

        assert_eq!(active_section(500.0, &sections), None);
    }

    #[test]
    fn parallax_frame_matches_rates() {
        let frame = hero_parallax(200.0, 600.0).expect("offset is inside the hero");

        assert_eq!(frame.content_drift_px, 200.0 * HERO_CONTENT_DRIFT_RATE);
        assert_eq!(
            frame.content_opacity,
            1.0 - (200.0 / 600.0) * HERO_CONTENT_FADE_LIMIT
        );
        assert_eq!(frame.backdrop_scale, 1.0 + 200.0 * HERO_BACKDROP_SCALE_RATE);
        assert_eq!(frame.backdrop_rotate_deg, 200.0 * HERO_BACKDROP_ROTATE_RATE);
    }

    #[test]
    fn parallax_stops_past_the_hero() {
        assert_eq!(hero_parallax(600.0, 600.0), None);
        assert_eq!(hero_parallax(900.0, 600.0), None);
        assert_eq!(hero_parallax(100.0, 0.0), None);
    }

    #[test]
    fn menu_state_tracks_odd_and_even_toggles() {
        let mut menu = MenuState::default();

        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
        assert!(!menu.is_open());

        menu.toggle();
        menu.toggle();
        menu.toggle();
        assert!(menu.is_open());
    }

    #[test]
    fn menu_link_click_always_closes() {
        let mut menu = MenuState::default();

        menu.close();
        assert!(!menu.is_open());

        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
    }
}
