use slide_bind_core::{MenuItem, MenuState, RectProvider};
use slide_bind_protocol::{Rect, Translation};

const MENU_WIDTH: u16 = 22;
const LABEL_INSET: f64 = 2.0;
/// Section padding is configured in CSS pixels; one terminal row stands
/// in for this many.
const PX_PER_ROW: f64 = 16.0;

/// A label cell rect plus the offset applied to it. Reports the
/// translated rect, the way a transformed DOM node does.
pub struct PlacedLabel {
    pub rest: Rect,
    pub applied: Translation,
}

impl RectProvider for PlacedLabel {
    fn bounding_rect(&self) -> Rect {
        self.rest.translated(self.applied)
    }
}

/// One menu entry in the right-hand column.
pub struct ItemBand {
    pub key: String,
    pub band: Rect,
    /// Rest position of the label, before any binding offset.
    pub label: Rect,
}

/// The visible full-page section.
pub struct SectionLayout {
    pub key: String,
    pub area: Rect,
    pub heading: Option<Rect>,
    /// The word in the heading the menu label binds onto.
    pub heading_word: Option<Rect>,
    pub answer: Option<Rect>,
}

pub struct MenuLayout {
    pub bands: Vec<ItemBand>,
    pub section: Option<SectionLayout>,
}

impl MenuLayout {
    pub fn band(&self, key: &str) -> Option<&ItemBand> {
        self.bands.iter().find(|b| b.key == key)
    }
}

/// Lay the menu out in terminal cells for a `width` x `height` screen.
pub fn compute(menu: &MenuState, width: u16, height: u16) -> MenuLayout {
    let items = menu.items();
    let menu_width = MENU_WIDTH.min(width);
    let menu_x = f64::from(width - menu_width);
    let count = items.len().max(1) as f64;
    let band_h = (f64::from(height) / count).floor().max(1.0);

    let bands = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let y = i as f64 * band_h;
            ItemBand {
                key: item.key.clone(),
                band: Rect::new(menu_x, y, f64::from(menu_width), band_h),
                label: Rect::new(
                    menu_x + LABEL_INSET,
                    y + (band_h / 2.0).floor(),
                    text_width(&item.label),
                    1.0,
                ),
            }
        })
        .collect();

    let section = menu
        .is_full_page_visible()
        .then(|| menu.active_item().and_then(|key| menu.config().item(key)))
        .flatten()
        .map(|item| {
            let padding = menu.config().full_page.padding_px().unwrap_or_default();
            section_layout(item, menu_x, f64::from(height), padding)
        });

    MenuLayout { bands, section }
}

fn section_layout(
    item: &MenuItem,
    width: f64,
    height: f64,
    (pad_top, pad_bottom): (f64, f64),
) -> SectionLayout {
    let area = Rect::new(0.0, 0.0, width, height);
    let top = (pad_top / PX_PER_ROW).round();
    let bottom = (pad_bottom / PX_PER_ROW).round();
    let content = (height - top - bottom).max(1.0);
    let heading_y = (top + (content / 3.0).floor()).min((height - 1.0).max(0.0));

    let heading = item.heading.as_deref().map(|text| {
        let w = text_width(text);
        Rect::new(((width - w) / 2.0).floor().max(0.0), heading_y, w, 1.0)
    });

    let heading_word = heading.zip(item.heading.as_deref()).and_then(|(rect, text)| {
        let (start, end) = item.label_span()?;
        Some(Rect::new(
            rect.x + text_width(&text[..start]),
            rect.y,
            text_width(&text[start..end]),
            1.0,
        ))
    });

    let answer = item.answer.as_deref().map(|text| {
        let w = text_width(text);
        Rect::new(((width - w) / 2.0).floor().max(0.0), heading_y + 2.0, w, 1.0)
    });

    SectionLayout {
        key: item.key.clone(),
        area,
        heading,
        heading_word,
        answer,
    }
}

fn text_width(s: &str) -> f64 {
    s.chars().count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_column_sits_on_the_right() {
        let menu = MenuState::default();
        let layout = compute(&menu, 100, 40);
        assert_eq!(layout.bands.len(), 4);
        let budget = layout.band("budget").map(|b| b.label);
        assert_eq!(budget, Some(Rect::new(80.0, 5.0, 6.0, 1.0)));
        assert!(layout.section.is_none());
    }

    #[test]
    fn open_section_exposes_heading_word() {
        let mut menu = MenuState::default();
        menu.toggle_full_page("budget").unwrap();
        let layout = compute(&menu, 100, 40);
        let section = layout.section.as_ref().map(|s| (s.heading, s.heading_word));
        // "what is your budget ?" is 21 wide, centered in 78 columns.
        assert_eq!(
            section,
            Some((
                Some(Rect::new(28.0, 13.0, 21.0, 1.0)),
                Some(Rect::new(41.0, 13.0, 6.0, 1.0))
            ))
        );
    }

    #[test]
    fn section_padding_pushes_heading_down() {
        let mut config = slide_bind_core::MenuConfig::default();
        config.full_page.section_padding_top = "80px".to_string();
        config.full_page.section_padding_bottom = "32px".to_string();
        let mut menu = MenuState::new(config);
        menu.toggle_full_page("budget").unwrap();

        let layout = compute(&menu, 100, 40);
        let section = layout.section.unwrap();
        // 5 rows on top, 2 below: 33 content rows, heading a third in.
        assert_eq!(section.heading.unwrap().y, 16.0);
        assert_eq!(section.heading_word.unwrap().y, 16.0);
        assert_eq!(section.answer.unwrap().y, 18.0);
    }

    #[test]
    fn section_without_heading_has_no_target() {
        let mut menu = MenuState::default();
        menu.toggle_full_page("third").unwrap();
        let layout = compute(&menu, 60, 20);
        assert!(layout.section.is_some_and(|s| s.heading_word.is_none()));
    }

    #[test]
    fn placed_label_reports_translated_rect() {
        let label = PlacedLabel {
            rest: Rect::new(80.0, 5.0, 6.0, 1.0),
            applied: Translation::new(-39.0, 8.0),
        };
        assert_eq!(label.bounding_rect(), Rect::new(41.0, 13.0, 6.0, 1.0));
    }
}
