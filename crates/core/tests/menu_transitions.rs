//! Integration test: drive the full-page menu through several open/close
//! cycles against stub elements that behave like laid-out DOM nodes.

use std::cell::Cell;

use slide_bind_core::{MenuConfig, MenuState, RectProvider};
use slide_bind_protocol::{Rect, Translation};

/// Layout rect plus the transform the host currently applies.
struct StubElement {
    layout: Cell<Rect>,
    applied: Cell<Translation>,
}

impl StubElement {
    fn new(x: f64, y: f64) -> Self {
        Self {
            layout: Cell::new(Rect::new(x, y, 64.0, 18.0)),
            applied: Cell::new(Translation::ZERO),
        }
    }
}

impl RectProvider for StubElement {
    fn bounding_rect(&self) -> Rect {
        self.layout.get().translated(self.applied.get())
    }
}

#[test]
fn label_follows_heading_across_resizes() {
    let mut menu = MenuState::new(MenuConfig::default());
    let label = StubElement::new(880.0, 32.0);
    let heading_word = StubElement::new(240.0, 310.0);

    // Open: the label lands on the heading word.
    assert!(menu.toggle_full_page("budget").expect("known item"));
    let transform = menu
        .handle_entered("budget", Some(&label), Some(&heading_word))
        .expect("budget binds");
    assert_eq!(transform.to_string(), "translate3D(-640px,278px,0)");
    label.applied.set(menu.offset("budget").expect("known item"));
    assert_eq!(
        label.bounding_rect().origin(),
        heading_word.bounding_rect().origin()
    );

    // Viewport reflow moves both elements; the next entered event must
    // back out the applied offset before measuring again.
    label.layout.set(Rect::new(620.0, 32.0, 64.0, 18.0));
    heading_word.layout.set(Rect::new(150.0, 280.0, 64.0, 18.0));
    let transform = menu
        .handle_entered("budget", Some(&label), Some(&heading_word))
        .expect("budget binds");
    assert_eq!(transform.to_string(), "translate3D(-470px,248px,0)");
    label.applied.set(menu.offset("budget").expect("known item"));
    assert_eq!(
        label.bounding_rect().origin(),
        heading_word.bounding_rect().origin()
    );

    // Close: back to rest.
    assert!(!menu.toggle_full_page("budget").expect("known item"));
    let transform = menu.handle_exited("budget").expect("budget binds");
    label.applied.set(menu.offset("budget").expect("known item"));
    assert_eq!(transform.to_string(), "translate3D(0px,0px,0)");
    assert_eq!(label.bounding_rect(), label.layout.get());
}

#[test]
fn unmounted_heading_keeps_label_where_it_was() {
    let mut menu = MenuState::default();
    let label = StubElement::new(10.0, 10.0);
    let heading_word = StubElement::new(60.0, 90.0);

    menu.handle_entered("budget", Some(&label), Some(&heading_word))
        .expect("budget binds");
    let before = menu.offset("budget").expect("known item");

    menu.handle_entered("budget", Some(&label), None)
        .expect("budget binds");
    assert_eq!(menu.offset("budget").expect("known item"), before);
}

#[test]
fn custom_config_drives_bindings() {
    let json = br##"{
        "items": [
            {"key": "price", "label": "price", "color": "#112233",
             "heading": "pick a price", "bind": true},
            {"key": "about", "label": "about", "color": "#445566"}
        ],
        "full_page": {"anchors": ["price", "about"], "section_padding_top": "50px"}
    }"##;
    let mut menu = MenuState::from_config_json(json).expect("valid config");
    assert_eq!(menu.items().len(), 2);
    assert_eq!(menu.config().full_page.padding_px().expect("valid padding"), (50.0, 0.0));

    let source = Rect::new(0.0, 0.0, 10.0, 10.0);
    let target = Rect::new(-12.5, 40.0, 10.0, 10.0);
    let t = menu
        .handle_entered("price", Some(&source), Some(&target))
        .expect("price binds");
    assert_eq!(t.to_css(), "translate3D(-12.5px,40px,0)");
    assert!(menu.handle_entered("about", Some(&source), Some(&target)).is_err());
}
