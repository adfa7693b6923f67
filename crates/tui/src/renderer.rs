use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect as CellRect,
    style::{Color, Modifier, Style},
    widgets::Block,
};
use slide_bind_core::{MenuItem, MenuState, RectProvider};
use slide_bind_protocol::Rect;

use crate::layout::{self, MenuLayout, PlacedLabel};

fn item_color(item: &MenuItem) -> Color {
    item.rgb()
        .map_or(Color::DarkGray, |(r, g, b)| Color::Rgb(r, g, b))
}

fn to_cells(rect: Rect, bounds: CellRect) -> Option<(u16, u16)> {
    let x = rect.x.round();
    let y = rect.y.round();
    if x < 0.0 || y < 0.0 || x >= f64::from(bounds.width) || y >= f64::from(bounds.height) {
        return None;
    }
    Some((x as u16, y as u16))
}

fn fill(buf: &mut Buffer, rect: Rect, bounds: CellRect, color: Color) {
    let x0 = rect.x.max(0.0) as u16;
    let y0 = rect.y.max(0.0) as u16;
    let x1 = ((rect.x + rect.w).max(0.0) as u16).min(bounds.width);
    let y1 = ((rect.y + rect.h).max(0.0) as u16).min(bounds.height);
    for y in y0..y1 {
        for x in x0..x1 {
            buf[(x, y)].set_char(' ').set_bg(color);
        }
    }
}

fn text(buf: &mut Buffer, rect: Rect, bounds: CellRect, s: &str, style: Style) {
    if let Some((x, y)) = to_cells(rect, bounds) {
        let room = usize::from(bounds.width - x);
        let _ = buf.set_stringn(x, y, s, room, style);
    }
}

fn draw(
    buf: &mut Buffer,
    bounds: CellRect,
    menu: &MenuState,
    laid_out: &MenuLayout,
) -> Result<()> {
    let body = Style::default().fg(Color::Black);

    if let Some(section) = &laid_out.section
        && let Some(item) = menu.config().item(&section.key)
    {
        let color = item_color(item);
        fill(buf, section.area, bounds, color);
        if let (Some(rect), Some(heading)) = (section.heading, item.heading.as_deref()) {
            // The bound word stays hidden; the menu label lands on it.
            let hidden = match item.label_span() {
                Some((start, end)) if item.bind => {
                    format!("{}{}{}", &heading[..start], " ".repeat(end - start), &heading[end..])
                }
                _ => heading.to_string(),
            };
            text(buf, rect, bounds, &hidden, body.bg(color).add_modifier(Modifier::BOLD));
        }
        if let (Some(rect), Some(answer)) = (section.answer, item.answer.as_deref()) {
            text(buf, rect, bounds, answer, body.bg(color));
        }
    }

    for (band, item) in laid_out.bands.iter().zip(menu.items()) {
        fill(buf, band.band, bounds, item_color(item));
    }

    for (band, item) in laid_out.bands.iter().zip(menu.items()) {
        let placed = PlacedLabel {
            rest: band.label,
            applied: menu.offset(&item.key)?,
        };
        let style = body.bg(item_color(item)).add_modifier(Modifier::BOLD);
        text(buf, placed.bounding_rect(), bounds, &item.label, style);
    }
    Ok(())
}

/// Interactive loop. ↑/↓ select an item, Enter opens or closes its
/// section, q quits.
pub fn render_tui(menu: &mut MenuState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, menu);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    menu: &mut MenuState,
) -> Result<()> {
    let mut selected = 0usize;
    // Set when the section finished opening and the label must be bound
    // against the fresh layout.
    let mut entered = false;

    loop {
        let size = terminal.size()?;
        let bounds = CellRect::new(0, 0, size.width, size.height);
        let laid_out = layout::compute(menu, size.width, size.height.saturating_sub(1));

        if entered {
            entered = false;
            if let Some(section) = &laid_out.section
                && menu.config().item(&section.key).is_some_and(|i| i.bind)
            {
                let source = laid_out.band(&section.key).map(|band| PlacedLabel {
                    rest: band.label,
                    applied: menu.offset(&section.key).unwrap_or_default(),
                });
                let target = section.heading_word;
                menu.handle_entered(
                    &section.key,
                    source.as_ref().map(|s| s as &dyn RectProvider),
                    target.as_ref().map(|t| t as &dyn RectProvider),
                )?;
            }
        }

        let mut draw_result: Result<()> = Ok(());
        terminal.draw(|frame| {
            let area = frame.area();
            let footer = CellRect::new(0, area.height.saturating_sub(1), area.width, 1);
            let key = menu.items().get(selected).map_or("", |i| i.key.as_str());
            frame.render_widget(
                Block::default()
                    .title(format!(" slide-bind | {key} | ↑↓ select | enter toggle | q quit "))
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                footer,
            );
            draw_result = draw(frame.buffer_mut(), bounds, menu, &laid_out);
        })?;
        draw_result?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up => selected = selected.saturating_sub(1),
                    KeyCode::Down => {
                        selected = (selected + 1).min(menu.items().len().saturating_sub(1));
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let Some(item) = menu.items().get(selected) else {
                            continue;
                        };
                        let key = item.key.clone();
                        let was_open = menu.active_item().map(str::to_string);
                        if menu.toggle_full_page(&key)? {
                            entered = true;
                        } else if let Some(open) = was_open
                            && menu.config().item(&open).is_some_and(|i| i.bind)
                        {
                            menu.handle_exited(&open)?;
                        }
                    }
                    _ => {}
                },
                Event::Resize(..) => entered = menu.is_full_page_visible(),
                _ => {}
            }
        }
    }

    Ok(())
}
