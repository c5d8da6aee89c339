use crate::config;
use crate::core::gfx::Frame;
use crate::core::input::VirtualAction;
use crate::screens::content::{self, ContentLine, LineKind};
use crate::screens::{ScreenAction, Section};
use crate::ui::{color, font};
use std::time::{Duration, Instant};

/* ---------------------------- layout ---------------------------- */

const CONTENT_MAX_W: u32 = 720;
const CONTENT_TOP: i32 = 48;
const BORDER: u32 = 4;
const PAD: i32 = 24;
const HEADER_H: u32 = 100;

const NAV_H: u32 = 110;
const CTA_H: u32 = 44;

const TITLE_CELL: u32 = 28;
const SUBTITLE_CELL: u32 = 16;
const HEADING_CELL: u32 = 14;
const TEXT_CELL: u32 = 10;
const MONO_INDENT: i32 = 16;

/* glitch overlay bars: (y offset, height, alpha), relative to the box top */
const GLITCH_BARS: [(i32, u32, f32); 3] = [(100, 32, 0.20), (150, 8, 0.40), (300, 16, 0.30)];

/* ---------------------------- state ---------------------------- */

/// Section Navigator. The glitch flourish is a single pending deadline:
/// every switch replaces it wholesale, so a rapid second switch extends the
/// window instead of letting the first timer clear it early.
pub struct State {
    section: Section,
    glitch_until: Option<Instant>,
    glitch_duration: Duration,
}

/// The flourish also plays once at mount, exactly like the page does on
/// first load.
pub fn init(now: Instant) -> State {
    let glitch_duration = Duration::from_millis(config::get().glitch_duration_ms);
    State {
        section: Section::Main,
        glitch_until: Some(now + glitch_duration),
        glitch_duration,
    }
}

/// Switches (or re-selects) the visible section. The content swap itself is
/// instantaneous; only the flourish is timed. Re-selecting the current
/// section still replays it, which is deliberate feedback.
pub fn select_section(state: &mut State, target: Section, now: Instant) {
    state.section = target;
    state.glitch_until = Some(now + state.glitch_duration);
}

pub const fn current_section(state: &State) -> Section {
    state.section
}

pub const fn is_glitching(state: &State) -> bool {
    state.glitch_until.is_some()
}

/// Clears the flourish once its window has fully elapsed.
pub fn update(state: &mut State, now: Instant) {
    if let Some(deadline) = state.glitch_until
        && now > deadline
    {
        state.glitch_until = None;
    }
}

pub fn handle_input(state: &mut State, action: VirtualAction, now: Instant) -> ScreenAction {
    match action {
        VirtualAction::SelectMain => {
            select_section(state, Section::Main, now);
            ScreenAction::None
        }
        VirtualAction::SelectAbout => {
            select_section(state, Section::About, now);
            ScreenAction::None
        }
        VirtualAction::Back => ScreenAction::Exit,
    }
}

/* ---------------------------- drawing ---------------------------- */

fn line_height(kind: LineKind) -> i32 {
    match kind {
        LineKind::Heading => HEADING_CELL as i32 + 18,
        LineKind::Subheading => TEXT_CELL as i32 + 14,
        LineKind::Body => TEXT_CELL as i32 + 6,
        LineKind::Mono => TEXT_CELL as i32 + 4,
        LineKind::Spacer => 12,
    }
}

fn lines_height(lines: &[ContentLine]) -> i32 {
    lines.iter().map(|l| line_height(l.kind)).sum()
}

fn draw_lines(frame: &mut Frame, lines: &[ContentLine], x: i32, mut y: i32, inner_w: u32) {
    for line in lines {
        match line.kind {
            LineKind::Heading => {
                font::draw_text(frame, x, y, line.text, color::WHITE, HEADING_CELL);
                let rule_y = y + HEADING_CELL as i32 + 8;
                frame.fill_rect(x, rule_y, inner_w, BORDER, color::WHITE);
            }
            LineKind::Subheading => {
                font::draw_text(frame, x, y, line.text, color::ARCH_BLUE, TEXT_CELL + 2);
            }
            LineKind::Body => {
                font::draw_text(frame, x, y, line.text, color::WHITE, TEXT_CELL);
            }
            LineKind::Mono => {
                font::draw_text(frame, x + MONO_INDENT, y, line.text, color::WHITE, TEXT_CELL);
            }
            LineKind::Spacer => {}
        }
        y += line_height(line.kind);
    }
}

/// Renders the whole landing page into `frame`: bordered content box with a
/// white header band, the active section's copy, the navigation box, the
/// footer, and the glitch bars while the flourish is live.
pub fn draw(state: &State, frame: &mut Frame) {
    if frame.width() == 0 || frame.height() == 0 {
        return;
    }

    let fw = frame.width() as i32;
    let (header, lines) = match state.section {
        Section::Main => (content::MAIN_HEADER, content::MAIN_LINES),
        Section::About => (content::ABOUT_HEADER, content::ABOUT_LINES),
    };

    let box_w = CONTENT_MAX_W.min(frame.width().saturating_sub(2 * BORDER)).max(64);
    let x0 = (fw - box_w as i32) / 2;
    let y0 = CONTENT_TOP;
    let inner_x = x0 + PAD;
    let inner_w = box_w.saturating_sub(2 * PAD as u32);
    let body_h = lines_height(lines) + 2 * PAD;
    let box_h = HEADER_H + body_h as u32;

    // Content box: header band in inverse video, body on black.
    frame.fill_rect(x0, y0, box_w, HEADER_H, color::WHITE);
    font::draw_text(frame, inner_x, y0 + 16, header.0, color::BLACK, TITLE_CELL);
    font::draw_text(
        frame,
        inner_x,
        y0 + 16 + TITLE_CELL as i32 + 12,
        header.1,
        color::BLACK,
        SUBTITLE_CELL,
    );
    draw_lines(frame, lines, inner_x, y0 + HEADER_H as i32 + PAD, inner_w);
    frame.stroke_rect(x0, y0, box_w, box_h, BORDER, color::WHITE);

    if is_glitching(state) {
        for (off, h, alpha) in GLITCH_BARS {
            frame.blend_rect(x0, y0 + off, box_w, h, color::WHITE, alpha);
        }
    }

    // Navigation box.
    let nav_y = y0 + box_h as i32 + 16;
    frame.stroke_rect(x0, nav_y, box_w, NAV_H, 2, color::WHITE);
    font::draw_text(frame, inner_x, nav_y + 10, content::NAV_TITLE, color::WHITE, TEXT_CELL);
    frame.fill_rect(x0, nav_y + 28, box_w, 2, color::WHITE);

    let button_w = (box_w / 2).saturating_sub(PAD as u32 + 6);
    let button_y = nav_y + 40;
    draw_nav_button(
        frame,
        inner_x,
        button_y,
        button_w,
        content::NAV_MAIN,
        state.section == Section::Main,
    );
    draw_nav_button(
        frame,
        x0 + box_w as i32 / 2 + 6,
        button_y,
        button_w,
        content::NAV_ABOUT,
        state.section == Section::About,
    );

    let status_y = nav_y + 80;
    frame.fill_rect(inner_x, status_y, TEXT_CELL - 2, TEXT_CELL, color::WHITE);
    font::draw_text(
        frame,
        inner_x + TEXT_CELL as i32 + 4,
        status_y,
        content::STATUS_LINE,
        color::WHITE,
        TEXT_CELL,
    );

    // Call-to-action pair: solid white next to outlined, like the page's
    // bottom buttons.
    let cta_y = nav_y + NAV_H as i32 + 20;
    let cta_w = (box_w / 2).saturating_sub(PAD as u32 + 6);
    let cta_cell = TEXT_CELL + 2;
    frame.fill_rect(inner_x, cta_y, cta_w, CTA_H, color::WHITE);
    font::draw_text(
        frame,
        centered_x(inner_x, cta_w, content::CTA_PROJECTS, cta_cell),
        cta_y + (CTA_H as i32 - cta_cell as i32) / 2,
        content::CTA_PROJECTS,
        color::BLACK,
        cta_cell,
    );
    let contact_x = x0 + box_w as i32 / 2 + 6;
    frame.stroke_rect(contact_x, cta_y, cta_w, CTA_H, BORDER, color::WHITE);
    font::draw_text(
        frame,
        centered_x(contact_x, cta_w, content::CTA_CONTACT, cta_cell),
        cta_y + (CTA_H as i32 - cta_cell as i32) / 2,
        content::CTA_CONTACT,
        color::WHITE,
        cta_cell,
    );

    // Footer.
    let footer_y = cta_y + CTA_H as i32 + 20;
    frame.fill_rect(x0, footer_y, box_w, BORDER, color::WHITE);
    font::draw_text(
        frame,
        inner_x,
        footer_y + 14,
        content::FOOTER_COPYRIGHT,
        color::WHITE,
        TEXT_CELL,
    );
    let links_w = font::text_width(content::FOOTER_LINKS, TEXT_CELL) as i32;
    font::draw_text(
        frame,
        x0 + box_w as i32 - PAD - links_w,
        footer_y + 14,
        content::FOOTER_LINKS,
        color::WHITE,
        TEXT_CELL,
    );
}

#[inline(always)]
fn centered_x(x: i32, w: u32, label: &str, cell: u32) -> i32 {
    x + (w as i32 - font::text_width(label, cell) as i32) / 2
}

fn draw_nav_button(frame: &mut Frame, x: i32, y: i32, w: u32, label: &str, active: bool) {
    const BUTTON_H: u32 = 30;
    let label_x = centered_x(x, w, label, TEXT_CELL);
    let label_y = y + (BUTTON_H as i32 - TEXT_CELL as i32) / 2;
    if active {
        frame.fill_rect(x, y, w, BUTTON_H, color::WHITE);
        font::draw_text(frame, label_x, label_y, label, color::BLACK, TEXT_CELL);
    } else {
        frame.stroke_rect(x, y, w, BUTTON_H, 2, color::WHITE);
        font::draw_text(frame, label_x, label_y, label, color::WHITE, TEXT_CELL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    /// A navigator whose mount-time flourish has already been cleared, so
    /// tests start from a quiet state.
    fn settled(t0: Instant) -> State {
        let mut state = init(t0);
        update(&mut state, at(t0, 5000));
        assert!(!is_glitching(&state));
        state
    }

    #[test]
    fn starts_on_main_with_mount_flourish() {
        let t0 = Instant::now();
        let state = init(t0);
        assert_eq!(current_section(&state), Section::Main);
        assert!(is_glitching(&state));
    }

    #[test]
    fn selection_switches_sections_both_ways() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        select_section(&mut state, Section::About, t0);
        assert_eq!(current_section(&state), Section::About);
        select_section(&mut state, Section::Main, t0);
        assert_eq!(current_section(&state), Section::Main);
    }

    #[test]
    fn flourish_clears_only_after_its_window() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        select_section(&mut state, Section::About, at(t0, 10_000));
        update(&mut state, at(t0, 10_999));
        assert!(is_glitching(&state));
        update(&mut state, at(t0, 11_000));
        assert!(is_glitching(&state), "still live at exactly +1000ms");
        update(&mut state, at(t0, 11_001));
        assert!(!is_glitching(&state));
    }

    #[test]
    fn rapid_reswitch_extends_instead_of_clearing_early() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        select_section(&mut state, Section::Main, at(t0, 20_000));
        select_section(&mut state, Section::About, at(t0, 20_010));
        // Only one deadline is pending, and it belongs to the second switch.
        assert_eq!(state.glitch_until, Some(at(t0, 21_010)));
        update(&mut state, at(t0, 21_010));
        assert!(is_glitching(&state));
        update(&mut state, at(t0, 21_011));
        assert!(!is_glitching(&state));
    }

    #[test]
    fn reselecting_the_current_section_replays_the_flourish() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        assert_eq!(current_section(&state), Section::Main);
        select_section(&mut state, Section::Main, at(t0, 30_000));
        assert!(is_glitching(&state));
        assert_eq!(current_section(&state), Section::Main);
    }

    #[test]
    fn input_routing() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        assert_eq!(
            handle_input(&mut state, VirtualAction::SelectAbout, t0),
            ScreenAction::None
        );
        assert_eq!(current_section(&state), Section::About);
        assert!(is_glitching(&state));
        assert_eq!(
            handle_input(&mut state, VirtualAction::SelectMain, t0),
            ScreenAction::None
        );
        assert_eq!(current_section(&state), Section::Main);
        assert_eq!(
            handle_input(&mut state, VirtualAction::Back, t0),
            ScreenAction::Exit
        );
    }

    #[test]
    fn draw_renders_both_sections_without_panicking() {
        let t0 = Instant::now();
        let mut frame = Frame::new(1280, 720);
        let mut state = init(t0);
        draw(&state, &mut frame);
        assert!(frame.pixels().iter().any(|&p| p == color::WHITE));

        select_section(&mut state, Section::About, t0);
        frame.clear(color::BLACK);
        draw(&state, &mut frame);
        assert!(frame.pixels().iter().any(|&p| p == color::WHITE));

        // Tiny and zero-sized frames must clip, not panic.
        let mut small = Frame::new(40, 30);
        draw(&state, &mut small);
        let mut empty = Frame::new(0, 0);
        draw(&state, &mut empty);
    }

    #[test]
    fn call_to_action_row_is_drawn() {
        let t0 = Instant::now();
        let state = settled(t0);
        // Tall frame: the page extends past a 720px viewport, like a page
        // that scrolls.
        let mut frame = Frame::new(1280, 1200);
        draw(&state, &mut frame);

        let box_w = 720i32;
        let x0 = (1280 - box_w) / 2;
        let box_h = HEADER_H as i32 + lines_height(content::MAIN_LINES) + 2 * PAD;
        let cta_y = CONTENT_TOP + box_h + 16 + NAV_H as i32 + 20;

        // Left button is a solid white fill; probe above the label band.
        assert_eq!(
            frame.pixel((x0 + PAD + 10) as u32, (cta_y + 3) as u32),
            color::WHITE
        );
        // Right button is outlined: white border, black interior beside the
        // centered label.
        let cx = x0 + box_w / 2 + 6;
        assert_eq!(frame.pixel(cx as u32, (cta_y + 1) as u32), color::WHITE);
        assert_eq!(
            frame.pixel((cx + 30) as u32, (cta_y + CTA_H as i32 / 2) as u32),
            color::BLACK
        );
    }

    #[test]
    fn glitch_bars_only_show_while_flourishing() {
        let t0 = Instant::now();
        let mut state = settled(t0);
        let mut quiet = Frame::new(1280, 720);
        draw(&state, &mut quiet);

        select_section(&mut state, Section::Main, t0);
        let mut loud = Frame::new(1280, 720);
        draw(&state, &mut loud);

        // The 150px bar sits in body whitespace; blended white shows up as a
        // non-black, non-white pixel that the quiet frame leaves black.
        let probe_y = (CONTENT_TOP + 152) as u32;
        let x = 300;
        assert_ne!(quiet.pixel(x, probe_y), loud.pixel(x, probe_y));
    }
}
