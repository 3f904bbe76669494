#![allow(clippy::unwrap_used)]

use ratatui::layout::Rect;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
    assert_eq!(truncate("₹₹₹₹", 3), "₹₹…");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window_at_page_end() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..3 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 3);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_down_stops_at_last() {
    let (mut index, mut scroll) = (1, 0);
    scroll_down(&mut index, &mut scroll, 2, 5);
    scroll_down(&mut index, &mut scroll, 2, 5);
    assert_eq!(index, 1);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (4, 4);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (3, 3));

    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (5, 2);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));

    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}

// ── popup_area ────────────────────────────────────────────────

#[test]
fn test_popup_area_centered() {
    let r = popup_area(Rect::new(0, 0, 100, 40), 50, 10);
    assert_eq!(r, Rect::new(25, 15, 50, 10));
}

#[test]
fn test_popup_area_clamped() {
    let r = popup_area(Rect::new(0, 0, 30, 8), 50, 10);
    assert_eq!(r.width, 26);
    assert_eq!(r.height, 6);
    assert_eq!(r.x, 2);
    assert_eq!(r.y, 1);
}
