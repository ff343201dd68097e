// Host-side tests for the navigation state machine in carousel-core.

use carousel_core::{wrap_index, Carousel, CarouselConfig, Color, SlideConfig};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn config(n: u32, autoplay: bool) -> CarouselConfig {
    CarouselConfig {
        slides: (0..n)
            .map(|i| SlideConfig::new(i, format!("Slide {i}"), Color::rgb(10 * i as u8, 0, 0)))
            .collect(),
        autoplay,
        ..CarouselConfig::default()
    }
}

fn carousel(n: u32) -> Carousel {
    Carousel::new(&config(n, false)).unwrap()
}

fn settle(c: &mut Carousel) {
    c.tick(ms(2000));
    assert!(c.is_settled());
}

fn drawn(c: &Carousel) -> Vec<usize> {
    c.draw_list().map(|(i, _, _)| i).collect()
}

#[test]
fn starts_on_first_slide_with_only_panel_zero_shown() {
    let c = carousel(4);
    assert_eq!(c.active_slide(), 0);
    assert_eq!(c.group_rotation(), 0.0);
    assert_eq!(drawn(&c), vec![0]);
    assert!(c.is_settled());
}

#[test]
fn next_from_zero_fades_out_then_hides_previous_panel() {
    let mut c = carousel(4);
    c.next_slide();
    assert_eq!(c.active_slide(), 1);
    assert!((c.target_rotation() - FRAC_PI_2).abs() < 1e-6);

    // incoming panel is shown at once, outgoing stays until its fade ends
    assert!(c.panels()[1].visible);
    assert!(c.panels()[0].visible);

    c.tick(ms(400));
    let p0 = &c.panels()[0];
    assert!(p0.visible);
    assert!((p0.opacity - 0.5).abs() < 1e-3, "opacity {}", p0.opacity);
    assert!((c.panels()[1].opacity - 0.5).abs() < 1e-3);

    c.tick(ms(400));
    assert!(!c.panels()[0].visible);
    assert_eq!(c.panels()[0].opacity, 0.0);
    assert_eq!(c.panels()[1].opacity, 1.0);
    assert!(!c.is_settled(), "rotation runs longer than the fade");

    c.tick(ms(700));
    assert!(c.is_settled());
    assert!((c.group_rotation() - FRAC_PI_2).abs() < 1e-6);
    assert_eq!(drawn(&c), vec![1]);
}

#[test]
fn previous_from_zero_wraps_to_last() {
    let mut c = carousel(4);
    c.previous_slide();
    assert_eq!(c.active_slide(), 3);
    assert!((c.target_rotation() - 3.0 * FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn next_then_previous_restores_index() {
    for n in 1..=7 {
        let mut c = carousel(n);
        for start in 0..n as usize {
            c.select_slide(start);
            c.next_slide();
            c.previous_slide();
            assert_eq!(c.active_slide(), start);
            c.previous_slide();
            c.next_slide();
            assert_eq!(c.active_slide(), start);
        }
    }
}

#[test]
fn select_in_range_sets_active_and_rotation() {
    let mut c = carousel(5);
    for k in [3, 0, 4, 1] {
        c.select_slide(k);
        assert_eq!(c.active_slide(), k);
        assert!((c.target_rotation() - k as f32 * TAU / 5.0).abs() < 1e-5);
    }
}

#[test]
fn select_out_of_range_wraps() {
    let mut c = carousel(4);
    c.select_slide(6);
    assert_eq!(c.active_slide(), 2);
    assert_eq!(wrap_index(-1, 4), 3);
    assert_eq!(wrap_index(-9, 4), 3);
    assert_eq!(wrap_index(9, 4), 1);
    assert_eq!(wrap_index(3, 0), 0);
}

#[test]
fn selecting_same_slide_twice_is_idempotent_once_settled() {
    let mut c = carousel(4);
    c.select_slide(2);
    settle(&mut c);
    let rotation = c.group_rotation();
    let shown = drawn(&c);

    c.select_slide(2);
    settle(&mut c);
    assert_eq!(c.active_slide(), 2);
    assert!((c.group_rotation() - rotation).abs() < 1e-6);
    assert_eq!(drawn(&c), shown);
}

#[test]
fn reversing_mid_fade_cancels_pending_hide() {
    let mut c = carousel(4);
    c.next_slide();
    c.tick(ms(300));
    let mid = c.panels()[0].opacity;
    assert!(mid > 0.0 && mid < 1.0);

    c.previous_slide();
    // fade-in starts from the current value, not from zero
    assert_eq!(c.panels()[0].opacity, mid);
    settle(&mut c);
    assert!(c.panels()[0].visible);
    assert!((c.panels()[0].opacity - 1.0).abs() < 1e-6);
    assert_eq!(drawn(&c), vec![0]);
    assert!(c.group_rotation().abs() < 1e-6);
}

#[test]
fn exactly_one_panel_drawn_at_rest() {
    let mut c = carousel(6);
    let ops: [fn(&mut Carousel); 3] = [
        Carousel::next_slide,
        Carousel::previous_slide,
        |c: &mut Carousel| c.select_slide(4),
    ];
    for round in 0..9 {
        ops[round % 3](&mut c);
        if round % 2 == 0 {
            c.tick(ms(100));
        }
    }
    settle(&mut c);
    assert_eq!(drawn(&c), vec![c.active_slide()]);
}

#[test]
fn auto_advance_three_firings_reach_last_slide() {
    let mut c = Carousel::new(&config(4, true)).unwrap();
    for expected in 1..=3 {
        assert!(c.tick(ms(3000)));
        assert_eq!(c.active_slide(), expected);
    }
}

#[test]
fn long_frame_fires_timer_more_than_once() {
    let mut c = Carousel::new(&config(4, true)).unwrap();
    assert!(c.tick(ms(9100)));
    assert_eq!(c.active_slide(), 3);
}

#[test]
fn manual_navigation_restarts_auto_advance() {
    let mut c = Carousel::new(&config(4, true)).unwrap();
    assert!(!c.tick(ms(2500)));
    c.next_slide();
    assert!(!c.tick(ms(2500)), "timer restarted by next_slide");
    assert_eq!(c.active_slide(), 1);
    assert!(c.tick(ms(600)));
    assert_eq!(c.active_slide(), 2);
}

#[test]
fn stopped_autoplay_never_fires() {
    let mut c = Carousel::new(&config(3, true)).unwrap();
    assert!(c.autoplay().is_running());
    c.stop_autoplay();
    assert!(!c.autoplay().is_running());
    assert!(!c.tick(ms(60_000)));
    assert_eq!(c.active_slide(), 0);
}

#[test]
fn single_slide_carousel_stays_put() {
    let mut c = Carousel::new(&config(1, true)).unwrap();
    c.next_slide();
    c.previous_slide();
    c.tick(ms(3000));
    assert_eq!(c.active_slide(), 0);
    settle(&mut c);
    assert_eq!(drawn(&c), vec![0]);
}

#[test]
fn indicator_accessors_follow_the_active_slide() {
    let mut c = carousel(5);
    c.select_slide(4);
    let distances: Vec<usize> = (0..5).map(|i| c.indicator_distance(i)).collect();
    assert_eq!(distances, vec![1, 2, 2, 1, 0]);
    let visible: Vec<usize> = (0..5).filter(|&i| c.indicator_visible(i)).collect();
    assert_eq!(visible, vec![0, 3, 4]);
}
