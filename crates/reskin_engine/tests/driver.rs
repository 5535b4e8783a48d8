//! Driver-level behavior: short circuits, error propagation, animation
//! landing, association persistence, and the transparency toggle.

use std::time::Duration;

use reskin_color::{Color, Interpolation};
use reskin_engine::{Easing, ReskinError, ReskinOptions, Reskinner};
use reskin_harness::{FakeToolkit, WidgetSpec};
use reskin_theme::ThemeTable;
use reskin_toolkit::{Attr, Toolkit, WidgetKind, WindowId};

const THEMES: &str = r##"
[old]
background = "#111111"
text = "#eeeeee"
input = "#222222"
text-input = "#dddddd"
scroll = "#333333"
button = ["#aaaaaa", "#444444"]

[new]
background = "#f0f0f0"
text = "#101010"
input = "#ffffff"
text-input = "#000000"
scroll = "#cccccc"
button = ["#202020", "#c0c0c0"]
"##;

fn hex(value: u32) -> Color {
    Color::from_hex(value)
}

fn setup() -> (FakeToolkit, WindowId, ThemeTable) {
    let mut tk = FakeToolkit::new("old");
    let table = ThemeTable::from_toml_str(THEMES).unwrap();
    let window = tk.add_window();
    (tk, window, table)
}

fn text_widget(tk: &mut FakeToolkit, window: WindowId) -> reskin_toolkit::WidgetId {
    tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .attr(Attr::Background, hex(0x111111))
            .attr(Attr::Foreground, hex(0xEEEEEE)),
    )
}

#[test]
fn identical_theme_is_a_zero_mutation_no_op() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    Reskinner::new()
        .reskin(&mut tk, window, "old", &table, &ReskinOptions::default())
        .unwrap();
    assert_eq!(tk.total_mutations(), 0);
    assert_eq!(tk.refresh_count(window), 0);
}

#[test]
fn unknown_theme_fails_before_any_mutation() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    let err = Reskinner::new()
        .reskin(&mut tk, window, "missing", &table, &ReskinOptions::default())
        .unwrap_err();
    assert!(matches!(err, ReskinError::UnknownTheme(name) if name == "missing"));
    assert_eq!(tk.total_mutations(), 0);
}

#[test]
fn unknown_seed_theme_also_fails_fast() {
    let mut tk = FakeToolkit::new("not-in-table");
    let table = ThemeTable::from_toml_str(THEMES).unwrap();
    let window = tk.add_window();
    let err = Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap_err();
    assert!(matches!(err, ReskinError::UnknownTheme(name) if name == "not-in-table"));
    assert_eq!(tk.total_mutations(), 0);
}

#[test]
fn conflicting_filters_fail_before_any_mutation() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    let opts = ReskinOptions::new().with_targets(["a"]).with_exempt(["b"]);
    let err = Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &opts)
        .unwrap_err();
    assert!(matches!(err, ReskinError::ConflictingFilters));
    assert_eq!(tk.total_mutations(), 0);
}

#[test]
fn target_filter_limits_the_pass_to_tagged_widgets() {
    let (mut tk, window, table) = setup();
    let styled = tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .tag("styled")
            .attr(Attr::Background, hex(0x111111))
            .attr(Attr::Foreground, hex(0xEEEEEE)),
    );
    let skipped = tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .tag("skipped")
            .attr(Attr::Background, hex(0x111111))
            .attr(Attr::Foreground, hex(0xEEEEEE)),
    );
    let opts = ReskinOptions::new()
        .with_targets(["styled"])
        .with_reskin_background(false);
    Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &opts)
        .unwrap();

    assert!(tk.widget_mutations(styled) > 0);
    assert_eq!(tk.widget_mutations(skipped), 0);
    assert_eq!(tk.widget_color(skipped, Attr::Background), Some(hex(0x111111)));
}

#[test]
fn exempt_filter_skips_only_the_named_widgets() {
    let (mut tk, window, table) = setup();
    let kept = text_widget(&mut tk, window);
    let exempt = tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .tag("quiet")
            .attr(Attr::Background, hex(0x111111)),
    );
    let opts = ReskinOptions::new().with_exempt(["quiet"]);
    Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &opts)
        .unwrap();

    assert!(tk.widget_mutations(kept) > 0);
    assert_eq!(tk.widget_mutations(exempt), 0);
}

#[test]
fn honor_previous_preserves_customized_values() {
    let (mut tk, window, table) = setup();
    // Customized away from the old theme's nominal background.
    let custom = tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .attr(Attr::Background, hex(0x123456))
            .attr(Attr::Foreground, hex(0xEEEEEE)),
    );
    Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap();

    // Background was customized and stays; foreground matched the old
    // nominal text color and moves.
    assert_eq!(tk.widget_color(custom, Attr::Background), Some(hex(0x123456)));
    assert_eq!(tk.widget_color(custom, Attr::Foreground), Some(hex(0x101010)));
}

#[test]
fn honor_previous_can_be_disabled() {
    let (mut tk, window, table) = setup();
    let custom = tk.add_widget(
        window,
        WidgetSpec::new(WidgetKind::Text)
            .attr(Attr::Background, hex(0x123456))
            .attr(Attr::Foreground, hex(0xEEEEEE)),
    );
    Reskinner::new()
        .reskin(
            &mut tk,
            window,
            "new",
            &table,
            &ReskinOptions::new().with_honor_previous(false),
        )
        .unwrap();
    assert_eq!(tk.widget_color(custom, Attr::Background), Some(hex(0xF0F0F0)));
}

#[test]
fn set_future_controls_the_toolkit_theme() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    Reskinner::new()
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap();
    assert_eq!(tk.current_theme(), "new");

    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    Reskinner::new()
        .reskin(
            &mut tk,
            window,
            "new",
            &table,
            &ReskinOptions::new().with_set_future(false),
        )
        .unwrap();
    assert_eq!(tk.current_theme(), "old");
}

#[test]
fn successful_reskin_persists_the_association() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    let mut reskinner = Reskinner::new();
    assert!(reskinner.window_theme(window).is_none());
    reskinner
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap();
    let entry = reskinner.window_theme(window).unwrap();
    assert_eq!(entry.theme, "new");
    assert_eq!(entry.palette, *table.get("new").unwrap());
}

#[test]
fn instant_reskin_on_a_destroyed_window_propagates() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    tk.destroy_window(window);
    let mut reskinner = Reskinner::new();
    let err = reskinner
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap_err();
    assert!(matches!(err, ReskinError::WidgetDestroyed));
    // Nothing was persisted for the failed transition.
    assert!(reskinner.window_theme(window).is_none());
}

#[test]
fn animated_reskin_lands_exactly_on_the_target_palette() {
    let (mut tk, window, table) = setup();
    let text = text_widget(&mut tk, window);
    let mut reskinner = Reskinner::new();
    reskinner
        .animated_reskin(
            &mut tk,
            window,
            "new",
            &table,
            Duration::from_millis(25),
            Interpolation::Rgb,
            &ReskinOptions::default(),
        )
        .unwrap();

    // The loop's elapsed/duration progress never reaches exactly 1; the
    // forced final pass does, so the end state is the target palette with
    // no rounding drift.
    assert_eq!(tk.widget_color(text, Attr::Background), Some(hex(0xF0F0F0)));
    assert_eq!(tk.widget_color(text, Attr::Foreground), Some(hex(0x101010)));
    assert_eq!(tk.window_color(window), Some(hex(0xF0F0F0)));
    assert!(tk.refresh_count(window) >= 1);
    assert_eq!(reskinner.window_theme(window).unwrap().theme, "new");
}

#[test]
fn animated_reskin_supports_every_interpolation_mode_and_easing() {
    for (mode, easing) in [
        (Interpolation::Rgb, Easing::Linear),
        (Interpolation::HueForward, Easing::EaseInOutCubic),
        (Interpolation::HslShortest, Easing::EaseOutBounce),
    ] {
        let (mut tk, window, table) = setup();
        let text = text_widget(&mut tk, window);
        Reskinner::new()
            .animated_reskin(
                &mut tk,
                window,
                "new",
                &table,
                Duration::from_millis(10),
                mode,
                &ReskinOptions::new().with_easing(easing),
            )
            .unwrap();
        assert_eq!(
            tk.widget_color(text, Attr::Background),
            Some(hex(0xF0F0F0)),
            "{mode:?}/{easing:?}"
        );
    }
}

#[test]
fn window_closing_mid_animation_ends_the_loop_quietly() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    // Allow the first few mutations, then fail as if the window closed.
    tk.destroy_after(3);
    let mut reskinner = Reskinner::new();
    reskinner
        .animated_reskin(
            &mut tk,
            window,
            "new",
            &table,
            Duration::from_millis(25),
            Interpolation::Rgb,
            &ReskinOptions::default(),
        )
        .unwrap();
    // The aborted transition is not recorded.
    assert!(reskinner.window_theme(window).is_none());
}

#[test]
fn zero_duration_still_applies_the_final_frame() {
    let (mut tk, window, table) = setup();
    let text = text_widget(&mut tk, window);
    Reskinner::new()
        .animated_reskin(
            &mut tk,
            window,
            "new",
            &table,
            Duration::ZERO,
            Interpolation::Rgb,
            &ReskinOptions::default(),
        )
        .unwrap();
    assert_eq!(tk.widget_color(text, Attr::Background), Some(hex(0xF0F0F0)));
}

#[test]
fn second_reskin_uses_the_stored_association_as_old_theme() {
    let (mut tk, window, table) = setup();
    let text = text_widget(&mut tk, window);
    let mut reskinner = Reskinner::new();
    reskinner
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap();
    // Transition back: the stored entry (not the toolkit current theme)
    // supplies the old palette, and honor checks compare against it.
    reskinner
        .reskin(&mut tk, window, "old", &table, &ReskinOptions::default())
        .unwrap();
    assert_eq!(tk.widget_color(text, Attr::Background), Some(hex(0x111111)));
    assert_eq!(reskinner.window_theme(window).unwrap().theme, "old");
}

#[test]
fn toggle_transparency_flips_between_unset_and_window_background() {
    let (mut tk, window, table) = setup();
    text_widget(&mut tk, window);
    let mut reskinner = Reskinner::new();
    reskinner
        .reskin(&mut tk, window, "new", &table, &ReskinOptions::default())
        .unwrap();

    reskinner.toggle_transparency(&mut tk, window).unwrap();
    assert_eq!(
        tk.window_transparency_key(window).unwrap(),
        Some(hex(0xF0F0F0))
    );
    reskinner.toggle_transparency(&mut tk, window).unwrap();
    assert_eq!(tk.window_transparency_key(window).unwrap(), None);
}
