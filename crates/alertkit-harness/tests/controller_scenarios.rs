#![forbid(unsafe_code)]

//! Integration tests: dialog controller driven through the scripted host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use alertkit_core::{
    DialogBuilder, DialogButton, DialogDescriptor, DialogHandle, DialogHost, DialogKind, Emphasis,
    Region, SurfaceId, TextFieldSpec,
};
use alertkit_harness::{ScriptedHost, counting_callback, recording_selection};
use alertkit_runtime::{
    ControllerConfig, DialogController, DialogPhase, PRESENT_DELAY, PresentPacing,
};
use proptest::prelude::*;

const SURFACE: SurfaceId = SurfaceId::new(7);

fn setup() -> (Rc<ScriptedHost>, DialogController) {
    setup_with(ScriptedHost::new())
}

fn setup_with(host: ScriptedHost) -> (Rc<ScriptedHost>, DialogController) {
    let host = Rc::new(host);
    let controller = DialogController::for_surface(Rc::clone(&host) as Rc<dyn DialogHost>, SURFACE);
    (host, controller)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// ============================================================================
// Supersession
// ============================================================================

#[test]
fn back_to_back_presents_only_last_attaches() {
    let (host, c) = setup();
    let (log, first) = recording_selection();
    c.confirm("", "A", first).unwrap();
    c.acknowledge("", "B").unwrap();
    let last = c.acknowledge("", "C").unwrap();
    let handle = c.active_handle().unwrap();

    host.advance(PRESENT_DELAY);

    assert_eq!(c.active_dialog(), Some(last));
    assert_eq!(c.phase(), DialogPhase::Active);
    assert_eq!(host.attached(), vec![handle]);
    assert_eq!(host.message(handle).as_deref(), Some("C"));
    assert_eq!(host.max_attached(), 1);
    assert_eq!(host.discarded().len(), 2);
    assert!(log.borrow().is_empty());
}

#[test]
fn superseding_active_dialog_detaches_it_first() {
    let (host, c) = setup();
    c.acknowledge("", "first").unwrap();
    host.advance(PRESENT_DELAY);
    let first = c.active_handle().unwrap();

    c.acknowledge("", "second").unwrap();
    assert!(host.attached().is_empty());
    assert_eq!(host.detach_count(), 1);

    host.advance(PRESENT_DELAY);
    let second = c.active_handle().unwrap();
    assert_ne!(first, second);
    assert_eq!(host.attached(), vec![second]);
    assert_eq!(host.max_attached(), 1);
}

#[test]
fn superseded_callback_never_fires() {
    let (host, c) = setup();
    let (log, on_first) = recording_selection();
    c.confirm("", "first", on_first).unwrap();
    host.advance(PRESENT_DELAY);
    let first = c.active_handle().unwrap();

    c.acknowledge("", "second").unwrap();
    host.force_tap(first, 0);
    host.advance(PRESENT_DELAY);

    assert!(log.borrow().is_empty());
    assert_eq!(c.phase(), DialogPhase::Active);
}

#[test]
fn dismiss_on_idle_changes_nothing() {
    let (host, c) = setup();
    c.dismiss();
    assert_eq!(c.phase(), DialogPhase::Idle);
    assert_eq!(host.detach_count(), 0);
    assert!(host.discarded().is_empty());
    assert_eq!(host.pending_timers(), 0);
}

#[test]
fn missing_surface_reports_error() {
    let host = Rc::new(ScriptedHost::new());
    let c = DialogController::new(Rc::clone(&host) as Rc<dyn DialogHost>);
    assert!(c.confirm("", "x", |_, _| {}).is_err());
    assert_eq!(host.created_count(), 0);
    assert_eq!(host.pending_timers(), 0);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn confirm_reports_ok_index() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.confirm("Delete", "Really?", on_selected).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    assert!(host.tap(handle, 0));
    host.force_tap(handle, 0);
    host.force_tap(handle, 1);

    assert_eq!(*log.borrow(), vec![(0, None)]);
    assert_eq!(c.phase(), DialogPhase::Idle);
}

#[test]
fn confirm_reports_cancel_index() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.confirm("", "Really?", on_selected).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    let buttons = host.buttons(handle);
    assert_eq!(buttons[0].label, "OK");
    assert_eq!(buttons[1].label, "Cancel");
    assert_eq!(buttons[1].emphasis, Emphasis::Destructive);

    assert!(host.tap(handle, 1));
    assert_eq!(*log.borrow(), vec![(1, None)]);
}

#[test]
fn yes_no_uses_caller_emphasis() {
    let (host, c) = setup();
    c.yes_no(
        "",
        "Keep?",
        [Emphasis::Cancel, Emphasis::Standard],
        |_, _| {},
    )
    .unwrap();
    let handle = c.active_handle().unwrap();
    let buttons = host.buttons(handle);
    assert_eq!(buttons[0].label, "Yes");
    assert_eq!(buttons[0].emphasis, Emphasis::Cancel);
    assert_eq!(buttons[1].emphasis, Emphasis::Standard);
    assert_eq!(host.kind(handle), Some(DialogKind::ActionSheet));
}

#[test]
fn cancel_only_calls_back() {
    let (host, c) = setup();
    let (count, on_cancel) = counting_callback();
    c.cancel_only("Offline", "No connection.", on_cancel).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();
    assert_eq!(host.buttons(handle)[0].label, "Cancel");
    assert_eq!(host.title(handle).as_deref(), Some("Offline"));

    host.tap(handle, 0);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn custom_buttons_reject_mismatched_lists() {
    let (host, c) = setup();
    let result = c.custom_buttons(
        DialogKind::ActionSheet,
        "",
        "",
        &["One", "Two"],
        &[Emphasis::Standard],
        |_, _| {},
    );
    assert!(result.is_err());
    assert_eq!(host.created_count(), 0);
}

#[test]
fn custom_button_passes_style_through() {
    let (host, c) = setup();
    let (count, on_pressed) = counting_callback();
    c.custom_button(
        DialogKind::PlainMessage,
        "",
        "Wipe everything?",
        DialogButton::new("Wipe").emphasis(Emphasis::Destructive),
        on_pressed,
    )
    .unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();
    assert_eq!(host.buttons(handle)[0].emphasis, Emphasis::Destructive);
    host.tap(handle, 0);
    assert_eq!(*count.borrow(), 1);
}

// ============================================================================
// Text prompt
// ============================================================================

fn rename_prompt(on_selected: impl FnOnce(usize, Option<String>) + 'static) -> DialogBuilder {
    DialogDescriptor::prompt("Rename", "Enter a new name")
        .standard_button("Save")
        .cancel_button("Cancel")
        .watch_button(0)
        .text_field(TextFieldSpec::new().placeholder("Name"))
        .on_selected(on_selected)
}

#[test]
fn prompt_save_follows_text() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.text_prompt(rename_prompt(on_selected)).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    assert_eq!(host.is_enabled(handle, 0), Some(false));
    assert_eq!(host.is_enabled(handle, 1), Some(true));
    assert!(!host.tap(handle, 0));

    host.type_text(handle, "a");
    assert_eq!(host.is_enabled(handle, 0), Some(true));
    host.type_text(handle, "");
    assert_eq!(host.is_enabled(handle, 0), Some(false));
    host.type_text(handle, "abc");
    assert_eq!(host.is_enabled(handle, 0), Some(true));

    assert!(host.tap(handle, 0));
    assert_eq!(*log.borrow(), vec![(0, Some("abc".to_owned()))]);
}

#[test]
fn prompt_cancel_reports_current_text() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.text_prompt(rename_prompt(on_selected)).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    host.type_text(handle, "draft");
    host.tap(handle, 1);
    assert_eq!(*log.borrow(), vec![(1, Some("draft".to_owned()))]);
}

#[test]
fn prompt_disabled_tap_is_ignored_by_controller() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.text_prompt(rename_prompt(on_selected)).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    host.force_tap(handle, 0);
    assert!(log.borrow().is_empty());
    assert_eq!(c.phase(), DialogPhase::Active);
}

#[test]
fn prompt_with_initial_value_starts_enabled() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    let prompt = rename_prompt(on_selected).text_field(TextFieldSpec::new().initial_value("notes"));
    c.text_prompt(prompt).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    assert_eq!(host.is_enabled(handle, 0), Some(true));
    assert_eq!(host.text_field(handle).map(|(_, v)| v).as_deref(), Some("notes"));
    host.tap(handle, 0);
    assert_eq!(*log.borrow(), vec![(0, Some("notes".to_owned()))]);
}

#[test]
fn text_change_after_dismiss_is_ignored() {
    let (host, c) = setup();
    c.text_prompt(rename_prompt(|_, _| {})).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    c.dismiss();
    host.type_text(handle, "late");
    assert_eq!(host.is_enabled(handle, 0), Some(false));
    assert_eq!(c.phase(), DialogPhase::Idle);
}

// ============================================================================
// Timed dismissal
// ============================================================================

#[test]
fn timed_message_dismisses_two_seconds_after_presentation() {
    let (host, c) = setup();
    c.timed_message("", "Copied", None).unwrap();
    host.advance(PRESENT_DELAY);
    assert_eq!(c.phase(), DialogPhase::Active);

    host.advance(ms(1999));
    assert_eq!(c.phase(), DialogPhase::Active);
    host.advance(ms(1));
    assert_eq!(c.phase(), DialogPhase::Idle);
    assert!(host.attached().is_empty());
}

#[test]
fn timed_message_callback_runs_before_dismiss() {
    let (host, c) = setup();
    let weak = c.downgrade();
    let phase_seen = Rc::new(Cell::new(None));
    let seen = Rc::clone(&phase_seen);
    c.timed_message_then("", "Done", Some(ms(500)), move || {
        seen.set(weak.upgrade().map(|c| c.phase()));
    })
    .unwrap();

    host.advance(PRESENT_DELAY + ms(500));
    assert_eq!(phase_seen.get(), Some(DialogPhase::Active));
    assert_eq!(c.phase(), DialogPhase::Idle);
}

#[test]
fn follow_up_from_timed_callback_survives() {
    let (host, c) = setup();
    let weak = c.downgrade();
    c.timed_message_then("", "Step 1", Some(ms(500)), move || {
        if let Some(c) = weak.upgrade() {
            c.acknowledge("", "Step 2").unwrap();
        }
    })
    .unwrap();

    host.advance(PRESENT_DELAY + ms(500));
    let handle = c.active_handle().unwrap();
    assert_eq!(host.message(handle).as_deref(), Some("Step 2"));

    host.advance(PRESENT_DELAY);
    assert_eq!(c.phase(), DialogPhase::Active);
    assert_eq!(host.attached(), vec![handle]);
}

#[test]
fn stale_dismiss_timer_spares_newer_dialog() {
    let (host, c) = setup();
    c.acknowledge("", "A").unwrap();
    host.advance(PRESENT_DELAY);
    let (count, on_complete) = counting_callback();
    c.dismiss_after_then(Duration::from_secs(1), on_complete);

    host.advance(ms(500));
    let b = c.acknowledge("", "B").unwrap();
    host.advance(Duration::from_secs(2));

    assert_eq!(c.active_dialog(), Some(b));
    assert_eq!(c.phase(), DialogPhase::Active);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn dismiss_after_removes_current_dialog() {
    let (host, c) = setup();
    c.busy("", "Syncing").unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();

    c.dismiss_after(Duration::from_secs(1));
    host.advance(ms(999));
    assert!(host.has_busy_indicator(handle));
    host.advance(ms(1));
    assert_eq!(c.phase(), DialogPhase::Idle);
    assert!(!host.has_busy_indicator(handle));
}

#[test]
fn dismiss_after_on_idle_schedules_nothing() {
    let (host, c) = setup();
    c.dismiss_after(Duration::from_secs(1));
    assert_eq!(host.pending_timers(), 0);
}

// ============================================================================
// Busy indicator
// ============================================================================

#[test]
fn busy_with_cancel_reports_selection() {
    let (host, c) = setup();
    let (log, on_selected) = recording_selection();
    c.busy_with_cancel("", "Uploading", on_selected).unwrap();
    host.advance(PRESENT_DELAY);
    let handle = c.active_handle().unwrap();
    assert!(host.has_busy_indicator(handle));
    assert_eq!(host.buttons(handle)[0].label, "CANCEL");

    host.tap(handle, 0);
    assert_eq!(*log.borrow(), vec![(0, None)]);
    assert!(!host.has_busy_indicator(handle));
}

#[test]
fn busy_with_buttons_keeps_order() {
    let (host, c) = setup();
    c.busy_with_buttons("", "Waiting", &["Retry", "Stop"], |_, _| {})
        .unwrap();
    let handle = c.active_handle().unwrap();
    let labels: Vec<String> = host.buttons(handle).into_iter().map(|b| b.label).collect();
    assert_eq!(labels, ["Retry", "Stop"]);
}

// ============================================================================
// Anchoring
// ============================================================================

#[test]
fn action_sheet_gets_anchor_from_provider() {
    let (host, c) = setup();
    let region = Region::new(10.0, 20.0, 44.0, 44.0);
    c.set_anchor_provider(move |_: DialogHandle| region);

    c.confirm("", "Share?", |_, _| {}).unwrap();
    host.advance(PRESENT_DELAY);
    let sheet = c.active_handle().unwrap();
    assert_eq!(host.anchor(sheet), Some(region));
    assert_eq!(host.surface(sheet), Some(SURFACE));

    c.acknowledge("", "Plain").unwrap();
    host.advance(PRESENT_DELAY);
    let plain = c.active_handle().unwrap();
    assert_eq!(host.anchor(plain), None);
}

#[test]
fn action_sheet_without_provider_is_unanchored() {
    let (host, c) = setup();
    c.set_anchor_provider(|_: DialogHandle| Region::default());
    c.clear_anchor_provider();

    c.confirm("", "Share?", |_, _| {}).unwrap();
    host.advance(PRESENT_DELAY);
    assert_eq!(host.anchor(c.active_handle().unwrap()), None);
}

// ============================================================================
// Pacing
// ============================================================================

#[test]
fn await_dismissal_attaches_after_detach_completes() {
    let (host, c) = setup_with(ScriptedHost::new().with_dismiss_signals());
    c.acknowledge("", "A").unwrap();
    host.advance(Duration::ZERO);
    assert_eq!(c.phase(), DialogPhase::Active);

    c.acknowledge("", "B").unwrap();
    let b = c.active_handle().unwrap();
    host.advance(Duration::from_secs(5));
    assert_eq!(c.phase(), DialogPhase::Presenting);
    assert!(host.attached().is_empty());
    assert_eq!(host.pending_dismissals(), 1);

    host.finish_dismissals();
    assert_eq!(host.attached(), vec![b]);
    assert_eq!(c.phase(), DialogPhase::Active);
    assert_eq!(host.max_attached(), 1);
}

#[test]
fn await_dismissal_reports_dismissing_until_confirmed() {
    let (host, c) = setup_with(ScriptedHost::new().with_dismiss_signals());
    c.acknowledge("", "A").unwrap();
    host.advance(Duration::ZERO);

    c.dismiss();
    assert_eq!(c.phase(), DialogPhase::Dismissing);
    host.finish_dismissals();
    assert_eq!(c.phase(), DialogPhase::Idle);
}

#[test]
fn await_dismissal_skips_superseded_waiter() {
    let (host, c) = setup_with(ScriptedHost::new().with_dismiss_signals());
    c.acknowledge("", "A").unwrap();
    host.advance(Duration::ZERO);

    c.acknowledge("", "B").unwrap();
    c.acknowledge("", "C").unwrap();
    let last = c.active_handle().unwrap();
    assert_eq!(host.discarded().len(), 1);

    host.finish_dismissals();
    assert_eq!(host.attached(), vec![last]);
}

#[test]
fn explicit_fixed_delay_overrides_host_signal() {
    let host = Rc::new(ScriptedHost::new().with_dismiss_signals());
    let config = ControllerConfig::new().pacing(PresentPacing::FixedDelay(ms(100)));
    let c = DialogController::with_config(Rc::clone(&host) as Rc<dyn DialogHost>, config);
    c.attach_surface(SURFACE);

    c.acknowledge("", "A").unwrap();
    host.advance(ms(99));
    assert!(host.attached().is_empty());
    host.advance(ms(1));
    assert_eq!(c.phase(), DialogPhase::Active);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn last_present_wins(gaps in prop::collection::vec(0u64..600, 1..8)) {
        let (host, c) = setup();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut last = None;
        for (i, gap) in gaps.iter().enumerate() {
            let sink = Rc::clone(&fired);
            last = Some(c.confirm("", format!("#{i}"), move |index, _| {
                sink.borrow_mut().push((i, index));
            }).unwrap());
            host.advance(ms(*gap));
        }
        host.advance(Duration::from_secs(1));

        prop_assert_eq!(c.active_dialog(), last);
        prop_assert_eq!(c.phase(), DialogPhase::Active);
        prop_assert_eq!(host.attached().len(), 1);
        prop_assert!(host.max_attached() <= 1);
        prop_assert_eq!(host.created_count(), gaps.len());
        prop_assert!(fired.borrow().is_empty());
    }

    #[test]
    fn watched_button_tracks_last_text(edits in prop::collection::vec("[a-z]{0,3}", 1..10)) {
        let (host, c) = setup();
        c.text_prompt(rename_prompt(|_, _| {})).unwrap();
        host.advance(PRESENT_DELAY);
        let handle = c.active_handle().unwrap();
        for text in &edits {
            host.type_text(handle, text);
        }
        let last = edits.last().map(String::as_str).unwrap_or("");
        prop_assert_eq!(host.is_enabled(handle, 0), Some(!last.is_empty()));
        prop_assert_eq!(host.is_enabled(handle, 1), Some(true));
    }
}
