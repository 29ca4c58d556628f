//! End-to-end tests for the chip row: resize pipeline, collection
//! changes, and the deferred redraw notification.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chipline::{ChipRow, ChipSlots, MeasuredChip, OverflowCalculator, SelectionModel};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn slots_of(widths: &[f32]) -> ChipSlots {
    let mut slots = ChipSlots::new();
    for &width in widths {
        slots.push(MeasuredChip::from_width(width));
    }
    slots
}

#[test]
fn resize_storm_settles_to_two_passes() {
    init_tracing();

    let mut row = ChipRow::new();
    let mut chips = slots_of(&[60.0; 6]);
    let passes = Arc::new(AtomicUsize::new(0));

    let passes_clone = passes.clone();
    row.monitor().width_changed.connect(move |_| {
        passes_clone.fetch_add(1, Ordering::SeqCst);
    });

    row.begin_observation().unwrap();
    let t0 = Instant::now();

    // Rapid samples inside one 20ms throttle window.
    row.container_resized(200.0, t0, &mut chips);
    row.container_resized(200.0, t0 + Duration::from_millis(2), &mut chips);
    row.container_resized(201.0, t0 + Duration::from_millis(3), &mut chips);
    row.container_resized(205.0, t0 + Duration::from_millis(4), &mut chips);

    // Leading edge only so far.
    assert_eq!(passes.load(Ordering::SeqCst), 1);
    assert_eq!(row.last_width(), 200.0);

    // Trailing edge carries the settled width.
    row.tick(t0 + Duration::from_millis(25), &mut chips);
    assert_eq!(passes.load(Ordering::SeqCst), 2);
    assert_eq!(row.last_width(), 205.0);
}

#[test]
fn selection_growth_collapses_trailing_chips() {
    init_tracing();

    let mut selection = SelectionModel::from_items(["Martha", "Liam", "Olivia", "Noah"]);
    let mut chips = slots_of(&[60.0; 4]);
    let mut row = ChipRow::new();

    row.begin_observation().unwrap();
    let t0 = Instant::now();
    row.container_resized(400.0, t0, &mut chips);
    assert_eq!(row.hidden_count(), 0);

    // Two more picks; the host re-renders chips and fires the
    // collection trigger.
    selection.push("Emma");
    selection.push("Oliver");
    chips.push(MeasuredChip::from_width(60.0));
    chips.push(MeasuredChip::from_width(60.0));
    row.chips_changed(&mut chips);

    assert_eq!(selection.len(), 6);
    assert_eq!(row.hidden_count(), 1);
    assert_eq!(chips.hidden_count(), 1);

    // Deselecting from the front restores the fit.
    assert!(selection.remove("Martha"));
    let mut chips = slots_of(&[60.0; 5]);
    row.chips_changed(&mut chips);
    assert_eq!(row.hidden_count(), 0);
}

#[test]
fn lagging_chip_is_captured_once_rendered() {
    init_tracing();

    let mut row = ChipRow::new();

    // Five selected, chip at index 3 not rendered yet.
    let mut chips = ChipSlots::new();
    for i in 0..5 {
        if i == 3 {
            chips.push_empty();
        } else {
            chips.push(MeasuredChip::from_width(100.0));
        }
    }

    row.begin_observation().unwrap();
    let t0 = Instant::now();
    row.container_resized(400.0, t0, &mut chips);

    // Budget 315: the four measurable chips accumulate to 400, so only
    // the last one is hidden; the empty slot contributes nothing.
    assert_eq!(row.hidden_count(), 1);

    // The chip renders; the collection change reruns the pass.
    chips.set(3, MeasuredChip::from_width(100.0));
    row.chips_changed(&mut chips);
    assert_eq!(row.hidden_count(), 2);
}

#[test]
fn redraw_notification_arrives_on_the_next_tick() {
    init_tracing();

    let mut row = ChipRow::new();
    let mut chips = slots_of(&[80.0, 80.0, 80.0]);
    let redraws = Arc::new(AtomicUsize::new(0));

    let redraws_clone = redraws.clone();
    row.redraw_requested().connect(move |_| {
        redraws_clone.fetch_add(1, Ordering::SeqCst);
    });

    row.begin_observation().unwrap();
    let t0 = Instant::now();
    row.container_resized(300.0, t0, &mut chips);

    // Mutation happened, notification has not.
    assert_eq!(row.hidden_count(), 1);
    assert_eq!(redraws.load(Ordering::SeqCst), 0);

    row.tick(t0 + Duration::from_millis(25), &mut chips);
    assert_eq!(redraws.load(Ordering::SeqCst), 1);
}

#[test]
fn narrow_container_hides_the_entire_selection() {
    init_tracing();

    let mut row = ChipRow::new();
    let mut chips = slots_of(&[30.0, 45.0, 25.0]);

    row.begin_observation().unwrap();
    row.container_resized(85.0, Instant::now(), &mut chips);

    assert_eq!(row.hidden_count(), 3);
    assert_eq!(chips.hidden_count(), 3);
}

#[test]
fn custom_reserve_changes_the_budget() {
    init_tracing();

    let mut row = ChipRow::new().with_calculator(OverflowCalculator::with_reserved(20.0));
    let mut chips = slots_of(&[60.0; 6]);

    row.begin_observation().unwrap();
    row.container_resized(400.0, Instant::now(), &mut chips);

    // Budget 380: five chips fit (300), the sixth lands on 360 <= 380.
    assert_eq!(row.hidden_count(), 0);
}
