//! End-to-end overlay lifecycle: render, settle, close, unmount.

use scrim_core::clock::{Clock, ManualClock};
use scrim_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use scrim_core::geometry::Rect;
use scrim_widgets::StatefulWidget;
use scrim_widgets::frame::{Frame, HitId, NodeKind};
use scrim_widgets::modal::{
    ClassListSurface, CloseCallback, CloseOutcome, MODAL_HIT_CLOSE, ModalAction, ModalOverlay,
    ModalOverlayConfig, ModalOverlayState, POINTER_CLASS, PresentationSurface, SizeVariant,
    TRANSITION_CLASSES, TransitionState,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing_test::traced_test;
use web_time::{Duration, Instant};

const VIEWPORT: (u16, u16) = (1280, 800);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

struct Harness {
    clock: ManualClock,
    surface: Rc<RefCell<ClassListSurface>>,
    state: ModalOverlayState,
    calls: Rc<Cell<u32>>,
}

impl Harness {
    fn mounted() -> Self {
        let clock = ManualClock::new();
        let surface = Rc::new(RefCell::new(ClassListSurface::new()));
        let mut state = ModalOverlayState::with_clock(clock.clone());
        state.mount(Rc::clone(&surface));
        Self {
            clock,
            surface,
            state,
            calls: Rc::new(Cell::new(0)),
        }
    }

    fn widget(&self, open: bool) -> ModalOverlay<&'static str> {
        let calls = Rc::clone(&self.calls);
        ModalOverlay::new("content")
            .open(open)
            .hit_id(HitId::new(1))
            .on_close(move || calls.set(calls.get() + 1))
    }

    fn render(&mut self, open: bool) -> Frame {
        let widget = self.widget(open);
        let mut frame = Frame::with_hit_testing(VIEWPORT.0, VIEWPORT.1);
        widget.render(frame.bounds(), &mut frame, &mut self.state);
        frame
    }

    fn advance(&mut self, n: u64) {
        self.clock.advance(ms(n));
        self.state.tick();
    }

    fn clock_now(&self) -> Instant {
        self.clock.now()
    }

    fn on_screen(&self) -> bool {
        let surface = self.surface.borrow();
        surface.overlay().contains_none(TRANSITION_CLASSES) && surface.panel().contains(POINTER_CLASS)
    }

    fn off_screen(&self) -> bool {
        let surface = self.surface.borrow();
        surface.overlay().contains_all(TRANSITION_CLASSES) && !surface.panel().contains(POINTER_CLASS)
    }
}

#[test]
fn open_settles_to_visible_after_delay() {
    let mut h = Harness::mounted();
    h.render(true);
    assert!(h.off_screen());

    h.advance(99);
    assert!(h.off_screen());
    h.advance(1);
    assert!(h.on_screen());
    assert_eq!(h.state.transition(), TransitionState::Visible);
}

#[test]
fn rerender_with_same_flag_does_not_restart_settle() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(60);
    h.render(true);
    h.advance(40);
    assert!(h.on_screen());
}

#[test]
fn hide_settles_back_off_screen() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);
    assert!(h.on_screen());

    h.render(false);
    assert!(h.on_screen(), "switch waits for the settle delay");
    h.advance(100);
    assert!(h.off_screen());
    assert_eq!(h.state.transition(), TransitionState::Hidden);
}

#[test]
fn explicit_close_calls_back_once_after_exit_delay() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);

    let widget = h.widget(true);
    let outcome = widget.handle_close(&mut h.state);
    let deadline = match outcome {
        CloseOutcome::Scheduled { deadline } => deadline,
        other => panic!("expected scheduled close, got {other:?}"),
    };
    assert_eq!(deadline, h.clock_now() + ms(200));
    assert!(h.off_screen(), "exit presentation applies synchronously");

    h.advance(199);
    assert_eq!(h.calls.get(), 0);
    h.advance(1);
    assert_eq!(h.calls.get(), 1);
    h.advance(1000);
    assert_eq!(h.calls.get(), 1);
}

#[test]
fn repeated_close_requests_schedule_one_callback() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);

    let widget = h.widget(true);
    assert!(matches!(
        widget.handle_close(&mut h.state),
        CloseOutcome::Scheduled { .. }
    ));
    h.advance(150);
    assert_eq!(widget.handle_close(&mut h.state), CloseOutcome::AlreadyPending);
    h.advance(50);
    assert_eq!(h.calls.get(), 1);

    h.advance(500);
    assert_eq!(h.calls.get(), 1);
}

#[test]
fn close_without_surface_is_synchronous() {
    let mut state = ModalOverlayState::with_clock(ManualClock::new());
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    let widget = ModalOverlay::new(()).open(true).on_close(move || c.set(c.get() + 1));

    assert_eq!(widget.handle_close(&mut state), CloseOutcome::Immediate);
    assert_eq!(calls.get(), 1);
}

#[test]
fn closed_overlay_renders_no_content() {
    let mut h = Harness::mounted();
    let frame = h.render(false);
    assert_eq!(frame.count(&NodeKind::ContentSlot), 0);
    assert!(frame.find(&NodeKind::Text("content".into())).is_none());
    assert_eq!(frame.count(&NodeKind::CloseIcon), 1);

    let frame = h.render(true);
    assert_eq!(frame.count(&NodeKind::ContentSlot), 1);
    assert!(frame.find(&NodeKind::Text("content".into())).is_some());
}

#[test]
fn size_variants_shape_the_panel() {
    let mut state = ModalOverlayState::with_clock(ManualClock::new());
    let area = Rect::from_size(VIEWPORT.0, VIEWPORT.1);

    let mut frame = Frame::new(VIEWPORT.0, VIEWPORT.1);
    ModalOverlay::new(()).size(SizeVariant::Small).render(area, &mut frame, &mut state);
    let (_, panel) = frame.find(&NodeKind::Panel).expect("panel");
    assert_eq!((panel.rect.width, panel.rect.height), (500, 400));
    assert_eq!(panel.rect, Rect::new(390, 200, 500, 400));

    let mut frame = Frame::new(VIEWPORT.0, VIEWPORT.1);
    ModalOverlay::new(()).render(area, &mut frame, &mut state);
    let (_, panel) = frame.find(&NodeKind::Panel).expect("panel");
    assert_eq!(panel.rect, area);
    assert!(panel.classes.contains_all(["w-full", "h-full"]));

    let unknown = SizeVariant::from_name(Some("huge"));
    let mut frame = Frame::new(VIEWPORT.0, VIEWPORT.1);
    ModalOverlay::new(()).size(unknown).render(area, &mut frame, &mut state);
    let (_, panel) = frame.find(&NodeKind::Panel).expect("panel");
    assert_eq!(panel.rect, area);
}

#[test]
fn unmount_with_pending_timers_never_calls_back() {
    let mut h = Harness::mounted();
    h.render(true);
    let widget = h.widget(true);
    widget.handle_close(&mut h.state);
    h.render(false);
    assert!(h.state.next_deadline().is_some());

    assert!(h.state.unmount());
    assert_eq!(h.state.next_deadline(), None);
    h.advance(10_000);
    assert_eq!(h.calls.get(), 0);
}

#[test]
fn remount_after_unmount_reruns_settle() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);
    h.state.unmount();

    let fresh = Rc::new(RefCell::new(ClassListSurface::new()));
    h.state.mount(Rc::clone(&fresh));
    h.render(true);
    h.advance(100);
    assert!(fresh.borrow().overlay().contains_none(TRANSITION_CLASSES));
}

#[test]
fn settle_before_mount_reaches_the_surface() {
    let clock = ManualClock::new();
    let mut state = ModalOverlayState::with_clock(clock.clone());
    let widget = ModalOverlay::new("x").open(true).hit_id(HitId::new(1));
    let mut frame = Frame::with_hit_testing(VIEWPORT.0, VIEWPORT.1);
    widget.render(frame.bounds(), &mut frame, &mut state);
    clock.advance(ms(100));
    state.tick();

    let surface = Rc::new(RefCell::new(ClassListSurface::new()));
    state.mount(Rc::clone(&surface));
    for _ in 0..3 {
        let mut frame = Frame::with_hit_testing(VIEWPORT.0, VIEWPORT.1);
        widget.render(frame.bounds(), &mut frame, &mut state);
        clock.advance(ms(500));
        state.tick();
    }

    assert_eq!(state.transition(), TransitionState::Visible);
    assert!(state.presentation().interactive);
    let surface = surface.borrow();
    assert!(surface.overlay().contains_none(TRANSITION_CLASSES));
    assert!(surface.panel().contains(POINTER_CLASS));
}

#[test]
fn close_icon_click_while_entering_is_ignored() {
    let mut h = Harness::mounted();
    let frame = h.render(true);
    let (_, icon) = frame.find(&NodeKind::CloseIcon).expect("icon");
    let (x, y) = (icon.rect.x + 1, icon.rect.y + 1);
    let click = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y));

    let widget = h.widget(true);
    assert_eq!(widget.handle_event(&click, frame.hit_test(x, y), &mut h.state), None);
    assert!(!h.state.is_closing());
}

#[test]
fn reopen_during_exit_reenters() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);
    h.render(false);
    assert_eq!(h.state.transition(), TransitionState::Exiting);
    h.advance(50);
    h.render(true);
    assert_eq!(h.state.transition(), TransitionState::Entering);
    h.advance(100);
    assert!(h.on_screen());
}

#[test]
fn close_icon_click_closes() {
    let mut h = Harness::mounted();
    let frame = h.render(true);
    h.advance(100);

    let (_, icon) = frame.find(&NodeKind::CloseIcon).expect("icon");
    let (x, y) = (icon.rect.x + 1, icon.rect.y + 1);
    let hit = frame.hit_test(x, y);
    assert_eq!(hit.map(|(_, region, _)| region), Some(MODAL_HIT_CLOSE));

    let click = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y));
    let widget = h.widget(true);
    assert_eq!(
        widget.handle_event(&click, hit, &mut h.state),
        Some(ModalAction::CloseButtonClicked)
    );
    h.advance(200);
    assert_eq!(h.calls.get(), 1);
}

#[test]
fn escape_can_be_disabled() {
    let mut h = Harness::mounted();
    h.render(true);
    let widget = h
        .widget(true)
        .config(ModalOverlayConfig::default().close_on_escape(false));
    let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
    assert_eq!(widget.handle_event(&esc, None, &mut h.state), None);
    assert!(!h.state.is_closing());
}

#[test]
fn zero_exit_delay_fires_on_next_tick() {
    let mut h = Harness::mounted();
    let widget = h
        .widget(true)
        .config(ModalOverlayConfig::default().exit_delay(Duration::ZERO));
    widget.handle_close(&mut h.state);
    assert_eq!(h.calls.get(), 0);
    h.advance(0);
    assert_eq!(h.calls.get(), 1);
}

#[test]
fn custom_surface_sees_every_push() {
    #[derive(Default)]
    struct Recorder {
        pushes: Vec<(TransitionState, bool)>,
        interactive: bool,
    }

    impl PresentationSurface for Recorder {
        fn set_interactive(&mut self, interactive: bool) {
            self.interactive = interactive;
        }

        fn set_transition_state(&mut self, state: TransitionState) {
            self.pushes.push((state, self.interactive));
        }
    }

    let clock = ManualClock::new();
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut state = ModalOverlayState::with_clock(clock.clone());
    state.mount(Rc::clone(&recorder));
    state.observe_open(true);
    clock.advance(ms(100));
    state.tick();
    state.request_close(CloseCallback::noop());

    let pushes = &recorder.borrow().pushes;
    assert_eq!(
        pushes.as_slice(),
        &[
            (TransitionState::Hidden, false),
            (TransitionState::Visible, true),
            (TransitionState::Exiting, false),
        ]
    );
}

#[traced_test]
#[test]
fn close_sequence_is_logged() {
    let mut h = Harness::mounted();
    h.render(true);
    h.advance(100);
    h.widget(true).handle_close(&mut h.state);
    h.advance(200);

    assert!(logs_contain("surface mounted"));
    assert!(logs_contain("presentation applied"));
    assert!(logs_contain("close sequence started"));
    assert!(logs_contain("close callback invoked"));
}
