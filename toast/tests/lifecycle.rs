use std::cell::Cell;
use std::rc::Rc;

use toast::{
    classes,
    ButtonSpec,
    Dom,
    MemoryDom,
    NodeId,
    ToastConfig,
    ToastManager,
    ToastOptions,
    ToastState,
    TrustedMarkup,
    VirtualScheduler,
};

type Manager = ToastManager<MemoryDom, VirtualScheduler>;

fn setup() -> (Manager, MemoryDom, VirtualScheduler) {
    let dom = MemoryDom::new();
    let sched = VirtualScheduler::new();
    let manager = ToastManager::new(dom.clone(), sched.clone(), ToastConfig::default());
    manager.init().unwrap();
    (manager, dom, sched)
}

fn toasts(manager: &Manager) -> Vec<NodeId> {
    manager.dom().children(&manager.container().unwrap())
}

#[test]
fn default_options_build_the_expected_tree() {
    let (manager, dom, _) = setup();
    let handle = manager.create("Saved", ToastOptions::new()).unwrap();
    let toast = *handle.element();

    assert_eq!(toasts(&manager), vec![toast]);
    assert_eq!(dom.classes(toast), vec!["toast-message", "default"]);

    let wrapper = dom.children(&toast);
    assert_eq!(wrapper.len(), 1);
    let parts = dom.children(&wrapper[0]);
    assert_eq!(parts.len(), 2);
    assert_eq!(dom.classes(parts[0]), vec![classes::CONTENT_CONTAINER]);
    assert_eq!(dom.classes(parts[1]), vec![classes::CLOSE]);

    let content = dom.children(&parts[0]);
    assert_eq!(content.len(), 1);
    assert_eq!(dom.classes(content[0]), vec![classes::CONTENT]);
    assert_eq!(dom.text_content(content[0]), "Saved");

    assert!(dom.find_by_class(toast, classes::BUTTONS).is_empty());
    assert!(dom.inner_html(parts[1]).unwrap().starts_with("<svg"));
}

#[test]
fn type_string_becomes_classes() {
    let (manager, dom, _) = setup();
    let handle = manager.create("x", ToastOptions::new().kind("error  wide")).unwrap();

    assert_eq!(dom.classes(*handle.element()), vec!["toast-message", "error", "wide"]);
}

#[test]
fn no_close_control_when_disabled() {
    let (manager, dom, _) = setup();
    let handle = manager.create("x", ToastOptions::new().show_close_button(false)).unwrap();

    assert!(dom.find_by_class(*handle.element(), classes::CLOSE).is_empty());
}

#[test]
fn buttons_render_in_order_after_the_content() {
    let (manager, dom, _) = setup();
    let options = ToastOptions::new()
        .button(ButtonSpec::new("undo", TrustedMarkup::from_trusted("<i>Undo</i>")).href("/undo"))
        .button(ButtonSpec::new("btn ok", TrustedMarkup::from_trusted("OK")).kind("button"));

    let toast = *manager.create("Deleted", options).unwrap().element();
    let rows = dom.find_by_class(toast, classes::BUTTONS);
    assert_eq!(rows.len(), 1);

    let content_container = dom.find_by_class(toast, classes::CONTENT_CONTAINER)[0];
    let parts = dom.children(&content_container);
    assert_eq!(dom.classes(parts[0]), vec![classes::CONTENT]);
    assert_eq!(parts[1], rows[0]);

    let buttons = dom.children(&rows[0]);
    assert_eq!(buttons.len(), 2);
    assert_eq!(dom.tag(buttons[0]), "a");
    assert_eq!(dom.classes(buttons[0]), vec!["undo"]);
    assert_eq!(dom.inner_html(buttons[0]).as_deref(), Some("<i>Undo</i>"));
    assert_eq!(dom.attribute(buttons[0], "href").as_deref(), Some("/undo"));
    assert_eq!(dom.tag(buttons[1]), "button");
    assert_eq!(dom.classes(buttons[1]), vec!["btn", "ok"]);
    assert_eq!(dom.attribute(buttons[1], "href"), None);
}

#[test]
fn button_callbacks_are_wired_directly() {
    let (manager, dom, _) = setup();
    let clicks = Rc::new(Cell::new(0));
    let button = {
        let clicks = clicks.clone();
        ButtonSpec::new("retry", TrustedMarkup::from_trusted("Retry"))
            .on_click(move || clicks.set(clicks.get() + 1))
    };

    let toast = *manager.create("Failed", ToastOptions::new().button(button)).unwrap().element();
    let row = dom.find_by_class(toast, classes::BUTTONS)[0];
    let retry = dom.children(&row)[0];

    dom.click(retry);
    assert_eq!(clicks.get(), 1);
    // clicking an action doesn't dismiss anything
    assert_eq!(manager.state(&toast), ToastState::Created);
}

#[test]
fn message_is_literal_text() {
    let (manager, dom, _) = setup();
    let message = r#"<script>alert("hi")</script> & <b>bold</b>"#;
    let toast = *manager.create(message, ToastOptions::new()).unwrap().element();
    let content = dom.find_by_class(toast, classes::CONTENT)[0];

    assert_eq!(dom.text_content(content), message);
    assert_eq!(dom.inner_html(content), None);
    assert!(dom.to_html(content).contains("&lt;script&gt;"));
}

#[test]
fn max_height_is_pinned_to_rendered_height() {
    let (manager, dom, _) = setup();
    let with_close = *manager.create("x", ToastOptions::new()).unwrap().element();
    let without_close = *manager.create("x", ToastOptions::new().show_close_button(false)).unwrap().element();

    assert_eq!(dom.style(with_close, "max-height").as_deref(), Some("40px"));
    assert_eq!(dom.style(without_close, "max-height").as_deref(), Some("20px"));
}

#[test]
fn opens_one_tick_after_creation() {
    let (manager, _, sched) = setup();
    let handle = manager.create("x", ToastOptions::new()).unwrap();

    assert_eq!(handle.state(), ToastState::Created);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Opening);
    // no auto-dismiss by default
    sched.run_until_idle();
    assert_eq!(handle.state(), ToastState::Opening);
}

#[test]
fn default_wrapper_dismisses_after_5001() {
    let (manager, _, sched) = setup();
    let handle = manager.default("hi", ToastOptions::new()).unwrap();

    sched.advance(5000);
    assert_eq!(handle.state(), ToastState::Opening);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(199);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Removed);
    assert!(toasts(&manager).is_empty());
}

#[test]
fn zero_dismiss_after_overrides_the_default() {
    let (manager, _, sched) = setup();
    let handle = manager.default("hi", ToastOptions::new().dismiss_after(0)).unwrap();

    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(200);
    assert_eq!(handle.state(), ToastState::Removed);
}

#[test]
fn sticky_overrides_the_default() {
    let (manager, _, sched) = setup();
    let handle = manager.default("hi", ToastOptions::new().sticky()).unwrap();

    sched.advance(60_000);
    assert_eq!(handle.state(), ToastState::Opening);
}

#[test]
fn severity_wrappers_set_type_and_return_handles() {
    let (manager, dom, sched) = setup();
    let ok = manager.success("ok", ToastOptions::new()).unwrap();
    let bad = manager.error("bad", ToastOptions::new()).unwrap();
    let fyi = manager.info("fyi", ToastOptions::new()).unwrap();
    let careful = manager.warning("careful", ToastOptions::new()).unwrap();
    let custom = manager.success("ok", ToastOptions::new().kind("party")).unwrap();

    assert!(dom.has_class(ok.element(), "success"));
    assert!(dom.has_class(bad.element(), "error"));
    assert!(dom.has_class(fyi.element(), "info"));
    assert!(dom.has_class(careful.element(), "warning"));
    assert!(dom.has_class(custom.element(), "party"));
    assert!(!dom.has_class(custom.element(), "success"));

    sched.advance(5201);
    assert!(toasts(&manager).is_empty());
}

#[test]
fn handle_dismisses_its_own_toast() {
    let (manager, _, sched) = setup();
    let first = manager.create("first", ToastOptions::new()).unwrap();
    let second = manager.create("second", ToastOptions::new()).unwrap();

    first.dismiss(None);
    sched.advance(1);
    assert_eq!(first.state(), ToastState::Closing);
    assert_eq!(second.state(), ToastState::Opening);

    sched.advance(200);
    assert_eq!(toasts(&manager), vec![*second.element()]);
}

#[test]
fn dismiss_with_zero_delay_then_again_is_harmless() {
    let (manager, _, sched) = setup();
    let handle = manager.create("x", ToastOptions::new()).unwrap();
    let toast = *handle.element();

    manager.dismiss(Some(toast), Some(0));
    sched.advance(0);
    assert_eq!(manager.state(&toast), ToastState::Closing);
    sched.advance(200);
    assert_eq!(manager.state(&toast), ToastState::Removed);

    manager.dismiss(Some(toast), Some(0));
    manager.dismiss(Some(toast), None);
    sched.run_until_idle();
    assert_eq!(manager.state(&toast), ToastState::Removed);
    assert_eq!(sched.pending(), 0);
}

#[test]
fn dismissing_before_open_skips_opening() {
    let (manager, dom, sched) = setup();
    let handle = manager.create("x", ToastOptions::new()).unwrap();

    handle.dismiss(Some(0));
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Closing);
    assert!(!dom.has_class(handle.element(), classes::SHOULD_OPEN));
}

#[test]
fn close_control_dismisses_its_toast() {
    let (manager, dom, sched) = setup();
    let keep = manager.create("keep", ToastOptions::new()).unwrap();
    let handle = manager.create("bye", ToastOptions::new()).unwrap();
    let close = dom.find_by_class(*handle.element(), classes::CLOSE)[0];
    assert_eq!(dom.listener_count(close), 1);

    dom.click(close);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(200);
    assert_eq!(handle.state(), ToastState::Removed);
    assert_eq!(keep.state(), ToastState::Opening);
}

#[test]
fn close_control_finds_its_toast_when_clicked() {
    let (manager, dom, sched) = setup();
    let first = manager.create("first", ToastOptions::new()).unwrap();
    let second = manager.create("second", ToastOptions::new()).unwrap();

    // Move the first toast's close control into the second toast
    let close = dom.find_by_class(*first.element(), classes::CLOSE)[0];
    let wrapper = dom.parent(&dom.find_by_class(*second.element(), classes::CLOSE)[0]).unwrap();
    dom.append_child(&wrapper, &close).unwrap();

    dom.click(close);
    sched.advance(1);
    assert_eq!(second.state(), ToastState::Closing);
    assert_eq!(first.state(), ToastState::Opening);
}

#[test]
fn close_control_outliving_the_manager_is_inert() {
    let dom = MemoryDom::new();
    let sched = VirtualScheduler::new();
    let close = {
        let manager = ToastManager::new(dom.clone(), sched.clone(), ToastConfig::default());
        manager.init().unwrap();
        let handle = manager.create("x", ToastOptions::new()).unwrap();
        sched.run_until_idle();
        dom.find_by_class(*handle.element(), classes::CLOSE)[0]
    };

    dom.click(close);
    assert_eq!(sched.pending(), 0);
}

#[test]
fn untargeted_dismiss_picks_the_last_toast_at_call_time() {
    let (manager, _, sched) = setup();
    let first = manager.create("first", ToastOptions::new()).unwrap();

    manager.dismiss(None, Some(10));
    sched.advance(5);
    let second = manager.create("second", ToastOptions::new()).unwrap();
    sched.advance(5);

    assert_eq!(first.state(), ToastState::Closing);
    assert_eq!(second.state(), ToastState::Opening);
}

#[test]
fn untargeted_dismiss_of_a_toast_already_gone_leaves_the_rest() {
    let (manager, _, sched) = setup();
    let first = manager.create("first", ToastOptions::new()).unwrap();
    let second = manager.create("second", ToastOptions::new()).unwrap();

    manager.dismiss(None, Some(50));
    second.dismiss(Some(0));
    sched.run_until_idle();

    assert_eq!(second.state(), ToastState::Removed);
    assert_eq!(first.state(), ToastState::Opening);
}

#[test]
fn untargeted_dismiss_on_empty_container_is_a_no_op() {
    let (manager, _, sched) = setup();

    manager.dismiss(None, None);
    assert_eq!(sched.pending(), 0);
    sched.run_until_idle();
    assert!(toasts(&manager).is_empty());
}

#[test]
fn dismiss_all_empties_the_container() {
    let (manager, _, sched) = setup();
    let handles: Vec<_> = (0..5)
        .map(|i| manager.create(&format!("toast {}", i), ToastOptions::new()).unwrap())
        .collect();

    manager.dismiss_all();
    sched.advance(1);
    assert!(handles.iter().all(|h| h.state() == ToastState::Closing));

    sched.run_until_idle();
    assert!(toasts(&manager).is_empty());
    assert!(handles.iter().all(|h| h.state() == ToastState::Removed));
}

#[test]
fn configured_timings_are_honoured() {
    let dom = MemoryDom::new();
    let sched = VirtualScheduler::new();
    let config = ToastConfig {
        open_delay: 10,
        close_delay: 500,
        default_dismiss_after: 1000,
        ..Default::default()
    };
    let manager = ToastManager::new(dom, sched.clone(), config);
    manager.init().unwrap();

    let handle = manager.default("slow", ToastOptions::new()).unwrap();
    sched.advance(9);
    assert_eq!(handle.state(), ToastState::Created);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Opening);
    sched.advance(991);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(499);
    assert_eq!(handle.state(), ToastState::Closing);
    sched.advance(1);
    assert_eq!(handle.state(), ToastState::Removed);
}
