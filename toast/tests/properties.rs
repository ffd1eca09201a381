use proptest::prelude::*;

use toast::{
    classes,
    ButtonSpec,
    Dom,
    MemoryDom,
    ToastConfig,
    ToastManager,
    ToastOptions,
    TrustedMarkup,
    VirtualScheduler,
};

fn setup() -> (ToastManager<MemoryDom, VirtualScheduler>, MemoryDom, VirtualScheduler) {
    let dom = MemoryDom::new();
    let sched = VirtualScheduler::new();
    let manager = ToastManager::new(dom.clone(), sched.clone(), ToastConfig::default());
    manager.init().unwrap();
    (manager, dom, sched)
}

proptest! {
    #[test]
    fn message_text_round_trips(message in any::<String>()) {
        let (manager, dom, _) = setup();
        let toast = *manager.create(&message, ToastOptions::new()).unwrap().element();
        let content = dom.find_by_class(toast, classes::CONTENT)[0];

        prop_assert_eq!(dom.text_content(content), message);
    }

    #[test]
    fn one_button_per_descriptor_in_order(names in prop::collection::vec("[a-z][a-z0-9-]{0,7}", 1..8)) {
        let (manager, dom, _) = setup();
        let options = names.iter().fold(ToastOptions::new(), |opt, name| {
            opt.button(ButtonSpec::new(name.clone(), TrustedMarkup::from_trusted(name.clone())))
        });

        let toast = *manager.create("x", options).unwrap().element();
        let rows = dom.find_by_class(toast, classes::BUTTONS);
        prop_assert_eq!(rows.len(), 1);

        let rendered: Vec<String> = dom.children(&rows[0])
            .into_iter()
            .map(|b| dom.classes(b).join(" "))
            .collect();
        prop_assert_eq!(rendered, names);
    }

    #[test]
    fn dismiss_all_always_drains(count in 0usize..20, delays in prop::collection::vec(0u32..50, 0..20)) {
        let (manager, dom, sched) = setup();
        for i in 0..count {
            manager.create(&i.to_string(), ToastOptions::new()).unwrap();
        }
        // some toasts already have their own dismiss in flight
        for (toast, delay) in dom.children(&manager.container().unwrap()).into_iter().zip(delays) {
            manager.dismiss(Some(toast), Some(delay));
        }

        manager.dismiss_all();
        sched.run_until_idle();

        prop_assert!(dom.children(&manager.container().unwrap()).is_empty());
    }
}
