#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::animation::*;
    use crate::scope::*;
    use crate::signal::*;
    use crate::{Brush, Color, ColorStop, Dispose, Error, StateHolder, Store, adjust_color, effect};
    use web_time::{Duration, Instant};

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_unsubscribe() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        let id = sig.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        sig.set(1);
        sig.unsubscribe(id);
        sig.set(2);
        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_signal() {
        let sig = signal(1);
        let read_back = Rc::new(Cell::new(0));
        {
            let sig2 = sig.clone();
            let read_back = read_back.clone();
            sig.subscribe(move |_| read_back.set(sig2.get()));
        }
        sig.set(7);
        assert_eq!(read_back.get(), 7);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(0));

        let scope = Scope::new();
        let c = cleaned_up.clone();
        scope.add_disposer(move || c.set(c.get() + 1));

        assert_eq!(cleaned_up.get(), 0);
        scope.dispose();
        scope.dispose();
        assert_eq!(cleaned_up.get(), 1);
    }

    #[test]
    fn test_effect_registers_on_current_scope() {
        let ran = Rc::new(Cell::new(false));
        let scope = Scope::new();
        let d = scope.run(|| {
            let ran = ran.clone();
            effect(move || Dispose::new(move || ran.set(true)))
        });
        assert!(!d.is_disposed());
        scope.dispose();
        assert!(ran.get());
        assert!(d.is_disposed());
    }

    #[test]
    fn test_child_scope_disposed_with_parent() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let parent = Scope::new();
        let child = parent.child();
        {
            let o = order.clone();
            parent.add_disposer(move || o.borrow_mut().push("parent"));
        }
        {
            let o = order.clone();
            child.add_disposer(move || o.borrow_mut().push("child"));
        }
        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(child.is_disposed());
    }

    #[test]
    fn test_add_after_dispose_runs_immediately() {
        let scope = Scope::new();
        scope.dispose();
        let ran = Rc::new(Cell::new(false));
        let r = ran.clone();
        scope.add_disposer(move || r.set(true));
        assert!(ran.get());
    }

    #[test]
    fn test_store_dispatch() {
        struct Toggle;
        impl StateHolder for Toggle {
            type State = bool;
            type Event = ();
            fn initial_state() -> bool {
                false
            }
            fn reduce(s: &bool, _: ()) -> bool {
                !s
            }
        }

        let store: Store<Toggle> = Store::new();
        assert!(store.dispatch(()));
        assert!(!store.dispatch(()));
        assert!(!store.get());
    }

    #[test]
    fn test_color_parse_hex() {
        assert_eq!(Color::parse_hex("#FF5733"), Ok(Color(255, 87, 51, 255)));
        assert_eq!(Color::parse_hex("f53"), Ok(Color(255, 85, 51, 255)));
        assert_eq!(
            Color::parse_hex("#12345"),
            Err(Error::InvalidColor("#12345".into()))
        );
        assert_eq!(Color::from_hex("#ggg"), Color::BLACK);
    }

    #[test]
    fn test_adjust_color() {
        assert_eq!(adjust_color("#e6ccac", -15), "#d7bd9d");
        assert_eq!(adjust_color("#e8d0b3", 5), "#edd5b8");
        assert_eq!(adjust_color("#fff", 10), "#ffffff");
        assert_eq!(adjust_color("#010203", -10), "#000000");
        assert_eq!(adjust_color("ABC", 0), "#aabbcc");
    }

    #[test]
    fn test_adjust_color_invalid_is_black() {
        for bad in ["", "#", "#12", "#1234", "#12345g", "red", "##fff", "#fffffff"] {
            assert_eq!(adjust_color(bad, 40), "#000000", "input {bad:?}");
        }
    }

    #[test]
    fn test_adjust_color_channels_stay_in_range() {
        let inputs = ["#000", "#fff", "#7f7f7f", "#e6ccac", "#0a0b0c"];
        for c in inputs {
            for amount in [-1000, -256, -15, -1, 0, 1, 5, 255, 1000] {
                let out = adjust_color(c, amount);
                assert_eq!(out.len(), 7);
                assert!(out.starts_with('#'));
                assert!(Color::parse_hex(&out).is_ok(), "{c} {amount} -> {out}");
            }
        }
    }

    #[test]
    fn test_brush_css() {
        let b = Brush::Linear {
            angle_deg: 170.0,
            stops: vec![
                ColorStop::percent(Color::from_rgb(0xe6, 0xcc, 0xac), 0.0),
                ColorStop::percent(Color::from_rgb(0xd7, 0xbd, 0x9d), 100.0),
            ],
        };
        assert_eq!(
            b.to_css(),
            "linear-gradient(170deg, #e6ccac 0%, #d7bd9d 100%)"
        );
        assert_eq!(Color(0, 0, 0, 26).to_css(), "rgba(0,0,0,0.1)");
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::new(Instant::now());
        set_clock(Rc::new(clock.clone()));

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000)),
        );
        a.set_target(10.0);
        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert!(!a.update());
        assert!((*a.get() - 10.0).abs() < 0.001);
        reset_clock();
    }
}
