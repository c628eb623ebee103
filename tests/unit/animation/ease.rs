use super::*;

const ALL: [Ease; 2] = [Ease::Linear, Ease::Circle];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(7.0), ease.apply(1.0));
    }
}

#[test]
fn curves_are_monotonic() {
    for ease in ALL {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v + 1e-12 >= prev, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn circle_leads_linear() {
    assert!(Ease::Circle.apply(0.5) > Ease::Linear.apply(0.5));
    assert_eq!(Ease::default(), Ease::Circle);
}

#[test]
fn serde_names_are_snake_case() {
    let v: Ease = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(v, Ease::Linear);
    assert!(serde_json::from_str::<Ease>("\"in_out_cubic\"").is_err());
    assert_eq!(serde_json::to_string(&Ease::Circle).unwrap(), "\"circle\"");
}
