//! End-to-end circuit scenarios.
//!
//! These tests place components in a model, wire them up and read the
//! refreshed sink states.

use gateboard_core::{evaluate, Component, ComponentKind, Limits, Model, ModelError, Wire};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Place a component in the model and return its handle.
fn place(model: &mut Model, kind: ComponentKind, x: i32, y: i32) -> Component {
    let component = Component::new(kind, x, y);
    model
        .add_component(component.clone())
        .expect("component should be placed");
    component
}

/// Place a source whose state is `value`.
fn input(model: &mut Model, value: bool, y: i32) -> Component {
    let kind = if value {
        ComponentKind::HighInput
    } else {
        ComponentKind::LowInput
    };
    place(model, kind, 0, y)
}

/// Test case: half adder
///
/// - sum = A XOR B
/// - carry = A AND B
#[test]
fn test_half_adder() {
    init_tracing();

    let mut model = Model::new();
    let a = input(&mut model, true, 0);
    let b = input(&mut model, true, 50);

    let xor = place(&mut model, ComponentKind::Xor, 100, 0);
    let and = place(&mut model, ComponentKind::And, 100, 50);
    let sum = place(&mut model, ComponentKind::Output, 200, 0);
    let carry = place(&mut model, ComponentKind::Output, 200, 50);

    for gate in [&xor, &and] {
        model.connect(&a, gate).unwrap();
        model.connect(&b, gate).unwrap();
    }
    model.connect(&xor, &sum).unwrap();
    model.connect(&and, &carry).unwrap();

    // (a, b) -> (sum, carry)
    let test_cases = [
        ((false, false), (false, false)),
        ((false, true), (true, false)),
        ((true, false), (true, false)),
        ((true, true), (false, true)), // 1 + 1 = 10
    ];

    for ((va, vb), (want_sum, want_carry)) in test_cases {
        a.set_state(va);
        b.set_state(vb);

        let outputs = model.refresh_outputs();
        assert_eq!(outputs[&sum.id()], want_sum, "sum for a={va}, b={vb}");
        assert_eq!(outputs[&carry.id()], want_carry, "carry for a={va}, b={vb}");
    }
}

/// Test case: ((A AND B) OR (NOT C))
#[test]
fn test_complex_logic_chain() {
    init_tracing();

    let mut model = Model::new();
    let a = input(&mut model, true, 0);
    let b = input(&mut model, false, 50);
    let c = input(&mut model, true, 100);

    let and_ab = place(&mut model, ComponentKind::And, 100, 25);
    let not_c = place(&mut model, ComponentKind::Not, 100, 100);
    let or_final = place(&mut model, ComponentKind::Or, 200, 62);
    let output = place(&mut model, ComponentKind::Output, 300, 62);

    model.connect(&a, &and_ab).unwrap();
    model.connect(&b, &and_ab).unwrap();
    model.connect(&c, &not_c).unwrap();
    model.connect(&and_ab, &or_final).unwrap();
    model.connect(&not_c, &or_final).unwrap();
    model.connect(&or_final, &output).unwrap();

    assert!(!and_ab.calculate_output());
    assert!(!not_c.calculate_output());
    assert!(!output.calculate_output());

    // Flipping C makes NOT C high.
    c.set_state(false);
    assert!(output.calculate_output());
}

/// Test case: (HIGH AND HIGH) -> NOT -> OUTPUT
#[test]
fn test_and_into_not() {
    let mut model = Model::new();
    let high1 = input(&mut model, true, 0);
    let high2 = input(&mut model, true, 50);
    let and = place(&mut model, ComponentKind::And, 100, 0);
    let not = place(&mut model, ComponentKind::Not, 150, 0);
    let output = place(&mut model, ComponentKind::Output, 200, 0);

    model.connect(&high1, &and).unwrap();
    model.connect(&high2, &and).unwrap();
    model.connect(&and, &not).unwrap();
    model.connect(&not, &output).unwrap();

    assert!(!output.calculate_output());
    assert_eq!(evaluate(&model).unwrap()[&output.id()], false);
}

/// Test: stored sink states only change on refresh
#[test]
fn test_output_states_are_explicitly_refreshed() {
    let mut model = Model::new();
    let a = input(&mut model, true, 0);
    let bulb = place(&mut model, ComponentKind::Bulb, 100, 0);
    model.connect(&a, &bulb).unwrap();

    assert_eq!(model.output_states()[&bulb.id()], false);
    assert!(evaluate(&model).unwrap()[&bulb.id()]);
    assert_eq!(model.output_states()[&bulb.id()], false);

    model.refresh_outputs();
    assert_eq!(model.output_states()[&bulb.id()], true);
}

/// Test: deleting an input detaches it from every downstream gate
#[test]
fn test_cascading_delete() {
    init_tracing();

    let mut model = Model::new();
    let a = input(&mut model, true, 0);
    let b = input(&mut model, true, 50);
    let xor = place(&mut model, ComponentKind::Xor, 100, 0);
    let and = place(&mut model, ComponentKind::And, 100, 50);
    let nand = place(&mut model, ComponentKind::Nand, 100, 100);

    for gate in [&xor, &and] {
        model.connect(&a, gate).unwrap();
        model.connect(&b, gate).unwrap();
    }
    model.connect(&a, &nand).unwrap();
    model.connect(&a, &nand).unwrap();
    assert_eq!(model.wires().len(), 6);

    model.remove_component(&a);

    assert_eq!(model.wires().len(), 2);
    assert!(model.wires().iter().all(|w| w.source() == &b));
    for component in model.components() {
        assert!(!component.has_input(&a));
    }
    assert_eq!(nand.input_count(), 0);
    assert!(nand.can_accept_more_inputs());

    // XOR(b) = true, AND(b) = false with the missing operand low.
    assert!(xor.calculate_output());
    assert!(!and.calculate_output());
}

/// Test: cross-coupled NOR latch cannot be wired through the model
#[test]
fn test_feedback_loop_rejected() {
    let mut model = Model::new();
    let nor1 = place(&mut model, ComponentKind::Nor, 100, 0);
    let nor2 = place(&mut model, ComponentKind::Nor, 100, 100);

    model.connect(&nor1, &nor2).unwrap();
    let err = model.connect(&nor2, &nor1).unwrap_err();
    assert!(matches!(err, ModelError::Connect(_)));
    assert_eq!(model.wires().len(), 1);
    assert_eq!(nor1.input_count(), 0);
}

/// Test: a long inverter chain evaluates under default and permissive limits
#[test]
fn test_deep_inverter_chain() {
    init_tracing();
    for mut model in [Model::new(), Model::with_limits(Limits::permissive())] {
        let mut prev = input(&mut model, true, 0);
        for i in 0..70 {
            let not = place(&mut model, ComponentKind::Not, 50 * (i + 1), 0);
            model.connect(&prev, &not).unwrap();
            prev = not;
        }
        let bulb = place(&mut model, ComponentKind::Bulb, 50 * 72, 0);
        model.connect(&prev, &bulb).unwrap();

        assert!(evaluate(&model).unwrap()[&bulb.id()]);
        assert!(model.refresh_outputs()[&bulb.id()]);
    }
}

/// Test: a wire from an unplaced source leaves the sink unwired
#[test]
fn test_rejected_wire_leaves_no_edge() {
    let mut model = Model::new();
    let bulb = place(&mut model, ComponentKind::Bulb, 100, 0);
    let outside = Component::new(ComponentKind::HighInput, 0, 0);

    let wire = Wire::new(&outside, &bulb).unwrap();
    let err = model.add_wire(wire).unwrap_err();
    assert_eq!(err, ModelError::UnknownComponent(outside.id()));

    assert_eq!(bulb.input_count(), 0);
    assert!(model.wires().is_empty());
    assert!(!model.refresh_outputs()[&bulb.id()]);
}

/// Test: clear empties the model whatever it held
#[test]
fn test_clear() {
    let mut model = Model::new();
    for kind in ComponentKind::ALL {
        place(&mut model, kind, 0, 0);
    }
    assert_eq!(model.len(), ComponentKind::ALL.len());
    assert_eq!(model.output_states().len(), 2);

    model.clear();
    assert!(model.components().is_empty());
    assert!(model.wires().is_empty());
    assert!(model.output_states().is_empty());
}
