//! Component type registry.
//!
//! This module defines the closed, finite set of component kinds that can be
//! placed on a circuit board, together with their static metadata: fan-in
//! limit, evaluation rule and display attributes. The table is constant; there
//! is no way to register new kinds at runtime.

use std::fmt;

/// Broad role of a component kind within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindClass {
    /// Fixed-value input source.
    Source,
    /// Display element reporting a single upstream value.
    Sink,
    /// Combinational logic gate.
    Gate,
}

/// Component kind - closed, finite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    // === Sources ===
    /// Constant high input.
    HighInput,
    /// Constant low input.
    LowInput,

    // === Sinks ===
    /// Output pin.
    Output,
    /// Light bulb indicator.
    Bulb,

    // === Gates ===
    /// Logical NOT: ¬A
    Not,
    /// Logical AND: A ∧ B
    And,
    /// Logical OR: A ∨ B
    Or,
    /// Logical NAND: ¬(A ∧ B)
    Nand,
    /// Logical NOR: ¬(A ∨ B)
    Nor,
    /// Logical XOR: A ⊕ B
    Xor,
}

impl ComponentKind {
    /// Every kind, in palette order.
    pub const ALL: [ComponentKind; 10] = [
        ComponentKind::HighInput,
        ComponentKind::LowInput,
        ComponentKind::Output,
        ComponentKind::Bulb,
        ComponentKind::Not,
        ComponentKind::And,
        ComponentKind::Or,
        ComponentKind::Nand,
        ComponentKind::Nor,
        ComponentKind::Xor,
    ];

    /// Classify this kind as source, sink or gate.
    pub const fn class(self) -> KindClass {
        match self {
            ComponentKind::HighInput | ComponentKind::LowInput => KindClass::Source,
            ComponentKind::Output | ComponentKind::Bulb => KindClass::Sink,
            _ => KindClass::Gate,
        }
    }

    /// Check if this is a fixed-value source kind.
    pub const fn is_source(self) -> bool {
        matches!(self.class(), KindClass::Source)
    }

    /// Check if this is a display sink kind.
    pub const fn is_sink(self) -> bool {
        matches!(self.class(), KindClass::Sink)
    }

    /// Check if this is a logic gate kind.
    pub const fn is_gate(self) -> bool {
        matches!(self.class(), KindClass::Gate)
    }

    /// Maximum number of inputs a component of this kind accepts.
    pub const fn max_inputs(self) -> usize {
        match self {
            ComponentKind::HighInput | ComponentKind::LowInput => 0,
            ComponentKind::Output | ComponentKind::Bulb | ComponentKind::Not => 1,
            ComponentKind::And
            | ComponentKind::Or
            | ComponentKind::Nand
            | ComponentKind::Nor
            | ComponentKind::Xor => 2,
        }
    }

    /// The fixed value of a source kind, `None` for everything else.
    pub const fn fixed_state(self) -> Option<bool> {
        match self {
            ComponentKind::HighInput => Some(true),
            ComponentKind::LowInput => Some(false),
            _ => None,
        }
    }

    /// State a freshly placed component of this kind starts with.
    pub const fn initial_state(self) -> bool {
        match self.fixed_state() {
            Some(state) => state,
            None => false,
        }
    }

    /// Convert to GateOp if this is a gate kind.
    pub const fn gate_op(self) -> Option<GateOp> {
        match self {
            ComponentKind::Not => Some(GateOp::Not),
            ComponentKind::And => Some(GateOp::And),
            ComponentKind::Or => Some(GateOp::Or),
            ComponentKind::Nand => Some(GateOp::Nand),
            ComponentKind::Nor => Some(GateOp::Nor),
            ComponentKind::Xor => Some(GateOp::Xor),
            _ => None,
        }
    }

    /// Apply this kind's evaluation rule to already-computed input values.
    ///
    /// Missing operands read as `false`, so partially wired gates and
    /// unconnected sinks still produce a value. Source kinds ignore `inputs`
    /// and return their fixed value.
    pub fn apply(self, inputs: &[bool]) -> bool {
        let operand = |i: usize| inputs.get(i).copied().unwrap_or(false);
        match self {
            ComponentKind::HighInput | ComponentKind::LowInput => self.initial_state(),
            ComponentKind::Output | ComponentKind::Bulb => operand(0),
            ComponentKind::Not => GateOp::Not.eval(operand(0), false),
            ComponentKind::And => GateOp::And.eval(operand(0), operand(1)),
            ComponentKind::Or => GateOp::Or.eval(operand(0), operand(1)),
            ComponentKind::Nand => GateOp::Nand.eval(operand(0), operand(1)),
            ComponentKind::Nor => GateOp::Nor.eval(operand(0), operand(1)),
            ComponentKind::Xor => GateOp::Xor.eval(operand(0), operand(1)),
        }
    }

    /// Short label drawn on the component body.
    pub const fn label(self) -> &'static str {
        match self {
            ComponentKind::HighInput => "HIGH",
            ComponentKind::LowInput => "LOW",
            ComponentKind::Output => "OUT",
            ComponentKind::Bulb => "BULB",
            ComponentKind::Not => "NOT",
            ComponentKind::And => "AND",
            ComponentKind::Or => "OR",
            ComponentKind::Nand => "NAND",
            ComponentKind::Nor => "NOR",
            ComponentKind::Xor => "XOR",
        }
    }

    /// Fill color used when rendering the component.
    pub const fn color(self) -> Rgb {
        match self {
            ComponentKind::HighInput => Rgb::new(0x2e, 0xcc, 0x71),
            ComponentKind::LowInput => Rgb::new(0xe7, 0x4c, 0x3c),
            ComponentKind::Output => Rgb::new(0x34, 0x98, 0xdb),
            ComponentKind::Bulb => Rgb::new(0xf1, 0xc4, 0x0f),
            ComponentKind::Not => Rgb::new(0x9b, 0x59, 0xb6),
            ComponentKind::And | ComponentKind::Nand => Rgb::new(0x95, 0xa5, 0xa6),
            ComponentKind::Or | ComponentKind::Nor => Rgb::new(0x7f, 0x8c, 0x8d),
            ComponentKind::Xor => Rgb::new(0xe6, 0x7e, 0x22),
        }
    }

    /// On-canvas footprint of the component body.
    pub const fn size(self) -> Size {
        match self.class() {
            KindClass::Source | KindClass::Sink => Size::new(40, 40),
            KindClass::Gate => Size::new(60, 40),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boolean operator carried by a gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateOp {
    /// Logical NOT: ¬A (second operand ignored)
    Not,
    /// Logical AND: A ∧ B
    And,
    /// Logical OR: A ∨ B
    Or,
    /// Logical NAND: ¬(A ∧ B)
    Nand,
    /// Logical NOR: ¬(A ∨ B)
    Nor,
    /// Logical XOR: A ⊕ B
    Xor,
}

impl GateOp {
    /// Evaluate this operation on two boolean values.
    #[inline]
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateOp::Not => !a,
            GateOp::And => a && b,
            GateOp::Or => a || b,
            GateOp::Nand => !(a && b),
            GateOp::Nor => !(a || b),
            GateOp::Xor => a ^ b,
        }
    }
}

/// 24-bit display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Width and height of a component body, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
