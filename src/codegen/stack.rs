use super::{CodegenError, Operand, Register, Result};
use crate::ast::Identifier;
use crate::program::PrimitiveType;

/// Bytes one slot moves the recorded offsets by.
pub const WORD_SIZE: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
    SavedFrameBase,
    LocalVariable,
}

/// What the slot was initialized from. Only informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Register(Register),
    Constant(i64),
    Variable(Identifier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSlot {
    pub origin: SlotOrigin,
    pub name: Identifier,
    pub declared_type: Option<PrimitiveType>,
    pub value: SlotValue,
}

/// Length of the stack and start of the enclosing scope when a nested scope
/// was entered.
#[derive(Debug, Clone, Copy)]
pub struct ScopeMark {
    len: usize,
    scope_start: usize,
}

/// Compile time model of one function's runtime stack.
///
/// Slot 0 is the earliest push; the latest slot sits at offset 0.
#[derive(Debug, Default)]
pub struct SimulatedStack {
    slots: Vec<StackSlot>,
    scope_start: usize,
}

impl SimulatedStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[StackSlot] {
        &self.slots
    }

    pub fn push_frame_base(&mut self) {
        self.slots.push(StackSlot {
            origin: SlotOrigin::SavedFrameBase,
            name: Identifier::new(),
            declared_type: None,
            value: SlotValue::Register(Register::BP),
        });
    }

    pub fn push_local(&mut self, name: &str, declared_type: PrimitiveType, value: SlotValue) {
        self.slots.push(StackSlot {
            origin: SlotOrigin::LocalVariable,
            name: name.to_owned(),
            declared_type: Some(declared_type),
            value,
        });
    }

    /// Index of the most recent slot named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().rposition(|slot| {
            slot.origin == SlotOrigin::LocalVariable && slot.name == name
        })
    }

    #[allow(clippy::cast_possible_wrap)]
    pub fn offset_of(&self, index: usize) -> i64 {
        (self.slots.len() - 1 - index) as i64 * WORD_SIZE
    }

    pub fn resolve(&self, name: &str) -> Result<Operand> {
        self.position(name)
            .map(|index| Operand::Stack(self.offset_of(index)))
            .ok_or_else(|| CodegenError::UndefinedVariable(name.to_owned()))
    }

    pub fn is_live(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn declared_in_scope(&self, name: &str) -> bool {
        self.position(name)
            .is_some_and(|index| index >= self.scope_start)
    }

    pub fn local_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.origin == SlotOrigin::LocalVariable)
            .count()
    }

    pub fn has_frame(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.origin == SlotOrigin::SavedFrameBase)
    }

    pub fn enter_scope(&mut self) -> ScopeMark {
        let mark = ScopeMark {
            len: self.slots.len(),
            scope_start: self.scope_start,
        };
        self.scope_start = self.slots.len();
        mark
    }

    /// Drops the slots pushed since `mark` and returns how many there were.
    pub fn leave_scope(&mut self, mark: ScopeMark) -> usize {
        let popped = self.slots.len().saturating_sub(mark.len);
        self.slots.truncate(mark.len);
        self.scope_start = mark.scope_start;
        popped
    }
}
