use inkwell::values::FloatValue;

/// A variable loaded from its slot of the argument array.
#[derive(Debug, Clone)]
pub struct Variable<'ctx> {
    pub value: FloatValue<'ctx>
}

impl<'ctx> Variable<'ctx> {
    pub fn new(value: FloatValue<'ctx>) -> Self {
        Self {
            value
        }
    }
}
