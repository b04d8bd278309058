use std::collections::HashMap;

use inkwell::{
    builder::{Builder, BuilderError},
    context::Context,
    module::Module,
    values::{BasicMetadataValueEnum, FloatValue, FunctionValue, PointerValue},
    AddressSpace
};
use super::variable::Variable;

use crate::{
    compiler::prelude::CodegenError,
    eval::builtins,
    lexer::prelude::Function,
    parser::prelude::{BinaryOp, Expr, UnaryOp}
};

/// Name of the generated `double expr(const double *slots)`.
pub const ENTRY_NAME: &str = "expr";
pub const POW_SHIM: &str = "calc_pow";
pub const CALL_SHIM: &str = "calc_call";

/// `^` in generated code, the same routine the interpreter applies.
pub extern "C" fn calc_pow(base: f64, exponent: f64) -> f64 {
    builtins::pow(base, exponent)
}

/// Builtin dispatch for generated code, indexed by position in [`Function::ALL`].
///
/// # Safety
///
/// `args` must point to `len` initialized doubles.
pub unsafe extern "C" fn calc_call(function: u32, args: *const f64, len: u64) -> f64 {
    let args = std::slice::from_raw_parts(args, len as usize);

    match Function::ALL.get(function as usize) {
        Some(function) => builtins::call(*function, args).unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

fn pow_prototype<'ctx>(ctx: &'ctx Context, module: &Module<'ctx>) -> FunctionValue<'ctx> {
    let f64_type = ctx.f64_type();
    let pow_type = f64_type.fn_type(&[f64_type.into(), f64_type.into()], false);

    module.get_function(POW_SHIM)
        .unwrap_or_else(|| module.add_function(POW_SHIM, pow_type, None))
}

fn call_prototype<'ctx>(ctx: &'ctx Context, module: &Module<'ctx>) -> FunctionValue<'ctx> {
    let call_type = ctx.f64_type().fn_type(
        &[
            ctx.i32_type().into(),
            ctx.ptr_type(AddressSpace::default()).into(),
            ctx.i64_type().into()
        ],
        false
    );

    module.get_function(CALL_SHIM)
        .unwrap_or_else(|| module.add_function(CALL_SHIM, call_type, None))
}

impl From<BuilderError> for CodegenError {
    fn from(err: BuilderError) -> Self {
        CodegenError::Builder(format!("{err:?}"))
    }
}

/// The lowered entry function and the variable each slot is read from.
#[derive(Debug)]
pub struct Lowered<'ctx> {
    pub function: FunctionValue<'ctx>,
    pub slots: Vec<String>,
}

pub struct Codegen<'a, 'ctx> {
    pub context: &'ctx Context,
    pub builder: &'a Builder<'ctx>,
    pub module: &'a Module<'ctx>,
    pub expr: &'a Expr,

    variables: HashMap<String, Variable<'ctx>>,

    // runtime shims
    pow_fn: FunctionValue<'ctx>,
    call_fn: FunctionValue<'ctx>
}

impl<'a, 'ctx> Codegen<'a, 'ctx> {
    fn load_slots(&mut self, slots: PointerValue<'ctx>) -> Result<Vec<String>, CodegenError> {
        let f64_type = self.context.f64_type();
        let names = self.expr.variables()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<String>>();

        for (idx, name) in names.iter().enumerate() {
            let index = self.context.i64_type().const_int(idx as u64, false);

            let pointer = unsafe {
                self.builder.build_in_bounds_gep(f64_type, slots, &[index], &format!("{name}_ptr"))?
            };
            let value = self.builder.build_load(f64_type, pointer, name)?
                .into_float_value();

            self.variables.insert(name.clone(), Variable::new(value));
        }

        Ok(names)
    }

    fn compile_expression(&self, expr: &Expr) -> Result<FloatValue<'ctx>, CodegenError> {
        let f64_type = self.context.f64_type();

        match expr {
            Expr::Number(value) => Ok(f64_type.const_float(*value)),
            Expr::Constant(constant) => Ok(f64_type.const_float(constant.value())),
            Expr::Variable(name) => self.variables.get(name)
                .map(|variable| variable.value)
                .ok_or_else(|| CodegenError::Builder(format!("no slot for `{name}`"))),
            Expr::Binary { op, left, right } => {
                let left = self.compile_expression(left)?;
                let right = self.compile_expression(right)?;

                Ok(match op {
                    BinaryOp::Add => self.builder.build_float_add(left, right, "add")?,
                    BinaryOp::Sub => self.builder.build_float_sub(left, right, "sub")?,
                    BinaryOp::Mul => self.builder.build_float_mul(left, right, "mul")?,
                    BinaryOp::Div => self.builder.build_float_div(left, right, "div")?,
                    BinaryOp::Pow => self.call_shim(self.pow_fn, &[left, right], "pow")?,
                })
            },
            Expr::Unary { op, operand } => {
                let operand = self.compile_expression(operand)?;

                match op {
                    UnaryOp::Neg => Ok(self.builder.build_float_neg(operand, "neg")?)
                }
            },
            Expr::Call { function, args } => self.compile_call(*function, args)
        }
    }

    fn compile_call(&self, function: Function, args: &[Expr]) -> Result<FloatValue<'ctx>, CodegenError> {
        let f64_type = self.context.f64_type();
        let i64_type = self.context.i64_type();

        let index = Function::ALL.iter()
            .position(|candidate| *candidate == function)
            .ok_or_else(|| CodegenError::Builder(format!("`{function}` is not a builtin")))?;

        let values = args.iter()
            .map(|arg| self.compile_expression(arg))
            .collect::<Result<Vec<FloatValue<'ctx>>, CodegenError>>()?;

        // at least one element so the pointer handed to the shim is never dangling
        let capacity = i64_type.const_int(values.len().max(1) as u64, false);
        let buffer = self.builder.build_array_alloca(f64_type, capacity, "args")?;

        for (idx, value) in values.iter().enumerate() {
            let offset = i64_type.const_int(idx as u64, false);
            let pointer = unsafe {
                self.builder.build_in_bounds_gep(f64_type, buffer, &[offset], "arg_ptr")?
            };

            self.builder.build_store(pointer, *value)?;
        }

        let call = self.builder.build_call(
            self.call_fn,
            &[
                self.context.i32_type().const_int(index as u64, false).into(),
                buffer.into(),
                i64_type.const_int(values.len() as u64, false).into()
            ],
            function.name()
        )?;

        call.try_as_basic_value()
            .left()
            .map(|value| value.into_float_value())
            .ok_or_else(|| CodegenError::Builder(format!("`{function}` returned no value")))
    }

    fn call_shim(
        &self,
        shim: FunctionValue<'ctx>,
        args: &[FloatValue<'ctx>],
        name: &str
    ) -> Result<FloatValue<'ctx>, CodegenError> {
        let args = args.iter()
            .map(|arg| (*arg).into())
            .collect::<Vec<BasicMetadataValueEnum<'ctx>>>();

        let call = self.builder.build_call(shim, &args, name)?;

        call.try_as_basic_value()
            .left()
            .map(|value| value.into_float_value())
            .ok_or_else(|| CodegenError::Builder(format!("`{name}` returned no value")))
    }

    fn compile_function(&mut self) -> Result<Lowered<'ctx>, CodegenError> {
        let f64_type = self.context.f64_type();
        let fn_type = f64_type.fn_type(&[self.context.ptr_type(AddressSpace::default()).into()], false);
        let function = self.module.add_function(ENTRY_NAME, fn_type, None);

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);

        let slots = function.get_nth_param(0)
            .ok_or_else(|| CodegenError::InvalidFunction(ENTRY_NAME.to_string()))?
            .into_pointer_value();
        slots.set_name("slots");

        let names = self.load_slots(slots)?;
        let value = self.compile_expression(self.expr)?;

        self.builder.build_return(Some(&value))?;

        if function.verify(true) {
            Ok(Lowered { function, slots: names })
        } else {
            unsafe { function.delete(); }
            Err(CodegenError::InvalidFunction(ENTRY_NAME.to_string()))
        }
    }

    pub fn compile(
        context: &'ctx Context,
        builder: &'a Builder<'ctx>,
        module: &'a Module<'ctx>,
        expr: &'a Expr,
    ) -> Result<Lowered<'ctx>, CodegenError> {
        let pow_fn = pow_prototype(context, module);
        let call_fn = call_prototype(context, module);

        let mut codegen = Codegen {
            context,
            builder,
            module,
            expr,
            variables: HashMap::new(),
            pow_fn,
            call_fn
        };

        codegen.compile_function()
    }
}

/// Textual LLVM IR of the function generated for `expr`.
pub fn emit_ir(expr: &Expr) -> Result<String, CodegenError> {
    let context = Context::create();
    let builder = context.create_builder();
    let module = context.create_module("calc");

    let _lowered = Codegen::compile(&context, &builder, &module, expr)?;

    Ok(module.print_to_string().to_string())
}
