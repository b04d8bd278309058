use inkwell::{
    context::Context,
    execution_engine::{ExecutionEngine, JitFunction},
    module::Module,
    targets::{InitializationConfig, Target},
    OptimizationLevel
};

use crate::{
    compiler::prelude::{CodegenError, Evaluate, Strategy},
    environment::prelude::Variables,
    eval::prelude::EvalError,
    parser::prelude::Expr
};
use super::codegen::{calc_call, calc_pow, Codegen, CALL_SHIM, ENTRY_NAME, POW_SHIM};

type JitFn = unsafe extern "C" fn(*const f64) -> f64;

thread_local! {
    // every jitted module on this thread lives in one context for the life of the thread
    static CONTEXT: &'static Context = Box::leak(Box::new(Context::create()));
}

fn map_shims(engine: &ExecutionEngine<'static>, module: &Module<'static>) {
    if let Some(pow_fn) = module.get_function(POW_SHIM) {
        engine.add_global_mapping(&pow_fn, calc_pow as usize);
    }

    if let Some(call_fn) = module.get_function(CALL_SHIM) {
        engine.add_global_mapping(&call_fn, calc_call as usize);
    }
}

/// Natively compiled strategy.
pub struct Jit {
    slots: Vec<String>,
    function: JitFunction<'static, JitFn>,
}

impl Jit {
    pub fn compile(expr: &Expr) -> Result<Self, CodegenError> {
        Target::initialize_native(&InitializationConfig::default())
            .map_err(CodegenError::Target)?;

        let context = CONTEXT.with(|context| *context);
        let module = context.create_module("calc_jit");
        let builder = context.create_builder();

        let lowered = Codegen::compile(context, &builder, &module, expr)?;

        let engine = module.create_jit_execution_engine(OptimizationLevel::Default)
            .map_err(|err| CodegenError::Engine(err.to_string()))?;

        map_shims(&engine, &module);

        let function = unsafe { engine.get_function::<JitFn>(ENTRY_NAME) }
            .map_err(|err| CodegenError::Lookup(format!("{err:?}")))?;

        Ok(Self {
            slots: lowered.slots,
            function,
        })
    }

    /// Variables in the order the generated function reads them.
    pub fn slots(&self) -> &[String] {
        &self.slots
    }
}

impl Evaluate for Jit {
    fn evaluate(&self, variables: &Variables) -> Result<f64, EvalError> {
        // the first missing slot is the first variable the interpreter would hit
        let values = self.slots.iter()
            .map(|name| variables.get(name)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }))
            .collect::<Result<Vec<f64>, EvalError>>()?;

        Ok(unsafe { self.function.call(values.as_ptr()) })
    }

    fn strategy(&self) -> Strategy {
        Strategy::Jit
    }
}
