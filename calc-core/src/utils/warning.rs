use std::{rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::{markup::prelude::UnknownMacro, solver::prelude::SolveWarning};
use super::{
    diagnostic::{Diagnostic, Label, Level, Location},
    src_span::SrcSpan
};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn pop(&self) -> Option<Warning> {
        let mut warnings = self.write_lock();
        warnings.pop()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

/// Counts what goes through it, so a front end can tell whether anything was reported.
#[derive(Clone)]
pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn reset_count(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Emits warnings about one named input.
pub struct SourceWarningEmitter {
    name: String,
    src: String,
    emitter: WarningEmitter,
}

impl SourceWarningEmitter {
    pub fn new(name: impl Into<String>, src: impl Into<String>, emitter: WarningEmitter) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            emitter,
        }
    }

    pub fn solver(&self, warning: SolveWarning) {
        self.emitter.emit(Warning::Solver {
            name: self.name.clone(),
            src: self.src.clone(),
            warning,
        });
    }

    pub fn markup(&self, unknown: UnknownMacro) {
        self.emitter.emit(Warning::Markup {
            name: self.name.clone(),
            src: self.src.clone(),
            unknown,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Solver {
        name: String,
        src: String,
        warning: SolveWarning
    },
    Markup {
        name: String,
        src: String,
        unknown: UnknownMacro
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Solver { name, src, warning } => match warning {
                SolveWarning::MayNotHaveConverged => Diagnostic {
                    title: "Solution may not have converged".into(),
                    text: "Try another initial guess or raise the iteration limit.".into(),
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        name: name.clone(),
                        label: Label {
                            text: Some("Newton-Raphson ran out of iterations here".into()),
                            span: SrcSpan::from(0, src.len() as u32),
                        },
                        extra_labels: vec![]
                    }),
                }
            },
            Warning::Markup { name, src, unknown } => Diagnostic {
                title: "Unknown markup command".into(),
                text: format!("`\\{}` was read as the name `{}`", unknown.name, unknown.name),
                level: Level::Warning,
                location: Some(Location {
                    src,
                    name: name.clone(),
                    label: Label {
                        text: None,
                        span: unknown.span,
                    },
                    extra_labels: vec![]
                }),
            }
        }
    }
}
