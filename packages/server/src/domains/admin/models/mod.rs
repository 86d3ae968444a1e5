pub mod diagnostics;

pub use diagnostics::DiagnosticTable;
