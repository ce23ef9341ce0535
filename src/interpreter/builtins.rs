use crate::interpreter::evaluator::Evaluation;

/// Type alias for builtin function handlers.
///
/// A builtin receives its evaluated arguments, already checked for arity, and
/// returns the raw result. A `NaN` result is folded to an invalid evaluation
/// by the dispatcher, so builtins never need to guard their own domain.
type BuiltinFn = fn(&[f64]) -> f64;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the exact argument count,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_NAMES` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every builtin function, for callers that highlight or
        /// complete them.
        pub const BUILTIN_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "pow"   => { arity: 2, func: |args| args[0].powf(args[1]) },
    "sqrt"  => { arity: 1, func: |args| args[0].sqrt() },
    "abs"   => { arity: 1, func: |args| args[0].abs() },
    "floor" => { arity: 1, func: |args| args[0].floor() },
    "ceil"  => { arity: 1, func: |args| args[0].ceil() },
    "round" => { arity: 1, func: |args| args[0].round() },
    "trunc" => { arity: 1, func: |args| args[0].trunc() },
    "sin"   => { arity: 1, func: |args| args[0].sin() },
    "cos"   => { arity: 1, func: |args| args[0].cos() },
    "tan"   => { arity: 1, func: |args| args[0].tan() },
    "ln"    => { arity: 1, func: |args| args[0].ln() },
    "log"   => { arity: 1, func: |args| args[0].log10() },
    "exp"   => { arity: 1, func: |args| args[0].exp() },
    "min"   => { arity: 2, func: |args| args[0].min(args[1]) },
    "max"   => { arity: 2, func: |args| args[0].max(args[1]) },
}

/// Calls the builtin named `name` with the given arguments.
///
/// Lookup is a linear scan over the static table, first match wins. An
/// unknown name or an argument count that does not match the builtin's arity
/// yields an invalid evaluation, as does a `NaN` result (for example
/// `sqrt(-1)`).
pub(crate) fn dispatch(name: &str, arguments: &[f64]) -> Evaluation {
    match BUILTIN_TABLE.iter().find(|builtin| builtin.name == name) {
        Some(builtin) if builtin.arity == arguments.len() => {
            Evaluation::of((builtin.func)(arguments))
        },
        _ => Evaluation::INVALID,
    }
}
