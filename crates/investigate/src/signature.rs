//! crates/investigate/src/signature.rs
//! Captured call signatures and return values, formatted for call logs.

use std::any::type_name;

use emphasis::Style;
use formatting::{
    FormatOptions, Inspect, RETURN_VALUE_CAP, bare_type_name, format_value, pformat, truncate,
};

use crate::args::Arg;

/// Name and argument values of one call.
#[derive(Clone, Debug, PartialEq)]
pub struct CallSig {
    module: String,
    name: String,
    args: Vec<(String, Arg)>,
}

impl CallSig {
    /// Signature of `name` in `module` with no arguments yet.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg<T: Inspect + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.args.push((name.into(), Arg::new(value)));
        self
    }

    /// Function name as written at the call site.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name prefixed with the last segment of its module, unless the name
    /// is already a path such as `Type::method`.
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.name.contains("::") {
            return self.name.clone();
        }
        match self.module.rsplit("::").next().filter(|m| !m.is_empty()) {
            Some(module) => format!("{module}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Argument names and values, in call order.
    #[must_use]
    pub fn args(&self) -> &[(String, Arg)] {
        &self.args
    }

    /// Looks an argument up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.args
            .iter()
            .find_map(|(arg_name, arg)| (arg_name == name).then_some(arg))
    }
}

/// Captures a [`CallSig`] for the named function and arguments.
///
/// Accepts `name(args..)` and `Type::name(args..)`; every argument must be a
/// variable in scope.
///
/// ```
/// use investigate::call_sig;
///
/// fn connect(host: &str, port: u16) {
///     let sig = call_sig!(connect(host, port));
///     assert_eq!(sig.name(), "connect");
///     assert_eq!(sig.args().len(), 2);
/// }
/// connect("db", 5432);
/// ```
#[macro_export]
macro_rules! call_sig {
    ($owner:ident :: $name:ident ( $($arg:ident),* $(,)? )) => {
        $crate::CallSig::new(module_path!(), concat!(stringify!($owner), "::", stringify!($name)))
            $(.arg(stringify!($arg), &$arg))*
    };
    ($name:ident ( $($arg:ident),* $(,)? )) => {
        $crate::CallSig::new(module_path!(), stringify!($name))
            $(.arg(stringify!($arg), &$arg))*
    };
}

/// `name=value` pairs joined with `", "`, each value followed by its type
/// when `options` enables types. Empty when the call has no arguments.
#[must_use]
pub fn pretty_sig(sig: &CallSig, options: &FormatOptions) -> String {
    sig.args
        .iter()
        .map(|(name, arg)| {
            let value = format_value(arg.value(), Some(arg.type_name()), options);
            format!("{name}={value}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a return value, capped at [`RETURN_VALUE_CAP`] characters.
///
/// The type is appended only when `options` enables types and the value
/// was not truncated.
#[must_use]
pub fn pretty_retval<T: Inspect + ?Sized>(value: &T, options: &FormatOptions) -> String {
    let pretty = pformat(value, &options.types(false));
    if pretty.chars().count() > RETURN_VALUE_CAP {
        return truncate(&pretty, RETURN_VALUE_CAP);
    }
    if !options.show_types() {
        return pretty;
    }
    let annotation = options.painter().paint(
        &format!("({})", bare_type_name(type_name::<T>())),
        Style::Dim,
    );
    format!("{pretty} {annotation}")
}
