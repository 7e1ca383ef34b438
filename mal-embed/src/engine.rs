// mal-embed - Engine implementation
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The Engine struct - main entry point for embedding mal.

use std::fs;
use std::path::Path;

use mal_core::{
    Env, Error, Result, Symbol, apply, eval, get_max_eval_depth, init_prelude, make_native_fn,
    register_builtins, set_max_eval_depth,
};
use mal_parser::{MalVal, Parser, pr_str};
use tracing::debug;

use crate::convert::{FromMalVal, IntoMalVal};

/// The mal scripting engine.
///
/// An `Engine` owns one root environment. Definitions made through one
/// engine are never visible through another.
///
/// # Thread Safety
///
/// **`Engine` is NOT thread-safe.** Values use `Rc` and `RefCell`, and
/// symbols are interned per thread. Create one engine per thread if you
/// need concurrent evaluation.
///
/// # Example
///
/// ```rust
/// use mal_embed::Engine;
///
/// let engine = Engine::new().unwrap();
/// let result = engine.eval("(+ 1 2 3)").unwrap();
/// assert_eq!(result.to_string(), "6");
/// ```
pub struct Engine {
    env: Env,
    max_depth: usize,
}

/// Installs an engine's depth limit on the current thread for the duration
/// of one call, restoring the previous limit on drop.
struct DepthScope {
    previous: usize,
}

impl DepthScope {
    fn enter(depth: usize) -> Self {
        DepthScope {
            previous: set_max_eval_depth(depth),
        }
    }
}

impl Drop for DepthScope {
    fn drop(&mut self) {
        set_max_eval_depth(self.previous);
    }
}

impl Engine {
    /// Create a new Engine with the builtins and the prelude loaded.
    pub fn new() -> Result<Self> {
        let engine = Engine::new_bare();
        init_prelude(&engine.env)?;
        Ok(engine)
    }

    /// Create a new Engine with the native builtins only.
    ///
    /// Functions defined by the prelude (`not`, `load-file`) are absent.
    pub fn new_bare() -> Self {
        let env = Env::new();
        register_builtins(&env);
        Engine {
            env,
            max_depth: get_max_eval_depth(),
        }
    }

    /// Set the maximum non-tail recursion depth for this engine's
    /// evaluations. Returns the previous value.
    ///
    /// Starts at the thread's limit when the engine is created. Other
    /// engines are unaffected.
    pub fn set_max_depth(&mut self, depth: usize) -> usize {
        std::mem::replace(&mut self.max_depth, depth)
    }

    /// The maximum non-tail recursion depth for this engine.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate a string of mal code.
    ///
    /// Every form is evaluated in order; the result of the last one is
    /// returned, or `nil` if there are none.
    ///
    /// # Errors
    ///
    /// Returns the first read or evaluation error. Forms before the failing
    /// one have already taken effect.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mal_embed::Engine;
    ///
    /// let engine = Engine::new().unwrap();
    /// let result = engine.eval("(def! x 42) (* x 2)").unwrap();
    /// assert_eq!(result.to_string(), "84");
    /// ```
    pub fn eval(&self, code: &str) -> Result<MalVal> {
        let _depth = DepthScope::enter(self.max_depth);
        let mut parser = Parser::new(code)?;
        let mut result = MalVal::Nil;
        while let Some(expr) = parser.parse()? {
            result = eval(&expr, &self.env)?;
        }
        Ok(result)
    }

    /// Evaluate a file of mal code, returning the last result.
    pub fn eval_file(&self, path: impl AsRef<Path>) -> Result<MalVal> {
        let path = path.as_ref();
        debug!(path = %path.display(), "eval_file");
        let code = fs::read_to_string(path)
            .map_err(|e| Error::io("eval_file", Some(path.display().to_string()), e))?;
        self.eval(&code)
    }

    /// Read, evaluate and print.
    ///
    /// Returns the readable form of the result, or the error message
    /// prefixed with `Error: `. Blank input prints as the empty string.
    ///
    /// ```rust
    /// use mal_embed::Engine;
    ///
    /// let engine = Engine::new().unwrap();
    /// assert_eq!(engine.rep("(list 1 \"a\")"), "(1 \"a\")");
    /// assert_eq!(engine.rep("(nope)"), "Error: 'nope' not found");
    /// ```
    pub fn rep(&self, line: &str) -> String {
        if line.trim().is_empty() {
            return String::new();
        }
        match self.eval(line) {
            Ok(val) => pr_str(&val, true),
            Err(e) => format!("Error: {}", e),
        }
    }

    /// Look up a value in the root environment.
    ///
    /// Returns `None` if the symbol is not bound.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MalVal> {
        self.env.get(&Symbol::new(name)).ok()
    }

    /// Look up a value and convert it.
    ///
    /// Returns `None` if the symbol is not bound or cannot be converted.
    #[must_use]
    pub fn get_as<T: FromMalVal>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| T::from_mal_val(&v).ok())
    }

    /// Look up a value and convert it, reporting conversion failures.
    ///
    /// An unbound symbol is `Ok(None)`; a value of the wrong type is an
    /// error.
    ///
    /// ```rust
    /// use mal_embed::Engine;
    ///
    /// let engine = Engine::new().unwrap();
    /// engine.eval("(def! x \"hello\")").unwrap();
    ///
    /// let missing: Result<Option<i64>, _> = engine.try_get_as("y");
    /// assert!(missing.unwrap().is_none());
    ///
    /// let wrong_type: Result<Option<i64>, _> = engine.try_get_as("x");
    /// assert!(wrong_type.is_err());
    /// ```
    pub fn try_get_as<T: FromMalVal>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            Some(v) => T::from_mal_val(&v).map(Some),
            None => Ok(None),
        }
    }

    /// Bind a value in the root environment.
    pub fn set(&self, name: &str, value: impl IntoMalVal) {
        self.env.bind(Symbol::new(name), value.into_mal_val());
    }

    /// Call a function by name with arguments.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mal_embed::{Engine, MalVal};
    ///
    /// let engine = Engine::new().unwrap();
    /// let result = engine.call("+", &[MalVal::int(1), MalVal::int(2)]).unwrap();
    /// assert_eq!(result, MalVal::int(3));
    /// ```
    pub fn call(&self, name: &str, args: &[MalVal]) -> Result<MalVal> {
        let sym = Symbol::new(name);
        let func = self.env.get(&sym)?;
        let _depth = DepthScope::enter(self.max_depth);
        apply(&func, args)
    }

    /// Register a native Rust function in the root environment.
    ///
    /// ```rust
    /// use mal_embed::{Engine, MalVal};
    ///
    /// let engine = Engine::new().unwrap();
    /// engine.register_native("greet", |args| {
    ///     let name = match args.first() {
    ///         Some(MalVal::Str(s)) => s.as_ref(),
    ///         _ => "World",
    ///     };
    ///     Ok(MalVal::string(format!("Hello, {}!", name)))
    /// });
    /// assert_eq!(engine.rep("(greet \"mal\")"), "\"Hello, mal!\"");
    /// ```
    pub fn register_native(
        &self,
        name: &'static str,
        func: impl Fn(&[MalVal]) -> Result<MalVal> + 'static,
    ) {
        let native_fn = make_native_fn(name, func);
        self.env.bind(Symbol::new(name), MalVal::NativeFn(native_fn));
    }

    /// Get access to the underlying root environment.
    #[must_use]
    pub fn env(&self) -> &Env {
        &self.env
    }
}
