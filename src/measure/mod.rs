mod clock;
pub mod collector;
pub mod format;

use self::clock::{Clock, MonotonicClock};
use self::collector::{Collector, Suspended};
use self::format::MessageFormat;
use crate::util::DurationDisplay;
use std::borrow::Cow;
use std::io::{self, Write};

const DISABLING_NOTICE: &str = "Disabling garbage collection...";
const ENABLING_NOTICE: &str = "Re-enabling garbage collection...";

/// How a measured call is reported. Fixed when the wrapper is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub message_format: MessageFormat,

    /// Suspend the process collector for the duration of the call.
    pub disable_gc: bool,
}

/// Times calls and prints how long they took to standard output.
///
/// ```
/// use ntropy::{Measure, MessageFormat};
///
/// let sum = Measure::new()
///     .message_format(MessageFormat::Complete)
///     .disable_gc(true)
///     .run("sum", || (1..=100u32).sum::<u32>());
/// assert_eq!(sum, 5050);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Measure {
    options: Options,
}

impl Measure {
    pub fn new() -> Measure {
        Measure::default()
    }

    pub fn with_options(options: Options) -> Measure {
        Measure { options }
    }

    pub fn message_format(mut self, message_format: MessageFormat) -> Measure {
        self.options.message_format = message_format;
        self
    }

    pub fn disable_gc(mut self, disable_gc: bool) -> Measure {
        self.options.disable_gc = disable_gc;
        self
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Calls `f` once and reports how long it took under `name`.
    ///
    /// The report is written even if `f` panics, in which case the panic
    /// continues unwinding afterwards.
    pub fn run<F, R>(&self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.run_with(
            name,
            &MonotonicClock,
            collector::current(),
            io::stdout(),
            f,
        )
    }

    fn run_with<F, R, O>(
        &self,
        name: &str,
        clock: &dyn Clock,
        collector: &dyn Collector,
        out: O,
        f: F,
    ) -> R
    where
        F: FnOnce() -> R,
        O: Write,
    {
        let stopwatch = Stopwatch::start(name, self.options, clock, collector, out);
        let result = f();
        drop(stopwatch);
        result
    }

    /// Builds a reusable wrapper around `func`. `name` is used in every
    /// report the wrapper prints.
    pub fn wrap<N, F>(self, name: N, func: F) -> Measured<F>
    where
        N: Into<Cow<'static, str>>,
    {
        Measured {
            measure: self,
            name: name.into(),
            func,
        }
    }
}

/// A function wrapped by [`Measure::wrap`].
#[derive(Clone)]
pub struct Measured<F> {
    measure: Measure,
    name: Cow<'static, str>,
    func: F,
}

impl<F> Measured<F> {
    /// Calls the wrapped function with `args`, given as a tuple, and returns
    /// exactly what it returns.
    pub fn call<Args>(&mut self, args: Args) -> <F as Invoke<Args>>::Output
    where
        F: Invoke<Args>,
    {
        let func = &mut self.func;
        self.measure.run(&self.name, move || func.invoke(args))
    }

    pub fn name(&self) -> &str {
        &*self.name
    }

    pub fn options(&self) -> Options {
        self.measure.options
    }

    pub fn into_inner(self) -> F {
        self.func
    }
}

/// The last segment of a function path as written by `stringify!`, which
/// is the name a function was declared with.
#[doc(hidden)]
pub fn declared_name(path: &'static str) -> &'static str {
    path.rsplit("::").next().unwrap_or(path).trim()
}

/// Calls a function with its arguments packed into a tuple.
pub trait Invoke<Args> {
    type Output;

    fn invoke(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($Arg:ident $arg:ident),*) => {
        impl<Func, Out, $($Arg),*> Invoke<($($Arg,)*)> for Func
        where
            Func: FnMut($($Arg),*) -> Out,
        {
            type Output = Out;

            #[inline]
            fn invoke(&mut self, ($($arg,)*): ($($Arg,)*)) -> Out {
                self($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A a);
impl_invoke!(A a, B b);
impl_invoke!(A a, B b, C c);
impl_invoke!(A a, B b, C c, D d);
impl_invoke!(A a, B b, C c, D d, E e);
impl_invoke!(A a, B b, C c, D d, E e, G g);
impl_invoke!(A a, B b, C c, D d, E e, G g, H h);
impl_invoke!(A a, B b, C c, D d, E e, G g, H h, I i);

/// Reports a single call when dropped, so the report is also written while
/// unwinding.
struct Stopwatch<'a, O: Write> {
    name: &'a str,
    format: MessageFormat,
    clock: &'a dyn Clock,
    suspended: Option<Suspended<'a>>,
    out: O,
    start: u128,
}

impl<'a, O: Write> Stopwatch<'a, O> {
    fn start(
        name: &'a str,
        options: Options,
        clock: &'a dyn Clock,
        collector: &'a dyn Collector,
        mut out: O,
    ) -> Stopwatch<'a, O> {
        let suspended = if options.disable_gc {
            write_block(&mut out, DISABLING_NOTICE);
            Some(Suspended::new(collector))
        } else {
            None
        };

        Stopwatch {
            name,
            format: options.message_format,
            clock,
            suspended,
            out,
            start: clock.now(),
        }
    }
}

impl<O: Write> Drop for Stopwatch<'_, O> {
    fn drop(&mut self) {
        let elapsed = self.clock.now().saturating_sub(self.start);

        log::debug!(
            "measured `{}` in {}",
            self.name,
            DurationDisplay::from_nanos(elapsed)
        );
        let message = format::render(self.format, self.name, elapsed);
        write_block(&mut self.out, &message);

        if let Some(suspended) = self.suspended.take() {
            drop(suspended);
            write_block(&mut self.out, ENABLING_NOTICE);
        }
    }
}

/// Writes `text` followed by a blank line.
fn write_block<O: Write>(out: &mut O, text: &str) {
    let result = write!(out, "{}\n\n", text).and_then(|_| out.flush());
    if let Err(err) = result {
        log::warn!("failed to write measurement output: {}", err);
    }
}
