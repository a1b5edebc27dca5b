//! # Logging Module
//!
//! Console verbosity for headercheck. Two channels exist side by side:
//!
//! - the `tracing` subscriber installed by [`init_tracing`], which library code
//!   uses for diagnostics (`warn!` on unreadable files, `debug!` on probes)
//! - the [`verbose_log!`](crate::verbose_log) and `info_log!` macros, which
//!   print user-facing progress lines and follow the `-v`/`-q` switches
//!
//! Check results own stdout; verbose progress goes to stderr so a quiet run
//! can be piped straight into another tool.
//!
//! ```rust
//! use headercheck::logging::{ColorMode, set_verbose};
//! use headercheck::verbose_log;
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Read {} candidates from {}", 3, "changed_files.txt");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Prints to stderr when `-v` was given.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints a highlighted hint to stdout unless `-q` was given.
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            let message = format!($($arg)*);
            println!(
                "{}",
                ::owo_colors::OwoColorize::if_supports_color(&message, ::owo_colors::Stream::Stdout, |m| {
                    ::owo_colors::OwoColorize::yellow(m)
                })
            );
        }
    };
}

pub(crate) use info_log;
