// Without the `tracing` feature every call expands to nothing and its arguments are not evaluated.
#[cfg(feature = "tracing")]
macro_rules! pager_log {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "scroll_pager", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pager_log {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! ptrace {
    ($($tt:tt)*) => {
        pager_log!(trace, $($tt)*)
    };
}

macro_rules! pdebug {
    ($($tt:tt)*) => {
        pager_log!(debug, $($tt)*)
    };
}

macro_rules! pwarn {
    ($($tt:tt)*) => {
        pager_log!(warn, $($tt)*)
    };
}
