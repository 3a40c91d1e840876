// Without the `tracing` feature every call expands to nothing and its arguments are not evaluated.
#[cfg(feature = "tracing")]
macro_rules! adapter_log {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "scroll_pager_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! adapter_log {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! atrace {
    ($($tt:tt)*) => {
        adapter_log!(trace, $($tt)*)
    };
}

macro_rules! adebug {
    ($($tt:tt)*) => {
        adapter_log!(debug, $($tt)*)
    };
}

macro_rules! awarn {
    ($($tt:tt)*) => {
        adapter_log!(warn, $($tt)*)
    };
}
