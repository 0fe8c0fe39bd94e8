#[macro_export]
macro_rules! expect {
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(t) => t,
            Err(why) => {
                panic!("{}: {:?}", $msg, why);
            }
        }
    };
}

// Thin wrappers over the log facade so call sites stay grep-friendly and the
// backend can be swapped in one place

#[macro_export]
macro_rules! kajo_trace {
    ($($args:tt)*) => {
        log::trace!($($args)*)
    };
}

#[macro_export]
macro_rules! kajo_debug {
    ($($args:tt)*) => {
        log::debug!($($args)*)
    };
}

#[macro_export]
macro_rules! kajo_info {
    ($($args:tt)*) => {
        log::info!($($args)*)
    };
}

#[macro_export]
macro_rules! kajo_warn {
    ($($args:tt)*) => {
        log::warn!($($args)*)
    };
}

#[macro_export]
macro_rules! kajo_error {
    ($($args:tt)*) => {
        log::error!($($args)*)
    };
}
