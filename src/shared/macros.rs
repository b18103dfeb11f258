/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` at the binary boundary, logging the error with the
/// given context and exiting with status 1 on failure.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        $crate::unwrap_or_exit!($expr, "fatal")
    };
    ($expr:expr, $context:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("{}: {}", $context, e);
                std::process::exit(1);
            }
        }
    };
}
