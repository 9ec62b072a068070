pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns `InvalidConfig` from the enclosing function unless the condition holds.
/// The parameter name and the condition text become the error details.
#[macro_export]
macro_rules! verify_arg {
    ($name:ident, $expr:expr) => {{
        let holds = $expr;
        $crate::result::verify_arg(holds, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(holds: bool, name: &str, condition: &str) -> Result<()> {
    if holds {
        Ok(())
    } else {
        Err(unmet_condition(name, condition))
    }
}

#[cold]
fn unmet_condition(name: &str, condition: &str) -> crate::error::Error {
    crate::error::Error::invalid_config(name, format!("expected {condition}"))
}
