pub mod core;
pub mod math;

use crate::{evaluator::EvalResult, native::registry::Registry};

/// Install every shipped builtin into `reg`.
pub fn install(reg: &mut Registry) -> EvalResult<()> {
    reg.register_all(self::core::CORE_FNS)?;
    reg.register_all(self::math::MATH_FNS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_tables_have_no_collisions() {
        let mut reg = Registry::new();
        install(&mut reg).unwrap();
        let total =
            crate::builtins::core::CORE_FNS.len() + crate::builtins::math::MATH_FNS.len();
        assert_eq!(reg.len(), total);
    }

    #[test]
    fn every_shipped_builtin_is_resolvable() {
        let mut reg = Registry::new();
        install(&mut reg).unwrap();
        for name in [
            "set", "print", "repeat", "scope", "inc", "dec", "add", "sub", "mul", "div", "mod",
            "sqrt", "isprime",
        ] {
            assert!(reg.get(name).is_some(), "missing builtin {}", name);
        }
    }
}
