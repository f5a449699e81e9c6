//! Integer node library used by the CLI and the demos.

pub mod add;
pub mod constant;
pub mod double;
pub mod print;
pub mod sum;

pub use add::Add;
pub use constant::Constant;
pub use double::Double;
pub use print::Print;
pub use sum::Sum;

use crate::registry::Registry;

pub fn register_builtin(registry: &mut Registry) {
    registry.register_node::<Constant>();
    registry.register_node::<Double>();
    registry.register_node::<Sum>();
    registry.register_node::<Add>();
    registry.register_node::<Print>();
}

/// A registry holding every built-in node type.
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    register_builtin(&mut registry);
    registry
}
