use std::collections::HashMap;

use crate::Item;

/// Interactions a rendered cell supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCapabilities {
    pub tap_to_dismiss: bool,
    pub drag_to_dismiss: bool,
}

impl CellCapabilities {
    pub const DISMISSIBLE: Self = Self { tap_to_dismiss: true, drag_to_dismiss: true };
    pub const STATIC: Self = Self { tap_to_dismiss: false, drag_to_dismiss: false };
}

type Factory<C> = Box<dyn Fn(&Item) -> C + Send + Sync>;

/// Builds cells of one concrete type, picked by capability set. Lookups
/// that hit no registration use the fallback given at construction, so
/// every call yields a usable cell.
pub struct CellRegistry<C> {
    factories: HashMap<CellCapabilities, Factory<C>>,
    fallback: Factory<C>,
}

impl<C> CellRegistry<C> {
    pub fn new(fallback: impl Fn(&Item) -> C + Send + Sync + 'static) -> Self {
        Self { factories: HashMap::new(), fallback: Box::new(fallback) }
    }

    pub fn register(&mut self, caps: CellCapabilities, factory: impl Fn(&Item) -> C + Send + Sync + 'static) -> &mut Self {
        self.factories.insert(caps, Box::new(factory));
        self
    }

    pub fn is_registered(&self, caps: CellCapabilities) -> bool { self.factories.contains_key(&caps) }

    pub fn make(&self, caps: CellCapabilities, item: &Item) -> C {
        match self.factories.get(&caps) {
            Some(factory) => factory(item),
            None => (self.fallback)(item),
        }
    }
}
