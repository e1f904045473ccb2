//! Инфраструктурный слой вокруг покерного движка:
//! - RNG-реализации для движка;
//! - кэш снэпшотов по сессиям и абстракция внешнего хранилища;
//! - сериализация мутаций по сессиям (одна мутация на сессию за раз);
//! - часы.

pub mod clock;
pub mod persistence;
pub mod rng;
pub mod serializer;
pub mod store;

pub use clock::now_millis;
pub use persistence::{InMemorySnapshots, NoPersistence, SnapshotSource};
pub use rng::*;
pub use serializer::SessionLocks;
pub use store::StateStore;
