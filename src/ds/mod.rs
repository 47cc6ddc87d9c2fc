pub mod eviction_list;
pub mod router;
pub mod slot_arena;

pub use eviction_list::EvictionList;
pub use router::KeyRouter;
pub use slot_arena::{SlotArena, SlotId};
