mod article_store;
mod memory;
mod postgres;
mod profile_store;

pub use self::{
    article_store::ArticleStore,
    memory::MemoryStore,
    postgres::{DBPool, init_db_from_env, migrate, new_db_poll},
    profile_store::ProfileStore,
};
